use std::f64::consts::PI;

use kurbo::Affine;

use crate::brush::{HatchRect, SPEED_UNITS_PER_FRAME, hatch_script};
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::AquarelleResult;
use crate::foundation::math::{lerp, sequence_t};
use crate::schedule::{DeferredScript, RoutineCx, StrokeScript, WorkThrottle};
use crate::session::{EngineConfig, PaperFinish, Sketch, SketchCx};
use crate::sim::evaporation::{BurnDecay, ConstantDecay, Evaporation};
use crate::sim::flow::FlowMapConfig;
use crate::sketches::{classed, palette_at};

const INKS: [Rgba8; 3] = [
    Rgba8::rgb(0x00, 0x00, 0x00),
    Rgba8::rgb(0xff, 0x00, 0x00),
    Rgba8::rgb(0xff, 0xcc, 0x00),
];

/// A column of tilted, hatched rectangles. Each one is painted twice, left to soak, then dried.
#[derive(Clone, Debug, PartialEq)]
pub struct Shapes {
    /// Frames each rectangle soaks before it is dried.
    pub soak_frames: u64,
}

impl Default for Shapes {
    fn default() -> Self {
        Self { soak_frames: 40 }
    }
}

impl Shapes {
    pub fn preset() -> EngineConfig {
        EngineConfig {
            canvas: Canvas {
                width: 432,
                height: 540,
            },
            evaporation: Evaporation {
                burn: Some(BurnDecay {
                    level: 251,
                    alpha: 255,
                }),
                constant: ConstantDecay::Fade { alpha: 4 },
                every: 1,
            },
            flow_map: FlowMapConfig {
                low: 8.0,
                high: 96.0,
                noise_scale: 0.02,
                ..FlowMapConfig::default()
            },
            finish: Some(PaperFinish {
                tint: Rgba8::new(0xe3, 0xd5, 0xb3, 0x88),
                grain_sd: 13.0,
                ..PaperFinish::default()
            }),
            ..EngineConfig::default()
        }
    }
}

impl Sketch for Shapes {
    fn name(&self) -> &str {
        "shapes"
    }

    fn setup(&mut self, cx: &mut SketchCx<'_>) -> AquarelleResult<()> {
        let soak = self.soak_frames;
        let throttle = WorkThrottle::new(SPEED_UNITS_PER_FRAME)?;
        cx.scheduler.schedule(
            DeferredScript::new(throttle, move |rcx: &mut RoutineCx<'_>| {
                compose(rcx, soak)
            }),
            0,
        );
        Ok(())
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn compose(cx: &mut RoutineCx<'_>, soak_frames: u64) -> AquarelleResult<StrokeScript> {
    let canvas = cx.state.canvas();
    let src = &mut *cx.source;
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);
    let scale = w.min(h) / 1080.0;

    let classes = src.gaussian(5.0, 1.0).floor().max(1.0) as usize;
    let turn = src.gaussian(PI / 6.0, PI / 8.0) * src.sign();
    let count = src.gaussian(4.0, 2.0).floor().max(2.0) as usize;
    let span = h / 8.0 + h / 4.0 * sigmoid(count as f64 * 2.0 - 3.0);
    tracing::debug!(count, turn, "composing rectangles");

    let mut script = StrokeScript::new();
    for i in 0..count {
        let t = sequence_t(i, count);
        let cy = lerp((h - span) / 2.0, (h + span) / 2.0, t);
        let rh = span / (count as f64 - 1.0).max(1.0)
            * src.gaussian(lerp(0.6, 0.2, t), 0.1).max(0.1);
        let rw = rh * src.gaussian(0.8 * span / rh, 1.0).max(1.0);
        let shift = src.gaussian(turn * t * 100.0 * scale, 100.0 * scale);
        let transform = Affine::translate((w / 2.0, cy))
            * Affine::rotate(lerp(turn * 0.1, turn, t))
            * Affine::translate((shift, 0.0));
        let color = palette_at(&INKS, classed(src.random().powi(2), classes));

        let rect = HatchRect {
            x: -rw / 2.0,
            y: -rh / 2.0,
            w: rw,
            h: rh,
            color,
            transform,
        };
        script.extend(hatch_script(canvas, &rect, &mut *src));
        script.extend(hatch_script(canvas, &rect, &mut *src));
        script.wait(soak_frames).dry();
    }
    Ok(script)
}
