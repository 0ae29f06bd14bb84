use crate::brush::{Bloom, FlowerColors, Speckle, flower_script, place_blooms, speckle_script};
use crate::foundation::core::{RenderMode, Rgba8};
use crate::foundation::error::AquarelleResult;
use crate::schedule::{DeferredScript, RoutineCx, Sequence, StrokeScript, WorkThrottle};
use crate::session::{EngineConfig, PaperFinish, Sketch, SketchCx};
use crate::sim::evaporation::{BurnDecay, ConstantDecay, Evaporation};
use crate::sim::flow::FlowMapConfig;
use crate::sketches::{muted, palette_at};

const PETALS: [Rgba8; 4] = [
    Rgba8::rgb(0xf2, 0xa7, 0xc3),
    Rgba8::rgb(0xe8, 0x6a, 0x5c),
    Rgba8::rgb(0xf5, 0xc8, 0x4c),
    Rgba8::rgb(0x8f, 0x9b, 0xe0),
];

const SEED_TINT: Rgba8 = Rgba8::rgb(0xcc, 0x88, 0x44);

/// A field of flowers over a faint, dirty wash.
///
/// Frame 1 lays the wash on an almost uniform, very wet flow map. At `bloom_frame` the flow map
/// is rebuilt for the blooms phase, the wash is dried, and flowers are painted one by one, each
/// dried before the next starts.
#[derive(Clone, Debug, PartialEq)]
pub struct Flowers {
    pub wash_flow: FlowMapConfig,
    pub bloom_flow: FlowMapConfig,
    pub bloom_frame: u64,
}

impl Default for Flowers {
    fn default() -> Self {
        Self {
            wash_flow: FlowMapConfig {
                low: 232.0,
                high: 240.0,
                ..FlowMapConfig::default()
            },
            bloom_flow: FlowMapConfig {
                low: 32.0,
                high: 48.0,
                ..FlowMapConfig::default()
            },
            bloom_frame: 30,
        }
    }
}

impl Flowers {
    /// Engine settings this sketch was tuned with.
    pub fn preset() -> EngineConfig {
        EngineConfig {
            evaporation: Evaporation {
                burn: Some(BurnDecay {
                    level: 250,
                    alpha: 8,
                }),
                constant: ConstantDecay::Subtract { amount: 1 },
                every: 8,
            },
            finish: Some(PaperFinish::default()),
            ..EngineConfig::default()
        }
    }
}

impl Sketch for Flowers {
    fn name(&self) -> &str {
        "flowers"
    }

    fn setup(&mut self, cx: &mut SketchCx<'_>) -> AquarelleResult<()> {
        let canvas = cx.state.canvas();
        cx.state.init_flow_map(&self.wash_flow, &mut *cx.source);
        let blooms = place_blooms(canvas, &mut *cx.source);
        tracing::debug!(blooms = blooms.len(), "flowers placed");

        let throttle = WorkThrottle::new(cx.config.work_units_per_frame)?;

        let mut wash = StrokeScript::new();
        for bloom in &blooms {
            if cx.source.chance(0.3) {
                continue;
            }
            let spread = cx.source.gaussian(bloom.radius * 0.4, 4.0).max(1.0);
            let color = muted(palette_at(&PETALS, cx.source.random()), 0.85);
            let speckle = Speckle::new(bloom.center, spread, color);
            wash.extend(speckle_script(canvas, &speckle, &mut *cx.source));
        }
        cx.scheduler.schedule(wash.into_routine(throttle), 0);

        let mut phase = StrokeScript::new();
        phase.flow_map(self.bloom_flow).dry();
        let mut blooming = Sequence::new().then(phase.into_routine(throttle));
        let mode = cx.config.mode;
        for bloom in blooms {
            blooming.push(Box::new(DeferredScript::new(
                throttle,
                move |rcx: &mut RoutineCx<'_>| paint_bloom(rcx, &bloom, mode),
            )));
        }
        let delay = self.bloom_frame.saturating_sub(cx.frame.0);
        cx.scheduler.schedule(blooming, delay);
        Ok(())
    }
}

fn paint_bloom(
    cx: &mut RoutineCx<'_>,
    bloom: &Bloom,
    mode: RenderMode,
) -> AquarelleResult<StrokeScript> {
    let index = cx.source.random();
    let seed_index = cx.source.gaussian(index + 1.0, 0.05).rem_euclid(1.0);
    let colors = FlowerColors {
        petal: palette_at(&PETALS, index),
        seed: palette_at(&PETALS, seed_index).multiply(SEED_TINT),
    };

    let mut script = StrokeScript::new();
    script.wait(1);
    script.extend(flower_script(
        cx.state.canvas(),
        bloom,
        &colors,
        mode,
        &mut *cx.source,
    ));
    script.wait(10).dry();
    Ok(script)
}
