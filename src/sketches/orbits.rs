use std::f64::consts::{PI, TAU};

use crate::brush::wetness_level;
use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::foundation::error::{AquarelleError, AquarelleResult};
use crate::foundation::math::lerp;
use crate::session::{Activity, EngineConfig, PaperFinish, Sketch, SketchCx};
use crate::sim::evaporation::{BurnDecay, ConstantDecay, Evaporation};
use crate::sim::flow::{FlowMapConfig, FlowTexture};
use crate::sketches::palette_at;
use crate::source::shuffle;

const INKS: [Rgba8; 6] = [
    Rgba8::rgb(0xe6, 0x2e, 0x6b),
    Rgba8::rgb(0x00, 0x9a, 0xd8),
    Rgba8::rgb(0xf0, 0x7f, 0x00),
    Rgba8::rgb(0x2e, 0xa0, 0x3c),
    Rgba8::rgb(0x8a, 0x4b, 0xe0),
    Rgba8::rgb(0xd9, 0xa4, 0x00),
];

const FLOW_NOISE_SCALE: f64 = 0.001;
const FLOW_FORCE: f64 = 60.0;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Attractor {
    center: Point,
    radius: f64,
    /// `1.0` or `-1.0`: which way particles are swept around the circle.
    chirality: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Particle {
    pos: Point,
    alpha: f64,
    color: Rgba8,
}

/// Particles seeded on a grid of invisible circles and swept around them by a noise field.
///
/// Unlike the scripted sketches this one paints directly from [`Sketch::update`]: every frame
/// each particle drags a one-pixel wet line behind it and fades, until `stop_frame` or until
/// every particle has left the canvas or stalled.
#[derive(Clone, Debug, PartialEq)]
pub struct Orbits {
    /// Grid cell holding one circle, authored for a 1080px canvas.
    pub cell: f64,
    pub stop_frame: u64,
    attractors: Vec<Attractor>,
    particles: Vec<Particle>,
}

impl Default for Orbits {
    fn default() -> Self {
        Self {
            cell: 200.0,
            stop_frame: 30,
            attractors: Vec::new(),
            particles: Vec::new(),
        }
    }
}

impl Orbits {
    pub fn preset() -> EngineConfig {
        EngineConfig {
            canvas: Canvas {
                width: 1350,
                height: 1080,
            },
            evaporation: Evaporation {
                burn: Some(BurnDecay {
                    level: 250,
                    alpha: 8,
                }),
                constant: ConstantDecay::Subtract { amount: 1 },
                every: 8,
            },
            flow_map: FlowMapConfig {
                low: 8.0,
                high: 48.0,
                texture: FlowTexture::Weave,
                ..FlowMapConfig::default()
            },
            settle_frames: 100,
            finish: Some(PaperFinish {
                margin: 60,
                tint: Rgba8::rgb(0xed, 0xeb, 0xe6),
                grain_sd: 11.0,
                grain_weave: 3.0,
                grain_noise: 2.0,
                ..PaperFinish::default()
            }),
            ..EngineConfig::default()
        }
    }
}

impl Sketch for Orbits {
    fn name(&self) -> &str {
        "orbits"
    }

    fn setup(&mut self, cx: &mut SketchCx<'_>) -> AquarelleResult<()> {
        if !self.cell.is_finite() || self.cell <= 0.0 {
            return Err(AquarelleError::validation("orbit cell size must be finite and > 0"));
        }
        let canvas = cx.state.canvas();
        let src = &mut *cx.source;
        let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
        let scale = w.min(h) / 1080.0;
        let cell = self.cell * scale;

        let mut inks = INKS;
        shuffle(src, &mut inks);
        let palette = &inks[..3];

        self.attractors.clear();
        self.particles.clear();
        let mut cell_y = 0.0;
        while cell_y < h {
            let mut cell_x = 0.0;
            while cell_x < w {
                let color = palette_at(palette, src.random());
                let center = Point::new(
                    src.random_range(cell_x, cell_x + cell * 0.9),
                    src.random_range(cell_y, cell_y + cell * 0.9),
                );
                let radius = src.gaussian(200.0, 40.0).max(30.0) * scale;
                self.attractors.push(Attractor {
                    center,
                    radius,
                    chirality: src.sign(),
                });

                let step = 300.0 * scale / radius;
                let jitter = 12.0 * scale;
                let mut a = 0.0;
                while a < TAU {
                    let x = src.gaussian(center.x, 2.0) + radius * a.sin();
                    let y = src.gaussian(center.y, 2.0) + radius * a.cos();
                    let nx = (src.noise2(x * 0.2, y * 0.2) * 2.0 - 1.0) * jitter;
                    let ny = (src.noise3(x * 0.2, y * 0.2, 100.0) * 2.0 - 1.0) * jitter;
                    self.particles.push(Particle {
                        pos: Point::new(x + nx, y + ny),
                        alpha: 1.0,
                        color,
                    });
                    a += src.gaussian(step, step / 3.0).max(step * 0.05);
                }
                cell_x += cell;
            }
            cell_y += cell;
        }
        tracing::debug!(
            circles = self.attractors.len(),
            particles = self.particles.len(),
            "orbits seeded"
        );
        Ok(())
    }

    fn update(&mut self, cx: &mut SketchCx<'_>) -> AquarelleResult<Activity> {
        if self.particles.is_empty() || cx.frame.0 >= self.stop_frame {
            return Ok(Activity::Idle);
        }
        let canvas = cx.state.canvas();
        let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
        let scale = w.min(h) / 1080.0;
        let src = &mut *cx.source;
        src.set_detail(2, 1.0);

        for i in (0..self.particles.len()).rev() {
            let p = self.particles[i];
            let (nx, ny) = (p.pos.x * FLOW_NOISE_SCALE, p.pos.y * FLOW_NOISE_SCALE);
            let mut dx = src.gaussian(0.0, 0.5)
                + (src.noise2(nx, ny) - src.noise2(nx + 1.0, ny)) * FLOW_FORCE * scale;
            let mut dy = src.gaussian(0.0, 0.5)
                + (src.noise3(nx, ny, 100.0) - src.noise3(nx, ny + 1.0, 100.0))
                    * FLOW_FORCE
                    * scale;

            for c in &self.attractors {
                let surface = (p.pos.distance(c.center) - c.radius).max(0.0) / scale;
                let force = 20.0 / (10.0 + surface * 0.2) * scale;
                let angle = (p.pos.y - c.center.y).atan2(p.pos.x - c.center.x)
                    + PI * 0.6 * c.chirality;
                dx += force * angle.cos();
                dy += force * angle.sin();
            }

            let wetness = lerp(64.0, 160.0, 1.0 - p.alpha);
            let wet = wetness_level(src.gaussian(wetness, 8.0).clamp(24.0, 255.0));
            cx.state
                .watercolor(p.color.with_alpha(p.alpha.max(0.008)), wet)
                .push()
                .no_fill()
                .stroke()
                .stroke_weight(1.0)
                .line(p.pos.x, p.pos.y, p.pos.x + dx, p.pos.y + dy)
                .pop();

            let pos = Point::new(p.pos.x + dx, p.pos.y + dy);
            let gone = pos.x < 0.0 || pos.y < 0.0 || pos.x > w || pos.y > h;
            if gone || dx.hypot(dy) < 0.1 {
                self.particles.remove(i);
            } else {
                self.particles[i] = Particle {
                    pos,
                    alpha: p.alpha * 0.6,
                    ..p
                };
            }
        }
        Ok(Activity::Busy)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sketches/orbits.rs"]
mod tests;
