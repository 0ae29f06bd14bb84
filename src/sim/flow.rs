use std::f64::consts::TAU;

use crate::foundation::core::Canvas;
use crate::source::Source;
use crate::surface::raster::{Gray8, Raster};

/// Paper-grain texture multiplied into the noise field.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FlowTexture {
    /// Randomly oriented fibers: `base + along * |sin(u * freq)| + across * |sin(v * freq)|`
    /// where `(u, v)` is the pixel projected on a per-pixel random angle.
    Fiber {
        base: f64,
        along: f64,
        across: f64,
        frequency: f64,
    },
    /// Smooth diagonal weave: `(0.95 + 0.05 * weave(x, y))^4`.
    Weave,
    /// No texture.
    Flat,
}

impl Default for FlowTexture {
    fn default() -> Self {
        Self::Fiber {
            base: 0.2,
            along: 0.6,
            across: 0.2,
            frequency: 0.4,
        }
    }
}

/// Weave function shared by the flow texture and the paper finish, in `[-1, 1]`.
pub fn weave(x: f64, y: f64) -> f64 {
    ((x * 0.5 - y * 0.1).sin() + (x * 0.1 + y * 0.5).sin()) / 2.0
}

/// How a flow map is derived. `low..high` is the resistance range the noise is mapped onto.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FlowMapConfig {
    pub low: f64,
    pub high: f64,
    pub noise_scale: f64,
    pub noise_octaves: u32,
    pub noise_falloff: f64,
    pub texture: FlowTexture,
}

impl Default for FlowMapConfig {
    fn default() -> Self {
        Self {
            low: 32.0,
            high: 48.0,
            noise_scale: 0.06,
            noise_octaves: 3,
            noise_falloff: 2.0 / 3.0,
            texture: FlowTexture::default(),
        }
    }
}

/// Static substrate the water diffuses through. Built once per run or per phase; drawing never
/// touches it.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowMap {
    raster: Raster<Gray8>,
}

impl FlowMap {
    #[tracing::instrument(skip(source), fields(w = canvas.width, h = canvas.height))]
    pub fn generate(canvas: Canvas, config: &FlowMapConfig, source: &mut dyn Source) -> Self {
        source.set_detail(config.noise_octaves, config.noise_falloff);

        let mut raster = Raster::new(canvas);
        for y in 0..canvas.height {
            for x in 0..canvas.width {
                let (fx, fy) = (f64::from(x), f64::from(y));
                let texture = match config.texture {
                    FlowTexture::Fiber {
                        base,
                        along,
                        across,
                        frequency,
                    } => {
                        let angle = source.random() * TAU;
                        let u = angle.cos() * fx;
                        let v = angle.sin() * fy;
                        base + along * (u * frequency).sin().abs()
                            + across * (v * frequency).sin().abs()
                    }
                    FlowTexture::Weave => (0.95 + weave(fx, fy) * 0.05).powi(4),
                    FlowTexture::Flat => 1.0,
                };
                let n = source.noise2(fx * config.noise_scale, fy * config.noise_scale);
                let v = (config.high - (config.high - config.low) * n).max(0.0) * texture;
                raster.set(x, y, Gray8(v.round().clamp(0.0, 255.0) as u8));
            }
        }
        Self { raster }
    }

    pub fn raster(&self) -> &Raster<Gray8> {
        &self.raster
    }

    pub fn canvas(&self) -> Canvas {
        self.raster.canvas()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sim/flow.rs"]
mod tests;
