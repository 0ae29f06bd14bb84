use crate::foundation::core::{Canvas, Rgba8, Rgba8Premul};
use crate::foundation::error::{AquarelleError, AquarelleResult};
use crate::sim::flow::weave;
use crate::source::Source;
use crate::surface::blend::BlendMode;
use crate::surface::raster::Raster;

/// Final pass over the composited image: paper margins, a multiplied paper tint, and overlay
/// grain.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PaperFinish {
    /// Width of the plain border, in pixels.
    pub margin: u32,
    pub margin_color: Rgba8,
    /// Multiplied over the whole image.
    pub tint: Rgba8,
    /// Spread of the per-pixel overlay gray around mid-gray.
    pub grain_sd: f64,
    /// Weave texture amplitude added to the grain mean.
    pub grain_weave: f64,
    /// Noise amplitude added to the grain mean.
    pub grain_noise: f64,
    pub grain_noise_scale: f64,
}

impl Default for PaperFinish {
    fn default() -> Self {
        Self {
            margin: 0,
            margin_color: Rgba8::WHITE,
            tint: Rgba8::new(0xe8, 0xe7, 0xdc, 0x88),
            grain_sd: 7.0,
            grain_weave: 0.0,
            grain_noise: 0.0,
            grain_noise_scale: 0.05,
        }
    }
}

impl PaperFinish {
    pub fn validate(&self) -> AquarelleResult<()> {
        for (name, v) in [
            ("grain_sd", self.grain_sd),
            ("grain_weave", self.grain_weave),
            ("grain_noise", self.grain_noise),
            ("grain_noise_scale", self.grain_noise_scale),
        ] {
            if !v.is_finite() {
                return Err(AquarelleError::validation(format!("{name} must be finite")));
            }
        }
        if self.grain_sd < 0.0 {
            return Err(AquarelleError::validation("grain_sd must be >= 0"));
        }
        Ok(())
    }

    pub fn apply(&self, image: &mut Raster<Rgba8Premul>, source: &mut dyn Source) {
        let Canvas { width, height } = image.canvas();

        if self.margin > 0 {
            let m = self.margin;
            for y in 0..height {
                for x in 0..width {
                    let inside = x >= m && y >= m && x + m < width && y + m < height;
                    if !inside {
                        image.blend_at(x, y, self.margin_color, 1.0, BlendMode::Normal);
                    }
                }
            }
        }

        image.fill_blend(self.tint, BlendMode::Multiply);

        if self.grain_sd == 0.0 && self.grain_weave == 0.0 && self.grain_noise == 0.0 {
            return;
        }
        let s = self.grain_noise_scale;
        for y in 0..height {
            for x in 0..width {
                let (fx, fy) = (f64::from(x), f64::from(y));
                let mean = 128.0
                    + weave(fx, fy) * self.grain_weave
                    + (source.noise2(fx * s, fy * s) * 2.0 - 1.0) * self.grain_noise;
                let level = source.gaussian(mean, self.grain_sd).round().clamp(0.0, 255.0) as u8;
                image.blend_at(x, y, Rgba8::gray(level), 1.0, BlendMode::Overlay);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/finish.rs"]
mod tests;
