use crate::foundation::core::{FrameIndex, Rgba8};
use crate::foundation::error::{AquarelleError, AquarelleResult};
use crate::surface::blend::BlendMode;
use crate::surface::raster::{Gray8, Raster};

/// Exponential water loss: color-burn a near-white level over the water buffer.
///
/// Saturated wetness is left alone and low wetness loses proportionally more, so dry paper
/// stays dry while pooled water lingers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BurnDecay {
    pub level: u8,
    pub alpha: u8,
}

impl Default for BurnDecay {
    fn default() -> Self {
        Self {
            level: 250,
            alpha: 255,
        }
    }
}

/// Periodic water loss that makes the buffer converge to fully dry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConstantDecay {
    /// Subtract `amount`, floored at zero.
    Subtract { amount: u8 },
    /// Blend black over the buffer at `alpha`.
    Fade { alpha: u8 },
}

impl Default for ConstantDecay {
    fn default() -> Self {
        Self::Subtract { amount: 1 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Evaporation {
    pub burn: Option<BurnDecay>,
    pub constant: ConstantDecay,
    /// Apply `constant` on frames divisible by this value.
    pub every: u32,
}

impl Default for Evaporation {
    fn default() -> Self {
        Self {
            burn: Some(BurnDecay::default()),
            constant: ConstantDecay::default(),
            every: 1,
        }
    }
}

impl Evaporation {
    pub fn validate(&self) -> AquarelleResult<()> {
        if self.every == 0 {
            return Err(AquarelleError::validation("evaporation interval must be > 0"));
        }
        Ok(())
    }

    /// One evaporation step for `frame`.
    pub fn apply(&self, water: &mut Raster<Gray8>, frame: FrameIndex) {
        if let Some(burn) = self.burn {
            let color = Rgba8::new(burn.level, burn.level, burn.level, burn.alpha);
            water.fill_blend(color, BlendMode::Burn);
        }

        if self.every == 0 || frame.0 % u64::from(self.every) != 0 {
            return;
        }
        match self.constant {
            ConstantDecay::Subtract { amount } => {
                for px in water.pixels_mut() {
                    px.0 = px.0.saturating_sub(amount);
                }
            }
            ConstantDecay::Fade { alpha } => {
                water.fill_blend(Rgba8::new(0, 0, 0, alpha), BlendMode::Normal);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sim/evaporation.rs"]
mod tests;
