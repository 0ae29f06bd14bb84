//! Brush generators: turn a few parameters plus a random source into a [`StrokeScript`].
//!
//! Scripts are built ahead of time and played back by the scheduler, so every brush is a plain
//! function of its inputs and the source state.
//!
//! [`StrokeScript`]: crate::schedule::StrokeScript

pub mod flower;
pub mod hatch;
pub mod speckle;

pub use flower::{Bloom, FlowerColors, flower_script, place_blooms};
pub use hatch::{HatchRect, SPEED_UNITS_PER_FRAME, dab_line, hatch_script};
pub use speckle::{Speckle, speckle_script};

/// Map a wetness amount onto the water buffer's 0..=255 range.
pub(crate) fn wetness_level(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}
