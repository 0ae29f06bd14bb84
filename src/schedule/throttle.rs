use crate::foundation::error::{AquarelleError, AquarelleResult};

/// Converts accumulated work into whole frames of delay, carrying the remainder.
///
/// With a budget of 60 units per frame, adding 150 units asks for 2 frames and keeps 30.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorkThrottle {
    units_per_frame: f64,
    carried: f64,
}

impl WorkThrottle {
    pub fn new(units_per_frame: f64) -> AquarelleResult<Self> {
        if !units_per_frame.is_finite() || units_per_frame <= 0.0 {
            return Err(AquarelleError::validation(
                "work units per frame must be finite and > 0",
            ));
        }
        Ok(Self {
            units_per_frame,
            carried: 0.0,
        })
    }

    pub fn units_per_frame(&self) -> f64 {
        self.units_per_frame
    }

    pub fn carried(&self) -> f64 {
        self.carried
    }

    /// Add `work` units and return the number of frames to wait.
    pub fn add(&mut self, work: f64) -> u64 {
        let work = if work.is_finite() { work.max(0.0) } else { 0.0 };
        let total = self.carried + work;
        let frames = (total / self.units_per_frame).floor();
        self.carried = total - frames * self.units_per_frame;
        frames as u64
    }

    /// Drop the carried remainder.
    pub fn reset(&mut self) {
        self.carried = 0.0;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/throttle.rs"]
mod tests;
