use kurbo::Point;

use crate::brush::wetness_level;
use crate::foundation::core::{Canvas, Rgba8};
use crate::schedule::StrokeScript;
use crate::sim::stroke::Stroke;
use crate::source::Source;

/// A "dirty" wash: many faint, damp dots scattered around a point.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Speckle {
    pub center: Point,
    /// Standard deviation of the scatter, in pixels.
    pub spread: f64,
    pub color: Rgba8,
    /// Upper bound of the per-dot alpha, as a unit fraction.
    pub max_alpha: f64,
    /// Dots per pixel of spread.
    pub density: f64,
    /// Wetness range `[min, max)` of each dot.
    pub wetness: (f64, f64),
}

impl Speckle {
    pub fn new(center: Point, spread: f64, color: Rgba8) -> Self {
        Self {
            center,
            spread,
            color,
            max_alpha: 0.002,
            density: 60.0,
            wetness: (32.0, 64.0),
        }
    }

    pub fn dot_count(&self) -> usize {
        (self.spread.max(0.0) * self.density.max(0.0)).ceil() as usize
    }
}

/// All dots land on the same frame; the script never waits.
pub fn speckle_script(canvas: Canvas, speckle: &Speckle, source: &mut dyn Source) -> StrokeScript {
    let mut script = StrokeScript::new();
    let (lo, hi) = speckle.wetness;
    for _ in 0..speckle.dot_count() {
        let alpha = source.random() * speckle.max_alpha;
        let wet = wetness_level(source.random_range(lo, hi));
        let x = source.gaussian(speckle.center.x, speckle.spread);
        let y = source.gaussian(speckle.center.y, speckle.spread);
        let d = source.gaussian(4.0, 1.0);
        script.paint(Stroke::new(canvas, speckle.color.with_alpha(alpha), wet).circle(x, y, d));
    }
    script
}

#[cfg(test)]
#[path = "../../tests/unit/brush/speckle.rs"]
mod tests;
