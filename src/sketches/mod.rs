//! Built-in sketches used by the command-line renderer.

mod flowers;
mod orbits;
mod shapes;

pub use flowers::Flowers;
pub use orbits::Orbits;
pub use shapes::Shapes;

use crate::foundation::core::Rgba8;

/// Pick a color along a palette, with `t` in `[0, 1]`.
pub(crate) fn palette_at(palette: &[Rgba8], t: f64) -> Rgba8 {
    match palette {
        [] => Rgba8::BLACK,
        [only] => *only,
        _ => {
            let span = (palette.len() - 1) as f64;
            let pos = t.clamp(0.0, 1.0) * span;
            let i = (pos.floor() as usize).min(palette.len() - 2);
            palette[i].lerp(palette[i + 1], pos - i as f64)
        }
    }
}

/// Snap `t` onto `classes` evenly spaced steps.
pub(crate) fn classed(t: f64, classes: usize) -> f64 {
    if classes <= 1 {
        return 0.5;
    }
    let k = (t.clamp(0.0, 1.0) * classes as f64).floor().min(classes as f64 - 1.0);
    k / (classes - 1) as f64
}

/// Pull `color` towards its own gray level by `amount` in `[0, 1]`.
pub(crate) fn muted(color: Rgba8, amount: f64) -> Rgba8 {
    let luma = 0.299 * f64::from(color.r) + 0.587 * f64::from(color.g) + 0.114 * f64::from(color.b);
    let gray = Rgba8::new(0, 0, 0, color.a).lerp(Rgba8::new(255, 255, 255, color.a), luma / 255.0);
    color.lerp(gray, amount)
}

#[cfg(test)]
#[path = "../../tests/unit/sketches/sketches.rs"]
mod tests;
