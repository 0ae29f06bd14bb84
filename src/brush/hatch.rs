use kurbo::{Affine, Point};

use crate::brush::wetness_level;
use crate::foundation::core::{Canvas, Rgba8};
use crate::schedule::StrokeScript;
use crate::sim::stroke::Stroke;
use crate::source::Source;

/// Throttle budget for dab lines: one frame per 100 pixels of travel.
pub const SPEED_UNITS_PER_FRAME: f64 = 100.0;

const MAX_HATCH_LEGS: usize = 10_000;

/// A rectangle filled with a zig-zag hatch of dabs, outlined, then washed with clear water.
///
/// Coordinates are in the rectangle's local space; `transform` places it on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HatchRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub color: Rgba8,
    pub transform: Affine,
}

/// Dabs that share color, wetness and placement.
#[derive(Clone, Copy, Debug)]
struct Dab {
    canvas: Canvas,
    color: Rgba8,
    wetness: u8,
    transform: Affine,
}

impl Dab {
    fn at(&self, x: f64, y: f64, diameter: f64) -> Stroke {
        Stroke::new(self.canvas, self.color, self.wetness)
            .with_transform(self.transform)
            .circle(x, y, diameter)
    }
}

/// Lay dabs of `width` every `step` pixels from `from` to `to`, charging `step` units of work
/// per dab, then wait one frame.
#[allow(clippy::too_many_arguments)]
pub fn dab_line(
    script: &mut StrokeScript,
    canvas: Canvas,
    color: Rgba8,
    wetness: u8,
    transform: Affine,
    from: Point,
    to: Point,
    width: f64,
    step: f64,
    source: &mut dyn Source,
) {
    let dab = Dab {
        canvas,
        color,
        wetness,
        transform,
    };
    let dist = from.distance(to);
    if dist > 0.0 && step > 0.0 {
        script.reset_work();
        let dabs = (dist / step).ceil() as usize;
        for k in 0..dabs {
            let p = from.lerp(to, k as f64 * step / dist);
            let (x, y) = (source.gaussian(p.x, 0.4), source.gaussian(p.y, 0.4));
            script.paint(dab.at(x, y, width)).work(step);
        }
    }
    let (x, y) = (source.gaussian(to.x, 0.4), source.gaussian(to.y, 0.4));
    script.paint(dab.at(x, y, width)).wait(1);
}

pub fn hatch_script(canvas: Canvas, rect: &HatchRect, source: &mut dyn Source) -> StrokeScript {
    let HatchRect {
        x,
        y,
        w,
        h,
        color,
        transform,
    } = *rect;
    let mut script = StrokeScript::new();

    // fill
    let fill = color.with_alpha(0.1);
    let fill_wet = wetness_level(64.0);
    let pad = 5.0;
    let (left, right) = (x + pad, x + w - pad);
    let (top, bottom) = (y + pad, y + h - pad);
    let mut slope = source.random_range(0.5, 2.0);
    let mut p = Point::new(left, top);
    let mut down = true;
    for _ in 0..MAX_HATCH_LEGS {
        let jump = source.gaussian(10.0, 5.0).max(0.0);
        let q = if down {
            let top_hit = p.x + (p.y - top) / slope;
            if top_hit < right {
                Point::new(top_hit + jump, top)
            } else {
                let right_hit = p.y + (p.x - right) * slope;
                if right_hit > bottom {
                    break;
                }
                Point::new(right, right_hit + jump)
            }
        } else {
            let bottom_hit = p.x + (p.y - bottom) / slope;
            if bottom_hit >= right {
                break;
            }
            if bottom_hit >= left {
                Point::new(bottom_hit + jump, bottom)
            } else {
                let left_hit = p.y + (p.x - left) * slope;
                Point::new(left, left_hit + jump)
            }
        };
        down = !down;
        dab_line(
            &mut script, canvas, fill, fill_wet, transform, p, q, 15.0, 8.0, source,
        );
        p = q;
        slope = (slope * source.random_range(0.94, 1.06)).clamp(0.02, 1.0 / 0.02);
    }

    // outline
    let edge = color.with_alpha(0.06);
    let edge_wet = wetness_level(48.0);
    let corners = [
        Point::new(x, y),
        Point::new(x + w, y),
        Point::new(x + w, y + h),
        Point::new(x, y + h),
    ];
    for (i, &from) in corners.iter().enumerate() {
        let to = corners[(i + 1) % corners.len()];
        dab_line(
            &mut script, canvas, edge, edge_wet, transform, from, to, 10.0, 5.0, source,
        );
    }

    // clear water softens everything painted so far
    script.paint(
        Stroke::new(canvas, Rgba8::new(0x88, 0x88, 0x88, 0), 16)
            .with_transform(transform)
            .rect(x + 10.0, y + 10.0, w - 20.0, h - 20.0),
    );
    script
}

#[cfg(test)]
#[path = "../../tests/unit/brush/hatch.rs"]
mod tests;
