use kurbo::{Affine, Point, Vec2};

use crate::foundation::core::Rgba8;
use crate::surface::blend::BlendMode;
use crate::surface::raster::{Pixel, Raster};

/// Geometry state shared by every primitive: which parts are painted, outline weight, transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pen {
    pub fill: bool,
    pub stroke: bool,
    pub weight: f64,
    pub transform: Affine,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            fill: true,
            stroke: false,
            weight: 1.0,
            transform: Affine::IDENTITY,
        }
    }
}

/// What a primitive deposits: a straight color and the compositing mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ink {
    pub color: Rgba8,
    pub blend: BlendMode,
}

impl Ink {
    pub fn new(color: Rgba8, blend: BlendMode) -> Self {
        Self { color, blend }
    }
}

/// A drawing primitive in local (pre-transform) coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Circle { center: Point, diameter: f64 },
    Line { from: Point, to: Point },
    Rect { origin: Point, size: Vec2 },
}

/// A [`Pen`] with a push/pop stack.
#[derive(Clone, Debug, Default)]
pub struct Painter {
    pen: Pen,
    stack: Vec<Pen>,
}

impl Painter {
    pub fn pen(&self) -> Pen {
        self.pen
    }

    pub fn pen_mut(&mut self) -> &mut Pen {
        &mut self.pen
    }

    pub fn push(&mut self) {
        self.stack.push(self.pen);
    }

    /// Restore the last pushed pen. An unbalanced pop keeps the current pen.
    pub fn pop(&mut self) {
        if let Some(pen) = self.stack.pop() {
            self.pen = pen;
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn translate(&mut self, x: f64, y: f64) {
        self.pen.transform = self.pen.transform * Affine::translate((x, y));
    }

    pub fn rotate(&mut self, radians: f64) {
        self.pen.transform = self.pen.transform * Affine::rotate(radians);
    }
}

/// Rasterize `shape` into `raster` with anti-aliased coverage.
pub fn draw_shape<P: Pixel>(raster: &mut Raster<P>, pen: &Pen, ink: Ink, shape: &Shape) {
    match *shape {
        Shape::Circle { center, diameter } => draw_circle(raster, pen, ink, center, diameter),
        Shape::Line { from, to } => draw_line(raster, pen, ink, from, to),
        Shape::Rect { origin, size } => draw_rect(raster, pen, ink, origin, size),
    }
}

fn draw_circle<P: Pixel>(raster: &mut Raster<P>, pen: &Pen, ink: Ink, center: Point, diameter: f64) {
    let c = pen.transform * center;
    let scale = transform_scale(pen.transform);
    let r = (diameter.abs() / 2.0) * scale;
    let half_w = pen.weight.max(0.0) * scale / 2.0;

    let outer = if pen.stroke { r + half_w } else { r };
    let bounds = Bounds::around(c, outer + 1.0);
    fill_coverage(raster, bounds, ink, |p| {
        let d = (p - c).hypot();
        let fill = if pen.fill { coverage(d - r) } else { 0.0 };
        let ring = if pen.stroke { coverage((d - r).abs() - half_w) } else { 0.0 };
        fill.max(ring)
    });
}

fn draw_line<P: Pixel>(raster: &mut Raster<P>, pen: &Pen, ink: Ink, from: Point, to: Point) {
    if !pen.stroke {
        return;
    }
    let a = pen.transform * from;
    let b = pen.transform * to;
    let half_w = pen.weight.max(0.0) * transform_scale(pen.transform) / 2.0;
    let bounds = Bounds::around(a, half_w + 1.0).union(Bounds::around(b, half_w + 1.0));
    fill_coverage(raster, bounds, ink, |p| coverage(segment_distance(p, a, b) - half_w));
}

fn draw_rect<P: Pixel>(raster: &mut Raster<P>, pen: &Pen, ink: Ink, origin: Point, size: Vec2) {
    let corners = [
        origin,
        Point::new(origin.x + size.x, origin.y),
        Point::new(origin.x + size.x, origin.y + size.y),
        Point::new(origin.x, origin.y + size.y),
    ]
    .map(|p| pen.transform * p);

    let half_w = pen.weight.max(0.0) * transform_scale(pen.transform) / 2.0;
    let pad = if pen.stroke { half_w + 1.0 } else { 1.0 };
    let bounds = corners
        .iter()
        .skip(1)
        .fold(Bounds::around(corners[0], pad), |acc, &p| {
            acc.union(Bounds::around(p, pad))
        });

    fill_coverage(raster, bounds, ink, |p| {
        let sd = convex_signed_distance(p, &corners);
        let fill = if pen.fill { coverage(sd) } else { 0.0 };
        let ring = if pen.stroke {
            coverage(sd.abs() - half_w)
        } else {
            0.0
        };
        fill.max(ring)
    });
}

/// Area coverage approximated from the signed distance at the pixel center.
fn coverage(signed_distance: f64) -> f32 {
    (0.5 - signed_distance).clamp(0.0, 1.0) as f32
}

fn transform_scale(t: Affine) -> f64 {
    t.determinant().abs().sqrt()
}

fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len2 = ab.hypot2();
    if len2 <= f64::EPSILON {
        return (p - a).hypot();
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    (p - (a + ab * t)).hypot()
}

/// Signed distance to a convex quad (negative inside). Exact on edges, approximate near corners.
fn convex_signed_distance(p: Point, corners: &[Point; 4]) -> f64 {
    let area2: f64 = (0..4)
        .map(|i| {
            let a = corners[i];
            let b = corners[(i + 1) % 4];
            a.x * b.y - b.x * a.y
        })
        .sum();
    if area2.abs() <= f64::EPSILON {
        return f64::INFINITY;
    }
    let orient = area2.signum();

    let mut sd = f64::NEG_INFINITY;
    for i in 0..4 {
        let a = corners[i];
        let b = corners[(i + 1) % 4];
        let e = b - a;
        let len = e.hypot();
        if len <= f64::EPSILON {
            continue;
        }
        // Outward normal for the winding given by `orient`.
        let n = Vec2::new(e.y, -e.x) * (orient / len);
        sd = sd.max((p - a).dot(n));
    }
    sd
}

#[derive(Clone, Copy, Debug)]
struct Bounds {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl Bounds {
    fn around(c: Point, r: f64) -> Self {
        Self {
            x0: c.x - r,
            y0: c.y - r,
            x1: c.x + r,
            y1: c.y + r,
        }
    }

    fn union(self, o: Self) -> Self {
        Self {
            x0: self.x0.min(o.x0),
            y0: self.y0.min(o.y0),
            x1: self.x1.max(o.x1),
            y1: self.y1.max(o.y1),
        }
    }

    /// Pixel range clipped to the raster, or `None` when empty or non-finite.
    fn pixel_range(self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        if !(self.x0.is_finite() && self.y0.is_finite() && self.x1.is_finite() && self.y1.is_finite())
        {
            return None;
        }
        let clip = |v: f64, max: u32| v.floor().clamp(0.0, f64::from(max)) as u32;
        let (x0, x1) = (clip(self.x0, width), clip(self.x1 + 1.0, width));
        let (y0, y1) = (clip(self.y0, height), clip(self.y1 + 1.0, height));
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }
}

fn fill_coverage<P: Pixel>(
    raster: &mut Raster<P>,
    bounds: Bounds,
    ink: Ink,
    cov: impl Fn(Point) -> f32,
) {
    let Some((x0, y0, x1, y1)) = bounds.pixel_range(raster.width(), raster.height()) else {
        return;
    };
    if ink.color.a == 0 {
        return;
    }
    for y in y0..y1 {
        for x in x0..x1 {
            let c = cov(Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5));
            if c > 0.0 {
                raster.blend_at(x, y, ink.color, c, ink.blend);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/draw.rs"]
mod tests;
