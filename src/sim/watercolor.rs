use kurbo::{Point, Vec2};

use crate::foundation::core::{Rgba8, Rgba8Premul};
use crate::surface::blend::BlendMode;
use crate::surface::draw::{Ink, Painter, Shape, draw_shape};
use crate::surface::raster::{Gray8, Raster};

/// Dual-surface brush: every call is forwarded to the pigment and the water buffer in the same
/// step. Pigment takes `color` with normal compositing; water takes `wetness` as a gray level
/// with lightest-wins compositing.
pub struct Watercolor<'a> {
    pub(crate) pigment: &'a mut Raster<Rgba8Premul>,
    pub(crate) water: &'a mut Raster<Gray8>,
    pub(crate) painter: &'a mut Painter,
    pub(crate) color: Rgba8,
    pub(crate) wetness: u8,
}

impl Watercolor<'_> {
    pub fn fill(self) -> Self {
        self.painter.pen_mut().fill = true;
        self
    }

    pub fn no_fill(self) -> Self {
        self.painter.pen_mut().fill = false;
        self
    }

    pub fn stroke(self) -> Self {
        self.painter.pen_mut().stroke = true;
        self
    }

    pub fn no_stroke(self) -> Self {
        self.painter.pen_mut().stroke = false;
        self
    }

    pub fn stroke_weight(self, weight: f64) -> Self {
        self.painter.pen_mut().weight = weight;
        self
    }

    pub fn push(self) -> Self {
        self.painter.push();
        self
    }

    pub fn pop(self) -> Self {
        self.painter.pop();
        self
    }

    pub fn circle(self, x: f64, y: f64, diameter: f64) -> Self {
        self.shape(&Shape::Circle {
            center: Point::new(x, y),
            diameter,
        })
    }

    pub fn line(self, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        self.shape(&Shape::Line {
            from: Point::new(x1, y1),
            to: Point::new(x2, y2),
        })
    }

    pub fn rect(self, x: f64, y: f64, w: f64, h: f64) -> Self {
        self.shape(&Shape::Rect {
            origin: Point::new(x, y),
            size: Vec2::new(w, h),
        })
    }

    pub fn shape(self, shape: &Shape) -> Self {
        let pen = self.painter.pen();
        draw_shape(
            &mut *self.pigment,
            &pen,
            Ink::new(self.color, BlendMode::Normal),
            shape,
        );
        draw_shape(
            &mut *self.water,
            &pen,
            Ink::new(Rgba8::gray(self.wetness), BlendMode::Lightest),
            shape,
        );
        self
    }
}
