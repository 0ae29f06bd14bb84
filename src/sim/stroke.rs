use kurbo::{Affine, Point, Vec2};

use crate::foundation::core::{Canvas, Rgba8};
use crate::surface::draw::Shape;

/// Which parts of each primitive a stroke paints.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaintStyle {
    #[default]
    Fill,
    Outline {
        weight: f64,
    },
    FillAndOutline {
        weight: f64,
    },
}

/// One logical paint application: primitives sharing a color, a wetness and a transform.
///
/// A stroke remembers the canvas it was authored for; applying it to a state of another size
/// is rejected.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stroke {
    pub canvas: Canvas,
    pub color: Rgba8,
    pub wetness: u8,
    pub style: PaintStyle,
    pub transform: Affine,
    pub shapes: Vec<Shape>,
}

impl Stroke {
    pub fn new(canvas: Canvas, color: Rgba8, wetness: u8) -> Self {
        Self {
            canvas,
            color,
            wetness,
            style: PaintStyle::Fill,
            transform: Affine::IDENTITY,
            shapes: Vec::new(),
        }
    }

    pub fn with_style(mut self, style: PaintStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }

    pub fn circle(mut self, x: f64, y: f64, diameter: f64) -> Self {
        self.shapes.push(Shape::Circle {
            center: Point::new(x, y),
            diameter,
        });
        self
    }

    pub fn line(mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        self.shapes.push(Shape::Line {
            from: Point::new(x1, y1),
            to: Point::new(x2, y2),
        });
        self
    }

    pub fn rect(mut self, x: f64, y: f64, w: f64, h: f64) -> Self {
        self.shapes.push(Shape::Rect {
            origin: Point::new(x, y),
            size: Vec2::new(w, h),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
