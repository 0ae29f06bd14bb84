//! Software drawing surface: rasters, compositing modes, and anti-aliased primitives.

pub mod blend;
pub mod draw;
pub mod raster;

pub use blend::BlendMode;
pub use draw::{Ink, Painter, Pen, Shape, draw_shape};
pub use raster::{Gray8, Pixel, Raster};
