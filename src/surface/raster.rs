use std::fmt::Debug;

use crate::foundation::core::{Canvas, Rgba8, Rgba8Premul};
use crate::foundation::error::{AquarelleError, AquarelleResult};
use crate::foundation::math::unit_f32_to_u8;
use crate::surface::blend::{BlendMode, composite_gray, composite_premul};

/// Single-channel intensity pixel (wetness, flow resistance).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Gray8(pub u8);

/// Pixel formats a [`Raster`] can hold.
///
/// `to_channels`/`from_channels` expose the stored values as unit floats so filters can be
/// written once for every format. For [`Rgba8Premul`] the channels stay premultiplied.
pub trait Pixel: Copy + Default + PartialEq + Debug + Send + Sync + 'static {
    const CHANNELS: usize;

    fn to_channels(self) -> [f32; 4];

    fn from_channels(v: [f32; 4]) -> Self;

    /// Composite a straight color with the given coverage onto this pixel.
    fn composite(self, color: Rgba8, coverage: f32, mode: BlendMode) -> Self;
}

impl Pixel for Gray8 {
    const CHANNELS: usize = 1;

    fn to_channels(self) -> [f32; 4] {
        [f32::from(self.0) / 255.0, 0.0, 0.0, 0.0]
    }

    fn from_channels(v: [f32; 4]) -> Self {
        Self(unit_f32_to_u8(v[0]))
    }

    fn composite(self, color: Rgba8, coverage: f32, mode: BlendMode) -> Self {
        let sa = color.alpha_f32() * coverage.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return self;
        }
        let cb = f32::from(self.0) / 255.0;
        let cs = f32::from(color.r) / 255.0;
        Self(unit_f32_to_u8(composite_gray(cb, cs, sa, mode)))
    }
}

impl Pixel for Rgba8Premul {
    const CHANNELS: usize = 4;

    fn to_channels(self) -> [f32; 4] {
        self.to_array().map(|c| f32::from(c) / 255.0)
    }

    fn from_channels(v: [f32; 4]) -> Self {
        let a = unit_f32_to_u8(v[3]);
        // Premultiplied color can never exceed its alpha.
        let c = |x: f32| unit_f32_to_u8(x).min(a);
        Self {
            r: c(v[0]),
            g: c(v[1]),
            b: c(v[2]),
            a,
        }
    }

    fn composite(self, color: Rgba8, coverage: f32, mode: BlendMode) -> Self {
        let sa = color.alpha_f32() * coverage.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return self;
        }
        let src = [
            f32::from(color.r) / 255.0 * sa,
            f32::from(color.g) / 255.0 * sa,
            f32::from(color.b) / 255.0 * sa,
            sa,
        ];
        Self::from_channels(composite_premul(self.to_channels(), src, mode))
    }
}

/// Row-major, tightly packed 2D pixel buffer with fixed dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster<P> {
    width: u32,
    height: u32,
    pixels: Vec<P>,
}

impl<P: Pixel> Raster<P> {
    pub fn new(canvas: Canvas) -> Self {
        Self::filled(canvas, P::default())
    }

    pub fn filled(canvas: Canvas, value: P) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            pixels: vec![value; canvas.pixel_count()],
        }
    }

    pub fn from_pixels(canvas: Canvas, pixels: Vec<P>) -> AquarelleResult<Self> {
        if pixels.len() != canvas.pixel_count() {
            return Err(AquarelleError::validation(format!(
                "raster expects {} pixels for {}x{}, got {}",
                canvas.pixel_count(),
                canvas.width,
                canvas.height,
                pixels.len()
            )));
        }
        Ok(Self {
            width: canvas.width,
            height: canvas.height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    pub fn pixels(&self) -> &[P] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [P] {
        &mut self.pixels
    }

    pub fn get(&self, x: u32, y: u32) -> Option<P> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    pub fn set(&mut self, x: u32, y: u32, value: P) {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.pixels[i] = value;
        }
    }

    /// Composite `color` onto one pixel with partial coverage. Out-of-range coordinates are ignored.
    pub fn blend_at(&mut self, x: u32, y: u32, color: Rgba8, coverage: f32, mode: BlendMode) {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.pixels[i] = self.pixels[i].composite(color, coverage, mode);
        }
    }

    /// Overwrite every pixel.
    pub fn clear_to(&mut self, value: P) {
        self.pixels.fill(value);
    }

    /// Composite `color` over the whole raster.
    pub fn fill_blend(&mut self, color: Rgba8, mode: BlendMode) {
        for px in &mut self.pixels {
            *px = px.composite(color, 1.0, mode);
        }
    }

    pub fn ensure_same_size<Q: Pixel>(&self, other: &Raster<Q>, what: &str) -> AquarelleResult<()> {
        if self.width != other.width || self.height != other.height {
            return Err(AquarelleError::validation(format!(
                "{what}: raster size mismatch ({}x{} vs {}x{})",
                self.width, self.height, other.width, other.height
            )));
        }
        Ok(())
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}

impl Raster<Rgba8Premul> {
    /// Composite another premultiplied raster of the same size on top of this one.
    pub fn draw_image(&mut self, src: &Raster<Rgba8Premul>, mode: BlendMode) -> AquarelleResult<()> {
        self.ensure_same_size(src, "draw_image")?;
        for (d, s) in self.pixels.iter_mut().zip(src.pixels.iter()) {
            if s.a == 0 {
                continue;
            }
            *d = Rgba8Premul::from_channels(composite_premul(
                d.to_channels(),
                s.to_channels(),
                mode,
            ));
        }
        Ok(())
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn to_rgba8_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_array()).collect()
    }

    /// Straight (unpremultiplied) RGBA8 bytes, row-major, as image files expect.
    pub fn to_straight_rgba8_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| {
                if p.a == 0 {
                    return [0, 0, 0, 0];
                }
                let un = |c: u8| ((u32::from(c) * 255 + u32::from(p.a) / 2) / u32::from(p.a)).min(255) as u8;
                [un(p.r), un(p.g), un(p.b), p.a]
            })
            .collect()
    }
}

impl Raster<Gray8> {
    /// Opaque grayscale RGBA8 bytes, row-major.
    pub fn to_rgba8_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| [p.0, p.0, p.0, 255]).collect()
    }

    /// Largest value in the raster.
    pub fn max_value(&self) -> u8 {
        self.pixels.iter().map(|p| p.0).max().unwrap_or(0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/raster.rs"]
mod tests;
