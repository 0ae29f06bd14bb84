use crate::foundation::error::{AquarelleError, AquarelleResult};

pub use kurbo::{Affine, Point, Vec2};

/// One animation frame. Frame 1 is the first frame a session draws.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    pub fn offset(self, frames: u64) -> Self {
        Self(self.0.saturating_add(frames))
    }

    pub fn next(self) -> Self {
        self.offset(1)
    }
}

/// How much of the simulation a run performs.
///
/// `Draft` is a fast preview: waits collapse into the current frame, water never spreads, and
/// brushes compensate with fainter, larger marks.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    #[default]
    Full,
    Draft,
}

impl RenderMode {
    pub fn is_draft(self) -> bool {
        self == Self::Draft
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> AquarelleResult<Self> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    pub fn validate(self) -> AquarelleResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(AquarelleError::validation("canvas width and height must be > 0"));
        }
        // Gray8 and RGBA8 buffers are indexed with usize; keep the pixel count sane on 32-bit.
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| AquarelleError::validation("canvas size overflows buffer length"))?;
        Ok(())
    }

    pub fn pixel_count(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

/// Straight (non-premultiplied) RGBA8. Used for brush colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Gray level with full opacity.
    pub const fn gray(v: u8) -> Self {
        Self::rgb(v, v, v)
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> AquarelleResult<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        let bad = || AquarelleError::validation(format!("invalid hex color '{s}'"));
        let nib = |c: u8| -> AquarelleResult<u8> {
            (c as char).to_digit(16).map(|d| d as u8).ok_or_else(bad)
        };
        let bytes = hex.as_bytes();
        let (r, g, b, a) = match bytes.len() {
            3 | 4 => {
                let mut v = [255u8; 4];
                for (i, &c) in bytes.iter().enumerate() {
                    let n = nib(c)?;
                    v[i] = n << 4 | n;
                }
                (v[0], v[1], v[2], v[3])
            }
            6 | 8 => {
                let mut v = [255u8; 4];
                for (i, pair) in bytes.chunks_exact(2).enumerate() {
                    v[i] = nib(pair[0])? << 4 | nib(pair[1])?;
                }
                (v[0], v[1], v[2], v[3])
            }
            _ => return Err(bad()),
        };
        Ok(Self::new(r, g, b, a))
    }

    /// Same color with alpha set from a unit fraction.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: unit_to_u8(alpha),
            ..self
        }
    }

    pub fn alpha_f32(self) -> f32 {
        f32::from(self.a) / 255.0
    }

    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Self::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    /// Channel-wise multiply of the color channels; alpha is kept from `self`.
    pub fn multiply(self, other: Self) -> Self {
        let m = |a: u8, b: u8| crate::foundation::math::mul_div255_u8(u16::from(a), u16::from(b));
        Self::new(m(self.r, other.r), m(self.g, other.g), m(self.b, other.b), self.a)
    }

    pub fn premultiply(self) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, self.a)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn transparent() -> Self {
        Self::default()
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            crate::foundation::math::mul_div255_u8(u16::from(c), u16::from(a))
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_array(v: [u8; 4]) -> Self {
        Self {
            r: v[0],
            g: v[1],
            b: v[2],
            a: v[3],
        }
    }
}

pub(crate) fn unit_to_u8(v: f64) -> u8 {
    if !v.is_finite() {
        return 0;
    }
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
