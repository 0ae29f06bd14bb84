/// Compositing modes supported by the drawing surface.
///
/// All modes are separable: `B(cb, cs)` is applied per color channel on unpremultiplied unit
/// values, then combined with coverage and alpha by the standard source-over formula.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    #[default]
    Normal,
    Lightest,
    Darkest,
    Multiply,
    Burn,
    Difference,
    Overlay,
}

impl BlendMode {
    /// Blend function `B(cb, cs)` on unit-range channels.
    pub fn apply(self, cb: f32, cs: f32) -> f32 {
        match self {
            Self::Normal => cs,
            Self::Lightest => cb.max(cs),
            Self::Darkest => cb.min(cs),
            Self::Multiply => cb * cs,
            Self::Burn => {
                if cb >= 1.0 {
                    1.0
                } else if cs <= 0.0 {
                    0.0
                } else {
                    1.0 - ((1.0 - cb) / cs).min(1.0)
                }
            }
            Self::Difference => (cb - cs).abs(),
            Self::Overlay => {
                if cb <= 0.5 {
                    2.0 * cb * cs
                } else {
                    1.0 - 2.0 * (1.0 - cb) * (1.0 - cs)
                }
            }
        }
    }
}

/// Composite premultiplied unit RGBA `src` onto premultiplied unit RGBA `dst`.
pub fn composite_premul(dst: [f32; 4], src: [f32; 4], mode: BlendMode) -> [f32; 4] {
    let sa = src[3];
    if sa <= 0.0 {
        return dst;
    }
    let da = dst[3];

    let mut out = [0.0f32; 4];
    out[3] = sa + da * (1.0 - sa);
    for i in 0..3 {
        let cs = src[i];
        let cb = dst[i];
        let mixed = if mode == BlendMode::Normal || da <= 0.0 {
            cs
        } else {
            let b = mode.apply((cb / da).clamp(0.0, 1.0), (cs / sa).clamp(0.0, 1.0));
            // The blended term replaces `cs` only where both layers overlap.
            cs * (1.0 - da) + sa * da * b
        };
        out[i] = (mixed + cb * (1.0 - sa)).clamp(0.0, 1.0);
    }
    out
}

/// Composite a gray level with alpha `sa` onto an opaque gray backdrop.
pub fn composite_gray(cb: f32, cs: f32, sa: f32, mode: BlendMode) -> f32 {
    if sa <= 0.0 {
        return cb;
    }
    ((1.0 - sa) * cb + sa * mode.apply(cb, cs)).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/surface/blend.rs"]
mod tests;
