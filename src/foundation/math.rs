pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Position of item `i` in a sequence of `count`, mapped to `0..=1`. A single item sits at 0.5.
pub fn sequence_t(i: usize, count: usize) -> f64 {
    if count <= 1 {
        0.5
    } else {
        i as f64 / (count - 1) as f64
    }
}

pub(crate) fn unit_f32_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
