use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
    assert_eq!(mul_div255_u8(255, 255), 255);
}

#[test]
fn sequence_t_spans_unit_interval() {
    assert_eq!(sequence_t(0, 1), 0.5);
    assert_eq!(sequence_t(0, 5), 0.0);
    assert_eq!(sequence_t(4, 5), 1.0);
    assert_eq!(sequence_t(2, 5), 0.5);
}

#[test]
fn unit_to_u8_clamps() {
    assert_eq!(unit_f32_to_u8(-0.5), 0);
    assert_eq!(unit_f32_to_u8(1.5), 255);
    assert_eq!(lerp(10.0, 20.0, 0.25), 12.5);
}
