use super::*;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn separable_modes_match_reference_formulas() {
    assert!(close(BlendMode::Normal.apply(0.2, 0.7), 0.7));
    assert!(close(BlendMode::Lightest.apply(0.2, 0.7), 0.7));
    assert!(close(BlendMode::Darkest.apply(0.2, 0.7), 0.2));
    assert!(close(BlendMode::Multiply.apply(0.5, 0.5), 0.25));
    assert!(close(BlendMode::Difference.apply(0.2, 0.7), 0.5));
    assert!(close(BlendMode::Overlay.apply(0.25, 0.5), 0.25));
    assert!(close(BlendMode::Overlay.apply(0.75, 0.5), 0.75));
}

#[test]
fn burn_keeps_white_and_darkens_low_values_faster() {
    let level = 250.0 / 255.0;
    assert!(close(BlendMode::Burn.apply(1.0, level), 1.0));
    assert!(close(BlendMode::Burn.apply(0.5, 0.0), 0.0));
    let high = BlendMode::Burn.apply(0.9, level);
    let low = BlendMode::Burn.apply(0.1, level);
    assert!(high < 0.9 && low < 0.1);
    assert!((0.1 - low) / 0.1 > (0.9 - high) / 0.9);
}

#[test]
fn normal_composite_over_transparent_is_source() {
    let src = [0.25, 0.1, 0.0, 0.5];
    let out = composite_premul([0.0; 4], src, BlendMode::Normal);
    for i in 0..4 {
        assert!(close(out[i], src[i]));
    }
}

#[test]
fn multiply_onto_transparent_is_source_and_onto_white_is_source() {
    let src = [0.4, 0.2, 0.1, 1.0];
    let out = composite_premul([0.0; 4], src, BlendMode::Multiply);
    assert!(close(out[0], 0.4));
    let out = composite_premul([1.0, 1.0, 1.0, 1.0], src, BlendMode::Multiply);
    assert!(close(out[0], 0.4) && close(out[1], 0.2) && close(out[3], 1.0));
}

#[test]
fn zero_alpha_source_is_noop() {
    let dst = [0.3, 0.2, 0.1, 0.6];
    assert_eq!(composite_premul(dst, [1.0, 1.0, 1.0, 0.0], BlendMode::Burn), dst);
    assert_eq!(composite_gray(0.4, 1.0, 0.0, BlendMode::Lightest), 0.4);
}

#[test]
fn gray_lightest_only_raises() {
    assert!(close(composite_gray(0.2, 0.6, 1.0, BlendMode::Lightest), 0.6));
    assert!(close(composite_gray(0.8, 0.6, 1.0, BlendMode::Lightest), 0.8));
    assert!(close(composite_gray(0.2, 0.6, 0.5, BlendMode::Lightest), 0.4));
}
