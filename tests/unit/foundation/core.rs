use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    let c = Canvas::new(3, 2).unwrap();
    assert_eq!(c.pixel_count(), 6);
}

#[test]
fn hex_parsing_covers_short_and_long_forms() {
    assert_eq!(Rgba8::from_hex("#c84").unwrap(), Rgba8::rgb(0xcc, 0x88, 0x44));
    assert_eq!(Rgba8::from_hex("#8880").unwrap(), Rgba8::new(0x88, 0x88, 0x88, 0));
    assert_eq!(
        Rgba8::from_hex("#e8e7dc88").unwrap(),
        Rgba8::new(0xe8, 0xe7, 0xdc, 0x88)
    );
    assert!(Rgba8::from_hex("#12345").is_err());
    assert!(Rgba8::from_hex("#zzz").is_err());
}

#[test]
fn premultiply_scales_color_by_alpha() {
    let p = Rgba8::new(255, 128, 0, 128).premultiply();
    assert_eq!(p, Rgba8Premul { r: 128, g: 64, b: 0, a: 128 });
    assert_eq!(Rgba8::new(9, 9, 9, 0).premultiply(), Rgba8Premul::transparent());
}

#[test]
fn with_alpha_clamps_and_handles_nan() {
    assert_eq!(Rgba8::WHITE.with_alpha(2.0).a, 255);
    assert_eq!(Rgba8::WHITE.with_alpha(-1.0).a, 0);
    assert_eq!(Rgba8::WHITE.with_alpha(f64::NAN).a, 0);
}

#[test]
fn frame_index_offset_saturates() {
    assert_eq!(FrameIndex(3).offset(2), FrameIndex(5));
    assert_eq!(FrameIndex(u64::MAX).next(), FrameIndex(u64::MAX));
}

#[test]
fn render_mode_defaults_to_full_and_reads_snake_case() {
    assert_eq!(RenderMode::default(), RenderMode::Full);
    let mode: RenderMode = serde_json::from_str("\"draft\"").unwrap();
    assert!(mode.is_draft());
    assert!(!RenderMode::Full.is_draft());
}
