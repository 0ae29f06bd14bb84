use super::*;

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas::new(w, h).unwrap()
}

#[test]
fn new_raster_is_default_filled() {
    let r = Raster::<Gray8>::new(canvas(3, 2));
    assert_eq!(r.pixels().len(), 6);
    assert!(r.pixels().iter().all(|p| *p == Gray8(0)));
    assert_eq!(r.canvas(), canvas(3, 2));
}

#[test]
fn from_pixels_checks_length() {
    assert!(Raster::from_pixels(canvas(2, 2), vec![Gray8(1); 3]).is_err());
    let r = Raster::from_pixels(canvas(2, 2), vec![Gray8(1); 4]).unwrap();
    assert_eq!(r.get(1, 1), Some(Gray8(1)));
    assert_eq!(r.get(2, 0), None);
}

#[test]
fn set_and_blend_ignore_out_of_range() {
    let mut r = Raster::<Gray8>::new(canvas(2, 2));
    r.set(5, 5, Gray8(9));
    r.blend_at(9, 0, Rgba8::gray(200), 1.0, BlendMode::Normal);
    assert!(r.pixels().iter().all(|p| *p == Gray8(0)));
}

#[test]
fn gray_composite_uses_red_channel_as_level() {
    let g = Gray8(10).composite(Rgba8::gray(100), 1.0, BlendMode::Lightest);
    assert_eq!(g, Gray8(100));
    let g = Gray8(120).composite(Rgba8::gray(100), 1.0, BlendMode::Lightest);
    assert_eq!(g, Gray8(120));
}

#[test]
fn rgba_channels_never_exceed_alpha() {
    let p = Rgba8Premul::from_channels([1.0, 0.5, 0.2, 0.4]);
    assert!(p.r <= p.a && p.g <= p.a && p.b <= p.a);
}

#[test]
fn draw_image_requires_same_size() {
    let mut a = Raster::<Rgba8Premul>::new(canvas(2, 2));
    let b = Raster::<Rgba8Premul>::new(canvas(3, 2));
    assert!(a.draw_image(&b, BlendMode::Normal).is_err());
}

#[test]
fn draw_image_over_transparent_copies_source() {
    let c = canvas(2, 1);
    let mut dst = Raster::<Rgba8Premul>::new(c);
    let px = Rgba8::new(200, 100, 50, 128).premultiply();
    let src = Raster::filled(c, px);
    dst.draw_image(&src, BlendMode::Multiply).unwrap();
    assert_eq!(dst.pixels()[0], px);
}

#[test]
fn fill_blend_covers_every_pixel() {
    let mut r = Raster::filled(canvas(4, 4), Gray8(200));
    r.fill_blend(Rgba8::gray(0), BlendMode::Darkest);
    assert_eq!(r.max_value(), 0);
}

#[test]
fn byte_export_shapes() {
    let c = canvas(2, 2);
    assert_eq!(Raster::<Gray8>::new(c).to_rgba8_bytes().len(), 16);
    assert_eq!(Raster::<Rgba8Premul>::new(c).to_rgba8_bytes().len(), 16);
}

#[test]
fn straight_export_undoes_premultiplication() {
    let c = canvas(2, 1);
    let mut r = Raster::<Rgba8Premul>::new(c);
    r.set(0, 0, Rgba8::new(200, 100, 0, 128).premultiply());
    let bytes = r.to_straight_rgba8_bytes();
    assert_eq!(&bytes[4..], &[0, 0, 0, 0]);
    assert_eq!(bytes[3], 128);
    assert!((i32::from(bytes[0]) - 200).abs() <= 1);
    assert!((i32::from(bytes[1]) - 100).abs() <= 1);
}
