use super::*;
use crate::source::SeededSource;

#[test]
fn margins_tint_and_leave_the_center_alone() {
    let canvas = Canvas::new(10, 10).unwrap();
    let mut image = Raster::filled(canvas, Rgba8::rgb(0, 0, 200).premultiply());
    let finish = PaperFinish {
        margin: 2,
        tint: Rgba8::rgb(255, 255, 255),
        grain_sd: 0.0,
        ..PaperFinish::default()
    };
    finish.apply(&mut image, &mut SeededSource::new(1));

    assert_eq!(image.get(0, 0).unwrap().to_array(), [255, 255, 255, 255]);
    assert_eq!(image.get(9, 5).unwrap().to_array(), [255, 255, 255, 255]);
    assert_eq!(image.get(5, 1).unwrap().to_array(), [255, 255, 255, 255]);
    assert_eq!(image.get(5, 5).unwrap().to_array(), [0, 0, 200, 255]);
    assert_eq!(image.get(2, 7).unwrap().to_array(), [0, 0, 200, 255]);
}

#[test]
fn tint_multiplies_white_paper() {
    let canvas = Canvas::new(4, 4).unwrap();
    let mut image = Raster::filled(canvas, Rgba8::WHITE.premultiply());
    let finish = PaperFinish {
        tint: Rgba8::rgb(200, 180, 160),
        grain_sd: 0.0,
        ..PaperFinish::default()
    };
    finish.apply(&mut image, &mut SeededSource::new(1));
    assert_eq!(image.get(1, 1).unwrap().to_array(), [200, 180, 160, 255]);
}

#[test]
fn grain_perturbs_but_stays_near_the_base() {
    let canvas = Canvas::new(16, 16).unwrap();
    let base = Rgba8::gray(128).premultiply();
    let mut image = Raster::filled(canvas, base);
    let finish = PaperFinish {
        tint: Rgba8::WHITE,
        grain_sd: 7.0,
        ..PaperFinish::default()
    };
    finish.apply(&mut image, &mut SeededSource::new(4));
    let pixels = image.pixels();
    assert!(pixels.iter().any(|p| p.r != 128));
    assert!(pixels.iter().all(|p| p.a == 255 && (i32::from(p.r) - 128).abs() < 64));
}

#[test]
fn validation_catches_bad_grain() {
    let bad = PaperFinish {
        grain_noise: f64::NAN,
        ..PaperFinish::default()
    };
    assert!(bad.validate().is_err());
    assert!(PaperFinish::default().validate().is_ok());
}
