use super::*;
use crate::schedule::ScriptOp;
use crate::source::SeededSource;

#[test]
fn speckle_scatters_faint_damp_dots() {
    let canvas = Canvas::new(64, 64).unwrap();
    let speckle = Speckle::new(Point::new(32.0, 32.0), 4.0, Rgba8::rgb(90, 90, 80));
    assert_eq!(speckle.dot_count(), 240);

    let script = speckle_script(canvas, &speckle, &mut SeededSource::new(2));
    assert_eq!(script.stroke_count(), 240);
    assert_eq!(script.explicit_wait_frames(), 0);
    for op in script.ops() {
        let ScriptOp::Paint(stroke) = op else {
            panic!("speckle should only paint");
        };
        assert!(stroke.color.a <= 1);
        assert!((32..=64).contains(&stroke.wetness));
    }
}
