use super::*;
use crate::schedule::ScriptOp;
use crate::source::SeededSource;

fn canvas() -> Canvas {
    Canvas::new(200, 160).unwrap()
}

fn strokes(script: &StrokeScript) -> Vec<&Stroke> {
    script
        .ops()
        .iter()
        .filter_map(|op| match op {
            ScriptOp::Paint(s) => Some(s),
            _ => None,
        })
        .collect()
}

#[test]
fn dab_line_spaces_dabs_by_step_and_charges_travel() {
    let mut script = StrokeScript::new();
    dab_line(
        &mut script,
        canvas(),
        Rgba8::BLACK,
        30,
        Affine::IDENTITY,
        Point::new(10.0, 10.0),
        Point::new(90.0, 10.0),
        15.0,
        8.0,
        &mut SeededSource::new(1),
    );
    // 10 dabs along the line plus one on the end point.
    assert_eq!(script.stroke_count(), 11);
    let work: f64 = script
        .ops()
        .iter()
        .map(|op| match op {
            ScriptOp::Work(u) => *u,
            _ => 0.0,
        })
        .sum();
    assert!((work - 80.0).abs() < 1e-9);
    assert_eq!(script.ops().first(), Some(&ScriptOp::ResetWork));
    assert_eq!(script.ops().last(), Some(&ScriptOp::Wait(1)));
}

#[test]
fn zero_length_line_is_a_single_dab() {
    let mut script = StrokeScript::new();
    let p = Point::new(5.0, 5.0);
    dab_line(
        &mut script,
        canvas(),
        Rgba8::BLACK,
        30,
        Affine::IDENTITY,
        p,
        p,
        10.0,
        5.0,
        &mut SeededSource::new(1),
    );
    assert_eq!(script.len(), 2);
    assert_eq!(script.stroke_count(), 1);
}

#[test]
fn hatch_carries_its_placement_and_ends_with_clear_water() {
    let transform = Affine::translate((100.0, 80.0)) * Affine::rotate(0.3);
    let rect = HatchRect {
        x: -40.0,
        y: -25.0,
        w: 80.0,
        h: 50.0,
        color: Rgba8::rgb(200, 20, 20),
        transform,
    };
    let script = hatch_script(canvas(), &rect, &mut SeededSource::new(12));
    let all = strokes(&script);
    assert!(all.len() > 20);
    assert!(all.iter().all(|s| s.transform == transform && s.canvas == canvas()));

    let fill = all.first().unwrap();
    assert_eq!(fill.color.a, 26);
    assert_eq!(fill.wetness, 64);

    let wash = all.last().unwrap();
    assert_eq!(wash.color.a, 0);
    assert_eq!(wash.wetness, 16);
}

#[test]
fn hatch_is_reproducible_from_the_seed() {
    let rect = HatchRect {
        x: 0.0,
        y: 0.0,
        w: 60.0,
        h: 60.0,
        color: Rgba8::BLACK,
        transform: Affine::IDENTITY,
    };
    let a = hatch_script(canvas(), &rect, &mut SeededSource::new(3));
    let b = hatch_script(canvas(), &rect, &mut SeededSource::new(3));
    assert_eq!(a, b);
}
