use super::*;
use crate::source::SeededSource;

fn canvas() -> Canvas {
    Canvas::new(32, 24).unwrap()
}

fn ready_state() -> PaintWater {
    let mut state = PaintWater::new(canvas(), SimConfig::default()).unwrap();
    state.init_flow_map(&FlowMapConfig::default(), &mut SeededSource::new(11));
    state
}

fn red_dot() -> Stroke {
    Stroke::new(canvas(), Rgba8::new(200, 30, 30, 200), 160).circle(16.0, 12.0, 8.0)
}

#[test]
fn buffers_keep_dimensions_across_ticks() {
    let mut state = ready_state();
    state.apply_stroke(&red_dot()).unwrap();
    for f in 1..=20 {
        state.tick(FrameIndex(f)).unwrap();
    }
    let c = canvas();
    assert_eq!(state.pigment().canvas(), c);
    assert_eq!(state.water().canvas(), c);
    assert_eq!(state.dry_pigment().canvas(), c);
    assert_eq!(state.flow_map().unwrap().canvas(), c);
}

#[test]
fn invisible_dry_stroke_changes_nothing() {
    let mut state = ready_state();
    state.apply_stroke(&red_dot()).unwrap();
    let pigment = state.pigment().clone();
    let water = state.water().clone();

    let noop = Stroke::new(canvas(), Rgba8::new(255, 0, 0, 0), 0)
        .circle(10.0, 10.0, 12.0)
        .line(0.0, 0.0, 31.0, 23.0)
        .rect(2.0, 2.0, 20.0, 10.0)
        .with_style(PaintStyle::FillAndOutline { weight: 3.0 });
    state.apply_stroke(&noop).unwrap();

    assert_eq!(state.pigment(), &pigment);
    assert_eq!(state.water(), &water);
}

#[test]
fn stroke_lands_on_pigment_and_water_together() {
    let mut state = ready_state();
    state.apply_stroke(&red_dot()).unwrap();
    let p = state.pigment().get(16, 12).unwrap();
    let w = state.water().get(16, 12).unwrap();
    assert_eq!(p.a, 200);
    assert_eq!(w, Gray8(160));
    assert_eq!(state.pigment().get(0, 0).unwrap().a, 0);
    assert_eq!(state.water().get(0, 0).unwrap(), Gray8(0));
}

#[test]
fn stroke_for_other_canvas_is_rejected() {
    let mut state = ready_state();
    let foreign = Stroke::new(Canvas::new(64, 64).unwrap(), Rgba8::BLACK, 100).circle(1.0, 1.0, 2.0);
    assert!(matches!(
        state.apply_stroke(&foreign),
        Err(AquarelleError::Validation(_))
    ));
}

#[test]
fn tick_before_flow_map_is_a_precondition_error() {
    let mut state = PaintWater::new(canvas(), SimConfig::default()).unwrap();
    assert!(matches!(
        state.tick(FrameIndex(1)),
        Err(AquarelleError::Precondition(_))
    ));
}

#[test]
fn idle_ticks_dry_the_water() {
    let mut state = ready_state();
    state.apply_stroke(&red_dot()).unwrap();
    for f in 1..=200 {
        state.tick(FrameIndex(f)).unwrap();
    }
    assert_eq!(state.water().max_value(), 0);
}

#[test]
fn dry_multiplies_fixation_into_dry_layer_and_resets_wet_buffers() {
    let mut state = ready_state();
    state.apply_stroke(&red_dot()).unwrap();
    state.tick(FrameIndex(1)).unwrap();

    let kernel = DiffusionKernel::default();
    let fixed = kernel
        .filter(state.pigment(), state.water(), state.config().diffusion.fixation_sigma)
        .unwrap();
    let mut expected = state.dry_pigment().clone();
    expected.draw_image(&fixed, BlendMode::Multiply).unwrap();

    state.dry().unwrap();
    assert_eq!(state.dry_pigment(), &expected);
    assert!(state.pigment().pixels().iter().all(|p| p.a == 0));
    assert_eq!(state.water().max_value(), 0);
    assert_eq!(state.fixations(), 1);
}

#[test]
fn dry_layer_ignores_strokes_until_next_dry() {
    let mut state = ready_state();
    state.apply_stroke(&red_dot()).unwrap();
    state.dry().unwrap();
    let dry = state.dry_pigment().clone();

    let blue = Stroke::new(canvas(), Rgba8::rgb(20, 20, 220), 200).circle(8.0, 8.0, 10.0);
    state.apply_stroke(&blue).unwrap();
    for f in 1..=5 {
        state.tick(FrameIndex(f)).unwrap();
    }
    assert_eq!(state.dry_pigment(), &dry);

    state.dry().unwrap();
    assert_ne!(state.dry_pigment(), &dry);
}

#[test]
fn display_composite_stacks_dry_then_wet_over_paper() {
    let mut state = ready_state();
    let paper = Rgba8::WHITE;
    let blank = state.composite_for_display(paper);
    assert!(blank.pixels().iter().all(|p| p.to_array() == [255, 255, 255, 255]));

    state.apply_stroke(&red_dot()).unwrap();
    let shown = state.composite_for_display(paper);
    let center = shown.get(16, 12).unwrap();
    assert_eq!(center.a, 255);
    assert!(center.g < 255 && center.r > center.g);
}

#[test]
fn water_view_is_opaque_gray() {
    let mut state = ready_state();
    state.apply_stroke(&red_dot()).unwrap();
    let view = state.water_for_display();
    assert_eq!(view.get(16, 12).unwrap().to_array(), [160, 160, 160, 255]);
}

#[test]
fn stroke_transform_composes_with_painter_and_is_restored() {
    let mut state = ready_state();
    state.painter_mut().translate(10.0, 0.0);
    let moved = Stroke::new(canvas(), Rgba8::BLACK, 90)
        .circle(0.0, 12.0, 6.0)
        .with_transform(kurbo::Affine::translate((5.0, 0.0)));
    state.apply_stroke(&moved).unwrap();
    assert_eq!(state.water().get(15, 12), Some(Gray8(90)));
    assert_eq!(state.painter_mut().depth(), 0);
}

#[test]
fn invalid_config_is_rejected() {
    let mut cfg = SimConfig::default();
    cfg.diffusion.paint_sigma = f32::NAN;
    assert!(PaintWater::new(canvas(), cfg).is_err());
}
