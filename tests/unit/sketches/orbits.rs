use super::*;
use crate::session::Session;

fn small() -> EngineConfig {
    EngineConfig {
        canvas: Canvas {
            width: 216,
            height: 216,
        },
        seed: 23,
        settle_frames: 5,
        finish: None,
        ..Orbits::preset()
    }
}

#[test]
fn preset_uses_weave_paper_and_wide_margin() {
    let config = Orbits::preset();
    config.validate().unwrap();
    assert_eq!(config.flow_map.texture, FlowTexture::Weave);
    assert_eq!(config.settle_frames, 100);
    let finish = config.finish.unwrap();
    assert_eq!(finish.margin, 60);
    assert!(finish.grain_weave > 0.0 && finish.grain_noise > 0.0);
}

#[test]
fn setup_seeds_one_circle_per_cell() {
    let mut session = Session::new(Orbits::default(), small()).unwrap();
    session.step().unwrap();

    let orbits = session.sketch();
    // 216px scales the 200px cell to 40px: six cells per side.
    assert_eq!(orbits.attractors.len(), 36);
    assert!(orbits.particles.len() > 36);
    assert!(orbits.particles.iter().all(|p| p.alpha == 1.0));
    assert!(
        orbits
            .attractors
            .iter()
            .all(|c| c.chirality.abs() == 1.0 && c.radius >= 6.0)
    );
    assert_eq!(session.state().water().max_value(), 0);
}

#[test]
fn particles_paint_from_update_and_fade() {
    let mut session = Session::new(Orbits::default(), small()).unwrap();
    session.step().unwrap();
    let seeded = session.sketch().particles.len();

    session.step().unwrap();
    assert!(session.state().water().max_value() > 0);
    let orbits = session.sketch();
    assert!(orbits.particles.len() <= seeded);
    assert!(orbits.particles.iter().all(|p| (p.alpha - 0.6).abs() < 1e-12));
}

#[test]
fn stops_at_the_stop_frame_and_settles() {
    let orbits = Orbits {
        stop_frame: 8,
        ..Orbits::default()
    };
    let mut session = Session::new(orbits, small()).unwrap();
    let summary = session.run(200, |_| {}).unwrap();
    assert!(summary.finished);
    assert!(summary.frames <= 8 + 6, "finished at {}", summary.frames);
    assert_eq!(summary.fixations, 1);
}

#[test]
fn same_seed_same_painting() {
    let render = || {
        let mut session = Session::new(
            Orbits {
                stop_frame: 6,
                ..Orbits::default()
            },
            small(),
        )
        .unwrap();
        session.run(200, |_| {}).unwrap();
        session.final_image().unwrap().pixels().to_vec()
    };
    assert_eq!(render(), render());
}

#[test]
fn rejects_an_empty_cell() {
    let orbits = Orbits {
        cell: 0.0,
        ..Orbits::default()
    };
    let mut session = Session::new(orbits, small()).unwrap();
    assert!(matches!(
        session.step(),
        Err(AquarelleError::Validation(_))
    ));
}
