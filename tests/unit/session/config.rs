use super::*;
use crate::sim::evaporation::ConstantDecay;

#[test]
fn empty_json_gives_defaults() {
    let cfg = EngineConfig::from_json("{}").unwrap();
    assert_eq!(cfg, EngineConfig::default());
    assert_eq!(cfg.diffusion.water_sigma, 12.0);
    assert_eq!(cfg.diffusion.paint_sigma, 18.0);
    assert_eq!(cfg.work_units_per_frame, 60.0);
    assert_eq!(cfg.settle_frames, 50);
    assert!(cfg.finish.is_none());
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let cfg = EngineConfig::from_json(
        r#"{
            "canvas": { "width": 64, "height": 32 },
            "seed": 7,
            "evaporation": { "constant": { "kind": "fade", "alpha": 4 }, "every": 2 },
            "finish": { "margin": 3 }
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.canvas, Canvas { width: 64, height: 32 });
    assert_eq!(cfg.seed, 7);
    assert_eq!(cfg.evaporation.constant, ConstantDecay::Fade { alpha: 4 });
    assert_eq!(cfg.evaporation.every, 2);
    assert!(cfg.evaporation.burn.is_some());
    let finish = cfg.finish.unwrap();
    assert_eq!(finish.margin, 3);
    assert_eq!(finish.grain_sd, PaperFinish::default().grain_sd);
}

#[test]
fn json_round_trips_through_pretty_output() {
    let mut cfg = EngineConfig::default();
    cfg.seed = 99;
    cfg.finish = Some(PaperFinish::default());
    let text = cfg.to_json_pretty().unwrap();
    assert_eq!(EngineConfig::from_json(&text).unwrap(), cfg);
}

#[test]
fn malformed_json_is_a_serde_error() {
    assert!(matches!(
        EngineConfig::from_json("{ not json"),
        Err(AquarelleError::Serde(_))
    ));
}

#[test]
fn invalid_values_are_rejected() {
    for json in [
        r#"{ "canvas": { "width": 0, "height": 10 } }"#,
        r#"{ "work_units_per_frame": 0 }"#,
        r#"{ "evaporation": { "every": 0 } }"#,
        r#"{ "diffusion": { "paint_sigma": -1 } }"#,
        r#"{ "finish": { "grain_sd": -2 } }"#,
    ] {
        assert!(
            matches!(EngineConfig::from_json(json), Err(AquarelleError::Validation(_))),
            "{json}"
        );
    }
}

#[test]
fn missing_file_is_reported() {
    let err = EngineConfig::from_path(std::path::Path::new("/definitely/not/here.json"))
        .unwrap_err();
    assert!(err.to_string().contains("not/here.json"));
}

#[test]
fn draft_mode_is_read_from_json() {
    let cfg = EngineConfig::from_json(r#"{ "mode": "draft" }"#).unwrap();
    assert_eq!(cfg.mode, RenderMode::Draft);
    assert_eq!(EngineConfig::default().mode, RenderMode::Full);
}
