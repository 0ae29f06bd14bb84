use super::*;
use crate::foundation::core::Canvas;

fn ticks_to_dry(evap: &Evaporation, start: u8, limit: u64) -> Option<u64> {
    let mut water = Raster::filled(Canvas::new(3, 3).unwrap(), Gray8(start));
    for frame in 1..=limit {
        evap.apply(&mut water, FrameIndex(frame));
        if water.max_value() == 0 {
            return Some(frame);
        }
    }
    None
}

#[test]
fn saturated_water_dries_within_bound() {
    let ticks = ticks_to_dry(&Evaporation::default(), 255, 200).expect("dries");
    assert!(ticks <= 200);
}

#[test]
fn barely_wet_water_dries_immediately() {
    assert_eq!(ticks_to_dry(&Evaporation::default(), 1, 200), Some(1));
}

#[test]
fn every_start_value_converges() {
    let evap = Evaporation::default();
    for start in [0u8, 1, 2, 25, 64, 128, 200, 231, 254, 255] {
        assert!(ticks_to_dry(&evap, start, 200).is_some(), "start {start}");
    }
}

#[test]
fn burn_alone_leaves_saturated_water() {
    let mut water = Raster::filled(Canvas::new(2, 2).unwrap(), Gray8(255));
    let burn_only = Evaporation {
        burn: Some(BurnDecay::default()),
        constant: ConstantDecay::Subtract { amount: 0 },
        every: 1,
    };
    for f in 1..50 {
        burn_only.apply(&mut water, FrameIndex(f));
    }
    assert_eq!(water.max_value(), 255);
}

#[test]
fn constant_decay_respects_interval() {
    let evap = Evaporation {
        burn: None,
        constant: ConstantDecay::Subtract { amount: 3 },
        every: 8,
    };
    let mut water = Raster::filled(Canvas::new(1, 1).unwrap(), Gray8(100));
    for f in 1..=7 {
        evap.apply(&mut water, FrameIndex(f));
    }
    assert_eq!(water.max_value(), 100);
    evap.apply(&mut water, FrameIndex(8));
    assert_eq!(water.max_value(), 97);
}

#[test]
fn fade_decay_moves_toward_zero() {
    let evap = Evaporation {
        burn: None,
        constant: ConstantDecay::Fade { alpha: 8 },
        every: 1,
    };
    let mut water = Raster::filled(Canvas::new(1, 1).unwrap(), Gray8(200));
    evap.apply(&mut water, FrameIndex(1));
    assert!(water.max_value() < 200);
}

#[test]
fn zero_interval_is_invalid() {
    let evap = Evaporation {
        every: 0,
        ..Evaporation::default()
    };
    assert!(evap.validate().is_err());
}
