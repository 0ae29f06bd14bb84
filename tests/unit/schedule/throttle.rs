use super::*;

#[test]
fn overflow_becomes_frames_and_remainder_is_carried() {
    let mut t = WorkThrottle::new(60.0).unwrap();
    assert_eq!(t.add(150.0), 2);
    assert!((t.carried() - 30.0).abs() < 1e-9);
    assert_eq!(t.add(20.0), 0);
    assert!((t.carried() - 50.0).abs() < 1e-9);
    assert_eq!(t.add(10.0), 1);
    assert!(t.carried().abs() < 1e-9);
}

#[test]
fn bad_work_counts_as_nothing() {
    let mut t = WorkThrottle::new(100.0).unwrap();
    assert_eq!(t.add(f64::NAN), 0);
    assert_eq!(t.add(-50.0), 0);
    assert_eq!(t.carried(), 0.0);
}

#[test]
fn reset_drops_carry() {
    let mut t = WorkThrottle::new(60.0).unwrap();
    t.add(59.0);
    t.reset();
    assert_eq!(t.add(59.0), 0);
}

#[test]
fn budget_must_be_positive() {
    assert!(WorkThrottle::new(0.0).is_err());
    assert!(WorkThrottle::new(f64::INFINITY).is_err());
}
