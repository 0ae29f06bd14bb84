use super::*;

#[test]
fn same_seed_same_sequence() {
    let mut a = SeededSource::new(1234);
    let mut b = SeededSource::new(1234);
    for _ in 0..32 {
        assert_eq!(a.random(), b.random());
        assert_eq!(a.gaussian(5.0, 2.0), b.gaussian(5.0, 2.0));
    }
    assert_eq!(a.noise2(3.7, 9.1), b.noise2(3.7, 9.1));
}

#[test]
fn different_seeds_diverge() {
    let mut a = SeededSource::new(1);
    let mut b = SeededSource::new(2);
    let sa: Vec<f64> = (0..8).map(|_| a.random()).collect();
    let sb: Vec<f64> = (0..8).map(|_| b.random()).collect();
    assert_ne!(sa, sb);
}

#[test]
fn uniform_samples_stay_in_range() {
    let mut s = SeededSource::new(7);
    for _ in 0..1000 {
        let v = s.random();
        assert!((0.0..1.0).contains(&v));
        let r = s.random_range(-3.0, 5.0);
        assert!((-3.0..5.0).contains(&r));
        assert!(s.index(4) < 4);
    }
}

#[test]
fn gaussian_mean_is_close() {
    let mut s = SeededSource::new(99);
    let n = 20_000;
    let sum: f64 = (0..n).map(|_| s.gaussian(10.0, 3.0)).sum();
    let mean = sum / n as f64;
    assert!((mean - 10.0).abs() < 0.1, "mean {mean}");
}

#[test]
fn noise_is_smooth_and_bounded_with_default_detail() {
    let s = SeededSource::new(5);
    let mut prev = s.noise2(0.0, 0.0);
    for i in 1..200 {
        let v = s.noise2(i as f64 * 0.01, 0.5);
        assert!((0.0..1.0).contains(&v));
        assert!((v - prev).abs() < 0.1);
        prev = v;
    }
}

#[test]
fn noise_detail_changes_output_and_ignores_invalid_values() {
    let mut s = SeededSource::new(5);
    let before = s.noise3(1.3, 2.7, 0.4);
    s.set_detail(2, 1.0);
    let after = s.noise3(1.3, 2.7, 0.4);
    assert_ne!(before, after);

    let mut n = ValueNoise::new(5);
    n.set_detail(0, -1.0);
    assert_eq!(n.detail(), (4, 0.5));
}

#[test]
fn shuffle_is_a_permutation() {
    let mut s = SeededRandom::new(3);
    let mut v: Vec<usize> = (0..10).collect();
    shuffle(&mut s, &mut v);
    let mut sorted = v.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..10).collect::<Vec<_>>());
}
