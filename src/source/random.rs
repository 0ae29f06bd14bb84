use rand::{Rng, SeedableRng, rngs::StdRng};

/// Uniform and Gaussian sampling used by brushes and flow-map construction.
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`.
    fn random(&mut self) -> f64;

    /// Normal sample with the given mean and standard deviation.
    fn gaussian(&mut self, mean: f64, sd: f64) -> f64;

    /// Uniform sample in `[lo, hi)`.
    fn random_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.random()
    }

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.random() < p
    }

    /// `-1.0` or `1.0` with equal probability.
    fn sign(&mut self) -> f64 {
        if self.random() < 0.5 { -1.0 } else { 1.0 }
    }

    /// Uniform index in `0..len`. `len` must be > 0.
    fn index(&mut self, len: usize) -> usize {
        ((self.random() * len as f64) as usize).min(len.saturating_sub(1))
    }
}

/// Fisher-Yates shuffle driven by a [`RandomSource`].
pub fn shuffle<T, R: RandomSource + ?Sized>(rng: &mut R, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.index(i + 1);
        items.swap(i, j);
    }
}

/// Seeded [`RandomSource`]. Gaussian samples use the polar method and cache the spare value.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: StdRng,
    spare: Option<f64>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            spare: None,
        }
    }
}

impl RandomSource for SeededRandom {
    fn random(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }

    fn gaussian(&mut self, mean: f64, sd: f64) -> f64 {
        let z = if let Some(z) = self.spare.take() {
            z
        } else {
            loop {
                let x1 = self.rng.gen_range(-1.0..1.0);
                let x2 = self.rng.gen_range(-1.0..1.0);
                let w: f64 = x1 * x1 + x2 * x2;
                if w > 0.0 && w < 1.0 {
                    let scale = (-2.0 * w.ln() / w).sqrt();
                    self.spare = Some(x2 * scale);
                    break x1 * scale;
                }
            }
        };
        mean + z * sd
    }
}
