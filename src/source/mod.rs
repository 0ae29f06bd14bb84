//! Deterministic randomness for a run: uniform/Gaussian sampling and coherent noise, both
//! derived from one seed so a render can be reproduced from that seed alone.

mod noise;
mod random;

pub use noise::{NoiseSource, ValueNoise};
pub use random::{RandomSource, SeededRandom, shuffle};

/// Everything a brush or flow-map builder needs to sample.
pub trait Source: RandomSource + NoiseSource {}

impl<T: RandomSource + NoiseSource> Source for T {}

/// The default [`Source`]: a seeded RNG plus value noise seeded from the same value.
#[derive(Clone, Debug)]
pub struct SeededSource {
    seed: u64,
    random: SeededRandom,
    noise: ValueNoise,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            random: SeededRandom::new(seed),
            noise: ValueNoise::new(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededSource {
    fn random(&mut self) -> f64 {
        self.random.random()
    }

    fn gaussian(&mut self, mean: f64, sd: f64) -> f64 {
        self.random.gaussian(mean, sd)
    }
}

impl NoiseSource for SeededSource {
    fn noise3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.noise.noise3(x, y, z)
    }

    fn set_detail(&mut self, octaves: u32, falloff: f64) {
        self.noise.set_detail(octaves, falloff);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/source.rs"]
mod tests;
