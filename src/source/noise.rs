use rand::{Rng, SeedableRng, rngs::StdRng};

const Y_WRAP_B: u32 = 4;
const Y_WRAP: usize = 1 << Y_WRAP_B;
const Z_WRAP_B: u32 = 8;
const Z_WRAP: usize = 1 << Z_WRAP_B;
const TABLE_MASK: usize = 4095;

/// Coherent noise in `[0, 1]` per octave, summed over octaves with amplitude falloff.
pub trait NoiseSource {
    fn noise3(&self, x: f64, y: f64, z: f64) -> f64;

    /// Octave count and per-octave amplitude falloff.
    fn set_detail(&mut self, octaves: u32, falloff: f64);

    fn noise2(&self, x: f64, y: f64) -> f64 {
        self.noise3(x, y, 0.0)
    }
}

/// Lattice value noise with cosine interpolation over a seeded 4096-entry table.
///
/// With `falloff <= 0.5` the output stays in `[0, 1)`; larger falloffs can exceed 1, which
/// callers treat as valid input.
#[derive(Clone, Debug)]
pub struct ValueNoise {
    table: Vec<f64>,
    octaves: u32,
    falloff: f64,
}

impl ValueNoise {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed ^ 0x6E6F_6973_655F_7462);
        let table = (0..=TABLE_MASK).map(|_| rng.r#gen::<f64>()).collect();
        Self {
            table,
            octaves: 4,
            falloff: 0.5,
        }
    }

    pub fn detail(&self) -> (u32, f64) {
        (self.octaves, self.falloff)
    }

    fn at(&self, i: usize) -> f64 {
        self.table[i & TABLE_MASK]
    }
}

fn scaled_cosine(i: f64) -> f64 {
    0.5 * (1.0 - (i * std::f64::consts::PI).cos())
}

impl NoiseSource for ValueNoise {
    fn noise3(&self, x: f64, y: f64, z: f64) -> f64 {
        let (x, y, z) = (x.abs(), y.abs(), z.abs());
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return 0.0;
        }

        let (mut xi, mut yi, mut zi) = (x.floor() as usize, y.floor() as usize, z.floor() as usize);
        let (mut xf, mut yf, mut zf) = (x.fract(), y.fract(), z.fract());

        let mut r = 0.0;
        let mut ampl = 0.5;
        for _ in 0..self.octaves {
            let mut of = xi
                .wrapping_add(yi.wrapping_shl(Y_WRAP_B))
                .wrapping_add(zi.wrapping_shl(Z_WRAP_B));

            let rxf = scaled_cosine(xf);
            let ryf = scaled_cosine(yf);

            let mut n1 = self.at(of);
            n1 += rxf * (self.at(of.wrapping_add(1)) - n1);
            let mut n2 = self.at(of.wrapping_add(Y_WRAP));
            n2 += rxf * (self.at(of.wrapping_add(Y_WRAP + 1)) - n2);
            n1 += ryf * (n2 - n1);

            of = of.wrapping_add(Z_WRAP);
            n2 = self.at(of);
            n2 += rxf * (self.at(of.wrapping_add(1)) - n2);
            let mut n3 = self.at(of.wrapping_add(Y_WRAP));
            n3 += rxf * (self.at(of.wrapping_add(Y_WRAP + 1)) - n3);
            n2 += ryf * (n3 - n2);

            n1 += scaled_cosine(zf) * (n2 - n1);

            r += n1 * ampl;
            ampl *= self.falloff;

            xi = xi.wrapping_shl(1);
            xf *= 2.0;
            yi = yi.wrapping_shl(1);
            yf *= 2.0;
            zi = zi.wrapping_shl(1);
            zf *= 2.0;
            if xf >= 1.0 {
                xi = xi.wrapping_add(1);
                xf -= 1.0;
            }
            if yf >= 1.0 {
                yi = yi.wrapping_add(1);
                yf -= 1.0;
            }
            if zf >= 1.0 {
                zi = zi.wrapping_add(1);
                zf -= 1.0;
            }
        }
        r
    }

    fn set_detail(&mut self, octaves: u32, falloff: f64) {
        if octaves > 0 {
            self.octaves = octaves;
        }
        if falloff > 0.0 {
            self.falloff = falloff;
        }
    }
}
