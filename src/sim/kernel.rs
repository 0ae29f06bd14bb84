use rayon::prelude::*;

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{AquarelleError, AquarelleResult};
use crate::surface::raster::{Gray8, Pixel, Raster};

/// Half-width of the sampled neighborhood, in texels.
pub const KERNEL_RADIUS: i32 = 2;

/// Uniforms of one diffusion pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KernelParams {
    /// Variance of the isotropic kernel at full wetness (`sigma^2`).
    pub sigma2: f32,
}

impl KernelParams {
    pub fn from_sigma(sigma: f32) -> AquarelleResult<Self> {
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(AquarelleError::validation("diffusion sigma must be finite and >= 0"));
        }
        Ok(Self {
            sigma2: sigma * sigma,
        })
    }
}

/// Executes the wetness-modulated filter. Implement this for hardware-accelerated backends.
pub trait DiffusionBackend: Send + Sync {
    fn diffuse_rgba(
        &self,
        src: &Raster<Rgba8Premul>,
        modulation: &Raster<Gray8>,
        params: KernelParams,
    ) -> AquarelleResult<Raster<Rgba8Premul>>;

    fn diffuse_gray(
        &self,
        src: &Raster<Gray8>,
        modulation: &Raster<Gray8>,
        params: KernelParams,
    ) -> AquarelleResult<Raster<Gray8>>;
}

/// Software backend. Rows are filtered in parallel when `parallel` is set; the output does not
/// depend on it.
#[derive(Clone, Copy, Debug)]
pub struct CpuDiffusion {
    pub parallel: bool,
}

impl Default for CpuDiffusion {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl DiffusionBackend for CpuDiffusion {
    fn diffuse_rgba(
        &self,
        src: &Raster<Rgba8Premul>,
        modulation: &Raster<Gray8>,
        params: KernelParams,
    ) -> AquarelleResult<Raster<Rgba8Premul>> {
        diffuse_cpu(src, modulation, params, self.parallel)
    }

    fn diffuse_gray(
        &self,
        src: &Raster<Gray8>,
        modulation: &Raster<Gray8>,
        params: KernelParams,
    ) -> AquarelleResult<Raster<Gray8>> {
        diffuse_cpu(src, modulation, params, self.parallel)
    }
}

/// Pixel formats the kernel can filter. Routes a generic call to the matching backend method.
pub trait Diffusible: Pixel {
    fn diffuse(
        backend: &dyn DiffusionBackend,
        src: &Raster<Self>,
        modulation: &Raster<Gray8>,
        params: KernelParams,
    ) -> AquarelleResult<Raster<Self>>;
}

impl Diffusible for Rgba8Premul {
    fn diffuse(
        backend: &dyn DiffusionBackend,
        src: &Raster<Self>,
        modulation: &Raster<Gray8>,
        params: KernelParams,
    ) -> AquarelleResult<Raster<Self>> {
        backend.diffuse_rgba(src, modulation, params)
    }
}

impl Diffusible for Gray8 {
    fn diffuse(
        backend: &dyn DiffusionBackend,
        src: &Raster<Self>,
        modulation: &Raster<Gray8>,
        params: KernelParams,
    ) -> AquarelleResult<Raster<Self>> {
        backend.diffuse_gray(src, modulation, params)
    }
}

/// The diffusion/simulate pass: spreads a source raster along the wet (or permeable) regions of
/// a modulation raster.
pub struct DiffusionKernel {
    backend: Box<dyn DiffusionBackend>,
}

impl Default for DiffusionKernel {
    fn default() -> Self {
        Self::new(Box::new(CpuDiffusion::default()))
    }
}

impl std::fmt::Debug for DiffusionKernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiffusionKernel").finish_non_exhaustive()
    }
}

impl DiffusionKernel {
    pub fn new(backend: Box<dyn DiffusionBackend>) -> Self {
        Self { backend }
    }

    /// Filter `src` without touching it.
    pub fn filter<P: Diffusible>(
        &self,
        src: &Raster<P>,
        modulation: &Raster<Gray8>,
        sigma: f32,
    ) -> AquarelleResult<Raster<P>> {
        src.ensure_same_size(modulation, "diffusion")?;
        let params = KernelParams::from_sigma(sigma)?;
        let out = P::diffuse(self.backend.as_ref(), src, modulation, params)?;
        out.ensure_same_size(src, "diffusion backend output")?;
        Ok(out)
    }

    /// Run one pass. With `commit` the source is replaced by the result and `None` is returned;
    /// otherwise the source is left unchanged and the result is returned.
    pub fn simulate<P: Diffusible>(
        &self,
        src: &mut Raster<P>,
        modulation: &Raster<Gray8>,
        sigma: f32,
        commit: bool,
    ) -> AquarelleResult<Option<Raster<P>>> {
        let out = self.filter(src, modulation, sigma)?;
        if commit {
            *src = out;
            Ok(None)
        } else {
            Ok(Some(out))
        }
    }
}

/// Normalized gather over a `(2R+1)^2` neighborhood. The weight of neighbor `q` for pixel `p` is
/// `exp(-d^2 / (2 * sigma2 * m))` with `m = min(mod(p), mod(q))` in `0..=1`, so material only
/// moves between pixels that are both wet. Edges clamp to the border.
fn diffuse_cpu<P: Pixel>(
    src: &Raster<P>,
    modulation: &Raster<Gray8>,
    params: KernelParams,
    parallel: bool,
) -> AquarelleResult<Raster<P>> {
    src.ensure_same_size(modulation, "diffusion")?;
    let w = src.width() as usize;
    let h = src.height() as usize;
    let src_px = src.pixels();
    let mod_px = modulation.pixels();

    let mut out = vec![P::default(); w * h];
    let row = |y: usize, dst: &mut [P]| {
        for (x, slot) in dst.iter_mut().enumerate() {
            *slot = gather(src_px, mod_px, w, h, x, y, params.sigma2);
        }
    };

    if parallel {
        out.par_chunks_mut(w)
            .enumerate()
            .for_each(|(y, dst)| row(y, dst));
    } else {
        out.chunks_mut(w).enumerate().for_each(|(y, dst)| row(y, dst));
    }

    Raster::from_pixels(src.canvas(), out)
}

fn gather<P: Pixel>(
    src: &[P],
    modulation: &[Gray8],
    w: usize,
    h: usize,
    x: usize,
    y: usize,
    sigma2: f32,
) -> P {
    let center = y * w + x;
    let m_center = f32::from(modulation[center].0) / 255.0;
    if m_center <= 0.0 || sigma2 <= 0.0 {
        return src[center];
    }

    let mut acc = [0.0f32; 4];
    let mut total = 0.0f32;
    for dy in -KERNEL_RADIUS..=KERNEL_RADIUS {
        let sy = (y as i32 + dy).clamp(0, h as i32 - 1) as usize;
        for dx in -KERNEL_RADIUS..=KERNEL_RADIUS {
            let sx = (x as i32 + dx).clamp(0, w as i32 - 1) as usize;
            let i = sy * w + sx;
            let weight = if dx == 0 && dy == 0 {
                1.0
            } else {
                let m = m_center.min(f32::from(modulation[i].0) / 255.0);
                if m <= 0.0 {
                    continue;
                }
                let d2 = (dx * dx + dy * dy) as f32;
                (-d2 / (2.0 * sigma2 * m)).exp()
            };
            let c = src[i].to_channels();
            for k in 0..P::CHANNELS {
                acc[k] += weight * c[k];
            }
            total += weight;
        }
    }

    for v in &mut acc {
        *v /= total;
    }
    P::from_channels(acc)
}

#[cfg(test)]
#[path = "../../tests/unit/sim/kernel.rs"]
mod tests;
