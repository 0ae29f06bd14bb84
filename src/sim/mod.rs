//! The paint-water simulation: diffusion kernel, flow map, evaporation, strokes, and the state
//! that ties them together.

pub mod evaporation;
pub mod flow;
pub mod kernel;
pub mod paint_water;
pub mod stroke;
pub mod watercolor;

pub use evaporation::{BurnDecay, ConstantDecay, Evaporation};
pub use flow::{FlowMap, FlowMapConfig, FlowTexture};
pub use kernel::{CpuDiffusion, DiffusionBackend, DiffusionKernel, KERNEL_RADIUS};
pub use paint_water::{DiffusionConfig, PaintWater, SimConfig};
pub use stroke::{PaintStyle, Stroke};
pub use watercolor::Watercolor;
