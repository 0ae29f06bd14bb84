#![forbid(unsafe_code)]
//! Watercolor paint-water simulation.
//!
//! Pigment and water live in two rasters of the same size. Every brush primitive lands on both
//! at once; each frame the water spreads through a static flow map, evaporates, and carries the
//! pigment with it. Drying fixes the wet pigment into a permanent layer. Long brush work is
//! spread over frames by a scheduler of resumable routines.

pub mod brush;
pub mod foundation;
pub mod schedule;
pub mod session;
pub mod sim;
pub mod sketches;
pub mod source;
pub mod surface;

pub use foundation::core::{Canvas, FrameIndex, RenderMode, Rgba8, Rgba8Premul};
pub use foundation::error::{AquarelleError, AquarelleResult};
pub use schedule::{Routine, RoutineCx, Scheduler, Step, StrokeScript, WorkThrottle};
pub use session::{EngineConfig, PaperFinish, Session, Sketch, SketchCx, StepOutcome};
pub use sim::{DiffusionKernel, Evaporation, FlowMap, FlowMapConfig, PaintWater, SimConfig, Stroke};
pub use source::{NoiseSource, RandomSource, SeededSource, Source};
pub use surface::{BlendMode, Gray8, Raster};
