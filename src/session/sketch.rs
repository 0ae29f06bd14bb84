use crate::foundation::core::FrameIndex;
use crate::foundation::error::AquarelleResult;
use crate::schedule::Scheduler;
use crate::session::config::EngineConfig;
use crate::sim::paint_water::PaintWater;
use crate::source::Source;

/// Whether a sketch still has per-frame work of its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activity {
    Busy,
    Idle,
}

/// What a sketch sees on setup and on every later frame.
pub struct SketchCx<'a> {
    pub state: &'a mut PaintWater,
    pub scheduler: &'a mut Scheduler,
    pub source: &'a mut dyn Source,
    pub config: &'a EngineConfig,
    pub frame: FrameIndex,
}

/// A piece: sets up its phases and routines, and optionally draws directly each frame.
pub trait Sketch {
    fn name(&self) -> &str;

    /// Runs on frame 1, after the flow map from the config is built.
    fn setup(&mut self, cx: &mut SketchCx<'_>) -> AquarelleResult<()>;

    /// Runs on every frame after the first.
    fn update(&mut self, _cx: &mut SketchCx<'_>) -> AquarelleResult<Activity> {
        Ok(Activity::Idle)
    }
}
