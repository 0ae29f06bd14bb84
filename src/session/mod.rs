//! Per-run driver: owns the paint-water state, the scheduler and the source, and advances them
//! one frame at a time until the sketch settles.

mod config;
mod finish;
mod sketch;

pub use config::EngineConfig;
pub use finish::PaperFinish;
pub use sketch::{Activity, Sketch, SketchCx};

use crate::foundation::core::{FrameIndex, RenderMode, Rgba8Premul};
use crate::foundation::error::{AquarelleError, AquarelleResult};
use crate::schedule::{RoutineCx, Scheduler};
use crate::sim::paint_water::PaintWater;
use crate::source::SeededSource;
use crate::surface::raster::Raster;

/// Resume budget of one draft frame. A draft frame runs every queued routine to completion, so
/// a routine that never finishes would otherwise hang the frame.
pub const DRAFT_RESUME_LIMIT: usize = 1_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Running,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub finished: bool,
    pub fixations: u32,
}

/// One run of a [`Sketch`].
///
/// Each frame: setup (frame 1) or update, the settle countdown, due routines, then one
/// simulation tick. Once the sketch is idle, no routine is pending and the countdown has run
/// out, the wet pigment is dried and the finished image is kept.
///
/// In [`RenderMode::Draft`] every routine runs to completion in the frame it becomes due and
/// the tick is skipped.
pub struct Session<S> {
    sketch: S,
    config: EngineConfig,
    state: PaintWater,
    scheduler: Scheduler,
    source: SeededSource,
    frame: FrameIndex,
    settle: u32,
    finished: Option<Raster<Rgba8Premul>>,
}

impl<S: Sketch> Session<S> {
    pub fn new(sketch: S, config: EngineConfig) -> AquarelleResult<Self> {
        config.validate()?;
        let state = PaintWater::new(config.canvas, config.sim_config())?;
        Ok(Self {
            source: SeededSource::new(config.seed),
            settle: config.settle_frames,
            sketch,
            config,
            state,
            scheduler: Scheduler::new(),
            frame: FrameIndex(0),
            finished: None,
        })
    }

    /// Last frame stepped; 0 before the first step.
    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn sketch(&self) -> &S {
        &self.sketch
    }

    pub fn state(&self) -> &PaintWater {
        &self.state
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    /// The finished image, once the session has settled.
    pub fn final_image(&self) -> Option<&Raster<Rgba8Premul>> {
        self.finished.as_ref()
    }

    /// What the canvas shows right now.
    pub fn display(&self) -> Raster<Rgba8Premul> {
        match &self.finished {
            Some(image) => image.clone(),
            None => self.state.composite_for_display(self.config.paper),
        }
    }

    pub fn step(&mut self) -> AquarelleResult<StepOutcome> {
        if self.finished.is_some() {
            return Ok(StepOutcome::Finished);
        }
        self.frame = self.frame.next();
        self.scheduler.advance_to(self.frame);

        let mut settled = false;
        if self.frame == FrameIndex(1) {
            self.setup()?;
        } else {
            let activity = self.sketch.update(&mut SketchCx {
                state: &mut self.state,
                scheduler: &mut self.scheduler,
                source: &mut self.source,
                config: &self.config,
                frame: self.frame,
            })?;
            if activity == Activity::Idle && self.scheduler.is_idle() {
                if self.settle == 0 {
                    settled = true;
                } else {
                    self.settle -= 1;
                }
            }
        }

        let mut cx = RoutineCx {
            state: &mut self.state,
            source: &mut self.source,
            frame: self.frame,
        };
        let report = match self.config.mode {
            RenderMode::Full => self.scheduler.process(&mut cx),
            RenderMode::Draft => self.scheduler.drain(&mut cx, DRAFT_RESUME_LIMIT),
        };
        if report.resumed > 0 {
            tracing::trace!(frame = self.frame.0, ?report, "routines processed");
        }

        match self.config.mode {
            RenderMode::Full => self.state.tick(self.frame)?,
            RenderMode::Draft if !self.scheduler.is_idle() => {
                return Err(AquarelleError::routine(format!(
                    "{} routine(s) still pending after {DRAFT_RESUME_LIMIT} draft resumes",
                    self.scheduler.pending()
                )));
            }
            RenderMode::Draft => {}
        }

        if settled {
            self.finish()?;
            return Ok(StepOutcome::Finished);
        }
        Ok(StepOutcome::Running)
    }

    /// Step until finished or until `max_frames` frames have run, calling `on_frame` after each.
    pub fn run(
        &mut self,
        max_frames: u64,
        mut on_frame: impl FnMut(&Self),
    ) -> AquarelleResult<RunSummary> {
        while self.frame.0 < max_frames {
            let outcome = self.step()?;
            on_frame(self);
            if outcome == StepOutcome::Finished {
                break;
            }
        }
        if !self.is_finished() {
            tracing::warn!(
                frames = self.frame.0,
                pending = self.scheduler.pending(),
                "frame limit reached before the sketch settled"
            );
        }
        Ok(RunSummary {
            frames: self.frame.0,
            finished: self.is_finished(),
            fixations: self.state.fixations(),
        })
    }

    #[tracing::instrument(skip(self), fields(sketch = self.sketch.name()))]
    fn setup(&mut self) -> AquarelleResult<()> {
        self.state
            .init_flow_map(&self.config.flow_map, &mut self.source);
        self.sketch.setup(&mut SketchCx {
            state: &mut self.state,
            scheduler: &mut self.scheduler,
            source: &mut self.source,
            config: &self.config,
            frame: self.frame,
        })?;
        tracing::debug!(pending = self.scheduler.pending(), "sketch set up");
        Ok(())
    }

    fn finish(&mut self) -> AquarelleResult<()> {
        self.state.dry()?;
        let mut image = self.state.composite_for_display(self.config.paper);
        if let Some(finish) = &self.config.finish {
            finish.apply(&mut image, &mut self.source);
        }
        tracing::info!(
            frames = self.frame.0,
            fixations = self.state.fixations(),
            "session finished"
        );
        self.finished = Some(image);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/session.rs"]
mod tests;
