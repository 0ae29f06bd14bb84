//! Frame-deferred execution of paint work.
//!
//! Long paint operations are written as [`Routine`]s: resumable state machines that do a slice of
//! work per resume and then ask to wait a number of frames. The [`Scheduler`] resumes them in
//! trigger-frame order, once per frame at most, so thousands of strokes are spread over an
//! animation instead of landing on a single frame.

mod routine;
mod scheduler;
mod script;
mod throttle;

pub use routine::{Routine, RoutineCx, Sequence, Step, from_fn};
pub use scheduler::{ProcessReport, Scheduler};
pub use script::{DeferredScript, ScriptOp, ScriptRoutine, StrokeScript};
pub use throttle::WorkThrottle;
