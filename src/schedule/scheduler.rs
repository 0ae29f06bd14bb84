use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::foundation::core::FrameIndex;
use crate::schedule::routine::{Routine, RoutineCx, Step};

struct Pending {
    trigger: FrameIndex,
    seq: u64,
    routine: Box<dyn Routine>,
}

impl Pending {
    fn key(&self) -> (FrameIndex, u64) {
        (self.trigger, self.seq)
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Outcome counts of one [`Scheduler::process`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProcessReport {
    pub resumed: usize,
    pub completed: usize,
    pub failed: usize,
}

/// Deterministic frame-keyed scheduler for [`Routine`]s.
///
/// Determinism rule: ready routines resume in trigger-frame order; equal triggers resume in
/// registration order. A routine that waits is registered again behind everything already
/// queued, and is never resumed twice in the same frame.
pub struct Scheduler {
    queue: BinaryHeap<Reverse<Pending>>,
    next_seq: u64,
    now: FrameIndex,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("pending", &self.queue.len())
            .field("now", &self.now)
            .finish()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            queue: BinaryHeap::new(),
            next_seq: 0,
            now: FrameIndex(0),
        }
    }

    /// Current frame. Delays passed to [`Scheduler::schedule`] count from here.
    pub fn now(&self) -> FrameIndex {
        self.now
    }

    /// Move the clock forward to `frame`. The clock never runs backwards.
    pub fn advance_to(&mut self, frame: FrameIndex) {
        self.now = self.now.max(frame);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Register `routine` to first run `delay` frames after the current frame.
    pub fn schedule(&mut self, routine: impl Routine + 'static, delay: u64) {
        self.schedule_boxed(Box::new(routine), delay);
    }

    pub fn schedule_boxed(&mut self, routine: Box<dyn Routine>, delay: u64) {
        let trigger = self.now.offset(delay);
        self.enqueue(trigger, routine);
    }

    fn enqueue(&mut self, trigger: FrameIndex, routine: Box<dyn Routine>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Pending {
            trigger,
            seq,
            routine,
        }));
    }

    /// Resume every routine whose trigger frame is at or before `cx.frame`.
    ///
    /// A failing routine is logged and dropped; the others still run.
    pub fn process(&mut self, cx: &mut RoutineCx<'_>) -> ProcessReport {
        self.advance_to(cx.frame);
        let mut report = ProcessReport::default();
        let mut waiting = Vec::new();

        while self
            .queue
            .peek()
            .is_some_and(|Reverse(p)| p.trigger <= self.now)
        {
            let Some(Reverse(mut pending)) = self.queue.pop() else {
                break;
            };
            report.resumed += 1;
            match pending.routine.resume(cx) {
                Ok(Step::Wait(frames)) => {
                    waiting.push((self.now.offset(frames.max(1)), pending.routine));
                }
                Ok(Step::Done) => report.completed += 1,
                Err(err) => {
                    report.failed += 1;
                    tracing::warn!(
                        frame = self.now.0,
                        routine = pending.routine.name(),
                        %err,
                        "routine failed and was dropped"
                    );
                }
            }
        }

        for (trigger, routine) in waiting {
            self.enqueue(trigger, routine);
        }
        report
    }

    /// Resume routines until none is left, without waiting for their trigger frames.
    ///
    /// Waits still order the routines against each other but take no real frames: a routine
    /// that waits `n` frames is queued `n` frames after the trigger it just ran at. Stops after
    /// `max_resumes` resumes; whatever is still queued then stays queued.
    pub fn drain(&mut self, cx: &mut RoutineCx<'_>, max_resumes: usize) -> ProcessReport {
        self.advance_to(cx.frame);
        let mut report = ProcessReport::default();

        while report.resumed < max_resumes {
            let Some(Reverse(mut pending)) = self.queue.pop() else {
                break;
            };
            report.resumed += 1;
            match pending.routine.resume(cx) {
                Ok(Step::Wait(frames)) => {
                    let trigger = pending.trigger.max(self.now).offset(frames.max(1));
                    self.enqueue(trigger, pending.routine);
                }
                Ok(Step::Done) => report.completed += 1,
                Err(err) => {
                    report.failed += 1;
                    tracing::warn!(
                        frame = self.now.0,
                        routine = pending.routine.name(),
                        %err,
                        "routine failed and was dropped"
                    );
                }
            }
        }
        report
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/scheduler.rs"]
mod tests;
