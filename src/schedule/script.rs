use crate::foundation::error::AquarelleResult;
use crate::schedule::routine::{Routine, RoutineCx, Step};
use crate::schedule::throttle::WorkThrottle;
use crate::sim::flow::FlowMapConfig;
use crate::sim::stroke::Stroke;

/// One instruction of a [`StrokeScript`].
#[derive(Clone, Debug, PartialEq)]
pub enum ScriptOp {
    Paint(Stroke),
    /// Charge work to the throttle; waits when a frame's budget is used up.
    Work(f64),
    /// Drop the throttle's carried remainder.
    ResetWork,
    Wait(u64),
    Dry,
    /// Rebuild the flow map, starting a new phase.
    FlowMap(FlowMapConfig),
}

/// An ordered list of paint operations, built ahead of time by a brush and played back by a
/// [`ScriptRoutine`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StrokeScript {
    ops: Vec<ScriptOp>,
}

impl StrokeScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[ScriptOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn push(&mut self, op: ScriptOp) -> &mut Self {
        self.ops.push(op);
        self
    }

    pub fn paint(&mut self, stroke: Stroke) -> &mut Self {
        self.push(ScriptOp::Paint(stroke))
    }

    pub fn work(&mut self, units: f64) -> &mut Self {
        self.push(ScriptOp::Work(units))
    }

    pub fn reset_work(&mut self) -> &mut Self {
        self.push(ScriptOp::ResetWork)
    }

    /// Zero-frame waits are dropped.
    pub fn wait(&mut self, frames: u64) -> &mut Self {
        if frames > 0 {
            self.push(ScriptOp::Wait(frames));
        }
        self
    }

    pub fn dry(&mut self) -> &mut Self {
        self.push(ScriptOp::Dry)
    }

    pub fn flow_map(&mut self, config: FlowMapConfig) -> &mut Self {
        self.push(ScriptOp::FlowMap(config))
    }

    pub fn extend(&mut self, other: StrokeScript) -> &mut Self {
        self.ops.extend(other.ops);
        self
    }

    /// Number of strokes the script paints.
    pub fn stroke_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, ScriptOp::Paint(_)))
            .count()
    }

    /// Frames the script waits explicitly, not counting throttle waits.
    pub fn explicit_wait_frames(&self) -> u64 {
        self.ops
            .iter()
            .map(|op| match op {
                ScriptOp::Wait(frames) => *frames,
                _ => 0,
            })
            .sum()
    }

    pub fn into_routine(self, throttle: WorkThrottle) -> ScriptRoutine {
        ScriptRoutine::new(self, throttle)
    }
}

/// Plays a [`StrokeScript`] against the paint-water state, yielding on waits and whenever the
/// work throttle overflows.
#[derive(Debug)]
pub struct ScriptRoutine {
    ops: Vec<ScriptOp>,
    cursor: usize,
    throttle: WorkThrottle,
}

impl ScriptRoutine {
    pub fn new(script: StrokeScript, throttle: WorkThrottle) -> Self {
        Self {
            ops: script.ops,
            cursor: 0,
            throttle,
        }
    }

    /// Operations not yet played.
    pub fn remaining(&self) -> usize {
        self.ops.len().saturating_sub(self.cursor)
    }
}

impl Routine for ScriptRoutine {
    fn resume(&mut self, cx: &mut RoutineCx<'_>) -> AquarelleResult<Step> {
        while let Some(op) = self.ops.get(self.cursor) {
            self.cursor += 1;
            match op {
                ScriptOp::Paint(stroke) => cx.state.apply_stroke(stroke)?,
                ScriptOp::Work(units) => {
                    let frames = self.throttle.add(*units);
                    if frames > 0 {
                        return Ok(Step::Wait(frames));
                    }
                }
                ScriptOp::ResetWork => self.throttle.reset(),
                ScriptOp::Wait(frames) => return Ok(Step::Wait(*frames)),
                ScriptOp::Dry => cx.state.dry()?,
                ScriptOp::FlowMap(config) => cx.state.init_flow_map(config, &mut *cx.source),
            }
        }
        Ok(Step::Done)
    }

    fn name(&self) -> &str {
        "stroke script"
    }
}

/// A script that is built on its first resume, so its random draws happen when the work
/// actually starts rather than when it is scheduled.
pub struct DeferredScript<F> {
    build: Option<F>,
    throttle: WorkThrottle,
    playing: Option<ScriptRoutine>,
}

impl<F> DeferredScript<F>
where
    F: FnOnce(&mut RoutineCx<'_>) -> AquarelleResult<StrokeScript>,
{
    pub fn new(throttle: WorkThrottle, build: F) -> Self {
        Self {
            build: Some(build),
            throttle,
            playing: None,
        }
    }
}

impl<F> Routine for DeferredScript<F>
where
    F: FnOnce(&mut RoutineCx<'_>) -> AquarelleResult<StrokeScript>,
{
    fn resume(&mut self, cx: &mut RoutineCx<'_>) -> AquarelleResult<Step> {
        if let Some(build) = self.build.take() {
            let script = build(cx)?;
            self.playing = Some(script.into_routine(self.throttle));
        }
        match self.playing.as_mut() {
            Some(routine) => routine.resume(cx),
            None => Ok(Step::Done),
        }
    }

    fn name(&self) -> &str {
        "deferred stroke script"
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/script.rs"]
mod tests;
