use crate::foundation::core::FrameIndex;
use crate::foundation::error::AquarelleResult;
use crate::sim::paint_water::PaintWater;
use crate::source::Source;

/// What a routine wants after a resume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Resume again after this many frames. `Wait(0)` means the next frame.
    Wait(u64),
    Done,
}

/// Everything a routine may touch while it runs.
pub struct RoutineCx<'a> {
    pub state: &'a mut PaintWater,
    pub source: &'a mut dyn Source,
    pub frame: FrameIndex,
}

/// A resumable unit of paint work.
pub trait Routine {
    fn resume(&mut self, cx: &mut RoutineCx<'_>) -> AquarelleResult<Step>;

    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<F> Routine for F
where
    F: FnMut(&mut RoutineCx<'_>) -> AquarelleResult<Step>,
{
    fn resume(&mut self, cx: &mut RoutineCx<'_>) -> AquarelleResult<Step> {
        self(cx)
    }

    fn name(&self) -> &str {
        "closure"
    }
}

/// Build a routine from a closure. Pins the closure signature so the context lifetimes are
/// inferred correctly.
pub fn from_fn<F>(f: F) -> F
where
    F: FnMut(&mut RoutineCx<'_>) -> AquarelleResult<Step>,
{
    f
}

/// Runs child routines one after another. A child that finishes hands over to the next one
/// within the same resume.
#[derive(Default)]
pub struct Sequence {
    children: Vec<Box<dyn Routine>>,
    current: usize,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, routine: impl Routine + 'static) -> Self {
        self.children.push(Box::new(routine));
        self
    }

    pub fn push(&mut self, routine: Box<dyn Routine>) {
        self.children.push(routine);
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Routine for Sequence {
    fn resume(&mut self, cx: &mut RoutineCx<'_>) -> AquarelleResult<Step> {
        while let Some(child) = self.children.get_mut(self.current) {
            match child.resume(cx)? {
                Step::Wait(frames) => return Ok(Step::Wait(frames)),
                Step::Done => self.current += 1,
            }
        }
        Ok(Step::Done)
    }

    fn name(&self) -> &str {
        self.children
            .get(self.current)
            .map_or("sequence", |child| child.name())
    }
}
