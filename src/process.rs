//! Process abstraction
//! `ChainedProcess` is monomorphised – the compiler knows the concrete type
//! of every stage and can inline the whole chain. Used for the fixed
//! normalizer pipeline.
//! `DynamicProcess` is the `Arc<dyn Stage>` fallback for pipelines assembled
//! at runtime, such as a converter built from a rule snapshot.
use crate::{context::Context, stage::Stage};
use smallvec::SmallVec;
use std::{borrow::Cow, sync::Arc};

pub trait Process: Send + Sync {
    fn process<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Cow<'a, str>;
}

#[derive(Default, Clone, Copy)]
pub struct EmptyProcess;

impl Process for EmptyProcess {
    #[inline(always)]
    fn process<'a>(&self, text: Cow<'a, str>, _ctx: &Context) -> Cow<'a, str> {
        text
    }
}

#[derive(Default, Clone, Copy)]
pub struct ChainedProcess<S: Stage, P: Process> {
    pub stage: S,
    pub previous: P,
}

impl<S: Stage, P: Process> Process for ChainedProcess<S, P> {
    #[inline(always)]
    fn process<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Cow<'a, str> {
        let current = self.previous.process(text, ctx);
        if !self.stage.needs_apply(&current, ctx) {
            return current;
        }
        self.stage.apply(current, ctx)
    }
}

/// Statically typed pipeline builder: each `add_stage` wraps the chain so
/// far, the stage added last runs last.
pub struct ProcessBuilder<P: Process> {
    current: P,
}

impl ProcessBuilder<EmptyProcess> {
    pub const fn new() -> Self {
        Self {
            current: EmptyProcess,
        }
    }
}

impl Default for ProcessBuilder<EmptyProcess> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Process> ProcessBuilder<P> {
    pub fn add_stage<S: Stage>(self, stage: S) -> ProcessBuilder<ChainedProcess<S, P>> {
        ProcessBuilder {
            current: ChainedProcess {
                stage,
                previous: self.current,
            },
        }
    }

    pub fn build(self) -> P {
        self.current
    }
}

#[derive(Default, Clone)]
pub struct DynamicProcess {
    pub(crate) stages: SmallVec<[Arc<dyn Stage + Send + Sync>; 4]>,
}

impl DynamicProcess {
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn push<T: Stage + Send + Sync + 'static>(mut self, stage: T) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    /// Push an already shared stage (the same normalizer twice, for example).
    #[inline(always)]
    pub fn push_shared(mut self, stage: Arc<dyn Stage + Send + Sync>) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn stage_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.stages.iter().map(|s| s.name())
    }
}

impl Process for DynamicProcess {
    #[inline(always)]
    fn process<'a>(&self, mut text: Cow<'a, str>, ctx: &Context) -> Cow<'a, str> {
        for stage in &self.stages {
            if !stage.needs_apply(&text, ctx) {
                continue;
            }
            text = stage.apply(text, ctx);
        }
        text
    }
}
