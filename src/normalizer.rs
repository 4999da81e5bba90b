//! Script normalizer – the fixed six-pass pipeline.
//!
//! ```text
//! nfc → combine_vowels → relocate_pre_base → repair_sequence → combine_vowels → nfc
//! ```
//!
//! Every pass is one bounded left-to-right scan, so normalization is linear
//! in the number of codepoints. The result is a fixed point:
//! `normalize(normalize(x)) == normalize(x)` for every `x`.
use crate::{
    context::Context,
    process::{ChainedProcess, EmptyProcess, Process, ProcessBuilder},
    script::Script,
    stage::{CombineVowels, NFC, Nfc, RelocatePreBase, RepairSequence, Stage, nfc::is_nfc},
};
use std::borrow::Cow;

type Pipeline = ChainedProcess<
    Nfc,
    ChainedProcess<
        CombineVowels,
        ChainedProcess<
            RepairSequence,
            ChainedProcess<RelocatePreBase, ChainedProcess<CombineVowels, ChainedProcess<Nfc, EmptyProcess>>>,
        >,
    >,
>;

fn pipeline() -> Pipeline {
    ProcessBuilder::new()
        .add_stage(NFC)
        .add_stage(CombineVowels)
        .add_stage(RelocatePreBase)
        .add_stage(RepairSequence)
        .add_stage(CombineVowels)
        .add_stage(NFC)
        .build()
}

#[derive(Clone, Copy)]
pub struct Normalizer {
    ctx: Context,
    pipeline: Pipeline,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::with_context(Context::default())
    }
}

impl Normalizer {
    pub fn new(script: Script) -> Self {
        Self::with_context(Context::new(script))
    }

    pub fn with_context(ctx: Context) -> Self {
        Self {
            ctx,
            pipeline: pipeline(),
        }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Total: empty text, text without script codepoints and stray marks
    /// all pass through (modulo NFC).
    pub fn normalize<'a>(&self, text: impl Into<Cow<'a, str>>) -> Cow<'a, str> {
        self.pipeline.process(text.into(), &self.ctx)
    }
}

/// The normalizer as a single stage, so converters can put it on both sides
/// of the substitution pass. Runs with its own context, whatever the caller
/// passes in.
impl Stage for Normalizer {
    fn name(&self) -> &'static str {
        "script_normalize"
    }

    #[inline]
    fn needs_apply(&self, text: &str, _ctx: &Context) -> bool {
        // conservative for script text; exact otherwise
        self.ctx.entry.touches(text) || !is_nfc(text)
    }

    fn apply<'a>(&self, text: Cow<'a, str>, _ctx: &Context) -> Cow<'a, str> {
        self.pipeline.process(text, &self.ctx)
    }
}
