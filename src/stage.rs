//! Core stage abstraction.
//!
//! A stage is one named pass over the text. Every stage is *total*: any
//! string is valid input, and there is no error path. Stages are also
//! zero-copy when they have nothing to do: `apply` hands the input `Cow`
//! back untouched, and `needs_apply` lets a process skip the stage entirely.
//!
//! `needs_apply` never allocates. Passes that rewrite by index collect
//! codepoints into a [`CharBuf`] inside `apply`; output is built into one
//! `String` pre-sized to the input length.

pub mod apply_rules;
pub mod combine_vowels;
pub mod nfc;
pub mod relocate_pre_base;
pub mod repair_sequence;

use crate::context::Context;
use smallvec::SmallVec;
use std::borrow::Cow;

pub use apply_rules::ApplyRules;
pub use combine_vowels::CombineVowels;
pub use nfc::{NFC, Nfc};
pub use relocate_pre_base::RelocatePreBase;
pub use repair_sequence::RepairSequence;

/// Codepoint buffer used by the lookahead passes. Short inputs (a word,
/// a rule target) never touch the heap.
pub(crate) type CharBuf = SmallVec<[char; 64]>;

/// A single normalisation step.
pub trait Stage: Send + Sync {
    /// Human-readable name – used for logging and contract-test messages.
    fn name(&self) -> &'static str;

    /// Fast pre-check. Returning `false` skips the whole stage.
    fn needs_apply(&self, text: &str, ctx: &Context) -> bool;

    /// Allocation-aware transformation. Must always be correct, even when
    /// called without consulting `needs_apply` first.
    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Cow<'a, str>;
}
