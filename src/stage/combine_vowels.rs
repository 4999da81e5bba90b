use crate::{
    context::Context,
    script::Script,
    stage::{CharBuf, Stage},
    testing::stage_contract::StageTestConfig,
};
use std::borrow::Cow;

/// Exact-pair vowel combination: an independent vowel written together with
/// a vowel sign becomes the single letter it denotes (`અ` + `ા` → `આ`).
///
/// Left-to-right, non-overlapping: once a pair combines, scanning resumes
/// after its second codepoint. Unmapped pairs are left untouched.
#[derive(Default, Clone, Copy)]
pub struct CombineVowels;

impl Stage for CombineVowels {
    fn name(&self) -> &'static str {
        "combine_vowels"
    }

    #[inline]
    fn needs_apply(&self, text: &str, ctx: &Context) -> bool {
        if ctx.combinations.is_empty() || !ctx.entry.touches(text) {
            return false;
        }
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            if let Some(&next) = chars.peek()
                && ctx.combinations.lookup(c, next).is_some()
            {
                return true;
            }
        }
        false
    }

    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Cow<'a, str> {
        if !self.needs_apply(&text, ctx) {
            return text;
        }
        let chars: CharBuf = text.chars().collect();
        Cow::Owned(combine_pairs(&chars, ctx, text.len()))
    }
}

/// The combination scan over an already collected codepoint buffer.
fn combine_pairs(chars: &[char], ctx: &Context, capacity: usize) -> String {
    let mut out = String::with_capacity(capacity);
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if let Some(&next) = chars.get(i + 1)
            && let Some(to) = ctx.combinations.lookup(c, next)
        {
            out.push(to);
            i += 2;
            continue;
        }
        out.push(c);
        i += 1;
    }
    out
}

impl StageTestConfig for CombineVowels {
    fn samples(_script: Script) -> &'static [&'static str] {
        &["અા", "અાઅે", "અિ", "કા", "આ", "અ", ""]
    }

    fn should_pass_through(_script: Script) -> &'static [&'static str] {
        &["hello", "અિધકારી", "કિતાબ", "અ", ""]
    }

    fn should_transform(_script: Script) -> &'static [(&'static str, &'static str)] {
        &[
            ("અા", "આ"),
            ("અી", "ઈ"),
            ("અુ", "ઉ"),
            ("અે", "એ"),
            ("અૌ", "ઔ"),
            ("xઅાy", "xઆy"),
        ]
    }
}
