//! stage/relocate_pre_base.rs – **Pre-base vowel sign relocation**
//!
//! Legacy fonts and some keyboards store the Gujarati i-matra (`િ`) where it
//! is *drawn*, before its consonant. Canonical text stores it after.
//!
//! * `િ ક` → `ક િ`
//! * Everything between the mark and its consonant keeps its order:
//!   `અ િ ધ` → `અ ધ િ`
//! * Stacked marks all land on the nearest following consonant:
//!   `િ િ ક ખ` → `ક િ િ ખ`
//! * A mark with no consonant anywhere after it stays where it is.
//! * A mark is attached, and stays, when the run of marks it belongs to
//!   starts directly after a consonant (`ક િ`, `ક િ િ`).
//!
//! Attached marks never move, so the pass is its own fixed point.
use crate::{
    context::Context,
    script::Script,
    stage::{CharBuf, Stage},
    testing::stage_contract::StageTestConfig,
};
use std::borrow::Cow;

#[derive(Default, Clone, Copy)]
pub struct RelocatePreBase;

impl Stage for RelocatePreBase {
    fn name(&self) -> &'static str {
        "relocate_pre_base"
    }

    fn needs_apply(&self, text: &str, ctx: &Context) -> bool {
        if !ctx.entry.touches(text) {
            return false;
        }
        let e = &ctx.entry;
        // Nothing moves before the first detached mark, so the input can
        // stand in for the output here.
        let mut attached = false;
        let mut detached = false;
        for c in text.chars() {
            if e.is_pre_base(c) {
                detached |= !attached;
                continue;
            }
            if detached && e.is_consonant(c) {
                return true;
            }
            attached = e.is_consonant(c);
        }
        false
    }

    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Cow<'a, str> {
        if !self.needs_apply(&text, ctx) {
            return text;
        }
        let chars: CharBuf = text.chars().collect();
        Cow::Owned(relocate(&chars, ctx, text.len()))
    }
}

fn relocate(chars: &[char], ctx: &Context, capacity: usize) -> String {
    let e = &ctx.entry;
    let last_consonant = chars.iter().rposition(|&c| e.is_consonant(c));

    let mut out = String::with_capacity(capacity);
    // last emitted base is a consonant and only marks follow it
    let mut attached = false;
    let mut held = 0usize;

    for (i, &c) in chars.iter().enumerate() {
        if e.is_pre_base(c) {
            if !attached && last_consonant.is_some_and(|j| j > i) {
                held += 1;
            } else {
                out.push(c);
            }
            continue;
        }
        out.push(c);
        attached = e.is_consonant(c);
        if attached && held > 0 {
            out.extend(std::iter::repeat_n(e.pre_base_sign, held));
            held = 0;
        }
    }
    out
}

impl StageTestConfig for RelocatePreBase {
    fn samples(_script: Script) -> &'static [&'static str] {
        &["િક", "અિધકારી", "કિતાબ", "િ", "ક્િ", "િિકખ", ""]
    }

    fn should_pass_through(_script: Script) -> &'static [&'static str] {
        &["hello", "કિતાબ", "અધિકારી", "િ", "abc િ", ""]
    }

    fn should_transform(_script: Script) -> &'static [(&'static str, &'static str)] {
        &[
            ("િક", "કિ"),
            ("અિધકારી", "અધિકારી"),
            ("િતાબ", "તિાબ"),
            ("િ x ક", " x કિ"),
            ("િિક ખ", "કિિ ખ"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_stage_contract;

    fn run(s: &str) -> String {
        RelocatePreBase
            .apply(Cow::Borrowed(s), &Context::default())
            .into_owned()
    }

    #[test]
    fn universal_contract_compliance() {
        assert_stage_contract!(RelocatePreBase);
    }

    #[test]
    fn moves_mark_after_adjacent_consonant() {
        assert_eq!(run("િક"), "કિ");
    }

    #[test]
    fn keeps_intervening_codepoints_in_order() {
        assert_eq!(run("િ\u{0ABC}ક"), "\u{0ABC}કિ");
        assert_eq!(run("અિધ"), "અધિ");
    }

    #[test]
    fn unreachable_mark_stays_put() {
        assert_eq!(run("અિ"), "અિ");
        assert_eq!(run("િ"), "િ");
        assert_eq!(run("abc િ 123"), "abc િ 123");
    }

    #[test]
    fn attached_mark_is_not_moved_again() {
        assert_eq!(run("કિખ"), "કિખ");
        let once = run("િકખગ");
        assert_eq!(once, "કિખગ");
        assert_eq!(run(&once), once);
    }

    #[test]
    fn stacked_marks_stay_with_the_nearest_consonant() {
        assert_eq!(run("િિક ખ"), "કિિ ખ");
        assert_eq!(run("િિક abc"), "કિિ abc");
        assert_eq!(run("િિતા"), "તિિા");
        assert_eq!(run("િિકખ"), "કિિખ");
    }

    #[test]
    fn marks_stacked_on_a_consonant_are_attached() {
        let input = "કિિ ખ";
        assert!(!RelocatePreBase.needs_apply(input, &Context::default()));
        let out = RelocatePreBase.apply(Cow::Borrowed(input), &Context::default());
        assert!(matches!(out, Cow::Borrowed(_)));
    }

    #[test]
    fn detached_marks_across_other_text_join_one_consonant() {
        assert_eq!(run("િ x િ ક"), " x  કિિ");
    }

    #[test]
    fn mark_after_virama_is_detached() {
        // ક ્ િ ખ – the mark follows the virama, not the consonant
        assert_eq!(run("ક્િખ"), "ક્ખિ");
        assert_eq!(run("ક્િ"), "ક્િ");
    }
}
