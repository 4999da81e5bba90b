use crate::{
    context::Context,
    script::{Script, ScriptEntry},
    stage::Stage,
    testing::stage_contract::StageTestConfig,
};
use std::{borrow::Cow, str::Chars};

/// Local sequence repair with bounded lookahead.
///
/// Rules, first match wins at each scan position:
/// 1. consonant + virama + vowel sign → consonant (a killed-then-revoiced
///    consonant is the plain consonant). Further `virama + sign` pairs
///    directly after are dropped in the same step.
/// 2. a vowel-combination pair → the combined vowel.
/// 3. pre-base sign(s) + consonant → consonant + pre-base sign(s).
/// 4. consonant + vowel sign → kept as a unit; a consonant keeps a whole
///    run of pre-base signs stacked on it.
/// 5. independent vowel + vowel sign → kept as a unit.
/// 6. anything else → kept.
///
/// Rules 4 and 5 consume the sign with its base, so a sign that already
/// belongs to a base is never re-read as the start of another rule.
///
/// The scan walks cloned `Chars` iterators for lookahead, so `needs_apply`
/// never allocates.
#[derive(Default, Clone, Copy)]
pub struct RepairSequence;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Copy `n` codepoints unchanged.
    Keep(usize),
    /// Emit the consonant, drop the following `n - 1` codepoints.
    Collapse(usize),
    /// Emit one combined vowel in place of two codepoints.
    Combine(char),
    /// Emit `consonant`, then the `marks` pre-base signs that preceded it.
    Swap { marks: usize, consonant: char },
}

/// Number of `virama + sign` pairs at the start of `it`.
#[inline]
fn revoiced_pairs(mut it: Chars<'_>, e: &ScriptEntry) -> usize {
    let mut n = 0;
    loop {
        match (it.next(), it.next()) {
            (Some(h), Some(s)) if e.is_virama(h) && e.is_vowel_sign(s) && !e.is_virama(s) => {
                n += 1
            }
            _ => return n,
        }
    }
}

/// `rest` must not be empty.
#[inline]
fn step(rest: &Chars<'_>, ctx: &Context) -> Step {
    let e = &ctx.entry;
    let mut ahead = rest.clone();
    let Some(c) = ahead.next() else {
        return Step::Keep(1);
    };
    let Some(n1) = ahead.clone().next() else {
        return Step::Keep(1);
    };

    if e.is_consonant(c) {
        let pairs = revoiced_pairs(ahead.clone(), e);
        if pairs > 0 {
            return Step::Collapse(1 + 2 * pairs);
        }
    }
    if let Some(to) = ctx.combinations.lookup(c, n1) {
        return Step::Combine(to);
    }
    if e.is_pre_base(c) {
        let marks = 1 + ahead.take_while(|&x| e.is_pre_base(x)).count();
        if let Some(k) = rest.clone().nth(marks)
            && e.is_consonant(k)
        {
            return Step::Swap { marks, consonant: k };
        }
        return Step::Keep(1);
    }
    if e.is_consonant(c) && e.is_pre_base(n1) {
        return Step::Keep(1 + ahead.take_while(|&x| e.is_pre_base(x)).count());
    }
    // table pairs were taken above, so vowel + sign here is a plain unit
    if (e.is_consonant(c) || e.is_independent_vowel(c)) && e.is_vowel_sign(n1) {
        return Step::Keep(2);
    }
    Step::Keep(1)
}

impl Stage for RepairSequence {
    fn name(&self) -> &'static str {
        "repair_sequence"
    }

    fn needs_apply(&self, text: &str, ctx: &Context) -> bool {
        if !ctx.entry.touches(text) {
            return false;
        }
        let mut rest = text.chars();
        while !rest.as_str().is_empty() {
            match step(&rest, ctx) {
                Step::Keep(n) => {
                    rest.nth(n - 1);
                }
                _ => return true,
            }
        }
        false
    }

    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Cow<'a, str> {
        if !ctx.entry.touches(&text) {
            return text;
        }
        let mut out = String::with_capacity(text.len());
        let mut changed = false;
        let mut rest = text.chars();

        while let Some(c) = rest.clone().next() {
            match step(&rest, ctx) {
                Step::Keep(n) => out.extend(rest.by_ref().take(n)),
                Step::Collapse(n) => {
                    out.push(c);
                    rest.nth(n - 1);
                    changed = true;
                }
                Step::Combine(to) => {
                    out.push(to);
                    rest.nth(1);
                    changed = true;
                }
                Step::Swap { marks, consonant } => {
                    out.push(consonant);
                    out.extend(std::iter::repeat_n(ctx.entry.pre_base_sign, marks));
                    rest.nth(marks);
                    changed = true;
                }
            }
        }

        if changed { Cow::Owned(out) } else { text }
    }
}

impl StageTestConfig for RepairSequence {
    fn samples(_script: Script) -> &'static [&'static str] {
        &["ક્ા", "ષ્ાક", "િક", "અા", "કિતાબ", "અિધ", "ક્", ""]
    }

    fn should_pass_through(_script: Script) -> &'static [&'static str] {
        &["hello", "કિતાબ", "અધિકારી", "ક્ષ", "ક્", ""]
    }

    fn should_transform(_script: Script) -> &'static [(&'static str, &'static str)] {
        &[
            ("ષ્ા", "ષ"),
            ("ક્ી ", "ક "),
            ("અા", "આ"),
            ("િક", "કિ"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_stage_contract;

    fn run(s: &str) -> String {
        RepairSequence
            .apply(Cow::Borrowed(s), &Context::default())
            .into_owned()
    }

    #[test]
    fn universal_contract_compliance() {
        assert_stage_contract!(RepairSequence);
    }

    #[test]
    fn revoiced_consonant_collapses() {
        assert_eq!(run("ષ્ા"), "ષ");
        assert_eq!(run("ક્ેખ"), "કખ");
    }

    #[test]
    fn repeated_revoicing_collapses_in_one_step() {
        let once = run("ક્ા્ે");
        assert_eq!(once, "ક");
        assert_eq!(run(&once), once);
    }

    #[test]
    fn double_virama_is_not_a_revoicing() {
        assert_eq!(run("ક્્"), "ક્્");
    }

    #[test]
    fn conjunct_is_untouched() {
        // ક ્ ષ – virama followed by a consonant, not a vowel sign
        let out = RepairSequence.apply(Cow::Borrowed("ક્ષ"), &Context::default());
        assert!(matches!(out, Cow::Borrowed(_)));
    }

    #[test]
    fn table_lookup_wins_over_positional_rules() {
        assert_eq!(run("અાિક"), "આકિ");
    }

    #[test]
    fn sign_owned_by_consonant_is_not_swapped() {
        // ક િ ખ: the i-matra belongs to ક and is consumed with it
        assert_eq!(run("કિખ"), "કિખ");
    }

    #[test]
    fn stacked_pre_base_signs_move_as_a_run() {
        assert_eq!(run("િિક"), "કિિ");
        assert_eq!(run("િિ x"), "િિ x");
    }

    #[test]
    fn consonant_keeps_its_stacked_signs() {
        let out = RepairSequence.apply(Cow::Borrowed("કિિખ"), &Context::default());
        assert!(matches!(out, Cow::Borrowed(_)));
        assert!(!RepairSequence.needs_apply("કિિખ", &Context::default()));
    }

    #[test]
    fn vowel_with_unmapped_sign_stays() {
        assert_eq!(run("અિ"), "અિ");
        assert_eq!(run("ઇં"), "ઇં");
    }
}
