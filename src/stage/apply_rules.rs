//! stage/apply_rules.rs – **Ordered character substitution**
//! * One codepoint at a time, first active matching rule wins
//! * Unmatched codepoints pass through
//! * Every codepoint is matched against the input, never against output
//!   produced earlier in the same pass
//! * Zero-copy when no rule matches anything
use crate::{
    context::Context,
    rule::{MappingRule, RuleSet},
    script::Script,
    stage::Stage,
    testing::stage_contract::StageTestConfig,
};
use std::borrow::Cow;

#[derive(Debug, Clone, Default)]
pub struct ApplyRules {
    rules: RuleSet,
}

impl ApplyRules {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn from_rules<'r>(rules: impl IntoIterator<Item = &'r MappingRule>) -> Self {
        Self::new(RuleSet::new(rules))
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

impl Stage for ApplyRules {
    fn name(&self) -> &'static str {
        "apply_rules"
    }

    #[inline]
    fn needs_apply(&self, text: &str, _ctx: &Context) -> bool {
        if self.rules.is_empty() {
            return false;
        }
        text.chars()
            .any(|c| self.rules.matches(c).is_some_and(|t| !is_identity(c, t)))
    }

    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Cow<'a, str> {
        if !self.needs_apply(&text, ctx) {
            return text; // zero-copy
        }
        let mut out = String::with_capacity(text.len() * 2);
        for c in text.chars() {
            match self.rules.matches(c) {
                Some(target) => out.push_str(target),
                None => out.push(c),
            }
        }
        Cow::Owned(out)
    }
}

/// A rule mapping a codepoint to itself changes nothing.
#[inline(always)]
fn is_identity(c: char, target: &str) -> bool {
    let mut t = target.chars();
    t.next() == Some(c) && t.next().is_none()
}

impl StageTestConfig for ApplyRules {
    fn samples(_script: Script) -> &'static [&'static str] {
        &["q", "qqq", "aqa", "Q", "કq", ""]
    }

    fn should_transform(_script: Script) -> &'static [(&'static str, &'static str)] {
        &[("q", "ક"), ("aqa", "aકa"), ("qQ", "કQ")]
    }
}
