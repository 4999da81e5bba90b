//! Mapping rules and the boundary to whatever stores them.
//!
//! A [`MappingRule`] says "replace this codepoint with that string". Rules
//! are evaluated in the order the caller gives them; only active rules take
//! part, and the first rule that matches a codepoint wins. The store that
//! creates, edits and deletes rules is not part of this crate: it only has
//! to implement [`RuleSource`].
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("mapping rule source must not be empty")]
    EmptySource,
    #[error("mapping rule target must not be empty")]
    EmptyTarget,
}

fn default_true() -> bool {
    true
}

/// One substitution rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingRule {
    pub source_char: String,
    pub target_char: String,
    #[serde(default = "default_true")]
    pub case_sensitive: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl MappingRule {
    /// Active, case-sensitive rule.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Result<Self, RuleError> {
        let rule = Self {
            source_char: source.into(),
            target_char: target.into(),
            case_sensitive: true,
            is_active: true,
        };
        rule.validate()?;
        Ok(rule)
    }

    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Re-check a rule that did not come through [`MappingRule::new`]
    /// (e.g. deserialized).
    pub fn validate(&self) -> Result<(), RuleError> {
        if self.source_char.is_empty() {
            return Err(RuleError::EmptySource);
        }
        if self.target_char.is_empty() {
            return Err(RuleError::EmptyTarget);
        }
        Ok(())
    }

    /// The source as a single codepoint, `None` when it is empty or longer.
    #[inline]
    pub fn source_codepoint(&self) -> Option<char> {
        let mut chars = self.source_char.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct ActiveRule {
    /// `None` for sources that are not exactly one codepoint: such a rule is
    /// counted but can never match.
    source: Option<char>,
    target: Box<str>,
    case_sensitive: bool,
}

impl ActiveRule {
    #[inline(always)]
    fn matches(&self, c: char) -> bool {
        match self.source {
            Some(src) if self.case_sensitive => src == c,
            Some(src) => src == c || src.to_lowercase().eq(c.to_lowercase()),
            None => false,
        }
    }
}

/// Compiled snapshot of the active rules, in caller order.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: SmallVec<[ActiveRule; 16]>,
}

impl RuleSet {
    pub fn new<'r>(rules: impl IntoIterator<Item = &'r MappingRule>) -> Self {
        let mut compiled = SmallVec::new();
        let mut inactive = 0usize;
        for rule in rules {
            if !rule.is_active {
                inactive += 1;
                continue;
            }
            let source = rule.source_codepoint();
            if source.is_none() {
                warn!(
                    source = %rule.source_char,
                    target = %rule.target_char,
                    "mapping rule source is not a single codepoint; it will never match"
                );
            }
            compiled.push(ActiveRule {
                source,
                target: rule.target_char.as_str().into(),
                case_sensitive: rule.case_sensitive,
            });
        }
        debug!(active = compiled.len(), inactive, "compiled rule set");
        Self { rules: compiled }
    }

    /// Target of the first active rule matching `c`.
    #[inline]
    pub fn matches(&self, c: char) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| r.matches(c))
            .map(|r| r.target.as_ref())
    }

    /// Number of active rules considered.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// ──────────────────────────────────────────────────────────────
//  Storage boundary
// ──────────────────────────────────────────────────────────────

/// Anything that can hand over the current rule list.
///
/// The returned order must be stable: it decides which rule wins when two
/// rules match the same codepoint.
pub trait RuleSource {
    fn load_active_rules(&self) -> Vec<MappingRule>;
}

impl RuleSource for [MappingRule] {
    fn load_active_rules(&self) -> Vec<MappingRule> {
        self.iter().filter(|r| r.is_active).cloned().collect()
    }
}

impl RuleSource for Vec<MappingRule> {
    fn load_active_rules(&self) -> Vec<MappingRule> {
        self.as_slice().load_active_rules()
    }
}

/// Minimal in-memory rule store.
#[derive(Debug, Clone, Default)]
pub struct MemRuleStore {
    rules: Vec<MappingRule>,
    seeded: bool,
}

impl MemRuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the stock rules (`s → ક`, `a → અ`, `k → ક`). Call once at
    /// startup; later calls do nothing.
    pub fn init_defaults(&mut self) -> &mut Self {
        if self.seeded {
            return self;
        }
        self.seeded = true;
        self.rules.extend(default_rules());
        debug!(rules = self.rules.len(), "seeded default mapping rules");
        self
    }

    pub fn insert(&mut self, rule: MappingRule) -> usize {
        self.rules.push(rule);
        self.rules.len() - 1
    }

    /// Returns `false` when `index` is out of range.
    pub fn set_active(&mut self, index: usize, active: bool) -> bool {
        match self.rules.get_mut(index) {
            Some(rule) => {
                rule.is_active = active;
                true
            }
            None => false,
        }
    }

    pub fn rules(&self) -> &[MappingRule] {
        &self.rules
    }

    pub fn clear(&mut self) -> usize {
        let n = self.rules.len();
        self.rules.clear();
        n
    }
}

impl RuleSource for MemRuleStore {
    fn load_active_rules(&self) -> Vec<MappingRule> {
        self.rules.load_active_rules()
    }
}

/// The stock rule list a fresh store is seeded with.
pub fn default_rules() -> Vec<MappingRule> {
    [("s", "ક"), ("a", "અ"), ("k", "ક")]
        .into_iter()
        .map(|(source, target)| MappingRule {
            source_char: source.to_owned(),
            target_char: target.to_owned(),
            case_sensitive: true,
            is_active: true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(s: &str, t: &str) -> MappingRule {
        MappingRule::new(s, t).unwrap()
    }

    #[test]
    fn new_rejects_empty_sides() {
        assert_eq!(MappingRule::new("", "x"), Err(RuleError::EmptySource));
        assert_eq!(MappingRule::new("x", ""), Err(RuleError::EmptyTarget));
    }

    #[test]
    fn first_active_rule_wins() {
        let rules = [rule("s", "ક"), rule("s", "ખ")];
        assert_eq!(RuleSet::new(&rules).matches('s'), Some("ક"));

        let reversed = [rule("s", "ખ"), rule("s", "ક")];
        assert_eq!(RuleSet::new(&reversed).matches('s'), Some("ખ"));
    }

    #[test]
    fn inactive_rules_are_skipped_and_not_counted() {
        let rules = [rule("s", "ક").inactive(), rule("s", "ખ")];
        let set = RuleSet::new(&rules);
        assert_eq!(set.matches('s'), Some("ખ"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn case_sensitivity() {
        let sensitive = [rule("S", "શ")];
        let set = RuleSet::new(&sensitive);
        assert_eq!(set.matches('S'), Some("શ"));
        assert_eq!(set.matches('s'), None);

        let insensitive = [rule("S", "શ").case_insensitive()];
        let set = RuleSet::new(&insensitive);
        assert_eq!(set.matches('S'), Some("શ"));
        assert_eq!(set.matches('s'), Some("શ"));
    }

    #[test]
    fn multi_codepoint_source_never_matches() {
        let rules = [rule("ks", "ક્ષ"), rule("k", "ક")];
        let set = RuleSet::new(&rules);
        assert_eq!(set.len(), 2);
        assert_eq!(set.matches('k'), Some("ક"));
        assert_eq!(set.matches('s'), None);
    }

    #[test]
    fn deserializes_with_schema_defaults() {
        let r: MappingRule =
            serde_json::from_str(r#"{"sourceChar":"a","targetChar":"અ"}"#).unwrap();
        assert!(r.case_sensitive);
        assert!(r.is_active);
        assert!(r.validate().is_ok());

        let bad: MappingRule =
            serde_json::from_str(r#"{"sourceChar":"","targetChar":"અ"}"#).unwrap();
        assert_eq!(bad.validate(), Err(RuleError::EmptySource));
    }

    #[test]
    fn init_defaults_is_idempotent() {
        let mut store = MemRuleStore::new();
        store.init_defaults();
        store.init_defaults();
        assert_eq!(store.rules().len(), 3);
        assert_eq!(store.load_active_rules(), default_rules());
    }

    #[test]
    fn store_preserves_order_and_filters_inactive() {
        let mut store = MemRuleStore::new();
        let a = store.insert(rule("a", "અ"));
        store.insert(rule("b", "બ"));
        assert!(store.set_active(a, false));
        assert!(!store.set_active(99, false));

        let loaded = store.load_active_rules();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].source_char, "b");
        assert_eq!(store.clear(), 2);
    }
}
