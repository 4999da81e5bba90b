//! Rule-based converter.
//!
//! `normalize → substitute → normalize`. The first pass gives the rules a
//! canonical input to match against; the second repairs whatever sequences
//! the substituted targets produce (`અ` next to `ા` becomes `આ`, ...).
//!
//! ```
//! use lipyantar::{Converter, MappingRule};
//!
//! let conv = Converter::builder()
//!     .rule(MappingRule::new("s", "ક").unwrap())
//!     .rule(MappingRule::new("a", "અ").unwrap())
//!     .build();
//! assert_eq!(conv.convert("sa"), "કઅ");
//! assert_eq!(conv.rules_applied(), 2);
//! ```
use crate::{
    context::Context,
    normalizer::Normalizer,
    process::{DynamicProcess, Process},
    request::{ConvertRequest, ConvertResponse, RequestError},
    rule::{MappingRule, RuleSet, RuleSource},
    script::{CombinationTable, DEFAULT_SCRIPT, Script},
    stage::ApplyRules,
};
use std::{borrow::Cow, sync::Arc};
use tracing::debug;

/// A normalizer plus an immutable snapshot of the active rules.
///
/// `Send + Sync`; share it behind an `Arc` instead of rebuilding per call.
#[derive(Clone)]
pub struct Converter {
    normalizer: Normalizer,
    process: DynamicProcess,
    rules_applied: usize,
}

impl Default for Converter {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Converter {
    pub fn builder() -> ConverterBuilder {
        ConverterBuilder::default()
    }

    #[inline]
    pub fn context(&self) -> &Context {
        self.normalizer.context()
    }

    /// Total: every input yields a string, `""` yields `""`.
    pub fn convert<'a>(&self, text: impl Into<Cow<'a, str>>) -> Cow<'a, str> {
        self.process.process(text.into(), self.context())
    }

    /// Number of active rules in the snapshot, whether or not any of them
    /// matched.
    #[inline]
    pub fn rules_applied(&self) -> usize {
        self.rules_applied
    }

    pub fn respond(&self, request: &ConvertRequest) -> Result<ConvertResponse, RequestError> {
        request.validate()?;
        let converted = self.convert(request.text.as_str()).into_owned();
        debug!(
            config_id = request.config_id.as_deref().unwrap_or("-"),
            chars = request.text.chars().count(),
            rules = self.rules_applied,
            "converted request"
        );
        Ok(ConvertResponse {
            original_text: request.text.clone(),
            converted_text: converted,
            rules_applied: self.rules_applied,
        })
    }

    pub fn stage_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.process.stage_names()
    }
}

#[derive(Default)]
pub struct ConverterBuilder {
    script: Option<Script>,
    combinations: Option<CombinationTable>,
    rules: Vec<MappingRule>,
}

impl ConverterBuilder {
    pub fn script(mut self, script: Script) -> Self {
        self.script = Some(script);
        self
    }

    /// Replace the script's built-in vowel-combination table.
    pub fn combinations(mut self, table: CombinationTable) -> Self {
        self.combinations = Some(table);
        self
    }

    /// Append one rule. Order of calls is evaluation order.
    pub fn rule(mut self, rule: MappingRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules<I: IntoIterator<Item = MappingRule>>(mut self, rules: I) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Append a snapshot of the active rules held by `source`.
    pub fn rules_from(mut self, source: &dyn RuleSource) -> Self {
        self.rules.extend(source.load_active_rules());
        self
    }

    pub fn build(self) -> Converter {
        let script = self.script.unwrap_or(DEFAULT_SCRIPT);
        let ctx = match self.combinations {
            Some(table) => Context::with_combinations(script, table),
            None => Context::new(script),
        };
        let normalizer = Normalizer::with_context(ctx);
        let rules = RuleSet::new(&self.rules);
        let rules_applied = rules.len();

        let shared: Arc<Normalizer> = Arc::new(normalizer);
        let process = DynamicProcess::new()
            .push_shared(shared.clone())
            .push(ApplyRules::new(rules))
            .push_shared(shared);

        debug!(%script, rules = rules_applied, "built converter");
        Converter {
            normalizer,
            process,
            rules_applied,
        }
    }
}
