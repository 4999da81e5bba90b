//! Script-aware text normalization and rule-based character conversion.
//!
//! ```
//! use lipyantar::{MappingRule, convert, normalize};
//!
//! // legacy order: the i-matra typed before its consonant
//! assert_eq!(normalize("િક"), "કિ");
//!
//! let rules = [MappingRule::new("s", "ક").unwrap()];
//! assert_eq!(convert("s", &rules), "ક");
//! ```
pub mod context;
pub mod converter;
pub mod normalizer;
pub mod process;
pub mod request;
pub mod rule;
pub mod script;
pub mod stage;
pub mod stats;

#[doc(hidden)]
pub mod testing {
    pub mod stage_contract;
}

pub use context::Context;
pub use converter::{Converter, ConverterBuilder};
pub use normalizer::Normalizer;
pub use request::{ConvertRequest, ConvertResponse, RequestError};
pub use rule::{MappingRule, MemRuleStore, RuleError, RuleSet, RuleSource, default_rules};
pub use script::{CombinationTable, DEFAULT_SCRIPT, GUJARATI, Script, TableError};
pub use stats::TextStatistics;

/// Normalize Gujarati text. See [`Normalizer`].
pub fn normalize(text: &str) -> String {
    Normalizer::default().normalize(text).into_owned()
}

/// Normalize, apply `rules` (first active match wins), normalize again.
pub fn convert(text: &str, rules: &[MappingRule]) -> String {
    Converter::builder()
        .rules(rules.iter().cloned())
        .build()
        .convert(text)
        .into_owned()
}
