// src/context.rs
// Single source of truth for script configuration in hot paths.
// Tiny, Copy, and holds only 'static data.

use crate::script::{CombinationTable, DEFAULT_SCRIPT, SCRIPT_TABLE, Script, ScriptEntry};

/// Runtime context passed to every stage.
///
/// - `script`: human identifier (logging, debugging)
/// - `entry`: the static classification data used in every hot path
/// - `combinations`: the vowel-combination table, validated on construction
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub script: Script,
    pub entry: ScriptEntry,
    pub combinations: CombinationTable,
}

impl Default for Context {
    #[inline(always)]
    fn default() -> Self {
        Self::new(DEFAULT_SCRIPT)
    }
}

impl Context {
    /// Create a context from the canonical static data for a script.
    #[inline]
    pub fn new(script: Script) -> Self {
        let entry = Self::entry_for(script);
        let combinations = CombinationTable::new(entry.combinations)
            .expect("built-in combination table failed validation – this is a bug");
        Self {
            script,
            entry,
            combinations,
        }
    }

    /// Same script data, caller-supplied (already validated) combination table.
    #[inline]
    pub fn with_combinations(script: Script, combinations: CombinationTable) -> Self {
        Self {
            script,
            entry: Self::entry_for(script),
            combinations,
        }
    }

    #[inline(always)]
    fn entry_for(script: Script) -> ScriptEntry {
        SCRIPT_TABLE
            .get(script.code())
            .copied()
            .expect("script not present in SCRIPT_TABLE – this is a bug")
    }
}
