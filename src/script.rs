pub mod data;

use std::fmt;
use thiserror::Error;

pub use data::{GUJARATI, SCRIPT_TABLE, all_scripts};

/// Identifier of a supported script (ISO 15924 code + English name).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Script {
    pub code: &'static str,
    pub name: &'static str,
}

impl Script {
    #[inline(always)]
    pub const fn code(&self) -> &'static str {
        self.code
    }
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Case-insensitive lookup by ISO 15924 code (`"gujr"`, `"GUJR"`).
    pub fn from_code(code: &str) -> Option<Script> {
        let upper = code.to_uppercase();
        all_scripts().iter().copied().find(|s| s.code == upper)
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

pub const DEFAULT_SCRIPT: Script = GUJARATI;

/// Category of a single codepoint relative to one script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Consonant,
    IndependentVowel,
    VowelSign,
    CombiningMark,
    Other,
}

/// Inclusive codepoint range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeRange {
    pub start: char,
    pub end: char,
}

impl CodeRange {
    pub const fn new(start: char, end: char) -> Self {
        Self { start, end }
    }

    #[inline(always)]
    pub const fn contains(&self, c: char) -> bool {
        c as u32 >= self.start as u32 && c as u32 <= self.end as u32
    }
}

/// `base + sign` written as two codepoints denotes the single letter `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VowelCombination {
    pub base: char,
    pub sign: char,
    pub to: char,
}

/// Static per-script data. Lives in [`SCRIPT_TABLE`].
#[derive(Debug, Clone, Copy)]
pub struct ScriptEntry {
    pub block: CodeRange,
    /// UTF-8 lead byte shared by every codepoint of `block`.
    pub lead_byte: u8,
    pub consonants: CodeRange,
    pub independent_vowels: CodeRange,
    pub vowel_signs: CodeRange,
    pub combining_marks: &'static [CodeRange],
    pub virama: char,
    pub pre_base_sign: char,
    pub combinations: &'static [VowelCombination],
}

impl ScriptEntry {
    #[inline(always)]
    pub fn classify(&self, c: char) -> CharClass {
        if !self.block.contains(c) {
            return CharClass::Other;
        }
        if self.consonants.contains(c) {
            CharClass::Consonant
        } else if self.independent_vowels.contains(c) {
            CharClass::IndependentVowel
        } else if self.vowel_signs.contains(c) {
            CharClass::VowelSign
        } else if self.combining_marks.iter().any(|r| r.contains(c)) {
            CharClass::CombiningMark
        } else {
            CharClass::Other
        }
    }

    #[inline(always)]
    pub fn is_consonant(&self, c: char) -> bool {
        self.consonants.contains(c)
    }

    #[inline(always)]
    pub fn is_independent_vowel(&self, c: char) -> bool {
        self.independent_vowels.contains(c)
    }

    #[inline(always)]
    pub fn is_vowel_sign(&self, c: char) -> bool {
        self.vowel_signs.contains(c)
    }

    #[inline(always)]
    pub fn is_virama(&self, c: char) -> bool {
        c == self.virama
    }

    #[inline(always)]
    pub fn is_pre_base(&self, c: char) -> bool {
        c == self.pre_base_sign
    }

    /// Cheap pre-check: can `text` contain any codepoint of this script?
    ///
    /// A `memchr` scan for the block's lead byte rejects most non-script
    /// text without decoding it.
    #[inline]
    pub fn touches(&self, text: &str) -> bool {
        memchr::memchr(self.lead_byte, text.as_bytes()).is_some()
            && text.chars().any(|c| self.block.contains(c))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("duplicate combination key `{base}` + `{sign}`")]
    DuplicatePair { base: char, sign: char },

    #[error("combination `{base}` + `{sign}` -> `{to}` produces a codepoint that is itself part of a key")]
    SelfTriggering { base: char, sign: char, to: char },
}

/// Validated vowel-combination table.
///
/// Keys are disjoint from values: no combined letter may appear as the base
/// or the sign of any key, so a combination can never feed another one.
#[derive(Debug, Clone, Copy)]
pub struct CombinationTable {
    entries: &'static [VowelCombination],
}

impl CombinationTable {
    pub fn new(entries: &'static [VowelCombination]) -> Result<Self, TableError> {
        for (i, e) in entries.iter().enumerate() {
            if entries[..i]
                .iter()
                .any(|p| p.base == e.base && p.sign == e.sign)
            {
                return Err(TableError::DuplicatePair {
                    base: e.base,
                    sign: e.sign,
                });
            }
            if entries.iter().any(|k| k.base == e.to || k.sign == e.to) {
                return Err(TableError::SelfTriggering {
                    base: e.base,
                    sign: e.sign,
                    to: e.to,
                });
            }
        }
        Ok(Self { entries })
    }

    pub const fn empty() -> Self {
        Self { entries: &[] }
    }

    #[inline(always)]
    pub fn lookup(&self, a: char, b: char) -> Option<char> {
        self.entries
            .iter()
            .find(|e| e.base == a && e.sign == b)
            .map(|e| e.to)
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &'static [VowelCombination] {
        self.entries
    }
}
