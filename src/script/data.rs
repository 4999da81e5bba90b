use crate::script::{CodeRange, Script, ScriptEntry, VowelCombination};

use phf::{Map, phf_map};

/// ---------------------------------------------------------------------------
///    Macro – generates the public `Script` constants, the per-script
///    combination slices and the global lookup table from a single listing
/// ---------------------------------------------------------------------------
macro_rules! define_scripts {
($(
        $code:ident, $code_str:literal, $name:literal,
        block: $bstart:literal ..= $bend:literal, lead: $lead:literal,
        consonants: $cstart:literal ..= $cend:literal,
        vowels: $vstart:literal ..= $vend:literal,
        signs: $sstart:literal ..= $send:literal,
        marks: [ $( $mstart:literal ..= $mend:literal ),* $(,)? ],
        virama: $virama:literal,
        pre_base: $pre_base:literal,
        combine: [ $( ($base:literal, $sign:literal => $to:literal) ),* $(,)? ]
    ),* $(,)?) => {
        $(
            pub const $code: Script = Script { code: $code_str, name: $name };
        )*

        pub static SCRIPT_TABLE: Map<&'static str, ScriptEntry> = phf_map! {
            $(
                $code_str => ScriptEntry {
                    block: CodeRange { start: $bstart, end: $bend },
                    lead_byte: $lead,
                    consonants: CodeRange { start: $cstart, end: $cend },
                    independent_vowels: CodeRange { start: $vstart, end: $vend },
                    vowel_signs: CodeRange { start: $sstart, end: $send },
                    combining_marks: &[$( CodeRange { start: $mstart, end: $mend } ),*],
                    virama: $virama,
                    pre_base_sign: $pre_base,
                    combinations: &[
                        $( VowelCombination { base: $base, sign: $sign, to: $to } ),*
                    ],
                }
            ),*
        };

        static ALL_SCRIPTS: &[Script] = &[$($code),*];

        pub fn all_scripts() -> &'static [Script] {
            ALL_SCRIPTS
        }
    };
}

// ---------------------------------------------------------------------------
//    Script definitions
//    Gujarati: `અ + િ → ઇ` is intentionally absent. Combining it rewrote
//    legacy-order input such as `અ િ ધ ક ા ર ી` into `ઇધકારી` instead of
//    letting the i-matra move onto `ધ` (`અધિકારી`).
// ---------------------------------------------------------------------------
define_scripts! {
    GUJARATI, "GUJR", "Gujarati",
    block: '\u{0A80}'..='\u{0AFF}', lead: 0xE0,
    consonants: '\u{0A95}'..='\u{0AB9}',
    vowels: '\u{0A85}'..='\u{0A94}',
    signs: '\u{0ABE}'..='\u{0ACD}',
    marks: [
        '\u{0A81}'..='\u{0A83}', // candrabindu, anusvara, visarga
        '\u{0ABC}'..='\u{0ABC}', // nukta
        '\u{0AFA}'..='\u{0AFF}',
    ],
    virama: '\u{0ACD}',
    pre_base: '\u{0ABF}',
    combine: [
        ('\u{0A85}', '\u{0ABE}' => '\u{0A86}'), // અ + ા = આ
        ('\u{0A85}', '\u{0AC0}' => '\u{0A88}'), // અ + ી = ઈ
        ('\u{0A85}', '\u{0AC1}' => '\u{0A89}'), // અ + ુ = ઉ
        ('\u{0A85}', '\u{0AC2}' => '\u{0A8A}'), // અ + ૂ = ઊ
        ('\u{0A85}', '\u{0AC3}' => '\u{0A8B}'), // અ + ૃ = ઋ
        ('\u{0A85}', '\u{0AC4}' => '\u{0A8C}'), // અ + ૄ = ઌ
        ('\u{0A85}', '\u{0AC7}' => '\u{0A8F}'), // અ + ે = એ
        ('\u{0A85}', '\u{0AC8}' => '\u{0A90}'), // અ + ૈ = ઐ
        ('\u{0A85}', '\u{0ACB}' => '\u{0A93}'), // અ + ો = ઓ
        ('\u{0A85}', '\u{0ACC}' => '\u{0A94}'), // અ + ૌ = ઔ
    ],
}
