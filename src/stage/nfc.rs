use crate::{
    context::Context,
    script::Script,
    stage::Stage,
    testing::stage_contract::StageTestConfig,
};
use icu_normalizer::{ComposingNormalizer, ComposingNormalizerBorrowed};
use std::{borrow::Cow, sync::LazyLock};

// ── ICU4X ──
static ICU4X_NFC: LazyLock<ComposingNormalizerBorrowed> =
    LazyLock::new(ComposingNormalizer::new_nfc);

/// Unicode Normalization Form C (canonical composition).
///
/// Runs first and last in the script normalizer: any base + mark pair that
/// already has a precomposed codepoint is collapsed before the script passes
/// look at the text.
#[derive(Default, Clone, Copy)]
pub struct Nfc;

pub const NFC: Nfc = Nfc;

/// `true` when `text` is already in NFC.
#[inline(always)]
pub fn is_nfc(text: &str) -> bool {
    ICU4X_NFC.is_normalized(text)
}

impl Stage for Nfc {
    fn name(&self) -> &'static str {
        "nfc"
    }

    #[inline(always)]
    fn needs_apply(&self, text: &str, _ctx: &Context) -> bool {
        !is_nfc(text)
    }

    #[inline(always)]
    fn apply<'a>(&self, text: Cow<'a, str>, _ctx: &Context) -> Cow<'a, str> {
        if is_nfc(&text) {
            return text;
        }
        Cow::Owned(ICU4X_NFC.normalize(text.as_ref()).into_owned())
    }
}

impl StageTestConfig for Nfc {
    fn samples(_script: Script) -> &'static [&'static str] {
        &["café", "cafe\u{0301}", "naïve", "કિતાબ", "Å", ""]
    }

    fn should_transform(_script: Script) -> &'static [(&'static str, &'static str)] {
        &[("cafe\u{0301}", "café"), ("A\u{030A}", "Å")]
    }
}
