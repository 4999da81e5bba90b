use crate::{script::Script, stage::Stage};

/// Trait that stages implement to opt into the universal test suite.
pub trait StageTestConfig: Stage + Sized {
    /// General test samples (may or may not trigger changes)
    fn samples(_script: Script) -> &'static [&'static str] {
        &["Hello World 123", " déjà-vu ", "કિતાબ", ""]
    }

    /// Samples that must come back unchanged and still borrowed.
    fn should_pass_through(_script: Script) -> &'static [&'static str] {
        &["hello", "world", "test123", "abc def", ""]
    }

    /// Input/output pairs with a known result.
    fn should_transform(_script: Script) -> &'static [(&'static str, &'static str)] {
        &[]
    }
}

/// Assert that a stage satisfies the universal stage contracts:
///
/// 1. `zero_copy_when_no_changes` → no allocation when input == output
/// 2. `stage_is_idempotent` → applying twice yields same result as once
/// 3. `needs_apply_is_accurate` → correctly predicts whether apply() would change text
/// 4. `handles_empty_string_and_ascii` → graceful on edge cases
/// 5. `no_panic_on_mixed_scripts` → survives arbitrary real-world input
#[macro_export]
macro_rules! assert_stage_contract {
    ($stage:expr) => {{
        let stage = $stage;
        $crate::testing::stage_contract::zero_copy_when_no_changes(&stage);
        $crate::testing::stage_contract::stage_is_idempotent(&stage);
        $crate::testing::stage_contract::needs_apply_is_accurate(&stage);
        $crate::testing::stage_contract::handles_empty_string_and_ascii(&stage);
        $crate::testing::stage_contract::no_panic_on_mixed_scripts(&stage);
    }};
}

// ============================================================================
// Universal contract tests
// ============================================================================

#[cfg(test)]
use crate::{context::Context, script::all_scripts};
#[cfg(test)]
use std::borrow::Cow;

#[cfg(test)]
pub fn zero_copy_when_no_changes<S: StageTestConfig>(stage: &S) {
    for &script in all_scripts() {
        let ctx = Context::new(script);

        for &input in S::samples(script) {
            let mut text = Cow::Borrowed(input);

            // First pass – respect needs_apply
            if stage.needs_apply(&text, &ctx) {
                let old_ptr = text.as_ref() as *const str;
                text = stage.apply(text, &ctx);
                assert_ne!(
                    old_ptr,
                    text.as_ref() as *const str,
                    "`{}` claimed work but returned the input (script: {script}, input: `{input}`)",
                    stage.name()
                );
            } else {
                assert_eq!(input as *const str, text.as_ref() as *const str);
            }

            // Second pass – must never allocate again
            let old_ptr = text.as_ref() as *const str;
            if stage.needs_apply(&text, &ctx) {
                text = stage.apply(text, &ctx);
            }
            assert_eq!(
                old_ptr,
                text.as_ref() as *const str,
                "zero-copy violated on second pass (script: {script}, input: `{input}`)"
            );
        }

        for &pass_through in S::should_pass_through(script) {
            let mut text = Cow::Borrowed(pass_through);
            let original_ptr = pass_through as *const str;

            if stage.needs_apply(&text, &ctx) {
                text = stage.apply(text, &ctx);
            }

            assert_eq!(text.as_ref(), pass_through);
            assert_eq!(
                original_ptr,
                text.as_ref() as *const str,
                "zero-copy violated on pass-through sample (script: {script}, input: `{pass_through}`)"
            );
        }

        for &(input, expected) in S::should_transform(script) {
            let mut text = Cow::Borrowed(input);
            if stage.needs_apply(&text, &ctx) {
                text = stage.apply(text, &ctx);
            }
            assert_eq!(
                text.as_ref(),
                expected,
                "`{}` on `{input}` (script: {script})",
                stage.name()
            );
        }
    }
}

#[cfg(test)]
pub fn stage_is_idempotent<S: StageTestConfig>(stage: &S) {
    for &script in all_scripts() {
        let ctx = Context::new(script);
        let transformed = S::should_transform(script).iter().map(|&(i, _)| i);
        for input in S::samples(script).iter().copied().chain(transformed) {
            let once = stage.apply(Cow::Borrowed(input), &ctx);
            let twice = stage.apply(once.clone(), &ctx);
            assert_eq!(
                once,
                twice,
                "`{}` not idempotent in {script} on `{input}`",
                stage.name()
            );
        }
    }
}

#[cfg(test)]
pub fn needs_apply_is_accurate<S: StageTestConfig>(stage: &S) {
    for &script in all_scripts() {
        let ctx = Context::new(script);
        for &sample in S::samples(script) {
            check_accuracy(stage, sample, &ctx);
        }
        // Characters no stage is allowed to touch
        let must_not_touch = ["", "hello", "world123", " !@#"];
        for clean in must_not_touch {
            check_accuracy(stage, clean, &ctx);
        }
    }
}

#[cfg(test)]
#[inline(always)]
fn check_accuracy<S: Stage>(stage: &S, input: &str, ctx: &Context) {
    let predicted = stage.needs_apply(input, ctx);
    // Owned input, so stages that always rebuild are judged on content only
    let output = stage.apply(Cow::Owned(input.to_owned()), ctx);
    let actually_changes = output != input;
    assert_eq!(
        predicted,
        actually_changes,
        "needs_apply() mismatch for stage `{}` in {script} on `{input}`\n\
         predicted: {predicted}\n\
         actual   : {actually_changes} (output = {output:?})",
        stage.name(),
        script = ctx.script
    );
}

#[cfg(test)]
pub fn handles_empty_string_and_ascii<S: StageTestConfig>(stage: &S) {
    let ctx = Context::default();
    let empty: &str = "";
    let result_empty = if stage.needs_apply(empty, &ctx) {
        stage.apply(Cow::Borrowed(empty), &ctx)
    } else {
        Cow::Borrowed(empty)
    };
    assert_eq!(result_empty.as_ref(), "");

    let ascii = "hello world 123 !@#";
    let result_ascii = stage.apply(Cow::Borrowed(ascii), &ctx);
    assert_eq!(result_ascii.as_ref(), ascii);
}

#[cfg(test)]
pub fn no_panic_on_mixed_scripts<S: StageTestConfig>(stage: &S) {
    let ctx = Context::default();
    for input in [
        "Hello 世界 русский Türkçe العربية 简体中文",
        "ગુજરાતી નમસ્તે ક્ષ િ ્ ા",
        "\u{0ABF}\u{0ACD}\u{0ABC}\u{0A81}",
        "e\u{0301}\u{0ABF}ક\u{200D}",
    ] {
        let _ = stage.apply(Cow::Borrowed(input), &ctx);
    }
}
