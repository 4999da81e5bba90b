#[cfg(test)]
mod prop_tests {
    use crate::{Converter, MappingRule, Normalizer, convert, normalize};
    use proptest::prelude::*;
    use std::borrow::Cow;
    use unicode_normalization::UnicodeNormalization;

    // Consonants, અ/આ, virama, i-matra, other signs, nukta, anusvara and a
    // few foreign codepoints, weighted towards the sequences the passes
    // rewrite.
    const GUJARATI_HEAVY: &str =
        "[કખગષતધબરઅઆાિીુેૈોૌ\u{0ACD}\u{0ACD}\u{0ABF}\u{0ABC}\u{0A82}a \u{0301}]{0,64}";

    proptest! {
        #[test]
        fn normalize_idempotent_gujarati(s in GUJARATI_HEAVY) {
            let once = normalize(&s);
            let twice = normalize(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn normalize_idempotent_any(s in ".{0,200}") {
            let once = normalize(&s);
            let twice = normalize(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn non_script_text_is_plain_nfc(
            s in "[a-zA-Z0-9 .,\u{00C0}-\u{00FF}\u{0300}-\u{036F}\u{0915}-\u{0939}\u{093C}\u{094D}]{0,100}"
        ) {
            let expected: String = s.nfc().collect();
            prop_assert_eq!(normalize(&s), expected);
        }

        #[test]
        fn canonical_output_is_borrowed(s in GUJARATI_HEAVY) {
            let n = Normalizer::default();
            let once = n.normalize(s.as_str()).into_owned();
            let again = n.normalize(once.as_str());
            prop_assert!(matches!(again, Cow::Borrowed(b) if b.as_ptr() == once.as_ptr()));
        }

        #[test]
        fn convert_output_is_normalized(s in "[sakq િા]{0,64}") {
            let rules = [
                MappingRule::new("s", "ક").unwrap(),
                MappingRule::new("a", "અ").unwrap(),
                MappingRule::new("q", "ા").unwrap(),
            ];
            let out = convert(&s, &rules);
            prop_assert_eq!(normalize(&out), out);
        }

        #[test]
        fn rule_order_decides_the_winner(s in "[xyz]{1,32}") {
            let a = MappingRule::new("x", "ક").unwrap();
            let b = MappingRule::new("x", "ખ").unwrap();
            let first = convert(&s, &[a.clone(), b.clone()]);
            let second = convert(&s, &[b, a]);
            prop_assert!(!first.contains('ખ'));
            prop_assert!(!second.contains('ક'));
            prop_assert_eq!(first.chars().count(), second.chars().count());
        }

        #[test]
        fn inactive_rules_change_nothing(s in "[a-z ]{0,64}") {
            let conv = Converter::builder()
                .rule(MappingRule::new("a", "અ").unwrap().inactive())
                .build();
            prop_assert_eq!(conv.convert(s.as_str()), s.as_str());
            prop_assert_eq!(conv.rules_applied(), 0);
        }

        #[test]
        fn case_sensitive_rule_ignores_other_case(s in "[A-Z ]{0,64}") {
            let rules = [MappingRule::new("a", "અ").unwrap()];
            prop_assert_eq!(convert(&s, &rules), s);
        }
    }
}
