use naming_engine::{build_valid, is_valid, sanitize, trim_name, LengthMeasure};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn measure_strategy() -> impl Strategy<Value = LengthMeasure> {
    prop_oneof![Just(LengthMeasure::Chars), Just(LengthMeasure::Utf8Bytes)]
}

proptest! {
    #[test]
    fn build_valid_always_yields_valid_names(input in any::<String>()) {
        prop_assert!(is_valid(&build_valid(&input)));
    }

    #[test]
    fn sanitize_is_total_and_bounded(
        input in any::<String>(),
        max in 5usize..300,
        measure in measure_strategy(),
    ) {
        let out = sanitize(&input, max, measure);
        prop_assert!(is_valid(&out), "{out:?} is not valid");
        prop_assert!(measure.of_str(&out) <= max, "{out:?} exceeds {max}");
    }

    #[test]
    fn sanitize_keeps_fitting_valid_names(input in "[a-zA-Z0-9 ._+,\u{3C0}-]{1,40}") {
        prop_assume!(is_valid(&input));
        prop_assert_eq!(sanitize(&input, 40, LengthMeasure::Chars), input);
    }

    #[test]
    fn trim_respects_budget_and_codepoints(
        input in "\\PC{0,80}",
        max in 0usize..60,
        measure in measure_strategy(),
    ) {
        let out = trim_name(&input, max, measure);
        prop_assert!(measure.of_str(&out) <= max);
        // The result is a `String`, so no codepoint was split.
        if measure.of_str(&input) > max && max > 3 {
            prop_assert!(out.contains("..."));
        }
    }

    #[test]
    fn short_extension_survives_roomy_trims(
        stem in "[a-z]{20,60}",
        ext in "[a-z]{1,4}",
        max in 12usize..20,
    ) {
        let name = format!("{stem}.{ext}");
        let out = trim_name(&name, max, LengthMeasure::Chars);
        let expected_tail = format!(".{ext}");
        prop_assert!(out.ends_with(&expected_tail));
        prop_assert_eq!(out.chars().count(), max);
    }
}

#[test]
fn sanitization_never_fails_on_degenerate_input() {
    for input in ["", ".", "..", "...", "/", "\\\\", "\0", "CON", "con.", "\u{1F600}", " "] {
        for max in [1, 2, 3, 4, 5, 16] {
            for measure in [LengthMeasure::Chars, LengthMeasure::Utf8Bytes] {
                let out = sanitize(input, max, measure);
                assert!(is_valid(&out), "{input:?}/{max}/{measure:?} gave {out:?}");
                assert!(!out.is_empty());
            }
        }
    }
}

#[test]
fn extensionless_ascii_trim_splits_deterministically() {
    let name = "abcdefghijklmnopqrstuvwxyz";
    let out = trim_name(name, 16, LengthMeasure::Chars);
    assert_eq!(out, "abcdef...tuvwxyz");
    assert_eq!(out, trim_name(name, 16, LengthMeasure::Chars));
}
