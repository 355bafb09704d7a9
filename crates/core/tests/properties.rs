//! Property-based tests using proptest
//!
//! Invariants that should hold for any input:
//! - confidence is always an integer percentage, capped at 95 for scaled values
//! - every normaliser is idempotent
//! - validation is deterministic and never loses the crisis message to length rules
//! - sanitised text never contains angle brackets

use proptest::prelude::*;
use serde_json::{json, Value};

use symptom_core::normalise::{
    normalise_confidence_value, normalise_severity_value, urgency_tier_value,
};
use symptom_core::{
    format_entities, normalise_confidence, normalise_severity, sanitise, urgency_tier, validate,
    ValidationIssue,
};

fn arbitrary_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        (-1.0e6f64..1.0e6).prop_map(|f| json!(f)),
        "\\PC{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(2, 16, 4, |inner| {
        prop::collection::vec(inner, 0..6).prop_map(Value::Array)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Scaled confidence never exceeds 95
    #[test]
    fn prop_scaled_confidence_is_capped(raw in 100.000_001f64..1.0e12) {
        let percent = normalise_confidence(Some(raw));
        prop_assert!(percent.value() <= 95);
        prop_assert!(percent.to_string().ends_with('%'));
    }

    /// In-range confidence is rounded and kept
    #[test]
    fn prop_in_range_confidence_is_rounded(raw in 0.0f64..=100.0) {
        let percent = normalise_confidence(Some(raw));
        prop_assert_eq!(f64::from(percent.value()), raw.round());
        prop_assert_eq!(percent.to_string(), format!("{}%", raw.round() as u8));
    }

    /// Any finite confidence lands in [0, 100]
    #[test]
    fn prop_confidence_is_bounded(raw in any::<f64>()) {
        prop_assert!(normalise_confidence(Some(raw)).value() <= 100);
    }

    /// Feeding normalised confidence back in is a fixed point
    #[test]
    fn prop_confidence_is_idempotent(raw in arbitrary_json()) {
        let once = normalise_confidence_value(&raw);
        let twice = normalise_confidence_value(&json!(once.to_string()));
        prop_assert_eq!(once, twice);
    }

    /// Feeding normalised severity back in is a fixed point
    #[test]
    fn prop_severity_is_idempotent(raw in arbitrary_json()) {
        let once = normalise_severity_value(&raw);
        let twice = normalise_severity(Some(once.as_str()));
        prop_assert_eq!(once, twice);
    }

    /// Urgency tiers are monotonic in the score
    #[test]
    fn prop_urgency_is_monotonic(a in -20.0f64..20.0, b in -20.0f64..20.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(urgency_tier(Some(low)) <= urgency_tier(Some(high)));
    }

    /// Urgency from JSON never panics and is deterministic
    #[test]
    fn prop_urgency_value_is_deterministic(raw in arbitrary_json()) {
        prop_assert_eq!(urgency_tier_value(&raw), urgency_tier_value(&raw));
    }

    /// Entity formatting respects the cap and is idempotent
    #[test]
    fn prop_entities_are_capped_and_idempotent(raw in arbitrary_json(), cap in 1usize..8) {
        let once = format_entities(&raw, cap);
        prop_assert!(once.len() <= cap);
        prop_assert!(once.iter().all(|e| !e.is_empty() && e.trim() == e));

        let twice = format_entities(&json!(once), cap);
        prop_assert_eq!(once, twice);
    }

    /// Sanitised text never contains angle brackets and is a fixed point
    #[test]
    fn prop_sanitise_removes_brackets(text in "\\PC{0,200}") {
        let clean = sanitise(&text);
        prop_assert!(!clean.contains('<') && !clean.contains('>'));
        prop_assert_eq!(sanitise(&clean), clean.clone());
    }

    /// Validation is deterministic and word count matches the trimmed text
    #[test]
    fn prop_validation_is_deterministic(text in "\\PC{1,60}", min in 0usize..20, extra in 0usize..40) {
        let max = min + extra;
        let first = validate(Some(&text), min, max);
        let second = validate(Some(&text), min, max);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.word_count, Some(text.split_whitespace().count()));
        prop_assert_eq!(first.is_valid, first.errors.is_empty());
    }

    /// The crisis message survives length violations
    #[test]
    fn prop_crisis_message_survives_length_rules(prefix in "[a-z ]{0,30}", max in 0usize..10) {
        let text = format!("{prefix} kill myself");
        let verdict = validate(Some(&text), 0, max);
        prop_assert!(verdict.issues.contains(&ValidationIssue::CrisisContentDetected));
    }
}
