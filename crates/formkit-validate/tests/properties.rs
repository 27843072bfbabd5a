//! Property tests for the validation rules.

use formkit_validate::{REQUIRED_MESSAGE, RuleKind, validate, validate_email};
use proptest::prelude::*;

fn any_rule() -> impl Strategy<Value = RuleKind> {
    prop_oneof![
        Just(RuleKind::required()),
        (0usize..20, 20usize..200).prop_map(|(min, max)| RuleKind::text(min, max)),
        Just(RuleKind::Email),
        Just(RuleKind::SelectRequired),
        Just(RuleKind::one_of(&["low", "high"])),
        Just(RuleKind::Phone),
        Just(RuleKind::Password),
        Just(RuleKind::Amount { min: 1.0 }),
        Just(RuleKind::optional(RuleKind::Phone)),
    ]
}

proptest! {
    #[test]
    fn whitespace_fails_required_text(ws in "[ \t\n]{0,12}", min in 0usize..5) {
        let result = validate(&RuleKind::RequiredText { min: Some(min), max: None }, &ws);
        prop_assert!(!result.is_valid());
        prop_assert_eq!(result.message(), REQUIRED_MESSAGE);
    }

    #[test]
    fn text_within_bounds_passes(text in "[a-zA-Z][a-zA-Z ]{0,30}[a-zA-Z]") {
        let len = text.chars().count();
        prop_assert!(validate(&RuleKind::text(len, len), &text).is_valid());
    }

    #[test]
    fn every_rule_gives_a_message_on_failure(rule in any_rule(), raw in ".{0,40}") {
        let result = validate(&rule, &raw);
        prop_assert_eq!(result.is_valid(), result.message().is_empty());
    }

    #[test]
    fn simple_addresses_are_valid(
        local in "[a-z0-9._]{1,12}",
        domain in "[a-z0-9-]{1,12}",
        tld in "[a-z]{2,6}",
    ) {
        let address = format!("{local}@{domain}.{tld}");
        prop_assert!(validate_email(&address).is_valid());
    }

    #[test]
    fn addresses_with_spaces_are_invalid(a in "[a-z]{1,5}", b in "[a-z]{1,5}") {
        let address = format!("{a} {b}@example.com");
        prop_assert!(!validate_email(&address).is_valid());
    }
}
