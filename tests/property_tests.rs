use cldrpack::navigator::{PruneSet, descend};
use cldrpack::plural_rules::PluralOperands;
use cldrpack::{PluralCategory, PluralRule, PluralRuleSet, to_positional};
use proptest::prelude::*;
use serde_json::{Value, json};

fn text_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z ,.%:'-]{0,20}").expect("valid text regex")
}

fn root_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        proptest::string::string_regex("[a-z][a-zA-Z]{0,8}").expect("valid root regex"),
        1..5,
    )
}

/// Wraps `payload` in single-key maps along `roots`.
fn wrap(roots: &[String], payload: Value) -> Value {
    roots
        .iter()
        .rev()
        .fold(payload, |inner, root| json!({ root.as_str(): inner }))
}

proptest! {
    #[test]
    fn placeholders_become_one_based(
        prefix in text_strategy(),
        index in 0u32..50,
        suffix in text_strategy(),
    ) {
        let pattern = format!("{}{{{}}}{}", prefix, index, suffix);
        let expected = format!(
            "{}%{}$s{}",
            prefix.replace('%', "%%"),
            index + 1,
            suffix.replace('%', "%%")
        );
        prop_assert_eq!(to_positional(&pattern), expected);
    }

    #[test]
    fn text_without_placeholders_only_escapes_percent(text in text_strategy()) {
        prop_assert_eq!(to_positional(&text), text.replace('%', "%%"));
    }

    #[test]
    fn descend_returns_the_wrapped_payload(roots in root_strategy(), value in "[a-z]{1,10}") {
        let payload = json!({"key": value});
        let data = wrap(&roots, payload.clone());
        let node = descend(data, &roots, &PruneSet::new(), "prop.json").unwrap();
        prop_assert_eq!(Value::Object(node), payload);
    }

    #[test]
    fn descend_rejects_an_extra_sibling(roots in root_strategy()) {
        let mut data = wrap(&roots, json!({}));
        data.as_object_mut().unwrap().insert("_extra".to_string(), json!(1));
        prop_assert!(descend(data, &roots, &PruneSet::new(), "prop.json").is_err());
    }

    #[test]
    fn russian_rules_select_like_the_textbook_definition(value in 0u64..100_000) {
        let rules = PluralRuleSet {
            rules: vec![
                PluralRule::parse(
                    PluralCategory::One,
                    "v = 0 and i % 10 = 1 and i % 100 != 11",
                )
                .unwrap(),
                PluralRule::parse(
                    PluralCategory::Few,
                    "v = 0 and i % 10 = 2..4 and i % 100 != 12..14",
                )
                .unwrap(),
                PluralRule::parse(
                    PluralCategory::Many,
                    "v = 0 and i % 10 = 0 or v = 0 and i % 10 = 5..9 or v = 0 and i % 100 = 11..14",
                )
                .unwrap(),
            ],
        };
        let expected = match (value % 10, value % 100) {
            (1, r) if r != 11 => PluralCategory::One,
            (2..=4, r) if !(12..=14).contains(&r) => PluralCategory::Few,
            _ => PluralCategory::Many,
        };
        prop_assert_eq!(rules.select(&PluralOperands::from(value)), expected);
    }
}
