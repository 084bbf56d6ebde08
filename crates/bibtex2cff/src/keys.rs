//! Key-convention rewriting
//!
//! Records are keyed in underscore-case internally; the citation file uses
//! hyphen-case. Only mapping keys are rewritten, values pass through as-is.

use serde_json::{Map, Value};

/// Return a copy of `value` with `from` replaced by `to` in every mapping key
pub fn rename_keys(value: &Value, from: char, to: char) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, nested)| {
                    (
                        key.replace(from, &to.to_string()),
                        rename_keys(nested, from, to),
                    )
                })
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| rename_keys(item, from, to))
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}

/// Rewrite underscore keys to hyphen keys
pub fn to_hyphen_case(value: &Value) -> Value {
    rename_keys(value, '_', '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_nested_keys_are_rewritten() {
        let value = json!({
            "cff_version": "1.2.0",
            "author": [{"family_name": "Doe", "given_name": "John"}],
            "identifiers": [{"type": "doi", "value": "snake_case_value"}],
            "date_released": "2024-01-01"
        });
        assert_eq!(
            to_hyphen_case(&value),
            json!({
                "cff-version": "1.2.0",
                "author": [{"family-name": "Doe", "given-name": "John"}],
                "identifiers": [{"type": "doi", "value": "snake_case_value"}],
                "date-released": "2024-01-01"
            })
        );
    }

    #[test]
    fn test_key_order_is_preserved() {
        let value = json!({"z_last": 1, "a_first": 2});
        let keys: Vec<String> = match to_hyphen_case(&value) {
            Value::Object(map) => map.keys().cloned().collect(),
            _ => unreachable!(),
        };
        assert_eq!(keys, vec!["z-last", "a-first"]);
    }

    #[test]
    fn test_input_is_untouched() {
        let value = json!({"repository_code": "https://example.com/"});
        let _ = to_hyphen_case(&value);
        assert!(value.get("repository_code").is_some());
    }

    fn nested_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            "[a-z_]{0,8}".prop_map(Value::String),
            any::<i64>().prop_map(Value::from),
            any::<bool>().prop_map(Value::Bool),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z_]{1,8}", inner, 0..4)
                    .prop_map(|map| Value::Object(map.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn second_pass_changes_nothing(value in nested_value()) {
            let once = to_hyphen_case(&value);
            prop_assert_eq!(to_hyphen_case(&once), once);
        }
    }
}
