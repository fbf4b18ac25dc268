//! Property tests for validation, path access and envelope rendering.

use proptest::prelude::*;
use serde_json::{json, Map, Value};
use usecase_core::{validate, MissingReason, PathAccessor, Response, Schema, StatusCode};

fn arb_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{1,6}").unwrap()
}

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::from),
    ]
}

fn arb_code() -> impl Strategy<Value = StatusCode> {
    prop::sample::select(StatusCode::ALL.to_vec())
}

fn payload_from(keys: &[String], value: &Value) -> Map<String, Value> {
    keys.iter().map(|key| (key.clone(), value.clone())).collect()
}

proptest! {
    /// Every payload key the schema does not declare is reported, in payload order.
    #[test]
    fn proptest_unauthorized_keys_are_exactly_undeclared(
        declared in prop::collection::btree_set(arb_key(), 0..8),
        sent in prop::collection::btree_set(arb_key(), 0..8),
        value in arb_leaf(),
    ) {
        let schema = declared
            .iter()
            .fold(Schema::new(), |schema, key| schema.optional(key.clone()));
        let keys: Vec<String> = sent.iter().cloned().collect();
        let payload = payload_from(&keys, &value);

        let result = validate(&schema, &payload);
        let expected: Vec<String> = keys
            .iter()
            .filter(|key| !declared.contains(*key))
            .cloned()
            .collect();

        prop_assert_eq!(result.unauthorized_fields(), expected.as_slice());
    }

    /// Every required leaf the payload lacks is reported as required, in declaration order.
    #[test]
    fn proptest_missing_keys_are_exactly_absent_required(
        required in prop::collection::btree_set(arb_key(), 0..8),
        present_mask in prop::collection::vec(any::<bool>(), 8),
    ) {
        let schema = required
            .iter()
            .fold(Schema::new(), |schema, key| schema.required(key.clone()));
        let present: Vec<String> = required
            .iter()
            .zip(present_mask.iter())
            .filter(|(_, keep)| **keep)
            .map(|(key, _)| key.clone())
            .collect();
        let payload = payload_from(&present, &json!(1));

        let result = validate(&schema, &payload);
        prop_assert!(result.unauthorized_fields().is_empty());

        let expected: Vec<&String> = required.iter().filter(|key| !present.contains(*key)).collect();
        let missing: Vec<&String> = result.missing_fields().keys().collect();
        prop_assert_eq!(missing, expected);
        prop_assert!(result
            .missing_fields()
            .values()
            .all(|reason| *reason == MissingReason::Required));
    }

    /// A scalar under a nested spec is one mismatch report and nothing deeper.
    #[test]
    fn proptest_scalar_under_nested_spec_is_single_mismatch(
        parent in arb_key(),
        children in prop::collection::btree_set(arb_key(), 1..6),
        value in arb_leaf(),
    ) {
        let child = children
            .iter()
            .fold(Schema::new(), |schema, key| schema.required(key.clone()));
        let schema = Schema::new().nested(parent.clone(), child);
        let payload = payload_from(&[parent.clone()], &value);

        let result = validate(&schema, &payload);
        prop_assert_eq!(result.missing_fields().len(), 1);
        prop_assert_eq!(result.missing_fields().get(&parent), Some(&MissingReason::TypeMismatch));
        prop_assert!(result.unauthorized_fields().is_empty());
    }

    /// Reading back a value stored at a dotted path yields that value.
    #[test]
    fn proptest_accessor_identity(
        segments in prop::collection::vec(arb_key(), 1..5),
        value in arb_leaf(),
    ) {
        let tree = segments
            .iter()
            .rev()
            .fold(value.clone(), |inner, key| {
                let mut node = Map::new();
                node.insert(key.clone(), inner);
                Value::Object(node)
            });
        let path = segments.join(".");

        prop_assert_eq!(PathAccessor::new().get(&tree, &path), Some(&value));
    }

    /// An unresolvable path yields the default.
    #[test]
    fn proptest_accessor_default(
        keys in prop::collection::btree_set(arb_key(), 0..6),
        probe in "[0-9]{1,3}[a-z]{0,3}",
    ) {
        let tree = Value::Object(payload_from(&keys.iter().cloned().collect::<Vec<_>>(), &json!(1)));
        let default = json!("default");

        prop_assert_eq!(PathAccessor::new().get_or(&tree, &probe, &default), &default);
    }

    /// Output carries data on success and details on failure, never both.
    #[test]
    fn proptest_output_data_details_exclusive(
        success in any::<bool>(),
        code in arb_code(),
        message in prop::option::of("[a-z.]{1,20}"),
        keys in prop::collection::btree_set(arb_key(), 0..5),
    ) {
        let data = payload_from(&keys.iter().cloned().collect::<Vec<_>>(), &json!(true));
        let response = Response::create(success, code, message, data);
        let output = response.output();

        prop_assert_eq!(output.get("data").is_some(), success);
        prop_assert_eq!(output.get("details").is_some(), !success);
        prop_assert_eq!(&output["code"], &json!(code.as_u16()));
        prop_assert_eq!(output, response.output());
    }
}

