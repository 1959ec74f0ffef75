//! Property-based tests for the codec invariants.

use proptest::prelude::*;
use toon_core::{decode, encode, encode_with_options, toon, EncodeOptions, Map, Number, Value};

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|i| Value::Number(Number::Integer(i))),
        (-1.0e12f64..1.0e12f64).prop_map(|f| Value::Number(Number::Float(f))),
        "[ -~]{0,16}".prop_map(Value::String),
        any::<String>().prop_map(Value::String),
    ]
}

// Mostly plain keys, with a share carrying the characters that force
// key and column quoting (colons, commas, quotes, backslashes, dashes).
fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{0,6}",
        "[a-z:,. \"\\\\-]{1,8}",
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::vec((arb_key(), inner), 0..5).prop_map(|entries| {
                let mut map = Map::new();
                for (key, value) in entries {
                    map.insert(key, value);
                }
                Value::Object(map)
            }),
        ]
    })
}

proptest! {
    #[test]
    fn round_trip(value in arb_value()) {
        let text = encode(&value).unwrap();
        let back = decode(&text).unwrap();
        prop_assert_eq!(back, value);
    }

    #[test]
    fn round_trip_with_all_options(value in arb_value()) {
        let options = EncodeOptions::new()
            .with_indent(4)
            .with_inline_arrays(true)
            .with_length_markers(true);
        let text = encode_with_options(&value, &options).unwrap();
        let back = decode(&text).unwrap();
        prop_assert_eq!(back, value);
    }

    #[test]
    fn re_encode_is_idempotent(value in arb_value()) {
        let first = encode(&value).unwrap();
        let second = encode(&decode(&first).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn integers_survive_exactly(i in any::<i64>()) {
        let value = toon!({"n" => (i)});
        let back = decode(&encode(&value).unwrap()).unwrap();
        prop_assert_eq!(back.as_object().unwrap().get("n").unwrap().as_i64(), Some(i));
    }

    #[test]
    fn finite_floats_survive_exactly(f in prop::num::f64::NORMAL | prop::num::f64::SUBNORMAL | prop::num::f64::ZERO) {
        let value = toon!({"f" => (f)});
        let back = decode(&encode(&value).unwrap()).unwrap();
        let object = back.as_object().unwrap();
        prop_assert_eq!(object.get("f"), Some(&Value::Number(Number::Float(f))));
    }

    #[test]
    fn arbitrary_strings_survive(s in any::<String>()) {
        let value = toon!({"s" => (s.as_str())});
        let back = decode(&encode(&value).unwrap()).unwrap();
        prop_assert_eq!(back.as_object().unwrap().get("s").unwrap().as_str(), Some(s.as_str()));
    }

    #[test]
    fn arbitrary_keys_survive(key in any::<String>()) {
        let mut map = Map::new();
        map.insert(key.clone(), Value::from(1));
        let value = Value::Object(map);
        let back = decode(&encode(&value).unwrap()).unwrap();
        prop_assert_eq!(back.as_object().unwrap().get(&key).and_then(Value::as_i64), Some(1));
    }

    #[test]
    fn uniform_tables_round_trip(rows in prop::collection::vec((any::<i64>(), "[a-zA-Z]{1,8}"), 1..20)) {
        let elements: Vec<Value> = rows
            .iter()
            .map(|(id, name)| toon!({"id" => (*id), "name" => (name.as_str())}))
            .collect();
        let value = Value::Array(elements);
        let text = encode(&value).unwrap();
        // Uniform flat rows collapse to header + one line per row.
        prop_assert_eq!(text.lines().count(), rows.len() + 1);
        prop_assert_eq!(decode(&text).unwrap(), value);
    }

    #[test]
    fn decode_never_panics(input in "[ -~\\n]{0,200}") {
        let _ = decode(&input);
    }
}
