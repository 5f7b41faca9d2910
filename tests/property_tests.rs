//! Property-based tests for the core round-trip guarantees.
//!
//! These complement the integration tests by checking the same properties
//! across generated inputs: decode(encode(v)) == v and idempotence of
//! encode over a decode.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_tueson::{from_str, to_string, Map, Value};

fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(
    value: &T,
) -> bool {
    match to_string(value) {
        Ok(encoded) => match from_str::<T>(&encoded) {
            Ok(decoded) => *value == decoded,
            Err(e) => {
                eprintln!("Decode failed: {}", e);
                eprintln!("Encoded was: {}", encoded);
                false
            }
        },
        Err(e) => {
            eprintln!("Encode failed: {}", e);
            false
        }
    }
}

/// Strings whose block spelling survives the round trip. A multi-line
/// string with an interior line made only of spaces decodes that line as
/// blank (a known quirk of the format); everything else round-trips.
fn block_safe(s: &str) -> bool {
    let body = s.trim_end_matches('\n');
    let lines: Vec<&str> = body.split('\n').collect();
    if lines.len() == 1 {
        return true;
    }
    let carry = body.len() < s.len();
    lines.iter().enumerate().all(|(i, line)| {
        (carry && i == lines.len() - 1)
            || line.is_empty()
            || !line.chars().all(|c| c == ' ')
    })
}

fn text_strategy() -> impl Strategy<Value = String> {
    any::<String>().prop_filter("whitespace-only interior line", |s| block_safe(s))
}

fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z][A-Za-z0-9_]{0,8}",
        any::<String>().prop_map(|s| format!("k {}", s)),
    ]
}

fn value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| Value::Number(n as f64)),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(Value::Number),
        text_strategy().prop_map(Value::Text),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
            prop::collection::btree_map(key_strategy(), inner, 0..4)
                .prop_map(|m| Value::Record(m.into_iter().collect::<Map>())),
        ]
    })
}

proptest! {
    #[test]
    fn prop_i32(n in any::<i32>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_i64_in_f64_range(n in -(1i64 << 53)..(1i64 << 53)) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_finite_f64(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        prop_assert!(roundtrip(&f));
    }

    #[test]
    fn prop_bool(b in any::<bool>()) {
        prop_assert!(roundtrip(&b));
    }

    #[test]
    fn prop_ascii_text(s in "[ -~\\r\\n\\t]{0,60}") {
        prop_assume!(block_safe(&s));
        prop_assert!(roundtrip(&s));
    }

    #[test]
    fn prop_unicode_text(s in text_strategy()) {
        prop_assert!(roundtrip(&s));
    }

    #[test]
    fn prop_trailing_newline_runs(s in "[a-z]{1,5}", n in 0usize..4) {
        let text = format!("{}{}", s, "\n".repeat(n));
        prop_assert!(roundtrip(&text));
    }

    #[test]
    fn prop_vec_i32(v in prop::collection::vec(any::<i32>(), 0..20)) {
        prop_assert!(roundtrip(&v));
    }

    #[test]
    fn prop_option_i32(opt in proptest::option::of(any::<i32>())) {
        prop_assert!(roundtrip(&opt));
    }

    #[test]
    fn prop_value_trees(value in value_strategy()) {
        prop_assert!(roundtrip(&value));
    }

    #[test]
    fn prop_encode_idempotent(value in value_strategy()) {
        let once = to_string(&value).unwrap();
        let decoded: Value = from_str(&once).unwrap();
        prop_assert_eq!(to_string(&decoded).unwrap(), once);
    }

    #[test]
    fn prop_encoded_docs_end_with_newline(value in value_strategy()) {
        let doc = to_string(&value).unwrap();
        prop_assert!(doc.ends_with('\n'));
    }
}
