use serde_tueson::{from_str, to_string, tueson, Map, Value};

#[test]
fn macro_null() {
    assert_eq!(tueson!(null), Value::Null);
}

#[test]
fn macro_booleans() {
    assert_eq!(tueson!(true), Value::Bool(true));
    assert_eq!(tueson!(false), Value::Bool(false));
}

#[test]
fn macro_numbers() {
    assert_eq!(tueson!(42), Value::Number(42.0));
    assert_eq!(tueson!(3.5), Value::Number(3.5));
    assert_eq!(tueson!(-123), Value::Number(-123.0));
}

#[test]
fn macro_strings() {
    assert_eq!(tueson!("hello world"), Value::Text("hello world".to_string()));
    assert_eq!(tueson!(""), Value::Text(String::new()));
}

#[test]
fn macro_lists() {
    assert_eq!(tueson!([]), Value::List(vec![]));

    let mixed = tueson!([1, "hello", true, null]);
    assert_eq!(
        mixed,
        Value::List(vec![
            Value::Number(1.0),
            Value::Text("hello".to_string()),
            Value::Bool(true),
            Value::Null,
        ])
    );
}

#[test]
fn macro_records() {
    assert_eq!(tueson!({}), Value::Record(Map::new()));

    let record = tueson!({
        "enabled": true,
        "retries": 3
    });
    let fields = record.as_record().expect("record");
    assert_eq!(fields.get("enabled"), Some(&Value::Bool(true)));
    assert_eq!(fields.get("retries"), Some(&Value::Number(3.0)));
}

#[test]
fn macro_nested_structures() {
    let doc = tueson!({
        "server": {
            "host": "localhost",
            "ports": [8080, 8081]
        },
        "debug": false
    });

    let ports = doc
        .as_record()
        .and_then(|r| r.get("server"))
        .and_then(Value::as_record)
        .and_then(|r| r.get("ports"))
        .and_then(Value::as_list)
        .expect("ports list");
    assert_eq!(ports.len(), 2);
}

#[test]
fn macro_values_roundtrip() {
    let doc = tueson!({
        "name": "Ann",
        "scores": [1, 2.5, -3],
        "address": null
    });

    let encoded = to_string(&doc).unwrap();
    let decoded: Value = from_str(&encoded).unwrap();
    assert_eq!(decoded, doc);
}
