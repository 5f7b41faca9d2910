//! Paired-fixture tests: for every `tests/fixtures/X.json` there is an
//! `X.tueson` holding its canonical encoding. Encoding the JSON must
//! reproduce the tueson file byte for byte, and decoding the tueson file
//! must reproduce the JSON's value.

use serde_tueson::Value;
use std::fs;
use std::path::Path;

#[test]
fn fixtures_roundtrip() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let mut checked = 0;

    for entry in fs::read_dir(&dir).expect("fixtures directory") {
        let json_path = entry.expect("directory entry").path();
        if json_path.extension().map_or(true, |ext| ext != "json") {
            continue;
        }
        let doc_path = json_path.with_extension("tueson");
        let name = json_path.file_name().and_then(|n| n.to_str()).unwrap_or("?");

        let json_text = fs::read_to_string(&json_path).expect("read json fixture");
        let doc_text = fs::read_to_string(&doc_path).expect("read tueson fixture");

        let json: serde_json::Value = serde_json::from_str(&json_text).expect("parse json");
        let expected = serde_tueson::to_value(&json).expect("bridge json into Value");

        let encoded = serde_tueson::to_string(&json).expect("encode");
        assert_eq!(encoded, doc_text, "encode mismatch for {}", name);

        let decoded: Value = serde_tueson::from_str(&doc_text).expect("decode");
        assert_eq!(decoded, expected, "decode mismatch for {}", name);

        checked += 1;
    }

    assert!(checked >= 6, "expected fixture pairs, found {}", checked);
}
