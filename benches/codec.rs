use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde::{Deserialize, Serialize};
use serde_tueson::{from_str, to_string, tueson, Value};

#[derive(Serialize, Deserialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

fn nested_document() -> Value {
    tueson!({
        "service": "registry",
        "replicas": 3,
        "hosts": ["alpha", "beta", "gamma"],
        "limits": {
            "memory": 512,
            "cpu": 0.5
        },
        "motd": "scheduled maintenance\nexpect brief downtime"
    })
}

fn benchmark_encode_struct(c: &mut Criterion) {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    };

    c.bench_function("encode_struct", |b| b.iter(|| to_string(black_box(&user))));
}

fn benchmark_decode_struct(c: &mut Criterion) {
    let doc = "record\n  id 123\n  name 'Alice\n  email 'alice@example.com\n  active yes\n";

    c.bench_function("decode_struct", |b| {
        b.iter(|| from_str::<User>(black_box(doc)))
    });
}

fn benchmark_encode_nested(c: &mut Criterion) {
    let doc = nested_document();

    c.bench_function("encode_nested_value", |b| {
        b.iter(|| to_string(black_box(&doc)))
    });
}

fn benchmark_decode_nested(c: &mut Criterion) {
    let encoded = to_string(&nested_document()).unwrap();

    c.bench_function("decode_nested_value", |b| {
        b.iter(|| from_str::<Value>(black_box(&encoded)))
    });
}

fn benchmark_decode_wide_list(c: &mut Criterion) {
    let items: Vec<i64> = (0..1000).collect();
    let encoded = to_string(&items).unwrap();

    c.bench_function("decode_wide_list", |b| {
        b.iter(|| from_str::<Vec<i64>>(black_box(&encoded)))
    });
}

criterion_group!(
    benches,
    benchmark_encode_struct,
    benchmark_decode_struct,
    benchmark_encode_nested,
    benchmark_decode_nested,
    benchmark_decode_wide_list,
);
criterion_main!(benches);
