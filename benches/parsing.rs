use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use plaindoc::{json, xml, HashTable};

fn json_array_document(size: usize) -> String {
    let items: Vec<String> = (0..size)
        .map(|i| {
            format!(
                "{{\"id\": {}, \"name\": \"user{}\", \"score\": {}.5, \"active\": {}}}",
                i,
                i,
                i,
                i % 2 == 0
            )
        })
        .collect();
    format!("[{}]", items.join(", "))
}

fn xml_document(size: usize) -> String {
    let children: String = (0..size)
        .map(|i| format!("<item{} id=\"{}\">value {}</item{}>", i, i, i, i))
        .collect();
    format!("<root version=\"1\">{}</root>", children)
}

fn benchmark_parse_json(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_json");

    for size in [10, 100, 1000].iter() {
        let input = json_array_document(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| json::from_str(black_box(input)))
        });
    }

    group.finish();
}

fn benchmark_serialize_json(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_json");

    for size in [10, 100, 1000].iter() {
        let value = json::from_str(&json_array_document(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &value, |b, value| {
            b.iter(|| json::to_string(black_box(value)))
        });
    }

    group.finish();
}

fn benchmark_parse_xml(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_xml");

    for size in [10, 100, 1000].iter() {
        let input = xml_document(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| xml::from_str(black_box(input)))
        });
    }

    group.finish();
}

fn benchmark_serialize_xml(c: &mut Criterion) {
    let root = xml::from_str(&xml_document(100)).unwrap();
    c.bench_function("serialize_xml_100", |b| {
        b.iter(|| xml::to_string(black_box(&root)))
    });
}

fn benchmark_table(c: &mut Criterion) {
    let keys: Vec<String> = (0..1000).map(|i| format!("key{}", i)).collect();
    let mut group = c.benchmark_group("hash_table");

    group.bench_function("insert_1000", |b| {
        b.iter(|| {
            let mut table = HashTable::new();
            for (i, key) in keys.iter().enumerate() {
                let _ = table.add(key, i);
            }
            table
        })
    });

    let table: HashTable<usize> = keys.iter().enumerate().map(|(i, k)| (k, i)).collect();
    group.bench_function("lookup_1000", |b| {
        b.iter(|| {
            keys.iter()
                .filter(|key| table.get(black_box(key.as_str())).is_some())
                .count()
        })
    });

    group.finish();
}

fn benchmark_comparison(c: &mut Criterion) {
    let input = json_array_document(100);
    let mut group = c.benchmark_group("comparison");

    group.bench_function("plaindoc_parse", |b| {
        b.iter(|| json::from_str(black_box(&input)))
    });

    group.bench_function("serde_json_parse", |b| {
        b.iter(|| serde_json::from_str::<serde_json::Value>(black_box(&input)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_parse_json,
    benchmark_serialize_json,
    benchmark_parse_xml,
    benchmark_serialize_xml,
    benchmark_table,
    benchmark_comparison
);
criterion_main!(benches);
