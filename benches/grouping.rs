use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tabular_import::processing::{group, GroupSpec};
use tabular_import::types::{DataSet, RecordShape, Schema, Value};

fn synthetic(rows: usize, shape: RecordShape) -> DataSet {
    let schema = Schema::from_iter(["id", "sex", "isMarried", "isEmployed", "amount"]);
    let records = (0..rows)
        .map(|i| {
            let values = vec![
                Value::Int(i as i64),
                Value::from(if i % 2 == 0 { "F" } else { "M" }),
                Value::Int((i % 3 == 0) as i64),
                Value::Int((i % 5 != 0) as i64),
                Value::Float(i as f64 * 1.25),
            ];
            shape.build(&schema, values)
        })
        .collect();
    DataSet::new(schema, shape, records)
}

fn bench_grouping(c: &mut Criterion) {
    let specs = [
        GroupSpec::new(["sex"]).unwrap(),
        GroupSpec::new(["isMarried", "isEmployed"]).unwrap(),
    ];

    for shape in [RecordShape::Sequence, RecordShape::Mapping] {
        let ds = synthetic(100_000, shape);
        c.bench_function(&format!("group/{shape:?}/100k"), |b| {
            b.iter(|| {
                let index = group(black_box(&ds), &specs).unwrap();
                black_box(index.len())
            })
        });
    }
}

criterion_group!(benches, bench_grouping);
criterion_main!(benches);
