use std::fmt::Write;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gopath::parser::go_obo;
use gopath::Ontology;

const NAMESPACES: [&str; 3] = [
    "biological_process",
    "cellular_component",
    "molecular_function",
];

/// Creates an OBO source with `size` terms per branch
///
/// Every term is connected to up to 3 terms that were declared before
fn synthetic_obo(size: usize) -> String {
    let mut obo = String::from("format-version: 1.2\nontology: go\n\n");
    for (branch, namespace) in NAMESPACES.iter().enumerate() {
        let offset = branch * size;
        for idx in 0..size {
            let id = offset + idx;
            writeln!(obo, "[Term]\nid: GO:{id:07}\nname: term {id}\nnamespace: {namespace}").unwrap();
            if idx > 0 {
                writeln!(obo, "is_a: GO:{:07} ! parent", offset + (idx - 1) / 2).unwrap();
            }
            if idx > 10 {
                writeln!(obo, "is_a: GO:{:07} ! parent", offset + idx / 3).unwrap();
                writeln!(obo, "relationship: part_of GO:{:07} ! parent", offset + idx / 7).unwrap();
            }
            obo.push('\n');
        }
    }
    obo.push_str("[Typedef]\nid: part_of\nname: part of\n");
    obo
}

fn parse_benchmark(c: &mut Criterion) {
    let obo = synthetic_obo(15_000);

    c.bench_function("parse obo", |b| {
        b.iter(|| {
            go_obo::parse_str(black_box(&obo))
                .expect("requires valid OBO data")
                .terms()
                .len()
        })
    });
}

fn build_ontology_benchmark(c: &mut Criterion) {
    let obo = synthetic_obo(15_000);

    c.bench_function("build ontology", |b| {
        b.iter(|| {
            Ontology::from_obo_str(black_box(&obo))
                .expect("requires valid OBO data")
                .len()
        })
    });
}

criterion_group! {
    name = parser;
    config = Criterion::default().sample_size(20).measurement_time(Duration::from_secs(10));
    targets = parse_benchmark, build_ontology_benchmark
}
criterion_main!(parser);
