use std::fmt::Write;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rayon::prelude::*;

use gopath::Ontology;

/// Creates an ontology with `size` terms, each with up to 3 parents
fn synthetic_ontology(size: usize) -> Ontology {
    let mut obo = String::new();
    for idx in 0..size {
        writeln!(obo, "[Term]\nid: GO:{idx:07}\nnamespace: biological_process").unwrap();
        if idx > 0 {
            writeln!(obo, "is_a: GO:{:07} ! parent", (idx - 1) / 2).unwrap();
        }
        if idx > 10 {
            writeln!(obo, "is_a: GO:{:07} ! parent", idx / 3).unwrap();
            writeln!(obo, "relationship: part_of GO:{:07} ! parent", idx / 7).unwrap();
        }
        obo.push('\n');
    }
    Ontology::from_obo_str(&obo).unwrap()
}

fn ancestors(ontology: &Ontology, times: usize) -> usize {
    let mut count = 0;
    for term in ontology.into_iter().skip(500).take(times) {
        let ancestors = ontology.ancestors_of(term.id()).len();
        if ancestors > count {
            count = ancestors;
        }
    }
    count
}

fn ancestors_parallel(ontology: &Ontology, times: usize) -> usize {
    ontology
        .into_iter()
        .skip(500)
        .take(times)
        .par_bridge()
        .map(|term| ontology.ancestors_of(term.id()).len())
        .max()
        .unwrap_or_default()
}

fn ancestors_benchmark(c: &mut Criterion) {
    let ontology = synthetic_ontology(40_000);

    c.bench_function("ancestors 10000", |b| {
        b.iter(|| ancestors(black_box(&ontology), black_box(10_000)))
    });

    c.bench_function("ancestors-parallel 10000", |b| {
        b.iter(|| ancestors_parallel(black_box(&ontology), black_box(10_000)))
    });
}

fn unknown_ancestors_benchmark(c: &mut Criterion) {
    let ontology = synthetic_ontology(40_000);

    c.bench_function("unknown-ancestors 10000", |b| {
        b.iter(|| {
            (0..10_000)
                .map(|idx| ontology.ancestors_of(format!("GO:9{idx:06}")).len())
                .sum::<usize>()
        })
    });
}

criterion_group!(
    ancestor_closure,
    ancestors_benchmark,
    unknown_ancestors_benchmark
);
criterion_main!(ancestor_closure);
