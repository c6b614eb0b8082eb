use criterion::{criterion_group, criterion_main, Criterion};
use vecspace_core::tokenizer::tokenize;
use vecspace_core::build_index;

const WORDS: &[&str] = &[
    "health", "insurance", "wall", "street", "economy", "jobs", "taxes", "energy",
    "foreign", "policy", "terror", "attack", "education", "budget", "deficit", "security",
];

fn corpus() -> Vec<(String, String)> {
    (0..200)
        .map(|i| {
            let text: Vec<&str> = (0..400).map(|j| WORDS[(i * 7 + j * j) % WORDS.len()]).collect();
            (format!("{i:04}.txt"), text.join(" "))
        })
        .collect()
}

fn bench_tokenize(c: &mut Criterion) {
    let text = corpus().remove(0).1;
    c.bench_function("tokenize_document", |b| b.iter(|| tokenize(&text)));
}

fn bench_build(c: &mut Criterion) {
    let docs = corpus();
    c.bench_function("build_index_200_docs", |b| b.iter(|| build_index(docs.clone())));
}

fn bench_query(c: &mut Criterion) {
    let index = build_index(corpus());
    c.bench_function("query_bounded", |b| b.iter(|| index.query("health insurance wall street")));
    c.bench_function("query_exhaustive", |b| b.iter(|| index.query_exhaustive("health insurance wall street")));
}

criterion_group!(benches, bench_tokenize, bench_build, bench_query);
criterion_main!(benches);
