//! Benchmarks for the per-keystroke text paths
//!
//! Run with: cargo bench -p tagline-engine

use std::collections::HashSet;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tagline_engine::{highlight, locate, tokenize};

fn sample_message() -> String {
    "deploy is blocked on @alice and @bob please check #release notes before friday "
        .repeat(8)
}

fn bench_locate(c: &mut Criterion) {
    let text = sample_message();
    let cursor = text.chars().count() / 2;
    c.bench_function("locate_mid_message", |b| {
        b.iter(|| locate(black_box(&text), black_box(cursor)))
    });
}

fn bench_tokenize(c: &mut Criterion) {
    let text = sample_message();
    c.bench_function("tokenize_message", |b| b.iter(|| tokenize(black_box(&text))));
}

fn bench_highlight(c: &mut Criterion) {
    let text = sample_message();
    let confirmed: HashSet<String> = ["@alice", "#release"].iter().map(|s| s.to_string()).collect();
    c.bench_function("highlight_message", |b| {
        b.iter(|| highlight(black_box(&text), black_box(&confirmed)))
    });
}

criterion_group!(benches, bench_locate, bench_tokenize, bench_highlight);
criterion_main!(benches);
