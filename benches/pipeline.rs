//! Annotation pipeline benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use spanweave::{
    Annotator, Emphasis, EmphasisStyle, Highlight, compose, merge_highlights, partition,
};
use std::hint::black_box;

/// A paragraph of `words` five-letter words with every third word
/// highlighted and overlapping emphasis runs every seven.
fn workload(words: usize) -> (String, Vec<Highlight>, Vec<Emphasis>) {
    let text = "lorem ".repeat(words);
    let highlights = (0..words)
        .step_by(3)
        .map(|w| Highlight::new(format!("w{w}"), w * 6, w * 6 + 5))
        .collect();
    let emphases = (0..words)
        .step_by(7)
        .map(|w| {
            let end = ((w + 2) * 6).min(text.len());
            Emphasis::new(w * 6 + 2, end, EmphasisStyle::bold())
        })
        .collect();
    (text, highlights, emphases)
}

fn merge_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_highlights");
    for words in [10, 100, 1000] {
        let (_, highlights, _) = workload(words);
        group.bench_with_input(BenchmarkId::new("words", words), &highlights, |b, h| {
            b.iter(|| merge_highlights(black_box(h)))
        });
    }
    group.finish();
}

fn compose_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");
    for words in [10, 100, 1000] {
        let (_, highlights, emphases) = workload(words);
        group.bench_with_input(
            BenchmarkId::new("words", words),
            &(highlights, emphases),
            |b, (h, e)| b.iter(|| compose(black_box(h), black_box(e))),
        );
    }
    group.finish();
}

fn partition_bench(c: &mut Criterion) {
    let (text, highlights, emphases) = workload(1000);
    let segments = compose(&highlights, &emphases).unwrap_or_default();
    c.bench_function("partition_1000_words", |b| {
        b.iter(|| partition(black_box(&text), black_box(&segments)))
    });
}

fn annotate_bench(c: &mut Criterion) {
    let (text, highlights, emphases) = workload(1000);
    let mut group = c.benchmark_group("annotate_1000_words");

    group.bench_function("cold", |b| {
        b.iter(|| {
            let annotator = Annotator::new();
            annotator.annotate(black_box(&text), &highlights, &emphases).map(|r| r.len())
        })
    });

    let warm = Annotator::new();
    group.bench_function("warm", |b| {
        b.iter(|| warm.annotate(black_box(&text), &highlights, &emphases).map(|r| r.len()))
    });
    group.finish();
}

criterion_group!(
    benches,
    merge_bench,
    compose_bench,
    partition_bench,
    annotate_bench
);
criterion_main!(benches);
