//! Benchmarks for confparse-core
//!
//! Run with: cargo bench -p confparse-core --features generate
//!
//! Filter benchmarks:
//!   cargo bench -- "parsing"
//!   cargo bench -- "parsing/extended"

use confparse_core::parse::{ParserConfig, parse_document, parse_document_with_config};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

mod fixtures;
use fixtures::{fixtures, fixtures_extended};

/// Benchmark parsing across all fixture sizes
fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    for (name, content) in fixtures() {
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("parse_document", name),
            content,
            |b, input| b.iter(|| parse_document(std::hint::black_box(input))),
        );
    }
    group.finish();
}

/// Benchmark parsing with extended sizes (multi-megabyte inputs)
fn bench_parsing_extended(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing/extended");
    group.sample_size(10); // Fewer samples for large files

    for (name, content) in fixtures_extended() {
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("parse_document", name),
            content,
            |b, input| b.iter(|| parse_document(std::hint::black_box(input))),
        );
    }
    group.finish();
}

/// Benchmark with the inline-comment scan disabled, isolating the cost
/// of the default configuration's per-line prefix search.
fn bench_no_inline_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing/no_inline_scan");
    let config = ParserConfig::new().with_inline_comment_prefixes(Vec::<String>::new());

    for (name, content) in fixtures() {
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("parse_document", name),
            content,
            |b, input| {
                b.iter(|| parse_document_with_config(std::hint::black_box(input), &config))
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_parsing,
    bench_parsing_extended,
    bench_no_inline_scan
);
criterion_main!(benches);
