//! Benchmarks for archtext-core scanning.
//!
//! Covers the three per-member costs: plain-text classification, encoding
//! resolution on the sample, and whole-archive extraction.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::cast_possible_truncation)]

use archtext_core::ExtractionConfig;
use archtext_core::classify::classify_bytes;
use archtext_core::encoding::resolve;
use archtext_core::extract_text;
use archtext_core::test_utils::ZipTestBuilder;
use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use std::hint::black_box;

/// Creates a ZIP archive with `file_count` small source files.
fn create_source_tree_zip(file_count: usize) -> Vec<u8> {
    let mut builder = ZipTestBuilder::new();
    for i in 0..file_count {
        let content = format!("# -*- coding: utf-8 -*-\n\ndef f{i}():\n    return {i}\n");
        builder = builder.add_deflated_file(&format!("pkg/mod{i:05}.py"), content.as_bytes());
    }
    builder.build()
}

fn benchmark_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    for size in [512, 4096, 65536] {
        let text = "fn main() { println!(\"hello\"); }\n"
            .repeat(size / 34 + 1)
            .into_bytes();
        let mut binary = vec![0xAB_u8; size];
        binary[size / 2] = 0;

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("text", size), &text, |b, data| {
            b.iter(|| classify_bytes(black_box(data)));
        });
        group.bench_with_input(BenchmarkId::new("binary", size), &binary, |b, data| {
            b.iter(|| classify_bytes(black_box(data)));
        });
    }

    group.finish();
}

fn benchmark_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    let samples = [
        ("python", b"# -*- coding: utf-8 -*-\nprint('hi')\n".to_vec()),
        ("latex", b"% !TEX encoding = UTF-8\n\\documentclass{article}\n".to_vec()),
        ("undeclared", "x = 1\n".repeat(600).into_bytes()),
    ];
    for (name, sample) in &samples {
        group.bench_with_input(BenchmarkId::from_parameter(name), sample, |b, data| {
            b.iter(|| resolve(black_box(data)));
        });
    }

    group.finish();
}

fn benchmark_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");

    for file_count in [10, 100, 1000] {
        let zip_data = create_source_tree_zip(file_count);
        let config = ExtractionConfig::default().with_max_files(file_count);
        group.throughput(Throughput::Elements(file_count as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(file_count),
            &zip_data,
            |b, data| {
                b.iter(|| extract_text(data.clone(), &config).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_classify, benchmark_resolve, benchmark_extract);
criterion_main!(benches);
