use criterion::{Criterion, criterion_group, criterion_main};
use restdoc_engine::parsing::{Parser, parse_document};

mod common;

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    group.sample_size(10);

    let content = common::generate_rst_content(100);
    group.bench_function("mixed_content", |b| {
        b.iter(|| {
            let parsed = parse_document(std::hint::black_box(&content)).unwrap();
            std::hint::black_box(parsed);
        });
    });

    let nested = common::generate_nested_sections(50, 4);
    group.bench_function("nested_sections", |b| {
        b.iter(|| {
            let parsed = parse_document(std::hint::black_box(&nested)).unwrap();
            std::hint::black_box(parsed);
        });
    });

    let table = common::generate_simple_table(500);
    group.bench_function("simple_table", |b| {
        b.iter(|| {
            let parsed = parse_document(std::hint::black_box(&table)).unwrap();
            std::hint::black_box(parsed);
        });
    });

    group.finish();
}

fn bench_parser_reuse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_reuse");
    group.sample_size(10);

    let parser = Parser::new();
    let content = common::generate_rst_content(20);
    group.bench_function("shared_parser", |b| {
        b.iter(|| {
            let parsed = parser.parse(std::hint::black_box(&content)).unwrap();
            std::hint::black_box(parsed);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_parser_reuse);
criterion_main!(benches);
