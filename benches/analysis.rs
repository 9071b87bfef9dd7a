use criterion::{black_box, criterion_group, criterion_main, Criterion};
use grammarguard::{analyze, apply_corrections, find_errors, Checker, PositionMode};

const PASSAGE: &str = "Вечерррм я шёл домй, и вдргг ттень мелькнула. \
    The quick brown fox jumps over the lazy dog! Wooow, what a remarkable, \
    extraordinary evening it was... Кошкаа спросла: кто там?";

fn corpus() -> String {
    PASSAGE.repeat(200)
}

fn bench_analyze(c: &mut Criterion) {
    let text = corpus();
    c.bench_function("analyze", |b| b.iter(|| analyze(black_box(&text))));
}

fn bench_find_errors(c: &mut Criterion) {
    let text = corpus();
    let exact = Checker::new().with_positions(PositionMode::Exact);

    c.bench_function("find_errors/approximate", |b| {
        b.iter(|| find_errors(black_box(&text)))
    });
    c.bench_function("find_errors/exact", |b| b.iter(|| exact.check(black_box(&text))));
}

fn bench_apply_corrections(c: &mut Criterion) {
    let text = corpus();
    let errors = find_errors(&text);
    c.bench_function("apply_corrections", |b| {
        b.iter(|| apply_corrections(black_box(&text), black_box(&errors)))
    });
}

criterion_group!(benches, bench_analyze, bench_find_errors, bench_apply_corrections);
criterion_main!(benches);
