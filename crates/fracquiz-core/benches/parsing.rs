use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use fracquiz_core::config::Grading;
use fracquiz_core::parser::{check_answer, parse_decimal, parse_fraction, strip_whitespace};
use fracquiz_core::{CanonicalAnswer, QuizConfig, QuizEngine, Rational};

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_answer");

    group.bench_function("fraction", |b| b.iter(|| parse_fraction(black_box("11/20"))));
    group.bench_function("decimal", |b| b.iter(|| parse_decimal(black_box("0.375"))));
    group.bench_function("malformed", |b| b.iter(|| parse_fraction(black_box("0.5"))));
    group.bench_function("strip_whitespace", |b| {
        b.iter(|| strip_whitespace(black_box("  3 / 8 \n")))
    });

    group.finish();
}

fn bench_check_answer(c: &mut Criterion) {
    let mut group = c.benchmark_group("check_answer");
    let grading = Grading::default();
    let fraction = CanonicalAnswer::Rational(Rational::new(3, 8).unwrap());
    let decimal = CanonicalAnswer::Decimal(0.375);

    group.bench_function("fraction", |b| {
        b.iter(|| check_answer(black_box(&fraction), black_box("6/16"), &grading))
    });
    group.bench_function("decimal", |b| {
        b.iter(|| check_answer(black_box(&decimal), black_box("0.38"), &grading))
    });

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let engine = QuizEngine::new(QuizConfig::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    let session = engine.start(&mut rng);

    c.bench_function("evaluate_wrong", |b| {
        b.iter(|| engine.evaluate(black_box("999/1"), session.clone(), &mut rng))
    });
}

criterion_group!(benches, bench_parse, bench_check_answer, bench_evaluate);
criterion_main!(benches);
