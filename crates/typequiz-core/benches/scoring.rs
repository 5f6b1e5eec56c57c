use criterion::{black_box, criterion_group, criterion_main, Criterion};

use typequiz_core::axis::{resolve_scores, AxisScoreAccumulator};
use typequiz_core::generator::TestGenerator;
use typequiz_core::model::Answer;
use typequiz_core::scoring::{axis_percentages, ScoringEngine};

fn bench_resolve(c: &mut Criterion) {
    let test = TestGenerator::seeded(1).generate("bench", "bench");
    let scores = &test.questions[0].options[0].scores;

    c.bench_function("resolve_sixteen_codes", |b| {
        b.iter(|| {
            let mut acc = AxisScoreAccumulator::new();
            resolve_scores(black_box(scores), &mut acc);
            acc
        })
    });
}

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");
    let test = TestGenerator::seeded(2).generate("bench", "bench");
    let engine = ScoringEngine::new(&test);

    let full: Vec<Answer> = test
        .questions
        .iter()
        .map(|q| Answer::new(q.id, (q.id % 5) + 1))
        .collect();
    group.bench_function("all_answered", |b| {
        b.iter(|| engine.score(black_box(&full)))
    });

    let sparse = vec![Answer::new(1, 1), Answer::new(99, 1)];
    group.bench_function("sparse_with_unknown", |b| {
        b.iter(|| engine.score(black_box(&sparse)))
    });

    let tally = engine.tally(&full);
    group.bench_function("percentages", |b| {
        b.iter(|| axis_percentages(black_box(&tally)))
    });

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_score);
criterion_main!(benches);
