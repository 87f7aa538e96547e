use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gradewise_core::engine::{aggregate, compute_course, grade_for_score, score_breakdown};
use gradewise_core::model::{Course, ExamScores};

fn make_course(i: u32) -> Course {
    let score = (i % 101) as f64;
    compute_course(
        "bench",
        i % 10 + 1,
        &[score / 10.0; 10],
        ExamScores::new(score, 100.0 - score, score),
    )
    .unwrap()
}

fn bench_grade_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("grade_for_score");

    group.bench_function("top", |b| b.iter(|| grade_for_score(black_box(95.0))));
    group.bench_function("bottom", |b| b.iter(|| grade_for_score(black_box(12.5))));

    group.finish();
}

fn bench_course_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("course_compute");
    let assignments = [8.0; 10];
    let exams = ExamScores::new(50.0, 90.0, 70.0);

    group.bench_function("breakdown", |b| {
        b.iter(|| score_breakdown(black_box(&assignments), black_box(&exams)))
    });

    group.bench_function("validated", |b| {
        b.iter(|| compute_course(black_box("Math"), black_box(3), black_box(&assignments), exams))
    });

    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for n in [8u32, 64, 1024] {
        let courses: Vec<Course> = (0..n).map(make_course).collect();
        group.bench_function(format!("courses={n}"), |b| {
            b.iter(|| aggregate(black_box(&courses)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_grade_lookup, bench_course_compute, bench_aggregate);
criterion_main!(benches);
