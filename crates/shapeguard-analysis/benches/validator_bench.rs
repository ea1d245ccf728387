//! Detection and validation benchmarks.
//!
//! Run with: cargo bench -p shapeguard-analysis --bench validator_bench

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use shapeguard_analysis::patterns::{PatternDetector, PatternLibrary};
use shapeguard_analysis::{AutoFormatter, FormatValidator};

/// A process answer with `steps` numbered steps and a tagged code block.
fn make_answer(steps: usize) -> String {
    let mut answer = String::from("Follow these steps:\n\n");
    for i in 1..=steps {
        answer.push_str(&format!("{i}. Configure component {i} for the cluster\n"));
    }
    answer.push_str("\n```bash\nkubectl apply -f deploy.yaml\n```\n");
    answer
}

fn detection(c: &mut Criterion) {
    let detector = PatternDetector::new(PatternLibrary::new());
    let questions = [
        "What is the difference between REST and GraphQL?",
        "How to configure a reverse proxy for a service",
        "What are the pros and cons of microservices?",
        "My build fails with a linker error, how do I fix it?",
    ];
    c.bench_function("suggested_patterns_4_questions", |b| {
        b.iter(|| {
            for q in &questions {
                black_box(detector.suggested_patterns(black_box(q)));
            }
        })
    });
}

fn validation(c: &mut Criterion) {
    let library = PatternLibrary::new();
    let pattern = library.get_pattern("process").cloned().unwrap();
    let validator = FormatValidator::new();
    let mut group = c.benchmark_group("validate_process");

    for steps in [5, 50, 500] {
        let answer = make_answer(steps);
        group.bench_with_input(BenchmarkId::from_parameter(steps), &answer, |b, answer| {
            b.iter(|| black_box(validator.validate(black_box(answer), &pattern)))
        });
    }
    group.finish();
}

fn formatting(c: &mut Criterion) {
    let library = PatternLibrary::new();
    let pattern = library.get_pattern("process").cloned().unwrap();
    let formatter = AutoFormatter::new();
    let answer = make_answer(100).replace(". Configure", ") Configure");
    c.bench_function("format_process_100", |b| {
        b.iter(|| black_box(formatter.format(black_box(&answer), &pattern)))
    });
}

criterion_group!(benches, detection, validation, formatting);
criterion_main!(benches);
