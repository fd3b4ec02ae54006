//! Criterion benchmarks for FF heuristic evaluation.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use ffplan_bench::{grid_task, reference_profile, stress_profile};
use ffplan_core::Domain;
use ffplan_heuristic::FfHeuristic;

fn bench_initial_state(c: &mut Criterion) {
    for (name, task) in [
        ("ff_gripper6_initial", reference_profile()),
        ("ff_gripper12_initial", stress_profile()),
        ("ff_grid20_initial", grid_task(20, 20)),
    ] {
        let mut h = FfHeuristic::new(&task);
        c.bench_function(name, |b| {
            b.iter(|| black_box(h.evaluate(&task, black_box(task.initial_state()))));
        });
    }
}

criterion_group!(benches, bench_initial_state);
criterion_main!(benches);
