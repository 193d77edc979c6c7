// ─────────────────────────────────────────────────────────────────────
// Phase Drift Explorer — Engine Benchmarks
// ─────────────────────────────────────────────────────────────────────
//! Criterion benchmarks for the step hot path.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use drift_core::{simulate, DriftEngine};
use drift_observers::Observer;
use drift_physics::{Attractor, KarmicField, PhaseSpace};
use drift_types::{DriftConfig, Signal, SymbolicState};

// ── Single particle ─────────────────────────────────────────────────

fn bench_single_step(c: &mut Criterion) {
    let cfg = DriftConfig::default();
    c.bench_function("drift_step_1state", |b| {
        b.iter_batched(
            || DriftEngine::new(&cfg).expect("default config is valid"),
            |mut engine| black_box(engine.step()),
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_default_run(c: &mut Criterion) {
    let cfg = DriftConfig::default();
    c.bench_function("drift_run_30steps", |b| {
        b.iter(|| simulate(black_box(&cfg)))
    });
}

// ── Many particles (O(N²) coupling) ─────────────────────────────────

fn swarm_engine(n: usize) -> DriftEngine {
    let states: Vec<SymbolicState> = (0..n)
        .map(|i| {
            let x = (i as f64 * 0.37).sin() * 2.0;
            SymbolicState::new(x, vec![x.cos(), x.sin()], Signal::sine())
        })
        .collect();
    let space = PhaseSpace::with_states(0.75, states).expect("uniform dimension");
    DriftEngine::from_parts(
        space,
        Attractor::new(0.0, vec![0.0, 0.0], Signal::Zero),
        Box::new(KarmicField::default_params()),
        Box::new(Observer::with_strength(Signal::cosine(), 0.1, 2)),
    )
    .expect("matching dimensions")
}

fn bench_swarm_step_64(c: &mut Criterion) {
    c.bench_function("drift_step_64states", |b| {
        b.iter_batched(
            || swarm_engine(64),
            |mut engine| black_box(engine.step()),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_single_step,
    bench_default_run,
    bench_swarm_step_64,
);
criterion_main!(benches);
