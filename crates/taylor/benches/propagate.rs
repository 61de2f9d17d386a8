//! Benchmarks for Taylor propagation over one orbit.
//!
//! Run with: cargo bench -p leg_taylor

use std::f64::consts::PI;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use leg_taylor::{PropagatorSettings, Sundmann, TaylorPropagator, TwoBodyJ2, Workspace};

const START: [f64; 7] = [1.0, 0.0, 0.0, 0.0, 1.1, 0.05, 1.0];

fn bench_tolerance_sweep(c: &mut Criterion) {
    let dynamics = TwoBodyJ2::keplerian(1.0, 1.0, [0.01, 0.0, 0.0]);
    let mut group = c.benchmark_group("two_body_one_period");

    for log10_tol in [-6, -10, -14] {
        let propagator = TaylorPropagator::new(PropagatorSettings::with_tolerance(log10_tol));
        group.bench_with_input(BenchmarkId::from_parameter(log10_tol), &propagator, |b, p| {
            let mut workspace = Workspace::new();
            b.iter(|| {
                let mut state = START;
                p.propagate_with(&dynamics, &mut state, black_box(2.0 * PI), &mut workspace)
                    .unwrap();
                state
            })
        });
    }
    group.finish();
}

fn bench_j2(c: &mut Criterion) {
    let dynamics = TwoBodyJ2::keplerian(1.0, 1.0, [0.0; 3]).with_j2(1e-3);
    let propagator = TaylorPropagator::default();
    c.bench_function("two_body_j2_one_period", |b| {
        let mut workspace = Workspace::new();
        b.iter(|| {
            let mut state = START;
            propagator
                .propagate_with(&dynamics, &mut state, black_box(2.0 * PI), &mut workspace)
                .unwrap();
            state
        })
    });
}

fn bench_sundmann(c: &mut Criterion) {
    let dynamics = Sundmann {
        mu: 1.0,
        veff: 1.0,
        thrust: [0.01, 0.0, 0.0],
        c: 1.0,
        alpha: 1.5,
    };
    let propagator = TaylorPropagator::default();
    c.bench_function("sundmann_segment", |b| {
        let mut workspace = Workspace::new();
        b.iter(|| {
            let mut state = [START[0], START[1], START[2], START[3], START[4], START[5], START[6], 0.0];
            propagator
                .propagate_with(&dynamics, &mut state, black_box(0.5), &mut workspace)
                .unwrap();
            state
        })
    });
}

criterion_group!(benches, bench_tolerance_sweep, bench_j2, bench_sundmann);
criterion_main!(benches);
