//! Benchmarks for the CFR traversal schemes.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use toy_cfr_solver::cfr::{CfrSolver, SamplingScheme, SolverConfig};
use toy_cfr_solver::games::holdem::SimplifiedHoldem;
use toy_cfr_solver::games::kuhn::KuhnPoker;

fn kuhn_iteration_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("kuhn_single_iteration");

    for scheme in [
        SamplingScheme::Vanilla,
        SamplingScheme::ExternalSampling,
        SamplingScheme::OutcomeSampling,
    ] {
        let config = SolverConfig::default().with_scheme(scheme).with_seed(42);
        let mut solver = CfrSolver::new(KuhnPoker::new(), config);

        group.bench_function(scheme.name(), |b| {
            b.iter(|| {
                solver.run_iteration();
                black_box(solver.iteration_count())
            })
        });
    }

    group.finish();
}

fn holdem_iteration_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("holdem_single_iteration");

    for scheme in [SamplingScheme::ExternalSampling, SamplingScheme::OutcomeSampling] {
        let config = SolverConfig::default().with_scheme(scheme).with_seed(42);
        let mut solver = CfrSolver::new(SimplifiedHoldem::new(), config);

        group.bench_function(scheme.name(), |b| {
            b.iter(|| {
                solver.run_iteration();
                black_box(solver.iteration_count())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, kuhn_iteration_benchmark, holdem_iteration_benchmark);
criterion_main!(benches);
