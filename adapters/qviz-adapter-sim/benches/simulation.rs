//! Benchmarks for the state-vector simulator
//!
//! Run with: cargo bench -p qviz-adapter-sim

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qviz_adapter_sim::Statevector;
use qviz_ir::Circuit;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Benchmark GHZ preparation across widths
fn bench_ghz_state(c: &mut Criterion) {
    let mut group = c.benchmark_group("ghz_state");

    for num_qubits in &[4u32, 8, 12, 16] {
        let circuit = Circuit::ghz(*num_qubits);
        group.bench_with_input(
            BenchmarkId::new("from_circuit", num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| Statevector::from_circuit(black_box(circuit)));
            },
        );
    }

    group.finish();
}

/// Benchmark shot sampling
fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling");
    let state = Statevector::from_circuit(&Circuit::ghz(10));

    for shots in &[1024u32, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::new("sample_counts", shots), shots, |b, &n| {
            let mut rng = StdRng::seed_from_u64(0);
            b.iter(|| state.sample_counts(black_box(n), &mut rng).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_ghz_state, bench_sampling);
criterion_main!(benches);
