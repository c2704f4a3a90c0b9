//! Fold hash and full-probe throughput.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use devprint_core::{fold_hash, Signal};
use devprint_probes::ProbeSet;
use devprint_testkit::{SimulatedEnvironment, MINIMAL_ENVIRONMENT};

fn bench_fold_hash(c: &mut Criterion) {
    c.bench_function("fold_hash/composite", |b| {
        b.iter(|| fold_hash(black_box(MINIMAL_ENVIRONMENT.serialized)))
    });
}

fn bench_probe_set(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let caps = SimulatedEnvironment::desktop().capabilities();
    let probes = ProbeSet::default();

    c.bench_function("probe_set/desktop", |b| {
        b.iter(|| {
            runtime.block_on(async {
                for signal in Signal::ALL {
                    black_box(probes.probe(signal, &caps).await);
                }
            })
        })
    });
}

criterion_group!(benches, bench_fold_hash, bench_probe_set);
criterion_main!(benches);
