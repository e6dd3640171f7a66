//! Benchmark for random identifier generation

use ceph_bucket_provisioner::provisioner::random_identifier;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn bench_random_identifier(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_identifier");

    for len in [8usize, 32, 256] {
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter(|| random_identifier(black_box(len)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_random_identifier);
criterion_main!(benches);
