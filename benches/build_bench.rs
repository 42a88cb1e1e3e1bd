use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use flat_bitmap::{FlatBitmap, testutil::SetGen};
use std::hint::black_box;

fn benchmark_build(c: &mut Criterion) {
    let mut set_gen = SetGen::new(42);
    let mut group = c.benchmark_group("build");

    // (keys, values per key): sparse arrays through to full bitmaps
    for (keys, per_key) in [(16, 64), (16, 4095), (16, 4096), (4, 65536)] {
        let set = set_gen.distributed(keys, per_key);
        let id = format!("{keys}x{per_key}");

        group.bench_function(BenchmarkId::new("from_iter", &id), |b| {
            b.iter(|| FlatBitmap::from_iter(black_box(set.iter().rev().copied())))
        });

        group.bench_function(BenchmarkId::new("from_sorted_iter", &id), |b| {
            b.iter(|| FlatBitmap::from_sorted_iter(black_box(set.iter().copied())))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_build);
criterion_main!(benches);
