use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use hashgrid::{GridHashJob, SmallHash};
use std::hint::black_box;

fn bench_sequential_vs_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential_vs_parallel");

    for resolution in [16, 64, 256, 512] {
        let length = (resolution * resolution) as usize;
        let hash = SmallHash::seed(100);

        group.bench_with_input(
            BenchmarkId::new("sequential", resolution),
            &resolution,
            |b, &resolution| {
                let mut hashes = vec![0u32; length];
                b.iter(|| {
                    GridHashJob::new(&mut hashes, black_box(hash), resolution)
                        .run();
                    black_box(&hashes);
                })
            },
        );

        // One grid row per work unit.
        group.bench_with_input(
            BenchmarkId::new("parallel_rows", resolution),
            &resolution,
            |b, &resolution| {
                let mut hashes = vec![0u32; length];
                b.iter(|| {
                    GridHashJob::new(&mut hashes, black_box(hash), resolution)
                        .run_parallel();
                    black_box(&hashes);
                })
            },
        );

        // One batch per core.
        group.bench_with_input(
            BenchmarkId::new("parallel_per_core", resolution),
            &resolution,
            |b, &resolution| {
                let mut hashes = vec![0u32; length];
                let batch_size = length.div_ceil(num_cpus::get().max(1));
                b.iter(|| {
                    GridHashJob::new(&mut hashes, black_box(hash), resolution)
                        .run_batched(batch_size);
                    black_box(&hashes);
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_sequential_vs_parallel);
criterion_main!(benches);
