//! Benchmarks for multidigest.
//!
//! Run with:
//!     cargo bench

use std::io::Cursor;
use std::sync::Arc;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use multidigest::{Algorithm, BufferPool, MultiHasher, PoolConfig};

const ALGORITHMS: [Algorithm; 3] = [Algorithm::Md5, Algorithm::Sha1, Algorithm::Sha256];

fn bench_single_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_pass");
    let hasher = MultiHasher::default();

    for size in [64 * 1024, 1024 * 1024, 10 * 1024 * 1024] {
        // Deterministic pseudo-random data
        let data: Vec<u8> = (0..size).map(|i| (i * 7 + 13) as u8).collect();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(format!("three_digests_{}kb", size / 1024), &data, |b, data| {
            b.iter(|| {
                let digests = hasher
                    .digest_reader(Cursor::new(black_box(data)), &ALGORITHMS)
                    .unwrap();
                black_box(digests.len())
            });
        });

        // One read pass per algorithm, for comparison
        group.bench_with_input(format!("one_pass_each_{}kb", size / 1024), &data, |b, data| {
            b.iter(|| {
                let mut total = 0;
                for algorithm in ALGORITHMS {
                    let digests = hasher
                        .digest_reader(Cursor::new(black_box(data)), &[algorithm])
                        .unwrap();
                    total += digests.len();
                }
                black_box(total)
            });
        });
    }

    group.finish();
}

fn bench_buffer_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_sizes");
    let size = 4 * 1024 * 1024;
    let data: Vec<u8> = (0..size).map(|i| (i * 7 + 13) as u8).collect();

    group.throughput(Throughput::Bytes(size as u64));
    for buffer_size in [4 * 1024, 64 * 1024, 1024 * 1024] {
        let pool = BufferPool::new(PoolConfig::default().with_buffer_size(buffer_size)).unwrap();
        let hasher = MultiHasher::new(Arc::new(pool));

        group.bench_function(format!("buffer_{}kb", buffer_size / 1024), |b| {
            b.iter(|| {
                let digests = hasher
                    .digest_reader(Cursor::new(black_box(&data)), &ALGORITHMS)
                    .unwrap();
                black_box(digests.len())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_pass, bench_buffer_sizes);
criterion_main!(benches);
