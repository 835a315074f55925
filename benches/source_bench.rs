//! Benchmarks for bytesource.
//!
//! Run with:
//!     cargo bench

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use bytesource::{ByteSource, concat, wrap};

fn bench_concat_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("concat_read");

    // Different part counts over the same total size
    let total = 4 * 1024 * 1024;
    for parts in [1usize, 16, 256] {
        // Deterministic pseudo-random data
        let data: Vec<u8> = (0..total).map(|i| (i * 7 + 13) as u8).collect();
        let part_len = total / parts;

        group.throughput(Throughput::Bytes(total as u64));
        group.bench_with_input(format!("{parts}_parts"), &data, |b, data| {
            b.iter(|| {
                let sources = data.chunks(part_len).map(|part| wrap(part.to_vec()));
                let joined = concat(sources);
                let read = joined.read().unwrap();
                black_box(read.len())
            });
        });
    }

    group.finish();
}

fn bench_content_equals(c: &mut Criterion) {
    let mut group = c.benchmark_group("content_equals");
    let size = 4 * 1024 * 1024;
    let data: Vec<u8> = (0..size).map(|i| (i * 7 + 13) as u8).collect();

    group.throughput(Throughput::Bytes(size as u64));
    group.bench_function("equal", |b| {
        let left = wrap(data.clone());
        let right = wrap(data.clone());
        b.iter(|| black_box(left.content_equals(&right).unwrap()));
    });

    group.bench_function("first_byte_differs", |b| {
        let left = wrap(data.clone());
        let mut flipped = data.clone();
        flipped[0] ^= 0xFF;
        let right = wrap(flipped);
        b.iter(|| black_box(left.content_equals(&right).unwrap()));
    });

    group.finish();
}

fn bench_size_fallbacks(c: &mut Criterion) {
    use bytesource::SourceStream;
    use std::io;

    /// Hides the size so `size()` has to count.
    #[derive(Clone)]
    struct Opaque(Vec<u8>);

    impl ByteSource for Opaque {
        fn open_stream(&self) -> io::Result<Box<dyn SourceStream>> {
            wrap(self.0.clone()).open_stream()
        }
    }

    let mut group = c.benchmark_group("size");
    let size = 4 * 1024 * 1024;
    let data: Vec<u8> = (0..size).map(|i| (i * 7 + 13) as u8).collect();

    group.throughput(Throughput::Bytes(size as u64));
    group.bench_function("known", |b| {
        let source = wrap(data.clone());
        b.iter(|| black_box(source.size().unwrap()));
    });

    group.bench_function("counted", |b| {
        let source = Opaque(data.clone());
        b.iter(|| black_box(source.size().unwrap()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_concat_read,
    bench_content_equals,
    bench_size_fallbacks
);
criterion_main!(benches);
