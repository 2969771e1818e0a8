//! Classic versus bounds-checked copies, and the fallback forwards.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use crtcompat::{GapWarnings, fallback, set_gap_warnings};
use crtcompat_bench::terminated;
use crtcompat_core::string::{checked, classic};

const SIZES: &[usize] = &[16, 64, 256, 1024, 4096];

fn bench_strcpy(c: &mut Criterion) {
    set_gap_warnings(GapWarnings::Off);
    let mut group = c.benchmark_group("strcpy");

    for &size in SIZES {
        let src = terminated(size, b'A');
        let mut dst = vec![0u8; size + 1];
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("classic", size), &size, |b, _| {
            b.iter(|| black_box(classic::strcpy(&mut dst, black_box(&src))));
        });
        group.bench_with_input(BenchmarkId::new("checked", size), &size, |b, &sz| {
            b.iter(|| black_box(checked::strcpy_s(&mut dst, sz + 1, black_box(&src)).is_ok()));
        });
        group.bench_with_input(BenchmarkId::new("fallback", size), &size, |b, &sz| {
            b.iter(|| black_box(fallback::strcpy_s(&mut dst, sz + 1, black_box(&src))));
        });
    }
    group.finish();
}

fn bench_memcpy(c: &mut Criterion) {
    set_gap_warnings(GapWarnings::Off);
    let mut group = c.benchmark_group("memcpy");

    for &size in SIZES {
        let src = vec![0xABu8; size];
        let mut dst = vec![0u8; size];
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("classic", size), &size, |b, &sz| {
            b.iter(|| black_box(classic::memcpy(&mut dst, black_box(&src), sz)));
        });
        group.bench_with_input(BenchmarkId::new("checked", size), &size, |b, &sz| {
            b.iter(|| black_box(checked::memcpy_s(&mut dst, sz, black_box(&src), sz).is_ok()));
        });
    }
    group.finish();
}

fn bench_forward_strcpy(c: &mut Criterion) {
    let src = terminated(200, b'z');
    c.bench_function("forward_strcpy_256", |b| {
        let mut dst = [0u8; 256];
        b.iter(|| black_box(crtcompat::forward::strcpy(&mut dst, black_box(&src)).is_ok()));
    });
}

criterion_group!(benches, bench_strcpy, bench_memcpy, bench_forward_strcpy);
criterion_main!(benches);
