use capflags_probe::{Limit, ProbeCache};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

// ============================================================================
// Benchmark: Cached probe reads
// ============================================================================

fn bench_cached_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("probe_cache");

    let cache = ProbeCache::new();
    cache.query_limit(Limit::MaxTextureSize.key(), || Ok(16384)).unwrap();

    group.bench_function("hit", |b| {
        b.iter(|| {
            black_box(cache.query_limit(Limit::MaxTextureSize.key(), || Ok(0)).unwrap());
        });
    });

    group.bench_function("miss_after_invalidate", |b| {
        b.iter(|| {
            cache.invalidate("max_texture_image_units");
            black_box(cache.query_limit("max_texture_image_units", || Ok(16)).unwrap());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_cached_reads);
criterion_main!(benches);
