use capflags_registry::combinators::{constant, follows, requires};
use capflags_registry::{FlagKind, Registry};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn chain(depth: usize) -> Registry {
    let registry = Registry::new();
    registry.register_flag("LEVEL_0", FlagKind::Bool, constant(true)).unwrap();
    for level in 1..depth {
        let parent: &'static str = Box::leak(format!("LEVEL_{}", level - 1).into_boxed_str());
        registry.register_flag(format!("LEVEL_{level}"), FlagKind::Bool, follows(parent)).unwrap();
    }
    registry
}

// ============================================================================
// Benchmark: Memoized reads
// ============================================================================

fn bench_memoized_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("memoized_get");

    let registry = Registry::new();
    registry.register_flag("HAS_GPU", FlagKind::Bool, constant(true)).unwrap();
    registry.register_flag("GPU_PACK", FlagKind::Bool, requires("HAS_GPU", |_| Ok(true))).unwrap();
    registry.get("GPU_PACK").unwrap();

    group.bench_function("hit", |b| {
        b.iter(|| black_box(registry.get_bool("GPU_PACK").unwrap()));
    });

    registry.set("HAS_GPU", false).unwrap();
    group.bench_function("override", |b| {
        b.iter(|| black_box(registry.get_bool("HAS_GPU").unwrap()));
    });

    group.finish();
}

// ============================================================================
// Benchmark: Cold resolution of dependency chains
// ============================================================================

fn bench_cold_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("cold_chain");

    for depth in [4_usize, 16, 64] {
        let registry = chain(depth);
        let leaf = format!("LEVEL_{}", depth - 1);

        group.bench_with_input(BenchmarkId::from_parameter(depth), &leaf, |b, leaf| {
            b.iter(|| {
                registry.reset();
                black_box(registry.get_bool(leaf).unwrap());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_memoized_get, bench_cold_chain);
criterion_main!(benches);
