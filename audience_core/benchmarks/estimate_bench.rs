use std::sync::Arc;

use audience_core::{derive_estimate, Segment, SegmentCatalog, SessionState, SizingConfig};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn synthetic_catalog(size: usize) -> SegmentCatalog {
    let segments = (0..size)
        .map(|idx| {
            Segment::new(&format!("provider{}", idx % 7), "Provider", &format!("seg_{idx}"))
                .with_weight((idx % 11) as f64 * 0.5)
        })
        .collect();
    SegmentCatalog::from_segments(segments).expect("synthetic catalog")
}

fn bench_estimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimate");
    let config = Arc::new(SizingConfig::default());

    for size in [6usize, 64, 512, 4096] {
        let catalog = synthetic_catalog(size);
        let state = SessionState::new(&catalog, &config);
        group.bench_with_input(BenchmarkId::new("segments", size), &size, |b, _| {
            b.iter(|| derive_estimate(&state, &catalog, &config))
        });
    }

    group.finish();
}

criterion_group!(estimate_benches, bench_estimate);
criterion_main!(estimate_benches);
