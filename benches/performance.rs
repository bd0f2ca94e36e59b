// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scanalyzer::geometry::Primitive;
use scanalyzer::metrics::{average_aspect_ratio, curvature_stats, CancelToken, MetricContext};
use scanalyzer::{analyze, AnalysisConfig, Analyzer, GeometryKernel, NativeKernel};

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");

    for segments in [32u32, 64, 128] {
        let mesh = Primitive::sphere(10.0, segments).to_mesh();
        group.bench_with_input(BenchmarkId::new("sphere", segments), &mesh, |b, mesh| {
            b.iter(|| analyze(black_box(mesh)).unwrap());
        });
    }

    let torus = Primitive::torus(10.0, 3.0, 128, 64).to_mesh();
    group.bench_function("torus_parallel", |b| {
        b.iter(|| analyze(black_box(&torus)).unwrap());
    });

    let sequential = Analyzer::new().with_config(AnalysisConfig::default().with_parallel(false));
    group.bench_function("torus_sequential", |b| {
        b.iter(|| sequential.analyze(black_box(&torus)).unwrap());
    });

    group.finish();
}

fn bench_metrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics");

    let mesh = Primitive::sphere(10.0, 128).to_mesh();
    let cancel = CancelToken::new();
    let ctx = MetricContext::new(&cancel, 4096, true);
    let adjacency = NativeKernel.vertex_adjacency(&mesh).unwrap();

    group.bench_function("aspect_ratio", |b| {
        b.iter(|| average_aspect_ratio(black_box(&mesh), &ctx).unwrap());
    });

    group.bench_function("curvature_proxy", |b| {
        b.iter(|| curvature_stats(black_box(&mesh), &adjacency, &ctx).unwrap());
    });

    group.bench_function("convex_hull", |b| {
        b.iter(|| NativeKernel.convex_hull_volume(black_box(&mesh)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_analyze, bench_metrics);
criterion_main!(benches);
