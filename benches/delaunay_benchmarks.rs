//! Benchmarks comparing the two triangulators.
//!
//! This benchmark suite measures:
//! - The constant-workspace walker, streaming and collecting
//! - The incremental builder
//! - The geometric predicates both of them lean on
//! - Validation of a finished triangulation

#![allow(missing_docs)] // Allow missing docs for criterion-generated functions

use constant_workspace_delaunay::geometry::predicates::{in_circle, orient};
use constant_workspace_delaunay::{
    ConstantWorkspaceWalker, IncrementalBuilder, Point, PointGenerator, Triangulator,
    validate_triangulation,
};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

const SIZES: [usize; 5] = [16, 32, 64, 128, 256];

fn bench_points(count: usize) -> Vec<Point> {
    // the cocircularity filter is cubic per candidate; skip it for benchmark inputs
    PointGenerator::with_seed(count as u64)
        .cocircular_tolerance(None)
        .generate(count)
        .expect("Failed to generate benchmark points")
}

/// Benchmark both triangulators over increasing input sizes
fn bench_triangulators(c: &mut Criterion) {
    let mut group = c.benchmark_group("triangulate");
    group.sample_size(20);

    for count in SIZES {
        let points = bench_points(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(
            BenchmarkId::new("constant_workspace", count),
            &points,
            |b, points| {
                b.iter(|| {
                    let mut emitted = 0_usize;
                    ConstantWorkspaceWalker::new()
                        .for_each_triangle(black_box(points), |_| emitted += 1);
                    black_box(emitted)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("incremental", count),
            &points,
            |b, points| {
                let mut builder = IncrementalBuilder::with_seed(1);
                b.iter(|| black_box(builder.triangulate(black_box(points))));
            },
        );
    }
    group.finish();
}

/// Benchmark collecting the walker's output into a triangulation
fn bench_walker_collect(c: &mut Criterion) {
    let points = bench_points(64);
    c.bench_function("constant_workspace_collect_64", |b| {
        let mut walker = ConstantWorkspaceWalker::new();
        b.iter(|| black_box(walker.triangulate(black_box(&points))));
    });
}

/// Benchmark the predicates
fn bench_predicates(c: &mut Criterion) {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(4.0, 0.1);
    let p = Point::new(1.7, 3.9);
    let q = Point::new(2.0, 2.01);

    let mut group = c.benchmark_group("predicates");
    group.bench_function("orient", |bench| {
        bench.iter(|| black_box(orient(black_box(a), black_box(b), black_box(p))));
    });
    group.bench_function("in_circle", |bench| {
        bench.iter(|| {
            black_box(in_circle(
                black_box(a),
                black_box(b),
                black_box(p),
                black_box(q),
            ))
        });
    });
    group.finish();
}

/// Benchmark validation of a finished triangulation
fn bench_validation(c: &mut Criterion) {
    let points = bench_points(64);
    let triangulation = IncrementalBuilder::with_seed(1)
        .triangulate(&points)
        .expect("Failed to triangulate benchmark points");

    c.bench_function("validate_triangulation_64", |b| {
        b.iter(|| black_box(validate_triangulation(black_box(&triangulation))));
    });
}

criterion_group!(
    benches,
    bench_triangulators,
    bench_walker_collect,
    bench_predicates,
    bench_validation
);
criterion_main!(benches);
