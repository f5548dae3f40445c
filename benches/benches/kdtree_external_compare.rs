// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_kdtree::KdTree;

use rstar::{AABB, RTree};

fn gen_grid_points(n: usize, cell: f64) -> Vec<[f64; 3]> {
    let mut out = Vec::with_capacity(n * n * n);
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                out.push([x as f64 * cell, y as f64 * cell, z as f64 * cell]);
            }
        }
    }
    out
}

fn bench_kdtree_external_compare_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("kdtree_external_compare_f64");
    for &n in &[16usize, 32] {
        let points = gen_grid_points(n, 10.0);
        let center = [n as f64 * 5.0; 3];
        let lower = [n as f64 * 2.5; 3];
        let upper = [n as f64 * 7.5; 3];
        let radius_sq = (n as f64 * 2.0).powi(2);
        group.throughput(Throughput::Elements(points.len() as u64));

        group.bench_function(format!("understory_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || points.clone(),
                |points| {
                    let tree = KdTree::from_points(3, &points).unwrap();
                    let boxed = tree.range_search(&lower, &upper).unwrap().len();
                    let near = tree.get_neighbors(&center, radius_sq).unwrap().len();
                    let nearest = tree.nearest(&center).unwrap().map(|n| n.distance);
                    black_box((boxed, near, nearest));
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || points.clone(),
                |points| {
                    let tree = RTree::bulk_load(points);
                    let aabb = AABB::from_corners(lower, upper);
                    let boxed = tree.locate_in_envelope(&aabb).count();
                    let near = tree.locate_within_distance(center, radius_sq).count();
                    let nearest = tree.nearest_neighbor(&center).copied();
                    black_box((boxed, near, nearest));
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_kdtree_external_compare_f64);
criterion_main!(benches);
