// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_kdtree::KdTree;
use understory_mean_shift::{ColorImage, MeanShift, MeanShiftConfig, Rgb};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
    fn next_u8(&mut self) -> u8 {
        self.next_u64().to_le_bytes()[0]
    }
}

fn gen_points_f64(count: usize, extent: f64, seed: u64) -> Vec<[f64; 3]> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| {
            [
                rng.next_f64() * extent,
                rng.next_f64() * extent,
                rng.next_f64() * extent,
            ]
        })
        .collect()
}

fn gen_colors(count: usize, seed: u64) -> Vec<Rgb> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| [rng.next_u8(), rng.next_u8(), rng.next_u8()])
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("kdtree_build");
    for &n in &[1_000usize, 10_000, 100_000] {
        let points = gen_points_f64(n, 1000.0, 0xCAFE_F00D_DEAD_BEEF);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("insert_n{}", n), |b| {
            b.iter(|| {
                let mut tree = KdTree::<f64>::new(3).unwrap();
                tree.reserve(points.len());
                for p in &points {
                    tree.insert(p).unwrap();
                }
                black_box(tree.len());
            })
        });
        group.bench_function(format!("bulk_n{}", n), |b| {
            b.iter(|| {
                let tree = KdTree::from_points(3, &points).unwrap();
                black_box(tree.len());
            })
        });
    }
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("kdtree_queries_f64");
    let n = 50_000;
    let points = gen_points_f64(n, 1000.0, 0xBADC_F00D_1234_5678);
    let queries = gen_points_f64(1_000, 1000.0, 0xC1A5_7E55_9999_ABCD);
    let tree = KdTree::from_points(3, &points).unwrap();
    group.throughput(Throughput::Elements(queries.len() as u64));

    group.bench_function("nearest", |b| {
        b.iter(|| {
            for q in &queries {
                black_box(tree.nearest(q).unwrap());
            }
        })
    });
    group.bench_function("nearest_greedy", |b| {
        b.iter(|| {
            for q in &queries {
                black_box(tree.nearest_greedy(q).unwrap());
            }
        })
    });
    group.bench_function("get_neighbors_r30", |b| {
        b.iter(|| {
            let hits: usize = queries
                .iter()
                .map(|q| tree.get_neighbors(q, 30.0 * 30.0).unwrap().len())
                .sum();
            black_box(hits);
        })
    });
    group.bench_function("range_search_box60", |b| {
        b.iter(|| {
            let hits: usize = queries
                .iter()
                .map(|q| {
                    let lower = q.map(|c| c - 30.0);
                    let upper = q.map(|c| c + 30.0);
                    tree.range_search(&lower, &upper).unwrap().len()
                })
                .sum();
            black_box(hits);
        })
    });
    group.bench_function("brute_force_neighbors_r30", |b| {
        b.iter(|| {
            let hits: usize = queries
                .iter()
                .map(|q| {
                    points
                        .iter()
                        .filter(|p| {
                            understory_kdtree::squared_distance(q.as_slice(), p.as_slice())
                                <= 30.0 * 30.0
                        })
                        .count()
                })
                .sum();
            black_box(hits);
        })
    });
    group.finish();
}

fn bench_mean_shift(c: &mut Criterion) {
    let mut group = c.benchmark_group("mean_shift");
    group.sample_size(10);
    for &side in &[32usize, 64] {
        let pixels = gen_colors(side * side, 0xFACE_FEED_CAFE_BABE);
        group.throughput(Throughput::Elements((side * side) as u64));
        group.bench_function(format!("refine_{}x{}", side, side), |b| {
            let shift = MeanShift::new(MeanShiftConfig::default().with_max_iterations(5)).unwrap();
            b.iter_batched(
                || ColorImage::new(side, side, pixels.clone()).unwrap(),
                |mut image| {
                    let outcome = shift.refine(&mut image).unwrap();
                    black_box(outcome);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_queries, bench_mean_shift);
criterion_main!(benches);
