// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! k-d tree queries over random 3D points.
//!
//! Builds one tree by bulk build and one by sorted insertion, runs the same
//! queries against both, and counts how often the greedy nearest search misses.
//!
//! Run:
//! - `cargo run -p understory_demos --example kdtree_queries`

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use understory_kdtree::KdTree;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("trace")),
        )
        .init();

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut points: Vec<[i32; 3]> = (0..2_000)
        .map(|_| {
            [
                rng.gen_range(0..1000),
                rng.gen_range(0..1000),
                rng.gen_range(0..1000),
            ]
        })
        .collect();

    let bulk = KdTree::from_points(3, &points).expect("points are 3D");
    points.sort_unstable();
    let mut sorted = KdTree::<i32>::new(3).expect("dimension is non-zero");
    for p in &points {
        sorted.insert(p).expect("points are 3D");
    }
    println!("bulk:   {bulk:?}");
    println!("sorted: {sorted:?}");

    let mut greedy_misses = 0;
    for _ in 0..500 {
        let q = [
            rng.gen_range(0..1000),
            rng.gen_range(0..1000),
            rng.gen_range(0..1000),
        ];
        let exact = bulk.nearest(&q).expect("query is 3D").expect("tree is not empty");
        let other = sorted.nearest(&q).expect("query is 3D").expect("tree is not empty");
        assert_eq!(exact.distance, other.distance, "tree shape must not change answers");
        let greedy = bulk.nearest_greedy(&q).expect("query is 3D").expect("tree is not empty");
        if greedy.distance != exact.distance {
            greedy_misses += 1;
        }
    }
    println!("greedy nearest missed the true nearest point on {greedy_misses}/500 queries");

    let center = [500, 500, 500];
    let near = bulk.get_neighbors(&center, 100 * 100).expect("query is 3D");
    let boxed = bulk
        .range_search(&[400, 400, 400], &[600, 600, 600])
        .expect("corners are 3D");
    println!(
        "{} points within 100 of the center, {} inside the central box",
        near.len(),
        boxed.len()
    );
}
