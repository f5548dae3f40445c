// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Understory k-d tree: insert, nearest, radius, and box queries.

use understory_kdtree::KdTree;

fn main() {
    let mut tree: KdTree<i32> = KdTree::new(2).expect("dimension is non-zero");
    for p in [[1, 1], [2, 2], [0, -1], [2, -1]] {
        tree.insert(&p).expect("points are 2D");
    }
    println!("tree: {tree:?}");

    let nearest = tree.nearest(&[0, 0]).expect("query is 2D");
    println!("nearest to (0,0): {nearest:?}");

    let neighbors = tree.get_neighbors(&[2, 0], 4).expect("query is 2D");
    println!("within r²=4 of (2,0): {neighbors:?}");

    let boxed = tree.range_search(&[0, 0], &[2, 2]).expect("corners are 2D");
    println!("inside [(0,0), (2,2)]: {boxed:?}");
}
