// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory k-d tree: a point index over fixed-dimension coordinates.
//!
//! - Insert points one at a time, or bulk-build a balanced tree from a collection.
//! - Query the nearest stored point, all points within a squared radius, or all
//!   points inside an inclusive axis-aligned box.
//!
//! Coordinates are generic over a [`Scalar`] (`u8`, `i32`, `i64`, `f32`, `f64`).
//! Distances are squared Euclidean, accumulated in a widened type
//! (`u8`→`i64`, `i32`/`i64`→`i128`, `f32`/`f64`→`f64`), so radii are passed
//! squared as well.
//!
//! # Example
//!
//! ```rust
//! use understory_kdtree::KdTree;
//!
//! let mut tree: KdTree<i32> = KdTree::new(2).unwrap();
//! for p in [[1, 1], [2, 2], [0, -1], [2, -1]] {
//!     tree.insert(&p).unwrap();
//! }
//!
//! let nearest = tree.nearest(&[0, 0]).unwrap().unwrap();
//! assert_eq!(nearest.point, &[0, -1]);
//! assert_eq!(nearest.distance, 1);
//!
//! let mut boxed = tree.range_search(&[0, 0], &[2, 2]).unwrap();
//! boxed.sort();
//! assert_eq!(boxed, [&[1, 1][..], &[2, 2][..]]);
//!
//! // Squared radius 2 around the origin reaches (1,1) and (0,-1).
//! assert_eq!(tree.get_neighbors(&[0, 0], 2).unwrap().len(), 2);
//! ```
//!
//! Bulk building splits on the median at every level, which keeps the height
//! logarithmic no matter what order the input arrives in:
//!
//! ```rust
//! use understory_kdtree::KdTree;
//!
//! let colors: Vec<[u8; 3]> = (0..=255).map(|v| [v, 255 - v, v ^ 0x5a]).collect();
//! let tree = KdTree::from_points(3, &colors).unwrap();
//! assert_eq!(tree.len(), 256);
//! assert_eq!(tree.height(), 9);
//! ```
//!
//! ## Splits and ties
//!
//! A node at depth `d` splits on axis `d % dim`. Points strictly less than the
//! node on that axis live in its left subtree; points greater **or equal** live
//! in its right subtree. Nodes are never removed or rebalanced.
//!
//! ## Traversal
//!
//! Every operation walks the tree with an explicit stack, so a degenerate tree
//! (e.g. from inserting sorted points) costs time but never call-stack depth.
//! Queries only borrow the tree, so independent queries can run in parallel.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates. Debug builds assert.

#![no_std]

extern crate alloc;

pub mod error;
pub mod query;
pub mod tree;
pub mod types;

pub use error::KdError;
pub use query::Nearest;
pub use tree::{KdTree, NodeRef};
pub use types::{Scalar, ScalarAcc, squared_distance};
