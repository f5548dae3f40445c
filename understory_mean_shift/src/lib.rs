// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Mean Shift: color refinement of RGB images over a k-d tree.
//!
//! Mean shift moves every pixel's color toward the kernel-weighted mean of the
//! image's original colors near it, iterating until colors stop moving. Pixels
//! that start in the same color mode end up sharing a single color, which
//! flattens an image into clusters.
//!
//! - [`ColorImage`] wraps a flat row-major buffer of [`Rgb`] pixels.
//! - [`MeanShift::refine`] runs the loop using a [`MeanShiftConfig`].
//! - [`recolor_clusters`] paints each resulting cluster a random color.
//!
//! Neighbor lookups go through [`understory_kdtree::KdTree`], built once per
//! run from the starting colors. With the default `parallel` feature each
//! iteration shifts pixels on the rayon thread pool; the result is identical
//! to the sequential loop because a pixel's update only reads its own color
//! and the fixed tree.
//!
//! # Example
//!
//! ```rust
//! use understory_mean_shift::{ColorImage, MeanShift, MeanShiftConfig};
//!
//! let pixels = vec![[10, 10, 10], [12, 12, 12], [14, 14, 14], [200, 200, 200]];
//! let mut image = ColorImage::new(2, 2, pixels).unwrap();
//!
//! let shift = MeanShift::new(MeanShiftConfig::default()).unwrap();
//! let outcome = shift.refine(&mut image).unwrap();
//! assert!(outcome.converged);
//! assert_eq!(image.distinct_colors(), 2);
//! ```
//!
//! Progress is reported through `tracing`: one `info` event when a run starts
//! and ends, and one `debug` event per iteration with its mean displacement.

pub mod config;
pub mod error;
pub mod image;
pub mod kernel;
pub mod recolor;
pub mod refine;

pub use config::MeanShiftConfig;
pub use error::MeanShiftError;
pub use image::{ColorImage, Rgb};
pub use kernel::{displacement, weighted_mean};
pub use recolor::recolor_clusters;
pub use refine::{MeanShift, Outcome};
