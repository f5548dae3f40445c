// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by mean-shift refinement.

use understory_kdtree::KdError;

/// Failures surfaced by images, configs, and the refinement loop.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MeanShiftError {
    /// The k-d tree rejected a point or query.
    #[error(transparent)]
    Tree(#[from] KdError),
    /// A weighted mean was requested over neighbors that carry no weight.
    #[error("cannot take a weighted mean of an empty neighborhood")]
    EmptyNeighborhood,
    /// A pixel buffer does not match the image dimensions.
    #[error("image has {found} pixels, dimensions require {expected}")]
    PixelCount {
        /// `width * height`.
        expected: usize,
        /// Length of the pixel buffer.
        found: usize,
    },
    /// `width * height` does not fit in `usize`.
    #[error("image of {width}x{height} pixels is too large")]
    ImageTooLarge {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// A configuration value is out of range.
    #[error("invalid mean-shift configuration: {0}")]
    InvalidConfig(&'static str),
}
