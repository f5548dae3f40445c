// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by tree construction and queries.

/// Invalid arguments passed to a [`KdTree`](crate::KdTree) operation.
///
/// An empty tree or an empty result set is not an error: `nearest` returns
/// `Ok(None)` and the collecting queries return an empty `Vec`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum KdError {
    /// A tree was requested with zero dimensions.
    #[error("k-d tree dimension must be at least 1")]
    ZeroDimension,
    /// A point's length differs from the tree's dimensionality.
    #[error("point has {found} coordinates, tree expects {expected}")]
    DimensionMismatch {
        /// Dimensionality of the tree.
        expected: usize,
        /// Length of the offending point.
        found: usize,
    },
    /// A squared radius was negative or NaN.
    #[error("squared radius must be a non-negative number")]
    NegativeRadius,
    /// A range query's lower corner exceeds its upper corner.
    #[error("range lower bound exceeds upper bound on axis {axis}")]
    InvertedRange {
        /// First axis where `lower > upper`.
        axis: usize,
    },
}
