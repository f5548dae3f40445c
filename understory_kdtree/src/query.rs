// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Traversal engine: nearest point, radius neighbors, and box queries.
//!
//! All traversals use an explicit stack, so query cost in call-stack depth is
//! constant no matter how degenerate the tree is.

use alloc::vec::Vec;

use crate::error::KdError;
use crate::tree::{KdTree, NodeIdx};
use crate::types::{Scalar, le, lt, squared_distance};

/// Result of a nearest-point query.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Nearest<'a, T: Scalar> {
    /// Squared Euclidean distance to the query point.
    pub distance: T::Acc,
    /// The stored point.
    pub point: &'a [T],
}

/// Pending subtree visit for the nearest search.
///
/// `bound` is a lower bound on the squared distance from the query to anything
/// in the subtree; the near side carries no bound.
type Pending<T> = (NodeIdx, usize, Option<<T as Scalar>::Acc>);

impl<T: Scalar> KdTree<T> {
    /// Find the stored point closest to `point`.
    ///
    /// Returns `Ok(None)` for an empty tree. The near side of each split is
    /// searched first; the far side is only entered when the splitting plane is
    /// closer than the best distance found so far. Among several points at the
    /// same distance, the first one reached wins.
    pub fn nearest(&self, point: &[T]) -> Result<Option<Nearest<'_, T>>, KdError> {
        self.check_dim(point)?;
        let mut best: Option<(T::Acc, NodeIdx)> = None;
        let mut stack: Vec<Pending<T>> = self.root.map(|r| (r, 0, None)).into_iter().collect();
        while let Some((idx, depth, bound)) = stack.pop() {
            if let (Some(bound), Some((best_d, _))) = (bound, best)
                && le(best_d, bound)
            {
                continue;
            }
            let here = self.point(idx);
            let d = squared_distance(point, here);
            if best.is_none_or(|(best_d, _)| lt(d, best_d)) {
                best = Some((d, idx));
            }

            let axis = depth % self.dim;
            let node = &self.nodes[idx.get()];
            let (near, far) = if lt(point[axis], here[axis]) {
                (node.left, node.right)
            } else {
                (node.right, node.left)
            };
            if let Some(far) = far {
                stack.push((far, depth + 1, Some(T::sq_diff(point[axis], here[axis]))));
            }
            if let Some(near) = near {
                stack.push((near, depth + 1, None));
            }
        }
        Ok(best.map(|(distance, idx)| Nearest {
            distance,
            point: self.point(idx),
        }))
    }

    /// Nearest-point search that only descends below nodes which improve on the
    /// best distance found so far.
    ///
    /// This is cheaper than [`nearest`](Self::nearest) but incomplete: when a
    /// node is no closer than the current best, its whole subtree is skipped,
    /// even if a closer point lives there. Prefer [`nearest`](Self::nearest)
    /// unless reproducing that behavior is the point.
    pub fn nearest_greedy(&self, point: &[T]) -> Result<Option<Nearest<'_, T>>, KdError> {
        self.check_dim(point)?;
        let mut best: Option<(T::Acc, NodeIdx)> = None;
        let mut stack: Vec<NodeIdx> = self.root.into_iter().collect();
        while let Some(idx) = stack.pop() {
            let d = squared_distance(point, self.point(idx));
            if best.is_some_and(|(best_d, _)| !lt(d, best_d)) {
                continue;
            }
            best = Some((d, idx));
            // Left subtree is finished before the right one starts.
            let node = &self.nodes[idx.get()];
            stack.extend(node.right);
            stack.extend(node.left);
        }
        Ok(best.map(|(distance, idx)| Nearest {
            distance,
            point: self.point(idx),
        }))
    }

    /// All stored points within squared distance `radius_sq` of `point`
    /// (inclusive).
    ///
    /// Order is unspecified. A point inserted several times is returned once
    /// per copy.
    pub fn get_neighbors(&self, point: &[T], radius_sq: T::Acc) -> Result<Vec<&[T]>, KdError> {
        let mut out = Vec::new();
        self.visit_within(point, radius_sq, |_, p| out.push(p))?;
        Ok(out)
    }

    /// Like [`get_neighbors`](Self::get_neighbors), paired with each point's
    /// squared distance to `point`.
    pub fn neighbors_with_distance(
        &self,
        point: &[T],
        radius_sq: T::Acc,
    ) -> Result<Vec<(T::Acc, &[T])>, KdError> {
        let mut out = Vec::new();
        self.visit_within(point, radius_sq, |d, p| out.push((d, p)))?;
        Ok(out)
    }

    fn visit_within<'a>(
        &'a self,
        point: &[T],
        radius_sq: T::Acc,
        mut f: impl FnMut(T::Acc, &'a [T]),
    ) -> Result<(), KdError> {
        self.check_dim(point)?;
        if !le(T::acc_zero(), radius_sq) {
            return Err(KdError::NegativeRadius);
        }
        let mut stack: Vec<(NodeIdx, usize)> = self.root.map(|r| (r, 0)).into_iter().collect();
        while let Some((idx, depth)) = stack.pop() {
            let here = self.point(idx);
            let d = squared_distance(point, here);
            if le(d, radius_sq) {
                f(d, here);
            }

            let axis = depth % self.dim;
            let node = &self.nodes[idx.get()];
            let (near, far) = if lt(point[axis], here[axis]) {
                (node.left, node.right)
            } else {
                (node.right, node.left)
            };
            if let Some(near) = near {
                stack.push((near, depth + 1));
            }
            if let Some(far) = far
                && le(T::sq_diff(point[axis], here[axis]), radius_sq)
            {
                stack.push((far, depth + 1));
            }
        }
        Ok(())
    }

    /// All stored points inside the inclusive axis-aligned box
    /// `lower[i] <= p[i] <= upper[i]` for every axis `i`.
    ///
    /// Order is unspecified.
    pub fn range_search(&self, lower: &[T], upper: &[T]) -> Result<Vec<&[T]>, KdError> {
        self.check_dim(lower)?;
        self.check_dim(upper)?;
        if let Some(axis) = (0..self.dim).find(|&i| lt(upper[i], lower[i])) {
            return Err(KdError::InvertedRange { axis });
        }

        let mut out = Vec::new();
        let mut stack: Vec<(NodeIdx, usize)> = self.root.map(|r| (r, 0)).into_iter().collect();
        while let Some((idx, depth)) = stack.pop() {
            let here = self.point(idx);
            let axis = depth % self.dim;
            let node = &self.nodes[idx.get()];
            if lt(upper[axis], here[axis]) {
                stack.extend(node.left.map(|c| (c, depth + 1)));
            } else if lt(here[axis], lower[axis]) {
                stack.extend(node.right.map(|c| (c, depth + 1)));
            } else {
                if in_box(lower, upper, here) {
                    out.push(here);
                }
                stack.extend(node.left.map(|c| (c, depth + 1)));
                stack.extend(node.right.map(|c| (c, depth + 1)));
            }
        }
        Ok(out)
    }
}

fn in_box<T: Scalar>(lower: &[T], upper: &[T], p: &[T]) -> bool {
    p.iter()
        .zip(lower.iter().zip(upper))
        .all(|(&c, (&lo, &hi))| le(lo, c) && le(c, hi))
}
