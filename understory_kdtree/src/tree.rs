// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree store: node arena, insertion, and median bulk build.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::ops::Range;

use crate::error::KdError;
use crate::types::{Scalar, cmp_t, lt};

/// A k-d tree over points of a fixed dimensionality.
///
/// Nodes live in an arena and reference their children by index. Every node at
/// depth `d` splits on axis `d % dim`: points in its left subtree are strictly
/// less than it on that axis, points in its right subtree are greater or equal.
///
/// The tree only grows. Nodes are never removed, moved, or rebalanced after
/// they are linked in.
#[derive(Clone)]
pub struct KdTree<T: Scalar> {
    pub(crate) dim: usize,
    /// Flat coordinate buffer; point `id` occupies `id * dim..(id + 1) * dim`.
    pub(crate) coords: Vec<T>,
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: Option<NodeIdx>,
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) point: usize,
    pub(crate) left: Option<NodeIdx>,
    pub(crate) right: Option<NodeIdx>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeIdx(usize);

impl NodeIdx {
    const fn new(i: usize) -> Self {
        Self(i)
    }

    pub(crate) const fn get(self) -> usize {
        self.0
    }
}

/// Where a freshly created node gets linked.
#[derive(Copy, Clone, Debug)]
enum Link {
    Root,
    Left(NodeIdx),
    Right(NodeIdx),
}

impl<T: Scalar> KdTree<T> {
    /// Create an empty tree for points with `dim` coordinates.
    pub fn new(dim: usize) -> Result<Self, KdError> {
        if dim == 0 {
            return Err(KdError::ZeroDimension);
        }
        Ok(Self {
            dim,
            coords: Vec::new(),
            nodes: Vec::new(),
            root: None,
        })
    }

    /// Build a tree from a collection of points, splitting on the median of the
    /// current axis at every level.
    ///
    /// For distinct coordinates the resulting height is `O(log n)`. Duplicate
    /// coordinates on a split axis all land in the right subtree.
    pub fn from_points<I, P>(dim: usize, points: I) -> Result<Self, KdError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[T]>,
    {
        let mut tree = Self::new(dim)?;
        for p in points {
            let p = p.as_ref();
            tree.check_dim(p)?;
            tree.coords.extend_from_slice(p);
        }
        let n = tree.coords.len() / dim;
        tree.nodes.reserve_exact(n);
        let mut ids: Vec<usize> = (0..n).collect();
        tree.build(&mut ids);
        tracing::trace!(dim, points = n, height = tree.height(), "bulk-built k-d tree");
        Ok(tree)
    }

    /// Insert a point.
    ///
    /// Descends from the root, going left when the point is strictly less than
    /// the node on the split axis and right otherwise, and links a new leaf into
    /// the first empty child slot.
    pub fn insert(&mut self, point: &[T]) -> Result<(), KdError> {
        self.check_dim(point)?;
        let id = self.coords.len() / self.dim;
        self.coords.extend_from_slice(point);

        let mut link = Link::Root;
        let mut cursor = self.root;
        let mut depth = 0;
        while let Some(cur) = cursor {
            let axis = depth % self.dim;
            let node = &self.nodes[cur.get()];
            if lt(point[axis], self.coord(cur, axis)) {
                link = Link::Left(cur);
                cursor = node.left;
            } else {
                link = Link::Right(cur);
                cursor = node.right;
            }
            depth += 1;
        }
        let node = self.push_node(id);
        self.link(link, node);
        Ok(())
    }

    /// Reserve space for at least `n` more points.
    pub fn reserve(&mut self, n: usize) {
        self.nodes.reserve(n);
        self.coords.reserve(n.saturating_mul(self.dim));
    }

    /// Number of coordinates per point.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of points stored.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if no points are stored.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes on the longest root-to-leaf path (0 when empty).
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(NodeIdx, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((idx, level)) = stack.pop() {
            height = height.max(level);
            let node = &self.nodes[idx.get()];
            stack.extend(node.left.map(|c| (c, level + 1)));
            stack.extend(node.right.map(|c| (c, level + 1)));
        }
        height
    }

    /// The root node, if any.
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.root.map(|idx| NodeRef {
            tree: self,
            idx,
            depth: 0,
        })
    }

    /// Iterate over all stored points in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.coords.chunks_exact(self.dim)
    }

    pub(crate) fn check_dim(&self, point: &[T]) -> Result<(), KdError> {
        if point.len() != self.dim {
            return Err(KdError::DimensionMismatch {
                expected: self.dim,
                found: point.len(),
            });
        }
        debug_assert!(
            !point.iter().any(|&c| T::is_nan(c)),
            "k-d tree coordinates must not be NaN"
        );
        Ok(())
    }

    pub(crate) fn point(&self, idx: NodeIdx) -> &[T] {
        let start = self.nodes[idx.get()].point * self.dim;
        &self.coords[start..start + self.dim]
    }

    fn coord(&self, idx: NodeIdx, axis: usize) -> T {
        self.coords[self.nodes[idx.get()].point * self.dim + axis]
    }

    fn push_node(&mut self, point: usize) -> NodeIdx {
        let idx = NodeIdx::new(self.nodes.len());
        self.nodes.push(Node {
            point,
            left: None,
            right: None,
        });
        idx
    }

    fn link(&mut self, link: Link, child: NodeIdx) {
        match link {
            Link::Root => self.root = Some(child),
            Link::Left(parent) => self.nodes[parent.get()].left = Some(child),
            Link::Right(parent) => self.nodes[parent.get()].right = Some(child),
        }
    }

    /// Link the points named by `ids` into the tree, one median per pending range.
    fn build(&mut self, ids: &mut [usize]) {
        let mut pending: Vec<(Range<usize>, usize, Link)> = vec![(0..ids.len(), 0, Link::Root)];
        while let Some((range, depth, link)) = pending.pop() {
            if range.is_empty() {
                continue;
            }
            let axis = depth % self.dim;
            let items = &mut ids[range.clone()];
            let pivot = partition_median(&self.coords, self.dim, axis, items);
            let node = self.push_node(items[pivot]);
            self.link(link, node);
            let split = range.start + pivot;
            pending.push((split + 1..range.end, depth + 1, Link::Right(node)));
            pending.push((range.start..split, depth + 1, Link::Left(node)));
        }
    }
}

/// Reorder `items` so that the returned position holds a median point on
/// `axis`, everything before it is strictly less, and everything after it is
/// greater or equal.
fn partition_median<T: Scalar>(
    coords: &[T],
    dim: usize,
    axis: usize,
    items: &mut [usize],
) -> usize {
    let key = |id: usize| coords[id * dim + axis];
    let mid = items.len() / 2;
    items.select_nth_unstable_by(mid, |&a, &b| cmp_t(key(a), key(b)));
    let median = key(items[mid]);

    // Ties must go right: pull the strictly-smaller prefix ahead of any equal keys.
    let mut lo = 0;
    for i in 0..mid {
        if lt(key(items[i]), median) {
            items.swap(i, lo);
            lo += 1;
        }
    }
    items.swap(lo, mid);
    lo
}

impl<T: Scalar> Debug for KdTree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KdTree")
            .field("dim", &self.dim)
            .field("len", &self.nodes.len())
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

/// Read-only view of one node and its position in the tree.
#[derive(Copy, Clone)]
pub struct NodeRef<'a, T: Scalar> {
    tree: &'a KdTree<T>,
    idx: NodeIdx,
    depth: usize,
}

impl<'a, T: Scalar> NodeRef<'a, T> {
    /// The point stored at this node.
    pub fn point(&self) -> &'a [T] {
        self.tree.point(self.idx)
    }

    /// Depth of this node (the root is at depth 0).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Split axis of this node, `depth % dim`.
    pub fn axis(&self) -> usize {
        self.depth % self.tree.dim
    }

    /// Subtree of points strictly less on the split axis.
    pub fn left(&self) -> Option<Self> {
        self.child(self.tree.nodes[self.idx.get()].left)
    }

    /// Subtree of points greater or equal on the split axis.
    pub fn right(&self) -> Option<Self> {
        self.child(self.tree.nodes[self.idx.get()].right)
    }

    fn child(&self, idx: Option<NodeIdx>) -> Option<Self> {
        idx.map(|idx| Self {
            tree: self.tree,
            idx,
            depth: self.depth + 1,
        })
    }
}

impl<T: Scalar> Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NodeRef")
            .field("point", &self.point())
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}
