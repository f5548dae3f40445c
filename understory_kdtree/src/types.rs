// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate scalars and the squared Euclidean metric.

use core::cmp::Ordering;
use core::fmt::Debug;

/// Numeric coordinate abstraction for k-d tree points.
///
/// Squared distances are accumulated in a widened type so that sums over
/// several axes neither overflow nor lose precision needlessly
/// (`u8`→`i64`, `i32`→`i128`, `i64`→`i128`, `f32`→`f64`).
///
/// For `u8` and `i32` the accumulator is exact for any realistic dimension.
/// For `i64` a squared distance saturates at `i128::MAX`, which only happens
/// once coordinates on one axis differ by more than about `1.3e19` (or several
/// axes sum past the limit). Saturated distances compare as equal.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Widened accumulator type for squared distances.
    type Acc: Copy + PartialOrd + Debug;

    /// Squared difference `(a - b)^2` in the accumulator type.
    fn sq_diff(a: Self, b: Self) -> Self::Acc;

    /// Add two accumulator values.
    fn acc_add(a: Self::Acc, b: Self::Acc) -> Self::Acc;

    /// Zero value for the accumulator type.
    fn acc_zero() -> Self::Acc;

    /// Whether the value is NaN. Always false for integer scalars.
    #[inline]
    fn is_nan(_v: Self) -> bool {
        false
    }
}

impl Scalar for u8 {
    type Acc = i64;

    #[inline]
    fn sq_diff(a: Self, b: Self) -> Self::Acc {
        let d = i64::from(a) - i64::from(b);
        d * d
    }

    #[inline]
    fn acc_add(a: Self::Acc, b: Self::Acc) -> Self::Acc {
        a.saturating_add(b)
    }

    #[inline]
    fn acc_zero() -> Self::Acc {
        0
    }
}

impl Scalar for i32 {
    type Acc = i128;

    #[inline]
    fn sq_diff(a: Self, b: Self) -> Self::Acc {
        let d = i128::from(a) - i128::from(b);
        d * d
    }

    #[inline]
    fn acc_add(a: Self::Acc, b: Self::Acc) -> Self::Acc {
        a.saturating_add(b)
    }

    #[inline]
    fn acc_zero() -> Self::Acc {
        0
    }
}

impl Scalar for i64 {
    type Acc = i128;

    #[inline]
    fn sq_diff(a: Self, b: Self) -> Self::Acc {
        let d = i128::from(a) - i128::from(b);
        d.saturating_mul(d)
    }

    #[inline]
    fn acc_add(a: Self::Acc, b: Self::Acc) -> Self::Acc {
        a.saturating_add(b)
    }

    #[inline]
    fn acc_zero() -> Self::Acc {
        0
    }
}

impl Scalar for f32 {
    type Acc = f64;

    #[inline]
    fn sq_diff(a: Self, b: Self) -> Self::Acc {
        let d = f64::from(a) - f64::from(b);
        d * d
    }

    #[inline]
    fn acc_add(a: Self::Acc, b: Self::Acc) -> Self::Acc {
        a + b
    }

    #[inline]
    fn acc_zero() -> Self::Acc {
        0.0
    }

    #[inline]
    fn is_nan(v: Self) -> bool {
        v.is_nan()
    }
}

impl Scalar for f64 {
    type Acc = Self;

    #[inline]
    fn sq_diff(a: Self, b: Self) -> Self::Acc {
        let d = a - b;
        d * d
    }

    #[inline]
    fn acc_add(a: Self::Acc, b: Self::Acc) -> Self::Acc {
        a + b
    }

    #[inline]
    fn acc_zero() -> Self::Acc {
        0.0
    }

    #[inline]
    fn is_nan(v: Self) -> bool {
        v.is_nan()
    }
}

/// Squared Euclidean distance between two points of equal length.
///
/// No square root is taken; compare results against squared radii.
#[inline]
pub fn squared_distance<T: Scalar>(a: &[T], b: &[T]) -> T::Acc {
    debug_assert_eq!(a.len(), b.len(), "points must have equal length");
    a.iter()
        .zip(b)
        .fold(T::acc_zero(), |acc, (&x, &y)| T::acc_add(acc, T::sq_diff(x, y)))
}

/// Helper alias for the widened accumulator type associated with a scalar `T`.
pub type ScalarAcc<T> = <T as Scalar>::Acc;

pub(crate) fn cmp_t<T: PartialOrd>(a: T, b: T) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

pub(crate) fn le<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Greater)
        .unwrap_or(false)
}

pub(crate) fn lt<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o == Ordering::Less)
        .unwrap_or(false)
}
