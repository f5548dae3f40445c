// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gaussian-kernel weighted mean of neighboring colors.

use understory_kdtree::{KdError, squared_distance};

use crate::error::MeanShiftError;
use crate::image::Rgb;

/// Weighted mean of `neighbors` around `pixel`.
///
/// Each neighbor is weighted by `exp(-d² / window²)`, where `d²` is its squared
/// distance to `pixel`. Channels are rounded to the nearest integer.
///
/// Returns [`MeanShiftError::EmptyNeighborhood`] when there are no neighbors
/// (or none with a representable weight), and a
/// [`KdError::DimensionMismatch`] when a neighbor is not three channels long.
pub fn weighted_mean<'a, I>(
    pixel: Rgb,
    neighbors: I,
    window: f64,
) -> Result<Rgb, MeanShiftError>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut weighted = Vec::new();
    for color in neighbors {
        if color.len() != pixel.len() {
            return Err(KdError::DimensionMismatch {
                expected: pixel.len(),
                found: color.len(),
            }
            .into());
        }
        weighted.push((squared_distance(pixel.as_slice(), color), color));
    }
    kernel_mean(weighted, window)
}

/// Euclidean distance between two pixels.
pub fn displacement(a: Rgb, b: Rgb) -> f64 {
    (squared_distance(a.as_slice(), b.as_slice()) as f64).sqrt()
}

/// Weighted mean over neighbors paired with their squared distances.
pub(crate) fn kernel_mean<'a, I>(neighbors: I, window: f64) -> Result<Rgb, MeanShiftError>
where
    I: IntoIterator<Item = (i64, &'a [u8])>,
{
    let h2 = window * window;
    let mut num = [0.0_f64; 3];
    let mut denom = 0.0_f64;
    for (d, color) in neighbors {
        let w = (-(d as f64) / h2).exp();
        for (n, &c) in num.iter_mut().zip(color) {
            *n += f64::from(c) * w;
        }
        denom += w;
    }
    if denom <= 0.0 {
        return Err(MeanShiftError::EmptyNeighborhood);
    }
    Ok(num.map(|n| to_channel(n / denom)))
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "The value is rounded and clamped to the u8 range before the cast."
)]
fn to_channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
