// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat RGB pixel arrays.

use crate::error::MeanShiftError;

/// One 8-bit RGB pixel.
pub type Rgb = [u8; 3];

/// A row-major RGB image held as a flat pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorImage {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl ColorImage {
    /// Wrap a row-major pixel buffer of `width * height` pixels.
    pub fn new(width: usize, height: usize, pixels: Vec<Rgb>) -> Result<Self, MeanShiftError> {
        let expected = width.saturating_mul(height);
        if width.checked_mul(height) != Some(pixels.len()) {
            return Err(MeanShiftError::PixelCount {
                expected,
                found: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// An image filled with a single color.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Result<Self, MeanShiftError> {
        let count = width
            .checked_mul(height)
            .ok_or(MeanShiftError::ImageTooLarge { width, height })?;
        Ok(Self {
            width,
            height,
            pixels: vec![color; count],
        })
    }

    /// Pixels per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixels in row-major order.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Mutable pixels in row-major order.
    pub fn pixels_mut(&mut self) -> &mut [Rgb] {
        &mut self.pixels
    }

    /// Consume the image and return its pixel buffer.
    pub fn into_pixels(self) -> Vec<Rgb> {
        self.pixels
    }

    /// Iterate over rows of `width` pixels each.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> + '_ {
        self.pixels.chunks(self.width.max(1))
    }

    /// Number of distinct colors in the image.
    pub fn distinct_colors(&self) -> usize {
        let mut colors = self.pixels.clone();
        colors.sort_unstable();
        colors.dedup();
        colors.len()
    }
}
