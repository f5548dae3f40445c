// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The iterative refinement loop.

use understory_kdtree::KdTree;

use crate::config::MeanShiftConfig;
use crate::error::MeanShiftError;
use crate::image::{ColorImage, Rgb};
use crate::kernel::{displacement, kernel_mean};

/// Summary of a [`MeanShift::refine`] run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Outcome {
    /// Iterations performed.
    pub iterations: usize,
    /// Mean per-pixel displacement of the last iteration.
    pub mean_displacement: f64,
    /// Whether the displacement dropped below the stop threshold.
    pub converged: bool,
}

/// Mean-shift color refinement.
///
/// The k-d tree is built once from the colors the image holds when
/// [`refine`](Self::refine) starts; every iteration shifts the current colors
/// toward the kernel-weighted mean of those original colors.
#[derive(Clone, Debug)]
pub struct MeanShift {
    config: MeanShiftConfig,
}

impl MeanShift {
    /// Create a refiner after validating `config`.
    pub fn new(config: MeanShiftConfig) -> Result<Self, MeanShiftError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &MeanShiftConfig {
        &self.config
    }

    /// Build the color tree for an image.
    pub fn color_tree(image: &ColorImage) -> Result<KdTree<u8>, MeanShiftError> {
        Ok(KdTree::from_points(3, image.pixels())?)
    }

    /// Move one color to the weighted mean of its neighbors in `tree`.
    pub fn shift_pixel(&self, tree: &KdTree<u8>, pixel: Rgb) -> Result<Rgb, MeanShiftError> {
        let neighbors = tree.neighbors_with_distance(&pixel, self.config.radius_sq())?;
        kernel_mean(neighbors, self.config.window)
    }

    /// Refine `image` in place until the mean displacement of an iteration is
    /// below `stop_delta`, or `max_iterations` is reached.
    pub fn refine(&self, image: &mut ColorImage) -> Result<Outcome, MeanShiftError> {
        if image.pixels().is_empty() {
            return Ok(Outcome {
                iterations: 0,
                mean_displacement: 0.0,
                converged: true,
            });
        }
        let tree = Self::color_tree(image)?;
        let count = image.pixels().len() as f64;
        tracing::info!(
            width = image.width(),
            height = image.height(),
            window = self.config.window,
            stop_delta = self.config.stop_delta,
            "starting mean-shift refinement"
        );

        let mut mean_displacement = f64::INFINITY;
        for iteration in 1..=self.config.max_iterations {
            let shifted = self.shift_all(&tree, image.pixels())?;
            let total: f64 = image
                .pixels()
                .iter()
                .zip(&shifted)
                .map(|(&a, &b)| displacement(a, b))
                .sum();
            image.pixels_mut().copy_from_slice(&shifted);
            mean_displacement = total / count;
            tracing::debug!(iteration, mean_displacement, "mean-shift iteration");

            if mean_displacement < self.config.stop_delta {
                tracing::info!(iterations = iteration, "mean-shift converged");
                return Ok(Outcome {
                    iterations: iteration,
                    mean_displacement,
                    converged: true,
                });
            }
        }

        tracing::warn!(
            max_iterations = self.config.max_iterations,
            mean_displacement,
            "mean-shift stopped before converging"
        );
        Ok(Outcome {
            iterations: self.config.max_iterations,
            mean_displacement,
            converged: false,
        })
    }

    #[cfg(feature = "parallel")]
    fn shift_all(&self, tree: &KdTree<u8>, pixels: &[Rgb]) -> Result<Vec<Rgb>, MeanShiftError> {
        use rayon::prelude::*;
        pixels
            .par_iter()
            .map(|&p| self.shift_pixel(tree, p))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn shift_all(&self, tree: &KdTree<u8>, pixels: &[Rgb]) -> Result<Vec<Rgb>, MeanShiftError> {
        pixels.iter().map(|&p| self.shift_pixel(tree, p)).collect()
    }
}
