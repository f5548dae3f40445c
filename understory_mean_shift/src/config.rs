// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Refinement parameters.

use crate::error::MeanShiftError;

/// Parameters of the mean-shift refinement loop.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MeanShiftConfig {
    /// Kernel bandwidth in color units. Neighbors are gathered within
    /// `window^2` squared distance and weighted by `exp(-d² / window²)`.
    pub window: f64,
    /// The loop stops once the mean per-pixel displacement of an iteration
    /// drops below this value.
    pub stop_delta: f64,
    /// Upper bound on iterations; reaching it reports a non-converged outcome.
    pub max_iterations: usize,
}

impl Default for MeanShiftConfig {
    fn default() -> Self {
        Self {
            window: 35.0,
            stop_delta: 0.5,
            max_iterations: 100,
        }
    }
}

impl MeanShiftConfig {
    /// Set the kernel bandwidth.
    pub fn with_window(mut self, window: f64) -> Self {
        self.window = window;
        self
    }

    /// Set the convergence threshold.
    pub fn with_stop_delta(mut self, stop_delta: f64) -> Self {
        self.stop_delta = stop_delta;
        self
    }

    /// Set the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<(), MeanShiftError> {
        if !(self.window.is_finite() && self.window > 0.0) {
            return Err(MeanShiftError::InvalidConfig(
                "window must be finite and positive",
            ));
        }
        if !(self.stop_delta.is_finite() && self.stop_delta >= 0.0) {
            return Err(MeanShiftError::InvalidConfig(
                "stop_delta must be finite and non-negative",
            ));
        }
        if self.max_iterations == 0 {
            return Err(MeanShiftError::InvalidConfig(
                "max_iterations must be at least 1",
            ));
        }
        Ok(())
    }

    /// Neighbor radius in the tree's squared-distance units.
    ///
    /// Squared distances between 8-bit colors are integers, so flooring
    /// `window^2` selects exactly the same neighbors.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "A validated window squared is far below i64::MAX for any meaningful color bandwidth."
    )]
    pub fn radius_sq(&self) -> i64 {
        (self.window * self.window).floor() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = MeanShiftConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.radius_sq(), 1225);
    }

    #[test]
    fn builder_overrides() {
        let config = MeanShiftConfig::default()
            .with_window(2.5)
            .with_stop_delta(0.0)
            .with_max_iterations(3);
        assert_eq!(config.window, 2.5);
        assert_eq!(config.stop_delta, 0.0);
        assert_eq!(config.max_iterations, 3);
        assert_eq!(config.radius_sq(), 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let base = MeanShiftConfig::default();
        for bad in [
            base.with_window(0.0),
            base.with_window(-1.0),
            base.with_window(f64::NAN),
            base.with_window(f64::INFINITY),
            base.with_stop_delta(-0.1),
            base.with_stop_delta(f64::NAN),
            base.with_max_iterations(0),
        ] {
            assert!(
                matches!(bad.validate(), Err(MeanShiftError::InvalidConfig(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
