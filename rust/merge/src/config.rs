// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Merge configuration.

use serde::Deserialize;

use crate::error::{Error, Result};

/// Tolerances and switches for one simplify call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Linear tolerance in model length units.
    pub tolerance: f64,
    /// Angular tolerance in degrees.
    pub angle_tolerance_degrees: f64,
    /// Unions with more input polygons than this log a warning.
    pub union_warning_threshold: usize,
    /// Merge clusters on the rayon thread pool.
    pub parallel: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            angle_tolerance_degrees: 1.0,
            union_warning_threshold: 100,
            parallel: false,
        }
    }
}

impl MergeConfig {
    pub fn new(tolerance: f64, angle_tolerance_degrees: f64) -> Self {
        Self {
            tolerance,
            angle_tolerance_degrees,
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            tolerance: std::env::var("ENVELOPE_MERGE_TOLERANCE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.tolerance),
            angle_tolerance_degrees: std::env::var("ENVELOPE_MERGE_ANGLE_TOLERANCE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.angle_tolerance_degrees),
            union_warning_threshold: std::env::var("ENVELOPE_MERGE_UNION_WARNING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.union_warning_threshold),
            parallel: std::env::var("ENVELOPE_MERGE_PARALLEL")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.parallel),
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_angle_tolerance_degrees(mut self, degrees: f64) -> Self {
        self.angle_tolerance_degrees = degrees;
        self
    }

    pub fn with_union_warning_threshold(mut self, threshold: usize) -> Self {
        self.union_warning_threshold = threshold;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Angular tolerance in radians.
    pub fn angle_tolerance(&self) -> f64 {
        self.angle_tolerance_degrees.to_radians()
    }

    /// Reject zero, negative and non-finite tolerances.
    pub fn validate(&self) -> Result<()> {
        check_positive("tolerance", self.tolerance)?;
        check_positive("angle tolerance", self.angle_tolerance_degrees)
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidTolerance { name, value })
    }
}
