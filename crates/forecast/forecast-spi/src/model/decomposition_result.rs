//! Decomposition result model

use serde::{Deserialize, Serialize};

/// Additive decomposition `y = trend + seasonal + residual`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecompositionResult {
    /// Centered moving-average trend; `None` at the edges where the window does not fit
    pub trend: Vec<Option<f64>>,
    /// One additive index per phase of the period, summing to zero
    pub seasonal_indices: Vec<f64>,
    /// `y - trend - seasonal` where the trend is defined
    pub residual: Vec<Option<f64>>,
}

impl DecompositionResult {
    pub fn period(&self) -> usize {
        self.seasonal_indices.len()
    }

    /// Seasonal component at time index `t`.
    pub fn seasonal_at(&self, t: usize) -> f64 {
        if self.seasonal_indices.is_empty() {
            return 0.0;
        }
        self.seasonal_indices[t % self.seasonal_indices.len()]
    }

    /// `(t, trend)` pairs where the trend is defined.
    pub fn defined_trend(&self) -> Vec<(usize, f64)> {
        self.trend
            .iter()
            .enumerate()
            .filter_map(|(t, v)| v.map(|v| (t, v)))
            .collect()
    }
}
