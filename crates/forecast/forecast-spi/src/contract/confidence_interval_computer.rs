//! Trait for confidence interval computation

use crate::model::ConfidenceInterval;

/// Sizes intervals around point forecasts from a sample of residuals
pub trait ConfidenceIntervalComputer: Send + Sync {
    /// Compute confidence intervals for forecasts
    fn compute(
        &self,
        forecast: &[f64],
        residuals: &[f64],
        confidence_level: f64,
    ) -> ConfidenceInterval;
}
