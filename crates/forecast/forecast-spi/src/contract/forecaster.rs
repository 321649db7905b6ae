//! The contract every forecasting strategy implements
//!
//! Strategies follow a fit-predict pattern: `fit` consumes a gap-free history
//! and returns an owned model value; `predict` extends that model `horizon`
//! steps and sizes intervals from the supplied context.

use crate::error::Result;
use crate::model::{Algorithm, ConfidenceInterval, IntervalContext};

/// Common trait for all forecasting strategies
///
/// # Example
///
/// ```rust,ignore
/// use forecast_spi::{Forecaster, IntervalContext};
///
/// fn extend<F: Forecaster>(f: &F, history: &[f64], horizon: usize) -> forecast_spi::Result<Vec<f64>> {
///     let model = f.fit(history)?;
///     Ok(f.predict(&model, horizon, &IntervalContext::new(0.95, 0))?.forecast)
/// }
/// ```
pub trait Forecaster {
    /// Fitted model state
    type Model;

    /// Which algorithm this strategy implements
    fn algorithm(&self) -> Algorithm;

    /// Minimum history length for a forecast of `horizon` periods
    fn min_history(&self, horizon: usize) -> usize;

    /// Fit the model to a gap-free history
    ///
    /// # Returns
    ///
    /// The fitted model, or an error when the history is too short or degenerate
    fn fit(&self, history: &[f64]) -> Result<Self::Model>;

    /// Predict `horizon` future values with intervals at `ctx.confidence_level`
    ///
    /// The returned interval always satisfies `lower <= forecast <= upper`.
    fn predict(
        &self,
        model: &Self::Model,
        horizon: usize,
        ctx: &IntervalContext,
    ) -> Result<ConfidenceInterval>;
}
