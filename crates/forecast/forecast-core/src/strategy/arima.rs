//! ARIMA(p, d, q)
//!
//! AR coefficients come from the Yule-Walker equations (Levinson-Durbin),
//! MA coefficients from the autocorrelation of the AR residuals. Intervals
//! use the psi-weight expansion of the fitted model.

use forecast_spi::{
    Algorithm, ConfidenceInterval, ForecastError, Forecaster, IntervalContext, Result,
};
use serde::{Deserialize, Serialize};

use crate::confidence::z_score;

pub const MAX_AR_ORDER: usize = 5;
pub const MAX_DIFFERENCING: usize = 2;
pub const MAX_MA_ORDER: usize = 3;

/// Model order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArimaOrder {
    pub p: usize,
    pub d: usize,
    pub q: usize,
}

impl Default for ArimaOrder {
    fn default() -> Self {
        Self { p: 1, d: 1, q: 0 }
    }
}

impl ArimaOrder {
    pub fn new(p: usize, d: usize, q: usize) -> Result<Self> {
        if p > MAX_AR_ORDER {
            return Err(ForecastError::invalid_parameter(
                "p",
                format!("AR order must be <= {}", MAX_AR_ORDER),
            ));
        }
        if d > MAX_DIFFERENCING {
            return Err(ForecastError::invalid_parameter(
                "d",
                format!("Differencing order must be <= {}", MAX_DIFFERENCING),
            ));
        }
        if q > MAX_MA_ORDER {
            return Err(ForecastError::invalid_parameter(
                "q",
                format!("MA order must be <= {}", MAX_MA_ORDER),
            ));
        }
        Ok(Self { p, d, q })
    }

    fn total(&self) -> usize {
        self.p + self.d + self.q
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArimaModel {
    pub order: ArimaOrder,
    pub ar_coeffs: Vec<f64>,
    pub ma_coeffs: Vec<f64>,
    pub constant: f64,
    differenced: Vec<f64>,
    residuals: Vec<f64>,
    /// Last value at each differencing level, outermost first
    tails: Vec<f64>,
    sigma2: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ArimaLike {
    order: ArimaOrder,
}

impl ArimaLike {
    pub fn new(order: ArimaOrder) -> Self {
        Self { order }
    }

    pub fn order(&self) -> ArimaOrder {
        self.order
    }

    fn fit_requirement(&self) -> usize {
        self.order.total() + 5
    }
}

fn difference(data: &[f64]) -> Vec<f64> {
    data.windows(2).map(|w| w[1] - w[0]).collect()
}

fn estimate_ar_coefficients(data: &[f64], p: usize) -> Vec<f64> {
    if p == 0 || data.is_empty() {
        return Vec::new();
    }

    let n = data.len();
    let mean: f64 = data.iter().sum::<f64>() / n as f64;
    let centered: Vec<f64> = data.iter().map(|x| x - mean).collect();

    let mut autocorr = vec![0.0; p + 1];
    for (k, slot) in autocorr.iter_mut().enumerate() {
        let sum: f64 = (k..n).map(|i| centered[i] * centered[i - k]).sum();
        *slot = sum / n as f64;
    }

    // Levinson-Durbin
    let mut coeffs = vec![0.0; p];
    if autocorr[0].abs() > 1e-10 {
        coeffs[0] = autocorr[1] / autocorr[0];

        for k in 1..p {
            let mut sum = autocorr[k + 1];
            let mut denom = autocorr[0];
            for j in 0..k {
                sum -= coeffs[j] * autocorr[k - j];
                denom -= coeffs[j] * autocorr[j + 1];
            }

            if denom.abs() > 1e-10 {
                let reflection = sum / denom;
                let previous = coeffs.clone();
                coeffs[k] = reflection;
                for j in 0..k {
                    coeffs[j] = previous[j] - reflection * previous[k - 1 - j];
                }
            }
        }
    }

    coeffs
}

fn estimate_ma_coefficients(residuals: &[f64], q: usize) -> Vec<f64> {
    if q == 0 || residuals.is_empty() {
        return vec![0.0; q];
    }

    let n = residuals.len();
    let mean: f64 = residuals.iter().sum::<f64>() / n as f64;
    let centered: Vec<f64> = residuals.iter().map(|x| x - mean).collect();
    let var: f64 = centered.iter().map(|x| x * x).sum::<f64>() / n as f64;

    let mut coeffs = vec![0.0; q];
    if var.abs() > 1e-10 {
        for (k, coeff) in coeffs.iter_mut().enumerate() {
            let sum: f64 = ((k + 1)..n).map(|i| centered[i] * centered[i - k - 1]).sum();
            // bounded for invertibility
            *coeff = ((sum / n as f64) / var).clamp(-0.99, 0.99);
        }
    }

    coeffs
}

impl ArimaModel {
    /// Psi weights of the integrated model, `psi[0] == 1`.
    fn psi_weights(&self, horizon: usize) -> Vec<f64> {
        let mut psi = vec![0.0; horizon];
        if horizon == 0 {
            return psi;
        }
        psi[0] = 1.0;
        for j in 1..horizon {
            let mut value = self.ma_coeffs.get(j - 1).copied().unwrap_or(0.0);
            for (i, phi) in self.ar_coeffs.iter().enumerate().take(j) {
                value += phi * psi[j - i - 1];
            }
            psi[j] = value;
        }
        for _ in 0..self.order.d {
            let mut running = 0.0;
            for weight in psi.iter_mut() {
                running += *weight;
                *weight = running;
            }
        }
        psi
    }

    fn undifference(&self, forecasts: Vec<f64>) -> Vec<f64> {
        let mut result = forecasts;
        for &last in self.tails.iter().rev() {
            let mut level = last;
            for value in result.iter_mut() {
                level += *value;
                *value = level;
            }
        }
        result
    }
}

impl Forecaster for ArimaLike {
    type Model = ArimaModel;

    fn algorithm(&self) -> Algorithm {
        Algorithm::ArimaLike
    }

    fn min_history(&self, _horizon: usize) -> usize {
        self.order.total() + 10
    }

    fn fit(&self, history: &[f64]) -> Result<ArimaModel> {
        let required = self.fit_requirement();
        if history.len() < required {
            return Err(ForecastError::InsufficientData {
                algorithm: Algorithm::ArimaLike,
                required,
                actual: history.len(),
            });
        }
        if history.iter().any(|x| !x.is_finite()) {
            return Err(ForecastError::NumericalError(
                "Data contains NaN or infinite values".to_string(),
            ));
        }

        let ArimaOrder { p, d, q } = self.order;
        let mut tails = Vec::with_capacity(d);
        let mut differenced = history.to_vec();
        for _ in 0..d {
            if let Some(&last) = differenced.last() {
                tails.push(last);
            }
            differenced = difference(&differenced);
        }

        let ar_coeffs = estimate_ar_coefficients(&differenced, p);
        let n = differenced.len();
        let constant = differenced.iter().sum::<f64>() / n as f64;

        let mut residuals = vec![0.0; n];
        for i in p..n {
            let mut prediction = constant;
            for (j, phi) in ar_coeffs.iter().enumerate() {
                prediction += phi * (differenced[i - j - 1] - constant);
            }
            residuals[i] = differenced[i] - prediction;
        }

        let ma_coeffs = estimate_ma_coefficients(&residuals, q);
        let effective = &residuals[p..];
        let sigma2 = effective.iter().map(|r| r * r).sum::<f64>() / effective.len().max(1) as f64;

        Ok(ArimaModel {
            order: self.order,
            ar_coeffs,
            ma_coeffs,
            constant,
            differenced,
            residuals,
            tails,
            sigma2,
        })
    }

    fn predict(
        &self,
        model: &ArimaModel,
        horizon: usize,
        ctx: &IntervalContext,
    ) -> Result<ConfidenceInterval> {
        let n = model.differenced.len();
        let mut extended = model.differenced.clone();
        let mut extended_residuals = model.residuals.clone();

        for _ in 0..horizon {
            let mut forecast = model.constant;
            for (j, phi) in model.ar_coeffs.iter().enumerate() {
                forecast += phi * (extended[extended.len() - j - 1] - model.constant);
            }
            for (j, theta) in model.ma_coeffs.iter().enumerate() {
                if let Some(idx) = extended_residuals.len().checked_sub(j + 1) {
                    forecast += theta * extended_residuals[idx];
                }
            }
            extended.push(forecast);
            // future shocks have expectation zero
            extended_residuals.push(0.0);
        }

        let forecast = model.undifference(extended.split_off(n));
        if forecast.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::NumericalError(
                "ARIMA forecast diverged".to_string(),
            ));
        }

        let z = z_score(ctx.confidence_level);
        let mut cumulative = 0.0;
        let widths: Vec<f64> = model
            .psi_weights(horizon)
            .iter()
            .map(|psi| {
                cumulative += psi * psi;
                z * (model.sigma2 * cumulative).sqrt()
            })
            .collect();

        Ok(ConfidenceInterval::symmetric(
            forecast,
            &widths,
            ctx.confidence_level,
        ))
    }
}
