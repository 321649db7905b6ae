//! Point forecasts with lower and upper bounds

use serde::{Deserialize, Serialize};

/// Per-step point forecast and interval bounds produced by a strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Point forecast
    pub forecast: Vec<f64>,
    /// Lower bound of confidence interval
    pub lower: Vec<f64>,
    /// Upper bound of confidence interval
    pub upper: Vec<f64>,
    /// Confidence level (e.g., 0.95 for 95%)
    pub confidence_level: f64,
}

impl ConfidenceInterval {
    /// Build from point forecasts and symmetric half-widths.
    pub fn symmetric(forecast: Vec<f64>, half_widths: &[f64], confidence_level: f64) -> Self {
        let lower = forecast
            .iter()
            .zip(half_widths)
            .map(|(&f, &w)| f - w.abs())
            .collect();
        let upper = forecast
            .iter()
            .zip(half_widths)
            .map(|(&f, &w)| f + w.abs())
            .collect();
        Self {
            forecast,
            lower,
            upper,
            confidence_level,
        }
    }

    /// Build from separately estimated bounds, widening them where needed so
    /// that `lower <= forecast <= upper` holds at every step.
    pub fn enclosing(
        forecast: Vec<f64>,
        lower: Vec<f64>,
        upper: Vec<f64>,
        confidence_level: f64,
    ) -> Self {
        let lower = forecast.iter().zip(&lower).map(|(&f, &l)| l.min(f)).collect();
        let upper = forecast.iter().zip(&upper).map(|(&f, &u)| u.max(f)).collect();
        Self {
            forecast,
            lower,
            upper,
            confidence_level,
        }
    }

    pub fn len(&self) -> usize {
        self.forecast.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forecast.is_empty()
    }

    /// Whether every step satisfies `lower <= forecast <= upper`.
    pub fn is_ordered(&self) -> bool {
        self.forecast.len() == self.lower.len()
            && self.forecast.len() == self.upper.len()
            && self
                .forecast
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(f, (l, u))| l <= f && f <= u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_bounds() {
        let ci = ConfidenceInterval::symmetric(vec![100.0, 200.0], &[10.0, 20.0], 0.95);
        assert_eq!(ci.lower, vec![90.0, 180.0]);
        assert_eq!(ci.upper, vec![110.0, 220.0]);
        assert!(ci.is_ordered());
    }

    #[test]
    fn test_symmetric_ignores_sign_of_width() {
        let ci = ConfidenceInterval::symmetric(vec![5.0], &[-1.0], 0.9);
        assert_eq!(ci.lower, vec![4.0]);
        assert_eq!(ci.upper, vec![6.0]);
    }

    #[test]
    fn test_enclosing_widens_to_contain_point() {
        let ci = ConfidenceInterval::enclosing(
            vec![100.0, 110.0],
            vec![101.0, 100.0],
            vec![120.0, 105.0],
            0.8,
        );
        assert_eq!(ci.lower, vec![100.0, 100.0]);
        assert_eq!(ci.upper, vec![120.0, 110.0]);
        assert!(ci.is_ordered());
    }

    #[test]
    fn test_zero_width() {
        let ci = ConfidenceInterval::symmetric(vec![100.0, 200.0], &[0.0, 0.0], 0.95);
        assert!(ci.is_ordered());
        assert_eq!(ci.lower, ci.forecast);
    }

    #[test]
    fn test_unordered_detected() {
        let ci = ConfidenceInterval {
            forecast: vec![100.0],
            lower: vec![105.0],
            upper: vec![110.0],
            confidence_level: 0.95,
        };
        assert!(!ci.is_ordered());
    }

    #[test]
    fn test_empty() {
        let ci = ConfidenceInterval::symmetric(vec![], &[], 0.95);
        assert!(ci.is_empty());
        assert_eq!(ci.len(), 0);
        assert!(ci.is_ordered());
    }
}
