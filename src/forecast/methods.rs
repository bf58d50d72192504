// src/forecast/methods.rs

use crate::error::ForecastError;
use crate::forecast::traits::ForecastMethod;

// =========================================================================
// 1. Simple Moving Average
// =========================================================================

/// Mean of the last `window` observations.
#[derive(Debug, Clone)]
pub struct SimpleMovingAverage {
    window: usize,
}

impl SimpleMovingAverage {
    pub fn new(window: usize) -> Self {
        Self { window }
    }
}

impl ForecastMethod for SimpleMovingAverage {
    fn name(&self) -> &'static str {
        "Simple Moving Average"
    }

    fn forecast(&self, history: &[f64]) -> Result<f64, ForecastError> {
        if history.is_empty() {
            return Err(ForecastError::EmptyHistory);
        }
        if self.window == 0 || self.window > history.len() {
            return Err(ForecastError::InvalidWindow {
                window: self.window,
                len: history.len(),
            });
        }
        let recent = &history[history.len() - self.window..];
        Ok(recent.iter().sum::<f64>() / self.window as f64)
    }
}

// =========================================================================
// 2. Weighted Moving Average
// =========================================================================

/// Dot product of the last `weights.len()` observations with the weights.
///
/// Weights line up with the history oldest first, so the last weight applies
/// to the most recent period. They are used as given; a set that does not
/// sum to 1 scales the forecast accordingly.
#[derive(Debug, Clone)]
pub struct WeightedMovingAverage {
    weights: Vec<f64>,
}

impl WeightedMovingAverage {
    pub fn new(weights: Vec<f64>) -> Self {
        Self { weights }
    }
}

impl ForecastMethod for WeightedMovingAverage {
    fn name(&self) -> &'static str {
        "Weighted Moving Average"
    }

    fn forecast(&self, history: &[f64]) -> Result<f64, ForecastError> {
        if history.is_empty() {
            return Err(ForecastError::EmptyHistory);
        }
        if self.weights.is_empty() || self.weights.len() > history.len() {
            return Err(ForecastError::InvalidWeights {
                weights: self.weights.len(),
                len: history.len(),
            });
        }
        let recent = &history[history.len() - self.weights.len()..];
        Ok(recent.iter().zip(&self.weights).map(|(d, w)| d * w).sum())
    }
}

// =========================================================================
// 3. Exponential Smoothing
// =========================================================================

/// Single-step update: `alpha * observed + (1 - alpha) * prior`.
pub fn exponential_smoothing(alpha: f64, prior_forecast: f64, observed_demand: f64) -> f64 {
    alpha * observed_demand + (1.0 - alpha) * prior_forecast
}

/// Runs the single-step update over the whole history.
///
/// Seeded with `initial` when given, otherwise with the first observation.
#[derive(Debug, Clone)]
pub struct ExponentialSmoothing {
    alpha: f64,
    initial: Option<f64>,
}

impl ExponentialSmoothing {
    pub fn new(alpha: f64, initial: Option<f64>) -> Self {
        Self { alpha, initial }
    }
}

impl ForecastMethod for ExponentialSmoothing {
    fn name(&self) -> &'static str {
        "Exponential Smoothing"
    }

    fn forecast(&self, history: &[f64]) -> Result<f64, ForecastError> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(ForecastError::InvalidAlpha(self.alpha));
        }
        let (seed, rest) = match (self.initial, history) {
            (_, []) => return Err(ForecastError::EmptyHistory),
            (Some(initial), all) => (initial, all),
            (None, [first, rest @ ..]) => (*first, rest),
        };
        Ok(rest
            .iter()
            .fold(seed, |prior, &observed| exponential_smoothing(self.alpha, prior, observed)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HISTORY: [f64; 5] = [120.0, 130.0, 110.0, 140.0, 150.0];

    #[test]
    fn sma_uses_latest_window() {
        let sma = SimpleMovingAverage::new(3);
        assert_eq!(sma.forecast(&HISTORY).unwrap(), (110.0 + 140.0 + 150.0) / 3.0);
    }

    #[test]
    fn sma_rejects_window_longer_than_history() {
        let sma = SimpleMovingAverage::new(6);
        assert_eq!(
            sma.forecast(&HISTORY),
            Err(ForecastError::InvalidWindow { window: 6, len: 5 })
        );
        assert_eq!(
            SimpleMovingAverage::new(0).forecast(&HISTORY),
            Err(ForecastError::InvalidWindow { window: 0, len: 5 })
        );
    }

    #[test]
    fn wma_weights_latest_period_last() {
        let wma = WeightedMovingAverage::new(vec![0.2, 0.3, 0.5]);
        let expected = 110.0 * 0.2 + 140.0 * 0.3 + 150.0 * 0.5;
        assert!((wma.forecast(&HISTORY).unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn wma_rejects_too_many_weights() {
        let wma = WeightedMovingAverage::new(vec![0.1; 6]);
        assert_eq!(
            wma.forecast(&HISTORY),
            Err(ForecastError::InvalidWeights { weights: 6, len: 5 })
        );
    }

    #[test]
    fn single_step_smoothing() {
        assert!((exponential_smoothing(0.2, 100.0, 120.0) - 104.0).abs() < 1e-9);
    }

    #[test]
    fn smoothing_seeded_by_first_observation() {
        let es = ExponentialSmoothing::new(0.5, None);
        // 100 -> 110 -> 105
        assert_eq!(es.forecast(&[100.0, 120.0, 100.0]).unwrap(), 105.0);
    }

    #[test]
    fn smoothing_with_explicit_seed() {
        let es = ExponentialSmoothing::new(0.5, Some(80.0));
        // 80 -> 90 -> 105
        assert_eq!(es.forecast(&[100.0, 120.0]).unwrap(), 105.0);
    }

    #[test]
    fn smoothing_rejects_bad_alpha() {
        let es = ExponentialSmoothing::new(1.5, None);
        assert_eq!(es.forecast(&HISTORY), Err(ForecastError::InvalidAlpha(1.5)));
    }
}
