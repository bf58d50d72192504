// src/forecast/traits.rs

use crate::error::ForecastError;
use std::fmt::Debug;

/// A one-step-ahead demand forecasting method.
///
/// `Send` + `Sync` so a method can be shared across independent requests.
pub trait ForecastMethod: Debug + Send + Sync {
    /// Short name used in reports.
    fn name(&self) -> &'static str;

    /// Forecasts the next period from `history`, oldest observation first.
    fn forecast(&self, history: &[f64]) -> Result<f64, ForecastError>;
}
