//! Time-series forecasting and forecast accuracy.

pub mod accuracy;
pub mod methods;
pub mod traits;
