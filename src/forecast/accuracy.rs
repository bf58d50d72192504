// src/forecast/accuracy.rs

//! Forecast error per period and its summary statistics.

use crate::error::ForecastError;
use serde::{Deserialize, Serialize};

/// One period of forecast against realized demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub period: String,
    pub forecast: f64,
    pub demand: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorRow {
    pub period: String,
    pub forecast: f64,
    pub demand: f64,
    /// demand - forecast
    pub error: f64,
    pub absolute_error: f64,
    /// |error| / demand, as a fraction.
    pub percentage_error: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AccuracySummary {
    /// Mean of the signed errors (bias).
    pub mean_error: f64,
    /// Mean absolute deviation.
    pub mad: f64,
    /// Mean absolute percentage error, as a fraction.
    pub mape: f64,
}

pub fn error_rows(observations: &[Observation]) -> Result<Vec<ErrorRow>, ForecastError> {
    observations
        .iter()
        .map(|obs| {
            if obs.demand == 0.0 {
                return Err(ForecastError::ZeroDemand(obs.period.clone()));
            }
            let error = obs.demand - obs.forecast;
            Ok(ErrorRow {
                period: obs.period.clone(),
                forecast: obs.forecast,
                demand: obs.demand,
                error,
                absolute_error: error.abs(),
                percentage_error: error.abs() / obs.demand,
            })
        })
        .collect()
}

pub fn summarize(rows: &[ErrorRow]) -> Result<AccuracySummary, ForecastError> {
    if rows.is_empty() {
        return Err(ForecastError::EmptyHistory);
    }
    let n = rows.len() as f64;
    Ok(AccuracySummary {
        mean_error: rows.iter().map(|r| r.error).sum::<f64>() / n,
        mad: rows.iter().map(|r| r.absolute_error).sum::<f64>() / n,
        mape: rows.iter().map(|r| r.percentage_error).sum::<f64>() / n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(period: &str, forecast: f64, demand: f64) -> Observation {
        Observation {
            period: period.to_string(),
            forecast,
            demand,
        }
    }

    #[test]
    fn error_is_demand_minus_forecast() {
        let rows = error_rows(&[obs("Jan-24", 100.0, 80.0), obs("Feb-24", 90.0, 120.0)]).unwrap();
        assert_eq!(rows[0].error, -20.0);
        assert_eq!(rows[0].absolute_error, 20.0);
        assert_eq!(rows[0].percentage_error, 0.25);
        assert_eq!(rows[1].error, 30.0);
    }

    #[test]
    fn summary_statistics() {
        let rows = error_rows(&[obs("Jan-24", 100.0, 80.0), obs("Feb-24", 90.0, 120.0)]).unwrap();
        let summary = summarize(&rows).unwrap();
        assert_eq!(summary.mean_error, 5.0);
        assert_eq!(summary.mad, 25.0);
        assert!((summary.mape - (0.25 + 0.25) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn zero_demand_is_rejected() {
        assert_eq!(
            error_rows(&[obs("Mar-24", 10.0, 0.0)]),
            Err(ForecastError::ZeroDemand("Mar-24".to_string()))
        );
    }

    #[test]
    fn empty_summary_is_rejected() {
        assert_eq!(summarize(&[]), Err(ForecastError::EmptyHistory));
    }
}
