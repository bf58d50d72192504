//! Error types for the planning engine, forecasting and reporting.

use crate::model::field::Field;
use thiserror::Error;

/// Conditions raised while resolving parameters or computing a metric.
///
/// All variants are local and recoverable: a metric that fails does not stop
/// the other metrics from being computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A prerequisite field is not resolved.
    #[error("insufficient parameters to calculate {target}: missing {}", join_fields(.missing))]
    InsufficientParameters {
        target: &'static str,
        missing: Vec<Field>,
    },

    /// A required divisor is present but exactly zero.
    #[error("cannot calculate {target}: {field} is zero")]
    DegenerateInput { target: &'static str, field: Field },

    /// A supplied EOQ is zero or negative and cannot be used for back-derivation.
    #[error("supplied EOQ {value} is not positive; back-derivation skipped")]
    InvalidEoqOverride { value: f64 },

    /// An input lies outside its admissible range.
    #[error("{field} = {value} is out of range")]
    OutOfRange { field: Field, value: f64 },
}

impl EngineError {
    pub fn insufficient(target: &'static str, missing: Vec<Field>) -> Self {
        Self::InsufficientParameters { target, missing }
    }

    pub fn degenerate(target: &'static str, field: Field) -> Self {
        Self::DegenerateInput { target, field }
    }
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors from the time-series and forecast-accuracy calculators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForecastError {
    #[error("demand history is empty")]
    EmptyHistory,

    #[error("window of {window} periods does not fit a history of {len}")]
    InvalidWindow { window: usize, len: usize },

    #[error("{weights} weights do not fit a history of {len}")]
    InvalidWeights { weights: usize, len: usize },

    #[error("smoothing factor {0} must lie in [0, 1]")]
    InvalidAlpha(f64),

    #[error("demand is zero in period '{0}'; percentage error is undefined")]
    ZeroDemand(String),
}

/// Errors from reading inputs or writing reports.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid number '{value}' on line {line}")]
    Parse { line: usize, value: String },

    #[error("invalid demand distribution: {0}")]
    Distribution(#[from] rand_distr::NormalError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
