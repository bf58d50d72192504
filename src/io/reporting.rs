// src/io/reporting.rs

use crate::engine::metrics::MetricsReport;
use crate::error::ReportError;
use crate::model::resolved::ResolvedParameterSet;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Decimal places kept for parameter values in reports.
pub const PARAMETER_PRECISION: u32 = 4;

/// Rounds to `decimals` places. Only ever applied to presented values.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterRow {
    pub parameter: &'static str,
    pub value: Option<f64>,
    pub calculation: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub metric: &'static str,
    pub value: Option<f64>,
    pub calculation: &'static str,
    pub error: Option<String>,
}

/// One row per field: its value and either "Given" or the formula used.
pub fn parameter_rows(resolved: &ResolvedParameterSet) -> Vec<ParameterRow> {
    resolved
        .entries()
        .map(|(field, value, provenance)| ParameterRow {
            parameter: field.label(),
            value: value.map(|v| round_to(v, PARAMETER_PRECISION)),
            calculation: provenance.label(),
        })
        .collect()
}

/// One row per metric, rounded to `precision`, with the error text when the
/// metric could not be computed.
pub fn metric_rows(report: &MetricsReport, precision: u32) -> Vec<MetricRow> {
    report
        .iter()
        .map(|(metric, result)| MetricRow {
            metric: metric.label(),
            value: result.as_ref().ok().map(|&v| round_to(v, precision)),
            calculation: metric.formula(),
            error: result.as_ref().err().map(ToString::to_string),
        })
        .collect()
}

/// Writes any serializable rows to a CSV file with a header row.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "reports/eoq.csv").
/// * `rows` - The records to write, in order.
pub fn write_rows<T: Serialize>(file_path: impl AsRef<Path>, rows: &[T]) -> Result<(), ReportError> {
    let path = file_path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;

    for row in rows {
        wtr.serialize(row)?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;

    info!(rows = rows.len(), path = %path.display(), "report written");
    Ok(())
}
