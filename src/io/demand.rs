// src/io/demand.rs

use crate::error::ReportError;
use crate::forecast::accuracy::Observation;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::path::Path;

/// Parses a comma separated list of numbers, e.g. "120, 130, 110".
pub fn parse_series(text: &str) -> Result<Vec<f64>, ReportError> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>().map_err(|_| ReportError::Parse {
                line: 1,
                value: s.to_string(),
            })
        })
        .collect()
}

/// Reads a demand history from a CSV file with a header row.
///
/// The last column of each record is taken as the demand, so both a single
/// `demand` column and `period,demand` layouts work.
pub fn read_demand_series(path: impl AsRef<Path>) -> Result<Vec<f64>, ReportError> {
    let mut rdr = csv::Reader::from_path(path)?;
    let mut series = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let Some(raw) = record.iter().last() else {
            continue;
        };
        let value = raw.trim().parse::<f64>().map_err(|_| ReportError::Parse {
            // header is line 1
            line: i + 2,
            value: raw.to_string(),
        })?;
        series.push(value);
    }
    Ok(series)
}

/// Reads `period,forecast,demand` rows for the accuracy calculator.
pub fn read_observations(path: impl AsRef<Path>) -> Result<Vec<Observation>, ReportError> {
    let mut rdr = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for record in rdr.deserialize() {
        let row: Observation = record?;
        rows.push(row);
    }
    Ok(rows)
}

/// Generates a demand history from a Normal distribution.
///
/// Samples are rounded to whole units and clamped at zero since demand
/// cannot be negative. The same seed always yields the same history.
///
/// # Arguments
/// * `periods` - Length of the history.
/// * `mean` - Average demand per period.
/// * `std_dev` - Volatility of demand per period.
/// * `seed` - Seed for the random number generator.
pub fn generate_normal_demand(
    periods: usize,
    mean: f64,
    std_dev: f64,
    seed: u64,
) -> Result<Vec<f64>, rand_distr::NormalError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(mean, std_dev)?;

    Ok((0..periods)
        .map(|_| normal.sample(&mut rng).round().max(0.0))
        .collect())
}
