//! eoq-planner - inventory control engine
//!
//! Infers the missing parameters of the economic order quantity model from
//! whatever subset a planner knows, then derives safety stock, reorder point,
//! annual costs and order cadence. A small forecasting toolkit (moving
//! averages, exponential smoothing, forecast accuracy) sits alongside.
//!
//! # Example
//!
//! ```rust
//! use eoq_planner::{compute_metrics, resolve, Field, ParameterSet};
//!
//! let params = ParameterSet {
//!     demand_weekly: Some(18.0),
//!     weeks_per_year: Some(52.0),
//!     ordering_cost: Some(45.0),
//!     purchase_cost: Some(60.0),
//!     holding_cost_rate: Some(0.25),
//!     ..Default::default()
//! };
//!
//! let resolved = resolve(&params);
//! assert_eq!(resolved.get(Field::AnnualDemand), Some(936.0));
//! assert_eq!(resolved.get(Field::HoldingCostPerUnit), Some(15.0));
//!
//! let metrics = compute_metrics(&resolved);
//! let holding = metrics.annual_holding_cost.unwrap();
//! assert!((holding - 562.05).abs() < 0.01);
//! // Safety stock needs a service level, a standard deviation and a lead time.
//! assert!(metrics.safety_stock.is_err());
//! ```
//!
//! # Pipeline
//!
//! | Stage | Module | Role |
//! |-------|--------|------|
//! | Normalize | [`engine::normalizer`] | calendar, demand, variability and lead time onto a day basis |
//! | Solve | [`engine::solver`] | EOQ identity and its inverses, holding cost rate, z-score |
//! | Metrics | [`engine::metrics`] | safety stock, reorder point, costs, cadence |

pub mod engine;
pub mod error;
pub mod forecast;
pub mod io;
pub mod model;

pub use engine::config::EngineConfig;
pub use engine::metrics::{CostPoint, Metric, MetricsReport};
pub use engine::solver::economic_order_quantity;
pub use engine::EoqEngine;
pub use error::{EngineError, ForecastError, ReportError, Result};
pub use model::field::Field;
pub use model::parameters::ParameterSet;
pub use model::resolved::{Provenance, ResolvedParameterSet};

/// Normalizes and solves `params` with the default configuration.
pub fn resolve(params: &ParameterSet) -> ResolvedParameterSet {
    EoqEngine::default().resolve(params)
}

/// Computes all eight metrics; each succeeds or fails on its own.
pub fn compute_metrics(resolved: &ResolvedParameterSet) -> MetricsReport {
    engine::metrics::compute_metrics(resolved)
}
