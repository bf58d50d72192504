// src/engine/mod.rs

//! Normalize, solve, then compute metrics.

pub mod config;
pub mod metrics;
pub mod normal;
pub mod normalizer;
pub mod solver;

use crate::error::Result;
use crate::model::parameters::ParameterSet;
use crate::model::resolved::ResolvedParameterSet;
use config::EngineConfig;
use metrics::{CostPoint, MetricsReport};
use tracing::debug;

/// Stateless planning engine; holds configuration only.
#[derive(Debug, Clone, Default)]
pub struct EoqEngine {
    config: EngineConfig,
}

impl EoqEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs the normalizer and the solver once.
    pub fn resolve(&self, params: &ParameterSet) -> ResolvedParameterSet {
        let mut set = normalizer::normalize(params, &self.config);
        solver::solve(&mut set);
        debug!(
            known = set.entries().filter(|(_, v, _)| v.is_some()).count(),
            diagnostics = set.diagnostics().len(),
            "resolved parameters"
        );
        set
    }

    pub fn compute_metrics(&self, resolved: &ResolvedParameterSet) -> MetricsReport {
        metrics::compute_metrics(resolved)
    }

    pub fn cost_curve(&self, resolved: &ResolvedParameterSet) -> Result<Vec<CostPoint>> {
        metrics::cost_curve(resolved, self.config.cost_curve_points)
    }
}
