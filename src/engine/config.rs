// src/engine/config.rs

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Weeks per year applied when the caller gives neither calendar constant.
    ///
    /// Days per year follow as `weeks * 7`, so the default calendar has 364
    /// days rather than 365.
    pub default_weeks_per_year: f64,
    /// Decimal places kept when values are presented.
    pub output_precision: u32,
    /// Samples taken by the cost curve between 1 and 2 * EOQ.
    pub cost_curve_points: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_weeks_per_year: 52.0,
            output_precision: 1,
            cost_curve_points: 500,
        }
    }
}
