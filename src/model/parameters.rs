// src/model/parameters.rs

/// The partial set of inputs a planner supplies.
///
/// Every quantity is independently optional. `None` means "not supplied",
/// which is distinct from a supplied zero: the engine reports the latter as a
/// degenerate input wherever it is used as a divisor.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    /// Demand in units per day. Highest precedence of the three demand inputs.
    pub demand_rate: Option<f64>,
    /// Demand in units per week.
    pub demand_weekly: Option<f64>,
    /// Demand in units per year.
    pub demand_yearly: Option<f64>,

    pub purchase_cost: Option<f64>,
    /// Annual holding cost as a fraction of the purchase cost.
    pub holding_cost_rate: Option<f64>,
    /// Annual holding cost per unit. Overrides `holding_cost_rate * purchase_cost`.
    pub holding_cost_per_unit: Option<f64>,
    pub ordering_cost: Option<f64>,

    /// Standard deviation of demand per week.
    pub standard_deviation: Option<f64>,
    /// Standard deviation of demand per day. Wins over the weekly figure.
    pub standard_deviation_per_day: Option<f64>,

    /// Lead time in weeks.
    pub lead_time: Option<f64>,
    /// Lead time in days. Wins over the weekly figure.
    pub lead_time_days: Option<f64>,

    /// Target probability of no stockout during lead time, in (0, 1).
    pub service_level: Option<f64>,
    /// Used as given instead of the quantile of `service_level`.
    pub z_score: Option<f64>,

    pub weeks_per_year: Option<f64>,
    pub days_per_year: Option<f64>,

    /// A previously known economic order quantity.
    pub eoq: Option<f64>,

    /// When false, safety stock, its cost and the reorder point are zero.
    pub holding_enabled: bool,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            demand_rate: None,
            demand_weekly: None,
            demand_yearly: None,
            purchase_cost: None,
            holding_cost_rate: None,
            holding_cost_per_unit: None,
            ordering_cost: None,
            standard_deviation: None,
            standard_deviation_per_day: None,
            lead_time: None,
            lead_time_days: None,
            service_level: None,
            z_score: None,
            weeks_per_year: None,
            days_per_year: None,
            eoq: None,
            holding_enabled: true,
        }
    }
}
