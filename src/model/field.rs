// src/model/field.rs

use serde::Serialize;
use std::fmt;

/// Every quantity the engine can hold, given or derived.
///
/// The canonical base period is the day. Week-based and year-based inputs are
/// alternate expressions that the normalizer folds into the canonical fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Field {
    WeeksPerYear,
    DaysPerYear,
    DemandRate,
    DemandWeekly,
    AnnualDemand,
    PurchaseCost,
    HoldingCostRate,
    HoldingCostPerUnit,
    OrderingCost,
    StandardDeviation,
    StandardDeviationPerDay,
    AnnualStandardDeviation,
    LeadTime,
    LeadTimeDays,
    ServiceLevel,
    ZScore,
    Eoq,
}

impl Field {
    /// Report order.
    pub const ALL: [Field; 17] = [
        Field::WeeksPerYear,
        Field::DaysPerYear,
        Field::DemandRate,
        Field::DemandWeekly,
        Field::AnnualDemand,
        Field::PurchaseCost,
        Field::HoldingCostRate,
        Field::HoldingCostPerUnit,
        Field::OrderingCost,
        Field::StandardDeviation,
        Field::StandardDeviationPerDay,
        Field::AnnualStandardDeviation,
        Field::LeadTime,
        Field::LeadTimeDays,
        Field::ServiceLevel,
        Field::ZScore,
        Field::Eoq,
    ];

    /// Machine name, used in error messages and CSV output.
    pub fn name(self) -> &'static str {
        match self {
            Field::WeeksPerYear => "weeks_per_year",
            Field::DaysPerYear => "days_per_year",
            Field::DemandRate => "demand_rate",
            Field::DemandWeekly => "demand_weekly",
            Field::AnnualDemand => "annual_demand",
            Field::PurchaseCost => "purchase_cost",
            Field::HoldingCostRate => "holding_cost_rate",
            Field::HoldingCostPerUnit => "holding_cost_per_unit",
            Field::OrderingCost => "ordering_cost",
            Field::StandardDeviation => "standard_deviation",
            Field::StandardDeviationPerDay => "standard_deviation_per_day",
            Field::AnnualStandardDeviation => "annual_standard_deviation",
            Field::LeadTime => "lead_time",
            Field::LeadTimeDays => "lead_time_days",
            Field::ServiceLevel => "service_level",
            Field::ZScore => "z_score",
            Field::Eoq => "eoq",
        }
    }

    /// Human label with units.
    pub fn label(self) -> &'static str {
        match self {
            Field::WeeksPerYear => "Weeks per Year",
            Field::DaysPerYear => "Days per Year",
            Field::DemandRate => "Demand Rate (units/day)",
            Field::DemandWeekly => "Demand Rate (units/week)",
            Field::AnnualDemand => "Annual Demand (units/year)",
            Field::PurchaseCost => "Purchase Cost (dollars/unit)",
            Field::HoldingCostRate => "Holding Cost Rate (annual fraction)",
            Field::HoldingCostPerUnit => "Holding Cost (dollars/unit/year)",
            Field::OrderingCost => "Ordering Cost (dollars/order)",
            Field::StandardDeviation => "Std Dev of Demand (units/week)",
            Field::StandardDeviationPerDay => "Std Dev of Demand (units/day)",
            Field::AnnualStandardDeviation => "Std Dev of Demand (units/year)",
            Field::LeadTime => "Lead Time (weeks)",
            Field::LeadTimeDays => "Lead Time (days)",
            Field::ServiceLevel => "Service Level",
            Field::ZScore => "z-score",
            Field::Eoq => "EOQ (units)",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
