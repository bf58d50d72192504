// src/engine/normalizer.rs

//! Folds alternate time-base inputs into the canonical day-based fields.

use crate::engine::config::EngineConfig;
use crate::error::EngineError;
use crate::model::field::Field;
use crate::model::parameters::ParameterSet;
use crate::model::resolved::{Provenance, ResolvedParameterSet};
use tracing::{debug, warn};

pub const DAYS_PER_WEEK: f64 = 7.0;

/// Builds the canonical parameter set from raw inputs. Never fails: absent
/// inputs stay absent, unusable calendar inputs fall back to the default.
pub fn normalize(params: &ParameterSet, config: &EngineConfig) -> ResolvedParameterSet {
    let mut set = ResolvedParameterSet::new(params.holding_enabled);

    let (weeks, days) = resolve_calendar(&mut set, params, config);
    let days_per_week = days / weeks;

    resolve_demand(&mut set, params);

    // Costs
    given(&mut set, Field::PurchaseCost, params.purchase_cost);
    given(&mut set, Field::HoldingCostRate, params.holding_cost_rate);
    given(&mut set, Field::OrderingCost, params.ordering_cost);
    match (params.holding_cost_per_unit, params.holding_cost_rate, params.purchase_cost) {
        (Some(h), _, _) => set.set(Field::HoldingCostPerUnit, h, Provenance::Given),
        (None, Some(rate), Some(cost)) => {
            set.derive(
                Field::HoldingCostPerUnit,
                rate * cost,
                "holding_cost_rate * purchase_cost",
            );
        }
        _ => {}
    }

    // Variability: per-day figure is canonical
    given(&mut set, Field::StandardDeviation, params.standard_deviation);
    given(&mut set, Field::StandardDeviationPerDay, params.standard_deviation_per_day);
    match (params.standard_deviation_per_day, params.standard_deviation) {
        (Some(per_day), _) => {
            set.derive(
                Field::StandardDeviation,
                per_day * days_per_week.sqrt(),
                "standard_deviation_per_day * sqrt(days_per_week)",
            );
        }
        (None, Some(weekly)) => {
            set.derive(
                Field::StandardDeviationPerDay,
                weekly / days_per_week.sqrt(),
                "standard_deviation / sqrt(days_per_week)",
            );
        }
        (None, None) => {}
    }
    if let Some(per_day) = set.get(Field::StandardDeviationPerDay) {
        set.derive(
            Field::AnnualStandardDeviation,
            per_day * days.sqrt(),
            "standard_deviation_per_day * sqrt(days_per_year)",
        );
    }

    // Lead time: day-based figure is canonical
    given(&mut set, Field::LeadTime, params.lead_time);
    given(&mut set, Field::LeadTimeDays, params.lead_time_days);
    match (params.lead_time_days, params.lead_time) {
        (Some(lead_days), _) => {
            set.derive(
                Field::LeadTime,
                lead_days / days_per_week,
                "lead_time_days / days_per_week",
            );
        }
        (None, Some(lead_weeks)) => {
            set.derive(
                Field::LeadTimeDays,
                lead_weeks * days_per_week,
                "lead_time * days_per_week",
            );
        }
        (None, None) => {}
    }

    given(&mut set, Field::ServiceLevel, params.service_level);
    given(&mut set, Field::ZScore, params.z_score);
    given(&mut set, Field::Eoq, params.eoq);

    set
}

fn given(set: &mut ResolvedParameterSet, field: Field, value: Option<f64>) {
    if let Some(v) = value {
        set.set(field, v, Provenance::Given);
    }
}

/// Returns (weeks_per_year, days_per_year), both strictly positive.
fn resolve_calendar(
    set: &mut ResolvedParameterSet,
    params: &ParameterSet,
    config: &EngineConfig,
) -> (f64, f64) {
    let weeks = usable_calendar(set, Field::WeeksPerYear, params.weeks_per_year);
    let days = usable_calendar(set, Field::DaysPerYear, params.days_per_year);

    let (weeks, days) = match (weeks, days) {
        (Some(w), Some(d)) => {
            set.set(Field::WeeksPerYear, w, Provenance::Given);
            set.set(Field::DaysPerYear, d, Provenance::Given);
            (w, d)
        }
        (Some(w), None) => {
            set.set(Field::WeeksPerYear, w, Provenance::Given);
            set.derive(Field::DaysPerYear, w * DAYS_PER_WEEK, "weeks_per_year * 7");
            (w, w * DAYS_PER_WEEK)
        }
        (None, Some(d)) => {
            set.set(Field::DaysPerYear, d, Provenance::Given);
            set.derive(Field::WeeksPerYear, d / DAYS_PER_WEEK, "days_per_year / 7");
            (d / DAYS_PER_WEEK, d)
        }
        (None, None) => {
            let w = config.default_weeks_per_year;
            set.set(Field::WeeksPerYear, w, Provenance::Default);
            set.derive(Field::DaysPerYear, w * DAYS_PER_WEEK, "weeks_per_year * 7");
            (w, w * DAYS_PER_WEEK)
        }
    };

    debug!(weeks_per_year = weeks, days_per_year = days, "calendar");
    (weeks, days)
}

fn usable_calendar(set: &mut ResolvedParameterSet, field: Field, value: Option<f64>) -> Option<f64> {
    match value {
        Some(v) if v > 0.0 && v.is_finite() => Some(v),
        Some(v) => {
            warn!(field = field.name(), value = v, "calendar constant ignored");
            set.record(EngineError::OutOfRange { field, value: v });
            None
        }
        None => None,
    }
}

/// Per-day beats per-week beats per-year. Lower-precedence inputs are trusted
/// to be consistent and are not cross-checked.
fn resolve_demand(set: &mut ResolvedParameterSet, params: &ParameterSet) {
    if let Some(rate) = params.demand_rate {
        set.set(Field::DemandRate, rate, Provenance::Given);
        given(set, Field::DemandWeekly, params.demand_weekly);
        if let Some(days) = set.get(Field::DaysPerYear) {
            set.derive(Field::AnnualDemand, rate * days, "demand_rate * days_per_year");
        }
    } else if let Some(weekly) = params.demand_weekly {
        set.set(Field::DemandWeekly, weekly, Provenance::Given);
        if let Some(weeks) = set.get(Field::WeeksPerYear) {
            set.derive(Field::AnnualDemand, weekly * weeks, "demand_weekly * weeks_per_year");
        }
    } else if let Some(yearly) = params.demand_yearly {
        set.set(Field::AnnualDemand, yearly, Provenance::Given);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize_default(params: ParameterSet) -> ResolvedParameterSet {
        normalize(&params, &EngineConfig::default())
    }

    #[test]
    fn calendar_defaults_when_nothing_supplied() {
        let set = normalize_default(ParameterSet::default());
        assert_eq!(set.get(Field::WeeksPerYear), Some(52.0));
        assert_eq!(set.get(Field::DaysPerYear), Some(364.0));
        assert_eq!(set.provenance(Field::WeeksPerYear), Provenance::Default);
    }

    #[test]
    fn weeks_derived_from_days() {
        let set = normalize_default(ParameterSet {
            days_per_year: Some(350.0),
            ..Default::default()
        });
        assert_eq!(set.get(Field::WeeksPerYear), Some(50.0));
        assert_eq!(set.provenance(Field::DaysPerYear), Provenance::Given);
    }

    #[test]
    fn non_positive_calendar_falls_back_to_default() {
        let set = normalize_default(ParameterSet {
            weeks_per_year: Some(0.0),
            ..Default::default()
        });
        assert_eq!(set.get(Field::WeeksPerYear), Some(52.0));
        assert_eq!(
            set.diagnostics(),
            &[EngineError::OutOfRange {
                field: Field::WeeksPerYear,
                value: 0.0
            }]
        );
    }

    #[test]
    fn weekly_demand_annualizes_with_weeks_per_year() {
        let set = normalize_default(ParameterSet {
            demand_weekly: Some(100.0),
            weeks_per_year: Some(52.0),
            ..Default::default()
        });
        assert_eq!(set.get(Field::AnnualDemand), Some(5200.0));
    }

    #[test]
    fn daily_rate_takes_precedence() {
        let set = normalize_default(ParameterSet {
            demand_rate: Some(3.0),
            demand_weekly: Some(1000.0),
            demand_yearly: Some(1.0),
            weeks_per_year: Some(50.0),
            ..Default::default()
        });
        assert_eq!(set.get(Field::AnnualDemand), Some(3.0 * 350.0));
        assert_eq!(set.get(Field::DemandWeekly), Some(1000.0));
    }

    #[test]
    fn direct_holding_cost_overrides_rate_times_cost() {
        let set = normalize_default(ParameterSet {
            holding_cost_per_unit: Some(20.0),
            holding_cost_rate: Some(0.25),
            purchase_cost: Some(60.0),
            ..Default::default()
        });
        assert_eq!(set.get(Field::HoldingCostPerUnit), Some(20.0));
        assert_eq!(set.provenance(Field::HoldingCostPerUnit), Provenance::Given);
    }

    #[test]
    fn holding_cost_from_rate_and_purchase_cost() {
        let set = normalize_default(ParameterSet {
            holding_cost_rate: Some(0.25),
            purchase_cost: Some(60.0),
            ..Default::default()
        });
        assert_eq!(set.get(Field::HoldingCostPerUnit), Some(15.0));
    }

    #[test]
    fn weekly_std_dev_and_lead_time_move_to_day_basis() {
        let set = normalize_default(ParameterSet {
            standard_deviation: Some(5.0),
            lead_time: Some(2.0),
            weeks_per_year: Some(52.0),
            ..Default::default()
        });
        let per_day = set.get(Field::StandardDeviationPerDay).unwrap();
        assert!((per_day - 5.0 / 7.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(set.get(Field::LeadTimeDays), Some(14.0));
        let annual = set.get(Field::AnnualStandardDeviation).unwrap();
        assert!((annual - per_day * 364.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn day_based_inputs_win() {
        let set = normalize_default(ParameterSet {
            standard_deviation_per_day: Some(2.0),
            standard_deviation: Some(100.0),
            lead_time_days: Some(10.0),
            lead_time: Some(99.0),
            ..Default::default()
        });
        assert_eq!(set.get(Field::StandardDeviationPerDay), Some(2.0));
        assert_eq!(set.get(Field::LeadTimeDays), Some(10.0));
        let annual = set.get(Field::AnnualStandardDeviation).unwrap();
        assert!((annual - 2.0 * 364.0_f64.sqrt()).abs() < 1e-9);
    }
}
