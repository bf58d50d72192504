// src/engine/metrics.rs

//! Risk and cost metrics derived from a resolved parameter set.
//!
//! Every metric is a pure function of the set. Each one names the fields it
//! needs and fails on its own when they are missing; nothing is rounded here.

use crate::engine::solver::eoq_of;
use crate::error::{EngineError, Result};
use crate::model::field::Field;
use crate::model::resolved::ResolvedParameterSet;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Metric {
    SafetyStock,
    ReorderPoint,
    AnnualHoldingCost,
    AnnualOrderingCost,
    AnnualSafetyStockCost,
    TotalAnnualCost,
    TimeBetweenOrders,
    OrdersPerYear,
}

impl Metric {
    pub const ALL: [Metric; 8] = [
        Metric::SafetyStock,
        Metric::ReorderPoint,
        Metric::AnnualHoldingCost,
        Metric::AnnualOrderingCost,
        Metric::AnnualSafetyStockCost,
        Metric::TotalAnnualCost,
        Metric::TimeBetweenOrders,
        Metric::OrdersPerYear,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Metric::SafetyStock => "Safety Stock (units)",
            Metric::ReorderPoint => "Reorder Point (units)",
            Metric::AnnualHoldingCost => "Annual Holding Cost (dollars)",
            Metric::AnnualOrderingCost => "Annual Ordering Cost (dollars)",
            Metric::AnnualSafetyStockCost => "Annual Safety Stock Holding Cost (dollars)",
            Metric::TotalAnnualCost => "Total Annual Cost (dollars)",
            Metric::TimeBetweenOrders => "Time Between Orders (days)",
            Metric::OrdersPerYear => "Orders per Year",
        }
    }

    pub fn formula(self) -> &'static str {
        match self {
            Metric::SafetyStock => "z * sigma_day * sqrt(lead_time_days)",
            Metric::ReorderPoint => "demand_rate * lead_time_days + safety_stock",
            Metric::AnnualHoldingCost => "(EOQ / 2) * H",
            Metric::AnnualOrderingCost => "(D / EOQ) * S",
            Metric::AnnualSafetyStockCost => "safety_stock * H",
            Metric::TotalAnnualCost => "holding + ordering + safety stock cost",
            Metric::TimeBetweenOrders => "EOQ / demand_rate",
            Metric::OrdersPerYear => "D / EOQ",
        }
    }
}

/// The eight metrics, each computed independently.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsReport {
    pub safety_stock: Result<f64>,
    pub reorder_point: Result<f64>,
    pub annual_holding_cost: Result<f64>,
    pub annual_ordering_cost: Result<f64>,
    pub annual_safety_stock_cost: Result<f64>,
    pub total_annual_cost: Result<f64>,
    /// In days.
    pub time_between_orders: Result<f64>,
    pub orders_per_year: Result<f64>,
}

impl MetricsReport {
    pub fn get(&self, metric: Metric) -> &Result<f64> {
        match metric {
            Metric::SafetyStock => &self.safety_stock,
            Metric::ReorderPoint => &self.reorder_point,
            Metric::AnnualHoldingCost => &self.annual_holding_cost,
            Metric::AnnualOrderingCost => &self.annual_ordering_cost,
            Metric::AnnualSafetyStockCost => &self.annual_safety_stock_cost,
            Metric::TotalAnnualCost => &self.total_annual_cost,
            Metric::TimeBetweenOrders => &self.time_between_orders,
            Metric::OrdersPerYear => &self.orders_per_year,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, &Result<f64>)> + '_ {
        Metric::ALL.into_iter().map(move |m| (m, self.get(m)))
    }

    /// Time between orders in weeks of the set's calendar.
    pub fn time_between_orders_weeks(&self, set: &ResolvedParameterSet) -> Result<f64> {
        let days = self.time_between_orders.clone()?;
        let days_per_week = set.days_per_week().ok_or_else(|| {
            EngineError::insufficient(
                "time between orders",
                vec![Field::WeeksPerYear, Field::DaysPerYear],
            )
        })?;
        Ok(days / days_per_week)
    }
}

pub fn compute_metrics(set: &ResolvedParameterSet) -> MetricsReport {
    MetricsReport {
        safety_stock: safety_stock(set),
        reorder_point: reorder_point(set),
        annual_holding_cost: annual_holding_cost(set),
        annual_ordering_cost: annual_ordering_cost(set),
        annual_safety_stock_cost: annual_safety_stock_cost(set),
        total_annual_cost: total_annual_cost(set),
        time_between_orders: time_between_orders(set),
        orders_per_year: orders_per_year(set),
    }
}

fn nonzero(target: &'static str, field: Field, value: f64) -> Result<f64> {
    if value == 0.0 {
        Err(EngineError::degenerate(target, field))
    } else {
        Ok(value)
    }
}

/// Zero when holding is disabled, whatever else is known.
pub fn safety_stock(set: &ResolvedParameterSet) -> Result<f64> {
    if !set.holding_enabled() {
        return Ok(0.0);
    }
    let [sigma_day, z, lead_days] = set.require(
        "safety stock",
        [Field::StandardDeviationPerDay, Field::ZScore, Field::LeadTimeDays],
    )?;
    for (field, value) in [
        (Field::StandardDeviationPerDay, sigma_day),
        (Field::LeadTimeDays, lead_days),
    ] {
        if value < 0.0 || !value.is_finite() {
            return Err(EngineError::OutOfRange { field, value });
        }
    }
    let sigma_lead_time = sigma_day * lead_days.sqrt();
    Ok(z * sigma_lead_time)
}

/// Zero when holding is disabled.
pub fn reorder_point(set: &ResolvedParameterSet) -> Result<f64> {
    if !set.holding_enabled() {
        return Ok(0.0);
    }
    let [rate, lead_days] = set.require("reorder point", [Field::DemandRate, Field::LeadTimeDays])?;
    Ok(rate * lead_days + safety_stock(set)?)
}

pub fn annual_holding_cost(set: &ResolvedParameterSet) -> Result<f64> {
    let [h] = set.require("annual holding cost", [Field::HoldingCostPerUnit])?;
    let h = nonzero("annual holding cost", Field::HoldingCostPerUnit, h)?;
    let eoq = eoq_of(set)?;
    Ok(eoq / 2.0 * h)
}

pub fn annual_ordering_cost(set: &ResolvedParameterSet) -> Result<f64> {
    let [d, s] = set.require("annual ordering cost", [Field::AnnualDemand, Field::OrderingCost])?;
    let eoq = eoq_of(set)?;
    Ok(d / eoq * s)
}

/// Zero when holding is disabled.
pub fn annual_safety_stock_cost(set: &ResolvedParameterSet) -> Result<f64> {
    if !set.holding_enabled() {
        return Ok(0.0);
    }
    let [h] = set.require("annual safety stock cost", [Field::HoldingCostPerUnit])?;
    Ok(safety_stock(set)? * h)
}

pub fn total_annual_cost(set: &ResolvedParameterSet) -> Result<f64> {
    let holding = annual_holding_cost(set)?;
    let ordering = annual_ordering_cost(set)?;
    let safety = if set.holding_enabled() {
        annual_safety_stock_cost(set)?
    } else {
        0.0
    };
    Ok(holding + ordering + safety)
}

/// Days between consecutive orders.
pub fn time_between_orders(set: &ResolvedParameterSet) -> Result<f64> {
    let [rate] = set.require("time between orders", [Field::DemandRate])?;
    let rate = nonzero("time between orders", Field::DemandRate, rate)?;
    let eoq = eoq_of(set)?;
    Ok(eoq / rate)
}

pub fn orders_per_year(set: &ResolvedParameterSet) -> Result<f64> {
    let [d] = set.require("orders per year", [Field::AnnualDemand])?;
    let eoq = eoq_of(set)?;
    Ok(d / eoq)
}

/// One sample of the annual cost curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostPoint {
    pub order_quantity: f64,
    pub holding_cost: f64,
    pub ordering_cost: f64,
    pub total_cost: f64,
}

/// Holding, ordering and total annual cost for order quantities from 1 to
/// 2 * EOQ, evenly spaced.
pub fn cost_curve(set: &ResolvedParameterSet, points: usize) -> Result<Vec<CostPoint>> {
    let [d, s, h] = set.require(
        "cost curve",
        [Field::AnnualDemand, Field::OrderingCost, Field::HoldingCostPerUnit],
    )?;
    let eoq = eoq_of(set)?;

    let points = points.max(2);
    let upper = (2.0 * eoq).max(1.0);
    let step = (upper - 1.0) / (points - 1) as f64;

    let curve = (0..points)
        .map(|i| {
            let q = 1.0 + step * i as f64;
            let holding_cost = q / 2.0 * h;
            let ordering_cost = d / q * s;
            CostPoint {
                order_quantity: q,
                holding_cost,
                ordering_cost,
                total_cost: holding_cost + ordering_cost,
            }
        })
        .collect();
    Ok(curve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::resolved::Provenance;

    fn textbook() -> ResolvedParameterSet {
        let mut set = ResolvedParameterSet::new(true);
        for (field, value) in [
            (Field::WeeksPerYear, 52.0),
            (Field::DaysPerYear, 364.0),
            (Field::AnnualDemand, 936.0),
            (Field::DemandRate, 936.0 / 364.0),
            (Field::OrderingCost, 45.0),
            (Field::HoldingCostPerUnit, 15.0),
            (Field::StandardDeviationPerDay, 5.0 / 7.0_f64.sqrt()),
            (Field::LeadTimeDays, 14.0),
            (Field::ZScore, 1.281_551_565_5),
        ] {
            set.set(field, value, Provenance::Given);
        }
        set
    }

    fn assert_close(actual: &Result<f64>, expected: f64, tolerance: f64) {
        let actual = actual.as_ref().expect("metric should succeed");
        assert!(
            (actual - expected).abs() < tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn costs_balance_at_eoq() {
        let report = compute_metrics(&textbook());
        let balanced = 5616.0_f64.sqrt() * 7.5;
        assert_close(&report.annual_holding_cost, balanced, 1e-9);
        assert_close(&report.annual_ordering_cost, balanced, 1e-9);
        assert_close(&report.annual_holding_cost, 562.05, 0.01);
        assert_close(&report.orders_per_year, 936.0 / 5616.0_f64.sqrt(), 1e-9);
    }

    #[test]
    fn safety_stock_and_reorder_point() {
        let report = compute_metrics(&textbook());
        assert_close(&report.safety_stock, 1.281_551_565_5 * 5.0 * 2.0_f64.sqrt(), 1e-9);
        assert_close(&report.reorder_point, 36.0 + 9.062, 0.01);
        assert_close(&report.annual_safety_stock_cost, 9.062 * 15.0, 0.05);
    }

    #[test]
    fn time_between_orders_in_days() {
        let report = compute_metrics(&textbook());
        let days = report.time_between_orders.clone().unwrap();
        assert!((days / 7.0 - 4.16).abs() < 0.01);
    }

    #[test]
    fn time_between_orders_in_weeks() {
        let set = textbook();
        let report = compute_metrics(&set);
        assert_close(&report.time_between_orders_weeks(&set), 4.16, 0.01);

        let bare = ResolvedParameterSet::new(true);
        assert_eq!(
            report.time_between_orders_weeks(&bare),
            Err(EngineError::insufficient(
                "time between orders",
                vec![Field::WeeksPerYear, Field::DaysPerYear]
            ))
        );
    }

    #[test]
    fn negative_lead_time_is_out_of_range() {
        let mut set = textbook();
        set.set(Field::LeadTimeDays, -2.0 * 7.0, Provenance::Given);
        let report = compute_metrics(&set);
        assert_eq!(
            report.safety_stock,
            Err(EngineError::OutOfRange {
                field: Field::LeadTimeDays,
                value: -14.0
            })
        );
        assert!(report.reorder_point.is_err());
        assert!(report.annual_safety_stock_cost.is_err());
        assert_close(&report.annual_holding_cost, 562.05, 0.01);
    }

    #[test]
    fn infinite_deviation_is_out_of_range() {
        let mut set = textbook();
        set.set(Field::StandardDeviationPerDay, f64::INFINITY, Provenance::Given);
        assert_eq!(
            safety_stock(&set),
            Err(EngineError::OutOfRange {
                field: Field::StandardDeviationPerDay,
                value: f64::INFINITY
            })
        );
    }

    #[test]
    fn failures_are_independent() {
        let mut set = ResolvedParameterSet::new(true);
        for (field, value, _) in textbook().entries() {
            match value {
                Some(v) if field != Field::ZScore => set.set(field, v, Provenance::Given),
                _ => {}
            }
        }
        let report = compute_metrics(&set);
        assert_eq!(
            report.safety_stock,
            Err(EngineError::insufficient("safety stock", vec![Field::ZScore]))
        );
        assert!(report.reorder_point.is_err());
        assert!(report.total_annual_cost.is_err());
        assert!(report.annual_holding_cost.is_ok());
        assert!(report.annual_ordering_cost.is_ok());
        assert!(report.time_between_orders.is_ok());
    }

    #[test]
    fn holding_disabled_zeroes_safety_metrics() {
        let mut set = ResolvedParameterSet::new(false);
        for (field, value, _) in textbook().entries() {
            if let Some(v) = value {
                set.set(field, v, Provenance::Given);
            }
        }
        let report = compute_metrics(&set);
        assert_eq!(report.safety_stock, Ok(0.0));
        assert_eq!(report.reorder_point, Ok(0.0));
        assert_eq!(report.annual_safety_stock_cost, Ok(0.0));
        let expected = report.annual_holding_cost.clone().unwrap()
            + report.annual_ordering_cost.clone().unwrap();
        assert_close(&report.total_annual_cost, expected, 1e-9);
    }

    #[test]
    fn zero_demand_rate_is_degenerate_for_cadence() {
        let mut set = textbook();
        set.set(Field::DemandRate, 0.0, Provenance::Given);
        assert_eq!(
            time_between_orders(&set),
            Err(EngineError::degenerate("time between orders", Field::DemandRate))
        );
    }

    #[test]
    fn missing_eoq_inputs_are_named() {
        let mut set = ResolvedParameterSet::new(true);
        set.set(Field::AnnualDemand, 936.0, Provenance::Given);
        assert_eq!(
            orders_per_year(&set),
            Err(EngineError::insufficient(
                "EOQ",
                vec![Field::OrderingCost, Field::HoldingCostPerUnit]
            ))
        );
    }

    #[test]
    fn cost_curve_bottoms_out_near_eoq() {
        let curve = cost_curve(&textbook(), 501).unwrap();
        assert_eq!(curve.len(), 501);
        assert_eq!(curve[0].order_quantity, 1.0);
        let eoq = 5616.0_f64.sqrt();
        assert!((curve[500].order_quantity - 2.0 * eoq).abs() < 1e-9);

        let cheapest = curve
            .iter()
            .min_by(|a, b| a.total_cost.total_cmp(&b.total_cost))
            .unwrap();
        assert!((cheapest.order_quantity - eoq).abs() < 0.5);
    }
}
