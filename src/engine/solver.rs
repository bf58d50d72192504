// src/engine/solver.rs

//! Fills missing quantities of the EOQ equation system.
//!
//! The relations form a small dependency graph, written down as a table of
//! rules. Each rule names its output, the inputs it needs and the formula
//! that ties them together. Rules are evaluated in table order and the table
//! is swept again until a sweep fills nothing.

use crate::engine::normal::inverse_normal_cdf;
use crate::error::{EngineError, Result};
use crate::model::field::Field;
use crate::model::resolved::ResolvedParameterSet;
use tracing::{debug, warn};

struct Rule {
    output: Field,
    inputs: &'static [Field],
    formula: &'static str,
    /// Back-derivations from EOQ only run on a strictly positive EOQ.
    needs_positive_eoq: bool,
    eval: fn(&[f64]) -> Result<f64>,
}

const RULES: [Rule; 9] = [
    Rule {
        output: Field::Eoq,
        inputs: &[Field::AnnualDemand, Field::OrderingCost, Field::HoldingCostPerUnit],
        formula: "sqrt(2 * D * S / H)",
        needs_positive_eoq: false,
        eval: eoq_rule,
    },
    Rule {
        output: Field::AnnualDemand,
        inputs: &[Field::Eoq, Field::OrderingCost, Field::HoldingCostPerUnit],
        formula: "EOQ^2 * H / (2 * S)",
        needs_positive_eoq: true,
        eval: demand_from_eoq,
    },
    Rule {
        output: Field::OrderingCost,
        inputs: &[Field::Eoq, Field::AnnualDemand, Field::HoldingCostPerUnit],
        formula: "EOQ^2 * H / (2 * D)",
        needs_positive_eoq: true,
        eval: ordering_cost_from_eoq,
    },
    Rule {
        output: Field::HoldingCostPerUnit,
        inputs: &[Field::Eoq, Field::AnnualDemand, Field::OrderingCost],
        formula: "2 * D * S / EOQ^2",
        needs_positive_eoq: true,
        eval: holding_cost_from_eoq,
    },
    Rule {
        output: Field::HoldingCostRate,
        inputs: &[Field::HoldingCostPerUnit, Field::PurchaseCost],
        formula: "H / purchase_cost",
        needs_positive_eoq: false,
        eval: holding_rate,
    },
    Rule {
        output: Field::PurchaseCost,
        inputs: &[Field::HoldingCostPerUnit, Field::HoldingCostRate],
        formula: "H / holding_cost_rate",
        needs_positive_eoq: false,
        eval: purchase_cost,
    },
    Rule {
        output: Field::DemandRate,
        inputs: &[Field::AnnualDemand, Field::DaysPerYear],
        formula: "D / days_per_year",
        needs_positive_eoq: false,
        eval: daily_demand,
    },
    Rule {
        output: Field::DemandWeekly,
        inputs: &[Field::AnnualDemand, Field::WeeksPerYear],
        formula: "D / weeks_per_year",
        needs_positive_eoq: false,
        eval: weekly_demand,
    },
    Rule {
        output: Field::ZScore,
        inputs: &[Field::ServiceLevel],
        formula: "inverse_normal_cdf(service_level)",
        needs_positive_eoq: false,
        eval: z_score,
    },
];

/// Economic order quantity `sqrt(2 * D * S / H)`.
///
/// Zero demand, zero ordering cost or zero holding cost leave the formula
/// undefined and are reported as degenerate rather than yielding 0 or NaN.
pub fn economic_order_quantity(annual_demand: f64, ordering_cost: f64, holding_cost: f64) -> Result<f64> {
    for (field, value) in [
        (Field::AnnualDemand, annual_demand),
        (Field::OrderingCost, ordering_cost),
        (Field::HoldingCostPerUnit, holding_cost),
    ] {
        if value == 0.0 {
            return Err(EngineError::degenerate("EOQ", field));
        }
        if value < 0.0 || !value.is_finite() {
            return Err(EngineError::OutOfRange { field, value });
        }
    }
    Ok((2.0 * annual_demand * ordering_cost / holding_cost).sqrt())
}

/// The EOQ of a resolved set: the known value when it is usable, otherwise
/// whatever error computing it from D, S and H produces.
pub fn eoq_of(set: &ResolvedParameterSet) -> Result<f64> {
    match set.get(Field::Eoq) {
        Some(eoq) if usable(eoq) => Ok(eoq),
        Some(_) => Err(EngineError::degenerate("EOQ", Field::Eoq)),
        None => {
            let [d, s, h] = set.require(
                "EOQ",
                [Field::AnnualDemand, Field::OrderingCost, Field::HoldingCostPerUnit],
            )?;
            economic_order_quantity(d, s, h)
        }
    }
}

/// Sweeps the rule table until nothing more can be deduced.
///
/// Idempotent: a set that is already complete comes back unchanged.
pub fn solve(set: &mut ResolvedParameterSet) {
    let usable_eoq = match set.get(Field::Eoq) {
        Some(eoq) if !usable(eoq) => {
            warn!(eoq, "EOQ override is not a positive finite number");
            set.record(EngineError::InvalidEoqOverride { value: eoq });
            false
        }
        _ => true,
    };

    let mut inputs = Vec::with_capacity(3);
    loop {
        let mut changed = false;

        for rule in &RULES {
            if set.is_known(rule.output) || (rule.needs_positive_eoq && !usable_eoq) {
                continue;
            }

            inputs.clear();
            inputs.extend(rule.inputs.iter().map_while(|&f| set.get(f)));
            if inputs.len() != rule.inputs.len() {
                continue;
            }

            match (rule.eval)(&inputs) {
                Ok(value) => {
                    debug!(field = rule.output.name(), value, formula = rule.formula, "derived");
                    set.derive(rule.output, value, rule.formula);
                    changed = true;
                }
                Err(err) => {
                    warn!(field = rule.output.name(), error = %err, "cannot derive");
                    set.record(err);
                }
            }
        }

        if !changed {
            break;
        }
    }
}

fn usable(eoq: f64) -> bool {
    eoq > 0.0 && eoq.is_finite()
}

fn nonzero(target: Field, field: Field, value: f64) -> Result<f64> {
    if value == 0.0 {
        Err(EngineError::degenerate(target.name(), field))
    } else {
        Ok(value)
    }
}

fn eoq_rule(v: &[f64]) -> Result<f64> {
    economic_order_quantity(v[0], v[1], v[2])
}

fn demand_from_eoq(v: &[f64]) -> Result<f64> {
    let s = nonzero(Field::AnnualDemand, Field::OrderingCost, v[1])?;
    Ok(v[0] * v[0] * v[2] / (2.0 * s))
}

fn ordering_cost_from_eoq(v: &[f64]) -> Result<f64> {
    let d = nonzero(Field::OrderingCost, Field::AnnualDemand, v[1])?;
    Ok(v[0] * v[0] * v[2] / (2.0 * d))
}

fn holding_cost_from_eoq(v: &[f64]) -> Result<f64> {
    Ok(2.0 * v[1] * v[2] / (v[0] * v[0]))
}

fn holding_rate(v: &[f64]) -> Result<f64> {
    let cost = nonzero(Field::HoldingCostRate, Field::PurchaseCost, v[1])?;
    Ok(v[0] / cost)
}

fn purchase_cost(v: &[f64]) -> Result<f64> {
    let rate = nonzero(Field::PurchaseCost, Field::HoldingCostRate, v[1])?;
    Ok(v[0] / rate)
}

fn daily_demand(v: &[f64]) -> Result<f64> {
    let days = nonzero(Field::DemandRate, Field::DaysPerYear, v[1])?;
    Ok(v[0] / days)
}

fn weekly_demand(v: &[f64]) -> Result<f64> {
    let weeks = nonzero(Field::DemandWeekly, Field::WeeksPerYear, v[1])?;
    Ok(v[0] / weeks)
}

fn z_score(v: &[f64]) -> Result<f64> {
    inverse_normal_cdf(v[0]).ok_or(EngineError::OutOfRange {
        field: Field::ServiceLevel,
        value: v[0],
    })
}
