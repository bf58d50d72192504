// src/model/resolved.rs

use crate::error::{EngineError, Result};
use crate::model::field::Field;
use crate::model::parameters::ParameterSet;
use std::collections::BTreeMap;

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Supplied by the caller.
    Given,
    /// Filled from configuration because nothing was supplied.
    Default,
    /// Computed by the named formula.
    Derived(&'static str),
    /// Neither supplied nor derivable.
    Unavailable,
}

impl Provenance {
    /// Text for the "Calculation" column of a report.
    pub fn label(&self) -> &'static str {
        match self {
            Provenance::Given => "Given",
            Provenance::Default => "Default",
            Provenance::Derived(formula) => *formula,
            Provenance::Unavailable => "Unavailable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    pub value: f64,
    pub provenance: Provenance,
}

/// Output of the normalize and solve stages.
///
/// A value object: it holds the known quantities, the provenance of each, and
/// any non-fatal conditions noticed on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParameterSet {
    values: BTreeMap<Field, Resolved>,
    holding_enabled: bool,
    diagnostics: Vec<EngineError>,
}

impl ResolvedParameterSet {
    pub(crate) fn new(holding_enabled: bool) -> Self {
        Self {
            values: BTreeMap::new(),
            holding_enabled,
            diagnostics: Vec::new(),
        }
    }

    pub fn get(&self, field: Field) -> Option<f64> {
        self.values.get(&field).map(|r| r.value)
    }

    pub fn is_known(&self, field: Field) -> bool {
        self.values.contains_key(&field)
    }

    pub fn provenance(&self, field: Field) -> Provenance {
        self.values
            .get(&field)
            .map_or(Provenance::Unavailable, |r| r.provenance)
    }

    pub fn holding_enabled(&self) -> bool {
        self.holding_enabled
    }

    /// Non-fatal conditions recorded while resolving.
    pub fn diagnostics(&self) -> &[EngineError] {
        &self.diagnostics
    }

    /// Every field in report order, with its value if known.
    pub fn entries(&self) -> impl Iterator<Item = (Field, Option<f64>, Provenance)> + '_ {
        Field::ALL
            .into_iter()
            .map(move |f| (f, self.get(f), self.provenance(f)))
    }

    /// Fetches all of `fields` or names every one that is missing.
    pub fn require<const N: usize>(&self, target: &'static str, fields: [Field; N]) -> Result<[f64; N]> {
        let mut values = [0.0; N];
        let mut missing = Vec::new();
        for (slot, field) in values.iter_mut().zip(fields) {
            match self.get(field) {
                Some(v) => *slot = v,
                None => missing.push(field),
            }
        }
        if missing.is_empty() {
            Ok(values)
        } else {
            Err(EngineError::insufficient(target, missing))
        }
    }

    /// Days per week implied by the calendar.
    pub fn days_per_week(&self) -> Option<f64> {
        match (self.get(Field::DaysPerYear), self.get(Field::WeeksPerYear)) {
            (Some(days), Some(weeks)) if weeks > 0.0 => Some(days / weeks),
            _ => None,
        }
    }

    pub(crate) fn set(&mut self, field: Field, value: f64, provenance: Provenance) {
        self.values.insert(field, Resolved { value, provenance });
    }

    /// Fills `field` unless it is already known. Returns whether it was filled.
    pub(crate) fn derive(&mut self, field: Field, value: f64, formula: &'static str) -> bool {
        if self.is_known(field) {
            return false;
        }
        self.set(field, value, Provenance::Derived(formula));
        true
    }

    pub(crate) fn record(&mut self, diagnostic: EngineError) {
        // NaN payloads never compare equal, so match on the rendered message.
        let message = diagnostic.to_string();
        if !self.diagnostics.iter().any(|d| d.to_string() == message) {
            self.diagnostics.push(diagnostic);
        }
    }

    /// Feeds every known value back as a supplied input.
    pub fn to_parameters(&self) -> ParameterSet {
        ParameterSet {
            demand_rate: self.get(Field::DemandRate),
            demand_weekly: self.get(Field::DemandWeekly),
            demand_yearly: self.get(Field::AnnualDemand),
            purchase_cost: self.get(Field::PurchaseCost),
            holding_cost_rate: self.get(Field::HoldingCostRate),
            holding_cost_per_unit: self.get(Field::HoldingCostPerUnit),
            ordering_cost: self.get(Field::OrderingCost),
            standard_deviation: self.get(Field::StandardDeviation),
            standard_deviation_per_day: self.get(Field::StandardDeviationPerDay),
            lead_time: self.get(Field::LeadTime),
            lead_time_days: self.get(Field::LeadTimeDays),
            service_level: self.get(Field::ServiceLevel),
            z_score: self.get(Field::ZScore),
            weeks_per_year: self.get(Field::WeeksPerYear),
            days_per_year: self.get(Field::DaysPerYear),
            eoq: self.get(Field::Eoq),
            holding_enabled: self.holding_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_reports_all_missing_fields() {
        let mut set = ResolvedParameterSet::new(true);
        set.set(Field::AnnualDemand, 936.0, Provenance::Given);

        let err = set
            .require("EOQ", [Field::AnnualDemand, Field::OrderingCost, Field::HoldingCostPerUnit])
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::insufficient("EOQ", vec![Field::OrderingCost, Field::HoldingCostPerUnit])
        );
    }

    #[test]
    fn derive_never_overwrites() {
        let mut set = ResolvedParameterSet::new(true);
        set.set(Field::OrderingCost, 45.0, Provenance::Given);
        assert!(!set.derive(Field::OrderingCost, 50.0, "x"));
        assert_eq!(set.get(Field::OrderingCost), Some(45.0));
        assert_eq!(set.provenance(Field::OrderingCost), Provenance::Given);
    }

    #[test]
    fn unknown_fields_are_unavailable() {
        let set = ResolvedParameterSet::new(true);
        assert_eq!(set.provenance(Field::Eoq), Provenance::Unavailable);
        assert_eq!(set.entries().count(), Field::ALL.len());
    }
}
