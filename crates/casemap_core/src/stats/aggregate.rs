//! Observed vs. expected case aggregation.

use crate::model::annotation::Annotation;
use crate::model::town::{Town, TownId};
use crate::reference::ReferenceTable;

const PER_THOUSAND: f64 = 1000.0;

/// Prevalence rate configuration, expressed as cases per 1000 children.
///
/// These are injected domain parameters, not values derived from data. The
/// defaults form the estimate band used by the built-in reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrevalenceRates {
    pub center_per_thousand: f64,
    pub low_per_thousand: f64,
    pub high_per_thousand: f64,
}

impl Default for PrevalenceRates {
    fn default() -> Self {
        Self {
            center_per_thousand: 1.5,
            low_per_thousand: 1.0,
            high_per_thousand: 2.0,
        }
    }
}

/// Per-town summary record.
///
/// Expected values are unrounded; they depend only on the town's child
/// population and the rate configuration, never on observations.
#[derive(Debug, Clone, PartialEq)]
pub struct TownSummary {
    pub town_id: TownId,
    pub observed_count: usize,
    pub expected_center: f64,
    pub expected_low: f64,
    pub expected_high: f64,
}

/// Summarizes one town against the annotation collection.
///
/// Pure and deterministic; calling it any number of times with the same
/// inputs yields identical results.
pub fn summarize(town: &Town, annotations: &[Annotation], rates: PrevalenceRates) -> TownSummary {
    let observed_count = annotations
        .iter()
        .filter(|annotation| annotation.town_id == town.id)
        .count();

    TownSummary {
        town_id: town.id,
        observed_count,
        expected_center: expected_cases(town.child_population, rates.center_per_thousand),
        expected_low: expected_cases(town.child_population, rates.low_per_thousand),
        expected_high: expected_cases(town.child_population, rates.high_per_thousand),
    }
}

/// Summarizes every town in table order.
///
/// Emits one record per town; rows are never suppressed by zero counts.
pub fn summarize_all(
    table: &ReferenceTable,
    annotations: &[Annotation],
    rates: PrevalenceRates,
) -> Vec<TownSummary> {
    table
        .towns()
        .iter()
        .map(|town| summarize(town, annotations, rates))
        .collect()
}

fn expected_cases(child_population: u64, rate_per_thousand: f64) -> f64 {
    child_population as f64 * rate_per_thousand / PER_THOUSAND
}
