use std::collections::BTreeMap;
use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use super::model::{Dataset, Measurement};

// ---------------------------------------------------------------------------
// FilterSpec – the user-selected constraints for one query
// ---------------------------------------------------------------------------

/// Constraints applied to narrow the dataset: inclusive date range, location
/// membership, and parameter membership, ANDed together.
///
/// An empty location or parameter set means "no restriction on that
/// dimension" — the documented default, not an error. A `FilterSpec` is
/// transient; it has no lifecycle beyond the query it is passed to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    /// Inclusive (from, to) date bounds, `None` for no date restriction.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    /// Selected locations; empty selects all.
    pub locations: BTreeSet<String>,
    /// Selected parameters; empty selects all.
    pub parameters: BTreeSet<String>,
}

impl FilterSpec {
    /// Whether a measurement passes all three predicates.
    pub fn matches(&self, m: &Measurement) -> bool {
        if let Some((from, to)) = self.date_range {
            if m.date < from || m.date > to {
                return false;
            }
        }
        if !self.locations.is_empty() && !self.locations.contains(&m.location) {
            return false;
        }
        if !self.parameters.is_empty() && !self.parameters.contains(&m.parameter) {
            return false;
        }
        true
    }
}

/// Indices of the measurements passing the filter, in dataset order.
pub fn matching_indices(dataset: &Dataset, spec: &FilterSpec) -> Vec<usize> {
    dataset
        .measurements
        .iter()
        .enumerate()
        .filter(|(_, m)| spec.matches(m))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// FilteredResult – the query output consumed by the chart layer
// ---------------------------------------------------------------------------

/// Summary statistics for one (location, parameter) series within the
/// filtered subset, computed over raw values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub location: String,
    pub parameter: String,
    pub unit: String,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub count: usize,
}

/// The filtered measurement list plus per-series summaries. An empty result
/// (every row filtered out) is a valid outcome with empty lists.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FilteredResult {
    /// Matching measurements in dataset order.
    pub measurements: Vec<Measurement>,
    /// Per-(location, parameter) statistics, sorted by location then
    /// parameter.
    pub summaries: Vec<SeriesSummary>,
}

/// Run one query: filter the dataset and summarize the surviving series.
pub fn query(dataset: &Dataset, spec: &FilterSpec) -> FilteredResult {
    let measurements: Vec<Measurement> = dataset
        .measurements
        .iter()
        .filter(|m| spec.matches(m))
        .cloned()
        .collect();

    // (location, parameter) -> (unit, min, max, sum, count)
    let mut acc: BTreeMap<(String, String), (String, f64, f64, f64, usize)> = BTreeMap::new();
    for m in &measurements {
        let entry = acc
            .entry((m.location.clone(), m.parameter.clone()))
            .or_insert_with(|| (m.unit.clone(), f64::INFINITY, f64::NEG_INFINITY, 0.0, 0));
        entry.1 = entry.1.min(m.value);
        entry.2 = entry.2.max(m.value);
        entry.3 += m.value;
        entry.4 += 1;
    }

    let summaries = acc
        .into_iter()
        .map(
            |((location, parameter), (unit, min, max, sum, count))| SeriesSummary {
                location,
                parameter,
                unit,
                min,
                max,
                mean: sum / count as f64,
                count,
            },
        )
        .collect();

    FilteredResult {
        measurements,
        summaries,
    }
}

impl FilteredResult {
    /// Look up the summary for one series.
    pub fn summary(&self, location: &str, parameter: &str) -> Option<&SeriesSummary> {
        self.summaries
            .iter()
            .find(|s| s.location == location && s.parameter == parameter)
    }

    /// Per-location, date-ordered (date, display value) points for one
    /// parameter — the shape the time-series comparison chart consumes.
    pub fn location_series(&self, parameter: &str) -> BTreeMap<String, Vec<(NaiveDate, f64)>> {
        let mut series: BTreeMap<String, Vec<(NaiveDate, f64)>> = BTreeMap::new();
        for m in self.measurements.iter().filter(|m| m.parameter == parameter) {
            series
                .entry(m.location.clone())
                .or_default()
                .push((m.date, m.display_or_raw()));
        }
        for points in series.values_mut() {
            points.sort_by_key(|(date, _)| *date);
        }
        series
    }

    /// Mean display value per location for one parameter — the per-location
    /// average bar chart.
    pub fn location_averages(&self, parameter: &str) -> Vec<(String, f64)> {
        let mut acc: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        for m in self.measurements.iter().filter(|m| m.parameter == parameter) {
            let entry = acc.entry(m.location.clone()).or_insert((0.0, 0));
            entry.0 += m.display_or_raw();
            entry.1 += 1;
        }
        acc.into_iter()
            .map(|(location, (sum, count))| (location, sum / count as f64))
            .collect()
    }

    /// Whether anything survived the filter.
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    /// Number of matching measurements.
    pub fn len(&self) -> usize {
        self.measurements.len()
    }
}
