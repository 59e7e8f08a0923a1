use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Measurement – one row of the source table
// ---------------------------------------------------------------------------

/// A single water-quality reading. Immutable once loaded; `band` and
/// `display_value` are derived during annotation and are recomputed rather
/// than stored on export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    /// Sampling site, e.g. "Wazirabad".
    pub location: String,
    /// Sampling date.
    pub date: NaiveDate,
    /// Canonical parameter name, e.g. "BOD".
    pub parameter: String,
    /// Raw measured value in `unit`.
    pub value: f64,
    /// Unit string as loaded from the source.
    pub unit: String,
    /// Quality band label, `None` until annotated (or for unknown parameters).
    pub band: Option<String>,
    /// Scaled value for wide-range parameters, `None` until annotated.
    pub display_value: Option<f64>,
}

impl Measurement {
    /// Build an unannotated measurement.
    pub fn new(location: &str, date: NaiveDate, parameter: &str, value: f64, unit: &str) -> Self {
        Measurement {
            location: location.to_string(),
            date,
            parameter: parameter.to_string(),
            value,
            unit: unit.to_string(),
            band: None,
            display_value: None,
        }
    }

    /// The display value if annotated, the raw value otherwise.
    pub fn display_or_raw(&self) -> f64 {
        self.display_value.unwrap_or(self.value)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded record set
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed vocabularies and a
/// (location, parameter) index for filtered lookup.
///
/// A dataset is built wholesale by [`Dataset::from_measurements`] and never
/// mutated in place; reloads and re-annotation replace it entirely.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// All measurements in source order.
    pub measurements: Vec<Measurement>,
    /// Sorted unique sampling locations.
    pub locations: Vec<String>,
    /// Sorted unique parameter names present in the data.
    pub parameters: Vec<String>,
    /// Earliest and latest sampling date, `None` for an empty dataset.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    /// (location, parameter) -> indices into `measurements`.
    index: BTreeMap<(String, String), Vec<usize>>,
}

impl Dataset {
    /// Build the dataset and its indices from loaded measurements.
    pub fn from_measurements(measurements: Vec<Measurement>) -> Self {
        let mut locations: BTreeSet<String> = BTreeSet::new();
        let mut parameters: BTreeSet<String> = BTreeSet::new();
        let mut index: BTreeMap<(String, String), Vec<usize>> = BTreeMap::new();
        let mut date_range: Option<(NaiveDate, NaiveDate)> = None;

        for (i, m) in measurements.iter().enumerate() {
            locations.insert(m.location.clone());
            parameters.insert(m.parameter.clone());
            index
                .entry((m.location.clone(), m.parameter.clone()))
                .or_default()
                .push(i);
            date_range = Some(match date_range {
                None => (m.date, m.date),
                Some((lo, hi)) => (lo.min(m.date), hi.max(m.date)),
            });
        }

        Dataset {
            measurements,
            locations: locations.into_iter().collect(),
            parameters: parameters.into_iter().collect(),
            date_range,
            index,
        }
    }

    /// Indices of the measurements for one (location, parameter) series,
    /// in source order. Empty when the pair never occurs.
    pub fn series_indices(&self, location: &str, parameter: &str) -> &[usize] {
        self.index
            .get(&(location.to_string(), parameter.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of measurements.
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }
}
