//! Weighted-arithmetic Water Quality Index from pH, BOD, and DO.
//!
//! Each input is turned into a 0–100+ sub-index against its permissible
//! standard, weighted inversely to that standard, and summed. Values past
//! 100 on a sub-index mean the standard is exceeded.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::model::{Dataset, Measurement};

// Permissible standards (Si) and ideal values (Ii).
const S_PH: f64 = 8.5;
const S_BOD: f64 = 3.0;
const S_DO: f64 = 5.0;
const I_PH: f64 = 7.0;
const I_BOD: f64 = 0.0;
const I_DO: f64 = 14.6;

/// One parameter's share of the index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WqiComponent {
    /// Parameter name: "pH", "BOD", or "DO".
    pub name: &'static str,
    /// Measured input value.
    pub measured: f64,
    /// Permissible standard Si.
    pub standard: f64,
    /// Ideal value Ii.
    pub ideal: f64,
    /// Sub-index Qi (100 = at the standard).
    pub sub_index: f64,
    /// Weight Wi = k / Si.
    pub weight: f64,
    /// Qi × Wi.
    pub contribution: f64,
}

/// The full step-by-step computation, the shape the calculation table
/// renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WqiBreakdown {
    /// The index: sum of the component contributions.
    pub wqi: f64,
    /// Constant of proportionality k = 1 / Σ(1/Si).
    pub k: f64,
    /// Per-parameter breakdown in pH, BOD, DO order.
    pub components: [WqiComponent; 3],
}

impl WqiBreakdown {
    /// The component contributing the most to the index.
    pub fn dominant(&self) -> &WqiComponent {
        self.components
            .iter()
            .max_by(|a, b| a.contribution.total_cmp(&b.contribution))
            .expect("breakdown always has three components")
    }
}

/// Compute the index from one (pH, BOD, DO) triple.
pub fn compute(ph: f64, bod: f64, dissolved_oxygen: f64) -> WqiBreakdown {
    // pH deviates from ideal 7 in either direction; the acidic side is
    // steeper because only 6.5–8.5 is acceptable.
    let qi_ph = if ph >= I_PH {
        (ph - I_PH) / (S_PH - I_PH) * 100.0
    } else {
        (I_PH - ph) / (I_PH - 6.5) * 100.0
    };
    let qi_bod = (bod - I_BOD) / (S_BOD - I_BOD) * 100.0;
    let qi_do = (((I_DO - dissolved_oxygen) / (I_DO - S_DO)) * 100.0).max(0.0);

    let k = 1.0 / (1.0 / S_PH + 1.0 / S_BOD + 1.0 / S_DO);
    let component = |name, measured, standard, ideal, sub_index: f64| {
        let weight = k / standard;
        WqiComponent {
            name,
            measured,
            standard,
            ideal,
            sub_index,
            weight,
            contribution: sub_index * weight,
        }
    };

    let components = [
        component("pH", ph, S_PH, I_PH, qi_ph),
        component("BOD", bod, S_BOD, I_BOD, qi_bod),
        component("DO", dissolved_oxygen, S_DO, I_DO, qi_do),
    ];
    let wqi = components.iter().map(|c| c.contribution).sum();

    WqiBreakdown { wqi, k, components }
}

/// Derive a WQI measurement for every (location, date) group that carries
/// all three inputs. Groups missing any input are skipped. The returned
/// measurements are unannotated; run them through the normalizer together
/// with the rest of the dataset to band them.
pub fn derive(dataset: &Dataset) -> Vec<Measurement> {
    #[derive(Default)]
    struct Inputs {
        ph: Option<f64>,
        bod: Option<f64>,
        dissolved_oxygen: Option<f64>,
    }

    let mut groups: BTreeMap<(String, chrono::NaiveDate), Inputs> = BTreeMap::new();
    for m in &dataset.measurements {
        let entry = groups
            .entry((m.location.clone(), m.date))
            .or_default();
        match m.parameter.as_str() {
            "pH" => entry.ph.get_or_insert(m.value),
            "BOD" => entry.bod.get_or_insert(m.value),
            "DO" => entry.dissolved_oxygen.get_or_insert(m.value),
            _ => continue,
        };
    }

    groups
        .into_iter()
        .filter_map(|((location, date), inputs)| {
            let (ph, bod, dissolved_oxygen) =
                (inputs.ph?, inputs.bod?, inputs.dissolved_oxygen?);
            let breakdown = compute(ph, bod, dissolved_oxygen);
            Some(Measurement::new(
                &location,
                date,
                "WQI",
                breakdown.wqi,
                "index",
            ))
        })
        .collect()
}
