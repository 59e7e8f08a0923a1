use super::model::Dataset;
use crate::params::ParameterSet;

/// Populate the derived fields of every measurement: the quality band from
/// the parameter's ordered thresholds and the display value from its scale
/// rule.
///
/// Pure and idempotent — the band is a function of (parameter, value) alone,
/// so re-annotating an already-annotated dataset changes nothing. Unknown
/// parameters keep `band = None` and display the raw value. The input is
/// consumed and a fully rebuilt dataset returned; nothing is patched in
/// place.
pub fn annotate(dataset: Dataset, params: &ParameterSet) -> Dataset {
    let measurements = dataset
        .measurements
        .into_iter()
        .map(|mut m| {
            match params.get(&m.parameter) {
                Some(def) => {
                    m.band = Some(def.classify(m.value).label.clone());
                    m.display_value = Some(def.display_value(m.value));
                }
                None => {
                    m.band = None;
                    m.display_value = Some(m.value);
                }
            }
            m
        })
        .collect();

    Dataset::from_measurements(measurements)
}
