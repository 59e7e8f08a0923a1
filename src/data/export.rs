use crate::error::ExportError;

use super::filter::FilteredResult;

/// Column order of exported CSV. A fixed contract — downstream consumers
/// depend on these names and positions.
pub const CSV_HEADER: [&str; 5] = ["location", "date", "parameter", "value", "unit"];

/// Serialize a filtered result to CSV text.
///
/// Only the essential fields are written, with raw (untransformed) values
/// and ISO dates, so re-loading the text reproduces the same measurements.
/// Derived fields (band, display value) are recomputed on load, not stored.
/// An empty result yields the header row alone.
pub fn to_csv(result: &FilteredResult) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for m in &result.measurements {
        writer.write_record([
            m.location.as_str(),
            &m.date.format("%Y-%m-%d").to_string(),
            m.parameter.as_str(),
            &m.value.to_string(),
            m.unit.as_str(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// Serialize a filtered result (measurements plus summaries) to
/// records-oriented JSON for the chart layer.
pub fn to_json(result: &FilteredResult) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{query, FilterSpec};
    use crate::data::model::{Dataset, Measurement};
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn empty_result_exports_header_only() {
        let text = to_csv(&FilteredResult::default()).unwrap();
        assert_eq!(text, "location,date,parameter,value,unit\n");
    }

    #[test]
    fn rows_carry_raw_values_and_iso_dates() {
        let ds = Dataset::from_measurements(vec![Measurement::new(
            "Palla",
            d("2023-01-05"),
            "Total Coliform",
            5000.0,
            "MPN/100mL",
        )]);
        let result = query(&ds, &FilterSpec::default());
        let text = to_csv(&result).unwrap();

        assert_eq!(
            text,
            "location,date,parameter,value,unit\n\
             Palla,2023-01-05,Total Coliform,5000,MPN/100mL\n"
        );
    }

    #[test]
    fn fields_containing_commas_are_quoted() {
        let ds = Dataset::from_measurements(vec![Measurement::new(
            "ITO Bridge, Delhi",
            d("2023-01-05"),
            "BOD",
            2.4,
            "mg/L",
        )]);
        let text = to_csv(&query(&ds, &FilterSpec::default())).unwrap();
        assert!(text.contains("\"ITO Bridge, Delhi\""));
    }

    #[test]
    fn json_export_includes_measurements_and_summaries() {
        let ds = Dataset::from_measurements(vec![
            Measurement::new("Palla", d("2023-01-05"), "BOD", 2.0, "mg/L"),
            Measurement::new("Palla", d("2023-02-05"), "BOD", 4.0, "mg/L"),
        ]);
        let text = to_json(&query(&ds, &FilterSpec::default())).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(parsed["measurements"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["summaries"][0]["mean"], 3.0);
        assert_eq!(parsed["measurements"][0]["date"], "2023-01-05");
    }
}
