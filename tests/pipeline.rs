//! End-to-end tests: CSV -> load -> annotate -> query -> export -> reload.

use std::io::Write;

use chrono::NaiveDate;
use riverlens::{
    annotate, load_file, query, to_csv, FilterSpec, LoadOptions, ParameterSet, RowError, Session,
};

fn write_fixture(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f.flush().unwrap();
    f
}

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// The identity that matters for export: the essential fields, with the
/// value compared bit-exactly.
fn essential_tuples(ds: &riverlens::Dataset) -> Vec<(String, NaiveDate, String, u64, String)> {
    let mut tuples: Vec<_> = ds
        .measurements
        .iter()
        .map(|m| {
            (
                m.location.clone(),
                m.date,
                m.parameter.clone(),
                m.value.to_bits(),
                m.unit.clone(),
            )
        })
        .collect();
    tuples.sort();
    tuples
}

const FIXTURE: &str = "location,date,parameter,value,unit\n\
    Palla,2023-01-05,pH,7.12,pH\n\
    Palla,2023-01-05,BOD,2.4,mg/L\n\
    Palla,2023-01-05,Total_Coliform_MPN_100ml,430,MPN/100mL\n\
    Okhla,2023-01-05,BOD,17.8,mg/L\n\
    Okhla,2023-01-05,Total_Coliform_MPN_100ml,240000,MPN/100mL\n\
    Okhla,2023-02-05,DO,1.9,mg/L\n";

#[test]
fn csv_round_trip_preserves_essential_fields() {
    let f = write_fixture(".csv", FIXTURE);
    let params = ParameterSet::defaults();
    let options = LoadOptions::default();

    let first = load_file(f.path(), &params, &options).unwrap();
    assert!(first.errors.is_empty());
    let annotated = annotate(first.dataset, &params);

    // Export everything, write it back out, and load the export.
    let text = to_csv(&query(&annotated, &FilterSpec::default())).unwrap();
    let exported = write_fixture(".csv", &text);
    let second = load_file(exported.path(), &params, &options).unwrap();

    assert!(second.errors.is_empty());
    assert_eq!(essential_tuples(&annotated), essential_tuples(&second.dataset));
}

#[test]
fn reloading_the_same_source_is_idempotent() {
    let f = write_fixture(".csv", FIXTURE);
    let params = ParameterSet::defaults();
    let options = LoadOptions::default();

    let a = load_file(f.path(), &params, &options).unwrap();
    let b = load_file(f.path(), &params, &options).unwrap();

    assert_eq!(a.dataset.measurements, b.dataset.measurements);
    assert_eq!(a.errors, b.errors);
}

#[test]
fn coliform_bands_split_clean_and_polluted_sites() {
    let csv = "location,date,parameter,value,unit\n\
        LocA,2023-01-01,Total Coliform,5000,MPN/100mL\n\
        LocA,2023-01-02,Total Coliform,50,MPN/100mL\n";
    let f = write_fixture(".csv", csv);
    let params = ParameterSet::defaults();
    let dataset = annotate(
        load_file(f.path(), &params, &LoadOptions::default())
            .unwrap()
            .dataset,
        &params,
    );

    let result = query(
        &dataset,
        &FilterSpec {
            date_range: Some((d("2023-01-01"), d("2023-01-02"))),
            locations: ["LocA".to_string()].into(),
            ..FilterSpec::default()
        },
    );

    assert_eq!(result.len(), 2);
    let bands: Vec<_> = result
        .measurements
        .iter()
        .map(|m| m.band.as_deref().unwrap())
        .collect();
    assert_eq!(bands, vec!["Unsafe", "Desirable"]);
}

#[test]
fn bad_value_row_is_reported_by_number_and_skipped() {
    let csv = "location,date,parameter,value,unit\n\
        Palla,2023-01-05,BOD,2.4,mg/L\n\
        Palla,2023-02-05,BOD,high,mg/L\n";
    let f = write_fixture(".csv", csv);
    let outcome = load_file(
        f.path(),
        &ParameterSet::defaults(),
        &LoadOptions::default(),
    )
    .unwrap();

    assert_eq!(outcome.dataset.len(), 1);
    assert_eq!(
        outcome.errors,
        vec![RowError::Value {
            row: 2,
            raw: "high".to_string()
        }]
    );
}

#[test]
fn all_excluding_filter_exports_header_only() {
    let f = write_fixture(".csv", FIXTURE);
    let mut session = Session::new(ParameterSet::defaults());
    session.load(f.path()).unwrap();

    session.toggle_location("Atlantis");
    let text = session.export_csv().unwrap();

    assert_eq!(text, "location,date,parameter,value,unit\n");
}

#[test]
fn session_pipeline_round_trips_a_filtered_view() {
    let f = write_fixture(".csv", FIXTURE);
    let mut first = Session::new(ParameterSet::defaults());
    first.load(f.path()).unwrap();

    // Narrow to Okhla BOD and export that view.
    first.toggle_location("Okhla");
    first.toggle_parameter("BOD");
    let view = first.query();
    assert_eq!(view.len(), 1);
    assert_eq!(view.summary("Okhla", "BOD").unwrap().count, 1);

    let exported = write_fixture(".csv", &first.export_csv().unwrap());
    let mut second = Session::new(ParameterSet::defaults());
    second.load(exported.path()).unwrap();

    let reloaded = second.dataset().unwrap();
    assert_eq!(reloaded.len(), 1);
    let m = &reloaded.measurements[0];
    assert_eq!(
        (m.location.as_str(), m.parameter.as_str(), m.value),
        ("Okhla", "BOD", 17.8)
    );
    // Bands are recomputed on load, not carried through the CSV.
    assert_eq!(m.band.as_deref(), Some("Poor"));
}

#[test]
fn json_view_feeds_the_chart_layer() {
    let f = write_fixture(".csv", FIXTURE);
    let mut session = Session::new(ParameterSet::defaults());
    session.load(f.path()).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&session.export_json().unwrap()).unwrap();
    assert_eq!(parsed["measurements"].as_array().unwrap().len(), 6);
    assert!(parsed["measurements"][0]["band"].is_string());

    // Band thresholds and colours are exposed as read-only reference data.
    let def = session.params().get("Total Coliform").unwrap();
    assert_eq!(def.bands.last().unwrap().color, "#ef4444");
    let colors = session.colors().unwrap();
    assert_ne!(colors.color_for("Palla"), colors.color_for("Okhla"));
}
