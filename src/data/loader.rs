use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    Array, Date32Array, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Dataset, Measurement};
use crate::error::{LoadError, RowError};
use crate::params::ParameterSet;

// ---------------------------------------------------------------------------
// Load configuration
// ---------------------------------------------------------------------------

/// Maps the semantic fields of a measurement to source column names.
/// Resolved against the header once, at the start of a load.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMap {
    pub location: String,
    pub date: String,
    pub parameter: String,
    pub value: String,
    pub unit: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        ColumnMap {
            location: "location".to_string(),
            date: "date".to_string(),
            parameter: "parameter".to_string(),
            value: "value".to_string(),
            unit: "unit".to_string(),
        }
    }
}

/// Loader behavior switches.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Source column names for the five required fields.
    pub columns: ColumnMap,
    /// Retain rows whose parameter is not in the reference set, as
    /// unclassified measurements, instead of excluding them.
    pub keep_unknown: bool,
}

/// A best-effort dataset plus the row-level problems found on the way.
#[derive(Debug)]
pub struct LoadOutcome {
    /// Dataset built from the valid rows.
    pub dataset: Dataset,
    /// One entry per excluded row.
    pub errors: Vec<RowError>,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a measurement table from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming the five required columns
/// * `.json`    – records-oriented array: `[{ "location": ..., ... }, ...]`
/// * `.parquet` – flat scalar columns; the date column may be Utf8 or Date32
///
/// Malformed rows are excluded and recorded in the returned
/// [`LoadOutcome::errors`]; a missing required column aborts the whole load.
/// Loading has no side effects and reloading the same source yields an
/// identical dataset.
pub fn load_file(
    path: &Path,
    params: &ParameterSet,
    options: &LoadOptions,
) -> Result<LoadOutcome, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let outcome = match ext.as_str() {
        "csv" => load_csv(path, params, options),
        "json" => load_json(path, params, options),
        "parquet" | "pq" => load_parquet(path, params, options),
        other => Err(LoadError::UnsupportedFormat {
            ext: other.to_string(),
        }),
    }?;

    log::info!(
        "loaded {} measurements from {} ({} locations, {} parameters)",
        outcome.dataset.len(),
        path.display(),
        outcome.dataset.locations.len(),
        outcome.dataset.parameters.len(),
    );
    if !outcome.errors.is_empty() {
        log::warn!(
            "{} rows excluded while loading {}",
            outcome.errors.len(),
            path.display()
        );
    }

    Ok(outcome)
}

// ---------------------------------------------------------------------------
// Shared row assembly
// ---------------------------------------------------------------------------

/// A value cell before numeric validation.
enum ValueCell<'a> {
    Text(&'a str),
    Number(f64),
}

/// Tokens the source data uses for "no reading".
fn is_missing_token(s: &str) -> bool {
    matches!(s, "" | "*" | "**" | "#" | "-" | "--")
        || s.eq_ignore_ascii_case("na")
        || s.eq_ignore_ascii_case("n/a")
        || s.eq_ignore_ascii_case("nil")
}

/// Parse a date cell. Accepts ISO dates, RFC 3339 datetimes (truncated to
/// their date), and day-first locale forms.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}

/// Validate one raw row and build a [`Measurement`], or record why not.
/// Row numbers are 1-based over data rows.
fn build_row(
    row: usize,
    location: &str,
    date_raw: &str,
    parameter_raw: &str,
    value: ValueCell,
    unit: &str,
    params: &ParameterSet,
    options: &LoadOptions,
    errors: &mut Vec<RowError>,
) -> Option<Measurement> {
    let location = location.trim();
    if location.is_empty() {
        errors.push(RowError::MissingField {
            row,
            column: options.columns.location.clone(),
        });
        return None;
    }

    let Some(date) = parse_date(date_raw) else {
        errors.push(RowError::Date {
            row,
            raw: date_raw.trim().to_string(),
        });
        return None;
    };

    let value = match value {
        ValueCell::Number(v) => v,
        ValueCell::Text(raw) => {
            let raw = raw.trim();
            match raw.parse::<f64>() {
                Ok(v) if !is_missing_token(raw) => v,
                // Sentinel tokens and anything unparseable land here.
                _ => {
                    errors.push(RowError::Value {
                        row,
                        raw: raw.to_string(),
                    });
                    return None;
                }
            }
        }
    };
    if !value.is_finite() {
        errors.push(RowError::Value {
            row,
            raw: value.to_string(),
        });
        return None;
    }

    let def = params.resolve(parameter_raw);
    let parameter = match def {
        Some(def) => def.name.clone(),
        None if options.keep_unknown => parameter_raw.trim().to_string(),
        None => {
            errors.push(RowError::UnknownParameter {
                row,
                name: parameter_raw.trim().to_string(),
            });
            return None;
        }
    };

    if value < 0.0 && def.is_none_or(|d| d.non_negative) {
        errors.push(RowError::NegativeValue {
            row,
            parameter,
            value,
        });
        return None;
    }
    if value == 0.0 && def.is_some_and(|d| d.zero_is_missing) {
        errors.push(RowError::Value {
            row,
            raw: "0".to_string(),
        });
        return None;
    }

    // An empty unit cell falls back to the canonical unit for known
    // parameters; unknown parameters have nothing to fall back to.
    let unit = match (unit.trim(), def) {
        ("", Some(def)) => def.unit.clone(),
        ("", None) => {
            errors.push(RowError::MissingField {
                row,
                column: options.columns.unit.clone(),
            });
            return None;
        }
        (u, _) => u.to_string(),
    };

    Some(Measurement::new(location, date, &parameter, value, &unit))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Match a header cell against a configured column name, tolerant of
/// surrounding whitespace and case.
fn header_position(headers: &[String], wanted: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(wanted.trim()))
}

fn load_csv(
    path: &Path,
    params: &ParameterSet,
    options: &LoadOptions,
) -> Result<LoadOutcome, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| LoadError::FileNotFound {
        path: path.to_path_buf(),
        source: e,
    })?;

    // flexible(true) turns short rows into per-row errors instead of
    // aborting the whole load.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let cols = &options.columns;
    let resolve = |name: &str| {
        header_position(&headers, name).ok_or_else(|| LoadError::MissingColumn {
            column: name.to_string(),
            path: path.to_path_buf(),
        })
    };
    let location_idx = resolve(&cols.location)?;
    let date_idx = resolve(&cols.date)?;
    let parameter_idx = resolve(&cols.parameter)?;
    let value_idx = resolve(&cols.value)?;
    let unit_idx = resolve(&cols.unit)?;
    let width = headers.len();

    let mut measurements = Vec::new();
    let mut errors = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                errors.push(RowError::Malformed {
                    row,
                    reason: e.to_string(),
                });
                continue;
            }
        };
        if record.len() != width {
            errors.push(RowError::Malformed {
                row,
                reason: format!("expected {width} fields, got {}", record.len()),
            });
            continue;
        }

        let measurement = build_row(
            row,
            record.get(location_idx).unwrap_or(""),
            record.get(date_idx).unwrap_or(""),
            record.get(parameter_idx).unwrap_or(""),
            ValueCell::Text(record.get(value_idx).unwrap_or("")),
            record.get(unit_idx).unwrap_or(""),
            params,
            options,
            &mut errors,
        );
        measurements.extend(measurement);
    }

    Ok(LoadOutcome {
        dataset: Dataset::from_measurements(measurements),
        errors,
    })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "location": "Palla", "date": "2023-01-05",
///     "parameter": "BOD", "value": 2.4, "unit": "mg/L" },
///   ...
/// ]
/// ```
///
/// `value` may be a number or a numeric string.
fn load_json(
    path: &Path,
    params: &ParameterSet,
    options: &LoadOptions,
) -> Result<LoadOutcome, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| LoadError::FileNotFound {
        path: path.to_path_buf(),
        source: e,
    })?;
    let root: JsonValue = serde_json::from_str(&text).map_err(|e| LoadError::Json {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let records = root.as_array().ok_or_else(|| LoadError::Json {
        path: path.to_path_buf(),
        reason: "expected a top-level array of records".to_string(),
    })?;

    let cols = &options.columns;
    let mut measurements = Vec::new();
    let mut errors = Vec::new();

    for (i, record) in records.iter().enumerate() {
        let row = i + 1;
        let Some(obj) = record.as_object() else {
            errors.push(RowError::Malformed {
                row,
                reason: "record is not a JSON object".to_string(),
            });
            continue;
        };

        let text_field = |name: &str| -> String {
            obj.get(name)
                .and_then(JsonValue::as_str)
                .unwrap_or("")
                .to_string()
        };
        let value = match obj.get(&cols.value) {
            Some(JsonValue::Number(n)) => ValueCell::Number(n.as_f64().unwrap_or(f64::NAN)),
            Some(JsonValue::String(s)) => ValueCell::Text(s),
            _ => ValueCell::Text(""),
        };

        let measurement = build_row(
            row,
            &text_field(&cols.location),
            &text_field(&cols.date),
            &text_field(&cols.parameter),
            value,
            &text_field(&cols.unit),
            params,
            options,
            &mut errors,
        );
        measurements.extend(measurement);
    }

    Ok(LoadOutcome {
        dataset: Dataset::from_measurements(measurements),
        errors,
    })
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Read a single string cell from a Utf8 column.
fn string_at(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    col.as_any()
        .downcast_ref::<StringArray>()
        .map(|arr| arr.value(row).to_string())
}

/// Read a date cell from a Utf8 or Date32 column, rendered as ISO text so
/// the shared row assembly can parse it uniformly.
fn date_string_at(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => string_at(col, row),
        DataType::Date32 => {
            let arr = col.as_any().downcast_ref::<Date32Array>()?;
            let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
            epoch
                .checked_add_signed(Duration::days(arr.value(row) as i64))
                .map(|d| d.format("%Y-%m-%d").to_string())
        }
        _ => None,
    }
}

/// Read a numeric cell from any supported value column type.
fn number_at(col: &Arc<dyn Array>, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|a| a.value(row)),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row) as f64),
        _ => None,
    }
}

fn load_parquet(
    path: &Path,
    params: &ParameterSet,
    options: &LoadOptions,
) -> Result<LoadOutcome, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| LoadError::FileNotFound {
        path: path.to_path_buf(),
        source: e,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(|e| LoadError::Parquet {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    // Resolve the five required columns once, against the file schema.
    let schema = builder.schema().clone();
    let field_names: Vec<String> = schema.fields().iter().map(|f| f.name().clone()).collect();
    let cols = &options.columns;
    let resolve = |name: &str| {
        header_position(&field_names, name).ok_or_else(|| LoadError::MissingColumn {
            column: name.to_string(),
            path: path.to_path_buf(),
        })
    };
    let location_idx = resolve(&cols.location)?;
    let date_idx = resolve(&cols.date)?;
    let parameter_idx = resolve(&cols.parameter)?;
    let value_idx = resolve(&cols.value)?;
    let unit_idx = resolve(&cols.unit)?;

    for (idx, wanted) in [
        (location_idx, DataType::Utf8),
        (parameter_idx, DataType::Utf8),
        (unit_idx, DataType::Utf8),
    ] {
        let got = schema.field(idx).data_type();
        if *got != wanted {
            return Err(LoadError::Parquet {
                path: path.to_path_buf(),
                reason: format!(
                    "column `{}` has type {got:?}, expected {wanted:?}",
                    schema.field(idx).name()
                ),
            });
        }
    }

    let reader = builder.build().map_err(|e| LoadError::Parquet {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut measurements = Vec::new();
    let mut errors = Vec::new();
    let mut row = 0usize;

    for batch_result in reader {
        let batch = batch_result.map_err(|e| LoadError::Parquet {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let location_col = batch.column(location_idx);
        let date_col = batch.column(date_idx);
        let parameter_col = batch.column(parameter_idx);
        let value_col = batch.column(value_idx);
        let unit_col = batch.column(unit_idx);

        for batch_row in 0..batch.num_rows() {
            row += 1;

            let Some(date_raw) = date_string_at(date_col, batch_row) else {
                errors.push(RowError::Date {
                    row,
                    raw: String::new(),
                });
                continue;
            };
            let value = match number_at(value_col, batch_row) {
                Some(v) => ValueCell::Number(v),
                None => {
                    errors.push(RowError::Value {
                        row,
                        raw: "null".to_string(),
                    });
                    continue;
                }
            };

            let measurement = build_row(
                row,
                &string_at(location_col, batch_row).unwrap_or_default(),
                &date_raw,
                &string_at(parameter_col, batch_row).unwrap_or_default(),
                value,
                &string_at(unit_col, batch_row).unwrap_or_default(),
                params,
                options,
                &mut errors,
            );
            measurements.extend(measurement);
        }
    }

    Ok(LoadOutcome {
        dataset: Dataset::from_measurements(measurements),
        errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    fn defaults() -> (ParameterSet, LoadOptions) {
        (ParameterSet::defaults(), LoadOptions::default())
    }

    #[test]
    fn csv_loads_valid_rows_and_canonicalizes_aliases() {
        let csv = "location,date,parameter,value,unit\n\
                   Palla,2023-01-05,BOD_mg_L,2.4,mg/L\n\
                   Okhla,05/01/2023,Total_Coliform_MPN_100ml,5000,MPN/100mL\n";
        let f = write_fixture(".csv", csv);
        let (params, options) = defaults();
        let outcome = load_file(f.path(), &params, &options).unwrap();

        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.dataset.len(), 2);
        assert_eq!(outcome.dataset.measurements[0].parameter, "BOD");
        assert_eq!(outcome.dataset.measurements[1].parameter, "Total Coliform");
        assert_eq!(
            outcome.dataset.measurements[1].date,
            NaiveDate::from_ymd_opt(2023, 1, 5).unwrap()
        );
    }

    #[test]
    fn non_numeric_value_excludes_row_with_its_number() {
        let csv = "location,date,parameter,value,unit\n\
                   Palla,2023-01-05,BOD,2.4,mg/L\n\
                   Palla,2023-02-05,BOD,not-a-number,mg/L\n\
                   Palla,2023-03-05,BOD,2.9,mg/L\n";
        let f = write_fixture(".csv", csv);
        let (params, options) = defaults();
        let outcome = load_file(f.path(), &params, &options).unwrap();

        assert_eq!(outcome.dataset.len(), 2);
        assert_eq!(
            outcome.errors,
            vec![RowError::Value {
                row: 2,
                raw: "not-a-number".to_string()
            }]
        );
    }

    #[test]
    fn sentinel_tokens_count_as_unparseable_values() {
        let csv = "location,date,parameter,value,unit\n\
                   Palla,2023-01-05,BOD,*,mg/L\n\
                   Palla,2023-02-05,BOD,Nil,mg/L\n\
                   Palla,2023-03-05,BOD,NA,mg/L\n";
        let f = write_fixture(".csv", csv);
        let (params, options) = defaults();
        let outcome = load_file(f.path(), &params, &options).unwrap();

        assert!(outcome.dataset.is_empty());
        assert_eq!(outcome.errors.len(), 3);
        assert!(outcome
            .errors
            .iter()
            .all(|e| matches!(e, RowError::Value { .. })));
    }

    #[test]
    fn unparseable_date_excludes_row() {
        let csv = "location,date,parameter,value,unit\n\
                   Palla,soon,BOD,2.4,mg/L\n";
        let f = write_fixture(".csv", csv);
        let (params, options) = defaults();
        let outcome = load_file(f.path(), &params, &options).unwrap();

        assert!(outcome.dataset.is_empty());
        assert_eq!(
            outcome.errors,
            vec![RowError::Date {
                row: 1,
                raw: "soon".to_string()
            }]
        );
    }

    #[test]
    fn unknown_parameter_is_excluded_by_default_and_kept_on_request() {
        let csv = "location,date,parameter,value,unit\n\
                   Palla,2023-01-05,Turbidity,12.0,NTU\n";
        let f = write_fixture(".csv", csv);
        let (params, mut options) = defaults();

        let outcome = load_file(f.path(), &params, &options).unwrap();
        assert!(outcome.dataset.is_empty());
        assert!(matches!(
            outcome.errors[0],
            RowError::UnknownParameter { row: 1, .. }
        ));

        options.keep_unknown = true;
        let outcome = load_file(f.path(), &params, &options).unwrap();
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.dataset.measurements[0].parameter, "Turbidity");
        assert_eq!(outcome.dataset.measurements[0].band, None);
    }

    #[test]
    fn negative_concentration_is_flagged_not_kept() {
        let csv = "location,date,parameter,value,unit\n\
                   Palla,2023-01-05,BOD,-0.4,mg/L\n";
        let f = write_fixture(".csv", csv);
        let (params, options) = defaults();
        let outcome = load_file(f.path(), &params, &options).unwrap();

        assert!(outcome.dataset.is_empty());
        assert!(matches!(
            outcome.errors[0],
            RowError::NegativeValue { row: 1, .. }
        ));
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let csv = "location,date,parameter,value\n\
                   Palla,2023-01-05,BOD,2.4\n";
        let f = write_fixture(".csv", csv);
        let (params, options) = defaults();
        let result = load_file(f.path(), &params, &options);

        assert!(matches!(
            result,
            Err(LoadError::MissingColumn { ref column, .. }) if column == "unit"
        ));
    }

    #[test]
    fn short_row_is_a_malformed_record_not_a_fatal_error() {
        let csv = "location,date,parameter,value,unit\n\
                   Palla,2023-01-05,BOD\n\
                   Palla,2023-02-05,BOD,2.4,mg/L\n";
        let f = write_fixture(".csv", csv);
        let (params, options) = defaults();
        let outcome = load_file(f.path(), &params, &options).unwrap();

        assert_eq!(outcome.dataset.len(), 1);
        assert!(matches!(outcome.errors[0], RowError::Malformed { row: 1, .. }));
    }

    #[test]
    fn custom_column_map_resolves_renamed_headers() {
        let csv = "Site,Sampled,Analyte,Reading,Units\n\
                   Palla,2023-01-05,BOD,2.4,mg/L\n";
        let f = write_fixture(".csv", csv);
        let params = ParameterSet::defaults();
        let options = LoadOptions {
            columns: ColumnMap {
                location: "Site".to_string(),
                date: "Sampled".to_string(),
                parameter: "Analyte".to_string(),
                value: "Reading".to_string(),
                unit: "Units".to_string(),
            },
            keep_unknown: false,
        };
        let outcome = load_file(f.path(), &params, &options).unwrap();

        assert_eq!(outcome.dataset.len(), 1);
        assert_eq!(outcome.dataset.measurements[0].location, "Palla");
    }

    #[test]
    fn json_records_load_with_numeric_and_string_values() {
        let json = r#"[
            {"location": "Palla", "date": "2023-01-05", "parameter": "BOD",
             "value": 2.4, "unit": "mg/L"},
            {"location": "Okhla", "date": "2023-01-05", "parameter": "DO",
             "value": "6.1", "unit": "mg/L"},
            {"location": "Okhla", "date": "2023-01-05", "parameter": "DO",
             "value": null, "unit": "mg/L"},
            "not a record"
        ]"#;
        let f = write_fixture(".json", json);
        let (params, options) = defaults();
        let outcome = load_file(f.path(), &params, &options).unwrap();

        assert_eq!(outcome.dataset.len(), 2);
        assert_eq!(outcome.errors.len(), 2);
        assert!(matches!(outcome.errors[0], RowError::Value { row: 3, .. }));
        assert!(matches!(outcome.errors[1], RowError::Malformed { row: 4, .. }));
    }

    #[test]
    fn json_must_be_a_records_array() {
        let f = write_fixture(".json", r#"{"location": "Palla"}"#);
        let (params, options) = defaults();
        assert!(matches!(
            load_file(f.path(), &params, &options),
            Err(LoadError::Json { .. })
        ));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let f = write_fixture(".xlsx", "not really a spreadsheet");
        let (params, options) = defaults();
        assert!(matches!(
            load_file(f.path(), &params, &options),
            Err(LoadError::UnsupportedFormat { ref ext }) if ext == "xlsx"
        ));
    }

    #[test]
    fn parquet_flat_columns_round_trip() {
        use arrow::array::{Date32Array, Float64Array, StringArray};
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let schema = Arc::new(Schema::new(vec![
            Field::new("location", DataType::Utf8, false),
            Field::new("date", DataType::Date32, false),
            Field::new("parameter", DataType::Utf8, false),
            Field::new("value", DataType::Float64, false),
            Field::new("unit", DataType::Utf8, false),
        ]));
        // 2023-01-05 is 19362 days after the Unix epoch.
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["Palla", "Okhla"])),
                Arc::new(Date32Array::from(vec![19362, 19362])),
                Arc::new(StringArray::from(vec!["BOD", "DO"])),
                Arc::new(Float64Array::from(vec![2.4, 6.1])),
                Arc::new(StringArray::from(vec!["mg/L", "mg/L"])),
            ],
        )
        .unwrap();

        let f = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let out = std::fs::File::create(f.path()).unwrap();
        let mut writer = ArrowWriter::try_new(out, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let (params, options) = defaults();
        let outcome = load_file(f.path(), &params, &options).unwrap();
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.dataset.len(), 2);
        assert_eq!(
            outcome.dataset.measurements[0].date,
            NaiveDate::from_ymd_opt(2023, 1, 5).unwrap()
        );
    }
}
