//! Error types for loading and exporting measurement data.

use std::path::PathBuf;

/// Fatal load errors. Any of these aborts the load with no partial dataset.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Returned when the input file does not exist or is unreadable.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned for file extensions the loader does not dispatch on.
    #[error("unsupported file extension: .{ext}")]
    UnsupportedFormat {
        /// The offending extension (lowercased, without the dot).
        ext: String,
    },

    /// Returned when a required column is absent from the header or schema.
    ///
    /// No partial schema is meaningful, so this is fatal for the whole load.
    #[error("missing required column `{column}` in {path}")]
    MissingColumn {
        /// The semantic column that could not be resolved.
        column: String,
        /// Path to the source file.
        path: PathBuf,
    },

    /// Returned when the CSV reader fails before any rows can be processed.
    #[error("CSV error in {path}")]
    Csv {
        /// Path to the source file.
        path: PathBuf,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// Returned when the JSON document is not a records-oriented array.
    #[error("JSON error in {path}: {reason}")]
    Json {
        /// Path to the source file.
        path: PathBuf,
        /// What was wrong with the document.
        reason: String,
    },

    /// Returned when the Parquet file cannot be opened or decoded, or a
    /// required column has a type the loader does not handle.
    #[error("Parquet error in {path}: {reason}")]
    Parquet {
        /// Path to the source file.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },
}

/// Row-level problems collected during a load.
///
/// These never abort the load: the offending row is excluded and the error
/// recorded next to the best-effort dataset built from the remaining rows.
/// Row numbers are 1-based over data rows, the header excluded, matching how
/// a spreadsheet user counts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowError {
    /// The date cell could not be parsed with any accepted format.
    #[error("row {row}: unparseable date `{raw}`")]
    Date { row: usize, raw: String },

    /// The value cell is not a finite number (includes sentinel tokens
    /// such as `*`, `NA`, `Nil`).
    #[error("row {row}: unparseable value `{raw}`")]
    Value { row: usize, raw: String },

    /// A negative reading for a parameter where that is not physically
    /// meaningful (concentrations, counts).
    #[error("row {row}: negative value {value} for {parameter}")]
    NegativeValue {
        row: usize,
        parameter: String,
        value: f64,
    },

    /// The parameter name did not resolve against the reference definitions.
    #[error("row {row}: unknown parameter `{name}`")]
    UnknownParameter { row: usize, name: String },

    /// A required cell is empty.
    #[error("row {row}: empty `{column}` field")]
    MissingField { row: usize, column: String },

    /// The record is structurally broken (wrong field count, non-object
    /// JSON entry, null Parquet cell).
    #[error("row {row}: malformed record: {reason}")]
    Malformed { row: usize, reason: String },
}

impl RowError {
    /// The 1-based data row the error refers to.
    pub fn row(&self) -> usize {
        match self {
            RowError::Date { row, .. }
            | RowError::Value { row, .. }
            | RowError::NegativeValue { row, .. }
            | RowError::UnknownParameter { row, .. }
            | RowError::MissingField { row, .. }
            | RowError::Malformed { row, .. } => *row,
        }
    }
}

/// Errors from serializing a filtered result.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// CSV serialization failed.
    #[error("CSV export failed")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed.
    #[error("JSON export failed")]
    Json(#[from] serde_json::Error),

    /// The CSV writer produced non-UTF-8 output.
    #[error("export produced invalid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The CSV writer's underlying buffer could not be retrieved.
    #[error("CSV export failed")]
    Io(#[from] std::io::Error),
}
