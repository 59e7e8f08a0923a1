//! River water-quality dataset engine.
//!
//! Loads tabular measurement files (CSV, JSON, Parquet), validates and
//! normalizes the rows, classifies every reading into a quality band from
//! parameter-specific thresholds, and serves filtered views with summary
//! statistics for a chart layer to render. Filtered views export back to
//! CSV that round-trips through the loader.
//!
//! The usual flow:
//!
//! ```no_run
//! use riverlens::{ParameterSet, Session};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = Session::new(ParameterSet::defaults());
//! session.load(std::path::Path::new("measurements.csv"))?;
//! session.toggle_location("Okhla");
//! let view = session.query();
//! let csv_text = session.export_csv()?;
//! # Ok(())
//! # }
//! ```

pub mod color;
pub mod data;
pub mod error;
pub mod params;
pub mod session;
pub mod wqi;

pub use color::{generate_palette, LocationColors, Rgb};
pub use data::annotate::annotate;
pub use data::export::{to_csv, to_json, CSV_HEADER};
pub use data::filter::{matching_indices, query, FilterSpec, FilteredResult, SeriesSummary};
pub use data::loader::{load_file, ColumnMap, LoadOptions, LoadOutcome};
pub use data::model::{Dataset, Measurement};
pub use error::{ExportError, LoadError, RowError};
pub use params::{Band, ParameterDef, ParameterSet, ScaleRule};
pub use session::Session;
