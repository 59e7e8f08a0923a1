/// Data layer: core types, loading, annotation, filtering, and export.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset + row errors
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ annotate  │  band + display value from ParameterSet
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Measurement>, (location, parameter) index
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply FilterSpec → FilteredResult + summaries
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  FilteredResult → CSV / JSON text
///   └──────────┘
/// ```
pub mod annotate;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
