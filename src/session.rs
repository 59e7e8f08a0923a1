use std::path::Path;

use crate::color::LocationColors;
use crate::data::annotate::annotate;
use crate::data::export;
use crate::data::filter::{matching_indices, query, FilterSpec, FilteredResult};
use crate::data::loader::{load_file, LoadOptions};
use crate::data::model::Dataset;
use crate::error::{ExportError, LoadError, RowError};
use crate::params::ParameterSet;
use crate::wqi;

// ---------------------------------------------------------------------------
// Session – one user's in-memory working state
// ---------------------------------------------------------------------------

/// Owns the current annotated dataset and the active filter selection.
///
/// All operations go through an explicit `Session` value — there is no
/// process-wide dataset. Reloading replaces the dataset wholesale; queries
/// see it read-only. Single-threaded request/response: each call runs to
/// completion before the next.
pub struct Session {
    /// Loaded dataset (None until a file is loaded).
    dataset: Option<Dataset>,

    /// Reference parameter definitions for this session.
    params: ParameterSet,

    /// Loader configuration.
    options: LoadOptions,

    /// Active filter selection.
    pub filter: FilterSpec,

    /// Indices of measurements passing the current filter (cached).
    visible_indices: Vec<usize>,

    /// Row errors from the most recent load.
    load_errors: Vec<RowError>,

    /// Stable per-location colours for the chart layer.
    colors: Option<LocationColors>,
}

impl Session {
    /// Start a session with the given reference definitions and default
    /// loader options.
    pub fn new(params: ParameterSet) -> Self {
        Session {
            dataset: None,
            params,
            options: LoadOptions::default(),
            filter: FilterSpec::default(),
            visible_indices: Vec::new(),
            load_errors: Vec::new(),
            colors: None,
        }
    }

    /// Override the loader options (column map, unknown-parameter policy).
    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    /// Load a file, annotate it, and replace the session dataset.
    ///
    /// Row-level problems are kept on the session ([`Session::load_errors`]);
    /// only schema/file-level failures abort, leaving the previous dataset
    /// in place.
    pub fn load(&mut self, path: &Path) -> Result<(), LoadError> {
        let outcome = load_file(path, &self.params, &self.options)?;
        self.load_errors = outcome.errors;
        let annotated = annotate(outcome.dataset, &self.params);
        self.set_dataset(annotated);
        Ok(())
    }

    /// Ingest a new dataset, resetting filters and colours.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.filter = FilterSpec::default();
        self.visible_indices = (0..dataset.len()).collect();
        self.colors = Some(LocationColors::new(&dataset));
        self.dataset = Some(dataset);
    }

    /// Rebuild the dataset with derived WQI rows appended, for sources that
    /// carry pH/BOD/DO but no index column. Derived rows are annotated like
    /// loaded ones.
    pub fn append_derived_wqi(&mut self) {
        let Some(dataset) = self.dataset.take() else {
            return;
        };
        let derived = wqi::derive(&dataset);
        if derived.is_empty() {
            log::debug!("no complete pH/BOD/DO groups; nothing to derive");
            self.dataset = Some(dataset);
            return;
        }
        log::info!("derived {} WQI measurements", derived.len());

        let mut measurements = dataset.measurements;
        measurements.extend(derived);
        let rebuilt = annotate(Dataset::from_measurements(measurements), &self.params);
        self.set_dataset(rebuilt);
    }

    /// The current dataset, if any.
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Row errors collected by the most recent load.
    pub fn load_errors(&self) -> &[RowError] {
        &self.load_errors
    }

    /// The session's parameter definitions.
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Per-location colours, once a dataset is loaded.
    pub fn colors(&self) -> Option<&LocationColors> {
        self.colors.as_ref()
    }

    /// Indices passing the current filter.
    pub fn visible_indices(&self) -> &[usize] {
        &self.visible_indices
    }

    /// Recompute the cached indices after a filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = matching_indices(ds, &self.filter);
        }
    }

    /// Run the current filter and build the chart-facing result.
    pub fn query(&self) -> FilteredResult {
        match &self.dataset {
            Some(ds) => query(ds, &self.filter),
            None => FilteredResult::default(),
        }
    }

    /// Export the current filtered view as CSV text.
    pub fn export_csv(&self) -> Result<String, ExportError> {
        export::to_csv(&self.query())
    }

    /// Export the current filtered view as JSON for the chart layer.
    pub fn export_json(&self) -> Result<String, ExportError> {
        export::to_json(&self.query())
    }

    // ---- Filter mutation helpers (the sidebar controls) ----

    /// Set or clear the inclusive date range.
    pub fn set_date_range(&mut self, range: Option<(chrono::NaiveDate, chrono::NaiveDate)>) {
        self.filter.date_range = range;
        self.refilter();
    }

    /// Toggle one location in the selection.
    pub fn toggle_location(&mut self, location: &str) {
        if !self.filter.locations.remove(location) {
            self.filter.locations.insert(location.to_string());
        }
        self.refilter();
    }

    /// Toggle one parameter in the selection.
    pub fn toggle_parameter(&mut self, parameter: &str) {
        if !self.filter.parameters.remove(parameter) {
            self.filter.parameters.insert(parameter.to_string());
        }
        self.refilter();
    }

    /// Select every location explicitly (equivalent to no restriction).
    pub fn select_all_locations(&mut self) {
        if let Some(ds) = &self.dataset {
            self.filter.locations = ds.locations.iter().cloned().collect();
        }
        self.refilter();
    }

    /// Clear the location selection (back to no restriction).
    pub fn clear_locations(&mut self) {
        self.filter.locations.clear();
        self.refilter();
    }

    /// Clear the parameter selection (back to no restriction).
    pub fn clear_parameters(&mut self) {
        self.filter.parameters.clear();
        self.refilter();
    }
}
