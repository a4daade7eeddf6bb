use std::sync::Arc;

use quiz_core::DataError;
use quiz_core::model::Dataset;

use crate::catalog::DatasetEntry;
use crate::geojson::parse_places;
use crate::source::PlaceSource;

/// Feature property holding the place name in the bundled datasets.
pub const DEFAULT_NAME_KEY: &str = "nazwa";

/// Fetches a catalog entry from a source and turns it into a `Dataset`.
#[derive(Clone)]
pub struct DatasetLoader {
    source: Arc<dyn PlaceSource>,
    name_key: String,
}

impl DatasetLoader {
    #[must_use]
    pub fn new(source: Arc<dyn PlaceSource>) -> Self {
        Self {
            source,
            name_key: DEFAULT_NAME_KEY.to_string(),
        }
    }

    #[must_use]
    pub fn with_name_key(mut self, name_key: impl Into<String>) -> Self {
        self.name_key = name_key.into();
        self
    }

    #[must_use]
    pub fn name_key(&self) -> &str {
        &self.name_key
    }

    /// Load and filter the places of one dataset.
    ///
    /// # Errors
    ///
    /// Returns `DataError::Fetch` if the source fails or the document is not a
    /// feature collection, and `DataError::Empty` if no feature is playable.
    pub async fn load(&self, entry: &DatasetEntry) -> Result<Dataset, DataError> {
        let raw = self.source.fetch(entry.file()).await.map_err(|err| {
            tracing::warn!(file = entry.file(), error = %err, "dataset fetch failed");
            DataError::fetch(entry.file(), err)
        })?;

        let report = parse_places(&raw, &self.name_key).map_err(|err| {
            tracing::warn!(file = entry.file(), error = %err, "dataset is not valid GeoJSON");
            DataError::fetch(entry.file(), err)
        })?;

        tracing::info!(
            file = entry.file(),
            accepted = report.places.len(),
            rejected = report.rejected,
            "dataset parsed"
        );
        if report.places.is_empty() {
            return Err(DataError::empty(entry.display_name()));
        }

        let dataset = Dataset::new(entry.display_name(), report.places)?;
        for name in dataset.duplicate_names() {
            tracing::warn!(file = entry.file(), place = %name, "duplicate place name");
        }
        Ok(dataset)
    }
}

impl std::fmt::Debug for DatasetLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetLoader")
            .field("name_key", &self.name_key)
            .finish_non_exhaustive()
    }
}
