use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_DATASET_FILE: &str = "parki_narodowe.geojson";
pub const DEFAULT_DATASET_NAME: &str = "Parki Narodowe";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("dataset file name cannot be empty")]
    EmptyFile,

    #[error("catalog must list at least one dataset")]
    Empty,

    #[error("dataset listed twice: {0}")]
    DuplicateFile(String),
}

/// One selectable dataset: the file to fetch and the name shown to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetEntry {
    file: String,
    display_name: String,
}

impl DatasetEntry {
    /// # Errors
    ///
    /// Returns `CatalogError::EmptyFile` if `file` is blank.
    pub fn new(file: impl Into<String>, display_name: impl Into<String>) -> Result<Self, CatalogError> {
        let file = file.into().trim().to_string();
        if file.is_empty() {
            return Err(CatalogError::EmptyFile);
        }
        let display_name = display_name.into().trim().to_string();
        let display_name = if display_name.is_empty() {
            default_display_name(&file)
        } else {
            display_name
        };
        Ok(Self { file, display_name })
    }

    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

fn default_display_name(file: &str) -> String {
    Path::new(file)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file)
        .to_string()
}

/// Parses `file=Display Name`, or a bare `file` named after its stem.
impl FromStr for DatasetEntry {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((file, name)) => Self::new(file, name),
            None => Self::new(s, ""),
        }
    }
}

/// Ordered list of datasets offered by the dataset picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetCatalog {
    entries: Vec<DatasetEntry>,
}

impl DatasetCatalog {
    /// # Errors
    ///
    /// Returns `CatalogError::Empty` for an empty list and
    /// `CatalogError::DuplicateFile` if a file is listed twice.
    pub fn new(entries: Vec<DatasetEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (idx, entry) in entries.iter().enumerate() {
            if entries[..idx].iter().any(|prev| prev.file == entry.file) {
                return Err(CatalogError::DuplicateFile(entry.file.clone()));
            }
        }
        Ok(Self { entries })
    }

    #[must_use]
    pub fn entries(&self) -> &[DatasetEntry] {
        &self.entries
    }

    /// The entry selected when the app opens.
    #[must_use]
    pub fn first(&self) -> &DatasetEntry {
        &self.entries[0]
    }

    #[must_use]
    pub fn find(&self, file: &str) -> Option<&DatasetEntry> {
        self.entries.iter().find(|entry| entry.file == file)
    }
}

impl Default for DatasetCatalog {
    fn default() -> Self {
        Self {
            entries: vec![DatasetEntry {
                file: DEFAULT_DATASET_FILE.to_string(),
                display_name: DEFAULT_DATASET_NAME.to_string(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_file_and_display_name() {
        let entry: DatasetEntry = "wojewodztwa.geojson=Województwa".parse().unwrap();
        assert_eq!(entry.file(), "wojewodztwa.geojson");
        assert_eq!(entry.display_name(), "Województwa");

        let bare: DatasetEntry = "jeziora.geojson".parse().unwrap();
        assert_eq!(bare.display_name(), "jeziora");

        assert_eq!("=Nic".parse::<DatasetEntry>(), Err(CatalogError::EmptyFile));
    }

    #[test]
    fn catalog_rejects_empty_and_duplicates() {
        assert_eq!(DatasetCatalog::new(Vec::new()), Err(CatalogError::Empty));
        let a = DatasetEntry::new("a.geojson", "A").unwrap();
        assert_eq!(
            DatasetCatalog::new(vec![a.clone(), a]),
            Err(CatalogError::DuplicateFile("a.geojson".into()))
        );
    }

    #[test]
    fn default_catalog_offers_national_parks() {
        let catalog = DatasetCatalog::default();
        assert_eq!(catalog.first().file(), DEFAULT_DATASET_FILE);
        assert_eq!(catalog.first().display_name(), DEFAULT_DATASET_NAME);
        assert!(catalog.find("missing.geojson").is_none());
    }
}
