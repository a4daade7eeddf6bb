use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Errors surfaced by place sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid dataset file name: {0}")]
    InvalidName(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("HTTP status {status} for {file}")]
    HttpStatus { status: u16, file: String },

    #[error("transport error: {0}")]
    Transport(String),
}

/// Where raw GeoJSON documents come from.
#[async_trait]
pub trait PlaceSource: Send + Sync {
    /// Fetch the raw document for a dataset file.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the document is missing or cannot be read.
    async fn fetch(&self, file: &str) -> Result<String, SourceError>;
}

/// Reads dataset files below a root directory.
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, file: &str) -> Result<PathBuf, SourceError> {
        let relative = Path::new(file);
        let plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if file.is_empty() || !plain {
            return Err(SourceError::InvalidName(file.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl PlaceSource for FileSource {
    async fn fetch(&self, file: &str) -> Result<String, SourceError> {
        let path = self.resolve(file)?;
        tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SourceError::NotFound(path.display().to_string())
            } else {
                SourceError::Io(e.to_string())
            }
        })
    }
}

/// Documents held in memory, keyed by file name. Useful for tests and demos.
#[derive(Clone, Default)]
pub struct InMemorySource {
    documents: HashMap<String, String>,
}

impl InMemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_document(mut self, file: impl Into<String>, json: impl Into<String>) -> Self {
        self.documents.insert(file.into(), json.into());
        self
    }
}

#[async_trait]
impl PlaceSource for InMemorySource {
    async fn fetch(&self, file: &str) -> Result<String, SourceError> {
        self.documents
            .get(file)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(file.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_source_returns_inserted_document() {
        let source = InMemorySource::new().with_document("a.geojson", "{}");
        assert_eq!(source.fetch("a.geojson").await.unwrap(), "{}");
        assert!(matches!(
            source.fetch("b.geojson").await,
            Err(SourceError::NotFound(name)) if name == "b.geojson"
        ));
    }

    #[tokio::test]
    async fn file_source_rejects_paths_leaving_the_root() {
        let source = FileSource::new("/srv/data");
        for bad in ["../etc/passwd", "/etc/passwd", ""] {
            assert!(
                matches!(source.fetch(bad).await, Err(SourceError::InvalidName(_))),
                "{bad} should be rejected"
            );
        }
    }
}
