#![forbid(unsafe_code)]

pub mod catalog;
pub mod geojson;
pub mod http;
pub mod loader;
pub mod source;

pub use catalog::{CatalogError, DatasetCatalog, DatasetEntry};
pub use http::HttpSource;
pub use loader::{DEFAULT_NAME_KEY, DatasetLoader};
pub use source::{FileSource, InMemorySource, PlaceSource, SourceError};
