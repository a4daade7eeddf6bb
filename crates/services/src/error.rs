//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::{ConfigError, DataError};

/// Errors emitted while preparing or starting a quiz.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("dataset is still loading")]
    Loading,
    #[error("no dataset loaded")]
    NoDataset,
}

impl QuizError {
    /// Message suitable for the prompt line of the UI.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            QuizError::Data(DataError::Empty { source_name }) => {
                format!("No playable places found in {source_name}. Pick another dataset.")
            }
            QuizError::Data(err) => {
                format!("Error loading places ({err}). Make sure the file exists and is valid GeoJSON.")
            }
            QuizError::Config(ConfigError::ConflictingModes) => {
                "Hard mode and training mode cannot be combined.".to_string()
            }
            QuizError::Config(err) => err.to_string(),
            QuizError::Loading => "Places are still loading, please wait.".to_string(),
            QuizError::NoDataset => "No places loaded. Pick a dataset first.".to_string(),
        }
    }
}
