use thiserror::Error;

/// Errors raised while turning a named source into a playable dataset.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DataError {
    #[error("could not load places from {source_name}: {reason}")]
    Fetch { source_name: String, reason: String },

    #[error("{source_name} contains no places with a name and a geometry")]
    Empty { source_name: String },
}

impl DataError {
    #[must_use]
    pub fn fetch(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::Fetch {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    #[must_use]
    pub fn empty(source_name: impl Into<String>) -> Self {
        Self::Empty {
            source_name: source_name.into(),
        }
    }
}

/// Invalid quiz configuration requested by the player.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("hard mode and training mode cannot be active at the same time")]
    ConflictingModes,
}
