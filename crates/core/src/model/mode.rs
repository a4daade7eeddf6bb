use crate::error::ConfigError;

/// How the player answers a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QuizMode {
    /// Click the matching region among all rendered regions.
    #[default]
    Easy,
    /// Click within a distance tolerance of the region's center, no hints.
    Hard,
    /// Browse regions one at a time without scoring.
    Training,
}

impl QuizMode {
    #[must_use]
    pub fn is_scored(self) -> bool {
        !matches!(self, QuizMode::Training)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            QuizMode::Easy => "Easy",
            QuizMode::Hard => "Hard",
            QuizMode::Training => "Training",
        }
    }
}

/// The two mode toggles offered before a session starts.
///
/// Hard and training are mutually exclusive: switching one on switches the
/// other off. With both off the quiz runs in easy mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeSelection {
    hard: bool,
    training: bool,
}

impl ModeSelection {
    /// Build a selection from raw toggle states.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConflictingModes` if both toggles are on.
    pub fn from_flags(hard: bool, training: bool) -> Result<Self, ConfigError> {
        if hard && training {
            return Err(ConfigError::ConflictingModes);
        }
        Ok(Self { hard, training })
    }

    #[must_use]
    pub fn for_mode(mode: QuizMode) -> Self {
        Self {
            hard: mode == QuizMode::Hard,
            training: mode == QuizMode::Training,
        }
    }

    pub fn set_hard(&mut self, on: bool) {
        self.hard = on;
        if on {
            self.training = false;
        }
    }

    pub fn set_training(&mut self, on: bool) {
        self.training = on;
        if on {
            self.hard = false;
        }
    }

    pub fn toggle_hard(&mut self) {
        self.set_hard(!self.hard);
    }

    pub fn toggle_training(&mut self) {
        self.set_training(!self.training);
    }

    #[must_use]
    pub fn hard(&self) -> bool {
        self.hard
    }

    #[must_use]
    pub fn training(&self) -> bool {
        self.training
    }

    #[must_use]
    pub fn mode(&self) -> QuizMode {
        match (self.hard, self.training) {
            (_, true) => QuizMode::Training,
            (true, false) => QuizMode::Hard,
            (false, false) => QuizMode::Easy,
        }
    }
}
