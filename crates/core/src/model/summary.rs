use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("score ({score}) exceeds total ({total})")]
    ScoreExceedsTotal { score: u32, total: u32 },
}

/// Final result of a scored quiz session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    dataset_name: String,
    score: u32,
    total: u32,
    skipped: u32,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl QuizSummary {
    /// `total` counts the places that were actually evaluated; `skipped`
    /// places are reported separately and never scored.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::InvalidTimeRange` if `completed_at` is before `started_at`.
    /// Returns `SummaryError::ScoreExceedsTotal` if `score > total`.
    pub fn new(
        dataset_name: impl Into<String>,
        score: u32,
        total: u32,
        skipped: u32,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, SummaryError> {
        if completed_at < started_at {
            return Err(SummaryError::InvalidTimeRange);
        }
        if score > total {
            return Err(SummaryError::ScoreExceedsTotal { score, total });
        }
        Ok(Self {
            dataset_name: dataset_name.into(),
            score,
            total,
            skipped,
            started_at,
            completed_at,
        })
    }

    #[must_use]
    pub fn dataset_name(&self) -> &str {
        &self.dataset_name
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn skipped(&self) -> u32 {
        self.skipped
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Share of correct answers in percent; 0 when nothing was evaluated.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.score) / f64::from(self.total) * 100.0
    }
}
