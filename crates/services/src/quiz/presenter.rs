//! Text projections of session state for the UI.

use quiz_core::model::{PlaceName, QuizSummary};

use super::progress::QuizProgress;
use super::session::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackLabel {
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackView {
    pub label: FeedbackLabel,
    pub message: String,
    pub style_class: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub score_text: String,
    pub summary_text: String,
}

/// Feedback banner for the given phase; `None` unless feedback is showing.
#[must_use]
pub fn present_feedback(phase: Phase, correct: Option<bool>) -> Option<FeedbackView> {
    if phase != Phase::ShowingFeedback {
        return None;
    }
    let view = if correct? {
        FeedbackView {
            label: FeedbackLabel::Correct,
            message: "Correct!".to_string(),
            style_class: "feedback-correct",
        }
    } else {
        FeedbackView {
            label: FeedbackLabel::Incorrect,
            message: "Missed!".to_string(),
            style_class: "feedback-incorrect",
        }
    };
    Some(view)
}

#[must_use]
pub fn present_summary(summary: &QuizSummary) -> SummaryView {
    let mut summary_text = format!(
        "Correctly identified {} of {} places ({}).",
        summary.score(),
        summary.total(),
        summary.dataset_name()
    );
    if summary.skipped() > 0 {
        summary_text.push_str(&format!(" {} skipped.", summary.skipped()));
    }
    SummaryView {
        score_text: format!("{:.1}%", summary.percentage()),
        summary_text,
    }
}

/// What the prompt line is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt<'a> {
    Loading { dataset: &'a str },
    LoadFailed { dataset: &'a str },
    Ready { dataset: &'a str, places: usize },
    Ask { place: &'a PlaceName },
    Training { place: &'a PlaceName },
}

#[must_use]
pub fn prompt_text(prompt: Prompt<'_>) -> String {
    match prompt {
        Prompt::Loading { dataset } => format!("Loading {dataset}..."),
        Prompt::LoadFailed { dataset } => {
            format!("Could not load {dataset}. Pick another dataset.")
        }
        Prompt::Ready { dataset, places } => {
            format!("Ready for {dataset}? {places} places. Press Start!")
        }
        Prompt::Ask { place } => format!("Where is: {place}?"),
        Prompt::Training { place } => format!("This is: {place}"),
    }
}

#[must_use]
pub fn progress_text(progress: &QuizProgress) -> String {
    format!("{} / {}", progress.position, progress.total)
}
