mod datasets;
mod quiz;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use datasets::DatasetsView;
pub use quiz::{FeedbackBanner, MapPanel, QuizControls, QuizView, ScoreSummary};
pub use state::{ViewError, ViewState, view_state_from_resource};
