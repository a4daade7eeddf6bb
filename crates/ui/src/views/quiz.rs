mod components;
mod view;

pub use components::{FeedbackBanner, MapPanel, QuizControls, ScoreSummary};
pub use view::QuizView;
