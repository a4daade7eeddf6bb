mod dataset;
mod mode;
mod place;
mod summary;

pub use dataset::Dataset;
pub use mode::{ModeSelection, QuizMode};
pub use place::{Place, PlaceError, PlaceName, Properties};
pub use summary::{QuizSummary, SummaryError};
