mod controller;
mod evaluation;
mod map;
mod presenter;
mod progress;
mod session;
mod timer;
mod workflow;

// Public API of the quiz subsystem.
pub use controller::QuizController;
pub use evaluation::{Answer, Evaluation, evaluate};
pub use map::{Highlight, MapCommand, MapSurface, PlaceStyle, RecordingMap};
pub use presenter::{
    FeedbackLabel, FeedbackView, Prompt, SummaryView, present_feedback, present_summary,
    progress_text, prompt_text,
};
pub use progress::QuizProgress;
pub use session::{
    Feedback, Outcome, Phase, PlaceResult, QuizEvent, QuizSession, Transition, Verdict,
};
pub use timer::{AdvanceScheduler, AdvanceTicket, ManualScheduler, TimerEffect, TokioScheduler};
pub use workflow::{DatasetSlot, LoadStatus, LoadToken, QuizLoopService};
