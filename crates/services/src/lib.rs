#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod quiz;

pub use quiz_core::Clock;

pub use config::{MapView, QuizConfig};
pub use error::QuizError;
pub use quiz::{
    Answer, AdvanceScheduler, AdvanceTicket, DatasetSlot, MapCommand, MapSurface, Outcome, Phase,
    QuizController, QuizEvent, QuizLoopService, QuizSession, TokioScheduler,
};
