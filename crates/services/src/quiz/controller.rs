use quiz_core::ConfigError;
use quiz_core::model::Dataset;

use super::evaluation::Answer;
use super::map::MapSurface;
use super::session::{Outcome, QuizEvent, QuizSession, Transition};
use super::timer::{AdvanceScheduler, AdvanceTicket, TimerEffect};

/// Owns a session and carries out its side effects on a map surface and a
/// timer.
#[derive(Debug)]
pub struct QuizController<M, S> {
    session: QuizSession,
    map: M,
    scheduler: S,
}

impl<M: MapSurface, S: AdvanceScheduler> QuizController<M, S> {
    #[must_use]
    pub fn new(session: QuizSession, map: M, scheduler: S) -> Self {
        Self {
            session,
            map,
            scheduler,
        }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn dispatch(&mut self, event: QuizEvent) -> Outcome {
        let transition = self.session.handle(event);
        self.apply(transition)
    }

    pub fn start(&mut self, dataset: &Dataset) -> Outcome {
        let transition = self.session.start(dataset);
        self.apply(transition)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::ConflictingModes` if both toggles are on.
    pub fn start_with_flags(
        &mut self,
        dataset: &Dataset,
        hard: bool,
        training: bool,
    ) -> Result<Outcome, ConfigError> {
        let transition = self.session.start_with_flags(dataset, hard, training)?;
        Ok(self.apply(transition))
    }

    pub fn submit(&mut self, answer: &Answer) -> Outcome {
        let transition = self.session.submit_answer(answer);
        self.apply(transition)
    }

    pub fn next(&mut self) -> Outcome {
        let transition = self.session.advance();
        self.apply(transition)
    }

    /// Deliver a fired timer.
    pub fn fire(&mut self, ticket: AdvanceTicket) -> Outcome {
        let transition = self.session.on_timer(ticket);
        self.apply(transition)
    }

    pub fn stop(&mut self) -> Outcome {
        let transition = self.session.stop();
        self.apply(transition)
    }

    pub fn abort(&mut self) -> Outcome {
        let transition = self.session.abort();
        self.apply(transition)
    }

    pub fn toggle_hard(&mut self) -> Outcome {
        let transition = self.session.toggle_hard();
        self.apply(transition)
    }

    pub fn toggle_training(&mut self) -> Outcome {
        let transition = self.session.toggle_training();
        self.apply(transition)
    }

    fn apply(&mut self, transition: Transition) -> Outcome {
        match transition.timer {
            Some(TimerEffect::Schedule { ticket, delay }) => self.scheduler.schedule(ticket, delay),
            Some(TimerEffect::Cancel) => self.scheduler.cancel(),
            None => {}
        }
        for command in transition.commands {
            self.map.apply(command);
        }
        transition.outcome
    }
}
