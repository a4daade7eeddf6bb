use quiz_core::GeoPoint;
use quiz_core::model::{PlaceName, QuizMode};
use services::quiz::{
    Answer, AdvanceScheduler, AdvanceTicket, DatasetSlot, FeedbackView, LoadStatus, Outcome,
    Phase, Prompt, QuizController, QuizSession, SummaryView, present_feedback, present_summary,
    progress_text, prompt_text,
};

use super::map_board::MapBoard;
use services::QuizError;

use crate::views::ViewError;

/// Drives one quiz for the quiz page.
pub struct QuizVm<S: AdvanceScheduler> {
    controller: QuizController<MapBoard, S>,
    error: Option<ViewError>,
}

impl<S: AdvanceScheduler> QuizVm<S> {
    #[must_use]
    pub fn new(session: QuizSession, scheduler: S) -> Self {
        let board = MapBoard::new(session.config().default_view());
        Self {
            controller: QuizController::new(session, board, scheduler),
            error: None,
        }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        self.controller.session()
    }

    #[must_use]
    pub fn board(&self) -> &MapBoard {
        self.controller.map()
    }

    #[must_use]
    pub fn error(&self) -> Option<ViewError> {
        self.error
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.session().phase().is_running()
    }

    #[must_use]
    pub fn mode(&self) -> QuizMode {
        if self.is_running() {
            self.session().mode()
        } else {
            self.session().selection().mode()
        }
    }

    #[must_use]
    pub fn start_label(&self) -> &'static str {
        if self.is_running() { "Stop" } else { "Start" }
    }

    /// Manual "next" is offered only while browsing in training mode.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.session().mode() == QuizMode::Training
            && self.session().phase() == Phase::AwaitingAnswer
    }

    #[must_use]
    pub fn accepts_answers(&self) -> bool {
        self.session().phase() == Phase::AwaitingAnswer && !self.session().is_locked()
    }

    /// The start/stop control.
    pub fn start_or_stop(&mut self, slot: &DatasetSlot) {
        self.error = None;
        if self.is_running() {
            self.controller.stop();
            return;
        }
        if let Err(err) = self.controller.start_from(slot) {
            self.error = Some(ViewError::from_quiz(&err));
        }
    }

    pub fn toggle_hard(&mut self) {
        self.controller.toggle_hard();
    }

    pub fn toggle_training(&mut self) {
        self.controller.toggle_training();
    }

    pub fn next(&mut self) {
        self.controller.next();
    }

    pub fn click_region(&mut self, name: PlaceName) -> Outcome {
        self.error = None;
        self.controller.submit(&Answer::Region(name))
    }

    /// Hard-mode answer typed as latitude and longitude in degrees.
    pub fn click_point(&mut self, lat: &str, lon: &str) -> Outcome {
        match parse_point(lat, lon) {
            Some(point) => {
                self.error = None;
                self.controller.submit(&Answer::Point(point))
            }
            None => {
                self.error = Some(ViewError::InvalidCoordinates);
                Outcome::Ignored
            }
        }
    }

    pub fn fire(&mut self, ticket: AdvanceTicket) -> Outcome {
        self.controller.fire(ticket)
    }

    #[must_use]
    pub fn prompt(&self, slot: &DatasetSlot) -> String {
        if let Some(place) = self.session().current_place() {
            let prompt = if self.session().mode() == QuizMode::Training {
                Prompt::Training { place: place.name() }
            } else {
                Prompt::Ask { place: place.name() }
            };
            return prompt_text(prompt);
        }
        let dataset = slot.entry().display_name();
        match slot.status() {
            LoadStatus::Loading => prompt_text(Prompt::Loading { dataset }),
            LoadStatus::Failed(_) => prompt_text(Prompt::LoadFailed { dataset }),
            LoadStatus::Ready(loaded) => prompt_text(Prompt::Ready {
                dataset,
                places: loaded.len(),
            }),
        }
    }

    /// Why the selected dataset could not be played, if it failed to load.
    #[must_use]
    pub fn load_error(&self, slot: &DatasetSlot) -> Option<String> {
        slot.failure().map(QuizError::user_message)
    }

    #[must_use]
    pub fn feedback(&self) -> Option<FeedbackView> {
        let session = self.session();
        present_feedback(session.phase(), session.feedback().map(|f| f.correct))
    }

    /// Extra line under the feedback banner: the hard-mode distance or the
    /// name of the region that was missed.
    #[must_use]
    pub fn feedback_detail(&self) -> Option<String> {
        let feedback = self.session().feedback()?;
        if let Some(distance) = feedback.distance_km {
            return Some(format!("{distance:.1} km from the center of {}.", feedback.target));
        }
        if feedback.correct {
            return None;
        }
        Some(format!("That was {}.", feedback.target))
    }

    #[must_use]
    pub fn summary(&self) -> Option<SummaryView> {
        if self.session().phase() != Phase::Ended {
            return None;
        }
        self.session().summary().map(present_summary)
    }

    #[must_use]
    pub fn progress(&self) -> Option<String> {
        self.is_running()
            .then(|| progress_text(&self.session().progress()))
    }
}

fn parse_point(lat: &str, lon: &str) -> Option<GeoPoint> {
    let lat: f64 = lat.trim().parse().ok()?;
    let lon: f64 = lon.trim().parse().ok()?;
    let valid = (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon);
    valid.then(|| GeoPoint::new(lat, lon))
}
