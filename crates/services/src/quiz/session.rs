use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use quiz_core::model::{Dataset, ModeSelection, Place, PlaceName, QuizMode, QuizSummary};
use quiz_core::{Clock, ConfigError, GeometryError};

use super::evaluation::{Answer, Evaluation, evaluate};
use super::map::{Highlight, MapCommand, PlaceStyle, fit_bounds, focus_on};
use super::progress::QuizProgress;
use super::timer::{AdvanceTicket, TimerEffect};
use crate::config::QuizConfig;

//
// ─── PHASE & RESULTS ───────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    AwaitingAnswer,
    ShowingFeedback,
    Ended,
}

impl Phase {
    #[must_use]
    pub fn is_running(self) -> bool {
        matches!(self, Phase::AwaitingAnswer | Phase::ShowingFeedback)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
    /// The place could not be evaluated and was left out of the score.
    Skipped,
}

/// One entry of the per-place result log.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceResult {
    pub name: PlaceName,
    pub verdict: Verdict,
    pub distance_km: Option<f64>,
}

/// Feedback shown between an evaluated answer and the next place.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub target: PlaceName,
    pub correct: bool,
    pub clicked: Option<PlaceName>,
    pub distance_km: Option<f64>,
    pub delay: Duration,
}

//
// ─── TRANSITIONS ───────────────────────────────────────────────────────────────
//

/// What an event did to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The event did not apply in the current state.
    Ignored,
    ModeChanged(ModeSelection),
    Started { mode: QuizMode, total: usize },
    Answered { correct: bool },
    /// The place had no usable center; the session moved on without feedback.
    Skipped { name: PlaceName },
    NextPlace,
    Ended,
    TrainingFinished,
    Aborted,
}

/// Result of one transition: the outcome plus the side effects the
/// collaborators have to carry out.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub outcome: Outcome,
    pub commands: Vec<MapCommand>,
    pub timer: Option<TimerEffect>,
}

impl Transition {
    fn new(outcome: Outcome, commands: Vec<MapCommand>) -> Self {
        Self {
            outcome,
            commands,
            timer: None,
        }
    }

    fn ignored() -> Self {
        Self::new(Outcome::Ignored, Vec::new())
    }

    fn with_timer(mut self, timer: Option<TimerEffect>) -> Self {
        self.timer = timer;
        self
    }

    #[must_use]
    pub fn is_ignored(&self) -> bool {
        self.outcome == Outcome::Ignored
    }
}

/// External events a quiz reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum QuizEvent {
    Start(Dataset),
    SubmitAnswer(Answer),
    /// Manual "next" in training mode.
    Advance,
    Timer(AdvanceTicket),
    /// Finish a scored run with a summary, or leave training.
    Stop,
    Abort,
    ToggleHard,
    ToggleTraining,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz over a shuffled copy of a dataset.
///
/// Every method returns a [`Transition`]; the session itself never touches
/// the map or a timer. Events that do not apply in the current phase come back
/// as [`Outcome::Ignored`] and leave the session untouched.
pub struct QuizSession {
    config: QuizConfig,
    clock: Clock,
    rng: StdRng,
    selection: ModeSelection,
    mode: QuizMode,
    dataset_name: String,
    places: Vec<Place>,
    cursor: usize,
    score: u32,
    phase: Phase,
    locked: bool,
    epoch: u64,
    seq: u64,
    pending: Option<AdvanceTicket>,
    feedback: Option<Feedback>,
    results: Vec<PlaceResult>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    summary: Option<QuizSummary>,
}

impl QuizSession {
    #[must_use]
    pub fn new(config: QuizConfig) -> Self {
        Self {
            config,
            clock: Clock::default(),
            rng: StdRng::from_rng(&mut rand::rng()),
            selection: ModeSelection::default(),
            mode: QuizMode::default(),
            dataset_name: String::new(),
            places: Vec::new(),
            cursor: 0,
            score: 0,
            phase: Phase::Idle,
            locked: false,
            epoch: 0,
            seq: 0,
            pending: None,
            feedback: None,
            results: Vec::new(),
            started_at: None,
            completed_at: None,
            summary: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Make the shuffle order reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn with_selection(mut self, selection: ModeSelection) -> Self {
        self.selection = selection;
        self
    }

    #[must_use]
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Mode of the current or last run.
    #[must_use]
    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    /// Toggles that apply to the next start.
    #[must_use]
    pub fn selection(&self) -> ModeSelection {
        self.selection
    }

    #[must_use]
    pub fn dataset_name(&self) -> &str {
        &self.dataset_name
    }

    /// Places in the order they are asked.
    #[must_use]
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[must_use]
    pub fn current_place(&self) -> Option<&Place> {
        if self.phase.is_running() {
            self.places.get(self.cursor)
        } else {
            None
        }
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    #[must_use]
    pub fn results(&self) -> &[PlaceResult] {
        &self.results
    }

    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.results
            .iter()
            .filter(|result| result.verdict == Verdict::Skipped)
            .count()
    }

    #[must_use]
    pub fn pending_ticket(&self) -> Option<AdvanceTicket> {
        self.pending
    }

    /// Summary of the last scored run; kept until the next start.
    #[must_use]
    pub fn summary(&self) -> Option<&QuizSummary> {
        self.summary.as_ref()
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            position: (self.cursor + 1).min(self.places.len()),
            total: self.places.len(),
            score: self.score,
            skipped: self.skipped_count(),
        }
    }

    /// Route an external event to the matching transition.
    pub fn handle(&mut self, event: QuizEvent) -> Transition {
        match event {
            QuizEvent::Start(dataset) => self.start(&dataset),
            QuizEvent::SubmitAnswer(answer) => self.submit_answer(&answer),
            QuizEvent::Advance => self.advance(),
            QuizEvent::Timer(ticket) => self.on_timer(ticket),
            QuizEvent::Stop => self.stop(),
            QuizEvent::Abort => self.abort(),
            QuizEvent::ToggleHard => self.toggle_hard(),
            QuizEvent::ToggleTraining => self.toggle_training(),
        }
    }

    /// Flip the hard toggle; switching it on switches training off.
    /// Ignored while a run is in progress.
    pub fn toggle_hard(&mut self) -> Transition {
        if self.phase.is_running() {
            return Transition::ignored();
        }
        self.selection.toggle_hard();
        Transition::new(Outcome::ModeChanged(self.selection), Vec::new())
    }

    /// Flip the training toggle; switching it on switches hard off.
    /// Ignored while a run is in progress.
    pub fn toggle_training(&mut self) -> Transition {
        if self.phase.is_running() {
            return Transition::ignored();
        }
        self.selection.toggle_training();
        Transition::new(Outcome::ModeChanged(self.selection), Vec::new())
    }

    /// Start with explicit toggle states.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConflictingModes` if both toggles are on; the
    /// current selection and session are left as they were.
    pub fn start_with_flags(
        &mut self,
        dataset: &Dataset,
        hard: bool,
        training: bool,
    ) -> Result<Transition, ConfigError> {
        self.selection = ModeSelection::from_flags(hard, training)?;
        Ok(self.start(dataset))
    }

    /// Begin a new run over a fresh shuffle of `dataset`.
    ///
    /// Allowed in every phase; a running quiz is restarted and its pending
    /// advance is invalidated.
    pub fn start(&mut self, dataset: &Dataset) -> Transition {
        let timer = self.clear_pending();
        self.epoch += 1;
        self.seq = 0;
        self.mode = self.selection.mode();
        self.dataset_name = dataset.name().to_string();
        self.places = dataset.shuffled_with(&mut self.rng);
        self.cursor = 0;
        self.score = 0;
        self.results.clear();
        self.summary = None;
        self.started_at = Some(self.clock.now());
        self.completed_at = None;

        info!(
            mode = self.mode.label(),
            dataset = %self.dataset_name,
            places = self.places.len(),
            "quiz started"
        );

        let commands = self.present_current();
        Transition::new(
            Outcome::Started {
                mode: self.mode,
                total: self.places.len(),
            },
            commands,
        )
        .with_timer(timer)
    }

    /// Evaluate an answer for the current place.
    ///
    /// A no-op while feedback is shown, outside a run, or when the answer
    /// kind does not fit the mode.
    pub fn submit_answer(&mut self, answer: &Answer) -> Transition {
        if self.phase != Phase::AwaitingAnswer || self.locked {
            return Transition::ignored();
        }
        let Some(target) = self.places.get(self.cursor) else {
            return Transition::ignored();
        };
        match evaluate(self.mode, answer, target, self.config.tolerance_km()) {
            Ok(Some(evaluation)) => self.show_feedback(evaluation),
            Ok(None) => Transition::ignored(),
            Err(err) => self.skip_current(err),
        }
    }

    /// Manual "next" in training mode.
    pub fn advance(&mut self) -> Transition {
        if self.mode != QuizMode::Training || self.phase != Phase::AwaitingAnswer {
            return Transition::ignored();
        }
        self.advance_cursor()
    }

    /// Timer callback; only the pending ticket moves the session on.
    pub fn on_timer(&mut self, ticket: AdvanceTicket) -> Transition {
        if self.pending != Some(ticket) {
            debug!(
                epoch = ticket.epoch(),
                seq = ticket.seq(),
                "dropping stale advance ticket"
            );
            return Transition::ignored();
        }
        self.pending = None;
        self.advance_cursor()
    }

    /// The stop control: ends a scored run with a summary, leaves training.
    pub fn stop(&mut self) -> Transition {
        if self.mode.is_scored() {
            self.finish()
        } else {
            self.abort()
        }
    }

    /// End a scored run early; unanswered places count as misses.
    pub fn finish(&mut self) -> Transition {
        if !self.phase.is_running() || !self.mode.is_scored() {
            return Transition::ignored();
        }
        self.end_run()
    }

    /// Drop the current run without a summary.
    pub fn abort(&mut self) -> Transition {
        if !self.phase.is_running() {
            return Transition::ignored();
        }
        self.reset(Outcome::Aborted)
    }

    fn show_feedback(&mut self, evaluation: Evaluation) -> Transition {
        let Some(target) = self.places.get(self.cursor) else {
            return Transition::ignored();
        };
        let target_name = target.name().clone();
        let correct = evaluation.correct;

        let mut commands = Vec::new();
        match self.mode {
            QuizMode::Easy => {
                if let Some(clicked) = &evaluation.clicked {
                    if correct {
                        commands.push(MapCommand::Highlight {
                            name: clicked.clone(),
                            highlight: Highlight::Correct,
                        });
                    } else {
                        commands.push(MapCommand::Highlight {
                            name: clicked.clone(),
                            highlight: Highlight::Wrong,
                        });
                        commands.push(MapCommand::Highlight {
                            name: target_name.clone(),
                            highlight: Highlight::Reveal,
                        });
                        commands.extend(fit_bounds(target, &self.config));
                    }
                }
            }
            QuizMode::Hard => {
                let style = if correct {
                    PlaceStyle::Correct
                } else {
                    PlaceStyle::Incorrect
                };
                commands.push(MapCommand::RenderPlace {
                    place: target.clone(),
                    style,
                });
                commands.push(fit_bounds(target, &self.config).unwrap_or(MapCommand::ResetView));
            }
            QuizMode::Training => {}
        }

        self.phase = Phase::ShowingFeedback;
        self.locked = true;
        if correct && self.mode.is_scored() {
            self.score += 1;
        }
        self.results.push(PlaceResult {
            name: target_name.clone(),
            verdict: if correct {
                Verdict::Correct
            } else {
                Verdict::Incorrect
            },
            distance_km: evaluation.distance_km,
        });

        let delay = self.config.feedback_delay(correct);
        self.seq += 1;
        let ticket = AdvanceTicket::new(self.epoch, self.seq);
        self.pending = Some(ticket);

        debug!(
            place = %target_name,
            correct,
            distance_km = evaluation.distance_km,
            score = self.score,
            "answer evaluated"
        );

        self.feedback = Some(Feedback {
            target: target_name,
            correct,
            clicked: evaluation.clicked,
            distance_km: evaluation.distance_km,
            delay,
        });

        Transition::new(Outcome::Answered { correct }, commands)
            .with_timer(Some(TimerEffect::Schedule { ticket, delay }))
    }

    fn skip_current(&mut self, err: GeometryError) -> Transition {
        let Some(place) = self.places.get(self.cursor) else {
            return Transition::ignored();
        };
        let name = place.name().clone();
        warn!(place = %name, error = %err, "skipping place without a usable center");
        self.results.push(PlaceResult {
            name: name.clone(),
            verdict: Verdict::Skipped,
            distance_km: None,
        });
        let next = self.advance_cursor();
        Transition {
            outcome: Outcome::Skipped { name },
            ..next
        }
    }

    fn advance_cursor(&mut self) -> Transition {
        self.cursor = (self.cursor + 1).min(self.places.len());
        if self.cursor < self.places.len() {
            let commands = self.present_current();
            return Transition::new(Outcome::NextPlace, commands);
        }
        if self.mode.is_scored() {
            self.end_run()
        } else {
            self.reset(Outcome::TrainingFinished)
        }
    }

    fn present_current(&mut self) -> Vec<MapCommand> {
        self.phase = Phase::AwaitingAnswer;
        self.locked = false;
        self.feedback = None;

        let Some(place) = self.places.get(self.cursor) else {
            return Vec::new();
        };
        debug!(place = %place.name(), position = self.cursor + 1, "presenting place");

        let mut commands = vec![MapCommand::ClearLayers];
        match self.mode {
            QuizMode::Training => {
                commands.push(MapCommand::RenderPlace {
                    place: place.clone(),
                    style: PlaceStyle::Training,
                });
                commands.push(focus_on(place, &self.config));
            }
            QuizMode::Hard => commands.push(MapCommand::ResetView),
            QuizMode::Easy => {
                commands.push(MapCommand::ResetView);
                commands.push(MapCommand::RenderAll {
                    places: self.places.clone(),
                });
            }
        }
        commands
    }

    fn end_run(&mut self) -> Transition {
        let timer = self.clear_pending();
        self.epoch += 1;
        self.phase = Phase::Ended;
        self.locked = false;
        self.feedback = None;
        let completed_at = self.clock.now();
        self.completed_at = Some(completed_at);
        self.summary = self.build_summary(completed_at);

        info!(
            dataset = %self.dataset_name,
            score = self.score,
            places = self.places.len(),
            skipped = self.skipped_count(),
            "quiz ended"
        );

        Transition::new(
            Outcome::Ended,
            vec![MapCommand::ClearLayers, MapCommand::ResetView],
        )
        .with_timer(timer)
    }

    fn reset(&mut self, outcome: Outcome) -> Transition {
        let timer = self.clear_pending();
        self.epoch += 1;
        self.phase = Phase::Idle;
        self.locked = false;
        self.places.clear();
        self.cursor = 0;
        self.score = 0;
        self.results.clear();
        self.feedback = None;
        self.summary = None;
        self.started_at = None;
        self.completed_at = None;

        info!(mode = self.mode.label(), "quiz reset to idle");

        Transition::new(outcome, vec![MapCommand::ClearLayers, MapCommand::ResetView])
            .with_timer(timer)
    }

    fn clear_pending(&mut self) -> Option<TimerEffect> {
        self.pending.take().map(|_| TimerEffect::Cancel)
    }

    fn build_summary(&self, completed_at: DateTime<Utc>) -> Option<QuizSummary> {
        let skipped = self.skipped_count();
        let total = self.places.len().saturating_sub(skipped);
        let started_at = self.started_at.unwrap_or(completed_at);
        match QuizSummary::new(
            self.dataset_name.as_str(),
            self.score,
            to_u32(total),
            to_u32(skipped),
            started_at,
            completed_at,
        ) {
            Ok(summary) => Some(summary),
            Err(err) => {
                warn!(error = %err, "could not build quiz summary");
                None
            }
        }
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("mode", &self.mode)
            .field("selection", &self.selection)
            .field("dataset_name", &self.dataset_name)
            .field("places", &self.places.len())
            .field("cursor", &self.cursor)
            .field("score", &self.score)
            .field("phase", &self.phase)
            .field("locked", &self.locked)
            .field("epoch", &self.epoch)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}
