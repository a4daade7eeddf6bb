use dioxus::prelude::*;

use quiz_core::model::{PlaceName, QuizMode};
use services::quiz::{AdvanceTicket, FeedbackView, SummaryView};

use super::components::{FeedbackBanner, MapPanel, QuizControls, ScoreSummary};
use crate::context::AppContext;
use crate::vm::{DioxusScheduler, MapBoard, QuizVm};

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();
    let entries = ctx.catalog().entries().to_vec();

    let mut slot = use_signal({
        let quiz_loop = quiz_loop.clone();
        move || quiz_loop.initial_slot()
    });
    let mut fired = use_signal(|| None::<AdvanceTicket>);
    let on_fire = use_callback(move |ticket: AdvanceTicket| fired.set(Some(ticket)));
    let mut vm = use_signal({
        let quiz_loop = quiz_loop.clone();
        move || QuizVm::new(quiz_loop.new_session(), DioxusScheduler::new(on_fire))
    });

    // Timer tasks only report the ticket; the session decides whether it is still current.
    use_effect(move || {
        if let Some(ticket) = fired() {
            vm.write().fire(ticket);
        }
    });

    let initial_loader = quiz_loop.clone();
    use_future(move || {
        let loader = initial_loader.clone();
        async move {
            let (token, entry) = {
                let current = slot.peek();
                (current.token(), current.entry().clone())
            };
            let result = loader.load(&entry).await;
            slot.write().finish(token, result);
        }
    });

    let select_loader = quiz_loop.clone();
    let on_select = move |file: String| {
        let Some(entry) = select_loader.catalog().find(&file).cloned() else {
            tracing::warn!(%file, "selected dataset is not in the catalog");
            return;
        };
        let token = slot.write().select(entry.clone());
        let loader = select_loader.clone();
        spawn(async move {
            let result = loader.load(&entry).await;
            slot.write().finish(token, result);
        });
    };

    let screen = {
        let vm = vm.read();
        let slot = slot.read();
        QuizScreen {
            prompt: vm.prompt(&slot),
            progress: vm.progress(),
            error: vm.error().map(|err| err.message()),
            load_error: vm.load_error(&slot),
            feedback: vm.feedback(),
            feedback_detail: vm.feedback_detail(),
            summary: vm.summary(),
            board: vm.board().clone(),
            mode: vm.mode(),
            hard: vm.session().selection().hard(),
            training: vm.session().selection().training(),
            running: vm.is_running(),
            start_label: vm.start_label().to_string(),
            can_advance: vm.can_advance(),
            accepts_answers: vm.accepts_answers(),
            selected: slot.entry().file().to_string(),
        }
    };

    rsx! {
        div { class: "page quiz",
            h2 { "Geo Quiz" }

            QuizControls {
                hard: screen.hard,
                training: screen.training,
                running: screen.running,
                start_label: screen.start_label.clone(),
                can_advance: screen.can_advance,
                entries,
                selected: screen.selected.clone(),
                on_toggle_hard: move |()| vm.write().toggle_hard(),
                on_toggle_training: move |()| vm.write().toggle_training(),
                on_start: move |()| {
                    let slot = slot.read();
                    vm.write().start_or_stop(&slot);
                },
                on_next: move |()| vm.write().next(),
                on_select,
            }

            p { id: "quiz-prompt", class: "prompt", "{screen.prompt}" }
            if let Some(progress) = screen.progress.clone() {
                p { class: "progress", "{progress}" }
            }
            if let Some(message) = screen.load_error.clone() {
                p { class: "error", "{message}" }
            }
            if let Some(message) = screen.error {
                p { class: "error", "{message}" }
            }
            if let Some(feedback) = screen.feedback.clone() {
                FeedbackBanner { feedback, detail: screen.feedback_detail.clone() }
            }
            if let Some(summary) = screen.summary.clone() {
                ScoreSummary { summary }
            }

            MapPanel {
                board: screen.board.clone(),
                mode: screen.mode,
                accepts_answers: screen.accepts_answers,
                on_region: move |name: PlaceName| {
                    vm.write().click_region(name);
                },
                on_point: move |(lat, lon): (String, String)| {
                    vm.write().click_point(&lat, &lon);
                },
            }
        }
    }
}

/// Snapshot of everything the page renders, taken before building the tree.
struct QuizScreen {
    prompt: String,
    progress: Option<String>,
    error: Option<&'static str>,
    load_error: Option<String>,
    feedback: Option<FeedbackView>,
    feedback_detail: Option<String>,
    summary: Option<SummaryView>,
    board: MapBoard,
    mode: QuizMode,
    hard: bool,
    training: bool,
    running: bool,
    start_label: String,
    can_advance: bool,
    accepts_answers: bool,
    selected: String,
}
