use dioxus::prelude::*;

use quiz_core::model::{PlaceName, QuizMode};
use services::quiz::{FeedbackView, Highlight, PlaceStyle, SummaryView};
use storage::DatasetEntry;

use crate::vm::MapBoard;

#[component]
pub fn QuizControls(
    hard: bool,
    training: bool,
    running: bool,
    start_label: String,
    can_advance: bool,
    entries: Vec<DatasetEntry>,
    selected: String,
    on_toggle_hard: EventHandler<()>,
    on_toggle_training: EventHandler<()>,
    on_start: EventHandler<()>,
    on_next: EventHandler<()>,
    on_select: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: "quiz-controls",
            select {
                id: "dataset-select",
                disabled: running,
                onchange: move |evt| on_select.call(evt.value()),
                for entry in entries.iter() {
                    option {
                        key: "{entry.file()}",
                        value: "{entry.file()}",
                        selected: entry.file() == selected,
                        "{entry.display_name()}"
                    }
                }
            }
            label {
                input {
                    id: "toggle-hard",
                    r#type: "checkbox",
                    checked: hard,
                    disabled: running,
                    onchange: move |_| on_toggle_hard.call(()),
                }
                "Hard mode"
            }
            label {
                input {
                    id: "toggle-training",
                    r#type: "checkbox",
                    checked: training,
                    disabled: running,
                    onchange: move |_| on_toggle_training.call(()),
                }
                "Training"
            }
            button {
                id: "quiz-start",
                class: "btn btn-primary",
                onclick: move |_| on_start.call(()),
                "{start_label}"
            }
            if can_advance {
                button {
                    id: "quiz-next",
                    class: "btn",
                    onclick: move |_| on_next.call(()),
                    "Next"
                }
            }
        }
    }
}

#[component]
pub fn FeedbackBanner(feedback: FeedbackView, detail: Option<String>) -> Element {
    rsx! {
        div { class: "feedback-box",
            span { class: "feedback {feedback.style_class}", "{feedback.message}" }
            if let Some(detail) = detail {
                p { class: "feedback-detail", "{detail}" }
            }
        }
    }
}

#[component]
pub fn ScoreSummary(summary: SummaryView) -> Element {
    rsx! {
        section { class: "score-summary",
            h3 { "Results" }
            p { class: "score", "{summary.score_text}" }
            p { "{summary.summary_text}" }
        }
    }
}

#[component]
pub fn MapPanel(
    board: MapBoard,
    mode: QuizMode,
    accepts_answers: bool,
    on_region: EventHandler<PlaceName>,
    on_point: EventHandler<(String, String)>,
) -> Element {
    let mut lat = use_signal(String::new);
    let mut lon = use_signal(String::new);

    let regions: Vec<(PlaceName, String, &'static str)> = board
        .regions()
        .iter()
        .map(|region| (region.name.clone(), region.label(), region_class(region.highlight)))
        .collect();
    let focus = board
        .focus()
        .map(|focus| (focus.name.to_string(), focus_class(focus.style)));

    rsx! {
        section { class: "map-panel",
            p { class: "map-view", "{board.view_label()}" }

            if let Some((name, class)) = focus {
                div { class: "{class}", "{name}" }
            }

            if mode == QuizMode::Easy && !regions.is_empty() {
                div { class: "regions",
                    for (name, label, class) in regions {
                        button {
                            key: "{name}",
                            class: "region {class}",
                            disabled: !accepts_answers,
                            onclick: {
                                let name = name.clone();
                                move |_| on_region.call(name.clone())
                            },
                            "{label}"
                        }
                    }
                }
            }

            if mode == QuizMode::Hard && accepts_answers {
                form {
                    class: "point-form",
                    onsubmit: move |evt: FormEvent| {
                        evt.prevent_default();
                        on_point.call((lat(), lon()));
                    },
                    input {
                        id: "point-lat",
                        r#type: "text",
                        placeholder: "Latitude",
                        value: "{lat}",
                        oninput: move |evt| lat.set(evt.value()),
                    }
                    input {
                        id: "point-lon",
                        r#type: "text",
                        placeholder: "Longitude",
                        value: "{lon}",
                        oninput: move |evt| lon.set(evt.value()),
                    }
                    button { r#type: "submit", class: "btn", "Click here" }
                }
            }
        }
    }
}

fn region_class(highlight: Option<Highlight>) -> &'static str {
    match highlight {
        None => "",
        Some(Highlight::Correct) => "region-correct",
        Some(Highlight::Wrong) => "region-wrong",
        Some(Highlight::Reveal) => "region-reveal",
    }
}

fn focus_class(style: PlaceStyle) -> &'static str {
    match style {
        PlaceStyle::Training => "place-training",
        PlaceStyle::Correct => "place-correct",
        PlaceStyle::Incorrect => "place-incorrect",
    }
}
