use dioxus::prelude::*;
use quiz_core::time::fixed_now;
use quiz_core::model::QuizSummary;
use services::quiz::{Phase, present_feedback, present_summary};

use super::test_harness::{ViewKind, setup_view_harness};
use crate::views::{FeedbackBanner, ScoreSummary};

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_shows_loading_then_ready_prompt() {
    let mut harness = setup_view_harness(ViewKind::Quiz);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Loading Parki Narodowe..."), "missing loading prompt in {html}");
    assert!(html.contains("Start"), "missing start button in {html}");
    assert!(html.contains("Hard mode"), "missing hard toggle in {html}");
    assert!(html.contains("Broken"), "missing dataset option in {html}");

    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("Ready for Parki Narodowe? 3 places. Press Start!"),
        "missing ready prompt in {html}"
    );
    assert!(html.contains("Centered on 52.07, 19.48 (zoom 6)"), "missing map view in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn datasets_view_smoke_lists_counts_and_errors() {
    let mut harness = setup_view_harness(ViewKind::Datasets);
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("3 places"), "missing place count in {html}");
    assert!(html.contains("Error loading places"), "missing load error in {html}");
}

#[test]
fn score_summary_renders_percentage() {
    let summary = QuizSummary::new("Parki Narodowe", 2, 3, 0, fixed_now(), fixed_now()).unwrap();
    let summary = present_summary(&summary);
    let html = dioxus_ssr::render_element(rsx! { ScoreSummary { summary } });
    assert!(html.contains("66.7%"), "missing score in {html}");
    assert!(
        html.contains("Correctly identified 2 of 3 places (Parki Narodowe)."),
        "missing summary text in {html}"
    );
}

#[test]
fn feedback_banner_uses_style_class() {
    let feedback = present_feedback(Phase::ShowingFeedback, Some(false)).unwrap();
    let html = dioxus_ssr::render_element(rsx! {
        FeedbackBanner { feedback, detail: Some("That was Tatra.".to_string()) }
    });
    assert!(html.contains("feedback-incorrect"), "missing style in {html}");
    assert!(html.contains("Missed!"), "missing message in {html}");
    assert!(html.contains("That was Tatra."), "missing detail in {html}");
}
