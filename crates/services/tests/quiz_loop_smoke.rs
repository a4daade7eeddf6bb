use std::sync::Arc;
use std::time::Duration;

use quiz_core::geo::center_of;
use quiz_core::model::PlaceName;
use quiz_core::time::fixed_now;
use services::quiz::{Answer, Phase, RecordingMap, present_summary};
use services::{Clock, Outcome, QuizConfig, QuizLoopService, TokioScheduler};
use storage::{DatasetCatalog, DatasetEntry, DatasetLoader, InMemorySource};

const PARKS: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {"type": "Feature", "properties": {"nazwa": "Tatra"},
         "geometry": {"type": "Polygon", "coordinates": [[[19.8, 49.1], [20.2, 49.1], [20.2, 49.3], [19.8, 49.3], [19.8, 49.1]]]}},
        {"type": "Feature", "properties": {"nazwa": "Biebrza"},
         "geometry": {"type": "MultiPolygon", "coordinates": [[[[22.5, 53.4], [22.9, 53.4], [22.9, 53.7], [22.5, 53.4]]]]}},
        {"type": "Feature", "properties": {"nazwa": "Wolin"},
         "geometry": {"type": "Polygon", "coordinates": [[[14.4, 53.8], [14.6, 53.8], [14.6, 54.0], [14.4, 54.0], [14.4, 53.8]]]}},
        {"type": "Feature", "properties": {"nazwa": ""},
         "geometry": {"type": "Polygon", "coordinates": [[[15.0, 50.0], [15.1, 50.0], [15.1, 50.1], [15.0, 50.0]]]}}
    ]
}"#;

fn service() -> QuizLoopService {
    let source = InMemorySource::new().with_document("parki_narodowe.geojson", PARKS);
    let catalog = DatasetCatalog::new(vec![
        DatasetEntry::new("parki_narodowe.geojson", "Parki Narodowe").unwrap(),
    ])
    .unwrap();
    QuizLoopService::new(
        DatasetLoader::new(Arc::new(source)),
        catalog,
        QuizConfig::default(),
    )
    .with_clock(Clock::fixed(fixed_now()))
}

#[tokio::test(start_paused = true)]
async fn hard_mode_run_advances_on_real_timers() {
    let service = service();
    let mut slot = service.initial_slot();
    service.load_into(&mut slot).await;

    let (scheduler, mut fired) = TokioScheduler::channel();
    let mut quiz = service.controller(RecordingMap::new(), scheduler);
    quiz.toggle_hard();
    assert!(matches!(
        quiz.start_from(&slot).unwrap(),
        Outcome::Started { total: 3, .. }
    ));

    for _ in 0..3 {
        let center = center_of(quiz.session().current_place().unwrap().shape()).unwrap();
        assert_eq!(
            quiz.submit(&Answer::Point(center)),
            Outcome::Answered { correct: true }
        );

        let waited = tokio::time::Instant::now();
        let ticket = fired.recv().await.unwrap();
        let elapsed = waited.elapsed();
        assert!(elapsed >= Duration::from_millis(2000));
        assert!(elapsed < Duration::from_millis(2100));
        quiz.fire(ticket);
    }

    assert_eq!(quiz.session().phase(), Phase::Ended);
    let view = present_summary(quiz.session().summary().unwrap());
    assert_eq!(view.score_text, "100.0%");
    assert_eq!(
        view.summary_text,
        "Correctly identified 3 of 3 places (Parki Narodowe)."
    );
}

#[tokio::test(start_paused = true)]
async fn abort_during_feedback_never_reaches_the_next_run() {
    let service = service();
    let mut slot = service.initial_slot();
    service.load_into(&mut slot).await;

    let (scheduler, mut fired) = TokioScheduler::channel();
    let mut quiz = service.controller(RecordingMap::new(), scheduler);
    quiz.start_from(&slot).unwrap();

    let wrong = Answer::Region(PlaceName::new("Nowhere").unwrap());
    assert_eq!(quiz.submit(&wrong), Outcome::Answered { correct: false });
    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert_eq!(quiz.abort(), Outcome::Aborted);

    quiz.start_from(&slot).unwrap();
    tokio::time::sleep(Duration::from_millis(5000)).await;
    assert!(fired.try_recv().is_err());
    assert_eq!(quiz.session().cursor(), 0);
    assert_eq!(quiz.session().phase(), Phase::AwaitingAnswer);
}
