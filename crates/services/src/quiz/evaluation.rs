use quiz_core::geo::{center_of, distance_km};
use quiz_core::model::{Place, PlaceName, QuizMode};
use quiz_core::{GeoPoint, GeometryError};

/// Input delivered by the map collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// The region the player clicked (easy mode).
    Region(PlaceName),
    /// The map coordinate the player clicked (hard mode).
    Point(GeoPoint),
}

/// Result of judging one answer against the current place.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub correct: bool,
    pub clicked: Option<PlaceName>,
    pub distance_km: Option<f64>,
}

/// Judge `answer` for `target` under `mode`.
///
/// Returns `Ok(None)` when the answer kind does not apply to the mode
/// (regions in hard mode, points in easy mode, anything in training).
///
/// # Errors
///
/// Returns `GeometryError::NoCenter` when a hard-mode target has no usable center.
pub fn evaluate(
    mode: QuizMode,
    answer: &Answer,
    target: &Place,
    tolerance_km: f64,
) -> Result<Option<Evaluation>, GeometryError> {
    match (mode, answer) {
        (QuizMode::Easy, Answer::Region(clicked)) => Ok(Some(Evaluation {
            correct: clicked == target.name(),
            clicked: Some(clicked.clone()),
            distance_km: None,
        })),
        (QuizMode::Hard, Answer::Point(point)) => {
            let center = center_of(target.shape())?;
            let distance = distance_km(*point, center);
            Ok(Some(Evaluation {
                correct: distance <= tolerance_km,
                clicked: None,
                distance_km: Some(distance),
            }))
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::Shape;

    fn square(name: &str, lat: f64, lon: f64) -> Place {
        let d = 0.1;
        let ring = vec![
            GeoPoint::new(lat - d, lon - d),
            GeoPoint::new(lat - d, lon + d),
            GeoPoint::new(lat + d, lon + d),
            GeoPoint::new(lat + d, lon - d),
            GeoPoint::new(lat - d, lon - d),
        ];
        Place::new(
            PlaceName::new(name).unwrap(),
            Shape::polygon(vec![ring]),
        )
        .unwrap()
    }

    #[test]
    fn easy_mode_matches_by_name() {
        let tatra = square("Tatra", 49.2, 20.0);
        let hit = Answer::Region(PlaceName::new("Tatra").unwrap());
        let miss = Answer::Region(PlaceName::new("Biebrza").unwrap());

        let eval = evaluate(QuizMode::Easy, &hit, &tatra, 10.0).unwrap().unwrap();
        assert!(eval.correct);
        assert_eq!(eval.distance_km, None);

        let eval = evaluate(QuizMode::Easy, &miss, &tatra, 10.0).unwrap().unwrap();
        assert!(!eval.correct);
        assert_eq!(eval.clicked.as_ref().map(PlaceName::as_str), Some("Biebrza"));
    }

    #[test]
    fn hard_mode_click_at_center_is_correct() {
        let tatra = square("Tatra", 49.2, 20.0);
        let eval = evaluate(QuizMode::Hard, &Answer::Point(GeoPoint::new(49.2, 20.0)), &tatra, 10.0)
            .unwrap()
            .unwrap();
        assert!(eval.correct);
        assert!(eval.distance_km.unwrap() < 1e-6);
    }

    #[test]
    fn hard_mode_respects_tolerance() {
        let tatra = square("Tatra", 49.2, 20.0);
        // About 22 km north of the center.
        let click = Answer::Point(GeoPoint::new(49.4, 20.0));

        let eval = evaluate(QuizMode::Hard, &click, &tatra, 10.0).unwrap().unwrap();
        assert!(!eval.correct);
        let eval = evaluate(QuizMode::Hard, &click, &tatra, 30.0).unwrap().unwrap();
        assert!(eval.correct);
    }

    #[test]
    fn distance_equal_to_tolerance_counts_as_correct() {
        let tatra = square("Tatra", 49.2, 20.0);
        let click = GeoPoint::new(49.3, 20.05);
        let distance = distance_km(click, center_of(tatra.shape()).unwrap());

        let at_limit = evaluate(QuizMode::Hard, &Answer::Point(click), &tatra, distance)
            .unwrap()
            .unwrap();
        assert!(at_limit.correct);
        assert_eq!(at_limit.distance_km, Some(distance));

        let just_short = evaluate(QuizMode::Hard, &Answer::Point(click), &tatra, distance - 1e-9)
            .unwrap()
            .unwrap();
        assert!(!just_short.correct);
    }

    #[test]
    fn mismatched_answer_kinds_are_not_evaluated() {
        let tatra = square("Tatra", 49.2, 20.0);
        let region = Answer::Region(PlaceName::new("Tatra").unwrap());
        let point = Answer::Point(GeoPoint::new(49.2, 20.0));

        assert_eq!(evaluate(QuizMode::Hard, &region, &tatra, 10.0), Ok(None));
        assert_eq!(evaluate(QuizMode::Easy, &point, &tatra, 10.0), Ok(None));
        assert_eq!(evaluate(QuizMode::Training, &point, &tatra, 10.0), Ok(None));
        assert_eq!(evaluate(QuizMode::Training, &region, &tatra, 10.0), Ok(None));
    }

    #[test]
    fn hard_mode_without_center_fails() {
        let broken = Place::new(
            PlaceName::new("Broken").unwrap(),
            Shape::polygon(vec![vec![GeoPoint::new(f64::NAN, f64::NAN)]]),
        )
        .unwrap();
        let click = Answer::Point(GeoPoint::new(50.0, 20.0));
        assert_eq!(
            evaluate(QuizMode::Hard, &click, &broken, 10.0),
            Err(GeometryError::NoCenter)
        );
    }
}
