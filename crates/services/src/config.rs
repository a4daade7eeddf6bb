//! Tunables for a quiz session.

use std::time::Duration;

use quiz_core::GeoPoint;

/// Maximum distance in kilometers between a hard-mode click and the place center.
pub const HARD_MODE_TOLERANCE_KM: f64 = 10.0;
pub const CORRECT_FEEDBACK_DELAY: Duration = Duration::from_millis(2000);
pub const INCORRECT_FEEDBACK_DELAY: Duration = Duration::from_millis(3500);
/// Screen padding in pixels kept around a fitted place.
pub const DEFAULT_FIT_PADDING_PX: u16 = 10;
pub const PLACE_FOCUS_ZOOM: u8 = 10;

/// Center and zoom of a map view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: u8,
}

impl Default for MapView {
    /// Whole of Poland.
    fn default() -> Self {
        Self {
            center: GeoPoint::new(52.0693, 19.4803),
            zoom: 6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizConfig {
    tolerance_km: f64,
    correct_delay: Duration,
    incorrect_delay: Duration,
    default_view: MapView,
    fit_padding_px: u16,
    focus_zoom: u8,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            tolerance_km: HARD_MODE_TOLERANCE_KM,
            correct_delay: CORRECT_FEEDBACK_DELAY,
            incorrect_delay: INCORRECT_FEEDBACK_DELAY,
            default_view: MapView::default(),
            fit_padding_px: DEFAULT_FIT_PADDING_PX,
            focus_zoom: PLACE_FOCUS_ZOOM,
        }
    }
}

impl QuizConfig {
    /// Non-finite or negative values keep the current tolerance.
    #[must_use]
    pub fn with_tolerance_km(mut self, tolerance_km: f64) -> Self {
        if tolerance_km.is_finite() && tolerance_km >= 0.0 {
            self.tolerance_km = tolerance_km;
        }
        self
    }

    #[must_use]
    pub fn tolerance_km(&self) -> f64 {
        self.tolerance_km
    }

    /// How long feedback stays on screen before the next place.
    #[must_use]
    pub fn feedback_delay(&self, correct: bool) -> Duration {
        if correct {
            self.correct_delay
        } else {
            self.incorrect_delay
        }
    }

    #[must_use]
    pub fn default_view(&self) -> MapView {
        self.default_view
    }

    #[must_use]
    pub fn fit_padding_px(&self) -> u16 {
        self.fit_padding_px
    }

    #[must_use]
    pub fn focus_zoom(&self) -> u8 {
        self.focus_zoom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_game_constants() {
        let config = QuizConfig::default();
        assert!((config.tolerance_km() - 10.0).abs() < f64::EPSILON);
        assert_eq!(config.feedback_delay(true), Duration::from_millis(2000));
        assert_eq!(config.feedback_delay(false), Duration::from_millis(3500));
        assert_eq!(config.default_view().zoom, 6);
        assert_eq!(config.focus_zoom(), 10);
    }

    #[test]
    fn invalid_tolerance_is_ignored() {
        let config = QuizConfig::default()
            .with_tolerance_km(-1.0)
            .with_tolerance_km(f64::NAN);
        assert!((config.tolerance_km() - 10.0).abs() < f64::EPSILON);

        let config = config.with_tolerance_km(25.5);
        assert!((config.tolerance_km() - 25.5).abs() < f64::EPSILON);
    }
}
