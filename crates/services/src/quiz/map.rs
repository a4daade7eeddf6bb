use quiz_core::geo::center_of;
use quiz_core::model::{Place, PlaceName};
use quiz_core::{Bounds, GeoPoint};

use crate::config::QuizConfig;

/// Fill style for a single rendered place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceStyle {
    Training,
    Correct,
    Incorrect,
}

/// Highlight applied to one region of an easy-mode map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    /// The clicked region was the target.
    Correct,
    /// The clicked region was not the target.
    Wrong,
    /// The target revealed after a miss.
    Reveal,
}

/// Fire-and-forget instruction for the map collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum MapCommand {
    ClearLayers,
    /// Return to the configured default view.
    ResetView,
    RenderPlace { place: Place, style: PlaceStyle },
    /// Render every place as a clickable region.
    RenderAll { places: Vec<Place> },
    Highlight { name: PlaceName, highlight: Highlight },
    FitBounds { bounds: Bounds, padding_px: u16 },
    CenterOn { point: GeoPoint, zoom: u8 },
}

/// Receives map commands emitted by a quiz session.
pub trait MapSurface {
    fn apply(&mut self, command: MapCommand);
}

impl<T: MapSurface + ?Sized> MapSurface for &mut T {
    fn apply(&mut self, command: MapCommand) {
        (**self).apply(command);
    }
}

/// Map surface that only remembers what it was told.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingMap {
    commands: Vec<MapCommand>,
}

impl RecordingMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn commands(&self) -> &[MapCommand] {
        &self.commands
    }

    /// Drain the recorded commands.
    pub fn take(&mut self) -> Vec<MapCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl MapSurface for RecordingMap {
    fn apply(&mut self, command: MapCommand) {
        self.commands.push(command);
    }
}

/// Fit to the place bounds, when they are usable.
pub(crate) fn fit_bounds(place: &Place, config: &QuizConfig) -> Option<MapCommand> {
    place
        .shape()
        .bounds()
        .filter(Bounds::is_valid)
        .map(|bounds| MapCommand::FitBounds {
            bounds,
            padding_px: config.fit_padding_px(),
        })
}

/// Bring `place` into view: fit its bounds, else center on it, else reset.
pub(crate) fn focus_on(place: &Place, config: &QuizConfig) -> MapCommand {
    if let Some(command) = fit_bounds(place, config) {
        return command;
    }
    match center_of(place.shape()) {
        Ok(point) => MapCommand::CenterOn {
            point,
            zoom: config.focus_zoom(),
        },
        Err(_) => MapCommand::ResetView,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::Shape;

    fn place(name: &str, ring: Vec<GeoPoint>) -> Place {
        Place::new(PlaceName::new(name).unwrap(), Shape::polygon(vec![ring])).unwrap()
    }

    #[test]
    fn focus_fits_padded_bounds() {
        let park = place(
            "Wolin",
            vec![
                GeoPoint::new(53.8, 14.4),
                GeoPoint::new(53.8, 14.6),
                GeoPoint::new(54.0, 14.6),
                GeoPoint::new(53.8, 14.4),
            ],
        );
        let config = QuizConfig::default();
        assert_eq!(
            focus_on(&park, &config),
            MapCommand::FitBounds {
                bounds: park.shape().bounds().unwrap(),
                padding_px: 10,
            }
        );
    }

    #[test]
    fn focus_without_bounds_resets_view() {
        let broken = place("Broken", vec![GeoPoint::new(f64::NAN, f64::NAN)]);
        let config = QuizConfig::default();
        assert_eq!(fit_bounds(&broken, &config), None);
        assert_eq!(focus_on(&broken, &config), MapCommand::ResetView);
    }

    #[test]
    fn recording_map_drains_commands() {
        let mut map = RecordingMap::new();
        {
            let mut surface = &mut map;
            surface.apply(MapCommand::ClearLayers);
            surface.apply(MapCommand::ResetView);
        }
        assert_eq!(map.commands().len(), 2);
        assert_eq!(map.take(), vec![MapCommand::ClearLayers, MapCommand::ResetView]);
        assert!(map.commands().is_empty());
    }
}
