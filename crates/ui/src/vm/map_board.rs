use std::cmp::Ordering;

use quiz_core::model::PlaceName;
use quiz_core::{Bounds, GeoPoint};
use services::MapView;
use services::quiz::{Highlight, MapCommand, MapSurface, PlaceStyle};

/// What part of the map is in view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoardView {
    Default(MapView),
    Fit { bounds: Bounds, padding_px: u16 },
    Center { point: GeoPoint, zoom: u8 },
}

/// A clickable region of the easy-mode board.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionTile {
    pub name: PlaceName,
    pub bounds: Option<Bounds>,
    pub highlight: Option<Highlight>,
}

impl RegionTile {
    /// Where the region lies; the name only shows once feedback highlights it.
    #[must_use]
    pub fn label(&self) -> String {
        match (self.highlight, self.bounds) {
            (Some(_), _) => self.name.to_string(),
            (None, Some(bounds)) => bounds_text(&bounds),
            (None, None) => "Unmapped region".to_string(),
        }
    }
}

/// A single place drawn on its own (training and hard-mode feedback).
#[derive(Debug, Clone, PartialEq)]
pub struct FocusedPlace {
    pub name: PlaceName,
    pub style: PlaceStyle,
}

/// In-window stand-in for the map: keeps the layers the quiz asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct MapBoard {
    default_view: MapView,
    view: BoardView,
    regions: Vec<RegionTile>,
    focus: Option<FocusedPlace>,
}

impl MapBoard {
    #[must_use]
    pub fn new(default_view: MapView) -> Self {
        Self {
            default_view,
            view: BoardView::Default(default_view),
            regions: Vec::new(),
            focus: None,
        }
    }

    #[must_use]
    pub fn view(&self) -> BoardView {
        self.view
    }

    /// Regions from north to south, so the layout does not give away the quiz order.
    #[must_use]
    pub fn regions(&self) -> &[RegionTile] {
        &self.regions
    }

    #[must_use]
    pub fn focus(&self) -> Option<&FocusedPlace> {
        self.focus.as_ref()
    }

    #[must_use]
    pub fn view_label(&self) -> String {
        match self.view {
            BoardView::Default(MapView { center, zoom }) | BoardView::Center { point: center, zoom } => {
                format!("Centered on {:.2}, {:.2} (zoom {zoom})", center.lat(), center.lon())
            }
            BoardView::Fit { bounds, .. } => format!("Showing {}", bounds_text(&bounds)),
        }
    }
}

fn bounds_text(bounds: &Bounds) -> String {
    format!(
        "{:.2}..{:.2} N, {:.2}..{:.2} E",
        bounds.south, bounds.north, bounds.west, bounds.east
    )
}

fn north_to_south(a: &RegionTile, b: &RegionTile) -> Ordering {
    match (a.bounds.map(|r| r.center()), b.bounds.map(|r| r.center())) {
        (Some(a), Some(b)) => b
            .lat()
            .total_cmp(&a.lat())
            .then_with(|| a.lon().total_cmp(&b.lon())),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl MapSurface for MapBoard {
    fn apply(&mut self, command: MapCommand) {
        match command {
            MapCommand::ClearLayers => {
                self.regions.clear();
                self.focus = None;
            }
            MapCommand::ResetView => self.view = BoardView::Default(self.default_view),
            MapCommand::RenderPlace { place, style } => {
                self.focus = Some(FocusedPlace {
                    name: place.name().clone(),
                    style,
                });
            }
            MapCommand::RenderAll { places } => {
                let mut regions: Vec<RegionTile> = places
                    .iter()
                    .map(|place| RegionTile {
                        name: place.name().clone(),
                        bounds: place.shape().bounds().filter(Bounds::is_valid),
                        highlight: None,
                    })
                    .collect();
                regions.sort_by(north_to_south);
                self.regions = regions;
            }
            MapCommand::Highlight { name, highlight } => {
                for region in self.regions.iter_mut().filter(|region| region.name == name) {
                    region.highlight = Some(highlight);
                }
            }
            MapCommand::FitBounds { bounds, padding_px } => {
                self.view = BoardView::Fit { bounds, padding_px };
            }
            MapCommand::CenterOn { point, zoom } => self.view = BoardView::Center { point, zoom },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::Shape;
    use quiz_core::model::Place;

    fn place_at(name: &str, lat: f64, lon: f64) -> Place {
        let ring = vec![
            GeoPoint::new(lat, lon),
            GeoPoint::new(lat, lon + 0.5),
            GeoPoint::new(lat + 0.5, lon + 0.5),
            GeoPoint::new(lat, lon),
        ];
        Place::new(PlaceName::new(name).unwrap(), Shape::polygon(vec![ring])).unwrap()
    }

    fn place(name: &str) -> Place {
        place_at(name, 50.0, 20.0)
    }

    #[test]
    fn render_all_orders_regions_by_location_and_hides_names() {
        let mut board = MapBoard::new(MapView::default());
        board.apply(MapCommand::RenderAll {
            places: vec![
                place_at("Tatra", 49.0, 19.8),
                place_at("Wolin", 53.8, 14.4),
                place_at("Biebrza", 53.2, 22.4),
            ],
        });
        let names: Vec<_> = board.regions().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Wolin", "Biebrza", "Tatra"]);
        let labels: Vec<_> = board.regions().iter().map(RegionTile::label).collect();
        assert_eq!(labels[2], "49.00..49.50 N, 19.80..20.30 E");
        assert!(labels.iter().all(|label| !label.contains("Tatra")));

        board.apply(MapCommand::Highlight {
            name: PlaceName::new("Tatra").unwrap(),
            highlight: Highlight::Reveal,
        });
        assert_eq!(board.regions()[2].highlight, Some(Highlight::Reveal));
        assert_eq!(board.regions()[2].label(), "Tatra");
        assert_eq!(board.regions()[0].highlight, None);

        board.apply(MapCommand::ClearLayers);
        assert!(board.regions().is_empty());
    }

    #[test]
    fn view_follows_fit_and_reset() {
        let mut board = MapBoard::new(MapView::default());
        assert_eq!(board.view_label(), "Centered on 52.07, 19.48 (zoom 6)");

        let bounds = place("Tatra").shape().bounds().unwrap();
        board.apply(MapCommand::FitBounds {
            bounds,
            padding_px: 10,
        });
        assert_eq!(board.view_label(), "Showing 50.00..50.50 N, 20.00..20.50 E");

        board.apply(MapCommand::ResetView);
        assert_eq!(board.view(), BoardView::Default(MapView::default()));
    }
}
