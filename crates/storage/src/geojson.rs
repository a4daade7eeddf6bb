//! GeoJSON `FeatureCollection` parsing and filtering into places.

use quiz_core::geo::Shape;
use quiz_core::model::{Place, PlaceName};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Value>,
}

/// Places accepted from a document, plus how many features were dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseReport {
    pub places: Vec<Place>,
    pub rejected: usize,
}

/// Parse a feature collection and keep the features that carry a non-empty
/// `name_key` property and a polygonal geometry with coordinates.
///
/// Malformed features are counted as rejected; only the collection itself
/// has to be well formed.
///
/// # Errors
///
/// Returns `serde_json::Error` if the document is not a feature collection.
pub fn parse_places(json: &str, name_key: &str) -> Result<ParseReport, serde_json::Error> {
    let collection: FeatureCollection = serde_json::from_str(json)?;
    let total = collection.features.len();

    let places: Vec<Place> = collection
        .features
        .iter()
        .filter_map(|feature| place_from_feature(feature, name_key))
        .collect();

    Ok(ParseReport {
        rejected: total - places.len(),
        places,
    })
}

fn place_from_feature(feature: &Value, name_key: &str) -> Option<Place> {
    let properties = feature.get("properties")?.as_object()?;
    let name = properties
        .get(name_key)
        .and_then(Value::as_str)
        .and_then(|raw| PlaceName::new(raw).ok())?;
    let shape = parse_shape(feature.get("geometry")?)?;
    let place = Place::new(name, shape).ok()?;
    Some(place.with_properties(properties.clone()))
}

/// Convert a GeoJSON geometry object into a `Shape`. Only `Polygon` and
/// `MultiPolygon` are playable.
#[must_use]
pub fn parse_shape(geometry: &Value) -> Option<Shape> {
    let geometry = geojson::Geometry::from_json_value(geometry.clone()).ok()?;
    Shape::from_geometry(geometry.value.try_into().ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn square_polygon() -> Value {
        json!({
            "type": "Polygon",
            "coordinates": [[[20.0, 49.0], [20.5, 49.0], [20.5, 49.5], [20.0, 49.5], [20.0, 49.0]]]
        })
    }

    #[test]
    fn keeps_only_named_polygonal_features() {
        let doc = json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "nazwa": "Tatrzański" }, "geometry": square_polygon() },
                { "type": "Feature", "properties": { "nazwa": "  " }, "geometry": square_polygon() },
                { "type": "Feature", "properties": { "other": "x" }, "geometry": square_polygon() },
                { "type": "Feature", "properties": null, "geometry": square_polygon() },
                { "type": "Feature", "properties": { "nazwa": "Bez geometrii" }, "geometry": null },
                { "type": "Feature", "properties": { "nazwa": "Punkt" },
                  "geometry": { "type": "Point", "coordinates": [20.0, 50.0] } },
                { "type": "Feature", "properties": { "nazwa": "Pusty" },
                  "geometry": { "type": "Polygon", "coordinates": [] } }
            ]
        });

        let report = parse_places(&doc.to_string(), "nazwa").unwrap();

        assert_eq!(report.places.len(), 1);
        assert_eq!(report.rejected, 6);
        let place = &report.places[0];
        assert_eq!(place.name().as_str(), "Tatrzański");
        assert_eq!(place.property("nazwa"), Some(&json!("Tatrzański")));
    }

    #[test]
    fn malformed_features_are_rejected_individually() {
        let doc = json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "nazwa": "Tatra" }, "geometry": square_polygon() },
                { "properties": "oops", "geometry": null },
                { "type": "Feature", "properties": { "nazwa": 7 }, "geometry": square_polygon() },
                { "type": "Feature", "properties": { "nazwa": "Zepsuty" },
                  "geometry": { "type": "Polygon", "coordinates": "nope" } },
                42
            ]
        });

        let report = parse_places(&doc.to_string(), "nazwa").unwrap();

        assert_eq!(report.places.len(), 1);
        assert_eq!(report.places[0].name().as_str(), "Tatra");
        assert_eq!(report.rejected, 4);
    }

    #[test]
    fn positions_are_read_as_lon_lat() {
        let shape = parse_shape(&square_polygon()).unwrap();
        let bounds = shape.bounds().unwrap();
        assert!((bounds.south - 49.0).abs() < f64::EPSILON);
        assert!((bounds.west - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn multipolygon_is_supported() {
        let geometry = json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[[14.0, 53.8], [14.1, 53.8], [14.1, 53.9], [14.0, 53.8]]],
                [[[14.5, 53.9], [14.6, 53.9], [14.6, 54.0], [14.5, 53.9]]]
            ]
        });
        assert_eq!(parse_shape(&geometry).map(|shape| shape.polygon_count()), Some(2));
    }

    #[test]
    fn malformed_positions_reject_the_geometry() {
        let geometry = json!({ "type": "Polygon", "coordinates": [[["a", 1.0]]] });
        assert!(parse_shape(&geometry).is_none());
    }

    #[test]
    fn document_without_features_is_an_error() {
        assert!(parse_places(r#"{"type":"FeatureCollection"}"#, "nazwa").is_err());
        assert!(parse_places("not json", "nazwa").is_err());
    }
}
