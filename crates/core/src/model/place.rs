use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::Shape;

/// Free-form feature properties carried over from the source document.
pub type Properties = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlaceError {
    #[error("place name cannot be empty")]
    EmptyName,

    #[error("place shape has no coordinates")]
    EmptyShape,
}

/// Validated place name (trimmed, non-empty). Identity of a place within a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlaceName(String);

impl PlaceName {
    /// # Errors
    ///
    /// Returns `PlaceError::EmptyName` if the name is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, PlaceError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PlaceError::EmptyName);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlaceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named region the player has to find on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    name: PlaceName,
    shape: Shape,
    properties: Properties,
}

impl Place {
    /// # Errors
    ///
    /// Returns `PlaceError::EmptyShape` if the shape has no coordinates.
    pub fn new(name: PlaceName, shape: Shape) -> Result<Self, PlaceError> {
        if shape.is_empty() {
            return Err(PlaceError::EmptyShape);
        }
        Ok(Self {
            name,
            shape,
            properties: Properties::new(),
        })
    }

    #[must_use]
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    #[must_use]
    pub fn name(&self) -> &PlaceName {
        &self.name
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    #[must_use]
    pub fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;

    #[test]
    fn name_is_trimmed_and_required() {
        assert_eq!(PlaceName::new("  Tatra ").unwrap().as_str(), "Tatra");
        assert_eq!(PlaceName::new("   "), Err(PlaceError::EmptyName));
    }

    #[test]
    fn place_requires_coordinates() {
        let name = PlaceName::new("Wolin").unwrap();
        let err = Place::new(name.clone(), Shape::polygon(Vec::new())).unwrap_err();
        assert_eq!(err, PlaceError::EmptyShape);

        let shape = Shape::polygon(vec![vec![GeoPoint::new(53.9, 14.5)]]);
        let mut props = Properties::new();
        props.insert("area_km2".into(), serde_json::json!(109.37));
        let place = Place::new(name, shape).unwrap().with_properties(props);
        assert_eq!(place.property("area_km2"), Some(&serde_json::json!(109.37)));
    }
}
