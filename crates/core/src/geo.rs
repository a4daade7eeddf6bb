//! Spherical geometry for places: distances, representative centers and bounds.
//!
//! Coordinates are stored longitude/latitude internally (the GeoJSON order) but
//! every constructor and accessor at the API boundary speaks `(lat, lon)`.

use ::geo::{
    BoundingRect, Centroid, Contains, Coord, CoordsIter, Geometry, InteriorPoint, LineString,
    MultiPoint, MultiPolygon, Point, Polygon, Rect,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6_371.008_8;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum GeometryError {
    #[error("shape has no usable center point")]
    NoCenter,
}

//
// ─── POINT ─────────────────────────────────────────────────────────────────────
//

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    lon: f64,
    lat: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lon, lat }
    }

    /// Build a point from a GeoJSON position (`[lon, lat]`).
    #[must_use]
    pub const fn from_lon_lat(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    #[must_use]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    #[must_use]
    pub fn lon(&self) -> f64 {
        self.lon
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Great-circle (haversine) distance between two points in kilometers.
#[must_use]
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `h` a hair above 1 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}

//
// ─── BOUNDS ────────────────────────────────────────────────────────────────────
//

/// Axis-aligned lat/lon box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [self.south, self.west, self.north, self.east]
            .iter()
            .all(|v| v.is_finite())
            && self.south <= self.north
            && self.west <= self.east
    }

    #[must_use]
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }
}

impl From<Rect<f64>> for Bounds {
    fn from(rect: Rect<f64>) -> Self {
        Self {
            south: rect.min().y,
            west: rect.min().x,
            north: rect.max().y,
            east: rect.max().x,
        }
    }
}

//
// ─── SHAPE ─────────────────────────────────────────────────────────────────────
//

/// A sequence of points. The first ring of a polygon is its exterior, any
/// further rings are holes. Rings are closed on construction.
pub type Ring = Vec<GeoPoint>;

/// Polygonal area of a place, held as a `geo` multipolygon in lon/lat order.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape(MultiPolygon<f64>);

impl Shape {
    /// Single polygon from its rings; an empty list yields an empty shape.
    #[must_use]
    pub fn polygon(rings: Vec<Ring>) -> Self {
        Self(MultiPolygon::new(vec![polygon_from_rings(rings)]))
    }

    #[must_use]
    pub fn multi_polygon(polygons: Vec<Vec<Ring>>) -> Self {
        Self(MultiPolygon::new(
            polygons.into_iter().map(polygon_from_rings).collect(),
        ))
    }

    /// Accepts `Polygon` and `MultiPolygon` geometries; anything else is not a region.
    #[must_use]
    pub fn from_geometry(geometry: Geometry<f64>) -> Option<Self> {
        match geometry {
            Geometry::Polygon(polygon) => Some(Self(MultiPolygon::new(vec![polygon]))),
            Geometry::MultiPolygon(polygons) => Some(Self(polygons)),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_multi_polygon(&self) -> &MultiPolygon<f64> {
        &self.0
    }

    #[must_use]
    pub fn polygon_count(&self) -> usize {
        self.0.0.len()
    }

    /// True when the shape carries no coordinates at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.coords_count() == 0
    }

    fn is_finite(&self) -> bool {
        self.0.coords_iter().all(|c| c.x.is_finite() && c.y.is_finite())
    }

    fn rings(&self) -> impl Iterator<Item = &LineString<f64>> + '_ {
        self.0
            .0
            .iter()
            .flat_map(|polygon| std::iter::once(polygon.exterior()).chain(polygon.interiors()))
    }

    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        self.0.bounding_rect().map(Bounds::from)
    }

    /// Mean of all ring vertices, not counting the repeated closing vertex.
    ///
    /// This is the vertex mean, not the area-weighted centroid.
    #[must_use]
    pub fn centroid(&self) -> Option<GeoPoint> {
        let vertices: MultiPoint<f64> = self
            .rings()
            .flat_map(|ring| open_ring(&ring.0).iter().copied().map(Point::from))
            .collect();
        let centroid = point_to_geo(vertices.centroid()?);
        centroid.is_finite().then_some(centroid)
    }

    /// Points inside a hole or on a boundary are outside the shape.
    #[must_use]
    pub fn contains(&self, point: GeoPoint) -> bool {
        point.is_finite() && self.is_finite() && self.0.contains(&Point::new(point.lon, point.lat))
    }

    /// A point guaranteed to be on the shape: the centroid when it falls
    /// inside, else an interior point, else the first finite vertex.
    #[must_use]
    pub fn point_on_feature(&self) -> Option<GeoPoint> {
        if let Some(centroid) = self.centroid()
            && self.contains(centroid)
        {
            return Some(centroid);
        }
        if !self.is_empty()
            && self.is_finite()
            && let Some(inner) = self.0.interior_point()
        {
            return Some(point_to_geo(inner));
        }
        self.0
            .coords_iter()
            .map(|c| GeoPoint::from_lon_lat(c.x, c.y))
            .find(GeoPoint::is_finite)
    }
}

/// Representative center of a shape used for hard-mode scoring.
///
/// # Errors
///
/// Returns `GeometryError::NoCenter` if neither the centroid nor a point on the
/// shape can be computed.
pub fn center_of(shape: &Shape) -> Result<GeoPoint, GeometryError> {
    shape
        .centroid()
        .or_else(|| shape.point_on_feature())
        .ok_or(GeometryError::NoCenter)
}

fn polygon_from_rings(rings: Vec<Ring>) -> Polygon<f64> {
    let mut rings = rings.into_iter().map(|ring| {
        LineString::new(
            ring.into_iter()
                .map(|p| Coord { x: p.lon, y: p.lat })
                .collect(),
        )
    });
    let exterior = rings.next().unwrap_or_else(|| LineString::new(Vec::new()));
    Polygon::new(exterior, rings.collect())
}

fn point_to_geo(point: Point<f64>) -> GeoPoint {
    GeoPoint::from_lon_lat(point.x(), point.y())
}

fn open_ring(ring: &[Coord<f64>]) -> &[Coord<f64>] {
    match ring {
        [first, .., last] if first == last => &ring[..ring.len() - 1],
        _ => ring,
    }
}
