#![forbid(unsafe_code)]

pub mod error;
pub mod geo;
pub mod model;
pub mod time;

pub use error::{ConfigError, DataError};
pub use crate::geo::{Bounds, GeoPoint, GeometryError, Shape};
pub use time::Clock;
