//! Spherical (Web) Mercator projection, EPSG:3857.
//!
//! Map coordinates are meters on a sphere of radius 6378137 m. Latitudes
//! beyond ±85.0511° project outside the square world extent and are clamped
//! onto its edge.

use std::f64::consts::PI;

use hydromet_common::BoundingBox;

/// Sphere radius used by EPSG:3857 (meters).
pub const EARTH_RADIUS: f64 = 6378137.0;

/// Half the width of the projected world (meters).
pub const HALF_SIZE: f64 = PI * EARTH_RADIUS;

/// Largest latitude representable inside the square world extent (degrees).
pub const MAX_LATITUDE: f64 = 85.0511287798066;

/// Project geographic (lon, lat) in degrees to EPSG:3857 (x, y) in meters.
pub fn from_lon_lat(lon: f64, lat: f64) -> (f64, f64) {
    let x = EARTH_RADIUS * PI * lon / 180.0;
    let y = EARTH_RADIUS * (PI * (lat + 90.0) / 360.0).tan().ln();
    (x, y.clamp(-HALF_SIZE, HALF_SIZE))
}

/// Inverse of [`from_lon_lat`]: EPSG:3857 meters to (lon, lat) degrees.
pub fn to_lon_lat(x: f64, y: f64) -> (f64, f64) {
    let lon = 180.0 * x / (EARTH_RADIUS * PI);
    let lat = 360.0 * (y / EARTH_RADIUS).exp().atan() / PI - 90.0;
    (lon, lat)
}

/// Transform a projected extent to geographic degrees.
///
/// Mercator is monotonic along both axes, so the corners are sufficient.
pub fn transform_extent_to_geographic(extent: &BoundingBox) -> BoundingBox {
    let (min_lon, min_lat) = to_lon_lat(extent.min_x, extent.min_y);
    let (max_lon, max_lat) = to_lon_lat(extent.max_x, extent.max_y);
    BoundingBox::new(min_lon, min_lat, max_lon, max_lat)
}

/// Transform a geographic extent to EPSG:3857 meters.
pub fn transform_extent_to_map(extent: &BoundingBox) -> BoundingBox {
    let (min_x, min_y) = from_lon_lat(extent.min_x, extent.min_y);
    let (max_x, max_y) = from_lon_lat(extent.max_x, extent.max_y);
    BoundingBox::new(min_x, min_y, max_x, max_y)
}
