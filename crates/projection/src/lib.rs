//! Coordinate reference system transformations.
//!
//! Implements the EPSG:4326 ⇄ EPSG:3857 pair used by tiled web maps, plus a
//! viewport that maps screen pixels onto projected coordinates.

pub mod mercator;
pub mod viewport;

pub use mercator::{from_lon_lat, to_lon_lat, transform_extent_to_geographic, transform_extent_to_map};
pub use viewport::Viewport;
