//! Screen viewport over an EPSG:3857 map.
//!
//! Mirrors how tiled web maps relate pixels to map units: the resolution at
//! zoom `z` is the 256 px world width divided by `2^z`, pixel (0, 0) is the
//! top-left corner, and pixel y grows downwards while map y grows upwards.

use hydromet_common::BoundingBox;

use crate::mercator::{from_lon_lat, to_lon_lat, transform_extent_to_geographic, HALF_SIZE};

/// Meters per pixel at zoom 0 for 256 px tiles.
pub const BASE_RESOLUTION: f64 = 2.0 * HALF_SIZE / 256.0;

pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 28.0;

/// A rectangular view of the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Center in EPSG:3857 meters.
    pub center: (f64, f64),
    pub zoom: f64,
    /// Size in pixels.
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Viewport centered on a geographic point.
    pub fn centered_on(lon: f64, lat: f64, zoom: f64, width: u32, height: u32) -> Self {
        Self {
            center: from_lon_lat(lon, lat),
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            width,
            height,
        }
    }

    /// Map units per pixel.
    pub fn resolution(&self) -> f64 {
        BASE_RESOLUTION / 2f64.powf(self.zoom)
    }

    /// Center as geographic (lon, lat).
    pub fn center_lon_lat(&self) -> (f64, f64) {
        to_lon_lat(self.center.0, self.center.1)
    }

    /// Map coordinate under a pixel.
    pub fn coordinate_from_pixel(&self, px: f64, py: f64) -> (f64, f64) {
        let res = self.resolution();
        (
            self.center.0 + (px - self.width as f64 / 2.0) * res,
            self.center.1 - (py - self.height as f64 / 2.0) * res,
        )
    }

    /// Pixel position of a map coordinate. May fall outside the viewport.
    pub fn pixel_from_coordinate(&self, x: f64, y: f64) -> (f64, f64) {
        let res = self.resolution();
        (
            (x - self.center.0) / res + self.width as f64 / 2.0,
            (self.center.1 - y) / res + self.height as f64 / 2.0,
        )
    }

    /// Geographic (lon, lat) under a pixel.
    pub fn lon_lat_from_pixel(&self, px: f64, py: f64) -> (f64, f64) {
        let (x, y) = self.coordinate_from_pixel(px, py);
        to_lon_lat(x, y)
    }

    /// Visible extent in map units.
    pub fn extent(&self) -> BoundingBox {
        let res = self.resolution();
        let half_w = self.width as f64 / 2.0 * res;
        let half_h = self.height as f64 / 2.0 * res;
        BoundingBox::new(
            self.center.0 - half_w,
            self.center.1 - half_h,
            self.center.0 + half_w,
            self.center.1 + half_h,
        )
    }

    /// Visible extent in geographic degrees.
    pub fn geographic_extent(&self) -> BoundingBox {
        transform_extent_to_geographic(&self.extent())
    }

    pub fn set_center_lon_lat(&mut self, lon: f64, lat: f64) {
        self.center = from_lon_lat(lon, lat);
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Drag the map content by (dx, dy) pixels.
    pub fn pan_by_pixels(&mut self, dx: f64, dy: f64) {
        let res = self.resolution();
        self.center.0 -= dx * res;
        self.center.1 += dy * res;
    }
}
