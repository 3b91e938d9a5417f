//! WMTS TileMatrix and TileMatrixSet definitions.

use hydromet_common::BoundingBox;
use serde::Serialize;

/// Standardized rendering pixel size in meters (OGC WMTS 1.0.0, 6.1).
pub const STANDARD_PIXEL_SIZE: f64 = 0.00028;

/// Meters per degree on the equator of the WGS84 ellipsoid.
pub const METERS_PER_DEGREE: f64 = 2.0 * std::f64::consts::PI * 6378137.0 / 360.0;

/// A single tile matrix (zoom level) definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileMatrix {
    /// Identifier (usually zoom level as string)
    pub identifier: String,

    pub scale_denominator: f64,

    /// Top-left corner in CRS units, as written in the document
    pub top_left_corner: (f64, f64),

    pub tile_width: u32,
    pub tile_height: u32,

    /// Number of tile columns
    pub matrix_width: u32,

    /// Number of tile rows
    pub matrix_height: u32,
}

impl TileMatrix {
    /// CRS units per pixel for this matrix.
    pub fn resolution(&self, meters_per_unit: f64) -> f64 {
        self.scale_denominator * STANDARD_PIXEL_SIZE / meters_per_unit
    }

    /// Column and row of the tile containing a coordinate, unclamped.
    fn raw_tile_index(&self, x: f64, y: f64, meters_per_unit: f64) -> (i64, i64) {
        let res = self.resolution(meters_per_unit);
        let col = ((x - self.top_left_corner.0) / (res * self.tile_width as f64)).floor() as i64;
        let row = ((self.top_left_corner.1 - y) / (res * self.tile_height as f64)).floor() as i64;
        (col, row)
    }

    /// Inclusive column and row ranges of tiles intersecting `extent`, clamped
    /// to the matrix. `None` when the extent lies entirely outside it.
    pub fn tile_range(
        &self,
        extent: &BoundingBox,
        meters_per_unit: f64,
    ) -> Option<((u32, u32), (u32, u32))> {
        if self.matrix_width == 0 || self.matrix_height == 0 {
            return None;
        }
        let (col_min, row_min) = self.raw_tile_index(extent.min_x, extent.max_y, meters_per_unit);
        let (col_max, row_max) = self.raw_tile_index(extent.max_x, extent.min_y, meters_per_unit);

        let last_col = self.matrix_width as i64 - 1;
        let last_row = self.matrix_height as i64 - 1;
        if col_max < 0 || row_max < 0 || col_min > last_col || row_min > last_row {
            return None;
        }

        Some((
            (col_min.max(0) as u32, col_max.min(last_col) as u32),
            (row_min.max(0) as u32, row_max.min(last_row) as u32),
        ))
    }
}

/// A complete tile matrix set definition.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TileMatrixSet {
    pub identifier: String,

    /// Supported CRS as written, e.g. `urn:ogc:def:crs:EPSG::3857`
    pub supported_crs: Option<String>,

    pub well_known_scale_set: Option<String>,

    pub tile_matrices: Vec<TileMatrix>,
}

impl TileMatrixSet {
    /// Meters per CRS unit. Geographic CRSs use degrees, everything else meters.
    pub fn meters_per_unit(&self) -> f64 {
        match self.supported_crs.as_deref() {
            Some(crs) if is_geographic_crs(crs) => METERS_PER_DEGREE,
            _ => 1.0,
        }
    }
}

fn is_geographic_crs(crs: &str) -> bool {
    let upper = crs.to_uppercase();
    upper.ends_with(":4326") || upper.ends_with("CRS84")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn web_mercator_level(z: u32) -> TileMatrix {
        let max_extent = 20037508.342789244;
        let n = 2u32.pow(z);
        TileMatrix {
            identifier: z.to_string(),
            scale_denominator: 559082264.0287178 / n as f64,
            top_left_corner: (-max_extent, max_extent),
            tile_width: 256,
            tile_height: 256,
            matrix_width: n,
            matrix_height: n,
        }
    }

    #[test]
    fn test_resolution_zoom_zero() {
        let m = web_mercator_level(0);
        assert!((m.resolution(1.0) - 156543.0339).abs() < 1e-3);
    }

    #[test]
    fn test_tile_range_single_tile() {
        let m = web_mercator_level(1);
        // North-east quadrant
        let ne = BoundingBox::new(1000.0, 1000.0, 2000.0, 2000.0);
        assert_eq!(m.tile_range(&ne, 1.0), Some(((1, 1), (0, 0))));
        // South-west quadrant
        let sw = BoundingBox::new(-2000.0, -2000.0, -1000.0, -1000.0);
        assert_eq!(m.tile_range(&sw, 1.0), Some(((0, 0), (1, 1))));
    }

    #[test]
    fn test_tile_range_clamps() {
        let m = web_mercator_level(1);
        let world = BoundingBox::new(-3.0e7, -3.0e7, 3.0e7, 3.0e7);
        assert_eq!(m.tile_range(&world, 1.0), Some(((0, 1), (0, 1))));

        let outside = BoundingBox::new(2.1e7, 0.0, 2.2e7, 1.0);
        assert_eq!(m.tile_range(&outside, 1.0), None);
    }

    #[test]
    fn test_meters_per_unit() {
        let mut set = TileMatrixSet {
            supported_crs: Some("urn:ogc:def:crs:EPSG::4326".to_string()),
            ..Default::default()
        };
        assert!((set.meters_per_unit() - 111319.49079327357).abs() < 1e-6);
        set.supported_crs = Some("urn:ogc:def:crs:EPSG::3857".to_string());
        assert_eq!(set.meters_per_unit(), 1.0);
    }
}
