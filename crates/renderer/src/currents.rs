//! Sea current glyphs.
//!
//! Each valid grid cell becomes an unfilled triangle placed at the cell's
//! projected position, scaled by current speed and rotated against the
//! flow direction.

use hydromet_common::{CurrentGrid, GridCell};
use serde::Serialize;

/// Smallest glyph radius in pixels (still water).
pub const MIN_GLYPH_SIZE: f64 = 6.0;

/// Largest radius added on top of [`MIN_GLYPH_SIZE`].
pub const MAX_GLYPH_GROWTH: f64 = 18.0;

/// Pixels of radius per m/s of current speed.
pub const SIZE_PER_SPEED: f64 = 20.0;

/// How glyphs are drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlyphStyle {
    /// Vertices of the regular shape.
    pub points: u32,
    /// Shape angle in radians; 0 puts the first vertex straight up.
    pub angle: f64,
    /// Stroke color as `#rrggbb`.
    pub stroke_color: String,
    pub stroke_width: f32,
    /// Fill color, `None` for a hollow shape.
    pub fill_color: Option<String>,
}

impl Default for GlyphStyle {
    fn default() -> Self {
        Self {
            points: 3,
            angle: 0.0,
            stroke_color: "#1f5fbf".to_string(),
            stroke_width: 2.0,
            fill_color: None,
        }
    }
}

/// One current marker on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentGlyph {
    pub lon: f64,
    pub lat: f64,
    /// Position in EPSG:3857 meters.
    pub x: f64,
    pub y: f64,
    pub speed: f64,
    /// Radius in pixels.
    pub size: f64,
    /// Clockwise rotation in radians.
    pub rotation: f64,
}

impl CurrentGlyph {
    pub fn from_cell(cell: &GridCell) -> Self {
        let speed = cell.speed();
        let (x, y) = projection::from_lon_lat(cell.lon, cell.lat);
        Self {
            lon: cell.lon,
            lat: cell.lat,
            x,
            y,
            speed,
            size: glyph_size(speed),
            rotation: -cell.direction(),
        }
    }
}

/// Glyph radius for a current speed in m/s.
pub fn glyph_size(speed: f64) -> f64 {
    MIN_GLYPH_SIZE + (speed * SIZE_PER_SPEED).min(MAX_GLYPH_GROWTH)
}

/// One glyph per valid cell, in grid order (rows of latitude, then longitude).
pub fn build_glyphs(grid: &CurrentGrid) -> Vec<CurrentGlyph> {
    grid.valid_cells().map(|c| CurrentGlyph::from_cell(&c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_glyph_size_caps() {
        assert_eq!(glyph_size(0.0), 6.0);
        assert!((glyph_size(0.5) - 16.0).abs() < 1e-12);
        assert_eq!(glyph_size(0.9), 24.0);
        assert_eq!(glyph_size(5.0), 24.0);
    }

    #[test]
    fn test_rotation_is_negated_direction() {
        let cell = GridCell {
            ix: 0,
            iy: 0,
            lon: 20.0,
            lat: 59.0,
            u: 0.0,
            v: 0.1,
        };
        let glyph = CurrentGlyph::from_cell(&cell);
        assert!((glyph.rotation + PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_default_style() {
        let style = GlyphStyle::default();
        assert_eq!(style.points, 3);
        assert_eq!(style.stroke_color, "#1f5fbf");
        assert_eq!(style.stroke_width, 2.0);
        assert!(style.fill_color.is_none());
    }
}
