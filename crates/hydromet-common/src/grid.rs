//! Sea-current vector grids.

use serde::{Deserialize, Serialize};

/// A snapshot of the current vector field over a bounding box.
///
/// `u` and `v` are flattened row-major `lats.len() × lons.len()` arrays,
/// indexed as `iy * lons.len() + ix`. Invalid samples are non-finite.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CurrentGrid {
    pub lons: Vec<f64>,
    pub lats: Vec<f64>,
    #[serde(deserialize_with = "crate::de::nullable_f64_vec")]
    pub u: Vec<f64>,
    #[serde(deserialize_with = "crate::de::nullable_f64_vec")]
    pub v: Vec<f64>,
}

/// One sample of a [`CurrentGrid`] with its coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub ix: usize,
    pub iy: usize,
    pub lon: f64,
    pub lat: f64,
    pub u: f64,
    pub v: f64,
}

impl GridCell {
    /// Both components are finite.
    pub fn is_valid(&self) -> bool {
        self.u.is_finite() && self.v.is_finite()
    }

    /// Vector magnitude.
    pub fn speed(&self) -> f64 {
        (self.u * self.u + self.v * self.v).sqrt()
    }

    /// Mathematical direction of the vector in radians, counterclockwise from east.
    pub fn direction(&self) -> f64 {
        self.v.atan2(self.u)
    }
}

impl CurrentGrid {
    /// Number of columns (longitudes).
    pub fn nx(&self) -> usize {
        self.lons.len()
    }

    /// Number of rows (latitudes).
    pub fn ny(&self) -> usize {
        self.lats.len()
    }

    /// Flat index of (ix, iy).
    pub fn index(&self, ix: usize, iy: usize) -> usize {
        iy * self.nx() + ix
    }

    /// Cell at (ix, iy). Components missing from short `u`/`v` arrays read as NaN.
    pub fn cell(&self, ix: usize, iy: usize) -> Option<GridCell> {
        if ix >= self.nx() || iy >= self.ny() {
            return None;
        }
        let idx = self.index(ix, iy);
        Some(GridCell {
            ix,
            iy,
            lon: self.lons[ix],
            lat: self.lats[iy],
            u: self.u.get(idx).copied().unwrap_or(f64::NAN),
            v: self.v.get(idx).copied().unwrap_or(f64::NAN),
        })
    }

    /// All cells in row-major order, valid or not.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        (0..self.ny()).flat_map(move |iy| (0..self.nx()).filter_map(move |ix| self.cell(ix, iy)))
    }

    /// Cells whose u and v are both finite.
    pub fn valid_cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.cells().filter(GridCell::is_valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_2x2() -> CurrentGrid {
        CurrentGrid {
            lons: vec![20.0, 21.0],
            lats: vec![59.0, 60.0],
            u: vec![0.1, f64::NAN, 0.3, 0.4],
            v: vec![0.0, 0.2, f64::INFINITY, 0.1],
        }
    }

    #[test]
    fn test_row_major_indexing() {
        let grid = grid_2x2();
        let cell = grid.cell(1, 1).unwrap();
        assert_eq!(cell.lon, 21.0);
        assert_eq!(cell.lat, 60.0);
        assert_eq!(cell.u, 0.4);
        assert_eq!(grid.index(1, 1), 3);
        assert!(grid.cell(2, 0).is_none());
    }

    #[test]
    fn test_valid_cells_skip_non_finite() {
        let grid = grid_2x2();
        assert_eq!(grid.cells().count(), 4);
        let valid: Vec<_> = grid.valid_cells().map(|c| (c.ix, c.iy)).collect();
        assert_eq!(valid, vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn test_short_component_arrays_are_invalid_cells() {
        let grid = CurrentGrid {
            lons: vec![0.0, 1.0],
            lats: vec![0.0],
            u: vec![1.0],
            v: vec![1.0],
        };
        assert_eq!(grid.valid_cells().count(), 1);
        assert!(!grid.cell(1, 0).unwrap().is_valid());
    }

    #[test]
    fn test_speed_and_direction() {
        let cell = GridCell {
            ix: 0,
            iy: 0,
            lon: 0.0,
            lat: 0.0,
            u: 3.0,
            v: 4.0,
        };
        assert!((cell.speed() - 5.0).abs() < 1e-12);
        assert!((cell.direction() - 4.0_f64.atan2(3.0)).abs() < 1e-12);
    }

    #[test]
    fn test_deserialize_with_nulls() {
        let json = r#"{"lons": [1.0], "lats": [2.0], "u": [null], "v": [0.5], "meta": {}}"#;
        let grid: CurrentGrid = serde_json::from_str(json).unwrap();
        assert!(grid.u[0].is_nan());
        assert_eq!(grid.valid_cells().count(), 0);
    }
}
