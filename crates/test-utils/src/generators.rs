//! Generators for synthetic backend payloads.

use chrono::{Duration, TimeZone, Utc};
use hydromet_common::{CurrentGrid, TimeSeries};

/// A grid where every cell carries the same (u, v).
///
/// Longitudes start at `lon0` and latitudes at `lat0`, spaced `step` degrees.
pub fn uniform_current_grid(
    nx: usize,
    ny: usize,
    lon0: f64,
    lat0: f64,
    step: f64,
    u: f64,
    v: f64,
) -> CurrentGrid {
    CurrentGrid {
        lons: (0..nx).map(|i| lon0 + i as f64 * step).collect(),
        lats: (0..ny).map(|j| lat0 + j as f64 * step).collect(),
        u: vec![u; nx * ny],
        v: vec![v; nx * ny],
    }
}

/// A one-cell grid.
pub fn single_cell_grid(lon: f64, lat: f64, u: f64, v: f64) -> CurrentGrid {
    CurrentGrid {
        lons: vec![lon],
        lats: vec![lat],
        u: vec![u],
        v: vec![v],
    }
}

/// Like [`uniform_current_grid`] but with every `nth` cell (row-major) set to NaN,
/// as land points come back from the backend.
pub fn current_grid_with_gaps(nx: usize, ny: usize, nth: usize) -> CurrentGrid {
    let mut grid = uniform_current_grid(nx, ny, 20.0, 58.0, 0.5, 0.2, 0.1);
    for idx in (0..nx * ny).step_by(nth.max(1)) {
        grid.u[idx] = f64::NAN;
    }
    grid
}

/// Hourly series starting 2024-06-01T00:00:00Z.
pub fn hourly_series(values: &[f64], unit: Option<&str>) -> TimeSeries {
    let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    TimeSeries {
        times_utc: (0..values.len())
            .map(|i| {
                (start + Duration::hours(i as i64))
                    .format("%Y-%m-%dT%H:%M:%SZ")
                    .to_string()
            })
            .collect(),
        values: values.to_vec(),
        unit: unit.map(str::to_string),
    }
}
