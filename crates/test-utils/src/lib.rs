//! Shared test utilities for the hydromet viewer workspace.
//!
//! - [`fixtures`]: WMTS capabilities documents and backend payloads
//! - [`generators`]: current grids and hourly time series
//! - `assert_approx_eq!` / `assert_coords_approx_eq!` for float results
//!
//! ```ignore
//! use test_utils::{assert_approx_eq, fixtures, single_cell_grid};
//! ```

pub mod fixtures;
pub mod generators;

pub use generators::*;

/// Assert two floats differ by at most `epsilon`.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if !(diff <= epsilon) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Component-wise [`assert_approx_eq!`] for `(x, y)` pairs written as tuples.
#[macro_export]
macro_rules! assert_coords_approx_eq {
    (($x1:expr, $y1:expr), ($x2:expr, $y2:expr), $epsilon:expr) => {{
        $crate::assert_approx_eq!($x1, $x2, $epsilon);
        $crate::assert_approx_eq!($y1, $y2, $epsilon);
    }};
}
