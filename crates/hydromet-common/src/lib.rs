//! Common types shared across the hydrometeorological viewer crates.

pub mod bbox;
mod de;
pub mod error;
pub mod grid;
pub mod region;
pub mod series;
pub mod time;

pub use bbox::BoundingBox;
pub use error::{HydroError, HydroResult};
pub use grid::{CurrentGrid, GridCell};
pub use region::{Region, RegionId};
pub use series::TimeSeries;
pub use time::{format_utc, parse_utc};
