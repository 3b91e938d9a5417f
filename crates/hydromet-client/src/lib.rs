//! Client for the hydrometeorological backend.
//!
//! The backend exposes point time series, current vector grids and a WMTS
//! proxy. [`ApiClient`] talks to it over HTTP; consumers depend on the
//! [`HydroMeteoApi`] trait so they can be driven by in-process fakes.

pub mod api;
pub mod client;
pub mod types;

pub use api::HydroMeteoApi;
pub use client::{ApiClient, DEFAULT_API_URL};
pub use types::{
    CurrentsGridRequest, Dataset, HealthStatus, IceTimeSeriesRequest, TimeSeriesQuery,
    DEFAULT_CURRENTS_STEP, DEFAULT_PHYSICS_VARIABLE, DEFAULT_WAVES_VARIABLE,
};
