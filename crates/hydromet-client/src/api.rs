//! Backend API abstraction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hydromet_common::{CurrentGrid, HydroResult, TimeSeries};

use crate::types::{CurrentsGridRequest, HealthStatus, IceTimeSeriesRequest, TimeSeriesQuery};

/// Operations the map viewer needs from the backend.
#[async_trait]
pub trait HydroMeteoApi: Send + Sync {
    /// `GET /health`.
    async fn health(&self) -> HydroResult<HealthStatus>;

    /// `POST /api/timeseries`.
    async fn timeseries(&self, query: &TimeSeriesQuery) -> HydroResult<TimeSeries>;

    /// `POST /api/ice-timeseries`.
    async fn ice_timeseries(&self, request: &IceTimeSeriesRequest) -> HydroResult<TimeSeries>;

    /// `POST /api/currents-grid`.
    async fn currents_grid(&self, request: &CurrentsGridRequest) -> HydroResult<CurrentGrid>;

    /// Capabilities XML served by the backend's WMTS proxy.
    async fn wmts_capabilities(&self) -> HydroResult<String>;

    /// GetTile URL template of the backend's WMTS proxy.
    fn wmts_tile_url_template(&self) -> String;

    /// Wave time series for `variable` (usually `VHM0`).
    async fn timeseries_waves(
        &self,
        lat: f64,
        lon: f64,
        variable: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> HydroResult<TimeSeries> {
        let query = TimeSeriesQuery::new(crate::Dataset::Waves, variable, lat, lon)
            .with_range(start, end);
        self.timeseries(&query).await
    }

    /// Physics time series for `variable` (usually `thetao`).
    async fn timeseries_physics(
        &self,
        lat: f64,
        lon: f64,
        variable: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> HydroResult<TimeSeries> {
        let query = TimeSeriesQuery::new(crate::Dataset::Physics, variable, lat, lon)
            .with_range(start, end);
        self.timeseries(&query).await
    }
}
