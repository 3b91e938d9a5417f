//! Map view controller.
//!
//! Owns the view state and turns user events (clicks, view moves, overlay
//! toggles) into backend requests. Responses are applied latest-wins per
//! target, so a slow response never overwrites a newer one. The state lock
//! is released before every backend call and held across every presenter
//! call, so the presenter sees updates in the order they were applied.

use std::sync::Arc;

use hydromet_client::{CurrentsGridRequest, HydroMeteoApi};
use hydromet_common::{HydroError, HydroResult, RegionId};
use renderer::{build_glyphs, format_last_value, LineChart};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use wmts_protocol::{
    options_from_capabilities, parse_capabilities, resolve_matrix_set, select_layer, TileRequest,
    TileSource,
};

use crate::config::ViewerConfig;
use crate::latest::LatestWins;
use crate::presenter::Presenter;
use crate::state::{Mode, OverlayState, ViewState};

/// Status text while the backend is unreachable.
pub const NO_CONNECTION: &str = "no connection to backend";

pub struct MapController {
    api: Arc<dyn HydroMeteoApi>,
    presenter: Arc<dyn Presenter>,
    config: ViewerConfig,
    state: Mutex<ViewState>,
    chart_token: LatestWins,
    overlay_token: LatestWins,
}

impl MapController {
    /// Build the map model: viewport on the configured region, overlay
    /// hidden, no raster layer.
    pub fn new(
        api: Arc<dyn HydroMeteoApi>,
        presenter: Arc<dyn Presenter>,
        config: ViewerConfig,
    ) -> Self {
        let state = ViewState::new(&config);
        Self {
            api,
            presenter,
            config,
            state: Mutex::new(state),
            chart_token: LatestWins::new(),
            overlay_token: LatestWins::new(),
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub async fn snapshot(&self) -> ViewState {
        self.state.lock().await.clone()
    }

    /// Health check, WMTS load, then enable interaction.
    ///
    /// A failed health check only changes the status text. A WMTS failure
    /// is returned, but the view becomes interactive either way.
    pub async fn initialize(&self) -> HydroResult<()> {
        self.check_api().await;
        let wmts = self.reload_wmts().await;
        self.state.lock().await.interactive = true;
        info!(region = %self.config.region, "Map view ready");
        wmts.map(|_| ())
    }

    /// Query backend health and publish the status line. Returns whether
    /// the backend answered.
    pub async fn check_api(&self) -> bool {
        let (online, text) = match self.api.health().await {
            Ok(health) => (true, health.status_text()),
            Err(e) => {
                warn!(
                    error = %e,
                    connection = e.is_connection_failure(),
                    "Backend health check failed"
                );
                (false, NO_CONNECTION.to_string())
            }
        };
        let mut state = self.state.lock().await;
        state.api_online = online;
        state.status_text = text.clone();
        info!(online, status = %text, "Backend status");
        self.presenter.status_changed(online, &text);
        online
    }

    /// Fetch capabilities, pick a layer and install its tile source.
    pub async fn reload_wmts(&self) -> HydroResult<TileSource> {
        let (filter, region) = {
            let state = self.state.lock().await;
            (state.layer_filter.clone(), state.region)
        };

        let result = self.load_tile_source(&filter, region).await;
        match &result {
            Ok(source) => {
                let mut state = self.state.lock().await;
                state.selected_layer = Some(source.layer.clone());
                state.tile_source = Some(source.clone());
                self.presenter.raster_source_changed(source);
            }
            Err(e) => warn!(error = %e, filter = %filter, "WMTS reload failed"),
        }
        result
    }

    async fn load_tile_source(&self, filter: &str, region: RegionId) -> HydroResult<TileSource> {
        let xml = self.api.wmts_capabilities().await?;
        let caps = parse_capabilities(&xml)?;
        self.state.lock().await.layers = caps.layers.clone();

        let selection = select_layer(&caps.layers, filter, region.region().title_fragment)?;
        let layer = selection.layer;
        let matrix_set = resolve_matrix_set(&caps, layer)?;
        let source = options_from_capabilities(&caps, &layer.identifier, &matrix_set)?
            .with_proxy(&self.api.wmts_tile_url_template(), layer);

        info!(
            layer = %source.layer,
            matrix_set = %source.matrix_set,
            reason = ?selection.reason,
            "WMTS layer loaded"
        );
        Ok(source)
    }

    /// Handle a map click at pixel (`px`, `py`).
    pub async fn click(&self, px: f64, py: f64) -> HydroResult<bool> {
        let (lat, lon) = {
            let state = self.state.lock().await;
            if !state.accepts_events() {
                debug!(px, py, "Ignoring click before initialization");
                return Ok(false);
            }
            let (lon, lat) = state.viewport.lon_lat_from_pixel(px, py);
            (lat, lon)
        };
        self.query_point(lat, lon).await
    }

    /// Fetch the series for the current mode at (`lat`, `lon`) and replace
    /// the chart.
    ///
    /// Returns `Ok(false)` when a newer query superseded this one. Failures
    /// raise an alert and leave the chart as it was.
    pub async fn query_point(&self, lat: f64, lon: f64) -> HydroResult<bool> {
        let (token, mode) = {
            let mut state = self.state.lock().await;
            if state.disposed {
                return Ok(false);
            }
            state.last_point = Some((lat, lon));
            (self.chart_token.issue(), state.mode)
        };
        debug!(token, lat, lon, mode = ?mode, "Querying time series");

        let result = match mode {
            Mode::Waves => {
                self.api
                    .timeseries_waves(lat, lon, mode.variable(), None, None)
                    .await
            }
            Mode::Temperature => {
                self.api
                    .timeseries_physics(lat, lon, mode.variable(), None, None)
                    .await
            }
        };

        let series = match result {
            Ok(series) => series,
            Err(e) => {
                let state = self.state.lock().await;
                if state.disposed || !self.chart_token.is_current(token) {
                    debug!(token, error = %e, "Discarding stale time series failure");
                    return Ok(false);
                }
                let message = format!("Time series request failed: {}", e);
                warn!(lat, lon, error = %e, "Time series request failed");
                self.presenter.alert(&message);
                return Err(e);
            }
        };

        let unit = series.unit_or(mode.fallback_unit());
        let last_value = format_last_value(&series.values);
        let points = series.len();
        let chart = LineChart::single_series(series.times_utc, series.values, &mode.series_label());

        let mut state = self.state.lock().await;
        if state.disposed || !self.chart_token.is_current(token) {
            debug!(token, "Discarding stale time series");
            return Ok(false);
        }
        state.series_title = Some(mode.title().to_string());
        state.unit = Some(unit);
        state.last_value = Some(last_value);
        if state.chart.replace(chart.clone()).is_some() {
            self.presenter.chart_disposed();
        }
        self.presenter.chart_replaced(&chart);
        info!(lat, lon, points, "Chart updated");
        Ok(true)
    }

    /// Show or hide the currents overlay; returns the new overlay state.
    ///
    /// Hiding clears the glyphs without a request and invalidates any
    /// fetch in flight.
    pub async fn toggle_currents(&self) -> HydroResult<OverlayState> {
        {
            let mut state = self.state.lock().await;
            if state.disposed {
                return Ok(state.overlay);
            }
            if state.overlay.is_visible() {
                self.overlay_token.issue();
                state.overlay = OverlayState::Hidden;
                state.glyphs.clear();
                info!("Currents overlay hidden");
                self.presenter.overlay_replaced(&[]);
                return Ok(OverlayState::Hidden);
            }
            state.overlay = OverlayState::VisibleStale;
        }

        self.refresh_currents().await?;
        Ok(self.state.lock().await.overlay)
    }

    /// Refetch the currents grid for the visible extent and rebuild the
    /// glyphs. Does nothing while the overlay is hidden.
    ///
    /// On failure the previous glyphs stay and the overlay stays stale.
    pub async fn refresh_currents(&self) -> HydroResult<bool> {
        let (token, request) = {
            let mut state = self.state.lock().await;
            if state.disposed || !state.overlay.is_visible() {
                return Ok(false);
            }
            state.overlay = OverlayState::VisibleStale;
            let extent = state.viewport.geographic_extent();
            (
                self.overlay_token.issue(),
                CurrentsGridRequest::from_extent(&extent, self.config.currents_step),
            )
        };
        debug!(token, ?request, "Fetching currents grid");

        let grid = match self.api.currents_grid(&request).await {
            Ok(grid) => grid,
            Err(e) => {
                warn!(
                    error = %e,
                    connection = e.is_connection_failure(),
                    "Currents grid request failed, keeping previous glyphs"
                );
                return Err(e);
            }
        };
        let glyphs = build_glyphs(&grid);

        let mut state = self.state.lock().await;
        if state.disposed || !state.overlay.is_visible() || !self.overlay_token.is_current(token) {
            debug!(token, "Discarding stale currents grid");
            return Ok(false);
        }
        state.glyphs = glyphs;
        state.overlay = OverlayState::VisibleFresh;
        info!(glyphs = state.glyphs.len(), cells = grid.nx() * grid.ny(), "Currents overlay updated");
        self.presenter.overlay_replaced(&state.glyphs);
        Ok(true)
    }

    /// React to a finished pan or zoom.
    pub async fn handle_view_moved(&self) -> HydroResult<bool> {
        {
            let state = self.state.lock().await;
            if !state.accepts_events() || !state.overlay.is_visible() {
                return Ok(false);
            }
        }
        self.refresh_currents().await
    }

    pub async fn set_center_lonlat(&self, lon: f64, lat: f64) -> HydroResult<bool> {
        self.state.lock().await.viewport.set_center_lon_lat(lon, lat);
        self.handle_view_moved().await
    }

    pub async fn set_zoom(&self, zoom: f64) -> HydroResult<bool> {
        if !zoom.is_finite() {
            return Err(HydroError::InvalidParameter {
                param: "zoom".to_string(),
                message: format!("{} is not a finite number", zoom),
            });
        }
        self.state.lock().await.viewport.set_zoom(zoom);
        self.handle_view_moved().await
    }

    pub async fn pan_by_pixels(&self, dx: f64, dy: f64) -> HydroResult<bool> {
        self.state.lock().await.viewport.pan_by_pixels(dx, dy);
        self.handle_view_moved().await
    }

    /// Recenter on `region` and reload WMTS, since layer choice depends
    /// on the region.
    pub async fn select_region(&self, region: RegionId) -> HydroResult<()> {
        {
            let mut state = self.state.lock().await;
            if state.disposed {
                return Ok(());
            }
            state.region = region;
            let (lon, lat) = region.region().center;
            state.viewport.set_center_lon_lat(lon, lat);
        }
        info!(region = %region, "Region selected");

        let wmts = self.reload_wmts().await;
        let moved = self.handle_view_moved().await;
        wmts?;
        moved.map(|_| ())
    }

    pub async fn set_mode(&self, mode: Mode) {
        self.state.lock().await.mode = mode;
        debug!(mode = ?mode, "Mode changed");
    }

    pub async fn set_layer_filter(&self, filter: &str) -> HydroResult<TileSource> {
        self.state.lock().await.layer_filter = filter.to_string();
        self.reload_wmts().await
    }

    /// Tiles of the installed source that cover the view. Without an
    /// explicit `matrix`, the one closest to the view resolution is used.
    pub async fn visible_tiles(&self, matrix: Option<&str>) -> HydroResult<Vec<TileRequest>> {
        let (source, viewport) = {
            let state = self.state.lock().await;
            (state.tile_source.clone(), state.viewport)
        };
        let source = source.ok_or_else(|| HydroError::InvalidParameter {
            param: "tile_source".to_string(),
            message: "no WMTS layer loaded".to_string(),
        })?;

        let matrix = match matrix {
            Some(m) => m.to_string(),
            None => source
                .tile_grid
                .matrix_for_resolution(viewport.resolution())
                .map(|m| m.identifier.clone())
                .ok_or_else(|| HydroError::MatrixSetNotFound(source.matrix_set.clone()))?,
        };
        source.tiles_for_extent(&viewport.extent(), &matrix)
    }

    /// Tear down the chart and ignore all further events.
    pub async fn dispose(&self) {
        let mut state = self.state.lock().await;
        if state.disposed {
            return;
        }
        state.disposed = true;
        self.chart_token.issue();
        self.overlay_token.issue();
        if state.chart.take().is_some() {
            self.presenter.chart_disposed();
        }
        info!("Map view disposed");
    }
}
