//! Scripted backend and recording presenter for controller tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use hydromet_client::{
    CurrentsGridRequest, HealthStatus, HydroMeteoApi, IceTimeSeriesRequest, TimeSeriesQuery,
};
use hydromet_common::{CurrentGrid, HydroError, HydroResult, TimeSeries};
use map_viewer::{MapController, Presenter, ViewerConfig};
use renderer::{CurrentGlyph, LineChart};
use test_utils::fixtures::{CAPABILITIES_KVP, HEALTH_BODY};
use test_utils::{hourly_series, uniform_current_grid};
use tokio::sync::oneshot;
use wmts_protocol::TileSource;

pub const PROXY_TEMPLATE: &str = "http://backend.test/wmts/tile?SERVICE=WMTS&REQUEST=GetTile&VERSION=1.0.0&Layer={Layer}&Style={Style}&Format={Format}&TileMatrixSet={TileMatrixSet}&TileMatrix={TileMatrix}&TileRow={TileRow}&TileCol={TileCol}&Time={Time}";

// ============================================================================
// Gates
// ============================================================================

/// Held by the fake: signals arrival, then waits for release.
struct Gate {
    entered: oneshot::Sender<()>,
    release: oneshot::Receiver<()>,
}

/// Held by the test.
pub struct GateHandle {
    pub entered: oneshot::Receiver<()>,
    pub release: oneshot::Sender<()>,
}

impl GateHandle {
    /// Wait until the request reached the fake.
    pub async fn wait_entered(&mut self) {
        (&mut self.entered).await.unwrap();
    }

    pub fn open(self) {
        self.release.send(()).unwrap();
    }
}

fn gate() -> (Gate, GateHandle) {
    let (entered_tx, entered_rx) = oneshot::channel();
    let (release_tx, release_rx) = oneshot::channel();
    (
        Gate {
            entered: entered_tx,
            release: release_rx,
        },
        GateHandle {
            entered: entered_rx,
            release: release_tx,
        },
    )
}

struct Scripted<T> {
    result: HydroResult<T>,
    gate: Option<Gate>,
}

async fn deliver<T>(scripted: Scripted<T>) -> HydroResult<T> {
    if let Some(gate) = scripted.gate {
        let _ = gate.entered.send(());
        let _ = gate.release.await;
    }
    scripted.result
}

// ============================================================================
// Fake backend
// ============================================================================

pub struct FakeApi {
    healthy: AtomicBool,
    capabilities: Mutex<Option<String>>,
    series: Mutex<VecDeque<Scripted<TimeSeries>>>,
    grids: Mutex<VecDeque<Scripted<CurrentGrid>>>,

    pub health_calls: AtomicUsize,
    pub capabilities_calls: AtomicUsize,
    pub series_calls: AtomicUsize,
    pub grid_calls: AtomicUsize,

    pub last_query: Mutex<Option<TimeSeriesQuery>>,
    pub last_grid_request: Mutex<Option<CurrentsGridRequest>>,
}

impl FakeApi {
    /// Healthy backend serving [`CAPABILITIES_KVP`].
    pub fn new() -> Self {
        Self {
            healthy: AtomicBool::new(true),
            capabilities: Mutex::new(Some(CAPABILITIES_KVP.to_string())),
            series: Mutex::new(VecDeque::new()),
            grids: Mutex::new(VecDeque::new()),
            health_calls: AtomicUsize::new(0),
            capabilities_calls: AtomicUsize::new(0),
            series_calls: AtomicUsize::new(0),
            grid_calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
            last_grid_request: Mutex::new(None),
        }
    }

    pub fn offline(self) -> Self {
        self.healthy.store(false, Ordering::SeqCst);
        self
    }

    /// `None` makes the capabilities endpoint fail with a 502.
    pub fn with_capabilities(self, xml: Option<&str>) -> Self {
        *self.capabilities.lock().unwrap() = xml.map(str::to_string);
        self
    }

    pub fn push_series(&self, result: HydroResult<TimeSeries>) {
        self.series
            .lock()
            .unwrap()
            .push_back(Scripted { result, gate: None });
    }

    pub fn push_series_gated(&self, result: HydroResult<TimeSeries>) -> GateHandle {
        let (gate, handle) = gate();
        self.series.lock().unwrap().push_back(Scripted {
            result,
            gate: Some(gate),
        });
        handle
    }

    pub fn push_grid(&self, result: HydroResult<CurrentGrid>) {
        self.grids
            .lock()
            .unwrap()
            .push_back(Scripted { result, gate: None });
    }

    pub fn push_grid_gated(&self, result: HydroResult<CurrentGrid>) -> GateHandle {
        let (gate, handle) = gate();
        self.grids.lock().unwrap().push_back(Scripted {
            result,
            gate: Some(gate),
        });
        handle
    }

    pub fn series_calls(&self) -> usize {
        self.series_calls.load(Ordering::SeqCst)
    }

    pub fn grid_calls(&self) -> usize {
        self.grid_calls.load(Ordering::SeqCst)
    }

    pub fn capabilities_calls(&self) -> usize {
        self.capabilities_calls.load(Ordering::SeqCst)
    }

    fn next_series(&self) -> Scripted<TimeSeries> {
        self.series.lock().unwrap().pop_front().unwrap_or(Scripted {
            result: Ok(hourly_series(&[0.5, 0.75], Some("m"))),
            gate: None,
        })
    }

    fn next_grid(&self) -> Scripted<CurrentGrid> {
        self.grids.lock().unwrap().pop_front().unwrap_or(Scripted {
            result: Ok(uniform_current_grid(3, 3, 19.0, 58.0, 1.0, 0.2, 0.1)),
            gate: None,
        })
    }
}

#[async_trait]
impl HydroMeteoApi for FakeApi {
    async fn health(&self) -> HydroResult<HealthStatus> {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        if self.healthy.load(Ordering::SeqCst) {
            Ok(serde_json::from_str(HEALTH_BODY)?)
        } else {
            Err(HydroError::Transport("connection refused".to_string()))
        }
    }

    async fn timeseries(&self, query: &TimeSeriesQuery) -> HydroResult<TimeSeries> {
        self.series_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());
        let scripted = self.next_series();
        deliver(scripted).await
    }

    async fn ice_timeseries(&self, _request: &IceTimeSeriesRequest) -> HydroResult<TimeSeries> {
        Ok(hourly_series(&[87.5], Some("%")))
    }

    async fn currents_grid(&self, request: &CurrentsGridRequest) -> HydroResult<CurrentGrid> {
        self.grid_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_grid_request.lock().unwrap() = Some(request.clone());
        let scripted = self.next_grid();
        deliver(scripted).await
    }

    async fn wmts_capabilities(&self) -> HydroResult<String> {
        self.capabilities_calls.fetch_add(1, Ordering::SeqCst);
        let xml = self.capabilities.lock().unwrap().clone();
        xml.ok_or_else(|| HydroError::Http {
            status: 502,
            body: "upstream WMTS unavailable".to_string(),
        })
    }

    fn wmts_tile_url_template(&self) -> String {
        PROXY_TEMPLATE.to_string()
    }
}

// ============================================================================
// Recording presenter
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Status(bool, String),
    RasterSource(String),
    Overlay(usize),
    Chart { points: usize, label: String },
    ChartDisposed,
    Alert(String),
}

#[derive(Default)]
pub struct RecordingPresenter {
    events: Mutex<Vec<Event>>,
    dispose_pause: Mutex<Option<Duration>>,
    dispose_entered: AtomicBool,
}

impl RecordingPresenter {
    /// Block the calling thread for `pause` inside the next `chart_disposed`.
    pub fn pause_next_dispose(&self, pause: Duration) {
        *self.dispose_pause.lock().unwrap() = Some(pause);
    }

    pub fn dispose_entered(&self) -> bool {
        self.dispose_entered.load(Ordering::SeqCst)
    }

    /// Point counts of every chart shown, in order.
    pub fn chart_points(&self) -> Vec<usize> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                Event::Chart { points, .. } => Some(*points),
                _ => None,
            })
            .collect()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| pred(e)).count()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl Presenter for RecordingPresenter {
    fn status_changed(&self, online: bool, text: &str) {
        self.push(Event::Status(online, text.to_string()));
    }

    fn raster_source_changed(&self, source: &TileSource) {
        self.push(Event::RasterSource(source.layer.clone()));
    }

    fn overlay_replaced(&self, glyphs: &[CurrentGlyph]) {
        self.push(Event::Overlay(glyphs.len()));
    }

    fn chart_replaced(&self, chart: &LineChart) {
        self.push(Event::Chart {
            points: chart.point_count(),
            label: chart.series[0].label.clone(),
        });
    }

    fn chart_disposed(&self) {
        self.dispose_entered.store(true, Ordering::SeqCst);
        let pause = self.dispose_pause.lock().unwrap().take();
        if let Some(pause) = pause {
            std::thread::sleep(pause);
        }
        self.push(Event::ChartDisposed);
    }

    fn alert(&self, message: &str) {
        self.push(Event::Alert(message.to_string()));
    }
}

// ============================================================================
// Setup
// ============================================================================

pub struct Harness {
    pub api: Arc<FakeApi>,
    pub presenter: Arc<RecordingPresenter>,
    pub controller: Arc<MapController>,
}

pub fn harness(api: FakeApi) -> Harness {
    let api = Arc::new(api);
    let presenter = Arc::new(RecordingPresenter::default());
    let controller = Arc::new(MapController::new(
        api.clone(),
        presenter.clone(),
        ViewerConfig::default(),
    ));
    Harness {
        api,
        presenter,
        controller,
    }
}

/// Harness that already ran `initialize` against a healthy backend.
pub async fn initialized() -> Harness {
    let h = harness(FakeApi::new());
    h.controller.initialize().await.unwrap();
    h
}
