//! Observable state of the map view.

use clap::ValueEnum;
use hydromet_client::{DEFAULT_PHYSICS_VARIABLE, DEFAULT_WAVES_VARIABLE};
use hydromet_common::RegionId;
use projection::Viewport;
use renderer::{CurrentGlyph, LineChart};
use serde::Serialize;
use wmts_protocol::{TileSource, WmtsLayer};

use crate::config::ViewerConfig;

/// Which time series a click queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Waves,
    Temperature,
}

impl Mode {
    /// Backend variable queried in this mode.
    pub fn variable(self) -> &'static str {
        match self {
            Mode::Waves => DEFAULT_WAVES_VARIABLE,
            Mode::Temperature => DEFAULT_PHYSICS_VARIABLE,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Mode::Waves => "Waves: VHM0 (significant height)",
            Mode::Temperature => "Sea surface temperature (thetao)",
        }
    }

    /// Unit shown when the backend leaves it out.
    pub fn fallback_unit(self) -> &'static str {
        match self {
            Mode::Waves => "m",
            Mode::Temperature => "°C",
        }
    }

    /// Dataset label of the chart series.
    pub fn series_label(self) -> String {
        format!("{} ({})", self.variable(), self.fallback_unit())
    }
}

/// Lifecycle of the currents overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum OverlayState {
    #[default]
    Hidden,
    /// Visible, glyphs may not match the current view.
    VisibleStale,
    VisibleFresh,
}

impl OverlayState {
    pub fn is_visible(self) -> bool {
        !matches!(self, OverlayState::Hidden)
    }
}

/// Snapshot of everything the view shows.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub mode: Mode,
    pub region: RegionId,
    pub layer_filter: String,
    pub viewport: Viewport,

    /// Last clicked point as (lat, lon).
    pub last_point: Option<(f64, f64)>,
    pub series_title: Option<String>,
    pub last_value: Option<String>,
    pub unit: Option<String>,
    pub chart: Option<LineChart>,

    pub api_online: bool,
    pub status_text: String,

    pub overlay: OverlayState,
    pub glyphs: Vec<CurrentGlyph>,

    pub layers: Vec<WmtsLayer>,
    pub selected_layer: Option<String>,
    pub tile_source: Option<TileSource>,

    /// Set once interaction handling is registered.
    pub interactive: bool,
    pub disposed: bool,
}

impl ViewState {
    pub fn new(config: &ViewerConfig) -> Self {
        let (lon, lat) = config.region.region().center;
        Self {
            mode: Mode::default(),
            region: config.region,
            layer_filter: config.layer_filter.clone(),
            viewport: Viewport::centered_on(lon, lat, config.zoom, config.width, config.height),
            last_point: None,
            series_title: None,
            last_value: None,
            unit: None,
            chart: None,
            api_online: false,
            status_text: String::new(),
            overlay: OverlayState::Hidden,
            glyphs: Vec::new(),
            layers: Vec::new(),
            selected_layer: None,
            tile_source: None,
            interactive: false,
            disposed: false,
        }
    }

    /// Events are handled only between initialization and disposal.
    pub fn accepts_events(&self) -> bool {
        self.interactive && !self.disposed
    }
}
