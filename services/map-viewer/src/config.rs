//! Viewer configuration.
//!
//! Settings come from command-line flags with environment fallbacks (a
//! `.env` file is loaded first by the binary) and resolve into a
//! [`ViewerConfig`] owned by the controller.

use clap::Args;
use hydromet_client::{DEFAULT_API_URL, DEFAULT_CURRENTS_STEP, DEFAULT_WAVES_VARIABLE};
use hydromet_common::{HydroError, HydroResult, RegionId};

pub const DEFAULT_ZOOM: f64 = 5.0;
pub const DEFAULT_WIDTH: u32 = 1024;
pub const DEFAULT_HEIGHT: u32 = 768;

/// Resolved viewer settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub api_url: String,
    pub region: RegionId,
    /// Substring the WMTS layer identifier must contain.
    pub layer_filter: String,
    pub zoom: f64,
    /// Viewport size in pixels.
    pub width: u32,
    pub height: u32,
    /// Grid decimation passed to the currents endpoint.
    pub currents_step: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            region: RegionId::default(),
            layer_filter: DEFAULT_WAVES_VARIABLE.to_string(),
            zoom: DEFAULT_ZOOM,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            currents_step: DEFAULT_CURRENTS_STEP,
        }
    }
}

impl ViewerConfig {
    pub fn validate(&self) -> HydroResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(HydroError::InvalidParameter {
                param: "width/height".to_string(),
                message: format!("viewport must be non-empty, got {}x{}", self.width, self.height),
            });
        }
        if self.currents_step == 0 {
            return Err(HydroError::InvalidParameter {
                param: "currents_step".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if !self.zoom.is_finite() {
            return Err(HydroError::InvalidParameter {
                param: "zoom".to_string(),
                message: format!("{} is not a finite number", self.zoom),
            });
        }
        Ok(())
    }
}

/// Command-line flags shared by all subcommands.
#[derive(Args, Debug, Clone)]
pub struct ViewerArgs {
    /// Backend base URL
    #[arg(long, env = "HYDROMETEO_API", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Region to center the map on
    #[arg(long, env = "HYDROMETEO_REGION", default_value = "baltic")]
    pub region: RegionId,

    /// WMTS layer identifier filter
    #[arg(long, env = "HYDROMETEO_LAYER_FILTER", default_value = DEFAULT_WAVES_VARIABLE)]
    pub layer_filter: String,

    /// Initial zoom level
    #[arg(long, default_value_t = DEFAULT_ZOOM)]
    pub zoom: f64,

    /// Viewport width in pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// Currents grid step
    #[arg(long, default_value_t = DEFAULT_CURRENTS_STEP)]
    pub currents_step: u32,
}

impl ViewerArgs {
    /// Resolve into a validated config. A blank base URL falls back to
    /// [`DEFAULT_API_URL`].
    pub fn into_config(self) -> HydroResult<ViewerConfig> {
        let api_url = match self.api_url.trim().trim_end_matches('/') {
            "" => DEFAULT_API_URL.to_string(),
            url => url.to_string(),
        };
        let config = ViewerConfig {
            api_url,
            region: self.region,
            layer_filter: self.layer_filter,
            zoom: self.zoom,
            width: self.width,
            height: self.height,
            currents_step: self.currents_step,
        };
        config.validate()?;
        Ok(config)
    }
}
