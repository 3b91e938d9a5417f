//! Request and response bodies of the backend API.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use hydromet_common::time::serialize_opt_utc;
use hydromet_common::BoundingBox;
use serde::{Deserialize, Serialize};

pub const DEFAULT_WAVES_VARIABLE: &str = "VHM0";
pub const DEFAULT_PHYSICS_VARIABLE: &str = "thetao";
pub const DEFAULT_CURRENTS_STEP: u32 = 8;

/// Backend dataset family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    Waves,
    Physics,
}

/// Body of `POST /api/timeseries`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesQuery {
    pub dataset: Dataset,
    pub variable: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_opt_utc"
    )]
    pub start_utc: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_opt_utc"
    )]
    pub end_utc: Option<DateTime<Utc>>,
}

impl TimeSeriesQuery {
    pub fn waves(lat: f64, lon: f64) -> Self {
        Self::new(Dataset::Waves, DEFAULT_WAVES_VARIABLE, lat, lon)
    }

    pub fn physics(lat: f64, lon: f64) -> Self {
        Self::new(Dataset::Physics, DEFAULT_PHYSICS_VARIABLE, lat, lon)
    }

    pub fn new(dataset: Dataset, variable: &str, lat: f64, lon: f64) -> Self {
        Self {
            dataset,
            variable: variable.to_string(),
            lat,
            lon,
            start_utc: None,
            end_utc: None,
        }
    }

    pub fn with_range(mut self, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        self.start_utc = start;
        self.end_utc = end;
        self
    }
}

/// Body of `POST /api/ice-timeseries`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IceTimeSeriesRequest {
    pub lat: f64,
    pub lon: f64,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_opt_utc"
    )]
    pub start_utc: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_opt_utc"
    )]
    pub end_utc: Option<DateTime<Utc>>,
}

impl IceTimeSeriesRequest {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            start_utc: None,
            end_utc: None,
        }
    }
}

/// Body of `POST /api/currents-grid`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentsGridRequest {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
    pub step: u32,
}

impl CurrentsGridRequest {
    /// Request covering a geographic extent (x = lon, y = lat).
    pub fn from_extent(extent: &BoundingBox, step: u32) -> Self {
        Self {
            min_lat: extent.min_y,
            min_lon: extent.min_x,
            max_lat: extent.max_y,
            max_lon: extent.max_x,
            step,
        }
    }
}

/// `GET /health` response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Dataset family (`waves`, `physics`, ...) to dataset id.
    #[serde(default)]
    pub datasets: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub wmts: Option<String>,
    #[serde(default)]
    pub cm_user: Option<serde_json::Value>,
}

impl HealthStatus {
    /// Dataset id for a family, rendered as text. Missing entries render as
    /// `undefined`, matching what the web frontend showed.
    pub fn dataset_label(&self, family: &str) -> String {
        match self.datasets.get(family) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Null) | None => "undefined".to_string(),
            Some(other) => other.to_string(),
        }
    }

    /// Status line shown when the backend is reachable.
    pub fn status_text(&self) -> String {
        format!(
            "OK (waves={}, phy={})",
            self.dataset_label("waves"),
            self.dataset_label("physics")
        )
    }
}
