//! Point time series returned by the backend.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{HydroError, HydroResult};

/// A time series at a single point: timestamps and values are index-aligned.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawTimeSeries")]
pub struct TimeSeries {
    /// ISO 8601 UTC timestamps, in the order the backend produced them.
    pub times_utc: Vec<String>,

    /// One value per timestamp; missing samples are NaN.
    pub values: Vec<f64>,

    pub unit: Option<String>,
}

/// Wire shape of both series endpoints. The ice endpoint names its values
/// `siconc` and reports units per variable.
#[derive(Deserialize)]
struct RawTimeSeries {
    times_utc: Vec<String>,
    #[serde(alias = "siconc", deserialize_with = "crate::de::nullable_f64_vec")]
    values: Vec<f64>,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    units: BTreeMap<String, String>,
}

impl From<RawTimeSeries> for TimeSeries {
    fn from(mut raw: RawTimeSeries) -> Self {
        let unit = raw.unit.or_else(|| raw.units.remove("siconc"));
        Self {
            times_utc: raw.times_utc,
            values: raw.values,
            unit,
        }
    }
}

impl TimeSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The most recent value, if any.
    pub fn last_value(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Backend unit, or `fallback` when the backend sent none or an empty one.
    pub fn unit_or(&self, fallback: &str) -> String {
        match self.unit.as_deref() {
            Some(u) if !u.trim().is_empty() => u.to_string(),
            _ => fallback.to_string(),
        }
    }

    /// Check that timestamps and values line up.
    pub fn validate(&self) -> HydroResult<()> {
        if self.times_utc.len() != self.values.len() {
            return Err(HydroError::InvalidResponse(format!(
                "time series has {} timestamps but {} values",
                self.times_utc.len(),
                self.values.len()
            )));
        }
        Ok(())
    }
}
