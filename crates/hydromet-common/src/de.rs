//! Serde helpers for backend payloads.

use serde::{Deserialize, Deserializer};

/// Decode a JSON array of numbers where `null` stands for a missing sample.
///
/// Missing samples become NaN so they stay index-aligned with their
/// neighbours and fail `is_finite` checks downstream.
pub(crate) fn nullable_f64_vec<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<Option<f64>> = Vec::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}
