//! UTC timestamp helpers for request bounds.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Serializer;

use crate::{HydroError, HydroResult};

/// Format as `YYYY-MM-DDTHH:MM:SSZ`, the form the backend expects.
pub fn format_utc(t: &DateTime<Utc>) -> String {
    t.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Parse an ISO 8601 timestamp. Values without an offset are taken as UTC,
/// and a bare date means midnight.
pub fn parse_utc(s: &str) -> HydroResult<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&ndt));
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(ndt) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&ndt));
        }
    }

    Err(HydroError::InvalidParameter {
        param: "time".to_string(),
        message: format!("not an ISO 8601 timestamp: {}", s),
    })
}

/// Serde `serialize_with` for optional UTC bounds.
pub fn serialize_opt_utc<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(t) => serializer.serialize_str(&format_utc(t)),
        None => serializer.serialize_none(),
    }
}
