//! Error types for the hydrometeorological viewer.

use thiserror::Error;

/// Result type alias using HydroError.
pub type HydroResult<T> = Result<T, HydroError>;

/// Primary error type shared by the client, protocol and controller crates.
#[derive(Debug, Error)]
pub enum HydroError {
    // === Transport Errors ===
    #[error("{status}: {body}")]
    Http { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(String),

    // === Payload Errors ===
    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    // === WMTS Errors ===
    #[error("Invalid WMTS capabilities: {0}")]
    CapabilitiesParse(String),

    #[error("WMTS: no layers found")]
    NoLayersFound,

    #[error("WMTS: tile matrix set not found: {0}")]
    MatrixSetNotFound(String),

    // === Request Errors ===
    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    // === Rendering Errors ===
    #[error("Rendering failed: {0}")]
    Render(String),
}

impl HydroError {
    /// HTTP status carried by the error, if it came from a backend response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            HydroError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the error happened before any response was received.
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, HydroError::Transport(_))
    }
}

impl From<serde_json::Error> for HydroError {
    fn from(err: serde_json::Error) -> Self {
        HydroError::Decode(format!("JSON error: {}", err))
    }
}
