//! Rendering for the map viewer.
//!
//! Implements:
//! - Current glyphs (regular triangles sized by speed)
//! - Line chart model for point time series
//! - Overlay rasterization with tiny-skia
//! - PNG encoding (indexed or RGBA)

pub mod chart;
pub mod currents;
pub mod overlay;
pub mod png;

pub use chart::{format_last_value, ChartSeries, LineChart};
pub use currents::{build_glyphs, CurrentGlyph, GlyphStyle};
pub use overlay::{encode_overlay_png, render_overlay};
