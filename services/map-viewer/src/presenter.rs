//! Output side of the controller.

use renderer::{CurrentGlyph, LineChart};
use wmts_protocol::TileSource;

/// Receives view updates from [`crate::MapController`].
///
/// Calls are made while the controller holds its state lock, in the order
/// the updates were applied. Implementations must not call back into the
/// controller.
pub trait Presenter: Send + Sync {
    fn status_changed(&self, online: bool, text: &str);

    fn raster_source_changed(&self, source: &TileSource);

    /// The overlay now shows exactly `glyphs`; empty means cleared.
    fn overlay_replaced(&self, glyphs: &[CurrentGlyph]);

    fn chart_replaced(&self, chart: &LineChart);

    fn chart_disposed(&self);

    /// Blocking user notification.
    fn alert(&self, message: &str);
}
