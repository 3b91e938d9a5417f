//! Terminal presenter and table formatting for the CLI.

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use renderer::chart::NO_VALUE;
use renderer::{CurrentGlyph, LineChart};
use tracing::{info, warn};
use wmts_protocol::{TileRequest, TileSource, WmtsLayer};

use crate::presenter::Presenter;

/// Presents view updates as log lines, and charts as tables on stdout.
#[derive(Debug, Default)]
pub struct TerminalPresenter {
    print_charts: bool,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also print every replaced chart.
    pub fn with_charts(mut self) -> Self {
        self.print_charts = true;
        self
    }
}

impl Presenter for TerminalPresenter {
    fn status_changed(&self, online: bool, text: &str) {
        if online {
            info!(status = %text, "API status");
        } else {
            warn!(status = %text, "API status");
        }
    }

    fn raster_source_changed(&self, source: &TileSource) {
        info!(
            layer = %source.layer,
            style = %source.style,
            format = %source.format,
            urls = source.urls.len(),
            "Raster source replaced"
        );
    }

    fn overlay_replaced(&self, glyphs: &[CurrentGlyph]) {
        info!(glyphs = glyphs.len(), "Currents overlay replaced");
    }

    fn chart_replaced(&self, chart: &LineChart) {
        info!(points = chart.point_count(), "Chart replaced");
        if self.print_charts {
            println!("{}", chart_table(chart));
        }
    }

    fn chart_disposed(&self) {}

    fn alert(&self, message: &str) {
        eprintln!("{}", message);
    }
}

fn styled_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).apply_modifier(UTF8_ROUND_CORNERS);
    table
}

fn format_value(v: f64) -> String {
    if v.is_finite() {
        format!("{:.2}", v)
    } else {
        NO_VALUE.to_string()
    }
}

/// One row per x-axis tick, one column per series, then the value range.
pub fn chart_table(chart: &LineChart) -> String {
    let mut table = styled_table();
    let mut header = vec!["Time (UTC)".to_string()];
    header.extend(chart.series.iter().map(|s| s.label.clone()));
    table.set_header(header);

    for (i, label) in chart.tick_labels() {
        let mut row = vec![label.to_string()];
        row.extend(chart.series.iter().map(|s| {
            s.values
                .get(i)
                .map(|v| format_value(*v))
                .unwrap_or_else(|| NO_VALUE.to_string())
        }));
        table.add_row(row);
    }

    let range = match chart.value_range() {
        Some((lo, hi)) => format!("{:.2} .. {:.2}", lo, hi),
        None => NO_VALUE.to_string(),
    };
    table.add_row(vec!["Range".to_string(), range]);
    table.to_string()
}

/// Parsed layers, marking `selected`.
pub fn layers_table(layers: &[WmtsLayer], selected: Option<&str>) -> String {
    let mut table = styled_table();
    table.set_header(vec!["", "Identifier", "Title", "Formats", "Matrix sets"]);
    for layer in layers {
        let mark = if Some(layer.identifier.as_str()) == selected {
            "*"
        } else {
            ""
        };
        table.add_row(vec![
            mark.to_string(),
            layer.identifier.clone(),
            layer.title.clone().unwrap_or_default(),
            layer.formats.join(", "),
            layer.tile_matrix_set_links.join(", "),
        ]);
    }
    table.to_string()
}

pub fn tiles_table(tiles: &[TileRequest]) -> String {
    let mut table = styled_table();
    table.set_header(vec!["Matrix", "Row", "Col", "URL"]);
    for tile in tiles {
        table.add_row(vec![
            tile.matrix.clone(),
            tile.row.to_string(),
            tile.col.to_string(),
            tile.url.clone(),
        ]);
    }
    table.to_string()
}
