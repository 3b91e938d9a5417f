//! Tile source options derived from capabilities.

use std::collections::{BTreeMap, HashMap};

use hydromet_common::{BoundingBox, HydroError, HydroResult};
use serde::Serialize;
use tracing::{debug, info};

use crate::capabilities::{WmtsCapabilities, WmtsLayer};
use crate::template::{expand_placeholders, fill_proxy_template};
use crate::tile_matrix::TileMatrix;

const DEFAULT_STYLE: &str = "default";
const DEFAULT_FORMAT: &str = "image/png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestEncoding {
    /// Query-string requests against an operation endpoint.
    Kvp,
    /// URL templates with `{TileMatrix}`-style placeholders.
    Rest,
}

/// Tile matrices of the chosen set plus the unit conversion for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileGrid {
    pub matrices: Vec<TileMatrix>,
    pub meters_per_unit: f64,
}

impl TileGrid {
    pub fn matrix(&self, identifier: &str) -> Option<&TileMatrix> {
        self.matrices.iter().find(|m| m.identifier == identifier)
    }

    /// CRS units per pixel, one per matrix in order.
    pub fn resolutions(&self) -> Vec<f64> {
        self.matrices
            .iter()
            .map(|m| m.resolution(self.meters_per_unit))
            .collect()
    }

    /// Matrix whose resolution is closest to `resolution` on a log scale.
    pub fn matrix_for_resolution(&self, resolution: f64) -> Option<&TileMatrix> {
        if !(resolution.is_finite() && resolution > 0.0) {
            return None;
        }
        let target = resolution.ln();
        self.matrices.iter().min_by(|a, b| {
            let da = (a.resolution(self.meters_per_unit).ln() - target).abs();
            let db = (b.resolution(self.meters_per_unit).ln() - target).abs();
            da.total_cmp(&db)
        })
    }
}

/// One tile to fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileRequest {
    pub matrix: String,
    pub row: u32,
    pub col: u32,
    pub url: String,
}

/// Everything needed to request tiles of one layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileSource {
    pub layer: String,
    pub matrix_set: String,
    pub style: String,
    pub format: String,
    pub request_encoding: RequestEncoding,
    pub urls: Vec<String>,
    pub crs: Option<String>,
    pub tile_grid: TileGrid,
    /// Dimension identifier to default value.
    pub dimensions: BTreeMap<String, String>,
}

/// Derive tile source options for `layer_id` in `matrix_set`.
pub fn options_from_capabilities(
    caps: &WmtsCapabilities,
    layer_id: &str,
    matrix_set: &str,
) -> HydroResult<TileSource> {
    let layer = caps.layer(layer_id).ok_or_else(|| HydroError::InvalidParameter {
        param: "layer".to_string(),
        message: format!("layer {} not in capabilities", layer_id),
    })?;
    let set = caps
        .tile_matrix_set(matrix_set)
        .ok_or_else(|| HydroError::MatrixSetNotFound(matrix_set.to_string()))?;

    let style = layer
        .default_style()
        .map(|s| s.identifier.clone())
        .unwrap_or_else(|| DEFAULT_STYLE.to_string());
    let format = layer
        .formats
        .first()
        .cloned()
        .unwrap_or_else(|| DEFAULT_FORMAT.to_string());

    let kvp_urls: Vec<String> = caps
        .get_tile_endpoints
        .iter()
        .filter(|e| e.supports_kvp())
        .map(|e| e.href.clone())
        .collect();

    let (request_encoding, urls) = if !kvp_urls.is_empty() {
        (RequestEncoding::Kvp, kvp_urls)
    } else {
        (RequestEncoding::Rest, rest_templates(layer, &format))
    };

    let dimensions = layer
        .dimensions
        .iter()
        .map(|d| (d.identifier.clone(), d.default.clone().unwrap_or_default()))
        .collect();

    debug!(
        layer = %layer.identifier,
        matrix_set = %set.identifier,
        encoding = ?request_encoding,
        urls = urls.len(),
        "Derived WMTS tile source"
    );

    Ok(TileSource {
        layer: layer.identifier.clone(),
        matrix_set: set.identifier.clone(),
        style,
        format,
        request_encoding,
        urls,
        crs: set.supported_crs.clone(),
        tile_grid: TileGrid {
            matrices: set.tile_matrices.clone(),
            meters_per_unit: set.meters_per_unit(),
        },
        dimensions,
    })
}

/// Tile resource templates for `format`; all tile templates when none match.
fn rest_templates(layer: &WmtsLayer, format: &str) -> Vec<String> {
    let matching: Vec<String> = layer
        .tile_resource_urls()
        .filter(|r| r.format.as_deref() == Some(format))
        .map(|r| r.template.clone())
        .collect();
    if !matching.is_empty() {
        return matching;
    }
    layer.tile_resource_urls().map(|r| r.template.clone()).collect()
}

impl TileSource {
    /// Route tiles through the backend proxy `template`.
    ///
    /// Layer, style, format and matrix set are baked into a single URL, using
    /// the layer's first listed style and format, and the source switches to
    /// RESTful templating for the remaining placeholders. Sources without
    /// URLs are returned unchanged.
    pub fn with_proxy(mut self, template: &str, layer: &WmtsLayer) -> TileSource {
        if self.urls.is_empty() {
            return self;
        }
        let style = layer
            .styles
            .first()
            .map(|s| s.identifier.as_str())
            .unwrap_or(DEFAULT_STYLE);
        let format = layer
            .formats
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_FORMAT);

        let url = fill_proxy_template(template, &self.layer, style, format, &self.matrix_set);
        info!(layer = %self.layer, url = %url, "Proxying WMTS tiles through backend");
        self.urls = vec![url];
        self.request_encoding = RequestEncoding::Rest;
        self
    }

    /// URL of one tile. With several URLs, tiles are spread across them.
    pub fn tile_url(&self, matrix: &str, row: u32, col: u32) -> Option<String> {
        if self.urls.is_empty() {
            return None;
        }
        let base = &self.urls[(row as usize + col as usize) % self.urls.len()];

        Some(match self.request_encoding {
            RequestEncoding::Rest => {
                let mut values: HashMap<String, String> = self
                    .dimensions
                    .iter()
                    .map(|(k, v)| (k.to_lowercase(), v.clone()))
                    .collect();
                values.insert("layer".to_string(), self.layer.clone());
                values.insert("style".to_string(), self.style.clone());
                values.insert("tilematrixset".to_string(), self.matrix_set.clone());
                values.insert("tilematrix".to_string(), matrix.to_string());
                values.insert("tilerow".to_string(), row.to_string());
                values.insert("tilecol".to_string(), col.to_string());
                expand_placeholders(base, &values)
            }
            RequestEncoding::Kvp => self.kvp_url(base, matrix, row, col),
        })
    }

    fn kvp_url(&self, base: &str, matrix: &str, row: u32, col: u32) -> String {
        let mut params = vec![
            ("SERVICE".to_string(), "WMTS".to_string()),
            ("REQUEST".to_string(), "GetTile".to_string()),
            ("VERSION".to_string(), "1.0.0".to_string()),
            ("LAYER".to_string(), self.layer.clone()),
            ("STYLE".to_string(), self.style.clone()),
            ("FORMAT".to_string(), self.format.clone()),
            ("TILEMATRIXSET".to_string(), self.matrix_set.clone()),
            ("TILEMATRIX".to_string(), matrix.to_string()),
            ("TILEROW".to_string(), row.to_string()),
            ("TILECOL".to_string(), col.to_string()),
        ];
        for (name, value) in &self.dimensions {
            params.push((name.clone(), value.clone()));
        }

        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let sep = if base.ends_with('?') || base.ends_with('&') {
            ""
        } else if base.contains('?') {
            "&"
        } else {
            "?"
        };
        format!("{}{}{}", base, sep, query)
    }

    /// Tiles of `matrix` intersecting `extent` (in the source CRS), row-major.
    pub fn tiles_for_extent(
        &self,
        extent: &BoundingBox,
        matrix: &str,
    ) -> HydroResult<Vec<TileRequest>> {
        let tm = self
            .tile_grid
            .matrix(matrix)
            .ok_or_else(|| HydroError::InvalidParameter {
                param: "matrix".to_string(),
                message: format!("{} is not a matrix of {}", matrix, self.matrix_set),
            })?;

        let Some(((col_min, col_max), (row_min, row_max))) =
            tm.tile_range(extent, self.tile_grid.meters_per_unit)
        else {
            return Ok(Vec::new());
        };

        let mut tiles = Vec::new();
        for row in row_min..=row_max {
            for col in col_min..=col_max {
                if let Some(url) = self.tile_url(matrix, row, col) {
                    tiles.push(TileRequest {
                        matrix: matrix.to_string(),
                        row,
                        col,
                        url,
                    });
                }
            }
        }
        Ok(tiles)
    }
}
