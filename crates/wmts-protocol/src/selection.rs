//! Layer and tile matrix set selection.

use hydromet_common::{HydroError, HydroResult};
use tracing::debug;

use crate::capabilities::{WmtsCapabilities, WmtsLayer};

/// Which rule picked the layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionReason {
    /// Identifier matched the filter and title or abstract named the region.
    VariableAndRegion,
    /// Identifier matched the filter.
    VariableOnly,
    /// Nothing matched; the first layer was taken.
    FirstListed,
}

#[derive(Debug, Clone)]
pub struct LayerSelection<'a> {
    pub layer: &'a WmtsLayer,
    pub reason: SelectionReason,
}

fn contains_upper(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|h| h.to_uppercase().contains(needle))
        .unwrap_or(false)
}

/// Pick the layer to display for `filter` (a variable name such as `VHM0`)
/// and a region title fragment such as `BALTIC`. Both match case-insensitively.
pub fn select_layer<'a>(
    layers: &'a [WmtsLayer],
    filter: &str,
    region_fragment: &str,
) -> HydroResult<LayerSelection<'a>> {
    let filter = filter.to_uppercase();
    let fragment = region_fragment.to_uppercase();

    let matches_filter = |l: &WmtsLayer| l.identifier.to_uppercase().contains(&filter);

    let picked = layers
        .iter()
        .find(|l| {
            matches_filter(l)
                && (contains_upper(l.title.as_deref(), &fragment)
                    || contains_upper(l.abstract_text.as_deref(), &fragment))
        })
        .map(|layer| LayerSelection {
            layer,
            reason: SelectionReason::VariableAndRegion,
        })
        .or_else(|| {
            layers.iter().find(|l| matches_filter(l)).map(|layer| LayerSelection {
                layer,
                reason: SelectionReason::VariableOnly,
            })
        })
        .or_else(|| {
            layers.first().map(|layer| LayerSelection {
                layer,
                reason: SelectionReason::FirstListed,
            })
        })
        .ok_or(HydroError::NoLayersFound)?;

    debug!(
        layer = %picked.layer.identifier,
        reason = ?picked.reason,
        "Selected WMTS layer"
    );
    Ok(picked)
}

/// The layer's first linked matrix set, else the first one in the document.
pub fn resolve_matrix_set(caps: &WmtsCapabilities, layer: &WmtsLayer) -> HydroResult<String> {
    layer
        .tile_matrix_set_links
        .first()
        .or_else(|| caps.tile_matrix_sets.first().map(|s| &s.identifier))
        .cloned()
        .ok_or_else(|| HydroError::MatrixSetNotFound(format!("no matrix set for layer {}", layer.identifier)))
}
