//! OGC WMTS 1.0.0 client-side protocol support.
//!
//! Supports:
//! - Parsing GetCapabilities documents (layers, tile matrix sets, GetTile endpoints)
//! - Picking a layer for a variable and region
//! - Deriving tile source options and resolving tile URLs (KVP and RESTful)

pub mod capabilities;
pub mod selection;
pub mod source;
pub mod template;
pub mod tile_matrix;

pub use capabilities::{
    parse_capabilities, OperationEndpoint, ResourceUrl, WmtsCapabilities, WmtsDimension,
    WmtsLayer, WmtsStyle,
};
pub use selection::{resolve_matrix_set, select_layer, LayerSelection, SelectionReason};
pub use source::{options_from_capabilities, RequestEncoding, TileGrid, TileRequest, TileSource};
pub use template::fill_proxy_template;
pub use tile_matrix::{TileMatrix, TileMatrixSet};
