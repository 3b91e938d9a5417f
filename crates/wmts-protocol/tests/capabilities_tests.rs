//! Tests for capabilities parsing and tile source derivation against
//! Copernicus-style documents.

use hydromet_common::{HydroError, RegionId};
use projection::Viewport;
use test_utils::fixtures::{
    BALTIC_VHM0_LAYER, CAPABILITIES_BARE_LAYER, CAPABILITIES_EMPTY, CAPABILITIES_KVP,
    CAPABILITIES_REST, GLOBAL_THETAO_LAYER, GLOBAL_VHM0_LAYER,
};
use wmts_protocol::{
    options_from_capabilities, parse_capabilities, resolve_matrix_set, select_layer,
    RequestEncoding, SelectionReason,
};

const PROXY: &str = "http://localhost:8000/wmts/tile?SERVICE=WMTS&REQUEST=GetTile&VERSION=1.0.0&Layer={Layer}&Style={Style}&Format={Format}&TileMatrixSet={TileMatrixSet}&TileMatrix={TileMatrix}&TileRow={TileRow}&TileCol={TileCol}&Time={Time}";

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_parse_layers_in_document_order() {
    let caps = parse_capabilities(CAPABILITIES_KVP).unwrap();
    let ids: Vec<&str> = caps.layers.iter().map(|l| l.identifier.as_str()).collect();
    assert_eq!(ids, vec![GLOBAL_THETAO_LAYER, GLOBAL_VHM0_LAYER, BALTIC_VHM0_LAYER]);
}

#[test]
fn test_parse_layer_details() {
    let caps = parse_capabilities(CAPABILITIES_KVP).unwrap();
    let baltic = caps.layer(BALTIC_VHM0_LAYER).unwrap();

    assert_eq!(baltic.title.as_deref(), Some("Wave Analysis and Forecast - VHM0"));
    assert!(baltic.abstract_text.as_deref().unwrap().contains("Baltic Sea"));
    assert_eq!(baltic.styles.len(), 2);
    assert_eq!(baltic.styles[0].identifier, "cmap:amp");
    assert!(!baltic.styles[0].is_default);
    assert!(baltic.styles[1].is_default);
    assert_eq!(baltic.default_style().unwrap().identifier, "cmap:ice");
    assert_eq!(baltic.formats, vec!["image/png"]);
    assert_eq!(baltic.tile_matrix_set_links, vec!["EPSG:3857", "EPSG:4326"]);
    assert_eq!(baltic.dimensions.len(), 1);
    assert_eq!(baltic.dimensions[0].identifier, "time");
    assert_eq!(
        baltic.dimensions[0].default.as_deref(),
        Some("2024-06-01T12:00:00Z")
    );
}

#[test]
fn test_parse_wgs84_bounding_box() {
    let caps = parse_capabilities(CAPABILITIES_KVP).unwrap();
    let thetao = caps.layer(GLOBAL_THETAO_LAYER).unwrap();
    let bbox = thetao.wgs84_bounding_box.unwrap();
    assert_eq!(bbox.min_x, -180.0);
    assert_eq!(bbox.min_y, -80.0);
    assert_eq!(bbox.max_x, 179.92);
    assert_eq!(bbox.max_y, 90.0);
    assert!(caps.layer(BALTIC_VHM0_LAYER).unwrap().wgs84_bounding_box.is_none());
}

#[test]
fn test_parse_tile_matrix_sets() {
    let caps = parse_capabilities(CAPABILITIES_KVP).unwrap();
    assert_eq!(caps.tile_matrix_sets.len(), 2);
    assert_eq!(caps.tile_matrix_sets[0].identifier, "EPSG:4326");

    let merc = caps.tile_matrix_set("EPSG:3857").unwrap();
    let ids: Vec<&str> = merc.tile_matrices.iter().map(|m| m.identifier.as_str()).collect();
    assert_eq!(ids, vec!["0", "1", "5"]);
    let z5 = &merc.tile_matrices[2];
    assert_eq!(z5.matrix_width, 32);
    assert_eq!(z5.tile_width, 256);
    assert_eq!(z5.top_left_corner.0, -20037508.342789244);
}

#[test]
fn test_parse_get_tile_endpoint_only() {
    let caps = parse_capabilities(CAPABILITIES_KVP).unwrap();
    assert_eq!(caps.get_tile_endpoints.len(), 1);
    let endpoint = &caps.get_tile_endpoints[0];
    assert_eq!(endpoint.href, "https://wmts.marine.copernicus.eu/teroWmts?");
    assert_eq!(endpoint.encodings, vec!["KVP"]);
    assert!(endpoint.supports_kvp());
}

#[test]
fn test_parse_resource_urls() {
    let caps = parse_capabilities(CAPABILITIES_REST).unwrap();
    let layer = &caps.layers[0];
    assert_eq!(layer.resource_urls.len(), 3);
    assert_eq!(layer.tile_resource_urls().count(), 2);
    assert_eq!(layer.resource_urls[2].resource_type, "FeatureInfo");
    assert!(caps.get_tile_endpoints.is_empty());
}

#[test]
fn test_parse_empty_contents() {
    let caps = parse_capabilities(CAPABILITIES_EMPTY).unwrap();
    assert!(caps.layers.is_empty());
    assert_eq!(caps.tile_matrix_sets.len(), 1);
}

// ============================================================================
// Layer selection against fixtures
// ============================================================================

#[test]
fn test_select_baltic_waves() {
    let caps = parse_capabilities(CAPABILITIES_KVP).unwrap();
    let fragment = RegionId::Baltic.region().title_fragment;
    let sel = select_layer(&caps.layers, "VHM0", fragment).unwrap();
    assert_eq!(sel.layer.identifier, BALTIC_VHM0_LAYER);
    assert_eq!(sel.reason, SelectionReason::VariableAndRegion);
}

#[test]
fn test_select_other_region_falls_back_to_first_variable_match() {
    let caps = parse_capabilities(CAPABILITIES_KVP).unwrap();
    let fragment = RegionId::Mediterranean.region().title_fragment;
    let sel = select_layer(&caps.layers, "VHM0", fragment).unwrap();
    assert_eq!(sel.layer.identifier, GLOBAL_VHM0_LAYER);
    assert_eq!(sel.reason, SelectionReason::VariableOnly);
}

#[test]
fn test_select_unknown_variable_takes_first_layer() {
    let caps = parse_capabilities(CAPABILITIES_KVP).unwrap();
    let sel = select_layer(&caps.layers, "siconc", "BALTIC").unwrap();
    assert_eq!(sel.layer.identifier, GLOBAL_THETAO_LAYER);
    assert_eq!(sel.reason, SelectionReason::FirstListed);
}

#[test]
fn test_select_empty_capabilities() {
    let caps = parse_capabilities(CAPABILITIES_EMPTY).unwrap();
    assert!(matches!(
        select_layer(&caps.layers, "VHM0", "BALTIC"),
        Err(HydroError::NoLayersFound)
    ));
}

#[test]
fn test_matrix_set_fallback_to_first_defined() {
    let caps = parse_capabilities(CAPABILITIES_BARE_LAYER).unwrap();
    assert_eq!(resolve_matrix_set(&caps, &caps.layers[0]).unwrap(), "Arctic3413");
}

// ============================================================================
// Tile source options
// ============================================================================

#[test]
fn test_options_kvp() {
    let caps = parse_capabilities(CAPABILITIES_KVP).unwrap();
    let src = options_from_capabilities(&caps, BALTIC_VHM0_LAYER, "EPSG:3857").unwrap();

    assert_eq!(src.style, "cmap:ice");
    assert_eq!(src.format, "image/png");
    assert_eq!(src.request_encoding, RequestEncoding::Kvp);
    assert_eq!(src.urls, vec!["https://wmts.marine.copernicus.eu/teroWmts?"]);
    assert_eq!(src.tile_grid.matrices.len(), 3);
    assert_eq!(src.tile_grid.meters_per_unit, 1.0);
    assert_eq!(src.dimensions.get("time").map(String::as_str), Some("2024-06-01T12:00:00Z"));
}

#[test]
fn test_options_first_format_wins() {
    let caps = parse_capabilities(CAPABILITIES_KVP).unwrap();
    let src = options_from_capabilities(&caps, GLOBAL_VHM0_LAYER, "EPSG:3857").unwrap();
    assert_eq!(src.format, "image/jpeg");
    assert_eq!(src.style, "cmap:amp");
}

#[test]
fn test_options_rest_filters_by_format() {
    let caps = parse_capabilities(CAPABILITIES_REST).unwrap();
    let src = options_from_capabilities(&caps, &caps.layers[0].identifier, "WebMercatorQuad").unwrap();
    assert_eq!(src.request_encoding, RequestEncoding::Rest);
    assert_eq!(src.urls.len(), 1);
    assert!(src.urls[0].ends_with(".png"));
}

#[test]
fn test_options_bare_layer_defaults() {
    let caps = parse_capabilities(CAPABILITIES_BARE_LAYER).unwrap();
    let src = options_from_capabilities(&caps, "sea_ice/siconc", "Arctic3413").unwrap();
    assert_eq!(src.style, "default");
    assert_eq!(src.format, "image/png");
    // Format-less resource URLs are still usable
    assert_eq!(src.urls.len(), 1);
    assert!(src.dimensions.is_empty());
}

#[test]
fn test_options_missing_matrix_set() {
    let caps = parse_capabilities(CAPABILITIES_KVP).unwrap();
    let err = options_from_capabilities(&caps, BALTIC_VHM0_LAYER, "WorldCRS84Quad").unwrap_err();
    assert!(matches!(err, HydroError::MatrixSetNotFound(ref s) if s == "WorldCRS84Quad"));
}

#[test]
fn test_options_geographic_matrix_set_units() {
    let caps = parse_capabilities(CAPABILITIES_KVP).unwrap();
    let src = options_from_capabilities(&caps, BALTIC_VHM0_LAYER, "EPSG:4326").unwrap();
    let res = src.tile_grid.resolutions();
    // 279541132.0143589 * 0.00028 / 111319.49... = 0.703125 degrees per pixel
    assert!((res[0] - 0.703125).abs() < 1e-6);
}

// ============================================================================
// Proxying and tile URLs
// ============================================================================

#[test]
fn test_proxy_uses_first_style_and_switches_to_rest() {
    let caps = parse_capabilities(CAPABILITIES_KVP).unwrap();
    let layer = caps.layer(BALTIC_VHM0_LAYER).unwrap();
    let src = options_from_capabilities(&caps, BALTIC_VHM0_LAYER, "EPSG:3857")
        .unwrap()
        .with_proxy(PROXY, layer);

    assert_eq!(src.request_encoding, RequestEncoding::Rest);
    assert_eq!(src.urls.len(), 1);
    assert!(src.urls[0].contains("Style=cmap%3Aamp"));
    assert!(src.urls[0].contains(
        "Layer=BALTICSEA_ANALYSISFORECAST_WAV_003_010%2Fcmems_mod_bal_wav_anfc_PT1H-i_202311%2FVHM0"
    ));

    let url = src.tile_url("5", 9, 18).unwrap();
    assert!(url.ends_with("TileMatrix=5&TileRow=9&TileCol=18&Time=2024-06-01T12:00:00Z"));
}

#[test]
fn test_proxy_time_without_dimension_is_empty() {
    let caps = parse_capabilities(CAPABILITIES_KVP).unwrap();
    let layer = caps.layer(GLOBAL_VHM0_LAYER).unwrap();
    let src = options_from_capabilities(&caps, GLOBAL_VHM0_LAYER, "EPSG:3857")
        .unwrap()
        .with_proxy(PROXY, layer);
    assert!(src.tile_url("0", 0, 0).unwrap().ends_with("&Time="));
}

#[test]
fn test_tiles_for_baltic_view() {
    let caps = parse_capabilities(CAPABILITIES_KVP).unwrap();
    let layer = caps.layer(BALTIC_VHM0_LAYER).unwrap();
    let src = options_from_capabilities(&caps, BALTIC_VHM0_LAYER, "EPSG:3857")
        .unwrap()
        .with_proxy(PROXY, layer);

    let (lon, lat) = RegionId::Baltic.region().center;
    let view = Viewport::centered_on(lon, lat, 5.0, 1024, 768);
    let matrix = src.tile_grid.matrix_for_resolution(view.resolution()).unwrap();
    assert_eq!(matrix.identifier, "5");

    let tiles = src.tiles_for_extent(&view.extent(), &matrix.identifier).unwrap();
    // Columns 15..=19, rows 7..=10
    assert_eq!(tiles.len(), 20);
    assert_eq!((tiles[0].col, tiles[0].row), (15, 7));
    for tile in &tiles {
        assert!(tile.col < 32 && tile.row < 32);
        assert!(tile.url.contains(&format!("TileRow={}&TileCol={}", tile.row, tile.col)));
    }
    // Baltic is north-east of the origin
    assert!(tiles.iter().all(|t| t.col >= 15 && t.row < 16));
}
