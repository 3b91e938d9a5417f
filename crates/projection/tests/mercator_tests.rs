//! Round-trip and extent tests for the Web Mercator transforms.

use hydromet_common::{BoundingBox, RegionId};
use projection::{from_lon_lat, to_lon_lat, transform_extent_to_geographic, transform_extent_to_map};
use test_utils::assert_coords_approx_eq;

// ============================================================================
// Geographic -> map -> geographic round trips
// ============================================================================

#[test]
fn test_roundtrip_grid_of_points() {
    let mut lon = -180.0;
    while lon <= 180.0 {
        let mut lat = -85.0;
        while lat <= 85.0 {
            let (x, y) = from_lon_lat(lon, lat);
            let (back_lon, back_lat) = to_lon_lat(x, y);
            assert_coords_approx_eq!((back_lon, back_lat), (lon, lat), 1e-9);
            lat += 8.5;
        }
        lon += 22.5;
    }
}

#[test]
fn test_roundtrip_region_centers() {
    for id in RegionId::ALL {
        let (lon, lat) = id.region().center;
        let (x, y) = from_lon_lat(lon, lat);
        let (back_lon, back_lat) = to_lon_lat(x, y);
        assert_coords_approx_eq!((back_lon, back_lat), (lon, lat), 1e-9);
    }
}

// ============================================================================
// Extent transforms
// ============================================================================

#[test]
fn test_extent_roundtrip() {
    let geo = RegionId::Arctic.region().bbox;
    let map = transform_extent_to_map(&geo);
    assert!(map.width() > 0.0 && map.height() > 0.0);

    let back = transform_extent_to_geographic(&map);
    assert_coords_approx_eq!((back.min_x, back.min_y), (geo.min_x, geo.min_y), 1e-9);
    assert_coords_approx_eq!((back.max_x, back.max_y), (geo.max_x, geo.max_y), 1e-9);
}

#[test]
fn test_extent_keeps_orientation() {
    let map = transform_extent_to_map(&BoundingBox::new(-10.0, -10.0, 10.0, 10.0));
    assert!(map.min_x < 0.0 && map.max_x > 0.0);
    assert!(map.min_y < 0.0 && map.max_y > 0.0);
    assert!((map.min_x + map.max_x).abs() < 1e-6);
}
