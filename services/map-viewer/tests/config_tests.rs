//! Environment fallbacks for the viewer flags.
//!
//! Kept in its own test binary with a single test, since it mutates the
//! process environment.

use clap::Parser;
use hydromet_common::RegionId;
use map_viewer::{ViewerArgs, ViewerConfig};

#[derive(Parser)]
struct Cli {
    #[command(flatten)]
    viewer: ViewerArgs,
}

fn resolve(args: &[&str]) -> ViewerConfig {
    let mut argv = vec!["map-viewer"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv)
        .unwrap()
        .viewer
        .into_config()
        .unwrap()
}

#[test]
fn test_environment_overrides_and_fallbacks() {
    for var in ["HYDROMETEO_API", "HYDROMETEO_REGION", "HYDROMETEO_LAYER_FILTER"] {
        std::env::remove_var(var);
    }

    // Unset
    let config = resolve(&[]);
    assert_eq!(config.api_url, "http://localhost:8000");
    assert_eq!(config.region, RegionId::Baltic);
    assert_eq!(config.layer_filter, "VHM0");

    // Set
    std::env::set_var("HYDROMETEO_API", "http://backend:9000/");
    std::env::set_var("HYDROMETEO_REGION", "north-sea");
    std::env::set_var("HYDROMETEO_LAYER_FILTER", "thetao");
    let config = resolve(&[]);
    assert_eq!(config.api_url, "http://backend:9000");
    assert_eq!(config.region, RegionId::NorthSea);
    assert_eq!(config.layer_filter, "thetao");

    // Flags win over the environment
    let config = resolve(&["--api-url", "http://flag:7000"]);
    assert_eq!(config.api_url, "http://flag:7000");

    // Blank values are ignored
    std::env::set_var("HYDROMETEO_API", "");
    assert_eq!(resolve(&[]).api_url, "http://localhost:8000");
    std::env::set_var("HYDROMETEO_API", "   ");
    assert_eq!(resolve(&[]).api_url, "http://localhost:8000");

    for var in ["HYDROMETEO_API", "HYDROMETEO_REGION", "HYDROMETEO_LAYER_FILTER"] {
        std::env::remove_var(var);
    }
}
