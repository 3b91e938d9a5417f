//! Map viewer CLI.
//!
//! Runs the map view controller headless against a backend and prints
//! what the web view would show.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use hydromet_client::{ApiClient, HydroMeteoApi, IceTimeSeriesRequest};
use hydromet_common::parse_utc;
use map_viewer::headless::{chart_table, layers_table, tiles_table};
use map_viewer::{MapController, Mode, TerminalPresenter, ViewerArgs};
use renderer::{encode_overlay_png, format_last_value, GlyphStyle, LineChart};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "map-viewer")]
#[command(about = "Headless hydrometeorological map viewer")]
struct Args {
    #[command(flatten)]
    viewer: ViewerArgs,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check backend health and load the WMTS layer
    Status,

    /// Query a point time series and print it as a chart table
    Series {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        #[arg(long, value_enum, default_value_t = Mode::Waves)]
        mode: Mode,
    },

    /// Query the sea-ice concentration series at a point
    Ice {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Range start (ISO 8601, UTC when no offset is given)
        #[arg(long, value_parser = parse_utc)]
        start: Option<DateTime<Utc>>,
        /// Range end (ISO 8601, UTC when no offset is given)
        #[arg(long, value_parser = parse_utc)]
        end: Option<DateTime<Utc>>,
    },

    /// Show the currents overlay for the configured view
    Currents {
        /// Write the rendered overlay to this PNG file
        #[arg(long)]
        png: Option<PathBuf>,
    },

    /// List WMTS layers and mark the selected one
    Layers {
        /// Print the parsed layers as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the proxied tile URLs covering the view
    Tiles {
        /// Tile matrix identifier (default: closest to the view resolution)
        #[arg(long)]
        matrix: Option<String>,
    },
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.log_json)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async_main(args))
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so tables on stdout stay clean
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr);
    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

async fn async_main(args: Args) -> Result<()> {
    let config = args.viewer.into_config()?;
    info!(api = %config.api_url, region = %config.region, "Starting map viewer");

    let client = Arc::new(ApiClient::new(&config.api_url));
    let presenter = match args.command {
        Command::Series { .. } => TerminalPresenter::new().with_charts(),
        _ => TerminalPresenter::new(),
    };
    let controller = MapController::new(client.clone(), Arc::new(presenter), config);

    let result = run_command(&controller, &client, args.command).await;
    controller.dispose().await;
    result
}

async fn run_command(
    controller: &MapController,
    client: &ApiClient,
    command: Command,
) -> Result<()> {
    match command {
        Command::Status => {
            let wmts = controller.initialize().await;
            let state = controller.snapshot().await;

            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Check", "Result"]);
            table.add_row(vec!["API".to_string(), controller.config().api_url.clone()]);
            table.add_row(vec!["Status".to_string(), state.status_text.clone()]);
            table.add_row(vec![
                "Layer".to_string(),
                state.selected_layer.clone().unwrap_or_default(),
            ]);
            if let Some(source) = &state.tile_source {
                table.add_row(vec!["Matrix set".to_string(), source.matrix_set.clone()]);
                table.add_row(vec!["Tile URL".to_string(), source.urls.join("\n")]);
            }
            if let Err(e) = &wmts {
                table.add_row(vec!["WMTS".to_string(), e.to_string()]);
            }
            println!("{}", table);
        }

        Command::Series { lat, lon, mode } => {
            controller.set_mode(mode).await;
            controller
                .query_point(lat, lon)
                .await
                .context("time series query failed")?;
            let state = controller.snapshot().await;
            println!(
                "{}  last value: {} {}",
                state.series_title.unwrap_or_default(),
                state.last_value.unwrap_or_default(),
                state.unit.unwrap_or_default()
            );
        }

        Command::Ice {
            lat,
            lon,
            start,
            end,
        } => {
            let request = IceTimeSeriesRequest {
                start_utc: start,
                end_utc: end,
                ..IceTimeSeriesRequest::new(lat, lon)
            };
            let series = client
                .ice_timeseries(&request)
                .await
                .context("ice time series query failed")?;
            let unit = series.unit_or("%");
            let last_value = format_last_value(&series.values);
            let chart =
                LineChart::single_series(series.times_utc, series.values, &format!("siconc ({})", unit));
            println!("{}", chart_table(&chart));
            println!("Sea ice concentration  last value: {} {}", last_value, unit);
        }

        Command::Currents { png } => {
            controller.toggle_currents().await?;
            let state = controller.snapshot().await;
            println!("{} current glyphs", state.glyphs.len());
            if let Some(path) = png {
                let bytes = encode_overlay_png(&state.glyphs, &state.viewport, &GlyphStyle::default())?;
                tokio::fs::write(&path, bytes)
                    .await
                    .with_context(|| format!("writing {}", path.display()))?;
                info!(path = %path.display(), "Overlay written");
            }
        }

        Command::Layers { json } => {
            controller.reload_wmts().await?;
            let state = controller.snapshot().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&state.layers)?);
            } else {
                println!("{}", layers_table(&state.layers, state.selected_layer.as_deref()));
            }
        }

        Command::Tiles { matrix } => {
            controller.reload_wmts().await?;
            let tiles = controller.visible_tiles(matrix.as_deref()).await?;
            println!("{}", tiles_table(&tiles));
            println!("{} tiles", tiles.len());
        }
    }
    Ok(())
}
