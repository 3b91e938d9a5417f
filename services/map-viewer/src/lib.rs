//! Headless map viewer for hydrometeorological layers.
//!
//! Drives a WMTS raster layer, point time-series charts and a sea-currents
//! overlay against the backend API. Output goes through a [`Presenter`].

pub mod config;
pub mod controller;
pub mod headless;
pub mod latest;
pub mod presenter;
pub mod state;

pub use config::{ViewerArgs, ViewerConfig};
pub use controller::{MapController, NO_CONNECTION};
pub use headless::TerminalPresenter;
pub use presenter::Presenter;
pub use state::{Mode, OverlayState, ViewState};
