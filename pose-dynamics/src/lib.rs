//! Pose Dynamics - keypoint motion analysis over a live pose stream
//!
//! A pose detector pushes one frame per inference. From that single source
//! the crate derives:
//! - debounced swipe gestures from one tracked keypoint
//! - per-keypoint velocity over a sliding time window
//! - velocity history shaped for graphing
//!
//! Pipelines are single-threaded push streams (see [`stream`]). The
//! `PoseDynamics` class is the JS entry point; everything else is usable
//! from Rust directly.

mod bridge;
pub mod config;
pub mod dynamics;
pub mod error;
pub mod pose;
pub mod stats;
pub mod stream;

use wasm_bindgen::prelude::*;

pub use bridge::PoseDynamics;
pub use config::{DynamicsConfig, GestureConfig, TrajectoryConfig};
pub use error::{DynamicsError, Result};
pub use pose::{Keypoint, Pose, PoseFrame, PoseSource, TimedKeypointSet};

/// Called automatically when the WASM module loads
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Route `log` output to the browser console.
///
/// `level` is one of "trace", "debug", "info", "warn", "error"; anything
/// else means "info".
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: &str) {
    let level = level.parse::<log::Level>().unwrap_or(log::Level::Info);
    wasm_logger::init(wasm_logger::Config::new(level));
    log::info!("pose-dynamics {} logging at {}", env!("CARGO_PKG_VERSION"), level);
}

#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
