//! Runtime configuration for the demo session.

use std::path::PathBuf;

/// Default number of scatter points.
const DEFAULT_POINTS: usize = 100_000;
/// Default canvas width and height in device pixels.
const DEFAULT_SIZE: u32 = 800;
/// Default number of simulated pan steps while the button is held.
const DEFAULT_PAN_STEPS: usize = 30;

/// Runtime configuration, overridable through `GLIMPSE_*` env vars.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Number of scatter points in the synthetic data set.
    pub points: usize,
    /// Canvas width and height in device pixels (square canvas).
    pub size: u32,
    /// Pan steps simulated between button press and release.
    pub pan_steps: usize,
    /// Directory PNG snapshots are written to. `None` disables snapshots.
    pub snapshot_dir: Option<PathBuf>,
    /// Run the session with a log-scaled y axis (mesh redraw path).
    pub log_y: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            points: env_parse("GLIMPSE_POINTS", DEFAULT_POINTS),
            size: env_parse("GLIMPSE_SIZE", DEFAULT_SIZE),
            pan_steps: env_parse("GLIMPSE_PAN_STEPS", DEFAULT_PAN_STEPS),
            snapshot_dir: std::env::var_os("GLIMPSE_SNAPSHOT_DIR").map(PathBuf::from),
            log_y: std::env::var("GLIMPSE_LOG_Y").is_ok(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
