// Command handlers module
pub mod channels;
pub mod config;
pub mod library;
pub mod scan;
pub mod status;
pub mod version;

// Re-exports for cleaner imports
pub use library::execute as library;
pub use scan::execute as scan;
pub use status::execute as status;
pub use version::execute as version;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::core::{Config, Station};
use crate::ui::warn;

/// Load config and open the station, honoring a global `--data-dir` override
pub(crate) fn open_station(matches: &clap::ArgMatches) -> Result<(Station, Config)> {
    let config = Config::load()?;

    let data_dir = match matches.get_one::<String>("data-dir") {
        Some(dir) => PathBuf::from(dir),
        None => config.resolve_data_dir()?,
    };
    log::debug!("Using data directory {:?}", data_dir);

    let station = Station::open(&data_dir, &config)
        .with_context(|| format!("Failed to open data directory: {:?}", data_dir))?;

    Ok((station, config))
}

/// Runtime for the commands that scan in the background
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .thread_name("vtv-scan")
        .build()
        .context("Failed to start async runtime")
}

/// Canonicalize an existing folder so stored roots match scanned episode
/// paths; missing folders are kept as typed, with a warning
pub(crate) fn resolve_folder(path: &str) -> String {
    let path_buf = Path::new(path);
    if !path_buf.exists() {
        warn(&format!("Folder '{}' does not exist", path));
        return path.to_string();
    }

    path_buf
        .canonicalize()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|_| path.to_string())
}
