use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::path_matcher::MatchMode;

pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_EXTENSIONS: [&str; 5] = ["mp4", "mkv", "avi", "mov", "webm"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding channels.json and library.json
    #[serde(default)]
    pub data_dir: Option<String>,
    /// Explicit ffprobe binary; falls back to PATH lookup
    #[serde(default)]
    pub ffprobe_path: Option<String>,
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
    /// Use plain string-prefix show matching instead of segment-aware matching
    #[serde(default)]
    pub legacy_prefix_match: bool,
    /// Recognized container extensions, lowercase, without the dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_probe_timeout_secs() -> u64 {
    DEFAULT_PROBE_TIMEOUT_SECS
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            ffprobe_path: None,
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
            legacy_prefix_match: false,
            extensions: default_extensions(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let data = fs::read(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        // If the file is empty or corrupted, return default config
        if data.is_empty() {
            return Ok(Config::default());
        }

        Ok(serde_json::from_slice(&data).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable config {:?}: {}", config_path, e);
            Config::default()
        }))
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data = serde_json::to_vec_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(&config_path, data)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }

    fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("virtual-tv").join("config.json"))
    }

    pub fn set_data_dir(&mut self, path: String) {
        self.data_dir = Some(path);
    }

    pub fn get_data_dir(&self) -> Option<&String> {
        self.data_dir.as_ref()
    }

    /// Data directory to use: configured one, else the platform data dir
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(PathBuf::from(dir));
        }

        let data_dir = dirs::data_dir().with_context(|| "Could not determine data directory")?;
        Ok(data_dir.join("virtual-tv"))
    }

    pub fn set_ffprobe_path(&mut self, path: String) {
        self.ffprobe_path = Some(path);
    }

    pub fn get_ffprobe_path(&self) -> Option<&String> {
        self.ffprobe_path.as_ref()
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs.max(1))
    }

    pub fn match_mode(&self) -> MatchMode {
        if self.legacy_prefix_match {
            MatchMode::Prefix
        } else {
            MatchMode::Segment
        }
    }

    /// Is `ext` (with or without leading dot, any case) a recognized container?
    pub fn is_media_extension(&self, ext: &str) -> bool {
        extension_listed(&self.extensions, ext)
    }
}

/// Lowercase an extension and strip any leading dot.
pub fn normalize_extension(ext: &str) -> String {
    ext.trim_start_matches('.').to_lowercase()
}

/// Whether `ext` appears in `extensions`, ignoring case and a leading dot.
pub fn extension_listed(extensions: &[String], ext: &str) -> bool {
    let ext = normalize_extension(ext);
    extensions.iter().any(|known| normalize_extension(known) == ext)
}
