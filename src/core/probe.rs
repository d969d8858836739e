// Duration probing - asks an external media tool how long a file plays
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::core::Config;
use crate::error::{Result, VtvError};

/// Capability that measures a media file's playable duration in seconds.
///
/// The scanner only talks to this trait, so tests can substitute a
/// deterministic implementation instead of spawning a real tool.
#[async_trait]
pub trait DurationProbe: Send + Sync {
    async fn probe(&self, path: &Path) -> Result<f64>;
}

/// Probe backed by `ffprobe`.
pub struct FfprobeProbe {
    binary: PathBuf,
    timeout: Duration,
}

impl FfprobeProbe {
    pub fn new(binary: PathBuf, timeout: Duration) -> Self {
        Self { binary, timeout }
    }

    /// Build a probe from configuration.
    /// Priority:
    /// 1. Explicit `ffprobe_path` from config
    /// 2. `ffprobe` found on the PATH
    /// 3. Bare `ffprobe`, letting the spawn fail per file if it is missing
    pub fn from_config(config: &Config) -> Self {
        let binary = Self::locate(config.get_ffprobe_path().map(String::as_str));
        log::debug!("Using ffprobe binary: {:?}", binary);
        Self::new(binary, config.probe_timeout())
    }

    fn locate(configured: Option<&str>) -> PathBuf {
        if let Some(path) = configured {
            return PathBuf::from(path);
        }

        which::which("ffprobe").unwrap_or_else(|_| PathBuf::from("ffprobe"))
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl DurationProbe for FfprobeProbe {
    async fn probe(&self, path: &Path) -> Result<f64> {
        let display = path.to_string_lossy().to_string();

        let child = Command::new(&self.binary)
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        // Dropping the future on timeout kills the child
        let output = tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| VtvError::probe_timeout(display.clone(), self.timeout.as_secs()))?
            .map_err(|e| VtvError::probe(display.clone(), format!("failed to run ffprobe: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VtvError::probe(
                display,
                format!("ffprobe exited with {}: {}", output.status, stderr.trim()),
            ));
        }

        parse_duration(&String::from_utf8_lossy(&output.stdout))
            .ok_or_else(|| VtvError::probe(display, "ffprobe returned no usable duration"))
    }
}

/// Parse the single number ffprobe prints for `format=duration`.
pub fn parse_duration(output: &str) -> Option<f64> {
    let value: f64 = output.trim().parse().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        None
    }
}
