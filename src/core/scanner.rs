//! Library scanner: walks show roots and probes every recognized media file.
//!
//! A scan always produces a complete [`Library`]; it never merges into a
//! previous snapshot. Files that fail probing are left out and counted, the
//! scan itself does not fail because of them.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use virtual_tv::core::probe::FfprobeProbe;
//! use virtual_tv::core::scanner::LibraryScanner;
//! use virtual_tv::Config;
//!
//! # async fn run() {
//! let config = Config::default();
//! let scanner = LibraryScanner::new(Arc::new(FfprobeProbe::from_config(&config)), &config);
//! let report = scanner.scan(&["/media/Simpsons".to_string()]).await;
//! println!("{} episodes, {} skipped", report.library.len(), report.skipped);
//! # }
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use crate::core::model::{Episode, Library};
use crate::core::probe::DurationProbe;
use crate::core::config::{extension_listed, normalize_extension};
use crate::core::Config;

/// Outcome of one scan
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub library: Library,
    /// Media files that were found but could not be probed
    pub skipped: usize,
    /// Show roots that were scanned, after de-duplication
    pub roots: Vec<String>,
}

/// Media file found on disk, waiting to be probed
#[derive(Debug, Clone)]
struct Candidate {
    path: PathBuf,
    show: String,
}

pub struct LibraryScanner {
    probe: Arc<dyn DurationProbe>,
    extensions: Vec<String>,
}

impl LibraryScanner {
    pub fn new(probe: Arc<dyn DurationProbe>, config: &Config) -> Self {
        Self::with_extensions(probe, config.extensions.clone())
    }

    pub fn with_extensions(probe: Arc<dyn DurationProbe>, extensions: Vec<String>) -> Self {
        let extensions = extensions
            .into_iter()
            .map(|e| normalize_extension(&e))
            .collect();
        Self { probe, extensions }
    }

    /// Scan `show_roots` and return a full replacement library.
    pub async fn scan(&self, show_roots: &[String]) -> ScanReport {
        let roots = dedup_roots(show_roots);
        let extensions = self.extensions.clone();
        let walk_roots = roots.clone();

        let candidates = tokio::task::spawn_blocking(move || collect_candidates(&walk_roots, &extensions))
            .await
            .unwrap_or_else(|e| {
                log::error!("Directory walk aborted: {}", e);
                Vec::new()
            });

        let mut episodes = Vec::with_capacity(candidates.len());
        let mut skipped = 0usize;

        for candidate in candidates {
            match self.probe.probe(&candidate.path).await {
                Ok(duration) => {
                    log::debug!("Probed {:?}: {:.3}s", candidate.path, duration);
                    episodes.push(Episode {
                        path: candidate.path.to_string_lossy().to_string(),
                        name: episode_name(&candidate.path),
                        show: candidate.show,
                        duration,
                    });
                }
                Err(e) => {
                    log::warn!("Skipping {:?}: {}", candidate.path, e);
                    skipped += 1;
                }
            }
        }

        log::info!(
            "Scan finished: {} episode(s) from {} root(s), {} skipped",
            episodes.len(),
            roots.len(),
            skipped
        );

        ScanReport {
            library: Library::new(episodes),
            skipped,
            roots,
        }
    }
}

/// Remove empty and repeated roots, keeping first-seen order.
pub fn dedup_roots(show_roots: &[String]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut roots = Vec::new();

    for root in show_roots {
        if !root.trim().is_empty() && seen.insert(root.as_str()) {
            roots.push(root.clone());
        }
    }

    roots
}

/// Show name for every episode under a root: the root's own base name.
pub fn show_name(root: &str) -> String {
    let trimmed = root.trim_end_matches(['/', '\\']);
    Path::new(trimmed)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| root.to_string())
}

/// File name with its extension stripped.
pub fn episode_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn collect_candidates(roots: &[String], extensions: &[String]) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    let mut seen_paths = HashSet::new();

    for root in roots {
        let root_path = Path::new(root);
        if !root_path.is_dir() {
            log::warn!("Show root does not exist or is not a directory: {}", root);
            continue;
        }

        log::info!("Scanning {}", root);
        let show = show_name(root);

        for entry in WalkDir::new(root_path)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let is_media = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| extension_listed(extensions, e))
                .unwrap_or(false);

            // Overlapping roots reach the same file twice; the first root owns it
            if is_media && seen_paths.insert(entry.path().to_path_buf()) {
                candidates.push(Candidate {
                    path: entry.path().to_path_buf(),
                    show: show.clone(),
                });
            }
        }
    }

    candidates
}
