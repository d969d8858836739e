//! Station: the operations exposed to front ends (CLI, HTTP, tray...).
//!
//! Status queries are pure reads over a channel list and a library
//! snapshot. Scans go through a [`ScanCoordinator`] that keeps at most one
//! scan in flight; requests arriving meanwhile are coalesced into a single
//! follow-up scan over the most recently requested roots.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::watch;

use crate::core::model::{Channel, Library, PlayingStatus};
use crate::core::path_matcher::MatchMode;
use crate::core::probe::{DurationProbe, FfprobeProbe};
use crate::core::scanner::{dedup_roots, LibraryScanner};
use crate::core::scheduler::{playing_on, wall_clock_secs};
use crate::core::store::{ChannelStore, JsonChannelStore, JsonLibraryStore, LibraryStore};
use crate::core::Config;
use crate::error::{Result, VtvError};

/// What happened to a scan request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanTicket {
    /// No scan was running; this one started immediately
    Started,
    /// A scan is in flight; this request will run after it, unless a newer
    /// request replaces it first
    Queued,
}

/// Summary of a finished scan
#[derive(Debug, Clone)]
pub struct ScanSummary {
    pub episodes: usize,
    pub skipped: usize,
    pub roots: usize,
    pub finished_at: DateTime<Utc>,
    /// Set when the library could not be published
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ScanStatus {
    pub running: bool,
    /// Number of scans completed since startup
    pub completed: u64,
    pub last: Option<ScanSummary>,
}

#[derive(Default)]
struct CoordinatorState {
    running: bool,
    pending: Option<Vec<String>>,
}

/// Single-flight scan runner.
pub struct ScanCoordinator {
    scanner: LibraryScanner,
    library: Arc<dyn LibraryStore>,
    state: Mutex<CoordinatorState>,
    status_tx: watch::Sender<ScanStatus>,
}

impl ScanCoordinator {
    pub fn new(scanner: LibraryScanner, library: Arc<dyn LibraryStore>) -> Self {
        let (status_tx, _) = watch::channel(ScanStatus::default());
        Self {
            scanner,
            library,
            state: Mutex::new(CoordinatorState::default()),
            status_tx,
        }
    }

    /// Request a scan of `roots`. Fails when called outside a Tokio runtime.
    pub fn request(self: &Arc<Self>, roots: Vec<String>) -> Result<ScanTicket> {
        let handle = tokio::runtime::Handle::try_current()
            .map_err(|e| VtvError::other(format!("scan requested outside a Tokio runtime: {}", e)))?;

        let mut state = self.state.lock();

        if state.running {
            if state.pending.is_some() {
                log::info!("Scan already queued; replacing it with the newer request");
            } else {
                log::info!("Scan in progress; queuing request");
            }
            state.pending = Some(roots);
            return Ok(ScanTicket::Queued);
        }

        state.running = true;
        self.status_tx.send_modify(|s| s.running = true);
        drop(state);

        let this = Arc::clone(self);
        handle.spawn(async move { this.run(roots).await });

        Ok(ScanTicket::Started)
    }

    async fn run(self: Arc<Self>, mut roots: Vec<String>) {
        loop {
            let report = self.scanner.scan(&roots).await;

            let mut summary = ScanSummary {
                episodes: report.library.len(),
                skipped: report.skipped,
                roots: report.roots.len(),
                finished_at: Utc::now(),
                error: None,
            };

            if let Err(e) = self.library.replace(report.library) {
                log::error!("Failed to publish scanned library: {}", e);
                summary.error = Some(e.to_string());
            }

            // Status is published under the lock so a concurrent request()
            // cannot interleave between the two updates
            let next = {
                let mut state = self.state.lock();
                let next = state.pending.take();
                state.running = next.is_some();
                self.status_tx.send_modify(|s| {
                    s.completed += 1;
                    s.last = Some(summary);
                    s.running = next.is_some();
                });
                next
            };

            match next {
                Some(pending) => roots = pending,
                None => break,
            }
        }
    }

    pub fn status(&self) -> ScanStatus {
        self.status_tx.borrow().clone()
    }

    /// Wait until no scan is running or queued.
    pub async fn wait_idle(&self) -> ScanStatus {
        let mut rx = self.status_tx.subscribe();
        let status = match rx.wait_for(|s| !s.running).await {
            Ok(status) => status.clone(),
            Err(_) => self.status(),
        };
        status
    }
}

pub struct Station {
    channels: Arc<dyn ChannelStore>,
    library: Arc<dyn LibraryStore>,
    coordinator: Arc<ScanCoordinator>,
    mode: MatchMode,
}

impl Station {
    pub fn new(
        channels: Arc<dyn ChannelStore>,
        library: Arc<dyn LibraryStore>,
        probe: Arc<dyn DurationProbe>,
        config: &Config,
    ) -> Self {
        let scanner = LibraryScanner::new(probe, config);
        let coordinator = Arc::new(ScanCoordinator::new(scanner, Arc::clone(&library)));

        Self {
            channels,
            library,
            coordinator,
            mode: config.match_mode(),
        }
    }

    /// Open the JSON stores in `data_dir` and probe with ffprobe.
    pub fn open(data_dir: &Path, config: &Config) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;

        Ok(Self::new(
            Arc::new(JsonChannelStore::new(data_dir)),
            Arc::new(JsonLibraryStore::open(data_dir)),
            Arc::new(FfprobeProbe::from_config(config)),
            config,
        ))
    }

    pub fn match_mode(&self) -> MatchMode {
        self.mode
    }

    pub fn list_channels(&self) -> Vec<Channel> {
        self.channels.list()
    }

    pub fn library(&self) -> Arc<Library> {
        self.library.current()
    }

    /// What is on air right now. `None` for unknown channels too.
    pub fn compute_playing(&self, channel_id: &str) -> Option<PlayingStatus> {
        self.compute_playing_at(channel_id, wall_clock_secs())
    }

    pub fn compute_playing_at(&self, channel_id: &str, now: f64) -> Option<PlayingStatus> {
        let channels = self.channels.list();
        let channel = channels.iter().find(|c| c.id == channel_id)?;
        let library = self.library.current();

        playing_on(&library, channel, now, self.mode)
    }

    pub fn compute_all_playing(&self) -> BTreeMap<String, Option<PlayingStatus>> {
        self.compute_all_playing_at(wall_clock_secs())
    }

    /// Every channel at the same instant, against the same library snapshot.
    pub fn compute_all_playing_at(&self, now: f64) -> BTreeMap<String, Option<PlayingStatus>> {
        let channels = self.channels.list();
        let library = self.library.current();
        let mut statuses = BTreeMap::new();

        for channel in &channels {
            // first definition of a duplicated id wins, like single lookups
            statuses
                .entry(channel.id.clone())
                .or_insert_with(|| playing_on(&library, channel, now, self.mode));
        }

        statuses
    }

    /// Persist `channels` and rescan every show they reference.
    pub fn set_channels(&self, channels: Vec<Channel>) -> Result<ScanTicket> {
        let roots = show_union(&channels);
        self.channels.replace(channels)?;
        self.scan(roots)
    }

    /// Trigger an asynchronous library replacement from `roots`.
    pub fn scan(&self, roots: Vec<String>) -> Result<ScanTicket> {
        self.coordinator.request(roots)
    }

    /// Full library scan over all channels' shows.
    pub fn rescan_all(&self) -> Result<ScanTicket> {
        self.scan(show_union(&self.channels.list()))
    }

    pub fn scan_status(&self) -> ScanStatus {
        self.coordinator.status()
    }

    pub async fn wait_for_scans(&self) -> ScanStatus {
        self.coordinator.wait_idle().await
    }
}

/// De-duplicated union of every channel's show roots, first-seen order.
pub fn show_union(channels: &[Channel]) -> Vec<String> {
    let all: Vec<String> = channels.iter().flat_map(|c| c.shows.iter().cloned()).collect();
    dedup_roots(&all)
}
