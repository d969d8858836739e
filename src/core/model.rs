//! Data model shared by the scanner, the stores and the scheduler.
//!
//! The JSON shapes match the on-disk `channels.json` and `library.json`
//! files, so existing data directories keep loading.

use serde::{Deserialize, Serialize};

/// A named, looping virtual broadcast defined by a set of show directories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub shows: Vec<String>,
}

impl Channel {
    pub fn new<I, N>(id: I, name: N, shows: Vec<String>) -> Self
    where
        I: Into<String>,
        N: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            shows,
        }
    }
}

/// One media file with a known duration, tagged with its owning show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub path: String,
    pub name: String,
    pub show: String,
    /// Playable length in seconds
    pub duration: f64,
}

impl Episode {
    /// Duration used for cycle arithmetic.
    ///
    /// Hand-edited libraries can carry negative or non-finite values; those
    /// episodes occupy no airtime instead of corrupting the cycle length.
    pub fn airtime(&self) -> f64 {
        if self.duration.is_finite() && self.duration > 0.0 {
            self.duration
        } else {
            0.0
        }
    }
}

/// Snapshot of every scanned episode. Replaced wholesale on each scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Library {
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

impl Library {
    pub fn new(episodes: Vec<Episode>) -> Self {
        Self { episodes }
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }
}

/// Point-in-time answer to "what is airing now" on a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayingStatus {
    pub episode: Episode,
    /// Seconds into the episode
    pub elapsed: f64,
    /// Episode duration
    pub total: f64,
    /// Channel display name
    pub channel: String,
    /// Seconds until the episode ends
    pub next_in: f64,
}
