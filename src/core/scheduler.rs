//! Cycle scheduler: maps a wall-clock instant onto an episode of a pool.
//!
//! A channel's pool is played back to back, forever, with the cycle anchored
//! at the Unix epoch. Every process that holds the same pool and reads the
//! same wall clock therefore computes the same answer, without any running
//! playback state.

use chrono::Utc;

use crate::core::model::{Channel, Episode, Library, PlayingStatus};
use crate::core::path_matcher::{matches_any, MatchMode};

/// Seconds since the Unix epoch, from the wall clock.
///
/// Deliberately not a monotonic clock: separate processes must agree on the
/// absolute phase of every cycle.
pub fn wall_clock_secs() -> f64 {
    let now = Utc::now();
    now.timestamp() as f64 + f64::from(now.timestamp_subsec_nanos()) / 1e9
}

/// Collect the episodes of `library` that belong to `channel`, in library
/// order. The order decides where cycle boundaries fall, so it must not
/// depend on anything but the snapshot itself.
pub fn build_pool<'a>(library: &'a Library, channel: &Channel, mode: MatchMode) -> Vec<&'a Episode> {
    library
        .episodes
        .iter()
        .filter(|ep| matches_any(&ep.path, &channel.shows, mode))
        .collect()
}

/// Sum of the pool's airtime, i.e. the cycle length.
pub fn cycle_length(pool: &[&Episode]) -> f64 {
    pool.iter().map(|ep| ep.airtime()).sum()
}

/// Find what is on air at `now` (seconds since the epoch).
///
/// Returns `None` for an empty pool, a zero-length cycle or a non-finite
/// clock reading. Episode intervals are half-open `[start, start + d)`, so an
/// instant that lands exactly on a boundary plays the next episode from 0.
pub fn compute_playing(pool: &[&Episode], now: f64, channel_name: &str) -> Option<PlayingStatus> {
    if pool.is_empty() || !now.is_finite() {
        return None;
    }

    let total = cycle_length(pool);
    if total <= 0.0 {
        return None;
    }

    let mut time_in_cycle = now.rem_euclid(total);
    // rem_euclid may round up to `total` for tiny negative inputs
    if time_in_cycle >= total {
        time_in_cycle = 0.0;
    }

    let mut accumulated = 0.0;
    for ep in pool {
        let duration = ep.airtime();
        if time_in_cycle < accumulated + duration {
            let elapsed = time_in_cycle - accumulated;
            return Some(PlayingStatus {
                episode: (*ep).clone(),
                elapsed,
                total: ep.duration,
                channel: channel_name.to_string(),
                next_in: ep.duration - elapsed,
            });
        }
        accumulated += duration;
    }

    None
}

/// Convenience wrapper: pool assembly plus [`compute_playing`] for a channel.
pub fn playing_on(
    library: &Library,
    channel: &Channel,
    now: f64,
    mode: MatchMode,
) -> Option<PlayingStatus> {
    let pool = build_pool(library, channel, mode);
    compute_playing(&pool, now, &channel.name)
}
