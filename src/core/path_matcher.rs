//! Channel membership test for episodes.
//!
//! An episode belongs to a channel when its path lives under one of the
//! channel's show roots. Both sides are normalized to forward slashes first.
//!
//! Two comparison modes exist:
//!
//! - [`MatchMode::Segment`] (default): the root must be followed by a
//!   separator in the episode path, or equal it. `/media/Show1` does not
//!   claim `/media/Show10/ep.mp4`.
//! - [`MatchMode::Prefix`]: plain string prefix, kept for data directories
//!   that were built around the older behavior. It over-matches sibling
//!   directories that share a name prefix.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchMode {
    #[default]
    Segment,
    Prefix,
}

/// Convert a path string to forward-slash form.
pub fn normalize(path: &str) -> String {
    let slashed = if std::path::MAIN_SEPARATOR == '/' {
        path.to_string()
    } else {
        path.replace(std::path::MAIN_SEPARATOR, "/")
    };

    // Windows long-path prefix left behind by canonicalize()
    slashed
        .strip_prefix("//?/")
        .map(str::to_string)
        .unwrap_or(slashed)
}

/// Does `episode_path` fall under `show_root`?
pub fn matches(episode_path: &str, show_root: &str, mode: MatchMode) -> bool {
    let episode = normalize(episode_path);
    let root = normalize(show_root);

    if root.is_empty() {
        return false;
    }

    match mode {
        MatchMode::Prefix => episode.starts_with(&root),
        MatchMode::Segment => {
            let root = trim_trailing_slash(&root);
            match episode.strip_prefix(root) {
                Some("") => true,
                Some(rest) => rest.starts_with('/') || root.ends_with('/'),
                None => false,
            }
        }
    }
}

/// True when the episode matches at least one of the roots.
pub fn matches_any(episode_path: &str, show_roots: &[String], mode: MatchMode) -> bool {
    show_roots
        .iter()
        .any(|root| matches(episode_path, root, mode))
}

fn trim_trailing_slash(root: &str) -> &str {
    let trimmed = root.trim_end_matches('/');
    if trimmed.is_empty() {
        // filesystem root: keep the single slash
        &root[..1]
    } else {
        trimmed
    }
}
