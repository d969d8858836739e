//! Durable state: channel definitions and the scanned library.
//!
//! Readers always get a whole snapshot. File-backed stores write to a
//! temporary file in the target directory and rename it over the old one,
//! so a concurrent reader sees either the previous file or the new one.
//! Unreadable or malformed files degrade to an empty collection and are
//! logged; a status query never fails because of a bad store.

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;

use crate::core::model::{Channel, Library};
use crate::error::{Result, VtvError};

pub const CHANNELS_FILE: &str = "channels.json";
pub const LIBRARY_FILE: &str = "library.json";

/// Ordered channel definitions. Read-heavy and editable from outside.
pub trait ChannelStore: Send + Sync {
    fn list(&self) -> Vec<Channel>;
    fn replace(&self, channels: Vec<Channel>) -> Result<()>;
}

/// The current library snapshot. Only the scanner replaces it.
pub trait LibraryStore: Send + Sync {
    fn current(&self) -> Arc<Library>;
    fn replace(&self, library: Library) -> Result<()>;
}

/// Channels kept in `channels.json`.
///
/// Every `list()` re-reads the file so hand edits are picked up without a
/// restart.
pub struct JsonChannelStore {
    path: PathBuf,
}

impl JsonChannelStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(CHANNELS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChannelStore for JsonChannelStore {
    fn list(&self) -> Vec<Channel> {
        read_json_or_default(&self.path)
    }

    fn replace(&self, channels: Vec<Channel>) -> Result<()> {
        write_json_atomic(&self.path, &channels)?;
        log::info!("Saved {} channel(s) to {:?}", channels.len(), self.path);
        Ok(())
    }
}

/// Library kept in `library.json`, served from an in-memory snapshot.
pub struct JsonLibraryStore {
    path: PathBuf,
    snapshot: RwLock<Arc<Library>>,
}

impl JsonLibraryStore {
    /// Open the store, loading whatever library is on disk.
    pub fn open(data_dir: &Path) -> Self {
        let path = data_dir.join(LIBRARY_FILE);
        let library: Library = read_json_or_default(&path);
        log::debug!("Loaded {} episode(s) from {:?}", library.len(), path);

        Self {
            path,
            snapshot: RwLock::new(Arc::new(library)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LibraryStore for JsonLibraryStore {
    fn current(&self) -> Arc<Library> {
        self.snapshot.read().clone()
    }

    fn replace(&self, library: Library) -> Result<()> {
        // Persist first: if the write fails, readers keep the old snapshot
        write_json_atomic(&self.path, &library)?;
        *self.snapshot.write() = Arc::new(library);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryChannelStore {
    channels: RwLock<Vec<Channel>>,
}

impl MemoryChannelStore {
    pub fn new(channels: Vec<Channel>) -> Self {
        Self {
            channels: RwLock::new(channels),
        }
    }
}

impl ChannelStore for MemoryChannelStore {
    fn list(&self) -> Vec<Channel> {
        self.channels.read().clone()
    }

    fn replace(&self, channels: Vec<Channel>) -> Result<()> {
        *self.channels.write() = channels;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryLibraryStore {
    snapshot: RwLock<Arc<Library>>,
}

impl MemoryLibraryStore {
    pub fn new(library: Library) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(library)),
        }
    }
}

impl LibraryStore for MemoryLibraryStore {
    fn current(&self) -> Arc<Library> {
        self.snapshot.read().clone()
    }

    fn replace(&self, library: Library) -> Result<()> {
        *self.snapshot.write() = Arc::new(library);
        Ok(())
    }
}

/// Read a JSON file, falling back to `T::default()` when it is missing,
/// empty, unreadable or malformed.
pub fn read_json_or_default<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        return T::default();
    }

    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            log::warn!("Could not read {:?}: {}", path, e);
            return T::default();
        }
    };

    if data.iter().all(u8::is_ascii_whitespace) {
        return T::default();
    }

    serde_json::from_slice(&data).unwrap_or_else(|e| {
        log::warn!("Could not parse {:?}, treating it as empty: {}", path, e);
        T::default()
    })
}

/// Serialize `value` to `path` through a temp file and an atomic rename.
pub fn write_json_atomic<T>(path: &Path, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut tmp, value)?;
    tmp.write_all(b"\n")?;
    tmp.as_file().sync_all()?;

    tmp.persist(path)
        .map_err(|e| VtvError::store(format!("failed to replace {:?}: {}", path, e.error)))?;

    Ok(())
}
