// Tests for store durability and snapshot atomicity

use super::common::episode;
use std::fs;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;
use virtual_tv::core::store::{
    ChannelStore, JsonChannelStore, JsonLibraryStore, LibraryStore, CHANNELS_FILE, LIBRARY_FILE,
};
use virtual_tv::{Channel, Library};

#[test]
fn test_store_files_use_legacy_json_shape() {
    let temp_dir = TempDir::new().unwrap();

    JsonChannelStore::new(temp_dir.path())
        .replace(vec![Channel::new("1", "One", vec!["/tv/A".into()])])
        .unwrap();
    JsonLibraryStore::open(temp_dir.path())
        .replace(Library::new(vec![episode("/tv/A/x.mp4", 12.5)]))
        .unwrap();

    let channels: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp_dir.path().join(CHANNELS_FILE)).unwrap())
            .unwrap();
    assert_eq!(channels[0]["shows"][0], "/tv/A");

    let library: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp_dir.path().join(LIBRARY_FILE)).unwrap())
            .unwrap();
    assert_eq!(library["episodes"][0]["duration"], 12.5);
}

#[test]
fn test_corrupt_library_degrades_to_empty() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(LIBRARY_FILE), "{\"episodes\": [").unwrap();

    let store = JsonLibraryStore::open(temp_dir.path());
    assert!(store.current().is_empty());

    // A later scan still publishes normally
    store
        .replace(Library::new(vec![episode("/tv/A/x.mp4", 1.0)]))
        .unwrap();
    assert_eq!(store.current().len(), 1);
}

#[test]
fn test_readers_never_see_partial_snapshots() {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(JsonLibraryStore::open(temp_dir.path()));

    let small = Library::new(vec![episode("/tv/A/1.mp4", 1.0)]);
    let large = Library::new((0..50).map(|i| episode(&format!("/tv/B/{}.mp4", i), 2.0)).collect());
    store.replace(small.clone()).unwrap();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..200 {
                    let snapshot = store.current();
                    assert!(snapshot.len() == 1 || snapshot.len() == 50);
                    let durations_agree = snapshot
                        .episodes
                        .iter()
                        .all(|e| e.duration == snapshot.episodes[0].duration);
                    assert!(durations_agree);
                }
            })
        })
        .collect();

    for i in 0..20 {
        let next = if i % 2 == 0 { large.clone() } else { small.clone() };
        store.replace(next).unwrap();
    }

    for reader in readers {
        reader.join().unwrap();
    }
}
