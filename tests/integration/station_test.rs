// Tests for the station facade: status queries and single-flight scanning

use super::common::{episode, path_str, touch, GatedProbe, TableProbe};
use std::sync::Arc;
use tempfile::TempDir;
use virtual_tv::core::station::{show_union, ScanTicket};
use virtual_tv::core::store::{
    ChannelStore, JsonChannelStore, JsonLibraryStore, LibraryStore, MemoryChannelStore,
    MemoryLibraryStore,
};
use virtual_tv::{Channel, Config, Library, Station};

#[tokio::test]
async fn test_set_channels_persists_and_scans_union() {
    let data_dir = TempDir::new().unwrap();
    let media = TempDir::new().unwrap();
    let show_a = media.path().join("A");
    let show_b = media.path().join("B");
    touch(&show_a, "a1.mp4");
    touch(&show_b, "b1.mp4");

    let channels: Arc<dyn ChannelStore> = Arc::new(JsonChannelStore::new(data_dir.path()));
    let library: Arc<dyn LibraryStore> = Arc::new(JsonLibraryStore::open(data_dir.path()));
    let station = Station::new(
        Arc::clone(&channels),
        Arc::clone(&library),
        Arc::new(TableProbe::new(&[("a1.mp4", 20.0), ("b1.mp4", 40.0)])),
        &Config::default(),
    );

    let ticket = station
        .set_channels(vec![
            Channel::new("1", "One", vec![path_str(&show_a), path_str(&show_b)]),
            Channel::new("2", "Two", vec![path_str(&show_b)]),
        ])
        .unwrap();
    assert_eq!(ticket, ScanTicket::Started);

    let status = station.wait_for_scans().await;
    let last = status.last.unwrap();
    assert_eq!(last.episodes, 2);
    assert_eq!(last.roots, 2);
    assert!(last.error.is_none());

    assert_eq!(channels.list().len(), 2);
    assert_eq!(JsonLibraryStore::open(data_dir.path()).current().len(), 2);

    // Channel 1 cycles a1 (20 s) then b1 (40 s)
    let one = station.compute_playing_at("1", 65.0).unwrap();
    assert_eq!(one.episode.name, "a1");
    assert_eq!(one.elapsed, 5.0);

    let two = station.compute_playing_at("2", 65.0).unwrap();
    assert_eq!(two.episode.name, "b1");
    assert_eq!(two.elapsed, 25.0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_overlapping_scan_requests_are_coalesced() {
    let media = TempDir::new().unwrap();
    let first = media.path().join("First");
    let second = media.path().join("Second");
    let third = media.path().join("Third");
    touch(&first, "f.mp4");
    touch(&second, "s.mp4");
    touch(&third, "t.mp4");

    let (probe, gate) = GatedProbe::new();
    let station = Station::new(
        Arc::new(MemoryChannelStore::default()),
        Arc::new(MemoryLibraryStore::default()),
        Arc::new(probe),
        &Config::default(),
    );

    assert_eq!(station.scan(vec![path_str(&first)]).unwrap(), ScanTicket::Started);
    assert_eq!(station.scan(vec![path_str(&second)]).unwrap(), ScanTicket::Queued);
    assert_eq!(station.scan(vec![path_str(&third)]).unwrap(), ScanTicket::Queued);
    assert!(station.scan_status().running);

    gate.send(true).unwrap();
    let status = station.wait_for_scans().await;

    // The second request was superseded by the third before it could run
    assert_eq!(status.completed, 2);
    assert!(!status.running);

    let library = station.library();
    assert_eq!(library.len(), 1);
    assert_eq!(library.episodes[0].name, "t");
}

#[tokio::test]
async fn test_rescan_all_uses_every_channel() {
    let media = TempDir::new().unwrap();
    let show = media.path().join("Show");
    touch(&show, "ep.mkv");

    let station = Station::new(
        Arc::new(MemoryChannelStore::new(vec![Channel::new(
            "1",
            "One",
            vec![path_str(&show)],
        )])),
        Arc::new(MemoryLibraryStore::default()),
        Arc::new(TableProbe::new(&[("ep.mkv", 90.0)])),
        &Config::default(),
    );

    assert_eq!(station.rescan_all().unwrap(), ScanTicket::Started);
    station.wait_for_scans().await;

    assert_eq!(station.library().len(), 1);
    assert!(station.compute_playing("1").is_some());
}

#[test]
fn test_status_queries_without_runtime() {
    let station = Station::new(
        Arc::new(MemoryChannelStore::new(vec![
            Channel::new("a", "Alpha", vec!["/tv/A".into()]),
            Channel::new("b", "Beta", vec!["/tv/B".into()]),
        ])),
        Arc::new(MemoryLibraryStore::new(Library::new(vec![
            episode("/tv/A/1.mp4", 30.0),
            episode("/tv/A/2.mp4", 30.0),
        ]))),
        Arc::new(TableProbe::new(&[])),
        &Config::default(),
    );

    let all = station.compute_all_playing_at(45.0);
    assert_eq!(all["a"].as_ref().unwrap().episode.name, "2");
    assert!(all["b"].is_none());
    assert!(station.compute_playing_at("missing", 45.0).is_none());
}

#[test]
fn test_legacy_prefix_mode_from_config() {
    let config = Config {
        legacy_prefix_match: true,
        ..Default::default()
    };
    let station = Station::new(
        Arc::new(MemoryChannelStore::new(vec![Channel::new(
            "1",
            "One",
            vec!["/media/Show1".into()],
        )])),
        Arc::new(MemoryLibraryStore::new(Library::new(vec![episode(
            "/media/Show10/ep.mp4",
            60.0,
        )]))),
        Arc::new(TableProbe::new(&[])),
        &config,
    );

    assert!(station.compute_playing_at("1", 10.0).is_some());
}

#[test]
fn test_show_union_first_seen_order() {
    let channels = vec![
        Channel::new("1", "One", vec!["/tv/B".into(), "/tv/A".into()]),
        Channel::new("2", "Two", vec!["/tv/A".into(), "/tv/C".into()]),
    ];
    assert_eq!(show_union(&channels), vec!["/tv/B", "/tv/A", "/tv/C"]);
}
