// Tests for library scanning: probe failures, show naming and ordering

use super::common::{path_str, touch, TableProbe};
use std::sync::Arc;
use tempfile::TempDir;
use virtual_tv::core::scanner::LibraryScanner;
use virtual_tv::Config;

fn scanner(entries: &[(&str, f64)]) -> LibraryScanner {
    LibraryScanner::new(Arc::new(TableProbe::new(entries)), &Config::default())
}

#[tokio::test]
async fn test_failed_probe_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("Futurama");
    touch(&root, "e01.mp4");
    touch(&root, "e02.mkv");
    touch(&root, "corrupt.avi");

    let scanner = scanner(&[("e01.mp4", 1320.0), ("e02.mkv", 1310.5)]);
    let report = scanner.scan(&[path_str(&root)]).await;

    assert_eq!(report.library.len(), 2);
    assert_eq!(report.skipped, 1);
    let names: Vec<&str> = report.library.episodes.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["e01", "e02"]);
}

#[tokio::test]
async fn test_show_is_root_name_not_subfolder() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("Simpsons");
    touch(&root, "Season 01/s01e01.mkv");
    touch(&root, "Season 02/s02e01.mkv");

    let scanner = scanner(&[("s01e01.mkv", 1400.0), ("s02e01.mkv", 1380.0)]);
    let report = scanner.scan(&[path_str(&root)]).await;

    assert_eq!(report.library.len(), 2);
    assert!(report.library.episodes.iter().all(|e| e.show == "Simpsons"));
}

#[tokio::test]
async fn test_only_recognized_extensions_are_probed() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("Show");
    touch(&root, "ep.MP4");
    touch(&root, "ep.srt");
    touch(&root, "cover.jpg");
    touch(&root, "notes.txt");

    // The table knows the subtitle too; it must never be asked about it
    let scanner = scanner(&[("ep.MP4", 60.0), ("ep.srt", 60.0)]);
    let report = scanner.scan(&[path_str(&root)]).await;

    assert_eq!(report.library.len(), 1);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.library.episodes[0].name, "ep");
}

#[tokio::test]
async fn test_order_is_stable_across_scans() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("Show");
    for name in ["c.mp4", "a.mp4", "b/z.mp4", "b/y.mp4"] {
        touch(&root, name);
    }

    let scanner = scanner(&[("a.mp4", 1.0), ("c.mp4", 1.0), ("y.mp4", 1.0), ("z.mp4", 1.0)]);
    let first = scanner.scan(&[path_str(&root)]).await;
    let second = scanner.scan(&[path_str(&root)]).await;

    assert_eq!(first.library, second.library);
    let names: Vec<&str> = first.library.episodes.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["a", "y", "z", "c"]);
}

#[tokio::test]
async fn test_missing_root_is_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("Show");
    touch(&root, "a.mp4");
    let missing = temp_dir.path().join("Gone");

    let scanner = scanner(&[("a.mp4", 30.0)]);
    let report = scanner.scan(&[path_str(&missing), path_str(&root)]).await;

    assert_eq!(report.library.len(), 1);
    assert_eq!(report.roots.len(), 2);
}

#[tokio::test]
async fn test_duplicate_and_overlapping_roots_yield_unique_paths() {
    let temp_dir = TempDir::new().unwrap();
    let parent = temp_dir.path().join("tv");
    let show = parent.join("Show");
    touch(&show, "a.mp4");

    let scanner = scanner(&[("a.mp4", 30.0)]);
    let report = scanner
        .scan(&[path_str(&show), path_str(&parent), path_str(&show)])
        .await;

    assert_eq!(report.roots.len(), 2);
    assert_eq!(report.library.len(), 1);
    // First root to reach the file owns it
    assert_eq!(report.library.episodes[0].show, "Show");
}

#[tokio::test]
async fn test_scan_never_merges_previous_results() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("Show");
    let doomed = touch(&root, "old.mp4");
    touch(&root, "keep.mp4");

    let scanner = scanner(&[("old.mp4", 10.0), ("keep.mp4", 10.0), ("new.mp4", 10.0)]);
    assert_eq!(scanner.scan(&[path_str(&root)]).await.library.len(), 2);

    std::fs::remove_file(doomed).unwrap();
    touch(&root, "new.mp4");

    let report = scanner.scan(&[path_str(&root)]).await;
    let names: Vec<&str> = report.library.episodes.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["keep", "new"]);
}

#[cfg(unix)]
#[tokio::test]
async fn test_timed_out_file_is_counted_as_skipped() {
    use super::common::fake_ffprobe;
    use std::time::{Duration, Instant};
    use virtual_tv::core::probe::FfprobeProbe;

    let tools = TempDir::new().unwrap();
    let media = TempDir::new().unwrap();
    let root = media.path().join("Stuck");
    touch(&root, "e01.mp4");

    let probe = FfprobeProbe::new(
        fake_ffprobe(tools.path(), "exec sleep 30"),
        Duration::from_secs(1),
    );
    let scanner = LibraryScanner::new(Arc::new(probe), &Config::default());

    let started = Instant::now();
    let report = scanner.scan(&[path_str(&root)]).await;

    assert!(report.library.is_empty());
    assert_eq!(report.skipped, 1);
    assert!(started.elapsed() < Duration::from_secs(5));
}
