use virtual_tv::core::config::{DEFAULT_EXTENSIONS, DEFAULT_PROBE_TIMEOUT_SECS};
use virtual_tv::core::path_matcher::MatchMode;
use virtual_tv::Config;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(config.data_dir.is_none());
    assert!(config.ffprobe_path.is_none());
    assert_eq!(config.probe_timeout_secs, DEFAULT_PROBE_TIMEOUT_SECS);
    assert_eq!(config.extensions, DEFAULT_EXTENSIONS.map(String::from).to_vec());
}

#[test]
fn test_config_set_and_get_paths() {
    let mut config = Config::default();
    config.set_data_dir("/srv/vtv".to_string());
    config.set_ffprobe_path("/opt/ffprobe".to_string());

    assert_eq!(config.get_data_dir(), Some(&"/srv/vtv".to_string()));
    assert_eq!(config.get_ffprobe_path(), Some(&"/opt/ffprobe".to_string()));
}

#[test]
fn test_config_json_roundtrip() {
    let config = Config {
        legacy_prefix_match: true,
        probe_timeout_secs: 5,
        ..Default::default()
    };

    let json = serde_json::to_string(&config).unwrap();
    let back: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(back.match_mode(), MatchMode::Prefix);
    assert_eq!(back.probe_timeout_secs, 5);
}

#[test]
fn test_config_load_does_not_panic() {
    // Might pick up a real user config, which is fine
    let _config = Config::load();
}
