use super::validation::validate_config;
use super::*;
use crate::common::constants::*;
use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn write_config(dir: &std::path::Path, content: &str) -> PathBuf {
    let path = dir.join(CONFIG_FILE_NAME);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_defaults_when_fields_missing() {
    let config = Config::default();
    assert_eq!(config.distance_filter(), 0.5);
    assert_eq!(config.min_interval_ms(), 1000);
    assert_eq!(config.fix_timeout_ms(), 30_000);
    assert_eq!(config.replay_interval_ms(), 0);
    assert_eq!(config.vibration_cancel_ms(), 3000);
    assert_eq!(config.alert_sound(), "alert.mp3");
}

#[test]
fn test_load_full_config() {
    let dir = tempdir().unwrap();
    let path = write_config(
        dir.path(),
        r#"
distance_filter = 2.5
min_interval_ms = 500
fix_timeout_ms = 15000
replay_interval_ms = 250
vibration_cancel_ms = 1000
alert_sound = "siren.wav"
"#,
    );

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.distance_filter(), 2.5);
    assert_eq!(config.min_interval_ms(), 500);
    assert_eq!(config.fix_timeout_ms(), 15_000);
    assert_eq!(config.replay_interval_ms(), 250);
    assert_eq!(config.vibration_cancel_ms(), 1000);
    assert_eq!(config.alert_sound(), "siren.wav");
}

#[test]
fn test_partial_config_keeps_defaults() {
    let dir = tempdir().unwrap();
    let path = write_config(dir.path(), "fix_timeout_ms = 5000\n");
    let config = load_from_path(&path).unwrap();
    assert_eq!(config.fix_timeout_ms(), 5000);
    assert_eq!(config.distance_filter(), DEFAULT_DISTANCE_FILTER);
}

#[test]
fn test_load_from_missing_path_fails() {
    let dir = tempdir().unwrap();
    assert!(load_from_path(&dir.path().join("absent.toml")).is_err());
}

#[test]
fn test_malformed_toml_fails() {
    let dir = tempdir().unwrap();
    let path = write_config(dir.path(), "distance_filter = \"far\"\n");
    assert!(load_from_path(&path).is_err());
}

#[test]
fn test_validation_ranges() {
    let bad = [
        Config {
            distance_filter: Some(-1.0),
            ..Config::default()
        },
        Config {
            distance_filter: Some(1000.5),
            ..Config::default()
        },
        Config {
            min_interval_ms: Some(60_001),
            ..Config::default()
        },
        Config {
            fix_timeout_ms: Some(999),
            ..Config::default()
        },
        Config {
            fix_timeout_ms: Some(600_001),
            ..Config::default()
        },
        Config {
            replay_interval_ms: Some(60_001),
            ..Config::default()
        },
        Config {
            vibration_cancel_ms: Some(60_001),
            ..Config::default()
        },
        Config {
            alert_sound: Some("  ".to_string()),
            ..Config::default()
        },
    ];
    for config in &bad {
        assert!(validate_config(config).is_err(), "accepted {config:?}");
    }

    let edges = Config {
        distance_filter: Some(0.0),
        min_interval_ms: Some(0),
        fix_timeout_ms: Some(MINIMUM_FIX_TIMEOUT_MS),
        replay_interval_ms: Some(MAXIMUM_REPLAY_INTERVAL_MS),
        vibration_cancel_ms: Some(0),
        alert_sound: Some("a.wav".to_string()),
    };
    assert!(validate_config(&edges).is_ok());
}

#[test]
fn test_validation_error_names_field() {
    let config = Config {
        fix_timeout_ms: Some(10),
        ..Config::default()
    };
    let message = validate_config(&config).unwrap_err().to_string();
    assert!(message.contains("fix_timeout_ms"), "{message}");
}

#[test]
#[serial]
fn test_load_uses_xdg_config_home() {
    crate::logger::Log::set_enabled(false);
    let temp_dir = tempdir().unwrap();
    let config_dir = temp_dir.path().join(CONFIG_DIR_NAME);
    fs::create_dir_all(&config_dir).unwrap();
    write_config(&config_dir, "alert_sound = \"horn.mp3\"\n");

    let original = std::env::var("XDG_CONFIG_HOME").ok();
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    let path = get_config_path().unwrap();
    let config = load().unwrap();

    unsafe {
        match original {
            Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    assert_eq!(path, config_dir.join(CONFIG_FILE_NAME));
    assert_eq!(config.alert_sound(), "horn.mp3");
}

#[test]
#[serial]
fn test_load_without_file_yields_defaults() {
    crate::logger::Log::set_enabled(false);
    let temp_dir = tempdir().unwrap();

    let original = std::env::var("XDG_CONFIG_HOME").ok();
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    let config = load().unwrap();

    unsafe {
        match original {
            Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    assert_eq!(config, Config::default());
}
