//! Integration tests for Settings loading from TOML files.
//!
//! These load a single file over the defaults (`Settings::load_file`) so they
//! don't depend on a global config or BSTHEIGHT_* variables on the host.

use std::fs;

use tempfile::TempDir;

use bstheight::config::{Settings, DEFAULT_MAX_DEPTH, DEFAULT_MAX_NODES};
use bstheight::{measure, Node, Strategy, TreeError};

#[test]
fn given_partial_file_when_load_then_unspecified_fields_keep_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bstheight.toml");
    fs::write(&path, "strategy = \"queue\"\n").unwrap();

    let settings = Settings::load_file(&path).expect("load settings");

    assert_eq!(settings.strategy, Strategy::Queue);
    assert_eq!(settings.max_depth, Some(DEFAULT_MAX_DEPTH));
    assert_eq!(settings.max_nodes, Some(DEFAULT_MAX_NODES));
}

#[test]
fn given_zero_limits_when_load_then_unlimited() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bstheight.toml");
    fs::write(&path, "max_depth = 0\nmax_nodes = 0\nabsent_marker = \"~\"\n").unwrap();

    let settings = Settings::load_file(&path).unwrap();

    assert_eq!(settings.max_depth, None);
    assert_eq!(settings.max_nodes, None);
    assert_eq!(settings.absent_marker.as_deref(), Some("~"));
}

#[test]
fn given_unknown_strategy_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bstheight.toml");
    fs::write(&path, "strategy = \"sideways\"\n").unwrap();

    assert!(matches!(
        Settings::load_file(&path),
        Err(TreeError::Config { .. })
    ));
}

#[test]
fn given_missing_local_file_when_load_then_file_not_found() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.toml");
    assert!(matches!(
        Settings::load(Some(&path)),
        Err(TreeError::FileNotFound(_))
    ));
}

#[test]
fn given_settings_round_trip_through_toml_then_equal() {
    let settings = Settings {
        strategy: Strategy::Stack,
        max_depth: Some(12),
        max_nodes: Some(99),
        absent_marker: Some("x".to_string()),
    };
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bstheight.toml");
    fs::write(&path, toml::to_string_pretty(&settings).unwrap()).unwrap();

    assert_eq!(Settings::load_file(&path).unwrap(), settings);
}

#[test]
fn given_depth_limit_when_measure_then_every_strategy_enforces_it() {
    let chain = Node::chain_left(0..10).unwrap();
    for strategy in [Strategy::Recursive, Strategy::Stack, Strategy::Queue] {
        let tight = Settings {
            strategy,
            max_depth: Some(9),
            ..Settings::default()
        };
        assert!(matches!(
            measure(Some(&chain), &tight),
            Err(TreeError::DepthLimitExceeded { limit: 9 })
        ));

        let exact = Settings {
            strategy,
            max_depth: Some(10),
            ..Settings::default()
        };
        assert_eq!(measure(Some(&chain), &exact).unwrap(), 9);

        let unlimited = Settings {
            strategy,
            max_depth: None,
            ..Settings::default()
        };
        assert_eq!(measure(Some(&chain), &unlimited).unwrap(), 9);
    }
}
