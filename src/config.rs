//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/bstheight/bstheight.toml`
//! 3. Local config: file passed with `--config`
//! 4. Environment variables: `BSTHEIGHT_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::errors::{TreeError, TreeResult};
use crate::height::Strategy;

/// Default level limit, the deepest the recursive strategy will descend.
pub const DEFAULT_MAX_DEPTH: usize = crate::height::MAX_RECURSIVE_LEVELS;

pub const DEFAULT_MAX_NODES: usize = 1_000_000;

/// Unified configuration for bstheight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Traversal used to compute heights
    pub strategy: Strategy,
    /// Maximum number of levels accepted (None: unlimited)
    pub max_depth: Option<usize>,
    /// Maximum number of node values accepted by the parser (None: unlimited)
    pub max_nodes: Option<usize>,
    /// Additional absent-node token for level-order input
    pub absent_marker: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            max_depth: Some(DEFAULT_MAX_DEPTH),
            max_nodes: Some(DEFAULT_MAX_NODES),
            absent_marker: None,
        }
    }
}

/// Raw settings for intermediate parsing (Option to detect "not specified").
///
/// A limit of 0 in a config file means "unlimited".
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub strategy: Option<Strategy>,
    pub max_depth: Option<usize>,
    pub max_nodes: Option<usize>,
    pub absent_marker: Option<String>,
}

/// Get the XDG config directory for bstheight.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bstheight").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("bstheight.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> TreeResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| TreeError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| TreeError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn limit(value: usize) -> Option<usize> {
    (value != 0).then_some(value)
}

impl Settings {
    /// Merge overlay config onto self: overlay wins where specified.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            strategy: overlay.strategy.unwrap_or(self.strategy),
            max_depth: overlay.max_depth.map_or(self.max_depth, limit),
            max_nodes: overlay.max_nodes.map_or(self.max_nodes, limit),
            absent_marker: overlay
                .absent_marker
                .clone()
                .or_else(|| self.absent_marker.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional config file layered over the global one; must exist
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/bstheight/bstheight.toml`
    /// 3. Local config file
    /// 4. Environment variables: `BSTHEIGHT_*` prefix
    #[instrument(level = "debug")]
    pub fn load(local: Option<&Path>) -> TreeResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(local_path) = local {
            if !local_path.exists() {
                return Err(TreeError::FileNotFound(local_path.to_path_buf()));
            }
            debug!("local config: {}", local_path.display());
            current = current.merge_with(&load_raw_settings(local_path)?);
        }

        Self::apply_env_overrides(current)
    }

    /// Load only defaults and a single file, ignoring global config and env.
    pub fn load_file(path: &Path) -> TreeResult<Self> {
        Ok(Self::default().merge_with(&load_raw_settings(path)?))
    }

    /// Apply BSTHEIGHT_* environment variables as explicit overrides.
    fn apply_env_overrides(settings: Self) -> TreeResult<Self> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("BSTHEIGHT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;
        Self::apply_overrides(settings, &config)
    }

    fn apply_overrides(mut settings: Self, config: &Config) -> TreeResult<Self> {
        if let Ok(val) = config.get_string("strategy") {
            settings.strategy = val.parse()?;
        }
        if let Ok(val) = config.get_string("max_depth") {
            settings.max_depth = limit(parse_usize("max_depth", &val)?);
        }
        if let Ok(val) = config.get_string("max_nodes") {
            settings.max_nodes = limit(parse_usize("max_nodes", &val)?);
        }
        if let Ok(val) = config.get_string("absent_marker") {
            settings.absent_marker = Some(val);
        }
        Ok(settings)
    }
}

fn parse_usize(key: &str, value: &str) -> TreeResult<usize> {
    value.trim().parse().map_err(|_| TreeError::Config {
        message: format!("{}: expected a non-negative integer, got {:?}", key, value),
    })
}

fn config_err(e: ConfigError) -> TreeError {
    TreeError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overlay_wins() {
        let overlay = RawSettings {
            strategy: Some(Strategy::Queue),
            max_depth: Some(10),
            ..RawSettings::default()
        };
        let merged = Settings::default().merge_with(&overlay);
        assert_eq!(merged.strategy, Strategy::Queue);
        assert_eq!(merged.max_depth, Some(10));
        assert_eq!(merged.max_nodes, Some(DEFAULT_MAX_NODES));
        assert_eq!(merged.absent_marker, None);
    }

    #[test]
    fn test_zero_limit_means_unlimited() {
        let overlay = RawSettings {
            max_depth: Some(0),
            max_nodes: Some(0),
            ..RawSettings::default()
        };
        let merged = Settings::default().merge_with(&overlay);
        assert_eq!(merged.max_depth, None);
        assert_eq!(merged.max_nodes, None);
    }

    #[test]
    fn test_overrides_from_config_source() {
        let config = Config::builder()
            .set_override("strategy", "stack")
            .unwrap()
            .set_override("max_depth", "0")
            .unwrap()
            .set_override("absent_marker", "x")
            .unwrap()
            .build()
            .unwrap();
        let settings = Settings::apply_overrides(Settings::default(), &config).unwrap();
        assert_eq!(settings.strategy, Strategy::Stack);
        assert_eq!(settings.max_depth, None);
        assert_eq!(settings.absent_marker.as_deref(), Some("x"));
    }

    #[test]
    fn test_invalid_override() {
        let config = Config::builder()
            .set_override("max_nodes", "many")
            .unwrap()
            .build()
            .unwrap();
        let result = Settings::apply_overrides(Settings::default(), &config);
        assert!(matches!(result, Err(TreeError::Config { .. })));
    }
}
