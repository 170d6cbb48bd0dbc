//! Configuration file handling.
//!
//! This module provides loading and saving of depup configuration
//! from a TOML file.
//!
//! # Configuration Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/depup/config.toml`
//! - macOS: `~/Library/Application Support/depup/config.toml`
//! - Windows: `%APPDATA%\depup\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! recursive = true
//! extensions = [".yaml", ".yml", ".tf"]
//!
//! [ignore]
//! paths = ["*/vendor/*", "*.generated.yaml"]
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Application configuration.
///
/// Every field has a default, so a missing config file is equivalent to
/// `Config::default()`. Command-line flags take precedence over the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Whether directory entrypoints are walked recursively when no
    /// `--recursive` flag is given.
    ///
    /// Default: false
    pub recursive: bool,

    /// Which file extensions to pick up when no `--extension` flag is
    /// provided. An empty list selects every supported extension.
    pub extensions: Vec<String>,

    /// Ignore list for skipping files during directory walks.
    #[serde(default)]
    pub ignore: IgnoreConfig,
}

/// Configuration for skipping files by path pattern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreConfig {
    /// Path patterns to exclude from processing.
    ///
    /// Supports glob patterns (e.g., `*/vendor/*`, `*.lock.yaml`);
    /// patterns without a wildcard must match the whole path.
    pub paths: Vec<String>,
}

impl IgnoreConfig {
    /// Check if a file path should be skipped.
    pub fn should_ignore_path(&self, path: &str) -> bool {
        self.paths.iter().any(|pattern| {
            if pattern.contains('*') {
                glob_match(pattern, path)
            } else {
                pattern == path
            }
        })
    }
}

/// Simple glob matching (supports * as wildcard).
pub(crate) fn glob_match(pattern: &str, text: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();

    if parts.len() == 1 {
        return pattern == text;
    }

    let mut remaining = text;

    // Check prefix (before first *)
    if !parts[0].is_empty() {
        if !remaining.starts_with(parts[0]) {
            return false;
        }
        remaining = &remaining[parts[0].len()..];
    }

    // Check suffix (after last *)
    let last_part = parts[parts.len() - 1];
    if !last_part.is_empty() {
        if !remaining.ends_with(last_part) {
            return false;
        }
        remaining = &remaining[..remaining.len() - last_part.len()];
    }

    // Check middle parts
    for part in &parts[1..parts.len() - 1] {
        if part.is_empty() {
            continue;
        }
        if let Some(pos) = remaining.find(part) {
            remaining = &remaining[pos + part.len()..];
        } else {
            return false;
        }
    }

    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recursive: false,
            extensions: Vec::new(),
            ignore: IgnoreConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the config file.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves the configuration to the config file.
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("depup")
            .join("config.toml")
    }

    /// Generates a string containing the default configuration.
    ///
    /// This is useful for showing users what the default config looks like.
    pub fn generate_default_config() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_match_exact() {
        assert!(glob_match("deploy.yaml", "deploy.yaml"));
        assert!(!glob_match("deploy.yaml", "service.yaml"));
    }

    #[test]
    fn test_glob_match_prefix() {
        assert!(glob_match("vendor/*", "vendor/aws.tf"));
        assert!(glob_match("vendor/*", "vendor/nested/module.tf"));
        assert!(!glob_match("vendor/*", "modules/aws.tf"));
    }

    #[test]
    fn test_glob_match_suffix() {
        assert!(glob_match("*.lock.yaml", "charts/deps.lock.yaml"));
        assert!(!glob_match("*.lock.yaml", "charts/deps.yaml"));
    }

    #[test]
    fn test_glob_match_contains() {
        assert!(glob_match("*/generated/*", "infra/generated/main.tf"));
        assert!(!glob_match("*/generated/*", "infra/main.tf"));
    }

    #[test]
    fn test_ignore_config_paths() {
        let config = IgnoreConfig {
            paths: vec!["*/vendor/*".to_string(), ".env.sample".to_string()],
        };

        assert!(config.should_ignore_path("terraform/vendor/aws.tf"));
        assert!(config.should_ignore_path(".env.sample"));
        assert!(!config.should_ignore_path("terraform/main.tf"));
        assert!(!config.should_ignore_path(".env.local"));
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert!(!config.recursive);
        assert!(config.extensions.is_empty());
        assert!(config.ignore.paths.is_empty());
    }

    #[test]
    fn test_default_config_round_trips() {
        let rendered = Config::generate_default_config();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert!(!parsed.recursive);
    }
}
