//! Disk-backed configuration: server address, last-used parameters, output
//! directory, and UI preferences.

use std::fs;
use std::path::{Path, PathBuf};

use dirs::config_dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::client::DEFAULT_SERVER_URL;
use crate::output::DEFAULT_OUTPUT_DIR;
use crate::params::Parameters;

const CONFIG_DIR_NAME: &str = "mp3autocut";
const CONFIG_FILE_NAME: &str = "config.toml";
const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Result returned by [`load_config`], capturing the source and any
/// non-fatal issues.
#[derive(Debug, Clone)]
pub struct ConfigLoadResult {
    pub config: FileConfig,
    pub warnings: Vec<String>,
    pub source: ConfigSource,
}

/// Indicates where the configuration was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// No persisted configuration was found or usable; defaults were synthesized.
    Default,
    /// Configuration was read from `config.toml`.
    File,
}

/// Errors that can occur when persisting configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML serialization error: {0}")]
    Ser(#[from] toml::ser::Error),
}

/// Disk-backed configuration schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default = "FileConfig::schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub server: ServerPreferences,
    #[serde(default)]
    pub params: Parameters,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default)]
    pub ui: UiPreferences,
}

impl FileConfig {
    const fn schema_version() -> u32 {
        CURRENT_SCHEMA_VERSION
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            server: ServerPreferences::default(),
            params: Parameters::default(),
            output_dir: default_output_dir(),
            ui: UiPreferences::default(),
        }
    }
}

fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerPreferences {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ServerPreferences {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiPreferences {
    #[serde(default)]
    pub theme: ThemePreference,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Dark,
    Light,
}

/// Directory holding the configuration file and logs.
pub fn config_directory() -> PathBuf {
    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

pub fn config_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}

/// Load configuration from the default location.
pub fn load_config() -> ConfigLoadResult {
    load_config_from(&config_path())
}

/// Load configuration from an explicit path.
///
/// Never fails hard: a missing file yields defaults, an unreadable or
/// unparsable file yields defaults with a warning, and out-of-range
/// parameter values are clamped with a warning.
pub fn load_config_from(path: &Path) -> ConfigLoadResult {
    let mut warnings = Vec::new();

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return ConfigLoadResult {
                config: FileConfig::default(),
                warnings,
                source: ConfigSource::Default,
            };
        }
        Err(err) => {
            warnings.push(format!("failed to read {}: {err}", path.display()));
            return ConfigLoadResult {
                config: FileConfig::default(),
                warnings,
                source: ConfigSource::Default,
            };
        }
    };

    let mut config: FileConfig = match toml::from_str(&contents) {
        Ok(config) => config,
        Err(err) => {
            warnings.push(format!(
                "invalid configuration in {}: {err}; using defaults",
                path.display()
            ));
            return ConfigLoadResult {
                config: FileConfig::default(),
                warnings,
                source: ConfigSource::Default,
            };
        }
    };

    if !config.params.is_within_limits() {
        config.params.clamp_to_limits();
        warnings.push("persisted parameters were out of range and have been clamped".to_string());
    }

    if config.output_dir.trim().is_empty() {
        config.output_dir = default_output_dir();
        warnings.push("persisted output directory was blank; using default".to_string());
    }

    ConfigLoadResult {
        config,
        warnings,
        source: ConfigSource::File,
    }
}

/// Save configuration to the default location.
pub fn save_config(config: &FileConfig) -> Result<(), ConfigError> {
    save_config_to(&config_path(), config)
}

/// Save configuration to an explicit path, creating parent directories.
pub fn save_config_to(path: &Path, config: &FileConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let rendered = toml::to_string_pretty(config)?;
    fs::write(path, rendered)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults_without_warnings() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = load_config_from(&dir.path().join("config.toml"));
        assert_eq!(result.source, ConfigSource::Default);
        assert_eq!(result.config, FileConfig::default());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn round_trips_through_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");

        let mut config = FileConfig::default();
        config.params.duration_secs = 240;
        config.params.speed = 1.25;
        config.output_dir = "/music/ready".to_string();
        config.server.base_url = "http://10.0.0.2:5000".to_string();
        config.ui.theme = ThemePreference::Light;

        save_config_to(&path, &config).expect("save");
        let result = load_config_from(&path);
        assert_eq!(result.source, ConfigSource::File);
        assert_eq!(result.config, config);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn garbage_file_degrades_to_defaults_with_warning() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "this is not toml {{{{").expect("write fixture");

        let result = load_config_from(&path);
        assert_eq!(result.source, ConfigSource::Default);
        assert_eq!(result.config, FileConfig::default());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn out_of_range_parameters_are_clamped_on_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[params]\nduration_secs = 999999\nspeed = 0.01\n",
        )
        .expect("write fixture");

        let result = load_config_from(&path);
        assert_eq!(result.source, ConfigSource::File);
        assert!(result.config.params.is_within_limits());
        assert_eq!(result.config.params.duration_secs, 3600);
        assert_eq!(result.config.params.speed, 0.5);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn blank_output_dir_falls_back_to_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "output_dir = \"   \"\n").expect("write fixture");

        let result = load_config_from(&path);
        assert_eq!(result.config.output_dir, DEFAULT_OUTPUT_DIR);
        assert_eq!(result.warnings.len(), 1);
    }
}
