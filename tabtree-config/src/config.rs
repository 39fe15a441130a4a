//! Core `Config` struct and its persistence.
//!
//! The configuration is a flat YAML document. Every field carries a serde
//! default so partial files (or files written by older versions) load
//! cleanly.

use crate::error::ConfigError;
use crate::types::{LogLevel, SplitDirection};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Layout engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    // ========================================================================
    // Split Pane Settings
    // ========================================================================
    /// Width of the separator between two panes of a split, in pixels
    #[serde(default = "crate::defaults::pane_divider_width")]
    pub pane_divider_width: f32,

    /// Padding inside panes in pixels (applied on each side of the surface)
    #[serde(default = "crate::defaults::pane_padding")]
    pub pane_padding: f32,

    /// Minimum pane size in cells (columns for side-by-side splits, rows for stacked)
    /// Prevents panes from being split or resized too small to be useful
    #[serde(default = "crate::defaults::pane_min_size")]
    pub pane_min_size: usize,

    /// Split ratio change applied by one keyboard resize step
    #[serde(default = "crate::defaults::pane_resize_step")]
    pub pane_resize_step: f32,

    /// Orientation used by an automatic split when the pane is exactly square
    #[serde(default = "crate::defaults::auto_split_tie")]
    pub auto_split_tie: SplitDirection,

    /// Maximum number of panes per tab (0 = unlimited)
    #[serde(default = "crate::defaults::max_panes")]
    pub max_panes: usize,

    // ========================================================================
    // Debug Logging
    // ========================================================================
    /// Verbosity of the debug log file
    #[serde(default = "crate::defaults::log_level")]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pane_divider_width: crate::defaults::pane_divider_width(),
            pane_padding: crate::defaults::pane_padding(),
            pane_min_size: crate::defaults::pane_min_size(),
            pane_resize_step: crate::defaults::pane_resize_step(),
            auto_split_tie: crate::defaults::auto_split_tie(),
            max_panes: crate::defaults::max_panes(),
            log_level: crate::defaults::log_level(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            log::info!("Loading existing config from {:?}", config_path);
            Self::load_from(&config_path)
        } else {
            log::info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            if let Err(e) = config.save() {
                log::error!("Failed to save default config: {}", e);
                return Err(e);
            }
            log::info!("Default config created successfully");
            Ok(config)
        }
    }

    /// Load and validate configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(ConfigError::from)?;
        let config: Config = serde_yaml_ng::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::from)?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::from)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(ConfigError::from)?;
        fs::rename(&temp_path, path).map_err(ConfigError::from)?;

        Ok(())
    }

    /// Check field values that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.pane_divider_width.is_finite() || self.pane_divider_width < 0.0 {
            return Err(ConfigError::Validation(format!(
                "pane_divider_width must be a non-negative number, got {}",
                self.pane_divider_width
            )));
        }
        if !self.pane_padding.is_finite() || self.pane_padding < 0.0 {
            return Err(ConfigError::Validation(format!(
                "pane_padding must be a non-negative number, got {}",
                self.pane_padding
            )));
        }
        if self.pane_min_size == 0 {
            return Err(ConfigError::Validation(
                "pane_min_size must be at least 1 cell".to_string(),
            ));
        }
        if !(self.pane_resize_step > 0.0 && self.pane_resize_step < 0.5) {
            return Err(ConfigError::Validation(format!(
                "pane_resize_step must be in (0, 0.5), got {}",
                self.pane_resize_step
            )));
        }
        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("tabtree")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            // Use XDG convention on all platforms: ~/.config/tabtree/
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("tabtree")
            } else {
                // Fallback if home directory cannot be determined
                PathBuf::from(".")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml_ng::from_str("pane_padding: 1.5\n").unwrap();
        assert_eq!(config.pane_padding, 1.5);
        assert_eq!(config.pane_min_size, crate::defaults::pane_min_size());
        assert_eq!(config.auto_split_tie, SplitDirection::Vertical);
    }

    #[test]
    fn test_validate_rejects_zero_min_size() {
        let config = Config {
            pane_min_size: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_resize_step_out_of_range() {
        let config = Config {
            pane_resize_step: 0.75,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_split_direction_serializes_lowercase() {
        let yaml = serde_yaml_ng::to_string(&SplitDirection::Horizontal).unwrap();
        assert_eq!(yaml.trim(), "horizontal");
    }

    // ========================================================================
    // Files on disk
    // ========================================================================

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir: TempDir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nested").join("config.yaml");

        let config = Config {
            pane_divider_width: 3.0,
            pane_padding: 2.0,
            pane_min_size: 4,
            pane_resize_step: 0.1,
            auto_split_tie: SplitDirection::Horizontal,
            max_panes: 6,
            log_level: LogLevel::Debug,
        };
        config.save_to(&path).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("yaml.tmp").exists());
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_partial_file() {
        let temp_dir: TempDir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "pane_min_size: 5\nauto_split_tie: horizontal\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.pane_min_size, 5);
        assert_eq!(config.auto_split_tie, SplitDirection::Horizontal);
        assert_eq!(config.pane_divider_width, Config::default().pane_divider_width);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let temp_dir: TempDir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "pane_resize_step: 0.75\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_load_reports_yaml_and_io_errors() {
        let temp_dir: TempDir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "pane_padding: [not, a, number]\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Parse(_))
        ));

        let missing = temp_dir.path().join("missing.yaml");
        let err = Config::load_from(&missing).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Io(_))
        ));
    }
}
