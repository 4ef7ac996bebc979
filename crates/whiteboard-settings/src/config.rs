//! Configuration and settings management for the whiteboard editor
//!
//! Provides configuration file handling, settings management, and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Binding settings (whether arrows attach to shapes, hit tolerances)
//! - Frame settings (containment slack)
//! - History settings (undo depth)
//! - Key settings (keyboard triggers for element actions)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Arrow-to-shape binding settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingSettings {
    /// Whether linear elements attach to shapes they touch
    pub enabled: bool,
    /// Smallest hit distance around a bindable shape
    pub min_gap: f64,
    /// Largest hit distance around a bindable shape
    pub max_gap: f64,
    /// Fraction of the smaller shape dimension considered "shape body"
    pub shape_ratio: f64,
    /// Fraction of the shape body used as hit distance before clamping
    pub gap_fraction: f64,
}

impl Default for BindingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            min_gap: 16.0,
            max_gap: 32.0,
            shape_ratio: 0.3,
            gap_fraction: 0.25,
        }
    }
}

impl BindingSettings {
    /// Hit distance for a bindable shape of the given size.
    pub fn max_binding_gap(&self, width: f64, height: f64) -> f64 {
        let smaller = self.shape_ratio * width.abs().min(height.abs());
        (self.gap_fraction * smaller).min(self.max_gap).max(self.min_gap)
    }
}

/// Frame containment settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameSettings {
    /// Slack allowed when testing whether a frame contains an element
    pub containment_tolerance: f64,
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            containment_tolerance: 0.0,
        }
    }
}

/// Undo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of undoable entries kept
    pub max_depth: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { max_depth: 100 }
    }
}

/// Keyboard trigger settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeySettings {
    /// Shift+H flips horizontally, Shift+V flips vertically
    pub flip_shortcuts: bool,
}

impl Default for KeySettings {
    fn default() -> Self {
        Self {
            flip_shortcuts: true,
        }
    }
}

/// Complete editor configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Binding settings
    pub binding: BindingSettings,
    /// Frame settings
    pub frames: FrameSettings,
    /// History settings
    pub history: HistorySettings,
    /// Keyboard settings
    pub keys: KeySettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform-specific location of the config file
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("no platform config directory".to_string())
        })?;
        Ok(dir.join("whiteboard").join(CONFIG_FILE_NAME))
    }

    /// Load config from the default path, falling back to defaults when the
    /// file does not exist yet.
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(&path)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match Format::from_path(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let binding = &self.binding;
        if !(binding.min_gap.is_finite() && binding.min_gap >= 0.0) {
            return Err(out_of_range("binding.min_gap", binding.min_gap));
        }
        if !(binding.max_gap.is_finite() && binding.max_gap > 0.0) {
            return Err(out_of_range("binding.max_gap", binding.max_gap));
        }
        if binding.min_gap > binding.max_gap {
            return Err(SettingsError::InvalidSetting {
                key: "binding.min_gap".to_string(),
                reason: format!(
                    "must not exceed binding.max_gap ({} > {})",
                    binding.min_gap, binding.max_gap
                ),
            });
        }
        if !(binding.shape_ratio.is_finite() && binding.shape_ratio > 0.0) {
            return Err(out_of_range("binding.shape_ratio", binding.shape_ratio));
        }
        if !(binding.gap_fraction.is_finite() && binding.gap_fraction > 0.0) {
            return Err(out_of_range("binding.gap_fraction", binding.gap_fraction));
        }

        let tolerance = self.frames.containment_tolerance;
        if !(tolerance.is_finite() && tolerance >= 0.0) {
            return Err(out_of_range("frames.containment_tolerance", tolerance));
        }

        if self.history.max_depth == 0 {
            return Err(out_of_range("history.max_depth", self.history.max_depth));
        }

        Ok(())
    }

    /// Merge another config into this one (keeps existing values for
    /// sections left at their defaults in `other`)
    pub fn merge(&mut self, other: &Config) {
        if other.binding != BindingSettings::default() {
            self.binding = other.binding.clone();
        }
        if other.frames != FrameSettings::default() {
            self.frames = other.frames.clone();
        }
        if other.history != HistorySettings::default() {
            self.history = other.history.clone();
        }
        if other.keys != KeySettings::default() {
            self.keys = other.keys.clone();
        }
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
        }
    }
}

fn out_of_range(key: &str, value: impl ToString) -> SettingsError {
    ConfigError::ValueOutOfRange {
        key: key.to_string(),
        value: value.to_string(),
    }
    .into()
}
