//! Whiteboard Settings Crate
//!
//! Handles editor configuration: binding tolerances, frame containment,
//! history depth and keyboard triggers, with JSON/TOML persistence.

pub mod config;
pub mod error;

pub use config::{BindingSettings, Config, FrameSettings, HistorySettings, KeySettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
