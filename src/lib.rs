//! # Whiteboard
//!
//! Editing core of a whiteboard/diagramming tool: element transforms that
//! keep arrow bindings and frame membership consistent.
//!
//! ## Architecture
//!
//! The workspace is split into crates:
//!
//! 1. **whiteboard-core** - Ids, geometry primitives, error types
//! 2. **whiteboard-settings** - Editor configuration (binding gaps, frames, history)
//! 3. **whiteboard-editor** - Element model, selection, resize, repair passes, actions
//! 4. **whiteboard** - This crate: re-exports, logging and editor bootstrap
//!
//! ## Features
//!
//! - **Flip**: Horizontal/vertical mirroring of the selection about its box
//! - **Anchored Resize**: Group scaling with per-element mirroring of points,
//!   images and rotation
//! - **Binding Repair**: Arrows and lines re-attach to the shapes they touch
//! - **Frame Repair**: Frame membership recomputed from geometry
//! - **Undo/Redo**: One history entry per committed action

use std::path::Path;

use anyhow::Context;

pub use whiteboard_core::{
    Axis, Bounds, ElementId, Endpoint, Error, GeometryError, Point, RepairIssue, Result,
    SelectionError,
};
pub use whiteboard_editor as editor;
pub use whiteboard_editor::{
    Action, ActionManager, ActionResult, AppState, EditorState, Element, ElementKind,
    FlipDirection, FlipHorizontal, FlipVertical, KeyEvent, Scene, SceneAccessor,
};
pub use whiteboard_settings::{
    BindingSettings, Config, FrameSettings, HistorySettings, KeySettings, SettingsError,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Output style of [`init_logging_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    init_logging_with(LogFormat::Pretty)
}

/// Initialize logging in the given format. Fails if a global subscriber is
/// already installed.
pub fn init_logging_with(format: LogFormat) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = match format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stdout)
                    .with_target(true)
                    .with_level(true)
                    .with_line_number(true)
                    .pretty(),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().with_writer(std::io::stdout).json())
            .try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))
}

/// Loads and validates a configuration file, or the defaults when `path` is
/// `None`, and builds an editor with it.
pub fn open_editor(path: Option<&Path>) -> anyhow::Result<EditorState> {
    let config = match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_or_default().context("loading default config")?,
    };
    config.validate().context("invalid configuration")?;
    tracing::info!("Whiteboard {} (built {})", VERSION, BUILD_DATE);
    Ok(EditorState::new(config))
}
