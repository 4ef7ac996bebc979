//! Named editor actions and their registry.

use std::sync::Arc;

use whiteboard_settings::Config;

use crate::app_state::AppState;
use crate::keys::KeyEvent;
use crate::model::Element;
use crate::scene::SceneAccessor;

pub mod flip;
mod manager;

pub use flip::{flip_selected_elements, FlipDirection, FlipHorizontal, FlipOutcome, FlipVertical};
pub use manager::ActionManager;

/// Telemetry tag reported when an action runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackEvent {
    pub category: &'static str,
}

/// Collaborators an action may consult while performing.
#[derive(Clone, Copy)]
pub struct ActionContext<'a> {
    pub scene: &'a dyn SceneAccessor,
    pub config: &'a Config,
}

/// Replacement state produced by an action.
#[derive(Debug, Clone)]
pub struct ActionResult {
    /// Full collection, same length and order as the input.
    pub elements: Vec<Arc<Element>>,
    pub app_state: AppState,
    /// Whether the change should become one undoable history entry.
    pub commit_to_history: bool,
}

/// An operation the host can trigger by name, shortcut or context menu.
pub trait Action: Send + Sync {
    fn name(&self) -> &'static str;

    fn track_event(&self) -> TrackEvent;

    fn perform(
        &self,
        elements: &[Arc<Element>],
        app_state: &AppState,
        ctx: &ActionContext<'_>,
    ) -> ActionResult;

    /// Whether `event` is this action's keyboard shortcut.
    fn key_test(&self, _event: &KeyEvent) -> bool {
        false
    }

    /// Translation key of the context menu entry, if the action has one.
    fn context_item_label(&self) -> Option<&'static str> {
        None
    }
}
