//! Editor state that actions read and return.

use std::collections::HashSet;

use whiteboard_core::ElementId;
use whiteboard_settings::Config;

/// Active drawing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Selection,
    Rectangle,
    Ellipse,
    Diamond,
    Arrow,
    Line,
    Freedraw,
    Text,
    Image,
    Frame,
    Hand,
}

/// Selection and mode flags of the editor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub selected_element_ids: HashSet<ElementId>,
    /// Whether linear endpoints attach to shapes they touch.
    pub is_binding_enabled: bool,
    pub active_tool: Tool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            is_binding_enabled: true,
            ..Default::default()
        }
    }

    /// Initial state derived from the editor configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            is_binding_enabled: config.binding.enabled,
            ..Default::default()
        }
    }

    pub fn with_selection<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = ElementId>,
    {
        self.selected_element_ids = ids.into_iter().collect();
        self
    }

    pub fn is_selected(&self, id: &ElementId) -> bool {
        self.selected_element_ids.contains(id)
    }

    pub fn select(&mut self, id: ElementId, multi: bool) {
        if !multi {
            self.selected_element_ids.clear();
        }
        self.selected_element_ids.insert(id);
    }

    pub fn deselect_all(&mut self) {
        self.selected_element_ids.clear();
    }

    pub fn has_selection(&self) -> bool {
        !self.selected_element_ids.is_empty()
    }
}
