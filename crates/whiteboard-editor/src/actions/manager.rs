use std::fmt;

use tracing::warn;

use super::{Action, FlipHorizontal, FlipVertical};
use crate::keys::KeyEvent;

/// Registry of actions, looked up by name or shortcut.
pub struct ActionManager {
    actions: Vec<Box<dyn Action>>,
}

impl ActionManager {
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// Registry with every built-in action.
    pub fn with_defaults() -> Self {
        let mut manager = Self::new();
        manager.register(Box::new(FlipHorizontal));
        manager.register(Box::new(FlipVertical));
        manager
    }

    /// Adds `action`; an action with the same name is replaced.
    pub fn register(&mut self, action: Box<dyn Action>) {
        if let Some(pos) = self.actions.iter().position(|a| a.name() == action.name()) {
            warn!("Replacing registered action {}", action.name());
            self.actions[pos] = action;
        } else {
            self.actions.push(action);
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Action> {
        self.actions
            .iter()
            .find(|a| a.name() == name)
            .map(|a| a.as_ref())
    }

    /// First registered action whose shortcut matches `event`.
    pub fn find_by_key(&self, event: &KeyEvent) -> Option<&dyn Action> {
        self.actions
            .iter()
            .find(|a| a.key_test(event))
            .map(|a| a.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.actions.iter().map(|a| a.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl fmt::Debug for ActionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl Default for ActionManager {
    fn default() -> Self {
        Self::with_defaults()
    }
}
