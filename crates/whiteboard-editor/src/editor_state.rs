use tracing::{debug, info};
use whiteboard_core::{ElementId, Error, Result};
use whiteboard_settings::Config;

use crate::actions::{Action, ActionContext, ActionManager, ActionResult};
use crate::app_state::AppState;
use crate::history::History;
use crate::keys::KeyEvent;
use crate::model::Element;
use crate::scene::{Scene, SceneAccessor};

/// Editor state for host integration: scene, selection, actions and history.
#[derive(Debug)]
pub struct EditorState {
    pub scene: Scene,
    pub app_state: AppState,
    pub config: Config,
    pub is_modified: bool,
    history: History,
    actions: ActionManager,
}

impl EditorState {
    /// Creates an empty editor configured by `config`.
    pub fn new(config: Config) -> Self {
        Self {
            scene: Scene::new(),
            app_state: AppState::from_config(&config),
            history: History::from_settings(&config.history),
            actions: ActionManager::with_defaults(),
            is_modified: false,
            config,
        }
    }

    pub fn with_elements(config: Config, elements: Vec<Element>) -> Self {
        let mut state = Self::new(config);
        state.scene = Scene::from_elements(elements);
        state
    }

    /// Replaces the selection.
    pub fn select<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = ElementId>,
    {
        self.app_state.selected_element_ids = ids.into_iter().collect();
    }

    pub fn actions(&self) -> &ActionManager {
        &self.actions
    }

    pub fn actions_mut(&mut self) -> &mut ActionManager {
        &mut self.actions
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Runs the action registered as `name`.
    ///
    /// Returns whether the action committed a history entry.
    pub fn execute(&mut self, name: &str) -> Result<bool> {
        let Some(action) = self.actions.get(name) else {
            return Err(Error::other(format!("Unknown action: {name}")));
        };
        let result = run(action, &self.scene, &self.app_state, &self.config);
        Ok(self.apply(name, result))
    }

    /// Dispatches a key press to the first action whose shortcut matches.
    ///
    /// Returns whether an action handled the event.
    pub fn handle_key_down(&mut self, event: &KeyEvent) -> bool {
        if !self.config.keys.flip_shortcuts {
            return false;
        }
        let Some(action) = self.actions.find_by_key(event) else {
            return false;
        };
        let name = action.name();
        let result = run(action, &self.scene, &self.app_state, &self.config);
        self.apply(name, result);
        true
    }

    fn apply(&mut self, name: &str, result: ActionResult) -> bool {
        self.app_state = result.app_state;
        if !result.commit_to_history {
            debug!("Action {} made no change", name);
            return false;
        }
        let before = self.scene.replace_elements(result.elements);
        self.history.record(name, before);
        self.is_modified = true;
        info!("Performed {}", name);
        true
    }

    /// Undo last change
    pub fn undo(&mut self) -> bool {
        let current = self.scene.elements().to_vec();
        match self.history.undo(current) {
            Some(previous) => {
                self.scene.replace_elements(previous);
                self.is_modified = true;
                true
            }
            None => false,
        }
    }

    /// Redo last undo
    pub fn redo(&mut self) -> bool {
        let current = self.scene.elements().to_vec();
        match self.history.redo(current) {
            Some(next) => {
                self.scene.replace_elements(next);
                self.is_modified = true;
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}

fn run(action: &dyn Action, scene: &Scene, app_state: &AppState, config: &Config) -> ActionResult {
    let ctx = ActionContext { scene, config };
    let track = action.track_event();
    debug!("Running {} ({})", action.name(), track.category);
    action.perform(scene.elements(), app_state, &ctx)
}
