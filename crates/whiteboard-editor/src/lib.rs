//! # Whiteboard Editor
//!
//! Element model and editing passes of the whiteboard.
//!
//! The flip actions are built from smaller passes that can be used on their
//! own:
//! - [`selection`]: resolves the selection, pulling in bound labels and frame
//!   children
//! - [`bounds`]: rotation-aware boxes of elements and element sets
//! - [`resize`]: scales a group of elements about a shared anchor, mirroring
//!   when the scale is negative
//! - [`binding`]: re-binds or unbinds linear endpoints after a transform
//! - [`frame`]: recomputes frame membership from geometry
//! - [`actions`]: named actions, shortcuts and the flip orchestration
//!
//! Element collections are `Vec<Arc<Element>>`. Passes work on cloned copies
//! and return a new collection in which untouched elements are the same
//! `Arc` as before.

pub mod actions;
pub mod app_state;
pub mod binding;
pub mod bounds;
pub mod distance;
pub mod editor_state;
pub mod elements_map;
pub mod frame;
pub mod history;
pub mod keys;
pub mod model;
pub mod resize;
pub mod scene;
pub mod selection;

pub use actions::{
    flip_selected_elements, Action, ActionContext, ActionManager, ActionResult, FlipDirection,
    FlipHorizontal, FlipOutcome, FlipVertical, TrackEvent,
};
pub use app_state::{AppState, Tool};
pub use binding::{
    bind_or_unbind_selected_elements, dangling_bindings, is_binding_enabled,
    unbind_linear_elements, BindingIndex, BindingReport,
};
pub use bounds::{common_bounding_box, element_bounds};
pub use distance::distance_to_element;
pub use editor_state::EditorState;
pub use elements_map::{ElementLookup, ElementsMap, TransformedView};
pub use frame::{
    is_element_in_frame, repair_frame_membership, update_frame_membership_of_selected_elements,
    FrameIndex, FrameReport,
};
pub use history::{History, HistoryEntry};
pub use keys::KeyEvent;
pub use model::{
    Element, ElementKind, ElementType, FrameElement, FreedrawElement, ImageElement,
    LinearElement, PointBinding, TextElement, VerticalAlign,
};
pub use resize::{
    resize_multiple_elements, update_bound_elements, ResizeOutcome, ResizeRequest,
    TransformHandle,
};
pub use scene::{Scene, SceneAccessor};
pub use selection::{require_selection, selected_elements, SelectionOptions};
