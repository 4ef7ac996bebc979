//! Resolves the selection state into the elements an operation acts on.

use std::collections::HashSet;
use std::sync::Arc;

use whiteboard_core::{ElementId, SelectionError};

use crate::app_state::AppState;
use crate::frame::FrameIndex;
use crate::model::Element;

/// Which indirectly related elements are pulled into a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionOptions {
    /// Include text labels whose container is selected.
    pub include_bound_text_element: bool,
    /// Include the children of selected frames.
    pub include_elements_in_frames: bool,
}

impl SelectionOptions {
    /// Only the directly selected elements.
    pub const DIRECT: SelectionOptions = SelectionOptions {
        include_bound_text_element: false,
        include_elements_in_frames: false,
    };

    /// Labels and frame children included, as transforms need.
    pub const EXPANDED: SelectionOptions = SelectionOptions {
        include_bound_text_element: true,
        include_elements_in_frames: true,
    };
}

/// Elements that are not soft-deleted, in collection order.
pub fn non_deleted_elements(elements: &[Arc<Element>]) -> Vec<&Arc<Element>> {
    elements.iter().filter(|e| !e.is_deleted).collect()
}

/// Returns the selected, non-deleted elements in collection order.
///
/// Deleted elements are skipped even when their id is still selected. With
/// `include_elements_in_frames` the children of every selected frame are
/// added; with `include_bound_text_element` every label whose container ends
/// up in the set is added. Each element appears at most once.
///
/// An empty selection yields an empty vector.
pub fn selected_elements<'a>(
    elements: &'a [Arc<Element>],
    app_state: &AppState,
    options: SelectionOptions,
) -> Vec<&'a Arc<Element>> {
    let visible = non_deleted_elements(elements);

    let mut ids: HashSet<ElementId> = visible
        .iter()
        .filter(|e| app_state.is_selected(&e.id))
        .map(|e| e.id)
        .collect();
    if ids.is_empty() {
        return Vec::new();
    }

    if options.include_elements_in_frames {
        let frames = FrameIndex::build(visible.iter().map(|e| e.as_ref()));
        let selected_frames: Vec<ElementId> = visible
            .iter()
            .filter(|e| e.is_frame() && ids.contains(&e.id))
            .map(|e| e.id)
            .collect();
        for frame_id in selected_frames {
            ids.extend(frames.children_of(&frame_id).iter().copied());
        }
    }

    if options.include_bound_text_element {
        let labels: Vec<ElementId> = visible
            .iter()
            .filter(|e| e.container_id().is_some_and(|c| ids.contains(&c)))
            .map(|e| e.id)
            .collect();
        ids.extend(labels);
    }

    visible.into_iter().filter(|e| ids.contains(&e.id)).collect()
}

/// Like [`selected_elements`], but an empty result is an error.
pub fn require_selection<'a>(
    elements: &'a [Arc<Element>],
    app_state: &AppState,
    options: SelectionOptions,
) -> Result<Vec<&'a Arc<Element>>, SelectionError> {
    let selected = selected_elements(elements, app_state, options);
    if selected.is_empty() {
        return Err(SelectionError::EmptySelection);
    }
    Ok(selected)
}
