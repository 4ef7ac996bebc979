//! Horizontal and vertical flip of the selection.
//!
//! Pipeline: resolve the expanded selection, copy it into a working arena,
//! mirror the copies about the centre of their common box, drag along the
//! endpoints of unselected lines bound to them, repair bindings on the
//! copies, merge everything back in collection order, then repair frame
//! membership on the merged collection.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;
use whiteboard_core::{Bounds, ElementId, Point};
use whiteboard_settings::Config;

use super::{Action, ActionContext, ActionResult, TrackEvent};
use crate::app_state::AppState;
use crate::binding::{bind_or_unbind_selected_elements, is_binding_enabled, unbind_linear_elements};
use crate::bounds::common_bounding_box;
use crate::elements_map::ElementsMap;
use crate::frame::{repair_frame_membership, update_frame_membership_of_selected_elements};
use crate::keys::{codes, KeyEvent};
use crate::model::Element;
use crate::resize::{
    resize_multiple_elements, update_bound_elements, ResizeRequest, TransformHandle,
};
use crate::selection::{selected_elements, SelectionOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlipDirection {
    Horizontal,
    Vertical,
}

impl FlipDirection {
    /// Where the north-west handle is dragged to mirror `bounds` on this axis.
    fn pointer(&self, bounds: &Bounds) -> Point {
        match self {
            FlipDirection::Horizontal => Point::new(bounds.max_x, bounds.min_y),
            FlipDirection::Vertical => Point::new(bounds.min_x, bounds.max_y),
        }
    }
}

/// Collection after a flip and the number of elements it changed.
#[derive(Debug, Clone)]
pub struct FlipOutcome {
    pub elements: Vec<Arc<Element>>,
    pub flipped: usize,
}

impl FlipOutcome {
    fn unchanged(elements: &[Arc<Element>]) -> Self {
        Self {
            elements: elements.to_vec(),
            flipped: 0,
        }
    }
}

/// Mirrors the selected elements of `elements` in `direction`.
///
/// `map` is the non-deleted scene, used to resolve binding targets and label
/// containers outside the selection. Elements outside the flipped set come
/// back as the same `Arc`, in the same position, unless they are lines bound
/// to a flipped element or labels on such lines. `flipped` counts the
/// elements that are no longer the same `Arc`; it is zero when nothing is
/// selected or the flip leaves every element as it was.
pub fn flip_selected_elements(
    elements: &[Arc<Element>],
    app_state: &AppState,
    map: &ElementsMap<'_>,
    config: &Config,
    direction: FlipDirection,
) -> FlipOutcome {
    let selected = selected_elements(elements, app_state, SelectionOptions::EXPANDED);
    if selected.is_empty() {
        return FlipOutcome::unchanged(elements);
    }

    let mut working: Vec<Element> = selected.iter().map(|e| Element::clone(e)).collect();
    let bounds = match common_bounding_box(working.iter()) {
        Ok(bounds) => bounds,
        Err(e) => {
            debug!("Flip skipped: {}", e);
            return FlipOutcome::unchanged(elements);
        }
    };

    let request =
        ResizeRequest::new(TransformHandle::Nw, direction.pointer(&bounds)).from_center();
    let resize = match resize_multiple_elements(&mut working, map, &request) {
        Ok(outcome) => outcome,
        Err(e) => {
            debug!("Flip skipped: {}", e);
            return FlipOutcome::unchanged(elements);
        }
    };
    let followers = update_bound_elements(&mut working, map, &resize);

    if is_binding_enabled(app_state) {
        let report = bind_or_unbind_selected_elements(&mut working, map, &config.binding);
        debug!(
            "Bindings after flip: {} bound, {} kept, {} cleared",
            report.bound, report.kept, report.cleared
        );
    } else {
        unbind_linear_elements(&mut working);
    }

    let follower_ids: HashSet<ElementId> = followers.iter().map(|e| e.id).collect();
    working.extend(followers);
    let merged = merge_working_copies(elements, working);
    let mut updated =
        update_frame_membership_of_selected_elements(merged, app_state, &config.frames);
    if !follower_ids.is_empty() {
        repair_frame_membership(&mut updated, &follower_ids, &config.frames);
    }

    let flipped = updated
        .iter()
        .zip(elements)
        .filter(|(after, before)| !Arc::ptr_eq(after, before))
        .count();
    FlipOutcome {
        elements: updated,
        flipped,
    }
}

/// Puts the working copies back in place of their originals. Copies equal to
/// their original keep the original `Arc`.
fn merge_working_copies(elements: &[Arc<Element>], working: Vec<Element>) -> Vec<Arc<Element>> {
    let mut by_id: HashMap<ElementId, Element> =
        working.into_iter().map(|e| (e.id, e)).collect();
    elements
        .iter()
        .map(|original| match by_id.remove(&original.id) {
            Some(copy) if copy != **original => Arc::new(copy),
            _ => Arc::clone(original),
        })
        .collect()
}

fn perform_flip(
    elements: &[Arc<Element>],
    app_state: &AppState,
    ctx: &ActionContext<'_>,
    direction: FlipDirection,
) -> ActionResult {
    let map = ctx.scene.non_deleted_elements_map();
    let outcome = flip_selected_elements(elements, app_state, &map, ctx.config, direction);
    ActionResult {
        elements: outcome.elements,
        app_state: app_state.clone(),
        commit_to_history: outcome.flipped > 0,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FlipHorizontal;

impl Action for FlipHorizontal {
    fn name(&self) -> &'static str {
        "flipHorizontal"
    }

    fn track_event(&self) -> TrackEvent {
        TrackEvent {
            category: "element",
        }
    }

    fn perform(
        &self,
        elements: &[Arc<Element>],
        app_state: &AppState,
        ctx: &ActionContext<'_>,
    ) -> ActionResult {
        perform_flip(elements, app_state, ctx, FlipDirection::Horizontal)
    }

    fn key_test(&self, event: &KeyEvent) -> bool {
        event.shift && event.is_code(codes::H)
    }

    fn context_item_label(&self) -> Option<&'static str> {
        Some("labels.flipHorizontal")
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FlipVertical;

impl Action for FlipVertical {
    fn name(&self) -> &'static str {
        "flipVertical"
    }

    fn track_event(&self) -> TrackEvent {
        TrackEvent {
            category: "element",
        }
    }

    fn perform(
        &self,
        elements: &[Arc<Element>],
        app_state: &AppState,
        ctx: &ActionContext<'_>,
    ) -> ActionResult {
        perform_flip(elements, app_state, ctx, FlipDirection::Vertical)
    }

    fn key_test(&self, event: &KeyEvent) -> bool {
        event.shift && event.is_code(codes::V)
    }

    fn context_item_label(&self) -> Option<&'static str> {
        Some("labels.flipVertical")
    }
}
