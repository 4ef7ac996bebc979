//! Frame membership repair.
//!
//! Containment is derived from geometry: an element belongs to the topmost
//! frame whose box fully contains it. The stored `frame_id` is a cache that
//! this pass reconciles after a transform.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;
use whiteboard_core::{ElementId, RepairIssue};
use whiteboard_settings::FrameSettings;

use crate::app_state::AppState;
use crate::bounds::element_bounds;
use crate::model::Element;
use crate::selection::{selected_elements, SelectionOptions};

/// Derived frame → children relation.
#[derive(Debug, Clone, Default)]
pub struct FrameIndex {
    children: HashMap<ElementId, Vec<ElementId>>,
}

impl FrameIndex {
    /// Groups non-deleted elements by their `frame_id`, keeping input order.
    pub fn build<'a, I>(elements: I) -> Self
    where
        I: IntoIterator<Item = &'a Element>,
    {
        let mut children: HashMap<ElementId, Vec<ElementId>> = HashMap::new();
        for element in elements.into_iter().filter(|e| !e.is_deleted) {
            if let Some(frame_id) = element.frame_id {
                children.entry(frame_id).or_default().push(element.id);
            }
        }
        Self { children }
    }

    pub fn children_of(&self, frame_id: &ElementId) -> &[ElementId] {
        self.children.get(frame_id).map_or(&[], Vec::as_slice)
    }

    /// Number of frames with at least one child.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Whether `frame` is a live frame whose box contains `element`.
pub fn is_element_in_frame(element: &Element, frame: &Element, settings: &FrameSettings) -> bool {
    frame.is_frame()
        && !frame.is_deleted
        && element_bounds(frame).contains(&element_bounds(element), settings.containment_tolerance)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub kept: usize,
    pub assigned: usize,
    pub cleared: usize,
    pub issues: Vec<RepairIssue>,
}

/// Recomputes `frame_id` for the elements in `targets`.
///
/// Frames themselves are skipped. An element keeps its frame while that
/// frame still contains it; otherwise it moves to the topmost containing
/// frame or leaves frames altogether. Bound labels take their container's
/// frame. Only elements whose membership changes are cloned.
pub fn repair_frame_membership(
    elements: &mut [Arc<Element>],
    targets: &HashSet<ElementId>,
    settings: &FrameSettings,
) -> FrameReport {
    let mut report = FrameReport::default();
    let by_id: HashMap<ElementId, &Element> = elements.iter().map(|e| (e.id, e.as_ref())).collect();
    let frames: Vec<&Element> = elements
        .iter()
        .map(|e| e.as_ref())
        .filter(|e| e.is_frame() && !e.is_deleted)
        .collect();

    let mut resolved: HashMap<ElementId, Option<ElementId>> = HashMap::new();
    let mut changes: Vec<(usize, Option<ElementId>)> = Vec::new();
    let mut labels: Vec<(usize, ElementId)> = Vec::new();

    for (pos, element) in elements.iter().enumerate() {
        if !targets.contains(&element.id) || element.is_deleted || element.is_frame() {
            continue;
        }
        if let Some(container) = element.container_id() {
            labels.push((pos, container));
            continue;
        }

        let current = element.frame_id;
        let still_inside = current.is_some_and(|f| {
            by_id
                .get(&f)
                .is_some_and(|frame| is_element_in_frame(element, frame, settings))
        });
        let next = if still_inside {
            report.kept += 1;
            current
        } else {
            if let Some(frame) = current {
                let live_frame = by_id
                    .get(&frame)
                    .is_some_and(|f| f.is_frame() && !f.is_deleted);
                if !live_frame {
                    report.issues.push(RepairIssue::OrphanedFrameReference {
                        element: element.id,
                        frame,
                    });
                }
            }
            frames
                .iter()
                .rev()
                .find(|f| is_element_in_frame(element, f, settings))
                .map(|f| f.id)
        };

        resolved.insert(element.id, next);
        if next != current {
            match next {
                Some(frame) => {
                    debug!("Moving {} into frame {}", element.id, frame);
                    report.assigned += 1;
                }
                None => {
                    debug!("Removing {} from its frame", element.id);
                    report.cleared += 1;
                }
            }
            changes.push((pos, next));
        }
    }

    for (pos, container) in labels {
        let next = match resolved.get(&container) {
            Some(frame) => *frame,
            None => by_id.get(&container).and_then(|c| c.frame_id),
        };
        if next != elements[pos].frame_id {
            changes.push((pos, next));
        }
    }

    for (pos, frame_id) in changes {
        let element = Arc::make_mut(&mut elements[pos]);
        element.frame_id = frame_id;
        element.bump_version();
    }
    report
}

/// Runs [`repair_frame_membership`] over the expanded selection of
/// `app_state` and returns the updated collection.
pub fn update_frame_membership_of_selected_elements(
    mut elements: Vec<Arc<Element>>,
    app_state: &AppState,
    settings: &FrameSettings,
) -> Vec<Arc<Element>> {
    let targets: HashSet<ElementId> =
        selected_elements(&elements, app_state, SelectionOptions::EXPANDED)
            .into_iter()
            .map(|e| e.id)
            .collect();
    if targets.is_empty() {
        return elements;
    }
    let report = repair_frame_membership(&mut elements, &targets, settings);
    if !report.issues.is_empty() {
        debug!("Frame repair dropped {} orphaned references", report.issues.len());
    }
    elements
}
