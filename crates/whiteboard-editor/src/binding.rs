//! Binding repair between linear elements and the shapes they touch.
//!
//! Bindings are stored on the linear endpoint only. The reverse direction
//! (which lines point at a shape, which label sits in a container) is derived
//! on demand through [`BindingIndex`] instead of being kept in shape records.
//!
//! Repair runs in two steps: every endpoint decision is planned against an
//! immutable view of the scene with the transformed copies overlaid, then the
//! changes are written into the working copies.

use std::collections::HashMap;

use smallvec::SmallVec;
use tracing::debug;
use whiteboard_core::{ElementId, Endpoint, Point, RepairIssue};
use whiteboard_settings::BindingSettings;

use crate::app_state::AppState;
use crate::distance::distance_to_element;
use crate::elements_map::{ElementLookup, ElementsMap, TransformedView};
use crate::model::{Element, PointBinding};

const ENDPOINTS: [Endpoint; 2] = [Endpoint::Start, Endpoint::End];

pub fn is_binding_enabled(app_state: &AppState) -> bool {
    app_state.is_binding_enabled
}

/// Counts and diagnostics of one repair run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingReport {
    /// Endpoints newly bound or moved to another target.
    pub bound: usize,
    /// Endpoints that kept their target.
    pub kept: usize,
    pub cleared: usize,
    pub issues: Vec<RepairIssue>,
}

/// Planned new state of one endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
struct EndpointChange {
    index: usize,
    endpoint: Endpoint,
    binding: Option<PointBinding>,
}

/// Re-binds the endpoints of the linear elements in `selected` to the
/// bindable elements they now touch, clearing bindings that no longer hold.
///
/// `map` is the non-deleted scene; the working copies in `selected` take
/// precedence over their scene counterparts during hit testing. Elements
/// outside `selected` are never modified.
pub fn bind_or_unbind_selected_elements(
    selected: &mut [Element],
    map: &ElementsMap<'_>,
    settings: &BindingSettings,
) -> BindingReport {
    let mut report = BindingReport::default();
    let changes = {
        let view = TransformedView::new(map, selected);
        plan_bindings(selected, &view, settings, &mut report)
    };
    apply_changes(selected, &changes);
    report
}

fn plan_bindings(
    selected: &[Element],
    lookup: &dyn ElementLookup,
    settings: &BindingSettings,
    report: &mut BindingReport,
) -> Vec<EndpointChange> {
    let visible = lookup.visible_elements();
    let index = BindingIndex::build(visible.iter().copied());
    let mut changes = Vec::new();

    for (i, element) in selected.iter().enumerate() {
        let Some(linear) = element.linear() else {
            continue;
        };
        let labels = index.bound_text(&element.id);
        let candidates: Vec<&Element> = visible
            .iter()
            .copied()
            .filter(|c| c.is_bindable() && c.id != element.id && !labels.contains(&c.id))
            .collect();

        for endpoint in ENDPOINTS {
            let Some(position) = element.endpoint_position(endpoint) else {
                continue;
            };
            let previous = linear.binding(endpoint).copied();
            let target = previous
                .and_then(|b| {
                    candidates
                        .iter()
                        .find(|c| c.id == b.element_id)
                        .and_then(|c| hit(c, position, settings).map(|d| (*c, d)))
                })
                .or_else(|| closest_hit(&candidates, position, settings));

            let binding = target.map(|(t, gap)| PointBinding {
                element_id: t.id,
                focus: determine_focus(t, position, element.adjacent_position(endpoint)),
                gap,
            });

            match (previous, binding) {
                (Some(prev), None) => {
                    debug!(
                        "Clearing {} binding of {} to {}",
                        endpoint, element.id, prev.element_id
                    );
                    report.cleared += 1;
                    let alive = lookup
                        .get_element(&prev.element_id)
                        .is_some_and(|t| !t.is_deleted);
                    if !alive {
                        report.issues.push(RepairIssue::MissingBindingTarget {
                            element: element.id,
                            endpoint,
                            target: prev.element_id,
                        });
                    }
                }
                (Some(prev), Some(next)) if prev.element_id == next.element_id => {
                    report.kept += 1;
                }
                (_, Some(next)) => {
                    debug!(
                        "Binding {} of {} to {}",
                        endpoint, element.id, next.element_id
                    );
                    report.bound += 1;
                }
                (None, None) => {}
            }

            if previous != binding {
                changes.push(EndpointChange {
                    index: i,
                    endpoint,
                    binding,
                });
            }
        }
    }
    changes
}

fn apply_changes(selected: &mut [Element], changes: &[EndpointChange]) {
    let mut last_bumped = None;
    for change in changes {
        let element = &mut selected[change.index];
        if let Some(linear) = element.linear_mut() {
            linear.set_binding(change.endpoint, change.binding);
        }
        if last_bumped != Some(change.index) {
            element.bump_version();
            last_bumped = Some(change.index);
        }
    }
}

/// Distance to `candidate` when `point` is within its binding gap.
fn hit(candidate: &Element, point: Point, settings: &BindingSettings) -> Option<f64> {
    let distance = distance_to_element(candidate, point);
    let max_gap = settings.max_binding_gap(candidate.width, candidate.height);
    (distance <= max_gap).then_some(distance)
}

/// Nearest hit; on a tie the topmost element wins.
fn closest_hit<'e>(
    candidates: &[&'e Element],
    point: Point,
    settings: &BindingSettings,
) -> Option<(&'e Element, f64)> {
    let mut best: Option<(&'e Element, f64)> = None;
    for &candidate in candidates {
        if let Some(d) = hit(candidate, point, settings) {
            if best.map_or(true, |(_, bd)| d <= bd) {
                best = Some((candidate, d));
            }
        }
    }
    best
}

/// How far off-centre the line through `adjacent` and `endpoint` passes the
/// target, in `[-1, 1]`.
fn determine_focus(target: &Element, endpoint: Point, adjacent: Option<Point>) -> f64 {
    let Some(adjacent) = adjacent else {
        return 0.0;
    };
    let direction = endpoint - adjacent;
    let length = direction.length();
    let radius = target.width.hypot(target.height) / 2.0;
    if length == 0.0 || radius == 0.0 {
        return 0.0;
    }
    let to_center = target.center() - adjacent;
    let offset = (direction.x * to_center.y - direction.y * to_center.x) / length;
    (offset / radius).clamp(-1.0, 1.0)
}

/// Clears every binding of the linear elements in `selected`.
///
/// Returns how many elements lost at least one binding.
pub fn unbind_linear_elements(selected: &mut [Element]) -> usize {
    let mut count = 0;
    for element in selected.iter_mut() {
        let cleared = element.linear_mut().is_some_and(|l| l.clear_bindings());
        if cleared {
            debug!("Unbinding {}", element.id);
            element.bump_version();
            count += 1;
        }
    }
    count
}

/// Derived reverse adjacency of the binding relation.
#[derive(Debug, Clone, Default)]
pub struct BindingIndex {
    bound_linear: HashMap<ElementId, SmallVec<[(ElementId, Endpoint); 4]>>,
    bound_text: HashMap<ElementId, SmallVec<[ElementId; 1]>>,
}

impl BindingIndex {
    /// Builds the index from non-deleted elements.
    pub fn build<'a, I>(elements: I) -> Self
    where
        I: IntoIterator<Item = &'a Element>,
    {
        let mut index = Self::default();
        for element in elements.into_iter().filter(|e| !e.is_deleted) {
            if let Some(linear) = element.linear() {
                for endpoint in ENDPOINTS {
                    if let Some(binding) = linear.binding(endpoint) {
                        index
                            .bound_linear
                            .entry(binding.element_id)
                            .or_default()
                            .push((element.id, endpoint));
                    }
                }
            }
            if let Some(container) = element.container_id() {
                index.bound_text.entry(container).or_default().push(element.id);
            }
        }
        index
    }

    /// Linear endpoints bound to `target`.
    pub fn bound_elements(&self, target: &ElementId) -> &[(ElementId, Endpoint)] {
        self.bound_linear.get(target).map_or(&[], |v| v.as_slice())
    }

    /// Labels bound to `container`.
    pub fn bound_text(&self, container: &ElementId) -> &[ElementId] {
        self.bound_text.get(container).map_or(&[], |v| v.as_slice())
    }

    pub fn is_bound(&self, target: &ElementId) -> bool {
        self.bound_linear.contains_key(target)
    }
}

/// Bindings whose target is missing or deleted.
pub fn dangling_bindings(lookup: &dyn ElementLookup) -> Vec<RepairIssue> {
    let mut issues = Vec::new();
    for element in lookup.visible_elements() {
        let Some(linear) = element.linear() else {
            continue;
        };
        for endpoint in ENDPOINTS {
            if let Some(binding) = linear.binding(endpoint) {
                let alive = lookup
                    .get_element(&binding.element_id)
                    .is_some_and(|t| !t.is_deleted);
                if !alive {
                    issues.push(RepairIssue::MissingBindingTarget {
                        element: element.id,
                        endpoint,
                        target: binding.element_id,
                    });
                }
            }
        }
    }
    issues
}
