//! Multi-element resize around a shared anchor.
//!
//! The selection's common box is scaled so that the dragged handle follows the
//! pointer while the anchor stays put. The anchor is the corner (or edge)
//! opposite the handle, or the box centre when resizing from the centre. A
//! negative scale mirrors: shapes keep a positive extent, while point-based
//! elements have every vertex reflected and images flip their bitmap.
//!
//! The flip actions use this with the north-west handle, `from_center` set,
//! and the pointer dragged onto the opposite corner of one axis, which gives a
//! scale of `-1` on that axis and leaves the box where it was.

use std::collections::{HashMap, HashSet};
use std::f64::consts::TAU;

use nalgebra::{Matrix3, Point2, Vector2};
use tracing::debug;
use whiteboard_core::{Axis, Bounds, ElementId, Endpoint, GeometryError, Point};

use crate::binding::BindingIndex;
use crate::bounds::common_bounding_box;
use crate::elements_map::ElementLookup;
use crate::model::{Element, ElementKind, VerticalAlign, BOUND_TEXT_PADDING};

/// Scale factors closer to zero than this collapse geometry and are ignored.
const MIN_SCALE: f64 = 1e-9;

/// Handle of the selection box being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformHandle {
    N,
    S,
    E,
    W,
    Nw,
    Ne,
    Sw,
    Se,
}

impl TransformHandle {
    /// Position of the handle on `bounds`.
    pub fn position(&self, bounds: &Bounds) -> Point {
        let c = bounds.center();
        match self {
            TransformHandle::N => Point::new(c.x, bounds.min_y),
            TransformHandle::S => Point::new(c.x, bounds.max_y),
            TransformHandle::E => Point::new(bounds.max_x, c.y),
            TransformHandle::W => Point::new(bounds.min_x, c.y),
            TransformHandle::Nw => Point::new(bounds.min_x, bounds.min_y),
            TransformHandle::Ne => Point::new(bounds.max_x, bounds.min_y),
            TransformHandle::Sw => Point::new(bounds.min_x, bounds.max_y),
            TransformHandle::Se => Point::new(bounds.max_x, bounds.max_y),
        }
    }

    pub fn opposite(&self) -> TransformHandle {
        match self {
            TransformHandle::N => TransformHandle::S,
            TransformHandle::S => TransformHandle::N,
            TransformHandle::E => TransformHandle::W,
            TransformHandle::W => TransformHandle::E,
            TransformHandle::Nw => TransformHandle::Se,
            TransformHandle::Ne => TransformHandle::Sw,
            TransformHandle::Sw => TransformHandle::Ne,
            TransformHandle::Se => TransformHandle::Nw,
        }
    }

    /// Whether dragging this handle changes the extent along `axis`.
    pub fn affects(&self, axis: Axis) -> bool {
        match (self, axis) {
            (TransformHandle::N | TransformHandle::S, Axis::X) => false,
            (TransformHandle::E | TransformHandle::W, Axis::Y) => false,
            _ => true,
        }
    }
}

/// Parameters of one resize gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeRequest {
    pub handle: TransformHandle,
    /// Scale about the box centre instead of the opposite handle.
    pub from_center: bool,
    /// Where the handle is dragged to.
    pub pointer: Point,
}

impl ResizeRequest {
    pub fn new(handle: TransformHandle, pointer: Point) -> Self {
        Self {
            handle,
            from_center: false,
            pointer,
        }
    }

    pub fn from_center(mut self) -> Self {
        self.from_center = true;
        self
    }
}

/// What a resize did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeOutcome {
    pub scale_x: f64,
    pub scale_y: f64,
    pub anchor: Point,
    /// Box of the selection before the resize.
    pub bounds: Bounds,
    /// Elements whose geometry changed.
    pub resized: usize,
}

impl ResizeOutcome {
    pub fn is_identity(&self) -> bool {
        self.scale_x == 1.0 && self.scale_y == 1.0
    }

    /// Whether exactly one axis was mirrored.
    pub fn is_mirror(&self) -> bool {
        (self.scale_x < 0.0) != (self.scale_y < 0.0)
    }

    fn transform(&self) -> Matrix3<f64> {
        Matrix3::new_nonuniform_scaling_wrt_point(
            &Vector2::new(self.scale_x, self.scale_y),
            &Point2::new(self.anchor.x, self.anchor.y),
        )
    }
}

/// Resizes `elements` as one group.
///
/// `lookup` resolves the containers of bound labels that are not part of
/// `elements`. Labels always follow their container rather than being scaled
/// on their own.
///
/// An axis on which the handle sits on the anchor (zero extent) keeps a scale
/// of `1`. Fails only with [`GeometryError::EmptyInput`] for an empty slice.
pub fn resize_multiple_elements(
    elements: &mut [Element],
    lookup: &dyn ElementLookup,
    request: &ResizeRequest,
) -> Result<ResizeOutcome, GeometryError> {
    let bounds = common_bounding_box(elements.iter())?;
    let anchor = if request.from_center {
        bounds.center()
    } else {
        request.handle.opposite().position(&bounds)
    };
    let handle = request.handle.position(&bounds);

    let scale_x = axis_scale(request, Axis::X, request.pointer.x - anchor.x, handle.x - anchor.x);
    let scale_y = axis_scale(request, Axis::Y, request.pointer.y - anchor.y, handle.y - anchor.y);
    let mut outcome = ResizeOutcome {
        scale_x,
        scale_y,
        anchor,
        bounds,
        resized: 0,
    };
    if outcome.is_identity() {
        return Ok(outcome);
    }

    let transform = outcome.transform();

    let positions: HashMap<ElementId, usize> =
        elements.iter().enumerate().map(|(i, e)| (e.id, i)).collect();
    let follows_container = |e: &Element| {
        e.container_id()
            .is_some_and(|c| positions.contains_key(&c) || lookup.get_element(&c).is_some())
    };
    let labels: Vec<usize> = (0..elements.len())
        .filter(|&i| follows_container(&elements[i]))
        .collect();
    let label_set: HashSet<usize> = labels.iter().copied().collect();

    for (i, element) in elements.iter_mut().enumerate() {
        if label_set.contains(&i) {
            continue;
        }
        resize_element(element, &transform, scale_x, scale_y);
        outcome.resized += 1;
    }

    for i in labels {
        let Some(container_id) = elements[i].container_id() else {
            continue;
        };
        let target = match positions.get(&container_id) {
            Some(&ci) => bound_text_position(&elements[ci], &elements[i]),
            None => match lookup.get_element(&container_id) {
                Some(container) => bound_text_position(container, &elements[i]),
                None => continue,
            },
        };
        let label = &mut elements[i];
        if label.x != target.x || label.y != target.y {
            label.x = target.x;
            label.y = target.y;
            label.bump_version();
            outcome.resized += 1;
        }
    }

    debug!(
        "Resized {} elements by ({}, {}) about ({}, {})",
        outcome.resized, scale_x, scale_y, anchor.x, anchor.y
    );
    Ok(outcome)
}

/// Drags the bound endpoints of linear elements along with their resized
/// targets.
///
/// Every visible linear element outside `resized` with an endpoint bound to a
/// member of `resized` gets that endpoint mapped by the same transform; its
/// stored bindings are left as they are. Returns the moved copies plus the
/// labels bound to them, re-centred. Labels of moved elements that are
/// themselves in `resized` are re-centred in place.
pub fn update_bound_elements(
    resized: &mut [Element],
    lookup: &dyn ElementLookup,
    outcome: &ResizeOutcome,
) -> Vec<Element> {
    if outcome.is_identity() {
        return Vec::new();
    }
    let transform = outcome.transform();
    let positions: HashMap<ElementId, usize> =
        resized.iter().enumerate().map(|(i, e)| (e.id, i)).collect();
    let visible = lookup.visible_elements();
    let index = BindingIndex::build(visible.iter().copied());

    let mut moved: Vec<Element> = Vec::new();
    for element in visible {
        if positions.contains_key(&element.id) {
            continue;
        }
        let Some(linear) = element.linear() else {
            continue;
        };
        let targets: Vec<(Endpoint, Point)> = [Endpoint::Start, Endpoint::End]
            .into_iter()
            .filter(|&end| {
                linear
                    .binding(end)
                    .is_some_and(|b| positions.contains_key(&b.element_id))
            })
            .filter_map(|end| {
                element
                    .endpoint_position(end)
                    .map(|p| (end, apply(&transform, p)))
            })
            .collect();
        if targets.is_empty() {
            continue;
        }

        let mut copy = element.clone();
        for (end, position) in targets {
            copy.move_endpoint(end, position);
        }
        if copy == *element {
            continue;
        }
        copy.bump_version();
        debug!("Moving bound endpoints of {}", copy.id);
        moved.push(copy);
    }

    let mut labels = Vec::new();
    for container in &moved {
        for label_id in index.bound_text(&container.id) {
            if let Some(&i) = positions.get(label_id) {
                recenter_label(container, &mut resized[i]);
            } else if let Some(label) = lookup.get_element(label_id) {
                let mut copy = label.clone();
                if recenter_label(container, &mut copy) {
                    labels.push(copy);
                }
            }
        }
    }
    moved.extend(labels);
    moved
}

/// Puts `label` back in its place on `container`. Returns whether it moved.
fn recenter_label(container: &Element, label: &mut Element) -> bool {
    let target = bound_text_position(container, label);
    if label.x == target.x && label.y == target.y {
        return false;
    }
    label.x = target.x;
    label.y = target.y;
    label.bump_version();
    true
}

fn axis_scale(request: &ResizeRequest, axis: Axis, target: f64, extent: f64) -> f64 {
    if !request.handle.affects(axis) {
        return 1.0;
    }
    if extent.abs() < MIN_SCALE {
        debug!("{}", GeometryError::DegenerateAxis { axis });
        return 1.0;
    }
    let scale = target / extent;
    if !scale.is_finite() || scale.abs() < MIN_SCALE {
        return 1.0;
    }
    scale
}

fn apply(transform: &Matrix3<f64>, p: Point) -> Point {
    let mapped = transform.transform_point(&Point2::new(p.x, p.y));
    Point::new(mapped.x, mapped.y)
}

fn resize_element(element: &mut Element, transform: &Matrix3<f64>, sx: f64, sy: f64) {
    let center = apply(transform, element.center());

    match &mut element.kind {
        ElementKind::Line(_) | ElementKind::Arrow(_) | ElementKind::Freedraw(_) => {
            if let Some(points) = element.points_mut() {
                for p in points.iter_mut() {
                    *p = p.scale(sx, sy);
                }
            }
            element.sync_point_extent();
            let local = element.local_center();
            element.x = center.x - local.x;
            element.y = center.y - local.y;
        }
        ElementKind::Text(text) => {
            let s = sx.abs().min(sy.abs());
            text.font_size *= s;
            element.width *= s;
            element.height *= s;
            element.x = center.x - element.width / 2.0;
            element.y = center.y - element.height / 2.0;
        }
        ElementKind::Image(image) => {
            if sx < 0.0 {
                image.scale[0] = -image.scale[0];
            }
            if sy < 0.0 {
                image.scale[1] = -image.scale[1];
            }
            resize_box(element, center, sx, sy);
        }
        ElementKind::Rectangle
        | ElementKind::Ellipse
        | ElementKind::Diamond
        | ElementKind::Frame(_) => resize_box(element, center, sx, sy),
    }

    if (sx < 0.0) != (sy < 0.0) && element.angle != 0.0 {
        element.angle = (TAU - element.angle).rem_euclid(TAU);
    }
    element.bump_version();
}

fn resize_box(element: &mut Element, center: Point, sx: f64, sy: f64) {
    element.width = (element.width * sx).abs();
    element.height = (element.height * sy).abs();
    element.x = center.x - element.width / 2.0;
    element.y = center.y - element.height / 2.0;
}

/// Top-left position that places `text` inside `container`.
///
/// Box containers centre the label horizontally and honour its vertical
/// alignment; linear containers carry it at the midpoint of their path.
pub fn bound_text_position(container: &Element, text: &Element) -> Point {
    if container.is_linear() {
        let mid = container
            .absolute_points()
            .and_then(|pts| path_midpoint(&pts))
            .unwrap_or_else(|| container.center());
        return Point::new(mid.x - text.width / 2.0, mid.y - text.height / 2.0);
    }

    let align = match &text.kind {
        ElementKind::Text(t) => t.vertical_align,
        _ => VerticalAlign::Middle,
    };
    let x = container.x + (container.width - text.width) / 2.0;
    let y = match align {
        VerticalAlign::Top => container.y + BOUND_TEXT_PADDING,
        VerticalAlign::Middle => container.y + (container.height - text.height) / 2.0,
        VerticalAlign::Bottom => {
            container.y + container.height - BOUND_TEXT_PADDING - text.height
        }
    };
    Point::new(x, y)
}

fn path_midpoint(points: &[Point]) -> Option<Point> {
    let total: f64 = points.windows(2).map(|w| w[0].distance_to(&w[1])).sum();
    let mut remaining = total / 2.0;
    for w in points.windows(2) {
        let len = w[0].distance_to(&w[1]);
        if len >= remaining && len > 0.0 {
            return Some(w[0] + (w[1] - w[0]) * (remaining / len));
        }
        remaining -= len;
    }
    points.first().copied()
}
