//! Axis-aligned bounds of elements and element sets.

use whiteboard_core::{Bounds, GeometryError, Point};

use crate::model::{Element, ElementKind};

/// Axis-aligned box around an element's visible geometry, rotation applied.
pub fn element_bounds(element: &Element) -> Bounds {
    match &element.kind {
        ElementKind::Line(_) | ElementKind::Arrow(_) | ElementKind::Freedraw(_) => {
            let points = element.absolute_points().unwrap_or_default();
            Bounds::from_points(&points)
                .unwrap_or_else(|| Bounds::new(element.x, element.y, element.x, element.y))
        }
        ElementKind::Ellipse => ellipse_bounds(element),
        ElementKind::Rectangle
        | ElementKind::Diamond
        | ElementKind::Text(_)
        | ElementKind::Image(_)
        | ElementKind::Frame(_) => box_bounds(element),
    }
}

fn box_bounds(element: &Element) -> Bounds {
    let (x, y, w, h) = (element.x, element.y, element.width, element.height);
    if element.angle == 0.0 {
        return Bounds::from_rect(x, y, w, h);
    }
    let center = element.center();
    let corners = [
        Point::new(x, y),
        Point::new(x + w, y),
        Point::new(x + w, y + h),
        Point::new(x, y + h),
    ]
    .map(|p| p.rotate_about(center, element.angle));
    Bounds::from_points(&corners).unwrap_or_else(|| Bounds::from_rect(x, y, w, h))
}

// Exact extent of a rotated ellipse; rotated corners would overshoot.
fn ellipse_bounds(element: &Element) -> Bounds {
    let center = element.center();
    let rx = element.width.abs() / 2.0;
    let ry = element.height.abs() / 2.0;
    let (s, c) = element.angle.sin_cos();
    let half_w = ((rx * c).powi(2) + (ry * s).powi(2)).sqrt();
    let half_h = ((rx * s).powi(2) + (ry * c).powi(2)).sqrt();
    Bounds::new(
        center.x - half_w,
        center.y - half_h,
        center.x + half_w,
        center.y + half_h,
    )
}

/// Tightest axis-aligned box enclosing every element.
///
/// Returns [`GeometryError::EmptyInput`] when there are no elements.
pub fn common_bounding_box<'a, I>(elements: I) -> Result<Bounds, GeometryError>
where
    I: IntoIterator<Item = &'a Element>,
{
    elements
        .into_iter()
        .map(element_bounds)
        .reduce(|acc, b| acc.union(&b))
        .ok_or(GeometryError::EmptyInput)
}
