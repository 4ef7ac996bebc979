//! Distance from a point to an element's outline, used for binding hit tests.

use std::f64::consts::TAU;

use whiteboard_core::Point;

use crate::model::{Element, ElementKind};

const ELLIPSE_SEGMENTS: usize = 64;

/// Distance from `point` to the outline of `element`; `0.0` when inside.
pub fn distance_to_element(element: &Element, point: Point) -> f64 {
    // Undo the rotation so every shape is tested axis-aligned.
    let local = point.rotate_about(element.center(), -element.angle);
    match &element.kind {
        ElementKind::Rectangle
        | ElementKind::Text(_)
        | ElementKind::Image(_)
        | ElementKind::Frame(_) => distance_to_box(element, local),
        ElementKind::Diamond => distance_to_diamond(element, local),
        ElementKind::Ellipse => distance_to_ellipse(element, local),
        ElementKind::Line(_) | ElementKind::Arrow(_) | ElementKind::Freedraw(_) => {
            let origin = Point::new(element.x, element.y);
            let points: Vec<Point> = element
                .points()
                .unwrap_or_default()
                .iter()
                .map(|p| origin + *p)
                .collect();
            distance_to_polyline(&points, local)
        }
    }
}

fn distance_to_box(element: &Element, p: Point) -> f64 {
    let min_x = element.x.min(element.x + element.width);
    let max_x = element.x.max(element.x + element.width);
    let min_y = element.y.min(element.y + element.height);
    let max_y = element.y.max(element.y + element.height);
    let dx = (min_x - p.x).max(0.0).max(p.x - max_x);
    let dy = (min_y - p.y).max(0.0).max(p.y - max_y);
    (dx * dx + dy * dy).sqrt()
}

fn distance_to_diamond(element: &Element, p: Point) -> f64 {
    let c = element.center();
    let hw = element.width.abs() / 2.0;
    let hh = element.height.abs() / 2.0;
    if hw > 0.0 && hh > 0.0 && (p.x - c.x).abs() / hw + (p.y - c.y).abs() / hh <= 1.0 {
        return 0.0;
    }
    let outline = [
        Point::new(c.x, c.y - hh),
        Point::new(c.x + hw, c.y),
        Point::new(c.x, c.y + hh),
        Point::new(c.x - hw, c.y),
        Point::new(c.x, c.y - hh),
    ];
    distance_to_polyline(&outline, p)
}

fn distance_to_ellipse(element: &Element, p: Point) -> f64 {
    let c = element.center();
    let rx = element.width.abs() / 2.0;
    let ry = element.height.abs() / 2.0;
    if rx > 0.0 && ry > 0.0 {
        let nx = (p.x - c.x) / rx;
        let ny = (p.y - c.y) / ry;
        if nx * nx + ny * ny <= 1.0 {
            return 0.0;
        }
    }
    let outline: Vec<Point> = (0..=ELLIPSE_SEGMENTS)
        .map(|i| {
            let t = TAU * i as f64 / ELLIPSE_SEGMENTS as f64;
            Point::new(c.x + rx * t.cos(), c.y + ry * t.sin())
        })
        .collect();
    distance_to_polyline(&outline, p)
}

fn distance_to_polyline(points: &[Point], p: Point) -> f64 {
    match points {
        [] => f64::INFINITY,
        [only] => only.distance_to(&p),
        _ => points
            .windows(2)
            .map(|w| distance_to_segment(p, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq == 0.0 {
        return p.distance_to(&a);
    }
    let ap = p - a;
    let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
    p.distance_to(&(a + ab * t))
}
