use std::f64::consts::TAU;

use std::sync::Arc;

use whiteboard_core::{Endpoint, GeometryError, Point};
use whiteboard_editor::{
    resize_multiple_elements, update_bound_elements, Element, ElementKind, ElementsMap,
    PointBinding, ResizeRequest, TransformHandle,
};

fn no_scene() -> Vec<Element> {
    Vec::new()
}

fn flip_horizontal(elements: &mut [Element]) -> whiteboard_editor::ResizeOutcome {
    let bounds = whiteboard_editor::common_bounding_box(elements.iter()).unwrap();
    let request =
        ResizeRequest::new(TransformHandle::Nw, Point::new(bounds.max_x, bounds.min_y))
            .from_center();
    resize_multiple_elements(elements, &no_scene(), &request).unwrap()
}

fn flip_vertical(elements: &mut [Element]) -> whiteboard_editor::ResizeOutcome {
    let bounds = whiteboard_editor::common_bounding_box(elements.iter()).unwrap();
    let request =
        ResizeRequest::new(TransformHandle::Nw, Point::new(bounds.min_x, bounds.max_y))
            .from_center();
    resize_multiple_elements(elements, &no_scene(), &request).unwrap()
}

#[test]
fn test_mirror_swaps_rectangles() {
    let mut working = vec![
        Element::rectangle(0.0, 0.0, 10.0, 10.0),
        Element::rectangle(20.0, 0.0, 10.0, 10.0),
    ];
    let outcome = flip_horizontal(&mut working);

    assert_eq!(outcome.scale_x, -1.0);
    assert_eq!(outcome.scale_y, 1.0);
    assert!(outcome.is_mirror());
    assert_eq!(outcome.anchor, Point::new(15.0, 5.0));
    assert_eq!(outcome.resized, 2);
    assert_eq!(working[0].x, 20.0);
    assert_eq!(working[1].x, 0.0);
    assert_eq!(working[0].width, 10.0);
    assert_eq!(working[0].y, 0.0);
}

#[test]
fn test_mirror_reflects_points() {
    let arrow = Element::arrow(
        0.0,
        0.0,
        vec![Point::ORIGIN, Point::new(10.0, 0.0), Point::new(10.0, 10.0)],
    );
    let mut working = vec![arrow];
    flip_horizontal(&mut working);

    let points = working[0].absolute_points().unwrap();
    let expected = [Point::new(10.0, 0.0), Point::new(0.0, 0.0), Point::new(0.0, 10.0)];
    for (p, e) in points.iter().zip(expected.iter()) {
        assert!(p.approx_eq(e, 1e-9), "{:?} != {:?}", p, e);
    }
    assert_eq!(working[0].width, 10.0);
    assert_eq!(working[0].height, 10.0);
}

#[test]
fn test_zero_width_axis_is_left_alone() {
    let line = Element::line(5.0, 0.0, vec![Point::ORIGIN, Point::new(0.0, 10.0)]);
    let version = line.version;
    let mut working = vec![line.clone()];

    let outcome = flip_horizontal(&mut working);
    assert!(outcome.is_identity());
    assert_eq!(outcome.resized, 0);
    assert_eq!(working[0], line);
    assert_eq!(working[0].version, version);

    let outcome = flip_vertical(&mut working);
    assert_eq!(outcome.scale_y, -1.0);
    let start = working[0].endpoint_position(whiteboard_core::Endpoint::Start).unwrap();
    let end = working[0].endpoint_position(whiteboard_core::Endpoint::End).unwrap();
    assert!(start.approx_eq(&Point::new(5.0, 10.0), 1e-9));
    assert!(end.approx_eq(&Point::new(5.0, 0.0), 1e-9));
    assert!(working[0].x.is_finite() && working[0].y.is_finite());
    assert!(working[0].version > version);
}

#[test]
fn test_mirror_toggles_image_scale() {
    let mut working = vec![Element::image(0.0, 0.0, 20.0, 10.0, "file")];
    flip_horizontal(&mut working);
    match &working[0].kind {
        ElementKind::Image(image) => {
            assert!(image.is_mirrored_x());
            assert!(!image.is_mirrored_y());
        }
        other => panic!("unexpected kind {:?}", other),
    }
    assert_eq!(working[0].x, 0.0);

    flip_horizontal(&mut working);
    match &working[0].kind {
        ElementKind::Image(image) => assert_eq!(image.scale, [1.0, 1.0]),
        other => panic!("unexpected kind {:?}", other),
    }
}

#[test]
fn test_mirror_negates_rotation() {
    let mut working = vec![Element::rectangle(0.0, 0.0, 20.0, 10.0).with_angle(0.5)];
    flip_vertical(&mut working);
    assert!((working[0].angle - (TAU - 0.5)).abs() < 1e-12);
}

#[test]
fn test_text_scales_uniformly() {
    let mut working = vec![
        Element::text(0.0, 0.0, 40.0, 20.0, "hello"),
        Element::rectangle(0.0, 0.0, 100.0, 100.0),
    ];
    let request = ResizeRequest::new(TransformHandle::Se, Point::new(200.0, 300.0));
    let outcome = resize_multiple_elements(&mut working, &no_scene(), &request).unwrap();

    assert_eq!(outcome.anchor, Point::ORIGIN);
    assert_eq!((outcome.scale_x, outcome.scale_y), (2.0, 3.0));
    let text = &working[0];
    assert_eq!((text.width, text.height), (80.0, 40.0));
    assert_eq!((text.x, text.y), (0.0, 10.0));
    match &text.kind {
        ElementKind::Text(t) => assert_eq!(t.font_size, 40.0),
        other => panic!("unexpected kind {:?}", other),
    }
    assert_eq!((working[1].width, working[1].height), (200.0, 300.0));
}

#[test]
fn test_bound_label_is_recentered_in_container() {
    let rect = Element::rectangle(0.0, 0.0, 100.0, 50.0);
    let label = Element::text(30.0, 15.0, 40.0, 20.0, "label").bound_to_container(rect.id);
    let mut working = vec![rect, label];

    let request = ResizeRequest::new(TransformHandle::Se, Point::new(200.0, 100.0));
    resize_multiple_elements(&mut working, &no_scene(), &request).unwrap();

    assert_eq!((working[0].width, working[0].height), (200.0, 100.0));
    let label = &working[1];
    assert_eq!((label.width, label.height), (40.0, 20.0));
    assert_eq!((label.x, label.y), (80.0, 40.0));
}

#[test]
fn test_edge_handle_scales_one_axis() {
    let mut working = vec![Element::rectangle(0.0, 0.0, 10.0, 10.0)];
    let request = ResizeRequest::new(TransformHandle::E, Point::new(30.0, 999.0));
    let outcome = resize_multiple_elements(&mut working, &no_scene(), &request).unwrap();
    assert_eq!((outcome.scale_x, outcome.scale_y), (3.0, 1.0));
    assert_eq!((working[0].x, working[0].width, working[0].height), (0.0, 30.0, 10.0));
}

#[test]
fn test_empty_input() {
    let mut working: Vec<Element> = Vec::new();
    let request = ResizeRequest::new(TransformHandle::Nw, Point::ORIGIN).from_center();
    assert_eq!(
        resize_multiple_elements(&mut working, &no_scene(), &request),
        Err(GeometryError::EmptyInput)
    );
}

#[test]
fn test_bound_endpoints_follow_resized_targets() {
    let left = Element::rectangle(0.0, 0.0, 10.0, 10.0);
    let right = Element::rectangle(200.0, 0.0, 10.0, 10.0);
    let arrow = Element::arrow(10.0, 5.0, vec![Point::ORIGIN, Point::new(190.0, 0.0)])
        .with_binding(Endpoint::Start, PointBinding::new(left.id))
        .with_binding(Endpoint::End, PointBinding::new(right.id));
    let loose = Element::line(0.0, 50.0, vec![Point::ORIGIN, Point::new(30.0, 0.0)]);
    let scene: Vec<Arc<Element>> = [left.clone(), right.clone(), arrow.clone(), loose]
        .into_iter()
        .map(Arc::new)
        .collect();
    let map = ElementsMap::non_deleted(&scene);

    let mut working = vec![left, right];
    let bounds = whiteboard_editor::common_bounding_box(working.iter()).unwrap();
    let request =
        ResizeRequest::new(TransformHandle::Nw, Point::new(bounds.max_x, bounds.min_y))
            .from_center();
    let outcome = resize_multiple_elements(&mut working, &map, &request).unwrap();
    let moved = update_bound_elements(&mut working, &map, &outcome);

    assert_eq!(moved.len(), 1);
    assert_eq!(moved[0].id, arrow.id);
    let start = moved[0].endpoint_position(Endpoint::Start).unwrap();
    let end = moved[0].endpoint_position(Endpoint::End).unwrap();
    assert!(start.approx_eq(&Point::new(200.0, 5.0), 1e-9));
    assert!(end.approx_eq(&Point::new(10.0, 5.0), 1e-9));
    let linear = moved[0].linear().unwrap();
    let original = arrow.linear().unwrap();
    assert_eq!(linear.points, vec![Point::ORIGIN, Point::new(-190.0, 0.0)]);
    assert_eq!(linear.start_binding, original.start_binding);
    assert_eq!(linear.end_binding, original.end_binding);
    assert_eq!(moved[0].version, arrow.version + 1);
}

#[test]
fn test_identity_resize_moves_nothing() {
    let rect = Element::rectangle(0.0, 0.0, 10.0, 0.0);
    let arrow = Element::arrow(10.0, 0.0, vec![Point::ORIGIN, Point::new(50.0, 0.0)])
        .with_binding(Endpoint::Start, PointBinding::new(rect.id));
    let scene: Vec<Arc<Element>> = [rect.clone(), arrow].into_iter().map(Arc::new).collect();
    let map = ElementsMap::non_deleted(&scene);

    let mut working = vec![rect];
    let request = ResizeRequest::new(TransformHandle::Nw, Point::new(0.0, 0.0)).from_center();
    let outcome = resize_multiple_elements(&mut working, &map, &request).unwrap();

    assert!(outcome.is_identity());
    assert!(update_bound_elements(&mut working, &map, &outcome).is_empty());
}
