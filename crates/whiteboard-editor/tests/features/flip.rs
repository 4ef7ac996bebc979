use std::sync::Arc;

use whiteboard_core::{Endpoint, Point};
use whiteboard_editor::{
    flip_selected_elements, Action, ActionContext, AppState, Element, ElementKind,
    ElementsMap, FlipDirection, FlipHorizontal, FlipVertical, PointBinding, Scene,
    SceneAccessor,
};
use whiteboard_settings::Config;

struct Board {
    left: Element,
    right: Element,
    arrow: Element,
    scene: Scene,
}

/// Two squares joined by an arrow bound at both ends.
fn bound_pair() -> Board {
    let left = Element::rectangle(0.0, 0.0, 10.0, 10.0);
    let right = Element::rectangle(20.0, 0.0, 10.0, 10.0);
    let arrow = Element::arrow(10.0, 5.0, vec![Point::ORIGIN, Point::new(10.0, 0.0)])
        .with_binding(Endpoint::Start, PointBinding::new(left.id))
        .with_binding(Endpoint::End, PointBinding::new(right.id));
    let scene = Scene::from_elements(vec![left.clone(), right.clone(), arrow.clone()]);
    Board {
        left,
        right,
        arrow,
        scene,
    }
}

fn flip(scene: &Scene, state: &AppState, direction: FlipDirection) -> Vec<Arc<Element>> {
    let map = scene.non_deleted_elements_map();
    flip_selected_elements(scene.elements(), state, &map, &Config::default(), direction).elements
}

fn target_of(element: &Element, endpoint: Endpoint) -> Option<whiteboard_core::ElementId> {
    element
        .linear()
        .and_then(|l| l.binding(endpoint))
        .map(|b| b.element_id)
}

#[test]
fn test_flip_swaps_bound_shapes_and_keeps_bindings() {
    let board = bound_pair();
    let state = AppState::new().with_selection([board.left.id, board.right.id, board.arrow.id]);

    let out = flip(&board.scene, &state, FlipDirection::Horizontal);

    assert_eq!(out.len(), 3);
    assert_eq!(out[0].id, board.left.id);
    assert_eq!(out[0].x, 20.0);
    assert_eq!(out[1].x, 0.0);
    assert_eq!(out[0].y, 0.0);

    let arrow = &out[2];
    assert!(arrow
        .endpoint_position(Endpoint::Start)
        .unwrap()
        .approx_eq(&Point::new(20.0, 5.0), 1e-9));
    assert_eq!(target_of(arrow, Endpoint::Start), Some(board.left.id));
    assert_eq!(target_of(arrow, Endpoint::End), Some(board.right.id));
}

#[test]
fn test_unselected_arrow_follows_flipped_shapes() {
    let board = bound_pair();
    let state = AppState::new().with_selection([board.left.id, board.right.id]);

    let out = flip(&board.scene, &state, FlipDirection::Horizontal);

    assert_eq!(out[0].x, 20.0);
    assert_eq!(out[1].x, 0.0);
    let arrow = &out[2];
    assert!(!Arc::ptr_eq(arrow, &board.scene.elements()[2]));
    assert!(arrow
        .endpoint_position(Endpoint::Start)
        .unwrap()
        .approx_eq(&Point::new(20.0, 5.0), 1e-9));
    assert!(arrow
        .endpoint_position(Endpoint::End)
        .unwrap()
        .approx_eq(&Point::new(10.0, 5.0), 1e-9));
    assert_eq!(target_of(arrow, Endpoint::Start), Some(board.left.id));
    assert_eq!(target_of(arrow, Endpoint::End), Some(board.right.id));
    assert!(arrow.version > board.arrow.version);
}

#[test]
fn test_long_unselected_arrow_stays_attached() {
    let left = Element::rectangle(0.0, 0.0, 10.0, 10.0);
    let right = Element::rectangle(200.0, 0.0, 10.0, 10.0);
    let arrow = Element::arrow(10.0, 5.0, vec![Point::ORIGIN, Point::new(190.0, 0.0)])
        .with_binding(Endpoint::Start, PointBinding::new(left.id))
        .with_binding(Endpoint::End, PointBinding::new(right.id));
    let scene = Scene::from_elements(vec![left.clone(), right.clone(), arrow.clone()]);
    let state = AppState::new().with_selection([left.id, right.id]);

    let out = flip(&scene, &state, FlipDirection::Horizontal);

    assert_eq!(out[0].x, 200.0);
    assert_eq!(out[1].x, 0.0);
    let start = out[2].endpoint_position(Endpoint::Start).unwrap();
    let end = out[2].endpoint_position(Endpoint::End).unwrap();
    assert!(start.approx_eq(&Point::new(200.0, 5.0), 1e-9));
    assert!(end.approx_eq(&Point::new(10.0, 5.0), 1e-9));
    assert_eq!(target_of(&out[2], Endpoint::Start), Some(left.id));
    // The start now sits on the left square's edge again.
    assert!(out[0].x <= start.x && start.x <= out[0].x + out[0].width);
}

#[test]
fn test_only_bound_endpoint_follows() {
    let board = bound_pair();
    let label = Element::text(10.0, 3.0, 10.0, 4.0, "to").bound_to_container(board.arrow.id);
    let mut elements: Vec<Element> = board
        .scene
        .elements()
        .iter()
        .map(|e| Element::clone(e))
        .collect();
    elements.push(label.clone());
    let scene = Scene::from_elements(elements);
    let state = AppState::new().with_selection([board.left.id]);

    let out = flip(&scene, &state, FlipDirection::Horizontal);

    assert_eq!(out[0].x, 0.0);
    let start = out[2].endpoint_position(Endpoint::Start).unwrap();
    let end = out[2].endpoint_position(Endpoint::End).unwrap();
    assert!(start.approx_eq(&Point::new(0.0, 5.0), 1e-9));
    assert!(end.approx_eq(&Point::new(20.0, 5.0), 1e-9));
    assert!(Arc::ptr_eq(&out[1], &scene.elements()[1]));
    assert_eq!((out[3].x, out[3].y), (5.0, 3.0));
}

#[test]
fn test_flip_with_binding_disabled_unbinds() {
    let board = bound_pair();
    let mut state = AppState::new().with_selection([board.arrow.id]);
    state.is_binding_enabled = false;

    let out = flip(&board.scene, &state, FlipDirection::Vertical);

    assert!(!out[2].linear().unwrap().has_bindings());
    assert!(Arc::ptr_eq(&out[0], &board.scene.elements()[0]));
}

#[test]
fn test_zero_width_selection_flips_without_nan() {
    let line = Element::line(5.0, 0.0, vec![Point::ORIGIN, Point::new(0.0, 10.0)]);
    let scene = Scene::from_elements(vec![line.clone()]);
    let state = AppState::new().with_selection([line.id]);

    let horizontal = flip(&scene, &state, FlipDirection::Horizontal);
    assert_eq!(*horizontal[0], line);
    assert!(Arc::ptr_eq(&horizontal[0], &scene.elements()[0]));

    let vertical = flip(&scene, &state, FlipDirection::Vertical);
    let start = vertical[0].endpoint_position(Endpoint::Start).unwrap();
    assert!(start.is_finite());
    assert!(start.approx_eq(&Point::new(5.0, 10.0), 1e-9));
}

#[test]
fn test_empty_selection_returns_input() {
    let board = bound_pair();
    let ctx = ActionContext {
        scene: &board.scene,
        config: &Config::default(),
    };
    let state = AppState::new();

    let result = FlipHorizontal.perform(board.scene.elements(), &state, &ctx);

    assert!(!result.commit_to_history);
    assert_eq!(result.elements.len(), 3);
    for (a, b) in result.elements.iter().zip(board.scene.elements()) {
        assert!(Arc::ptr_eq(a, b));
    }
}

#[test]
fn test_perform_requests_commit() {
    let board = bound_pair();
    let config = Config::default();
    let ctx = ActionContext {
        scene: &board.scene,
        config: &config,
    };
    let state = AppState::new().with_selection([board.left.id]);

    let result = FlipVertical.perform(board.scene.elements(), &state, &ctx);
    assert!(result.commit_to_history);
    assert_eq!(result.app_state, state);
}

#[test]
fn test_frame_membership_follows_flip() {
    let frame = Element::frame(0.0, 0.0, 100.0, 100.0);
    let inside = Element::rectangle(10.0, 10.0, 20.0, 20.0).in_frame(frame.id);
    let outside = Element::rectangle(150.0, 10.0, 20.0, 20.0);
    let scene = Scene::from_elements(vec![frame.clone(), inside.clone(), outside.clone()]);
    let state = AppState::new().with_selection([inside.id, outside.id]);

    let out = flip(&scene, &state, FlipDirection::Horizontal);

    assert_eq!(out[1].x, 150.0);
    assert_eq!(out[1].frame_id, None);
    assert_eq!(out[2].x, 10.0);
    assert_eq!(out[2].frame_id, Some(frame.id));
    assert!(Arc::ptr_eq(&out[0], &scene.elements()[0]));
}

#[test]
fn test_selected_frame_takes_children_along() {
    let frame = Element::frame(0.0, 0.0, 100.0, 100.0);
    let child = Element::rectangle(10.0, 10.0, 20.0, 20.0).in_frame(frame.id);
    let scene = Scene::from_elements(vec![frame.clone(), child.clone()]);
    let state = AppState::new().with_selection([frame.id]);

    let out = flip(&scene, &state, FlipDirection::Horizontal);

    assert_eq!(out[0].x, 0.0);
    assert_eq!(out[1].x, 70.0);
    assert_eq!(out[1].frame_id, Some(frame.id));
}

#[test]
fn test_bound_label_moves_with_container() {
    let left = Element::rectangle(0.0, 0.0, 100.0, 50.0);
    let right = Element::rectangle(200.0, 0.0, 100.0, 50.0);
    let label = Element::text(30.0, 15.0, 40.0, 20.0, "label").bound_to_container(left.id);
    let scene = Scene::from_elements(vec![left.clone(), right.clone(), label.clone()]);
    let state = AppState::new().with_selection([left.id, right.id]);

    let out = flip(&scene, &state, FlipDirection::Horizontal);

    assert_eq!(out[0].x, 200.0);
    assert_eq!((out[2].x, out[2].y), (230.0, 15.0));
}

#[test]
fn test_image_is_mirrored() {
    let image = Element::image(0.0, 0.0, 40.0, 20.0, "photo");
    let scene = Scene::from_elements(vec![image.clone()]);
    let state = AppState::new().with_selection([image.id]);

    let out = flip(&scene, &state, FlipDirection::Vertical);
    match &out[0].kind {
        ElementKind::Image(img) => assert_eq!(img.scale, [1.0, -1.0]),
        other => panic!("unexpected kind {:?}", other),
    }
}

#[test]
fn test_flip_uses_scene_map_for_targets() {
    let board = bound_pair();
    let state = AppState::new().with_selection([board.arrow.id]);
    let map = ElementsMap::non_deleted(board.scene.elements());

    let outcome = flip_selected_elements(
        board.scene.elements(),
        &state,
        &map,
        &Config::default(),
        FlipDirection::Horizontal,
    );

    assert_eq!(outcome.flipped, 1);
    // Mirrored in place each endpoint sits 10 units from its old target,
    // still within the 16 unit minimum gap, so both bindings hold.
    let linear = outcome.elements[2].linear().unwrap();
    let start = linear.start_binding.unwrap();
    let end = linear.end_binding.unwrap();
    assert_eq!(start.element_id, board.left.id);
    assert_eq!(end.element_id, board.right.id);
    assert!((start.gap - 10.0).abs() < 1e-9);
    assert!((end.gap - 10.0).abs() < 1e-9);
    assert!(Arc::ptr_eq(&outcome.elements[0], &board.scene.elements()[0]));
}

#[test]
fn test_action_metadata() {
    assert_eq!(FlipHorizontal.name(), "flipHorizontal");
    assert_eq!(FlipVertical.name(), "flipVertical");
    assert_eq!(FlipHorizontal.track_event().category, "element");
    assert_eq!(
        FlipHorizontal.context_item_label(),
        Some("labels.flipHorizontal")
    );
    assert_eq!(FlipVertical.context_item_label(), Some("labels.flipVertical"));
}
