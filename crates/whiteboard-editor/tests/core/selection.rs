use std::sync::Arc;

use whiteboard_core::SelectionError;
use whiteboard_editor::{require_selection, selected_elements, AppState, Element, SelectionOptions};

fn shared(elements: &[Element]) -> Vec<Arc<Element>> {
    elements.iter().cloned().map(Arc::new).collect()
}

fn ids(selected: &[&Arc<Element>]) -> Vec<whiteboard_core::ElementId> {
    selected.iter().map(|e| e.id).collect()
}

#[test]
fn test_selection_keeps_input_order_and_skips_deleted() {
    let a = Element::rectangle(0.0, 0.0, 10.0, 10.0);
    let b = Element::rectangle(20.0, 0.0, 10.0, 10.0).deleted();
    let c = Element::ellipse(40.0, 0.0, 10.0, 10.0);
    let elements = shared(&[a.clone(), b.clone(), c.clone()]);
    let state = AppState::new().with_selection([c.id, b.id, a.id]);

    let selected = selected_elements(&elements, &state, SelectionOptions::EXPANDED);
    assert_eq!(ids(&selected), vec![a.id, c.id]);
    assert!(Arc::ptr_eq(selected[0], &elements[0]));
}

#[test]
fn test_selected_frame_pulls_in_children() {
    let frame = Element::frame(0.0, 0.0, 100.0, 100.0);
    let child = Element::rectangle(10.0, 10.0, 20.0, 20.0).in_frame(frame.id);
    let outsider = Element::rectangle(200.0, 0.0, 20.0, 20.0);
    let elements = shared(&[child.clone(), frame.clone(), outsider]);
    let state = AppState::new().with_selection([frame.id]);

    let expanded = selected_elements(&elements, &state, SelectionOptions::EXPANDED);
    assert_eq!(ids(&expanded), vec![child.id, frame.id]);

    let direct = selected_elements(&elements, &state, SelectionOptions::DIRECT);
    assert_eq!(ids(&direct), vec![frame.id]);
}

#[test]
fn test_bound_label_follows_container() {
    let rect = Element::rectangle(0.0, 0.0, 100.0, 50.0);
    let label = Element::text(30.0, 15.0, 40.0, 20.0, "label").bound_to_container(rect.id);
    let elements = shared(&[rect.clone(), label.clone()]);
    let state = AppState::new().with_selection([rect.id]);

    let options = SelectionOptions {
        include_bound_text_element: true,
        include_elements_in_frames: false,
    };
    let selected = selected_elements(&elements, &state, options);
    assert_eq!(ids(&selected), vec![rect.id, label.id]);
}

#[test]
fn test_label_of_frame_child_is_included() {
    let frame = Element::frame(0.0, 0.0, 200.0, 200.0);
    let rect = Element::rectangle(10.0, 10.0, 100.0, 50.0).in_frame(frame.id);
    let label = Element::text(40.0, 25.0, 40.0, 20.0, "label").bound_to_container(rect.id);
    let elements = shared(&[frame.clone(), rect.clone(), label.clone()]);
    let state = AppState::new().with_selection([frame.id]);

    let selected = selected_elements(&elements, &state, SelectionOptions::EXPANDED);
    assert_eq!(ids(&selected), vec![frame.id, rect.id, label.id]);
}

#[test]
fn test_selection_has_no_duplicates() {
    let frame = Element::frame(0.0, 0.0, 100.0, 100.0);
    let child = Element::rectangle(10.0, 10.0, 20.0, 20.0).in_frame(frame.id);
    let elements = shared(&[frame.clone(), child.clone()]);
    let state = AppState::new().with_selection([frame.id, child.id]);

    let selected = selected_elements(&elements, &state, SelectionOptions::EXPANDED);
    assert_eq!(selected.len(), 2);
}

#[test]
fn test_empty_selection() {
    let rect = Element::rectangle(0.0, 0.0, 10.0, 10.0);
    let gone = Element::rectangle(0.0, 0.0, 10.0, 10.0).deleted();
    let elements = shared(&[rect, gone.clone()]);

    let nothing = AppState::new();
    assert!(selected_elements(&elements, &nothing, SelectionOptions::EXPANDED).is_empty());

    let only_deleted = AppState::new().with_selection([gone.id]);
    assert_eq!(
        require_selection(&elements, &only_deleted, SelectionOptions::EXPANDED).unwrap_err(),
        SelectionError::EmptySelection
    );
}
