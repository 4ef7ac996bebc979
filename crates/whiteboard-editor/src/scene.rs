use std::sync::Arc;

use whiteboard_core::ElementId;

use crate::elements_map::ElementsMap;
use crate::model::Element;

/// Read access to the authoritative element collection.
pub trait SceneAccessor {
    /// All elements in stacking order, deleted ones included.
    fn elements(&self) -> &[Arc<Element>];

    /// Id lookup over the elements that are not soft-deleted.
    fn non_deleted_elements_map(&self) -> ElementsMap<'_> {
        ElementsMap::non_deleted(self.elements())
    }
}

/// Owns the element collection and swaps it wholesale on commit.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    elements: Vec<Arc<Element>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_elements(elements: Vec<Element>) -> Self {
        Self {
            elements: elements.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn add(&mut self, element: Element) -> ElementId {
        let id = element.id;
        self.elements.push(Arc::new(element));
        id
    }

    pub fn get(&self, id: &ElementId) -> Option<&Arc<Element>> {
        self.elements.iter().find(|e| e.id == *id)
    }

    /// Replaces the collection, returning the previous one.
    pub fn replace_elements(&mut self, elements: Vec<Arc<Element>>) -> Vec<Arc<Element>> {
        std::mem::replace(&mut self.elements, elements)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl SceneAccessor for Scene {
    fn elements(&self) -> &[Arc<Element>] {
        &self.elements
    }
}
