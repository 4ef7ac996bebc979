//! Id-keyed lookups over element collections.
//!
//! An [`ElementsMap`] indexes a borrowed slice by id, pointing at array
//! positions. It is built fresh for each operation and never outlives the
//! slice it borrows, so it cannot dangle across mutations.
//! [`TransformedView`] overlays the working copies of an operation on such a
//! map, so repair passes see post-transform geometry for the selection and
//! the untouched scene for everything else.

use std::collections::HashMap;
use std::sync::Arc;

use whiteboard_core::ElementId;

use crate::model::Element;

/// Read access to elements by id and in stacking order.
pub trait ElementLookup {
    fn get_element(&self, id: &ElementId) -> Option<&Element>;

    /// Visible elements, bottom-most first.
    fn visible_elements(&self) -> Vec<&Element>;
}

/// Id → position index over a slice of shared elements.
#[derive(Debug, Clone)]
pub struct ElementsMap<'a> {
    elements: &'a [Arc<Element>],
    index: HashMap<ElementId, usize>,
    order: Vec<usize>,
}

impl<'a> ElementsMap<'a> {
    /// Indexes every element, deleted ones included.
    pub fn new(elements: &'a [Arc<Element>]) -> Self {
        Self::build(elements, |_| true)
    }

    /// Indexes only elements that are not soft-deleted.
    pub fn non_deleted(elements: &'a [Arc<Element>]) -> Self {
        Self::build(elements, |e| !e.is_deleted)
    }

    fn build(elements: &'a [Arc<Element>], keep: impl Fn(&Element) -> bool) -> Self {
        let mut index = HashMap::with_capacity(elements.len());
        let mut order: Vec<usize> = Vec::with_capacity(elements.len());
        for (pos, element) in elements.iter().enumerate() {
            if !keep(element) {
                continue;
            }
            if let Some(shadowed) = index.insert(element.id, pos) {
                tracing::warn!("Duplicate element id {} in collection", element.id);
                // `order` is ascending, so the shadowed entry is found by bisection.
                if let Ok(at) = order.binary_search(&shadowed) {
                    order.remove(at);
                }
            }
            order.push(pos);
        }
        Self {
            elements,
            index,
            order,
        }
    }

    pub fn get(&self, id: &ElementId) -> Option<&'a Element> {
        self.index.get(id).map(|&pos| self.elements[pos].as_ref())
    }

    pub fn get_shared(&self, id: &ElementId) -> Option<&'a Arc<Element>> {
        self.index.get(id).map(|&pos| &self.elements[pos])
    }

    /// Position of `id` in the underlying slice.
    pub fn position(&self, id: &ElementId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Indexed elements in collection order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Element> + '_ {
        self.order.iter().map(move |&pos| self.elements[pos].as_ref())
    }
}

impl ElementLookup for ElementsMap<'_> {
    fn get_element(&self, id: &ElementId) -> Option<&Element> {
        self.get(id)
    }

    fn visible_elements(&self) -> Vec<&Element> {
        self.iter().filter(|e| !e.is_deleted).collect()
    }
}

/// Working copies of an operation layered over the scene map.
pub struct TransformedView<'m, 'a> {
    base: &'m ElementsMap<'a>,
    working: &'m [Element],
    index: HashMap<ElementId, usize>,
}

impl<'m, 'a> TransformedView<'m, 'a> {
    pub fn new(base: &'m ElementsMap<'a>, working: &'m [Element]) -> Self {
        let index = working
            .iter()
            .enumerate()
            .map(|(pos, e)| (e.id, pos))
            .collect();
        Self {
            base,
            working,
            index,
        }
    }

    /// Whether `id` is one of the working copies.
    pub fn is_working(&self, id: &ElementId) -> bool {
        self.index.contains_key(id)
    }
}

impl ElementLookup for TransformedView<'_, '_> {
    fn get_element(&self, id: &ElementId) -> Option<&Element> {
        match self.index.get(id) {
            Some(&pos) => Some(&self.working[pos]),
            None => self.base.get(id),
        }
    }

    fn visible_elements(&self) -> Vec<&Element> {
        let mut out: Vec<&Element> = self
            .base
            .iter()
            .map(|e| match self.index.get(&e.id) {
                Some(&pos) => &self.working[pos],
                None => e,
            })
            .filter(|e| !e.is_deleted)
            .collect();
        out.extend(
            self.working
                .iter()
                .filter(|e| !e.is_deleted && !self.base.contains(&e.id)),
        );
        out
    }
}

/// Working copies on their own, for callers without a scene map.
impl ElementLookup for Vec<Element> {
    fn get_element(&self, id: &ElementId) -> Option<&Element> {
        self.iter().find(|e| e.id == *id)
    }

    fn visible_elements(&self) -> Vec<&Element> {
        self.iter().filter(|e| !e.is_deleted).collect()
    }
}
