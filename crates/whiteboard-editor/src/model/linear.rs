use serde::{Deserialize, Serialize};

use whiteboard_core::{ElementId, Endpoint, Point};

/// Attachment of a linear endpoint to a bindable element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointBinding {
    pub element_id: ElementId,
    /// Where the line would cross the target, from -1 (one side of the
    /// centre) to 1 (the other side); 0 aims at the centre.
    pub focus: f64,
    /// Distance between the endpoint and the target outline.
    pub gap: f64,
}

impl PointBinding {
    pub fn new(element_id: ElementId) -> Self {
        Self {
            element_id,
            focus: 0.0,
            gap: 0.0,
        }
    }
}

/// Points and endpoint bindings shared by lines and arrows.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LinearElement {
    /// Vertices relative to the element origin; the first is usually `(0, 0)`.
    pub points: Vec<Point>,
    pub start_binding: Option<PointBinding>,
    pub end_binding: Option<PointBinding>,
}

impl LinearElement {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            start_binding: None,
            end_binding: None,
        }
    }

    pub fn binding(&self, endpoint: Endpoint) -> Option<&PointBinding> {
        match endpoint {
            Endpoint::Start => self.start_binding.as_ref(),
            Endpoint::End => self.end_binding.as_ref(),
        }
    }

    pub fn set_binding(&mut self, endpoint: Endpoint, binding: Option<PointBinding>) {
        match endpoint {
            Endpoint::Start => self.start_binding = binding,
            Endpoint::End => self.end_binding = binding,
        }
    }

    pub fn has_bindings(&self) -> bool {
        self.start_binding.is_some() || self.end_binding.is_some()
    }

    /// Removes both bindings, returning whether anything was cleared.
    pub fn clear_bindings(&mut self) -> bool {
        let had = self.has_bindings();
        self.start_binding = None;
        self.end_binding = None;
        had
    }

    pub fn endpoint(&self, endpoint: Endpoint) -> Option<Point> {
        match endpoint {
            Endpoint::Start => self.points.first().copied(),
            Endpoint::End => self.points.last().copied(),
        }
    }

    pub fn adjacent(&self, endpoint: Endpoint) -> Option<Point> {
        let n = self.points.len();
        if n < 2 {
            return None;
        }
        match endpoint {
            Endpoint::Start => self.points.get(1).copied(),
            Endpoint::End => self.points.get(n - 2).copied(),
        }
    }
}
