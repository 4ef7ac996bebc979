use serde::{Deserialize, Serialize};

use whiteboard_core::Point;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FreedrawElement {
    /// Stroke samples relative to the element origin.
    pub points: Vec<Point>,
    /// Pen pressure per sample; empty when the input device had none.
    pub pressures: Vec<f32>,
}

impl FreedrawElement {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            pressures: Vec::new(),
        }
    }
}
