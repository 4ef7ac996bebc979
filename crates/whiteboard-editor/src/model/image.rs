use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageElement {
    pub file_id: String,
    /// Per-axis sign applied when drawing the bitmap; `-1` mirrors that axis.
    pub scale: [f64; 2],
}

impl ImageElement {
    pub fn new(file_id: &str) -> Self {
        Self {
            file_id: file_id.to_string(),
            scale: [1.0, 1.0],
        }
    }

    pub fn is_mirrored_x(&self) -> bool {
        self.scale[0] < 0.0
    }

    pub fn is_mirrored_y(&self) -> bool {
        self.scale[1] < 0.0
    }
}
