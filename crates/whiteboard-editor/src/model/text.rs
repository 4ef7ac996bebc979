use serde::{Deserialize, Serialize};

use whiteboard_core::ElementId;

/// Distance kept between a bound label and its container's edge.
pub const BOUND_TEXT_PADDING: f64 = 5.0;

const DEFAULT_FONT_SIZE: f64 = 20.0;

/// Vertical placement of a bound label inside its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    pub text: String,
    pub font_size: f64,
    /// Set when the text is a label bound to a shape or arrow.
    pub container_id: Option<ElementId>,
    pub vertical_align: VerticalAlign,
}

impl TextElement {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            container_id: None,
            vertical_align: VerticalAlign::default(),
        }
    }
}
