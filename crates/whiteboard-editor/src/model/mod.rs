use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use whiteboard_core::{ElementId, Endpoint, Point};

mod freedraw;
mod frame;
mod image;
mod linear;
mod text;

pub use freedraw::FreedrawElement;
pub use frame::FrameElement;
pub use image::ImageElement;
pub use linear::{LinearElement, PointBinding};
pub use text::{TextElement, VerticalAlign, BOUND_TEXT_PADDING};

/// Flat tag for an element variant, handy for logging and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    Rectangle,
    Ellipse,
    Diamond,
    Text,
    Image,
    Line,
    Arrow,
    Freedraw,
    Frame,
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementType::Rectangle => "rectangle",
            ElementType::Ellipse => "ellipse",
            ElementType::Diamond => "diamond",
            ElementType::Text => "text",
            ElementType::Image => "image",
            ElementType::Line => "line",
            ElementType::Arrow => "arrow",
            ElementType::Freedraw => "freedraw",
            ElementType::Frame => "frame",
        };
        f.write_str(name)
    }
}

/// Variant-specific data of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementKind {
    Rectangle,
    Ellipse,
    Diamond,
    Text(TextElement),
    Image(ImageElement),
    Line(LinearElement),
    Arrow(LinearElement),
    Freedraw(FreedrawElement),
    Frame(FrameElement),
}

impl ElementKind {
    pub fn element_type(&self) -> ElementType {
        match self {
            ElementKind::Rectangle => ElementType::Rectangle,
            ElementKind::Ellipse => ElementType::Ellipse,
            ElementKind::Diamond => ElementType::Diamond,
            ElementKind::Text(_) => ElementType::Text,
            ElementKind::Image(_) => ElementType::Image,
            ElementKind::Line(_) => ElementType::Line,
            ElementKind::Arrow(_) => ElementType::Arrow,
            ElementKind::Freedraw(_) => ElementType::Freedraw,
            ElementKind::Frame(_) => ElementType::Frame,
        }
    }
}

/// A drawing element on the board.
///
/// `(x, y, width, height)` is the unrotated box; `angle` (radians) rotates it
/// about its centre. Linear and freedraw elements store their points relative
/// to `(x, y)` and keep `width`/`height` equal to the extent of those points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub angle: f64,
    pub is_deleted: bool,
    pub frame_id: Option<ElementId>,
    pub version: u32,
    pub updated: DateTime<Utc>,
}

impl Element {
    /// Creates a new element with a fresh id.
    pub fn new(kind: ElementKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: ElementId::new(),
            kind,
            x,
            y,
            width,
            height,
            angle: 0.0,
            is_deleted: false,
            frame_id: None,
            version: 1,
            updated: Utc::now(),
        }
    }

    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(ElementKind::Rectangle, x, y, width, height)
    }

    pub fn ellipse(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(ElementKind::Ellipse, x, y, width, height)
    }

    pub fn diamond(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(ElementKind::Diamond, x, y, width, height)
    }

    pub fn frame(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(ElementKind::Frame(FrameElement::default()), x, y, width, height)
    }

    pub fn text(x: f64, y: f64, width: f64, height: f64, text: &str) -> Self {
        Self::new(
            ElementKind::Text(TextElement::new(text)),
            x,
            y,
            width,
            height,
        )
    }

    pub fn image(x: f64, y: f64, width: f64, height: f64, file_id: &str) -> Self {
        Self::new(
            ElementKind::Image(ImageElement::new(file_id)),
            x,
            y,
            width,
            height,
        )
    }

    /// Creates a line whose points are given relative to `(x, y)`.
    pub fn line(x: f64, y: f64, points: Vec<Point>) -> Self {
        let mut element = Self::new(ElementKind::Line(LinearElement::new(points)), x, y, 0.0, 0.0);
        element.sync_point_extent();
        element
    }

    /// Creates an arrow whose points are given relative to `(x, y)`.
    pub fn arrow(x: f64, y: f64, points: Vec<Point>) -> Self {
        let mut element =
            Self::new(ElementKind::Arrow(LinearElement::new(points)), x, y, 0.0, 0.0);
        element.sync_point_extent();
        element
    }

    pub fn freedraw(x: f64, y: f64, points: Vec<Point>) -> Self {
        let mut element = Self::new(
            ElementKind::Freedraw(FreedrawElement::new(points)),
            x,
            y,
            0.0,
            0.0,
        );
        element.sync_point_extent();
        element
    }

    pub fn with_id(mut self, id: ElementId) -> Self {
        self.id = id;
        self
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    pub fn in_frame(mut self, frame_id: ElementId) -> Self {
        self.frame_id = Some(frame_id);
        self
    }

    pub fn deleted(mut self) -> Self {
        self.is_deleted = true;
        self
    }

    /// Binds a text element to a container. No effect on other variants.
    pub fn bound_to_container(mut self, container_id: ElementId) -> Self {
        if let ElementKind::Text(text) = &mut self.kind {
            text.container_id = Some(container_id);
        }
        self
    }

    /// Sets an endpoint binding of a linear element. No effect on other variants.
    pub fn with_binding(mut self, endpoint: Endpoint, binding: PointBinding) -> Self {
        if let Some(linear) = self.linear_mut() {
            linear.set_binding(endpoint, Some(binding));
        }
        self
    }

    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    pub fn is_linear(&self) -> bool {
        matches!(self.kind, ElementKind::Line(_) | ElementKind::Arrow(_))
    }

    pub fn is_frame(&self) -> bool {
        matches!(self.kind, ElementKind::Frame(_))
    }

    /// Whether linear endpoints may attach to this element.
    pub fn is_bindable(&self) -> bool {
        match &self.kind {
            ElementKind::Rectangle
            | ElementKind::Ellipse
            | ElementKind::Diamond
            | ElementKind::Image(_) => true,
            ElementKind::Text(text) => text.container_id.is_none(),
            ElementKind::Line(_)
            | ElementKind::Arrow(_)
            | ElementKind::Freedraw(_)
            | ElementKind::Frame(_) => false,
        }
    }

    /// Container of a bound text label.
    pub fn container_id(&self) -> Option<ElementId> {
        match &self.kind {
            ElementKind::Text(text) => text.container_id,
            _ => None,
        }
    }

    pub fn linear(&self) -> Option<&LinearElement> {
        match &self.kind {
            ElementKind::Line(linear) | ElementKind::Arrow(linear) => Some(linear),
            _ => None,
        }
    }

    pub fn linear_mut(&mut self) -> Option<&mut LinearElement> {
        match &mut self.kind {
            ElementKind::Line(linear) | ElementKind::Arrow(linear) => Some(linear),
            _ => None,
        }
    }

    /// Relative points of linear and freedraw elements.
    pub fn points(&self) -> Option<&[Point]> {
        match &self.kind {
            ElementKind::Line(linear) | ElementKind::Arrow(linear) => Some(&linear.points),
            ElementKind::Freedraw(freedraw) => Some(&freedraw.points),
            _ => None,
        }
    }

    pub fn points_mut(&mut self) -> Option<&mut Vec<Point>> {
        match &mut self.kind {
            ElementKind::Line(linear) | ElementKind::Arrow(linear) => Some(&mut linear.points),
            ElementKind::Freedraw(freedraw) => Some(&mut freedraw.points),
            _ => None,
        }
    }

    /// Offset of the rotation centre from `(x, y)`.
    pub fn local_center(&self) -> Point {
        match self.points().and_then(|pts| whiteboard_core::Bounds::from_points(pts)) {
            Some(b) => b.center(),
            None if self.points().is_some() => Point::ORIGIN,
            None => Point::new(self.width / 2.0, self.height / 2.0),
        }
    }

    /// Rotation centre in scene coordinates.
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y) + self.local_center()
    }

    /// Scene coordinates of every point of a linear or freedraw element,
    /// rotation applied.
    pub fn absolute_points(&self) -> Option<Vec<Point>> {
        let center = self.center();
        let origin = Point::new(self.x, self.y);
        self.points().map(|pts| {
            pts.iter()
                .map(|p| (origin + *p).rotate_about(center, self.angle))
                .collect()
        })
    }

    /// Scene coordinates of a linear endpoint.
    pub fn endpoint_position(&self, endpoint: Endpoint) -> Option<Point> {
        let linear = self.linear()?;
        let local = linear.endpoint(endpoint)?;
        Some((Point::new(self.x, self.y) + local).rotate_about(self.center(), self.angle))
    }

    /// Scene coordinates of the point next to an endpoint (the direction the
    /// line arrives from).
    pub fn adjacent_position(&self, endpoint: Endpoint) -> Option<Point> {
        let linear = self.linear()?;
        let local = linear.adjacent(endpoint)?;
        Some((Point::new(self.x, self.y) + local).rotate_about(self.center(), self.angle))
    }

    /// Moves a linear endpoint to `position` in scene coordinates. The other
    /// points stay where they are on screen and the angle is unchanged.
    ///
    /// Returns `false` for non-linear elements.
    pub fn move_endpoint(&mut self, endpoint: Endpoint, position: Point) -> bool {
        if !self.is_linear() {
            return false;
        }
        let Some(mut absolute) = self.absolute_points() else {
            return false;
        };
        let at = match endpoint {
            Endpoint::Start => 0,
            Endpoint::End => absolute.len().saturating_sub(1),
        };
        let Some(slot) = absolute.get_mut(at) else {
            return false;
        };
        *slot = position;

        // Unrotated frame whose box centre, rotated back, is the new centre.
        let unrotated: Vec<Point> = absolute
            .iter()
            .map(|p| p.rotate_about(Point::ORIGIN, -self.angle))
            .collect();
        let Some(bounds) = whiteboard_core::Bounds::from_points(&unrotated) else {
            return false;
        };
        let mid = bounds.center();
        let shift = mid.rotate_about(Point::ORIGIN, self.angle) - mid;
        let origin = unrotated[0] + shift;

        if let Some(points) = self.points_mut() {
            *points = unrotated.iter().map(|p| *p + shift - origin).collect();
        }
        self.x = origin.x;
        self.y = origin.y;
        self.sync_point_extent();
        true
    }

    /// Keeps `width`/`height` equal to the extent of the points.
    pub fn sync_point_extent(&mut self) {
        let extent = self
            .points()
            .and_then(|pts| whiteboard_core::Bounds::from_points(pts))
            .map(|b| (b.width(), b.height()));
        if let Some((width, height)) = extent {
            self.width = width;
            self.height = height;
        }
    }

    /// Marks the element as mutated.
    pub fn bump_version(&mut self) {
        self.version = self.version.wrapping_add(1);
        self.updated = Utc::now();
    }
}
