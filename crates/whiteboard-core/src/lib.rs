//! # Whiteboard Core
//!
//! Core types, geometry primitives, and error definitions shared by the
//! whiteboard crates. Provides the fundamental abstractions that the editor
//! builds its element model and transform passes on.

pub mod error;
pub mod geometry;
pub mod types;

pub use error::{Error, GeometryError, RepairIssue, Result, SelectionError};
pub use geometry::{Axis, Bounds, Point};
pub use types::{ElementId, Endpoint};
