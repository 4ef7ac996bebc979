//! Error handling for the whiteboard crates
//!
//! Provides the error types for every layer of the editing core:
//! - Geometry errors (empty or degenerate input to box computations)
//! - Selection errors (operations that need a selection)
//! - Repair issues (relations found dangling and cleared during repair)
//!
//! Repair issues are diagnostics rather than failures: the repair passes
//! resolve them in place and report them, they are never returned as `Err`
//! from a user action.
//!
//! All error types use `thiserror` for ergonomic error handling.

use crate::geometry::Axis;
use crate::types::{ElementId, Endpoint};
use thiserror::Error;

/// Geometry error type
///
/// Raised by bounding-box and scale computations on unusable input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// No elements were supplied to a computation that needs at least one
    #[error("Cannot compute bounds of an empty element set")]
    EmptyInput,

    /// The box has zero extent on an axis, so a scale factor is undefined
    #[error("Degenerate bounds: zero extent on the {axis} axis")]
    DegenerateAxis {
        /// The axis with zero extent.
        axis: Axis,
    },
}

/// Selection error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// Nothing is selected
    #[error("No elements selected")]
    EmptySelection,
}

/// Relation problems found and resolved by the repair passes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepairIssue {
    /// A linear endpoint was bound to an element that no longer exists or is
    /// deleted
    #[error("Binding of {element} at {endpoint} to {target} has no valid target")]
    MissingBindingTarget {
        /// The linear element owning the binding.
        element: ElementId,
        /// Which endpoint was bound.
        endpoint: Endpoint,
        /// The element the binding referenced.
        target: ElementId,
    },

    /// An element references a frame that is missing or deleted
    #[error("Element {element} references frame {frame} which no longer exists")]
    OrphanedFrameReference {
        /// The element with the stale reference.
        element: ElementId,
        /// The referenced frame.
        frame: ElementId,
    },
}

/// Main error type for the whiteboard crates
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Selection error
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Repair issue escalated to an error
    #[error(transparent)]
    Repair(#[from] RepairIssue),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }

    /// Check if this error only means "nothing to do"
    pub fn is_empty_selection(&self) -> bool {
        matches!(self, Error::Selection(SelectionError::EmptySelection))
            || matches!(self, Error::Geometry(GeometryError::EmptyInput))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
