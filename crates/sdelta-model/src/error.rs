//! Error types for the schema model.

use crate::kind::ElementKind;
use crate::schema::ElementId;

/// Errors produced when resolving elements in a [`Schema`](crate::Schema).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ModelError {
    /// An id does not address any element of the schema.
    #[error("unknown element: {0:?}")]
    UnknownElement(ElementId),

    /// An id addresses an element of a different kind than required.
    #[error("element {id:?} is a {actual}, expected {expected}")]
    WrongKind {
        id: ElementId,
        expected: ElementKind,
        actual: ElementKind,
    },

    /// The arena already holds as many elements as an id can address.
    #[error("schema is full: {0} elements")]
    CapacityExceeded(usize),
}

/// Convenience alias for model results.
pub type ModelResult<T> = Result<T, ModelError>;
