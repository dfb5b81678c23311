//! Error types for the comparison engine.
//!
//! Divergences between the two schemas are never errors; they are recorded
//! as [`DiffRecord`](sdelta_types::DiffRecord)s. A [`DiffError`] means the
//! comparison could not be completed and its result must not be read as
//! equivalence.

use std::fmt;

use serde::{Deserialize, Serialize};
use sdelta_model::ModelError;

/// Which of the two compared graphs an element came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Fatal conditions that abort a comparison.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DiffError {
    /// An element outside the closed set of recognised kinds was reached.
    #[error("unsupported element kind: {kind}")]
    UnsupportedElementKind { kind: String },

    /// Two elements on one side of a set comparison derived the same key.
    #[error("duplicate composite key {key} on {side} side")]
    DuplicateCompositeKey { key: String, side: Side },

    /// A schema failed to resolve one of its own element ids.
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// Configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience alias for comparison results.
pub type DiffResult<T> = Result<T, DiffError>;
