//! Foundation types for Schema Delta.
//!
//! Every divergence found while comparing two schema graphs is described by
//! the types in this crate.
//!
//! # Key Types
//!
//! - [`PropertyPath`] -- Immutable, prefix-sharing path of property segments
//! - [`Location`] / [`LocationPair`] -- Source provenance on the left and right side
//! - [`DiffRecord`] -- One recorded divergence

pub mod location;
pub mod path;
pub mod record;

pub use location::{Location, LocationPair};
pub use path::PropertyPath;
pub use record::DiffRecord;
