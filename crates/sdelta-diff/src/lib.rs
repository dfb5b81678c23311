//! Structural equivalence engine for Schema Delta.
//!
//! Two schema graphs are walked side by side. Ordered sequences are zipped,
//! named sequences are joined by name, and unordered annotation sets are
//! joined by a composite key. Every divergence is recorded with the property
//! path where it occurred and the source locations of the enclosing elements
//! on both sides. Cyclic references terminate through a visited-pair guard.
//!
//! # Quick Start
//!
//! ```rust
//! use sdelta_diff::{compare, CompareConfig};
//! use sdelta_model::{Element, Schema, StructuredType};
//!
//! let mut left = Schema::new("Org");
//! left.add_root(Element::EntityType(StructuredType::new("Org", "Person"))).unwrap();
//!
//! let mut right = left.clone();
//! right.add_root(Element::EntityType(StructuredType::new("Org", "Company"))).unwrap();
//!
//! let delta = compare(&left, &right, &CompareConfig::default()).unwrap();
//! assert_eq!(delta.len(), 1);
//! assert_eq!(
//!     delta.records()[0].message,
//!     "missing item with name Company on left"
//! );
//! ```
//!
//! # Key Types
//!
//! - [`DeltaContext`] -- Divergence sink, location stack, and cycle guard for one comparison
//! - [`LocationScope`] -- Guard that keeps the location stack balanced
//! - [`Scalar`] -- Terminal values with kind-appropriate equality
//! - [`CompositeKey`] -- Identity of an annotation inside an unordered set
//! - [`Delta`] -- Result of a completed comparison

pub mod align;
pub mod config;
pub mod context;
pub mod error;
pub mod kind;
pub mod scalar;
pub mod scope;
pub mod sink;
pub mod walk;

// Re-exports for convenience.
pub use align::CompositeKey;
pub use config::CompareConfig;
pub use context::{CycleGuard, DeltaContext};
pub use error::{DiffError, DiffResult, Side};
pub use kind::display_path_of;
pub use scalar::Scalar;
pub use scope::LocationScope;
pub use sink::DiffSink;
pub use walk::{compare, Delta};
