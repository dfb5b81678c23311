//! Schema element model for Schema Delta.
//!
//! A [`Schema`] is an arena of [`Element`]s addressed by [`ElementId`].
//! Elements refer to each other by id, so a schema may be a cyclic graph
//! (an entity type navigating to itself, partner navigations, and so on).
//!
//! # Key Types
//!
//! - [`Schema`] -- Element arena with top-level elements and vocabulary annotations
//! - [`Element`] -- Sum type with one case per recognised element kind
//! - [`ElementKind`] -- Closed set of kind tags used for dispatch
//! - [`Named`] / [`Locatable`] -- Capabilities the comparison engine consumes
//! - [`Value`] -- Annotation expression values

pub mod element;
pub mod error;
pub mod kind;
pub mod schema;
pub mod value;

pub use element::{
    Annotation, ConstraintPair, Element, EntityContainer, EnumMember, EnumType, NavigationBinding,
    NavigationProperty, NavigationSource, Operation, OperationImport, OperationReturn, Parameter,
    PathType, PrimitiveType, StructuralProperty, StructuredType, Term, TypeDefinition,
    Unrecognized,
};
pub use error::{ModelError, ModelResult};
pub use kind::{ElementKind, Locatable, Named};
pub use schema::{ElementId, Schema};
pub use value::{OnDeleteAction, PathKind, PrimitiveKind, PropertyValue, TypeRef, Value};
