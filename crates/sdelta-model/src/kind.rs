//! The closed set of element kinds and the capabilities elements expose.

use std::fmt;

use serde::{Deserialize, Serialize};
use sdelta_types::Location;

/// Tag for every element kind the model recognises.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementKind {
    Action,
    ActionImport,
    ComplexType,
    EntityContainer,
    EntitySet,
    EntityType,
    EnumMember,
    EnumType,
    Function,
    FunctionImport,
    NavigationProperty,
    OperationReturn,
    OptionalParameter,
    Parameter,
    PathType,
    PrimitiveType,
    Singleton,
    StructuralProperty,
    Term,
    TypeDefinition,
    UntypedType,
    Annotation,
    Unrecognized,
}

impl ElementKind {
    /// Kinds that can be the target of a vocabulary annotation, in the
    /// priority order the kind dispatcher checks them.
    pub const ANNOTATABLE: &'static [ElementKind] = &[
        ElementKind::Action,
        ElementKind::ActionImport,
        ElementKind::ComplexType,
        ElementKind::EntityContainer,
        ElementKind::EntitySet,
        ElementKind::EntityType,
        ElementKind::EnumMember,
        ElementKind::EnumType,
        ElementKind::Function,
        ElementKind::FunctionImport,
        ElementKind::NavigationProperty,
        ElementKind::OperationReturn,
        ElementKind::OptionalParameter,
        ElementKind::Parameter,
        ElementKind::PathType,
        ElementKind::PrimitiveType,
        ElementKind::Singleton,
        ElementKind::StructuralProperty,
        ElementKind::Term,
        ElementKind::TypeDefinition,
        ElementKind::UntypedType,
    ];

    /// The closed set of recognized kinds, annotatable kinds first.
    ///
    /// Never contains [`ElementKind::Unrecognized`]: an unrecognized element
    /// is not a kind to compare against but a reason to stop comparing.
    pub const RECOGNIZED: &'static [ElementKind] = &[
        ElementKind::Action,
        ElementKind::ActionImport,
        ElementKind::ComplexType,
        ElementKind::EntityContainer,
        ElementKind::EntitySet,
        ElementKind::EntityType,
        ElementKind::EnumMember,
        ElementKind::EnumType,
        ElementKind::Function,
        ElementKind::FunctionImport,
        ElementKind::NavigationProperty,
        ElementKind::OperationReturn,
        ElementKind::OptionalParameter,
        ElementKind::Parameter,
        ElementKind::PathType,
        ElementKind::PrimitiveType,
        ElementKind::Singleton,
        ElementKind::StructuralProperty,
        ElementKind::Term,
        ElementKind::TypeDefinition,
        ElementKind::UntypedType,
        ElementKind::Annotation,
    ];

    pub fn is_annotatable(self) -> bool {
        Self::ANNOTATABLE.contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Action => "Action",
            Self::ActionImport => "ActionImport",
            Self::ComplexType => "ComplexType",
            Self::EntityContainer => "EntityContainer",
            Self::EntitySet => "EntitySet",
            Self::EntityType => "EntityType",
            Self::EnumMember => "EnumMember",
            Self::EnumType => "EnumType",
            Self::Function => "Function",
            Self::FunctionImport => "FunctionImport",
            Self::NavigationProperty => "NavigationProperty",
            Self::OperationReturn => "OperationReturn",
            Self::OptionalParameter => "OptionalParameter",
            Self::Parameter => "Parameter",
            Self::PathType => "PathType",
            Self::PrimitiveType => "PrimitiveType",
            Self::Singleton => "Singleton",
            Self::StructuralProperty => "StructuralProperty",
            Self::Term => "Term",
            Self::TypeDefinition => "TypeDefinition",
            Self::UntypedType => "UntypedType",
            Self::Annotation => "Annotation",
            Self::Unrecognized => "Unrecognized",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An element with a stable name, aligned by name during comparison.
pub trait Named {
    fn name(&self) -> &str;
}

impl<T: Named + ?Sized> Named for &T {
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// An element that may carry source provenance.
///
/// `None` means the element is not locatable at all; a locatable element
/// without a known position returns `Some(&Location::Unknown)`.
pub trait Locatable {
    fn location(&self) -> Option<&Location>;
}

impl<T: Locatable + ?Sized> Locatable for &T {
    fn location(&self) -> Option<&Location> {
        (**self).location()
    }
}
