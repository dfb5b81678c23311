//! Element shapes and the [`Element`] sum type.
//!
//! Each struct's `Display` is its display form: the identifier used for
//! annotation targets and diagnostics (`Org.Person`, `Org.Person/Name`, ...).

use std::fmt;

use sdelta_types::Location;

use crate::kind::{ElementKind, Locatable, Named};
use crate::schema::ElementId;
use crate::value::{OnDeleteAction, PathKind, PrimitiveKind, TypeRef, Value};

/// Entity or complex type.
#[derive(Clone, Debug, PartialEq)]
pub struct StructuredType {
    pub namespace: String,
    pub name: String,
    pub base_type: Option<ElementId>,
    pub is_abstract: bool,
    pub is_open: bool,
    /// Entity types only.
    pub has_stream: bool,
    /// Key properties, in declaration order. Empty for complex types.
    pub key: Vec<ElementId>,
    /// Declared structural and navigation properties.
    pub properties: Vec<ElementId>,
    pub location: Location,
}

impl StructuredType {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            base_type: None,
            is_abstract: false,
            is_open: false,
            has_stream: false,
            key: Vec::new(),
            properties: Vec::new(),
            location: Location::Unknown,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }
}

impl fmt::Display for StructuredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StructuralProperty {
    /// Full name of the declaring type.
    pub declaring_type: String,
    pub name: String,
    pub type_ref: TypeRef,
    pub default_value: Option<String>,
    pub location: Location,
}

impl StructuralProperty {
    pub fn new(declaring_type: impl Into<String>, name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            name: name.into(),
            type_ref,
            default_value: None,
            location: Location::Unknown,
        }
    }
}

impl fmt::Display for StructuralProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.declaring_type, self.name)
    }
}

/// One dependent/principal property pair of a referential constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConstraintPair {
    pub dependent: ElementId,
    pub principal: ElementId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NavigationProperty {
    pub declaring_type: String,
    pub name: String,
    /// Target entity type, possibly a collection.
    pub target: TypeRef,
    pub contains_target: bool,
    pub partner: Option<ElementId>,
    pub on_delete: OnDeleteAction,
    pub referential_constraint: Vec<ConstraintPair>,
    pub location: Location,
}

impl NavigationProperty {
    pub fn new(declaring_type: impl Into<String>, name: impl Into<String>, target: TypeRef) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            name: name.into(),
            target,
            contains_target: false,
            partner: None,
            on_delete: OnDeleteAction::None,
            referential_constraint: Vec::new(),
            location: Location::Unknown,
        }
    }
}

impl fmt::Display for NavigationProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.declaring_type, self.name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumType {
    pub namespace: String,
    pub name: String,
    pub underlying_type: PrimitiveKind,
    pub is_flags: bool,
    pub members: Vec<ElementId>,
    pub location: Location,
}

impl EnumType {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            underlying_type: PrimitiveKind::Int32,
            is_flags: false,
            members: Vec::new(),
            location: Location::Unknown,
        }
    }
}

impl fmt::Display for EnumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumMember {
    pub enum_type: String,
    pub name: String,
    pub value: i64,
    pub location: Location,
}

impl EnumMember {
    pub fn new(enum_type: impl Into<String>, name: impl Into<String>, value: i64) -> Self {
        Self {
            enum_type: enum_type.into(),
            name: name.into(),
            value,
            location: Location::Unknown,
        }
    }
}

impl fmt::Display for EnumMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.enum_type, self.name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeDefinition {
    pub namespace: String,
    pub name: String,
    pub underlying_type: PrimitiveKind,
    pub location: Location,
}

impl fmt::Display for TypeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

/// A built-in primitive type. Not locatable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrimitiveType {
    pub kind: PrimitiveKind,
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edm.{}", self.kind)
    }
}

/// A built-in path type. Not locatable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathType {
    pub kind: PathKind,
}

impl fmt::Display for PathType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edm.{}", self.kind)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Term {
    pub namespace: String,
    pub name: String,
    pub type_ref: TypeRef,
    pub applies_to: Vec<String>,
    pub default_value: Option<String>,
    pub location: Location,
}

impl Term {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            type_ref,
            applies_to: Vec::new(),
            default_value: None,
            location: Location::Unknown,
        }
    }

    /// Qualified name, e.g. `Core.Description`.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

/// Action or function.
#[derive(Clone, Debug, PartialEq)]
pub struct Operation {
    pub namespace: String,
    pub name: String,
    pub is_bound: bool,
    /// Functions only.
    pub is_composable: bool,
    pub entity_set_path: Option<String>,
    /// Parameters in positional order.
    pub parameters: Vec<ElementId>,
    pub return_type: Option<ElementId>,
    pub location: Location,
}

impl Operation {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            is_bound: false,
            is_composable: false,
            entity_set_path: None,
            parameters: Vec::new(),
            return_type: None,
            location: Location::Unknown,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

/// Required or optional operation parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub operation: String,
    pub name: String,
    pub type_ref: TypeRef,
    /// Optional parameters only.
    pub default_value: Option<String>,
    pub location: Location,
}

impl Parameter {
    pub fn new(operation: impl Into<String>, name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            operation: operation.into(),
            name: name.into(),
            type_ref,
            default_value: None,
            location: Location::Unknown,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.operation, self.name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OperationReturn {
    pub operation: String,
    pub type_ref: TypeRef,
    pub location: Location,
}

impl fmt::Display for OperationReturn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/$ReturnType", self.operation)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EntityContainer {
    pub namespace: String,
    pub name: String,
    /// Entity sets, singletons and operation imports.
    pub elements: Vec<ElementId>,
    pub location: Location,
}

impl EntityContainer {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            elements: Vec::new(),
            location: Location::Unknown,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }
}

impl fmt::Display for EntityContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

/// Binding of a navigation path to a target navigation source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationBinding {
    pub path: String,
    pub target: String,
}

/// Entity set or singleton.
#[derive(Clone, Debug, PartialEq)]
pub struct NavigationSource {
    pub container: String,
    pub name: String,
    pub entity_type: ElementId,
    pub include_in_service_document: bool,
    pub bindings: Vec<NavigationBinding>,
    pub location: Location,
}

impl NavigationSource {
    pub fn new(container: impl Into<String>, name: impl Into<String>, entity_type: ElementId) -> Self {
        Self {
            container: container.into(),
            name: name.into(),
            entity_type,
            include_in_service_document: true,
            bindings: Vec::new(),
            location: Location::Unknown,
        }
    }
}

impl fmt::Display for NavigationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.container, self.name)
    }
}

/// Action import or function import.
#[derive(Clone, Debug, PartialEq)]
pub struct OperationImport {
    pub container: String,
    pub name: String,
    pub operation: ElementId,
    pub entity_set: Option<String>,
    pub include_in_service_document: bool,
    pub location: Location,
}

impl OperationImport {
    pub fn new(container: impl Into<String>, name: impl Into<String>, operation: ElementId) -> Self {
        Self {
            container: container.into(),
            name: name.into(),
            operation,
            entity_set: None,
            include_in_service_document: false,
            location: Location::Unknown,
        }
    }
}

impl fmt::Display for OperationImport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.container, self.name)
    }
}

/// A vocabulary annotation: a term applied to a target with a value.
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    pub term: ElementId,
    pub target: ElementId,
    pub qualifier: Option<String>,
    pub value: Value,
    pub location: Location,
}

impl Annotation {
    pub fn new(term: ElementId, target: ElementId, value: Value) -> Self {
        Self {
            term,
            target,
            qualifier: None,
            value,
            location: Location::Unknown,
        }
    }
}

/// An element that reached the model without being classified, e.g. an
/// extension element from a vocabulary the reader does not understand.
#[derive(Clone, Debug, PartialEq)]
pub struct Unrecognized {
    pub tag: String,
    pub name: String,
    pub location: Location,
}

/// One schema element.
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Action(Operation),
    ActionImport(OperationImport),
    ComplexType(StructuredType),
    EntityContainer(EntityContainer),
    EntitySet(NavigationSource),
    EntityType(StructuredType),
    EnumMember(EnumMember),
    EnumType(EnumType),
    Function(Operation),
    FunctionImport(OperationImport),
    NavigationProperty(NavigationProperty),
    OperationReturn(OperationReturn),
    OptionalParameter(Parameter),
    Parameter(Parameter),
    PathType(PathType),
    PrimitiveType(PrimitiveType),
    Singleton(NavigationSource),
    StructuralProperty(StructuralProperty),
    Term(Term),
    TypeDefinition(TypeDefinition),
    UntypedType,
    Annotation(Annotation),
    Unrecognized(Unrecognized),
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Action(_) => ElementKind::Action,
            Self::ActionImport(_) => ElementKind::ActionImport,
            Self::ComplexType(_) => ElementKind::ComplexType,
            Self::EntityContainer(_) => ElementKind::EntityContainer,
            Self::EntitySet(_) => ElementKind::EntitySet,
            Self::EntityType(_) => ElementKind::EntityType,
            Self::EnumMember(_) => ElementKind::EnumMember,
            Self::EnumType(_) => ElementKind::EnumType,
            Self::Function(_) => ElementKind::Function,
            Self::FunctionImport(_) => ElementKind::FunctionImport,
            Self::NavigationProperty(_) => ElementKind::NavigationProperty,
            Self::OperationReturn(_) => ElementKind::OperationReturn,
            Self::OptionalParameter(_) => ElementKind::OptionalParameter,
            Self::Parameter(_) => ElementKind::Parameter,
            Self::PathType(_) => ElementKind::PathType,
            Self::PrimitiveType(_) => ElementKind::PrimitiveType,
            Self::Singleton(_) => ElementKind::Singleton,
            Self::StructuralProperty(_) => ElementKind::StructuralProperty,
            Self::Term(_) => ElementKind::Term,
            Self::TypeDefinition(_) => ElementKind::TypeDefinition,
            Self::UntypedType => ElementKind::UntypedType,
            Self::Annotation(_) => ElementKind::Annotation,
            Self::Unrecognized(_) => ElementKind::Unrecognized,
        }
    }

    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::PrimitiveType(PrimitiveType { kind })
    }
}

impl Named for Element {
    /// Operation returns and annotations are unnamed and report `""`.
    fn name(&self) -> &str {
        match self {
            Self::Action(o) | Self::Function(o) => &o.name,
            Self::ActionImport(i) | Self::FunctionImport(i) => &i.name,
            Self::ComplexType(t) | Self::EntityType(t) => &t.name,
            Self::EntityContainer(c) => &c.name,
            Self::EntitySet(s) | Self::Singleton(s) => &s.name,
            Self::EnumMember(m) => &m.name,
            Self::EnumType(e) => &e.name,
            Self::NavigationProperty(n) => &n.name,
            Self::OptionalParameter(p) | Self::Parameter(p) => &p.name,
            Self::StructuralProperty(p) => &p.name,
            Self::Term(t) => &t.name,
            Self::TypeDefinition(t) => &t.name,
            Self::PathType(p) => match p.kind {
                PathKind::AnnotationPath => "AnnotationPath",
                PathKind::PropertyPath => "PropertyPath",
                PathKind::NavigationPropertyPath => "NavigationPropertyPath",
            },
            Self::PrimitiveType(_) => "Primitive",
            Self::UntypedType => "Untyped",
            Self::Unrecognized(u) => &u.name,
            Self::OperationReturn(_) | Self::Annotation(_) => "",
        }
    }
}

impl Locatable for Element {
    fn location(&self) -> Option<&Location> {
        match self {
            Self::Action(o) | Self::Function(o) => Some(&o.location),
            Self::ActionImport(i) | Self::FunctionImport(i) => Some(&i.location),
            Self::ComplexType(t) | Self::EntityType(t) => Some(&t.location),
            Self::EntityContainer(c) => Some(&c.location),
            Self::EntitySet(s) | Self::Singleton(s) => Some(&s.location),
            Self::EnumMember(m) => Some(&m.location),
            Self::EnumType(e) => Some(&e.location),
            Self::NavigationProperty(n) => Some(&n.location),
            Self::OperationReturn(r) => Some(&r.location),
            Self::OptionalParameter(p) | Self::Parameter(p) => Some(&p.location),
            Self::StructuralProperty(p) => Some(&p.location),
            Self::Term(t) => Some(&t.location),
            Self::TypeDefinition(t) => Some(&t.location),
            Self::Annotation(a) => Some(&a.location),
            Self::Unrecognized(u) => Some(&u.location),
            Self::PathType(_) | Self::PrimitiveType(_) | Self::UntypedType => None,
        }
    }
}
