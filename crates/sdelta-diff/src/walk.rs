//! Field-by-field comparison of two [`Schema`]s.
//!
//! The walk is the per-kind visitor layer: it pairs up corresponding
//! elements, opens a location scope for each pair, and compares every field
//! with the engine's scalar comparers and aligners. References between
//! elements go through the cycle guard, so cyclic schemas terminate.

use sdelta_model::{
    Annotation, Element, ElementId, ElementKind, EntityContainer, EnumMember, EnumType, Locatable,
    Named, NavigationProperty, NavigationSource, Operation, OperationImport, OperationReturn,
    Parameter, PropertyValue, Schema, StructuralProperty, StructuredType, Term, TypeDefinition,
    TypeRef, Value,
};
use sdelta_types::{DiffRecord, Location, PropertyPath};
use tracing::{debug, info};

use crate::align::CompositeKey;
use crate::config::CompareConfig;
use crate::context::DeltaContext;
use crate::error::{DiffError, DiffResult};
use crate::kind::display_path_of;

/// The outcome of a completed comparison.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Delta {
    records: Vec<DiffRecord>,
}

impl Delta {
    /// Divergences in detection order.
    pub fn records(&self) -> &[DiffRecord] {
        &self.records
    }

    /// Returns `true` if no divergence was found.
    pub fn is_equivalent(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<DiffRecord> {
        self.records
    }
}

/// Compare two schemas.
///
/// Returns `Err` if the comparison hit a fatal condition; in that case no
/// partial result is returned, so an aborted comparison can never be
/// mistaken for equivalence.
pub fn compare(left: &Schema, right: &Schema, config: &CompareConfig) -> DiffResult<Delta> {
    debug!(
        left = left.namespace(),
        right = right.namespace(),
        "comparing schemas"
    );
    let mut cx = DeltaContext::new(config.clone());
    let root = PropertyPath::root();
    if !cx.is_reference_check_complete(Some(left), Some(right), &root) {
        Walk { left, right }.visit_schema(&mut cx, &root)?;
    }
    let records = cx.finish();
    info!(divergences = records.len(), "schema comparison complete");
    Ok(Delta { records })
}

/// An element together with its id and owning schema.
#[derive(Clone, Copy)]
struct Node<'s> {
    schema: &'s Schema,
    id: ElementId,
    element: &'s Element,
}

impl Named for Node<'_> {
    fn name(&self) -> &str {
        self.element.name()
    }
}

impl Locatable for Node<'_> {
    fn location(&self) -> Option<&Location> {
        self.element.location()
    }
}

fn node(schema: &Schema, id: ElementId) -> DiffResult<Node<'_>> {
    Ok(Node {
        schema,
        id,
        element: schema.element(id)?,
    })
}

fn nodes<'s>(schema: &'s Schema, ids: &[ElementId]) -> DiffResult<Vec<Node<'s>>> {
    ids.iter().map(|id| node(schema, *id)).collect()
}

fn annotation_key(n: &Node<'_>) -> DiffResult<CompositeKey> {
    let annotation = n.schema.annotation(n.id)?;
    let term = n.schema.term(annotation.term)?;
    let target = display_path_of(n.schema.element(annotation.target)?)?;
    Ok(CompositeKey::new(term.full_name(), target).with_qualifier(annotation.qualifier.clone()))
}

/// Reaching an unrecognized element on either side aborts the comparison.
fn reject_unrecognized(a: Node<'_>, b: Node<'_>) -> DiffResult<()> {
    for n in [a, b] {
        if let Element::Unrecognized(u) = n.element {
            return Err(DiffError::UnsupportedElementKind { kind: u.tag.clone() });
        }
    }
    Ok(())
}

#[derive(Clone, Copy)]
struct Walk<'s> {
    left: &'s Schema,
    right: &'s Schema,
}

impl<'s> Walk<'s> {
    fn pair_all(self, a: &[ElementId], b: &[ElementId]) -> DiffResult<(Vec<Node<'s>>, Vec<Node<'s>>)> {
        Ok((nodes(self.left, a)?, nodes(self.right, b)?))
    }

    fn visit_schema(self, cx: &mut DeltaContext, path: &PropertyPath) -> DiffResult<()> {
        cx.visit_scalar(self.left.namespace(), self.right.namespace(), &(path + "Namespace"));

        let (a, b) = self.pair_all(self.left.roots(), self.right.roots())?;
        cx.visit_named_seq(
            &a,
            &b,
            move |cx, x, y, p| self.visit_element(cx, *x, *y, p),
            path,
            "Elements",
        )?;

        let (a, b) = self.pair_all(self.left.annotations(), self.right.annotations())?;
        cx.visit_set(
            &a,
            &b,
            annotation_key,
            move |cx, x, y, p| self.visit_element(cx, *x, *y, p),
            &(path + "Annotations"),
        )
    }

    fn visit_element(
        self,
        cx: &mut DeltaContext,
        a: Node<'s>,
        b: Node<'s>,
        path: &PropertyPath,
    ) -> DiffResult<()> {
        reject_unrecognized(a, b)?;
        if !cx.enter(a.id, b.id) {
            return Ok(());
        }
        let mut cx = cx.push_location(&a, &b);
        if !cx.check_type_equality(a.element, b.element, ElementKind::RECOGNIZED, path) {
            return Ok(());
        }

        match (a.element, b.element) {
            (Element::Action(x), Element::Action(y))
            | (Element::Function(x), Element::Function(y)) => self.visit_operation(&mut cx, x, y, path),
            (Element::ActionImport(x), Element::ActionImport(y))
            | (Element::FunctionImport(x), Element::FunctionImport(y)) => {
                self.visit_operation_import(&mut cx, x, y, path)
            }
            (Element::ComplexType(x), Element::ComplexType(y))
            | (Element::EntityType(x), Element::EntityType(y)) => self.visit_structured(&mut cx, x, y, path),
            (Element::EntityContainer(x), Element::EntityContainer(y)) => {
                self.visit_container(&mut cx, x, y, path)
            }
            (Element::EntitySet(x), Element::EntitySet(y))
            | (Element::Singleton(x), Element::Singleton(y)) => {
                self.visit_navigation_source(&mut cx, x, y, path)
            }
            (Element::EnumMember(x), Element::EnumMember(y)) => {
                visit_enum_member(&mut cx, x, y, path);
                Ok(())
            }
            (Element::EnumType(x), Element::EnumType(y)) => self.visit_enum_type(&mut cx, x, y, path),
            (Element::NavigationProperty(x), Element::NavigationProperty(y)) => {
                self.visit_navigation(&mut cx, x, y, path)
            }
            (Element::OperationReturn(x), Element::OperationReturn(y)) => {
                self.visit_return(&mut cx, x, y, path)
            }
            (Element::OptionalParameter(x), Element::OptionalParameter(y))
            | (Element::Parameter(x), Element::Parameter(y)) => self.visit_parameter(&mut cx, x, y, path),
            (Element::PathType(x), Element::PathType(y)) => {
                cx.visit_scalar(&x.kind, &y.kind, &(path + "Kind"));
                Ok(())
            }
            (Element::PrimitiveType(x), Element::PrimitiveType(y)) => {
                cx.visit_scalar(&x.kind, &y.kind, &(path + "Kind"));
                Ok(())
            }
            (Element::StructuralProperty(x), Element::StructuralProperty(y)) => {
                self.visit_structural_property(&mut cx, x, y, path)
            }
            (Element::Term(x), Element::Term(y)) => self.visit_term(&mut cx, x, y, path),
            (Element::TypeDefinition(x), Element::TypeDefinition(y)) => {
                visit_type_definition(&mut cx, x, y, path);
                Ok(())
            }
            (Element::UntypedType, Element::UntypedType) => Ok(()),
            (Element::Annotation(x), Element::Annotation(y)) => visit_annotation(&mut cx, x, y, path),
            // Kinds were checked equal above.
            _ => Ok(()),
        }
    }

    /// A reference to another element: followed through the cycle guard, or
    /// compared by display path when references are not followed.
    fn visit_ref(
        self,
        cx: &mut DeltaContext,
        a: Option<ElementId>,
        b: Option<ElementId>,
        path: &PropertyPath,
    ) -> DiffResult<()> {
        let a = a.map(|id| node(self.left, id)).transpose()?;
        let b = b.map(|id| node(self.right, id)).transpose()?;
        if cx.is_reference_check_complete(a.map(|n| n.element), b.map(|n| n.element), path) {
            return Ok(());
        }
        let (Some(a), Some(b)) = (a, b) else {
            return Ok(());
        };
        if cx.config().follow_references {
            return self.visit_element(cx, a, b, path);
        }
        reject_unrecognized(a, b)?;
        if cx.check_type_equality(a.element, b.element, ElementKind::RECOGNIZED, path) {
            cx.visit_scalar(&display_path_of(a.element)?, &display_path_of(b.element)?, path);
        }
        Ok(())
    }

    /// An owned, optional child element, always compared structurally.
    fn visit_child(
        self,
        cx: &mut DeltaContext,
        a: Option<ElementId>,
        b: Option<ElementId>,
        path: &PropertyPath,
    ) -> DiffResult<()> {
        let a = a.map(|id| node(self.left, id)).transpose()?;
        let b = b.map(|id| node(self.right, id)).transpose()?;
        if cx.is_reference_check_complete(a.map(|n| n.element), b.map(|n| n.element), path) {
            return Ok(());
        }
        match (a, b) {
            (Some(a), Some(b)) => self.visit_element(cx, a, b, path),
            _ => Ok(()),
        }
    }

    fn visit_type_ref(self, cx: &mut DeltaContext, a: &TypeRef, b: &TypeRef, path: &PropertyPath) -> DiffResult<()> {
        self.visit_ref(cx, Some(a.definition), Some(b.definition), &(path + "Definition"))?;
        cx.visit_scalar(&a.is_collection, &b.is_collection, &(path + "IsCollection"));
        cx.visit_scalar(&a.nullable, &b.nullable, &(path + "Nullable"));
        cx.visit_scalar(&a.max_length, &b.max_length, &(path + "MaxLength"));
        cx.visit_scalar(&a.unicode, &b.unicode, &(path + "Unicode"));
        cx.visit_scalar(&a.precision, &b.precision, &(path + "Precision"));
        cx.visit_scalar(&a.scale, &b.scale, &(path + "Scale"));
        cx.visit_scalar(&a.srid, &b.srid, &(path + "SRID"));
        Ok(())
    }

    fn visit_structured(
        self,
        cx: &mut DeltaContext,
        a: &StructuredType,
        b: &StructuredType,
        path: &PropertyPath,
    ) -> DiffResult<()> {
        cx.visit_scalar(&a.namespace, &b.namespace, &(path + "Namespace"));
        cx.visit_scalar(&a.name, &b.name, &(path + "Name"));
        self.visit_ref(cx, a.base_type, b.base_type, &(path + "BaseType"))?;
        cx.visit_scalar(&a.is_abstract, &b.is_abstract, &(path + "IsAbstract"));
        cx.visit_scalar(&a.is_open, &b.is_open, &(path + "IsOpen"));
        cx.visit_scalar(&a.has_stream, &b.has_stream, &(path + "HasStream"));
        cx.visit_seq(
            &a.key,
            &b.key,
            move |cx, x, y, p| self.visit_ref(cx, Some(*x), Some(*y), p),
            &(path + "Key"),
        )?;

        let (xs, ys) = self.pair_all(&a.properties, &b.properties)?;
        cx.visit_named_seq(
            &xs,
            &ys,
            move |cx, x, y, p| self.visit_element(cx, *x, *y, p),
            path,
            "Properties",
        )
    }

    fn visit_structural_property(
        self,
        cx: &mut DeltaContext,
        a: &StructuralProperty,
        b: &StructuralProperty,
        path: &PropertyPath,
    ) -> DiffResult<()> {
        cx.visit_scalar(&a.name, &b.name, &(path + "Name"));
        self.visit_type_ref(cx, &a.type_ref, &b.type_ref, &(path + "Type"))?;
        visit_optional_text(cx, a.default_value.as_deref(), b.default_value.as_deref(), &(path + "DefaultValue"));
        Ok(())
    }

    fn visit_navigation(
        self,
        cx: &mut DeltaContext,
        a: &NavigationProperty,
        b: &NavigationProperty,
        path: &PropertyPath,
    ) -> DiffResult<()> {
        cx.visit_scalar(&a.name, &b.name, &(path + "Name"));
        self.visit_type_ref(cx, &a.target, &b.target, &(path + "Type"))?;
        cx.visit_scalar(&a.contains_target, &b.contains_target, &(path + "ContainsTarget"));
        self.visit_ref(cx, a.partner, b.partner, &(path + "Partner"))?;
        cx.visit_scalar(&a.on_delete, &b.on_delete, &(path + "OnDelete"));
        cx.visit_seq(
            &a.referential_constraint,
            &b.referential_constraint,
            move |cx, x, y, p| {
                cx.visit_constraint_pair(
                    x,
                    y,
                    move |cx, l, r, p| self.visit_ref(cx, Some(l), Some(r), p),
                    p,
                )
            },
            &(path + "ReferentialConstraint"),
        )
    }

    fn visit_enum_type(self, cx: &mut DeltaContext, a: &EnumType, b: &EnumType, path: &PropertyPath) -> DiffResult<()> {
        cx.visit_scalar(&a.namespace, &b.namespace, &(path + "Namespace"));
        cx.visit_scalar(&a.name, &b.name, &(path + "Name"));
        cx.visit_scalar(&a.underlying_type, &b.underlying_type, &(path + "UnderlyingType"));
        cx.visit_scalar(&a.is_flags, &b.is_flags, &(path + "IsFlags"));

        let (xs, ys) = self.pair_all(&a.members, &b.members)?;
        cx.visit_named_seq(
            &xs,
            &ys,
            move |cx, x, y, p| self.visit_element(cx, *x, *y, p),
            path,
            "Members",
        )
    }

    fn visit_term(self, cx: &mut DeltaContext, a: &Term, b: &Term, path: &PropertyPath) -> DiffResult<()> {
        cx.visit_scalar(&a.namespace, &b.namespace, &(path + "Namespace"));
        cx.visit_scalar(&a.name, &b.name, &(path + "Name"));
        self.visit_type_ref(cx, &a.type_ref, &b.type_ref, &(path + "Type"))?;
        cx.visit_seq(
            &a.applies_to,
            &b.applies_to,
            |cx, x, y, p| {
                cx.visit_scalar(x, y, p);
                Ok(())
            },
            &(path + "AppliesTo"),
        )?;
        visit_optional_text(cx, a.default_value.as_deref(), b.default_value.as_deref(), &(path + "DefaultValue"));
        Ok(())
    }

    fn visit_operation(self, cx: &mut DeltaContext, a: &Operation, b: &Operation, path: &PropertyPath) -> DiffResult<()> {
        cx.visit_scalar(&a.namespace, &b.namespace, &(path + "Namespace"));
        cx.visit_scalar(&a.name, &b.name, &(path + "Name"));
        cx.visit_scalar(&a.is_bound, &b.is_bound, &(path + "IsBound"));
        cx.visit_scalar(&a.is_composable, &b.is_composable, &(path + "IsComposable"));
        visit_optional_text(
            cx,
            a.entity_set_path.as_deref(),
            b.entity_set_path.as_deref(),
            &(path + "EntitySetPath"),
        );

        let (xs, ys) = self.pair_all(&a.parameters, &b.parameters)?;
        cx.visit_seq(
            &xs,
            &ys,
            move |cx, x, y, p| self.visit_element(cx, *x, *y, p),
            &(path + "Parameters"),
        )?;
        self.visit_child(cx, a.return_type, b.return_type, &(path + "ReturnType"))
    }

    fn visit_parameter(self, cx: &mut DeltaContext, a: &Parameter, b: &Parameter, path: &PropertyPath) -> DiffResult<()> {
        cx.visit_scalar(&a.name, &b.name, &(path + "Name"));
        self.visit_type_ref(cx, &a.type_ref, &b.type_ref, &(path + "Type"))?;
        visit_optional_text(cx, a.default_value.as_deref(), b.default_value.as_deref(), &(path + "DefaultValue"));
        Ok(())
    }

    fn visit_return(
        self,
        cx: &mut DeltaContext,
        a: &OperationReturn,
        b: &OperationReturn,
        path: &PropertyPath,
    ) -> DiffResult<()> {
        self.visit_type_ref(cx, &a.type_ref, &b.type_ref, &(path + "Type"))
    }

    fn visit_container(
        self,
        cx: &mut DeltaContext,
        a: &EntityContainer,
        b: &EntityContainer,
        path: &PropertyPath,
    ) -> DiffResult<()> {
        cx.visit_scalar(&a.namespace, &b.namespace, &(path + "Namespace"));
        cx.visit_scalar(&a.name, &b.name, &(path + "Name"));

        let (xs, ys) = self.pair_all(&a.elements, &b.elements)?;
        cx.visit_named_seq(
            &xs,
            &ys,
            move |cx, x, y, p| self.visit_element(cx, *x, *y, p),
            path,
            "Elements",
        )
    }

    fn visit_navigation_source(
        self,
        cx: &mut DeltaContext,
        a: &NavigationSource,
        b: &NavigationSource,
        path: &PropertyPath,
    ) -> DiffResult<()> {
        cx.visit_scalar(&a.name, &b.name, &(path + "Name"));
        self.visit_ref(cx, Some(a.entity_type), Some(b.entity_type), &(path + "EntityType"))?;
        cx.visit_scalar(
            &a.include_in_service_document,
            &b.include_in_service_document,
            &(path + "IncludeInServiceDocument"),
        );
        cx.visit_seq(
            &a.bindings,
            &b.bindings,
            |cx, x, y, p| {
                cx.visit_scalar(&x.path, &y.path, &(p + "Path"));
                cx.visit_scalar(&x.target, &y.target, &(p + "Target"));
                Ok(())
            },
            &(path + "NavigationPropertyBindings"),
        )
    }

    fn visit_operation_import(
        self,
        cx: &mut DeltaContext,
        a: &OperationImport,
        b: &OperationImport,
        path: &PropertyPath,
    ) -> DiffResult<()> {
        cx.visit_scalar(&a.name, &b.name, &(path + "Name"));
        self.visit_ref(cx, Some(a.operation), Some(b.operation), &(path + "Operation"))?;
        visit_optional_text(cx, a.entity_set.as_deref(), b.entity_set.as_deref(), &(path + "EntitySet"));
        cx.visit_scalar(
            &a.include_in_service_document,
            &b.include_in_service_document,
            &(path + "IncludeInServiceDocument"),
        );
        Ok(())
    }
}

fn visit_enum_member(cx: &mut DeltaContext, a: &EnumMember, b: &EnumMember, path: &PropertyPath) {
    cx.visit_scalar(&a.name, &b.name, &(path + "Name"));
    cx.visit_scalar(&a.value, &b.value, &(path + "Value"));
}

fn visit_type_definition(cx: &mut DeltaContext, a: &TypeDefinition, b: &TypeDefinition, path: &PropertyPath) {
    cx.visit_scalar(&a.namespace, &b.namespace, &(path + "Namespace"));
    cx.visit_scalar(&a.name, &b.name, &(path + "Name"));
    cx.visit_scalar(&a.underlying_type, &b.underlying_type, &(path + "UnderlyingType"));
}

fn visit_optional_text(cx: &mut DeltaContext, a: Option<&str>, b: Option<&str>, path: &PropertyPath) {
    if cx.is_reference_check_complete(a, b, path) {
        return;
    }
    if let (Some(x), Some(y)) = (a, b) {
        cx.visit_scalar(x, y, path);
    }
}

fn visit_annotation(cx: &mut DeltaContext, a: &Annotation, b: &Annotation, path: &PropertyPath) -> DiffResult<()> {
    visit_value(cx, &a.value, &b.value, &(path + "Value"))
}

fn visit_value(cx: &mut DeltaContext, a: &Value, b: &Value, path: &PropertyPath) -> DiffResult<()> {
    match (a, b) {
        (Value::Null, Value::Null) => {}
        (Value::Binary(x), Value::Binary(y)) => cx.visit_scalar(x, y, path),
        (Value::Boolean(x), Value::Boolean(y)) => cx.visit_scalar(x, y, path),
        (Value::Date(x), Value::Date(y)) => cx.visit_scalar(x, y, path),
        (Value::DateTimeOffset(x), Value::DateTimeOffset(y)) => cx.visit_scalar(x, y, path),
        (Value::Decimal(x), Value::Decimal(y)) => cx.visit_scalar(x, y, path),
        (Value::Duration(x), Value::Duration(y)) => cx.visit_scalar(x, y, path),
        (Value::Float(x), Value::Float(y)) => cx.visit_scalar(x, y, path),
        (Value::Guid(x), Value::Guid(y)) => cx.visit_scalar(x, y, path),
        (Value::Int(x), Value::Int(y)) => cx.visit_scalar(x, y, path),
        (Value::String(x), Value::String(y)) => cx.visit_scalar(x, y, path),
        (Value::TimeOfDay(x), Value::TimeOfDay(y)) => cx.visit_scalar(x, y, path),
        (Value::EnumMember(x), Value::EnumMember(y)) => cx.visit_scalar(x, y, path),
        (Value::Path(x), Value::Path(y)) => cx.visit_scalar(x, y, path),
        (Value::Collection(x), Value::Collection(y)) => return cx.visit_seq(x, y, visit_value, path),
        (Value::Record(x), Value::Record(y)) => {
            return cx.visit_named_seq(
                x,
                y,
                |cx, l: &PropertyValue, r: &PropertyValue, p| visit_value(cx, &l.value, &r.value, p),
                path,
                "Properties",
            )
        }
        _ => cx.report(path, format!("different types '{}' != '{}'", a.form(), b.form())),
    }
    Ok(())
}
