//! The element arena.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::element::{Annotation, Element, Term};
use crate::error::{ModelError, ModelResult};
use crate::kind::ElementKind;

/// Index of an element within its [`Schema`].
///
/// Ids are only meaningful for the schema that issued them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(u32);

impl ElementId {
    pub const fn from_index(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({})", self.0)
    }
}

/// A schema: its namespace, the element arena, the top-level elements, and
/// the vocabulary annotations applied to its elements.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schema {
    namespace: String,
    elements: Vec<Element>,
    roots: Vec<ElementId>,
    annotations: Vec<ElementId>,
}

impl Schema {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Number of elements in the arena.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Add an element to the arena without listing it at the top level.
    ///
    /// Ids are `u32`, so an arena holds at most `u32::MAX + 1` elements;
    /// adding past that fails with [`ModelError::CapacityExceeded`].
    pub fn add(&mut self, element: Element) -> ModelResult<ElementId> {
        let id = next_id(self.elements.len())?;
        self.elements.push(element);
        Ok(id)
    }

    /// Add a top-level element (type, term, operation, container).
    pub fn add_root(&mut self, element: Element) -> ModelResult<ElementId> {
        let id = self.add(element)?;
        self.roots.push(id);
        Ok(id)
    }

    /// Add a vocabulary annotation.
    pub fn annotate(&mut self, annotation: Annotation) -> ModelResult<ElementId> {
        let id = self.add(Element::Annotation(annotation))?;
        self.annotations.push(id);
        Ok(id)
    }

    pub fn element(&self, id: ElementId) -> ModelResult<&Element> {
        self.elements
            .get(id.0 as usize)
            .ok_or(ModelError::UnknownElement(id))
    }

    /// Mutable access, used to close cycles after the referenced element exists.
    pub fn element_mut(&mut self, id: ElementId) -> ModelResult<&mut Element> {
        self.elements
            .get_mut(id.0 as usize)
            .ok_or(ModelError::UnknownElement(id))
    }

    pub fn term(&self, id: ElementId) -> ModelResult<&Term> {
        match self.element(id)? {
            Element::Term(term) => Ok(term),
            other => Err(ModelError::WrongKind {
                id,
                expected: ElementKind::Term,
                actual: other.kind(),
            }),
        }
    }

    pub fn annotation(&self, id: ElementId) -> ModelResult<&Annotation> {
        match self.element(id)? {
            Element::Annotation(annotation) => Ok(annotation),
            other => Err(ModelError::WrongKind {
                id,
                expected: ElementKind::Annotation,
                actual: other.kind(),
            }),
        }
    }

    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    pub fn annotations(&self) -> &[ElementId] {
        &self.annotations
    }

    /// Resolve a list of ids in order.
    pub fn resolve(&self, ids: &[ElementId]) -> ModelResult<Vec<&Element>> {
        ids.iter().map(|id| self.element(*id)).collect()
    }
}

fn next_id(len: usize) -> ModelResult<ElementId> {
    u32::try_from(len)
        .map(ElementId)
        .map_err(|_| ModelError::CapacityExceeded(len))
}
