//! Kind dispatch: display paths and kind equality checks.

use sdelta_model::{Element, ElementKind};
use sdelta_types::PropertyPath;

use crate::context::DeltaContext;
use crate::error::{DiffError, DiffResult};

/// Human-readable identifier of an annotatable element.
///
/// Kinds are matched in the priority order of [`ElementKind::ANNOTATABLE`].
/// Actions use their qualified name and operation imports their bare name;
/// every other kind uses its own display form. Annotations and unrecognised
/// elements have no display path and abort the comparison.
pub fn display_path_of(element: &Element) -> DiffResult<String> {
    let path = match element {
        Element::Action(action) => action.full_name(),
        Element::ActionImport(import) => import.name.clone(),
        Element::ComplexType(t) => t.to_string(),
        Element::EntityContainer(c) => c.to_string(),
        Element::EntitySet(s) => s.to_string(),
        Element::EntityType(t) => t.to_string(),
        Element::EnumMember(m) => m.to_string(),
        Element::EnumType(e) => e.to_string(),
        Element::Function(f) => f.to_string(),
        Element::FunctionImport(i) => i.to_string(),
        Element::NavigationProperty(n) => n.to_string(),
        Element::OperationReturn(r) => r.to_string(),
        Element::OptionalParameter(p) => p.to_string(),
        Element::Parameter(p) => p.to_string(),
        Element::PathType(p) => p.to_string(),
        Element::PrimitiveType(p) => p.to_string(),
        Element::Singleton(s) => s.to_string(),
        Element::StructuralProperty(p) => p.to_string(),
        Element::Term(t) => t.to_string(),
        Element::TypeDefinition(t) => t.to_string(),
        Element::UntypedType => "Edm.Untyped".to_string(),
        Element::Annotation(_) => {
            return Err(DiffError::UnsupportedElementKind {
                kind: ElementKind::Annotation.to_string(),
            })
        }
        Element::Unrecognized(u) => {
            return Err(DiffError::UnsupportedElementKind { kind: u.tag.clone() })
        }
    };
    Ok(path)
}

impl DeltaContext {
    /// Check that `a` and `b` occupy the same kind among `candidates`.
    ///
    /// Reports `different types '{a}' != '{b}'` and returns `false` when both
    /// fall in the candidate list under different kinds. An element outside
    /// the list matches nothing and is not reported.
    pub fn check_type_equality(
        &mut self,
        a: &Element,
        b: &Element,
        candidates: &[ElementKind],
        path: &PropertyPath,
    ) -> bool {
        let find = |e: &Element| candidates.iter().copied().find(|k| *k == e.kind());
        match (find(a), find(b)) {
            (Some(ka), Some(kb)) if ka != kb => {
                self.report(path, format!("different types '{ka}' != '{kb}'"));
                false
            }
            _ => true,
        }
    }
}
