//! Location-context scopes.
//!
//! Opening a scope borrows the [`DeltaContext`] mutably and hands it back
//! through the guard, so every divergence reported while the guard lives is
//! tagged with the pushed locations, and the entry is popped exactly once
//! when the guard drops, whichever way the enclosing function exits.

use std::ops::{Deref, DerefMut};

use sdelta_model::Locatable;
use sdelta_types::{Location, LocationPair};

use crate::context::DeltaContext;

/// Guard returned by [`DeltaContext::push_location`].
pub struct LocationScope<'a> {
    cx: &'a mut DeltaContext,
    pushed: bool,
}

impl DeltaContext {
    /// Open a location scope for a pair of corresponding elements.
    ///
    /// If either side is locatable, `(location(a), location(b))` is pushed,
    /// with [`Location::Unknown`] for a side that is not. If neither is
    /// locatable the guard does nothing.
    pub fn push_location<A, B>(&mut self, a: &A, b: &B) -> LocationScope<'_>
    where
        A: Locatable + ?Sized,
        B: Locatable + ?Sized,
    {
        let (left, right) = (a.location(), b.location());
        let pushed = left.is_some() || right.is_some();
        if pushed {
            self.locations.push(LocationPair::new(
                left.cloned().unwrap_or(Location::Unknown),
                right.cloned().unwrap_or(Location::Unknown),
            ));
        }
        LocationScope { cx: self, pushed }
    }
}

impl LocationScope<'_> {
    /// Whether this scope pushed an entry.
    pub fn is_active(&self) -> bool {
        self.pushed
    }
}

impl Deref for LocationScope<'_> {
    type Target = DeltaContext;

    fn deref(&self) -> &DeltaContext {
        self.cx
    }
}

impl DerefMut for LocationScope<'_> {
    fn deref_mut(&mut self) -> &mut DeltaContext {
        self.cx
    }
}

impl Drop for LocationScope<'_> {
    fn drop(&mut self) {
        if self.pushed {
            self.cx.locations.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DiffError, DiffResult};
    use sdelta_types::PropertyPath;

    struct Located(Option<Location>);

    impl Locatable for Located {
        fn location(&self) -> Option<&Location> {
            self.0.as_ref()
        }
    }

    fn here(description: &str) -> Located {
        Located(Some(Location::known(description)))
    }

    #[test]
    fn neither_locatable_is_noop() {
        let mut cx = DeltaContext::default();
        {
            let scope = cx.push_location(&Located(None), &Located(None));
            assert!(!scope.is_active());
            assert_eq!(scope.location_depth(), 0);
        }
        assert_eq!(cx.location_depth(), 0);
    }

    #[test]
    fn one_side_locatable_substitutes_unknown() {
        let mut cx = DeltaContext::default();
        {
            let mut scope = cx.push_location(&here("a.xml (1, 1)"), &Located(None));
            assert_eq!(scope.location_depth(), 1);
            scope.report(&PropertyPath::root(), "x");
        }
        let record = &cx.errors()[0];
        assert_eq!(record.left, Location::known("a.xml (1, 1)"));
        assert_eq!(record.right, Location::Unknown);
        assert_eq!(cx.location_depth(), 0);
    }

    #[test]
    fn nested_scopes_pop_in_order() {
        let mut cx = DeltaContext::default();
        {
            let mut outer = cx.push_location(&here("outer-l"), &here("outer-r"));
            {
                let mut inner = outer.push_location(&here("inner-l"), &here("inner-r"));
                assert_eq!(inner.location_depth(), 2);
                inner.report(&PropertyPath::root(), "inner");
            }
            outer.report(&PropertyPath::root(), "outer");
        }
        assert_eq!(cx.errors()[0].left, Location::known("inner-l"));
        assert_eq!(cx.errors()[1].left, Location::known("outer-l"));
        assert_eq!(cx.location_depth(), 0);
    }

    #[test]
    fn early_return_still_pops() {
        fn unsupported() -> DiffResult<()> {
            Err(DiffError::UnsupportedElementKind { kind: "Test".into() })
        }

        fn failing(cx: &mut DeltaContext) -> DiffResult<()> {
            let mut scope = cx.push_location(&here("l"), &here("r"));
            assert_eq!(scope.location_depth(), 1);
            unsupported()?;
            scope.report(&PropertyPath::root(), "never reached");
            Ok(())
        }

        let mut cx = DeltaContext::default();
        assert!(failing(&mut cx).is_err());
        assert_eq!(cx.location_depth(), 0);
        assert!(cx.finish().is_empty());
    }
}
