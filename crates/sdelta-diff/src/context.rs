//! Per-comparison traversal state.
//!
//! A [`DeltaContext`] owns everything a single top-level comparison mutates:
//! the diff sink, the cycle guard, and the location-context stack. It is
//! passed by `&mut` into every comparer and every element-visitor closure,
//! so independent comparisons never share state.

use std::collections::HashSet;

use sdelta_model::ElementId;
use sdelta_types::{DiffRecord, LocationPair, PropertyPath};
use tracing::debug;

use crate::config::CompareConfig;
use crate::sink::DiffSink;

/// Set of `(left, right)` element pairs already entered.
#[derive(Clone, Debug, Default)]
pub struct CycleGuard {
    visited: HashSet<(ElementId, ElementId)>,
}

impl CycleGuard {
    /// Insert the pair; returns `false` if it was already present.
    pub fn insert(&mut self, left: ElementId, right: ElementId) -> bool {
        self.visited.insert((left, right))
    }

    pub fn contains(&self, left: ElementId, right: ElementId) -> bool {
        self.visited.contains(&(left, right))
    }

    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }
}

/// Mutable state of one comparison.
#[derive(Debug, Default)]
pub struct DeltaContext {
    config: CompareConfig,
    sink: DiffSink,
    visited: CycleGuard,
    pub(crate) locations: Vec<LocationPair>,
}

impl DeltaContext {
    pub fn new(config: CompareConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Record a divergence at `path`, tagged with the innermost open
    /// location scope or `(Unknown, Unknown)` if none is open.
    pub fn report(&mut self, path: &PropertyPath, message: impl Into<String>) {
        let locations = self.locations.last().cloned().unwrap_or_default();
        self.sink.push(path, message.into(), locations);
    }

    /// Divergences recorded so far, in detection order.
    pub fn errors(&self) -> &[DiffRecord] {
        self.sink.records()
    }

    /// Depth of the location-context stack.
    pub fn location_depth(&self) -> usize {
        self.locations.len()
    }

    /// Cycle guard check: returns `true` the first time a pair is entered
    /// and `false` on every later attempt, in which case the caller must
    /// not descend again.
    pub fn enter(&mut self, left: ElementId, right: ElementId) -> bool {
        let first = self.visited.insert(left, right);
        if !first {
            debug!(left = ?left, right = ?right, "pair already visited");
        }
        first
    }

    pub fn cycle_guard(&self) -> &CycleGuard {
        &self.visited
    }

    /// Reference/null short-circuit.
    ///
    /// Returns `true` when nothing more needs comparing: the operands are
    /// the same object, both absent, or exactly one absent (which is
    /// reported). Returns `false` when both are present and distinct.
    pub fn is_reference_check_complete<T: ?Sized>(
        &mut self,
        a: Option<&T>,
        b: Option<&T>,
        path: &PropertyPath,
    ) -> bool {
        match (a, b) {
            (Some(x), Some(y)) => std::ptr::eq(x, y),
            (None, None) => true,
            (None, Some(_)) => {
                self.report(path, "left == null, right not");
                true
            }
            (Some(_), None) => {
                self.report(path, "right == null, left not");
                true
            }
        }
    }

    /// End the comparison and take the recorded divergences.
    pub fn finish(self) -> Vec<DiffRecord> {
        debug_assert!(self.locations.is_empty(), "unbalanced location stack");
        self.sink.into_records()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdelta_types::Location;

    fn path() -> PropertyPath {
        PropertyPath::root() + "Type"
    }

    #[test]
    fn starts_empty() {
        let cx = DeltaContext::new(CompareConfig::default());
        assert!(cx.errors().is_empty());
        assert_eq!(cx.location_depth(), 0);
        assert!(cx.cycle_guard().is_empty());
    }

    #[test]
    fn report_without_scope_uses_unknown_locations() {
        let mut cx = DeltaContext::default();
        cx.report(&path(), "x");
        assert_eq!(cx.errors()[0].locations(), LocationPair::unknown());
        assert_eq!(cx.errors()[0].path, path());
    }

    #[test]
    fn report_uses_innermost_location() {
        let mut cx = DeltaContext::default();
        cx.locations.push(LocationPair::new(Location::known("outer"), Location::Unknown));
        cx.locations.push(LocationPair::new(Location::known("inner"), Location::known("r")));
        cx.report(&path(), "x");
        assert_eq!(cx.errors()[0].left, Location::known("inner"));
        assert_eq!(cx.errors()[0].right, Location::known("r"));
        cx.locations.clear();
    }

    #[test]
    fn same_reference_is_complete_without_report() {
        let mut cx = DeltaContext::default();
        let value = String::from("shared");
        assert!(cx.is_reference_check_complete(Some(&value), Some(&value), &path()));
        assert!(cx.errors().is_empty());
    }

    #[test]
    fn both_absent_is_complete_without_report() {
        let mut cx = DeltaContext::default();
        assert!(cx.is_reference_check_complete::<str>(None, None, &path()));
        assert!(cx.errors().is_empty());
    }

    #[test]
    fn left_absent_reports_once() {
        let mut cx = DeltaContext::default();
        assert!(cx.is_reference_check_complete(None, Some("x"), &path()));
        assert_eq!(cx.errors().len(), 1);
        assert_eq!(cx.errors()[0].message, "left == null, right not");
        assert_eq!(cx.errors()[0].path, path());
    }

    #[test]
    fn right_absent_reports_once() {
        let mut cx = DeltaContext::default();
        assert!(cx.is_reference_check_complete(Some("x"), None, &path()));
        assert_eq!(cx.errors().len(), 1);
        assert_eq!(cx.errors()[0].message, "right == null, left not");
    }

    #[test]
    fn distinct_present_values_need_recursion() {
        let mut cx = DeltaContext::default();
        let (a, b) = (String::from("x"), String::from("x"));
        assert!(!cx.is_reference_check_complete(Some(&a), Some(&b), &path()));
        assert!(cx.errors().is_empty());
    }

    #[test]
    fn enter_is_true_once_per_pair() {
        let mut cx = DeltaContext::default();
        let (a, b) = (ElementId::from_index(1), ElementId::from_index(2));
        assert!(cx.enter(a, b));
        assert!(!cx.enter(a, b));
        assert!(cx.enter(b, a));
        assert!(cx.cycle_guard().contains(a, b));
        assert_eq!(cx.cycle_guard().len(), 2);
    }

    #[test]
    fn context_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<DeltaContext>();
    }
}
