//! Collection alignment: ordered sequences, name-keyed sequences, and
//! composite-key sets.
//!
//! Every aligner takes an element visitor `FnMut(&mut DeltaContext, &T, &T,
//! &PropertyPath) -> DiffResult<()>`. The context is handed to the visitor
//! rather than captured, so visitors can recurse into further aligners.
//! Iteration order is always left order first, then right-only items in
//! right order, which keeps the output stable across runs.

use std::collections::{HashMap, HashSet};
use std::fmt;

use sdelta_model::{ConstraintPair, ElementId, Named};
use sdelta_types::PropertyPath;

use crate::context::DeltaContext;
use crate::error::{DiffError, DiffResult, Side};

/// Derived identity of an annotation-like set member.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CompositeKey {
    /// Qualified term name, e.g. `Core.Description`.
    pub term: String,
    pub qualifier: Option<String>,
    /// Identity token of the annotated target.
    pub target: String,
}

impl CompositeKey {
    pub fn new(term: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            qualifier: None,
            target: target.into(),
        }
    }

    pub fn with_qualifier(mut self, qualifier: Option<String>) -> Self {
        self.qualifier = qualifier;
        self
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.term)?;
        if let Some(qualifier) = &self.qualifier {
            write!(f, "#{qualifier}")?;
        }
        write!(f, "/{}", self.target)
    }
}

/// One side of a set comparison, indexed by composite key.
struct KeyIndex<'a, T> {
    entries: Vec<(CompositeKey, &'a T)>,
    positions: HashMap<CompositeKey, usize>,
}

impl<'a, T> KeyIndex<'a, T> {
    fn build(
        items: &'a [T],
        key: &impl Fn(&T) -> DiffResult<CompositeKey>,
        side: Side,
    ) -> DiffResult<Self> {
        let mut entries = Vec::with_capacity(items.len());
        let mut positions = HashMap::with_capacity(items.len());
        for item in items {
            let k = key(item)?;
            if positions.contains_key(&k) {
                return Err(DiffError::DuplicateCompositeKey {
                    key: k.to_string(),
                    side,
                });
            }
            positions.insert(k.clone(), entries.len());
            entries.push((k, item));
        }
        Ok(Self { entries, positions })
    }

    fn get(&self, key: &CompositeKey) -> Option<&'a T> {
        self.positions.get(key).map(|&i| self.entries[i].1)
    }
}

impl DeltaContext {
    /// Compare two sequences index by index.
    ///
    /// Elements are paired while both sides have one, visiting each pair at
    /// `path/{index}`. If the lengths differ, one record
    /// `different lengths '{a}' != '{b}'` is reported at `path` unless
    /// [`report_length_mismatch`](crate::CompareConfig::report_length_mismatch)
    /// is off.
    pub fn visit_seq<T, F>(&mut self, a: &[T], b: &[T], mut visit: F, path: &PropertyPath) -> DiffResult<()>
    where
        F: FnMut(&mut DeltaContext, &T, &T, &PropertyPath) -> DiffResult<()>,
    {
        for (i, (x, y)) in a.iter().zip(b).enumerate() {
            visit(self, x, y, &path.append(i.to_string()))?;
        }
        if a.len() != b.len() && self.config().report_length_mismatch {
            self.report(path, format!("different lengths '{}' != '{}'", a.len(), b.len()));
        }
        Ok(())
    }

    /// Full outer join of two sequences by element name.
    ///
    /// Matched pairs are visited at `path/{label}:{name}`; unmatched names
    /// are reported at `path`. Names are assumed unique per side: a repeated
    /// name joins against the first occurrence on the other side.
    pub fn visit_named_seq<T, F>(
        &mut self,
        a: &[T],
        b: &[T],
        mut visit: F,
        path: &PropertyPath,
        label: &str,
    ) -> DiffResult<()>
    where
        T: Named,
        F: FnMut(&mut DeltaContext, &T, &T, &PropertyPath) -> DiffResult<()>,
    {
        let mut right: HashMap<&str, &T> = HashMap::with_capacity(b.len());
        for y in b {
            right.entry(y.name()).or_insert(y);
        }
        let left: HashSet<&str> = a.iter().map(|x| x.name()).collect();

        for x in a {
            let name = x.name();
            match right.get(name).copied() {
                Some(y) => visit(self, x, y, &path.append(format!("{label}:{name}")))?,
                None => self.report(path, format!("missing item with name {name} on right")),
            }
        }
        for y in b {
            let name = y.name();
            if !left.contains(name) {
                self.report(path, format!("missing item with name {name} on left"));
            }
        }
        Ok(())
    }

    /// Full outer join of two unordered sets by a derived composite key.
    ///
    /// Both sides are indexed before anything is compared; a key repeated
    /// within one side aborts with [`DiffError::DuplicateCompositeKey`].
    /// A key present only on the left is reported as missing on the right
    /// and vice versa. Matched pairs are visited at `path` itself.
    pub fn visit_set<T, K, F>(
        &mut self,
        a: &[T],
        b: &[T],
        key: K,
        mut visit: F,
        path: &PropertyPath,
    ) -> DiffResult<()>
    where
        K: Fn(&T) -> DiffResult<CompositeKey>,
        F: FnMut(&mut DeltaContext, &T, &T, &PropertyPath) -> DiffResult<()>,
    {
        let left = KeyIndex::build(a, &key, Side::Left)?;
        let right = KeyIndex::build(b, &key, Side::Right)?;

        // "on {side}" names the side the annotation is absent from, as the
        // named aligner does.
        for (k, x) in &left.entries {
            match right.get(k) {
                Some(y) => visit(self, *x, y, path)?,
                None => self.report(
                    path,
                    format!("missing annotation for Term {} on right", k.term),
                ),
            }
        }
        for (k, _) in &right.entries {
            if left.get(k).is_none() {
                self.report(
                    path,
                    format!("missing annotation for Term {} on left", k.term),
                );
            }
        }
        Ok(())
    }

    /// Compare a referential-constraint pair field by field.
    pub fn visit_constraint_pair<F>(
        &mut self,
        a: &ConstraintPair,
        b: &ConstraintPair,
        mut visit: F,
        path: &PropertyPath,
    ) -> DiffResult<()>
    where
        F: FnMut(&mut DeltaContext, ElementId, ElementId, &PropertyPath) -> DiffResult<()>,
    {
        visit(self, a.dependent, b.dependent, &path.append("DependentProperty"))?;
        visit(self, a.principal, b.principal, &path.append("PrincipalProperty"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompareConfig;
    use proptest::prelude::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Item {
        name: String,
        value: i64,
    }

    impl Named for Item {
        fn name(&self) -> &str {
            &self.name
        }
    }

    fn item(name: &str, value: i64) -> Item {
        Item {
            name: name.into(),
            value,
        }
    }

    fn compare_values(cx: &mut DeltaContext, a: &Item, b: &Item, path: &PropertyPath) -> DiffResult<()> {
        cx.visit_scalar(&a.value, &b.value, path);
        Ok(())
    }

    fn messages(cx: &DeltaContext) -> Vec<String> {
        cx.errors().iter().map(|r| r.message.clone()).collect()
    }

    // -----------------------------------------------------------------
    // Ordered sequences
    // -----------------------------------------------------------------

    #[test]
    fn seq_visits_pairs_by_index() {
        let mut cx = DeltaContext::default();
        let a = [item("x", 1), item("y", 2)];
        let b = [item("x", 1), item("y", 3)];
        cx.visit_seq(&a, &b, compare_values, &(PropertyPath::root() + "Key"))
            .unwrap();
        assert_eq!(cx.errors().len(), 1);
        assert_eq!(cx.errors()[0].path.to_string(), "Key/1");
    }

    #[test]
    fn seq_length_mismatch_is_reported_once() {
        let mut cx = DeltaContext::default();
        let a = [item("x", 1)];
        let b = [item("x", 1), item("y", 2), item("z", 3)];
        let path = PropertyPath::root() + "Parameters";
        cx.visit_seq(&a, &b, compare_values, &path).unwrap();
        assert_eq!(messages(&cx), vec!["different lengths '1' != '3'"]);
        assert_eq!(cx.errors()[0].path, path);
    }

    #[test]
    fn seq_length_mismatch_can_be_ignored() {
        let config = CompareConfig {
            report_length_mismatch: false,
            ..Default::default()
        };
        let mut cx = DeltaContext::new(config);
        let a = [item("x", 1), item("y", 2)];
        cx.visit_seq(&a, &a[..1], compare_values, &PropertyPath::root())
            .unwrap();
        assert!(cx.errors().is_empty());
    }

    #[test]
    fn seq_propagates_visitor_errors() {
        let mut cx = DeltaContext::default();
        let a = [item("x", 1), item("y", 2)];
        let mut calls = 0;
        let result = cx.visit_seq(
            &a,
            &a,
            |_, _, _, _| {
                calls += 1;
                Err(DiffError::UnsupportedElementKind { kind: "Test".into() })
            },
            &PropertyPath::root(),
        );
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    // -----------------------------------------------------------------
    // Name-keyed sequences
    // -----------------------------------------------------------------

    #[test]
    fn named_seq_full_outer_join() {
        let mut cx = DeltaContext::default();
        let a = [item("A", 1), item("B", 2)];
        let b = [item("B", 2), item("C", 3)];
        let mut visited = Vec::new();
        let path = PropertyPath::root() + "Elements:Person";
        cx.visit_named_seq(
            &a,
            &b,
            |cx, x, y, p| {
                visited.push(p.to_string());
                compare_values(cx, x, y, p)
            },
            &path,
            "Properties",
        )
        .unwrap();

        assert_eq!(visited, vec!["Elements:Person/Properties:B"]);
        assert_eq!(
            messages(&cx),
            vec![
                "missing item with name A on right",
                "missing item with name C on left",
            ]
        );
        assert!(cx.errors().iter().all(|r| r.path == path));
    }

    #[test]
    fn named_seq_matches_regardless_of_order() {
        let mut cx = DeltaContext::default();
        let a = [item("A", 1), item("B", 2)];
        let b = [item("B", 2), item("A", 1)];
        cx.visit_named_seq(&a, &b, compare_values, &PropertyPath::root(), "P")
            .unwrap();
        assert!(cx.errors().is_empty());
    }

    #[test]
    fn named_seq_reports_value_difference_under_label() {
        let mut cx = DeltaContext::default();
        cx.visit_named_seq(
            &[item("Age", 1)],
            &[item("Age", 2)],
            compare_values,
            &PropertyPath::root(),
            "Properties",
        )
        .unwrap();
        assert_eq!(cx.errors()[0].path.to_string(), "Properties:Age");
        assert_eq!(cx.errors()[0].message, "different values '1' != '2'");
    }

    fn named_seq_outcome(a: &[Item], b: &[Item]) -> Vec<(String, String)> {
        let mut cx = DeltaContext::default();
        cx.visit_named_seq(a, b, compare_values, &PropertyPath::root(), "P")
            .unwrap();
        let mut out: Vec<_> = cx
            .errors()
            .iter()
            .map(|r| (r.path.to_string(), r.message.clone()))
            .collect();
        out.sort();
        out
    }

    fn unique_items() -> impl Strategy<Value = Vec<Item>> {
        prop::collection::btree_map("[a-e]", 0i64..3, 0..5)
            .prop_map(|m| m.into_iter().map(|(name, value)| Item { name, value }).collect())
    }

    /// A unique-name sequence paired with an arbitrary permutation of it.
    fn items_and_permutation() -> impl Strategy<Value = (Vec<Item>, Vec<Item>)> {
        unique_items().prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    }

    proptest! {
        #[test]
        fn named_seq_permutation_invariant(
            (a, shuffled_a) in items_and_permutation(),
            (b, shuffled_b) in items_and_permutation(),
        ) {
            let expected = named_seq_outcome(&a, &b);
            prop_assert_eq!(named_seq_outcome(&shuffled_a, &shuffled_b), expected);
        }
    }

    // -----------------------------------------------------------------
    // Composite-key sets
    // -----------------------------------------------------------------

    fn keyed(k: &(&str, &str, i64)) -> DiffResult<CompositeKey> {
        Ok(CompositeKey::new(k.0, k.1))
    }

    #[test]
    fn set_outer_join_by_key() {
        let mut cx = DeltaContext::default();
        let a = [("Core.K1", "Org.A", 1), ("Core.K2", "Org.A", 2)];
        let b = [("Core.K2", "Org.A", 2), ("Core.K3", "Org.A", 3)];
        let mut visited = Vec::new();
        let path = PropertyPath::root() + "Annotations";
        cx.visit_set(
            &a,
            &b,
            keyed,
            |cx, x, y, p| {
                visited.push((x.0, p.clone()));
                cx.visit_scalar(&x.2, &y.2, p);
                Ok(())
            },
            &path,
        )
        .unwrap();

        assert_eq!(visited, vec![("Core.K2", path.clone())]);
        assert_eq!(
            messages(&cx),
            vec![
                "missing annotation for Term Core.K1 on right",
                "missing annotation for Term Core.K3 on left",
            ]
        );
    }

    #[test]
    fn set_key_includes_target() {
        let mut cx = DeltaContext::default();
        let a = [("Core.Description", "Org.A", 1)];
        let b = [("Core.Description", "Org.B", 1)];
        cx.visit_set(&a, &b, keyed, |_, _, _, _| Ok(()), &PropertyPath::root())
            .unwrap();
        assert_eq!(cx.errors().len(), 2);
    }

    #[test]
    fn set_duplicate_key_is_fatal() {
        let mut cx = DeltaContext::default();
        let a = [("Core.K1", "Org.A", 1)];
        let b = [("Core.K1", "Org.A", 1), ("Core.K1", "Org.A", 2)];
        let mut visits = 0;
        let err = cx
            .visit_set(
                &a,
                &b,
                keyed,
                |_, _, _, _| {
                    visits += 1;
                    Ok(())
                },
                &PropertyPath::root(),
            )
            .unwrap_err();

        assert_eq!(
            err,
            DiffError::DuplicateCompositeKey {
                key: "Core.K1/Org.A".into(),
                side: Side::Right,
            }
        );
        assert_eq!(visits, 0);
        assert!(cx.errors().is_empty());
    }

    #[test]
    fn qualifier_distinguishes_keys() {
        let plain = CompositeKey::new("Core.Description", "Org.A");
        let short = plain.clone().with_qualifier(Some("short".into()));
        assert_ne!(plain, short);
        assert_eq!(short.to_string(), "Core.Description#short/Org.A");
    }

    // -----------------------------------------------------------------
    // Constraint pairs
    // -----------------------------------------------------------------

    #[test]
    fn constraint_pair_extends_path_per_field() {
        let mut cx = DeltaContext::default();
        let a = ConstraintPair {
            dependent: ElementId::from_index(1),
            principal: ElementId::from_index(2),
        };
        let mut seen = Vec::new();
        cx.visit_constraint_pair(
            &a,
            &a,
            |_, l, r, p| {
                seen.push((l, r, p.to_string()));
                Ok(())
            },
            &(PropertyPath::root() + "0"),
        )
        .unwrap();
        assert_eq!(
            seen,
            vec![
                (a.dependent, a.dependent, "0/DependentProperty".to_string()),
                (a.principal, a.principal, "0/PrincipalProperty".to_string()),
            ]
        );
    }
}
