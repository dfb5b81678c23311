//! Property paths: where in the schema graph a divergence was found.
//!
//! A [`PropertyPath`] is a persistent list of segments. Appending a segment
//! never touches the original path; the new path shares its prefix through
//! an [`Arc`], so paths are cheap to clone and safe to send across threads.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Add;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered sequence of field-name or index segments, e.g. `Properties/Age`.
#[derive(Clone, Default)]
pub struct PropertyPath {
    tail: Option<Arc<Segment>>,
}

struct Segment {
    parent: PropertyPath,
    name: String,
    len: usize,
}

impl PropertyPath {
    /// The empty path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from segments, first segment outermost.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        segments
            .into_iter()
            .fold(Self::root(), |path, segment| path.append(segment))
    }

    /// Return a new path with `segment` appended. `self` is unchanged.
    pub fn append(&self, segment: impl Into<String>) -> Self {
        Self {
            tail: Some(Arc::new(Segment {
                parent: self.clone(),
                name: segment.into(),
                len: self.len() + 1,
            })),
        }
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.tail.as_ref().map_or(0, |s| s.len)
    }

    /// Returns `true` for the empty path.
    pub fn is_root(&self) -> bool {
        self.tail.is_none()
    }

    /// The last segment, if any.
    pub fn last(&self) -> Option<&str> {
        self.tail.as_ref().map(|s| s.name.as_str())
    }

    /// All segments, outermost first.
    pub fn segments(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(self.len());
        let mut cursor = self.tail.as_deref();
        while let Some(segment) = cursor {
            out.push(segment.name.as_str());
            cursor = segment.parent.tail.as_deref();
        }
        out.reverse();
        out
    }
}

impl PartialEq for PropertyPath {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let (mut a, mut b) = (self.tail.as_ref(), other.tail.as_ref());
        while let (Some(x), Some(y)) = (a, b) {
            if Arc::ptr_eq(x, y) {
                return true;
            }
            if x.name != y.name {
                return false;
            }
            a = x.parent.tail.as_ref();
            b = y.parent.tail.as_ref();
        }
        true
    }
}

impl Eq for PropertyPath {}

impl Hash for PropertyPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.segments().hash(state);
    }
}

impl<S: Into<String>> Add<S> for &PropertyPath {
    type Output = PropertyPath;

    fn add(self, segment: S) -> PropertyPath {
        self.append(segment)
    }
}

impl<S: Into<String>> Add<S> for PropertyPath {
    type Output = PropertyPath;

    fn add(self, segment: S) -> PropertyPath {
        self.append(segment)
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments().join("/"))
    }
}

impl fmt::Debug for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropertyPath({self})")
    }
}

impl Serialize for PropertyPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.segments().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PropertyPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let segments = Vec::<String>::deserialize(deserializer)?;
        Ok(Self::from_segments(segments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_empty() {
        let root = PropertyPath::root();
        assert!(root.is_root());
        assert_eq!(root.len(), 0);
        assert_eq!(root.to_string(), "");
        assert_eq!(root.last(), None);
    }

    #[test]
    fn append_does_not_mutate_prefix() {
        let base = PropertyPath::root().append("Properties");
        let age = base.append("Age");
        let name = base.append("Name");

        assert_eq!(base.segments(), vec!["Properties"]);
        assert_eq!(age.segments(), vec!["Properties", "Age"]);
        assert_eq!(name.segments(), vec!["Properties", "Name"]);
        assert_eq!(age.to_string(), "Properties/Age");
    }

    #[test]
    fn equality_is_segment_wise() {
        let built = PropertyPath::root() + "Properties" + "Age";
        let parsed = PropertyPath::from_segments(["Properties", "Age"]);
        assert_eq!(built, parsed);
        assert_ne!(built, PropertyPath::from_segments(["Properties", "Name"]));
        assert_ne!(built, PropertyPath::from_segments(["Properties"]));
    }

    #[test]
    fn shared_prefix_equality() {
        let base = PropertyPath::from_segments(["A", "B"]);
        assert_eq!(base.append("C"), base.append("C"));
    }

    #[test]
    fn hash_agrees_with_eq() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(PropertyPath::root() + "A" + "0");
        assert!(set.contains(&PropertyPath::from_segments(["A", "0"])));
    }

    #[test]
    fn serializes_as_segment_array() {
        let path = PropertyPath::from_segments(["Elements:Person", "Key"]);
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, r#"["Elements:Person","Key"]"#);

        let back: PropertyPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
    }

    #[test]
    fn paths_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PropertyPath>();
    }
}
