//! Divergence records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::location::{Location, LocationPair};
use crate::path::PropertyPath;

/// One divergence between corresponding elements of the left and right graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRecord {
    /// Where the divergence was detected.
    pub path: PropertyPath,
    /// Human-readable description, e.g. `different values 'a' != 'b'`.
    pub message: String,
    /// Location context on the left side.
    pub left: Location,
    /// Location context on the right side.
    pub right: Location,
}

impl DiffRecord {
    pub fn new(path: PropertyPath, message: impl Into<String>, locations: LocationPair) -> Self {
        Self {
            path,
            message: message.into(),
            left: locations.left,
            right: locations.right,
        }
    }

    /// The location pair this record was tagged with.
    pub fn locations(&self) -> LocationPair {
        LocationPair::new(self.left.clone(), self.right.clone())
    }
}

impl fmt::Display for DiffRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)?;
        if self.left.is_known() || self.right.is_known() {
            write!(f, " [left: {}; right: {}]", self.left, self.right)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_without_locations() {
        let record = DiffRecord::new(
            PropertyPath::from_segments(["Namespace"]),
            "different values 'A' != 'B'",
            LocationPair::unknown(),
        );
        assert_eq!(record.to_string(), "Namespace: different values 'A' != 'B'");
    }

    #[test]
    fn display_with_locations() {
        let record = DiffRecord::new(
            PropertyPath::from_segments(["Elements:Person"]),
            "missing item with name Age on right",
            LocationPair::new(Location::known("left.xml (3, 4)"), Location::Unknown),
        );
        assert_eq!(
            record.to_string(),
            "Elements:Person: missing item with name Age on right [left: left.xml (3, 4); right: ]"
        );
        assert_eq!(record.locations().left, Location::known("left.xml (3, 4)"));
    }

    #[test]
    fn serde_shape() {
        let record = DiffRecord::new(PropertyPath::root() + "X", "m", LocationPair::unknown());
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["path"], serde_json::json!(["X"]));
        assert_eq!(value["message"], "m");
        assert_eq!(value["left"], "Unknown");
    }
}
