//! Source locations attached to divergence records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Provenance of a locatable schema element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    /// A described source position, e.g. `people.csdl.xml (12, 5)`.
    Known(String),
    /// The element is locatable but carries no position.
    #[default]
    Unknown,
}

impl Location {
    /// Create a known location from any description.
    pub fn known(description: impl Into<String>) -> Self {
        Self::Known(description.into())
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(description) => f.write_str(description),
            Self::Unknown => Ok(()),
        }
    }
}

/// The left/right diagnostic context active when a divergence is recorded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationPair {
    pub left: Location,
    pub right: Location,
}

impl LocationPair {
    pub fn new(left: Location, right: Location) -> Self {
        Self { left, right }
    }

    /// `(Unknown, Unknown)`, used when no location scope is open.
    pub fn unknown() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_displays_empty() {
        assert_eq!(Location::Unknown.to_string(), "");
        assert_eq!(Location::known("a.xml (1, 2)").to_string(), "a.xml (1, 2)");
    }

    #[test]
    fn unknown_pair_is_default() {
        let pair = LocationPair::unknown();
        assert!(!pair.left.is_known());
        assert!(!pair.right.is_known());
        assert_eq!(pair, LocationPair::new(Location::Unknown, Location::Unknown));
    }
}
