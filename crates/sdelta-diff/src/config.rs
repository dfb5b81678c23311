use serde::{Deserialize, Serialize};

use crate::error::{DiffError, DiffResult};

/// Options for one schema comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Report a single record when two ordered sequences differ in length.
    /// When `false`, trailing elements of the longer sequence are ignored.
    pub report_length_mismatch: bool,
    /// Descend into referenced elements (base types, property types,
    /// navigation targets). When `false`, references are compared by their
    /// display path only.
    pub follow_references: bool,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            report_length_mismatch: true,
            follow_references: true,
        }
    }
}

impl CompareConfig {
    /// Compare references by display path instead of descending into them.
    pub fn shallow() -> Self {
        Self {
            follow_references: false,
            ..Default::default()
        }
    }

    /// Parse from TOML. Missing keys take their default values.
    pub fn from_toml_str(source: &str) -> DiffResult<Self> {
        toml::from_str(source).map_err(|e| DiffError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CompareConfig::default();
        assert!(config.report_length_mismatch);
        assert!(config.follow_references);
        assert!(!CompareConfig::shallow().follow_references);
    }

    #[test]
    fn toml_partial_override() {
        let config = CompareConfig::from_toml_str("report_length_mismatch = false").unwrap();
        assert!(!config.report_length_mismatch);
        assert!(config.follow_references);
    }

    #[test]
    fn toml_empty_is_default() {
        assert_eq!(CompareConfig::from_toml_str("").unwrap(), CompareConfig::default());
    }

    #[test]
    fn toml_type_error_is_config_error() {
        let err = CompareConfig::from_toml_str("follow_references = 3").unwrap_err();
        assert!(matches!(err, DiffError::Config(_)));
    }
}
