//! Configuration for sampling, classification and storage.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use swatch_match::MatchConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = MatchConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or use defaults
//! let config = MatchConfig::default();
//! # Ok::<(), swatch_match::MatchError>(())
//! ```
//!
//! Sections missing from a file take their default values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::comparison::{ComparisonClassifier, SeparationThresholds};
use crate::constants::selection;
use crate::{MatchError, Result};

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Separation label ladder
    pub separation_thresholds: SeparationThresholds,

    /// Minimum accepted selection size
    pub selection: SelectionConfig,

    /// Record storage location
    pub storage: StorageConfig,
}

/// Selection size limits, in image pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub min_width: u32,
    pub min_height: u32,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            min_width: selection::MIN_WIDTH,
            min_height: selection::MIN_HEIGHT,
        }
    }
}

/// Where saved comparisons live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub records_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            records_path: PathBuf::from("comparisons.json"),
        }
    }
}

impl MatchConfig {
    /// Check thresholds ascend and minimum selection sizes are non-zero
    pub fn validate(&self) -> Result<()> {
        self.separation_thresholds
            .validate()
            .map_err(|e| MatchError::ConfigError {
                message: e.to_string(),
            })?;

        if self.selection.min_width == 0 || self.selection.min_height == 0 {
            return Err(MatchError::ConfigError {
                message: format!(
                    "minimum selection must be at least 1x1, got {}x{}",
                    self.selection.min_width, self.selection.min_height
                ),
            });
        }
        Ok(())
    }

    /// Classifier using this configuration's label ladder
    pub fn classifier(&self) -> Result<ComparisonClassifier> {
        ComparisonClassifier::with_thresholds(self.separation_thresholds)
    }

    /// Load and validate configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MatchError::ConfigError {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| MatchError::ConfigError {
            message: format!("failed to write {}: {}", path.display(), e),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MatchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.separation_thresholds.weak, 5.0);
        assert_eq!(config.selection.min_width, 2);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: MatchConfig =
            serde_json::from_str(r#"{"selection": {"min_width": 8}}"#).unwrap();
        assert_eq!(config.selection.min_width, 8);
        assert_eq!(config.selection.min_height, 2);
        assert_eq!(config.separation_thresholds, SeparationThresholds::default());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = MatchConfig::default();
        config.selection.min_height = 0;
        assert!(matches!(config.validate(), Err(MatchError::ConfigError { .. })));

        let mut config = MatchConfig::default();
        config.separation_thresholds.moderate = 1.0;
        assert!(matches!(config.validate(), Err(MatchError::ConfigError { .. })));
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = MatchConfig::default();
        config.storage.records_path = PathBuf::from("/tmp/records.json");
        config.to_json_file(&path).unwrap();

        assert_eq!(MatchConfig::from_json_file(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let err = MatchConfig::from_json_file(Path::new("no/such/config.json")).unwrap_err();
        assert!(matches!(err, MatchError::ConfigError { .. }));
    }
}
