//! Configuration schema (semverdiff.toml)

use crate::options::{AttributeCompareMode, ComparerOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Attribute comparison settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AttributeConfig {
    /// Diffing mode: skip, byexpression or all
    #[serde(default)]
    pub mode: AttributeCompareMode,

    /// Name patterns (regex) for `byexpression` mode
    #[serde(default)]
    pub patterns: Vec<String>,
}

/// Tool configuration, loaded from semverdiff.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Attribute comparison settings
    #[serde(default)]
    pub attributes: AttributeConfig,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Build comparer options from this configuration
    pub fn comparer_options(&self) -> ComparerOptions {
        ComparerOptions {
            compare_attributes: self.attributes.mode,
            attribute_names_to_compare: self.attributes.patterns.clone(),
            ..ComparerOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config: Config = toml::from_str(
            r#"
            [attributes]
            mode = "byexpression"
            patterns = ["Obsolete", "Serializable"]
            "#,
        )
        .unwrap();

        assert_eq!(config.attributes.mode, AttributeCompareMode::ByExpression);
        assert_eq!(config.attributes.patterns.len(), 2);

        let options = config.comparer_options();
        assert_eq!(options.compare_attributes, AttributeCompareMode::ByExpression);
        assert_eq!(options.attribute_names_to_compare, vec!["Obsolete", "Serializable"]);
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.attributes.mode, AttributeCompareMode::Skip);
        assert!(config.attributes.patterns.is_empty());
    }
}
