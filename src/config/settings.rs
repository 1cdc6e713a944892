//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ConfigError;

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Default pool directory, used when none is given on the command line.
    #[serde(default)]
    pub pool_path: Option<PathBuf>,

    /// Record naming and tagging.
    #[serde(default)]
    pub records: RecordConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.records.manufacturer.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "Manufacturer must not be empty".to_string(),
            });
        }

        if self.records.entity_prefix.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "Entity prefix must not be empty".to_string(),
            });
        }

        if self.records.tags.iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigError::ValidationError {
                message: "Tags must not be empty strings".to_string(),
            });
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            });
        }
        Ok(())
    }
}

/// Naming and tagging applied to generated records.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordConfig {
    /// Manufacturer written to unit, entity and part.
    /// Default: "STMicroelectronics"
    #[serde(default = "default_manufacturer")]
    pub manufacturer: String,

    /// Reference designator prefix of the entity.
    #[serde(default = "default_entity_prefix")]
    pub entity_prefix: String,

    /// Tags written to entity and part.
    #[serde(default = "default_tags")]
    pub tags: Vec<String>,
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self {
            manufacturer: default_manufacturer(),
            entity_prefix: default_entity_prefix(),
            tags: default_tags(),
        }
    }
}

fn default_manufacturer() -> String {
    "STMicroelectronics".to_string()
}

fn default_entity_prefix() -> String {
    "U".to_string()
}

fn default_tags() -> Vec<String> {
    vec!["mcu".to_string()]
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let json = r"{}";
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert!(config.pool_path.is_none());
    }

    #[test]
    fn parse_full_config() {
        let json = r#"{
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "_comment": "Test config",
            "pool_path": "/path/to/pool",
            "records": {
                "manufacturer": "ST",
                "entity_prefix": "IC",
                "tags": ["mcu", "arm"]
            },
            "logging": {
                "level": "debug"
            }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.pool_path, Some(PathBuf::from("/path/to/pool")));
        assert_eq!(config.records.manufacturer, "ST");
        assert_eq!(config.records.entity_prefix, "IC");
        assert_eq!(config.records.tags, ["mcu", "arm"]);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn record_config_defaults() {
        let config = RecordConfig::default();
        assert_eq!(config.manufacturer, "STMicroelectronics");
        assert_eq!(config.entity_prefix, "U");
        assert_eq!(config.tags, ["mcu"]);
    }

    #[test]
    fn logging_config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "warn");
    }

    #[test]
    fn reject_empty_prefix() {
        let json = r#"{ "records": { "entity_prefix": " " } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_empty_tag() {
        let json = r#"{ "records": { "tags": ["mcu", ""] } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_invalid_log_level() {
        let json = r#"{ "logging": { "level": "loud" } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_unknown_fields() {
        let json = r#"{
            "unknown_field": "value"
        }"#;

        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
