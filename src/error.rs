//! Error types for mcu-pool-import configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file: {path}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path where the configuration file was expected.
        path: PathBuf,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation failure.
        message: String,
    },

    /// A required run option was not supplied and could not be prompted for.
    #[error("missing required option '{option}' (pass --{flag} or set {env_var})")]
    MissingOption {
        /// Option name.
        option: &'static str,
        /// Command line flag.
        flag: &'static str,
        /// Environment variable.
        env_var: &'static str,
    },

    /// Interactive prompt failed or was cancelled.
    #[error("failed to read '{option}' from prompt")]
    Prompt {
        /// Option being prompted for.
        option: &'static str,
        /// The underlying prompt error.
        #[source]
        source: inquire::InquireError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let error = ConfigError::NotFound {
            path: PathBuf::from("/path/to/config.json"),
        };
        let msg = error.to_string();
        assert!(msg.contains("not found"));
        assert!(msg.contains("config.json"));
    }

    #[test]
    fn validation_error_display() {
        let error = ConfigError::ValidationError {
            message: "invalid setting".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("invalid setting"));
    }

    #[test]
    fn missing_option_names_flag_and_env() {
        let error = ConfigError::MissingOption {
            option: "package path",
            flag: "package",
            env_var: "MCU_IMPORT_PACKAGE",
        };
        let msg = error.to_string();
        assert!(msg.contains("--package"));
        assert!(msg.contains("MCU_IMPORT_PACKAGE"));
    }
}
