//! Error types for Murmur
//!
//! Validation failures are never errors: they are data on the schema.
//! The types here cover misconfiguration and malformed input that is
//! rejected at the boundary.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MurmurError>;

#[derive(Error, Debug)]
pub enum MurmurError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Event error: {0}")]
    Event(#[from] EventError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl MurmurError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            MurmurError::InvalidInput(_) => 3,
            MurmurError::Event(_) => 3,
            MurmurError::Schema(_) => 1,
            MurmurError::Config(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}

/// Schema definition and lookup errors
///
/// Everything except `UnknownField` is raised while the schema is being
/// built, never while values are evaluated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Field name cannot be empty")]
    EmptyFieldName,

    #[error("Field '{0}' is declared more than once")]
    DuplicateField(String),

    #[error("Field '{field}' has min length {min} greater than max length {max}")]
    ConflictingBounds { field: String, min: usize, max: usize },

    #[error("Field '{field}' has an invalid rule: {reason}")]
    InvalidRule { field: String, reason: String },

    #[error("Unknown field: {0}")]
    UnknownField(String),
}

/// Errors raised when converting raw UI events into typed inputs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EventError {
    #[error("Coordinate '{axis}' is not a finite number: {value}")]
    NonFinite { axis: &'static str, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_invalid_input() {
        let error = MurmurError::InvalidInput("Empty title".to_string());
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn test_exit_code_config_error() {
        let config_error = ConfigError::MissingField("locale.language".to_string());
        let error = MurmurError::Config(config_error);
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_schema_error() {
        let error = MurmurError::Schema(SchemaError::DuplicateField("title".to_string()));
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_event_error() {
        let error = MurmurError::Event(EventError::NonFinite {
            axis: "absolute_y",
            value: f64::NAN,
        });
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn test_error_message_formatting_invalid_input() {
        let error = MurmurError::InvalidInput("Title cannot be empty".to_string());
        assert_eq!(format!("{}", error), "Invalid input: Title cannot be empty");
    }

    #[test]
    fn test_error_message_formatting_config() {
        let config_error = ConfigError::MissingField("composer.title_max".to_string());
        let error = MurmurError::Config(config_error);
        assert_eq!(
            format!("{}", error),
            "Configuration error: Missing required field: composer.title_max"
        );
    }

    #[test]
    fn test_error_message_formatting_bounds() {
        let error = SchemaError::ConflictingBounds {
            field: "title".to_string(),
            min: 10,
            max: 5,
        };
        assert_eq!(
            format!("{}", error),
            "Field 'title' has min length 10 greater than max length 5"
        );
    }

    #[test]
    fn test_error_conversion_from_schema_error() {
        let murmur_error: MurmurError = SchemaError::UnknownField("bio".to_string()).into();

        match murmur_error {
            MurmurError::Schema(SchemaError::UnknownField(name)) => assert_eq!(name, "bio"),
            _ => panic!("Expected MurmurError::Schema"),
        }
    }

    #[test]
    fn test_config_error_read_error_formatting() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let config_error = ConfigError::ReadError(io_error);
        assert!(format!("{}", config_error).contains("Failed to read config file"));
    }
}
