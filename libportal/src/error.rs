//! Error types for the portal

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PortalError>;

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Async runtime unavailable: {0}")]
    Runtime(String),
}

impl PortalError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            PortalError::InvalidInput(_) => 3,
            PortalError::Validation(_) => 3,
            PortalError::Config(_) => 1,
            PortalError::Runtime(_) => 1,
        }
    }
}

/// A required form field was empty or out of bounds.
///
/// Recovered by the form layer: it shows the message inline and leaves
/// the underlying state untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required")]
    EmptyName,

    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("Message is too long ({len} characters, maximum is {max})")]
    MessageTooLong { len: usize, max: usize },

    #[error("Please enter a {0}")]
    MissingField(&'static str),

    #[error("{0} is required")]
    Required(&'static str),

    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    #[error("Please confirm your new password")]
    MissingConfirmation,

    #[error("Passwords do not match")]
    PasswordMismatch,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid duration '{value}': {reason}")]
    InvalidDuration { value: String, reason: String },

    #[error("Missing required field: {0}")]
    MissingField(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_invalid_input() {
        let error = PortalError::InvalidInput("Unknown command".to_string());
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn test_exit_code_validation_error() {
        let error = PortalError::Validation(ValidationError::EmptyName);
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn test_exit_code_config_error() {
        let config_error = ConfigError::MissingField("config directory".to_string());
        let error = PortalError::Config(config_error);
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_error_message_formatting_validation() {
        let error = PortalError::Validation(ValidationError::EmptyMessage);
        assert_eq!(error.to_string(), "Validation failed: Message cannot be empty");
    }

    #[test]
    fn test_error_message_formatting_missing_field() {
        let error = ValidationError::MissingField("teacher name");
        assert_eq!(error.to_string(), "Please enter a teacher name");
    }

    #[test]
    fn test_error_message_formatting_too_long() {
        let error = ValidationError::MessageTooLong { len: 12, max: 10 };
        assert_eq!(
            error.to_string(),
            "Message is too long (12 characters, maximum is 10)"
        );
    }

    #[test]
    fn test_error_message_formatting_config() {
        let error = PortalError::Config(ConfigError::InvalidDuration {
            value: "soon".to_string(),
            reason: "expected number at 0".to_string(),
        });
        assert_eq!(
            error.to_string(),
            "Configuration error: Invalid duration 'soon': expected number at 0"
        );
    }

    #[test]
    fn test_error_conversion_from_validation_error() {
        let portal_error: PortalError = ValidationError::EmptyName.into();
        assert!(matches!(
            portal_error,
            PortalError::Validation(ValidationError::EmptyName)
        ));
    }

    #[test]
    fn test_error_message_formatting_settings_forms() {
        assert_eq!(
            ValidationError::Required("Subject").to_string(),
            "Subject is required"
        );
        assert_eq!(
            ValidationError::TooShort {
                field: "Password",
                min: 8
            }
            .to_string(),
            "Password must be at least 8 characters"
        );
        assert_eq!(
            ValidationError::PasswordMismatch.to_string(),
            "Passwords do not match"
        );
    }
}
