use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignalError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Unknown signal: {name}")]
    UnknownSignalError { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    System,
    Configuration,
    Serialization,
    Signal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SignalError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SignalError::IoError(_) => ErrorCategory::System,
            SignalError::SerializationError(_) => ErrorCategory::Serialization,
            SignalError::ConfigError { .. }
            | SignalError::ConfigValidationError { .. }
            | SignalError::InvalidConfigValueError { .. }
            | SignalError::MissingConfigError { .. } => ErrorCategory::Configuration,
            SignalError::UnknownSignalError { .. } => ErrorCategory::Signal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SignalError::IoError(e) => match e.kind() {
                std::io::ErrorKind::Interrupted | std::io::ErrorKind::WouldBlock => {
                    ErrorSeverity::Medium
                }
                _ => ErrorSeverity::Critical,
            },
            SignalError::SerializationError(_) => ErrorSeverity::Medium,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SignalError::IoError(e) => match e.kind() {
                std::io::ErrorKind::NotFound => {
                    "Check that the file or process exists".to_string()
                }
                std::io::ErrorKind::PermissionDenied => {
                    "Check permissions; sending signals to another user's process requires privileges"
                        .to_string()
                }
                _ => "Check system resources (open file descriptors) and retry".to_string(),
            },
            SignalError::SerializationError(_) => {
                "Check that the output stream is writable".to_string()
            }
            SignalError::ConfigError { .. } | SignalError::ConfigValidationError { .. } => {
                "Check the configuration file syntax".to_string()
            }
            SignalError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the configuration", field)
            }
            SignalError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration", field)
            }
            SignalError::UnknownSignalError { .. } => {
                "Use one of INT, QUIT, TERM, USR1, USR2".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SignalError::IoError(e) => format!("System call failed: {}", e),
            SignalError::SerializationError(e) => format!("Could not write event: {}", e),
            SignalError::ConfigError { message } => format!("Configuration problem: {}", message),
            SignalError::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            SignalError::InvalidConfigValueError { field, value, reason } => {
                format!("'{}' is not a valid value for '{}': {}", value, field, reason)
            }
            SignalError::MissingConfigError { field } => {
                format!("Configuration field '{}' is required", field)
            }
            SignalError::UnknownSignalError { name } => {
                format!("'{}' is not a supported signal", name)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SignalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let err = SignalError::UnknownSignalError {
            name: "HUP".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Signal);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("HUP"));

        let err = SignalError::from(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.recovery_suggestion().contains("permissions"));
    }

    #[test]
    fn test_config_errors_name_the_field() {
        let err = SignalError::MissingConfigError {
            field: "watch.signals".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.to_string().contains("watch.signals"));
        assert!(err.recovery_suggestion().contains("watch.signals"));
    }
}
