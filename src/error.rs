use thiserror::Error;

/// Wizard-level errors using thiserror for structured error handling.
///
/// Validation failures are not errors of this kind: they are reported per field
/// in a [`crate::validator::ValidationErrorSet`] and never abort the wizard.

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("Step index {index} is out of range (wizard has {count} steps)")]
    StepOutOfRange { index: usize, count: usize },

    #[error("Cannot accept input while a step transition is in flight")]
    TransitionInFlight,

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field {field} does not belong to step {step}")]
    FieldNotInStep { field: String, step: usize },

    #[error("Field {field} must be set through the {expected} binding")]
    BindingMismatch {
        field: String,
        expected: &'static str,
    },
}

#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("Submission receiver is disconnected")]
    Disconnected,

    #[error("Failed to serialize booking record")]
    Serialize(#[source] serde_json::Error),

    #[error("Submission rejected: {0}")]
    Rejected(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Type alias for application Results using anyhow for context chaining
pub type AppResult<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = WizardError::StepOutOfRange { index: 7, count: 4 };
        assert_eq!(
            err.to_string(),
            "Step index 7 is out of range (wizard has 4 steps)"
        );

        let err = WizardError::UnknownField("nickname".to_string());
        assert_eq!(err.to_string(), "Unknown field: nickname");

        let err = WizardError::BindingMismatch {
            field: "dateRange".to_string(),
            expected: "controlled",
        };
        assert_eq!(
            err.to_string(),
            "Field dateRange must be set through the controlled binding"
        );
    }

    #[test]
    fn test_error_source_chain() {
        use std::io;

        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let config_err = ConfigError::LoadFailed {
            path: "/test/config.json".to_string(),
            source: Box::new(io_err),
        };

        assert!(config_err.source().is_some());
        assert_eq!(
            config_err.to_string(),
            "Failed to load configuration from /test/config.json"
        );
    }
}
