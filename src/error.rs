use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StagingError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Resource not found: {name}: {reason}")]
    ResourceNotFound { name: String, reason: String },

    #[error("Verification failed for {check}: expected {expected}, got {actual}")]
    Verification {
        check: String,
        expected: String,
        actual: String,
    },

    #[error("HTTP error: {0}")]
    Http(String),
}

pub type Result<T> = std::result::Result<T, StagingError>;

impl StagingError {
    pub fn verification(
        check: impl Into<String>,
        expected: impl ToString,
        actual: impl ToString,
    ) -> Self {
        StagingError::Verification {
            check: check.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    pub fn resource_not_found(name: impl Into<String>, reason: impl ToString) -> Self {
        StagingError::ResourceNotFound {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the error came from a response check rather than setup or transport.
    pub fn is_verification(&self) -> bool {
        matches!(self, StagingError::Verification { .. })
    }
}
