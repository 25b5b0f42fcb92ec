//! Directory error types
//!
//! Error definitions with transient/permanent classification for retry logic.

use thiserror::Error;

use crate::types::RecordKind;

/// Error that can occur during directory operations.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// No record lives at the given DN.
    #[error("record not found: {dn}")]
    NotFound { dn: String },

    /// A record already occupies the given DN (create conflict).
    #[error("record already exists: {dn}")]
    AlreadyExists { dn: String },

    /// The schema of the record kind does not carry the attribute.
    #[error("attribute '{attribute}' not part of the {kind} schema")]
    UnknownAttribute {
        kind: RecordKind,
        attribute: String,
    },

    /// The value does not fit the attribute it was staged for.
    #[error("invalid value for attribute '{attribute}': {message}")]
    InvalidValue { attribute: String, message: String },

    /// Failed to reach the backing directory (usually transient).
    #[error("connection failed: {message}")]
    ConnectionFailed {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The directory rejected or could not complete an operation.
    #[error("operation failed: {message}")]
    OperationFailed {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl DirectoryError {
    /// Check if this error is transient and the operation should be retried.
    ///
    /// Transient errors are those caused by temporary conditions that may
    /// resolve themselves, such as network issues.
    pub fn is_transient(&self) -> bool {
        matches!(self, DirectoryError::ConnectionFailed { .. })
    }

    /// Check if this error is permanent and retry won't help.
    pub fn is_permanent(&self) -> bool {
        !self.is_transient()
    }

    /// Check if this error reports a missing record.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DirectoryError::NotFound { .. })
    }

    /// Get an error code for classification.
    pub fn error_code(&self) -> &'static str {
        match self {
            DirectoryError::NotFound { .. } => "NOT_FOUND",
            DirectoryError::AlreadyExists { .. } => "ALREADY_EXISTS",
            DirectoryError::UnknownAttribute { .. } => "UNKNOWN_ATTRIBUTE",
            DirectoryError::InvalidValue { .. } => "INVALID_VALUE",
            DirectoryError::ConnectionFailed { .. } => "CONNECTION_FAILED",
            DirectoryError::OperationFailed { .. } => "OPERATION_FAILED",
        }
    }

    // Convenience constructors

    /// Create a not found error.
    pub fn not_found(dn: impl Into<String>) -> Self {
        DirectoryError::NotFound { dn: dn.into() }
    }

    /// Create an already exists error.
    pub fn already_exists(dn: impl Into<String>) -> Self {
        DirectoryError::AlreadyExists { dn: dn.into() }
    }

    /// Create an unknown attribute error.
    pub fn unknown_attribute(kind: RecordKind, attribute: impl Into<String>) -> Self {
        DirectoryError::UnknownAttribute {
            kind,
            attribute: attribute.into(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        DirectoryError::InvalidValue {
            attribute: attribute.into(),
            message: message.into(),
        }
    }

    /// Create a connection failed error.
    pub fn connection_failed(message: impl Into<String>) -> Self {
        DirectoryError::ConnectionFailed {
            message: message.into(),
            source: None,
        }
    }

    /// Create a connection failed error with source.
    pub fn connection_failed_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        DirectoryError::ConnectionFailed {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an operation failed error.
    pub fn operation_failed(message: impl Into<String>) -> Self {
        DirectoryError::OperationFailed {
            message: message.into(),
            source: None,
        }
    }

    /// Create an operation failed error with source.
    pub fn operation_failed_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        DirectoryError::OperationFailed {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_errors() {
        let err = DirectoryError::connection_failed("refused");
        assert!(err.is_transient());
        assert!(!err.is_permanent());
    }

    #[test]
    fn test_permanent_errors() {
        let permanent_errors = vec![
            DirectoryError::not_found("uid=jsmith,ou=people,dc=example,dc=org"),
            DirectoryError::already_exists("uid=jsmith,ou=people,dc=example,dc=org"),
            DirectoryError::unknown_attribute(RecordKind::User, "shoeSize"),
            DirectoryError::invalid_value("description", "expected a single value"),
            DirectoryError::operation_failed("rejected"),
        ];

        for err in permanent_errors {
            assert!(
                err.is_permanent(),
                "Expected {} to be permanent",
                err.error_code()
            );
            assert!(
                !err.is_transient(),
                "Expected {} to not be transient",
                err.error_code()
            );
        }
    }

    #[test]
    fn test_not_found_classification() {
        assert!(DirectoryError::not_found("cn=missing").is_not_found());
        assert!(!DirectoryError::operation_failed("other").is_not_found());
    }

    #[test]
    fn test_error_display() {
        let err = DirectoryError::not_found("uid=jsmith,ou=people,dc=example,dc=org");
        assert_eq!(
            err.to_string(),
            "record not found: uid=jsmith,ou=people,dc=example,dc=org"
        );

        let err = DirectoryError::unknown_attribute(RecordKind::Group, "mail");
        assert_eq!(
            err.to_string(),
            "attribute 'mail' not part of the group schema"
        );
    }

    #[test]
    fn test_error_with_source() {
        let source_err = std::io::Error::new(std::io::ErrorKind::Other, "underlying error");
        let err = DirectoryError::connection_failed_with_source("failed", source_err);

        assert!(err.is_transient());
        if let DirectoryError::ConnectionFailed { source, .. } = &err {
            assert!(source.is_some());
        } else {
            panic!("Expected ConnectionFailed variant");
        }
    }
}
