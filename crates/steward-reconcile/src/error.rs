//! Reconciliation error types.
//!
//! Every failure names the identity being reconciled and the phase that
//! failed, and keeps the underlying [`DirectoryError`] as its source so
//! callers can classify and retry.

use thiserror::Error;

use steward_directory::error::DirectoryError;

/// Errors that can occur while reconciling one identity.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Probing the directory for the identity failed.
    #[error("Lookup failed for identity '{identity}': {source}")]
    Lookup {
        identity: String,
        #[source]
        source: DirectoryError,
    },

    /// Staging or committing attribute values failed.
    #[error("Attribute reconciliation failed for identity '{identity}': {source}")]
    Attributes {
        identity: String,
        #[source]
        source: DirectoryError,
    },

    /// Updating a group's member list failed.
    #[error("Membership update of group '{group}' failed for identity '{identity}': {source}")]
    Membership {
        identity: String,
        group: String,
        #[source]
        source: DirectoryError,
    },

    /// Deleting the record of an absent identity failed.
    #[error("Removal failed for identity '{identity}': {source}")]
    Remove {
        identity: String,
        #[source]
        source: DirectoryError,
    },
}

impl ReconcileError {
    /// Create a lookup error.
    pub fn lookup(identity: impl Into<String>, source: DirectoryError) -> Self {
        Self::Lookup {
            identity: identity.into(),
            source,
        }
    }

    /// Create an attribute reconciliation error.
    pub fn attributes(identity: impl Into<String>, source: DirectoryError) -> Self {
        Self::Attributes {
            identity: identity.into(),
            source,
        }
    }

    /// Create a membership error.
    pub fn membership(
        identity: impl Into<String>,
        group: impl Into<String>,
        source: DirectoryError,
    ) -> Self {
        Self::Membership {
            identity: identity.into(),
            group: group.into(),
            source,
        }
    }

    /// Create a removal error.
    pub fn remove(identity: impl Into<String>, source: DirectoryError) -> Self {
        Self::Remove {
            identity: identity.into(),
            source,
        }
    }

    /// The identity whose reconciliation failed.
    #[must_use]
    pub fn identity(&self) -> &str {
        match self {
            Self::Lookup { identity, .. }
            | Self::Attributes { identity, .. }
            | Self::Membership { identity, .. }
            | Self::Remove { identity, .. } => identity,
        }
    }

    /// The phase that failed, for classification.
    #[must_use]
    pub fn phase(&self) -> &'static str {
        match self {
            Self::Lookup { .. } => "lookup",
            Self::Attributes { .. } => "attributes",
            Self::Membership { .. } => "membership",
            Self::Remove { .. } => "remove",
        }
    }

    /// Check if the underlying directory error is transient and the pass
    /// should be retried.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Lookup { source, .. }
            | Self::Attributes { source, .. }
            | Self::Membership { source, .. }
            | Self::Remove { source, .. } => source.is_transient(),
        }
    }
}

/// Result type for reconciliation operations.
pub type ReconcileResult<T> = Result<T, ReconcileError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = ReconcileError::membership(
            "jsmith",
            "admins",
            DirectoryError::not_found("cn=admins,ou=groups,dc=example,dc=org"),
        );
        let message = err.to_string();
        assert!(message.contains("jsmith"));
        assert!(message.contains("admins"));
    }

    #[test]
    fn test_phase_and_identity() {
        let err = ReconcileError::lookup("jsmith", DirectoryError::connection_failed("refused"));
        assert_eq!(err.phase(), "lookup");
        assert_eq!(err.identity(), "jsmith");

        let err = ReconcileError::remove("jsmith", DirectoryError::operation_failed("rejected"));
        assert_eq!(err.phase(), "remove");
    }

    #[test]
    fn test_source_is_preserved() {
        let err = ReconcileError::attributes(
            "jsmith",
            DirectoryError::invalid_value("description", "expected a single value"),
        );
        let source = err.source().unwrap();
        assert!(source.to_string().contains("description"));
    }

    #[test]
    fn test_is_transient_follows_source() {
        let transient =
            ReconcileError::lookup("jsmith", DirectoryError::connection_failed("refused"));
        assert!(transient.is_transient());

        let permanent = ReconcileError::lookup("jsmith", DirectoryError::not_found("uid=jsmith"));
        assert!(!permanent.is_transient());
    }
}
