//! Record kind definitions
//!
//! Enums and types shared by directory port implementations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of directory record an operation targets.
///
/// Implementations map a kind to their native object class (for LDAP stores
/// typically `posixAccount` and `posixGroup`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// A person/user record
    User,
    /// A group record carrying a member list
    Group,
}

impl RecordKind {
    /// Get all supported record kinds.
    #[must_use]
    pub fn all() -> &'static [RecordKind] {
        &[RecordKind::User, RecordKind::Group]
    }

    /// Get the string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::User => "user",
            RecordKind::Group => "group",
        }
    }

    /// The attribute that names records of this kind.
    ///
    /// Existence probes and group lookups filter on this attribute.
    #[must_use]
    pub fn naming_attribute(&self) -> &'static str {
        match self {
            RecordKind::User => "username",
            RecordKind::Group => "name",
        }
    }

    /// The attribute implementations use as the leading RDN when composing
    /// the DN of a newly created record.
    #[must_use]
    pub fn rdn_attribute(&self) -> &'static str {
        match self {
            RecordKind::User => "uid",
            RecordKind::Group => "cn",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = ParseRecordKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(RecordKind::User),
            "group" => Ok(RecordKind::Group),
            _ => Err(ParseRecordKindError(s.to_string())),
        }
    }
}

/// Error parsing record kind from string.
#[derive(Debug, Clone)]
pub struct ParseRecordKindError(String);

impl fmt::Display for ParseRecordKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid record kind '{}', expected one of: user, group",
            self.0
        )
    }
}

impl std::error::Error for ParseRecordKindError {}
