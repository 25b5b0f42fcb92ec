//! Distinguished names.
//!
//! A [`Dn`] is an opaque, already-composed distinguished name. Components
//! are only ever assembled through [`Dn::compose`], which escapes the
//! attribute value per RFC 4514 so that user-supplied names cannot break
//! out of their container.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A distinguished name identifying a record in the directory tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dn(String);

impl Dn {
    /// Wraps an already-composed distinguished name.
    pub fn new(dn: impl Into<String>) -> Self {
        Self(dn.into())
    }

    /// Composes a child DN from an RDN attribute, a raw value and the
    /// parent container. The value is escaped per RFC 4514.
    #[must_use]
    pub fn compose(attribute: &str, value: &str, parent: &Dn) -> Self {
        let escaped = escape_value(value);
        if parent.0.is_empty() {
            Self(format!("{attribute}={escaped}"))
        } else {
            Self(format!("{attribute}={escaped},{}", parent.0))
        }
    }

    /// The DN as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Dn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Dn {
    fn from(dn: String) -> Self {
        Self(dn)
    }
}

impl From<&str> for Dn {
    fn from(dn: &str) -> Self {
        Self(dn.to_string())
    }
}

impl From<Dn> for String {
    fn from(dn: Dn) -> Self {
        dn.0
    }
}

impl AsRef<str> for Dn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Escapes an attribute value for use in a DN per RFC 4514.
///
/// This prevents injection through record names: a value like
/// `foo,ou=elsewhere` must name a single record, not relocate it.
#[must_use]
pub fn escape_value(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    let last = value.chars().count() - 1;
    let mut result = String::with_capacity(value.len() * 2);

    for (i, ch) in value.chars().enumerate() {
        match ch {
            // Always escaped, anywhere in the value.
            ',' | '+' | '"' | '\\' | '<' | '>' | ';' | '=' => {
                result.push('\\');
                result.push(ch);
            }
            // NUL is hex-escaped.
            '\0' => {
                result.push_str("\\00");
            }
            // Space only needs escaping at the ends.
            ' ' if i == 0 || i == last => {
                result.push_str("\\20");
            }
            // Hash only at the start.
            '#' if i == 0 => {
                result.push_str("\\23");
            }
            _ => {
                result.push(ch);
            }
        }
    }

    result
}
