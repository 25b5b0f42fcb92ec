//! Attribute value representation.
//!
//! Directory attributes take exactly two shapes here: a single text value or
//! a whole list of text values. Multi-valued attributes are always staged and
//! written as complete lists; there is no per-element patching.

use serde::{Deserialize, Serialize};

/// A directory attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// A single text value.
    Text(String),
    /// A list of text values, replaced as a whole on write.
    List(Vec<String>),
}

impl AttrValue {
    /// Build a list value from anything iterable.
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AttrValue::List(values.into_iter().map(Into::into).collect())
    }

    /// View as a single text value. Lists yield `None`.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s.as_str()),
            AttrValue::List(_) => None,
        }
    }

    /// Consume into a list of values; a text value becomes a one-element list.
    #[must_use]
    pub fn into_list(self) -> Vec<String> {
        match self {
            AttrValue::Text(s) => vec![s],
            AttrValue::List(values) => values,
        }
    }

    /// Check whether a value is present, treating lists as sets.
    #[must_use]
    pub fn contains(&self, candidate: &str) -> bool {
        match self {
            AttrValue::Text(s) => s == candidate,
            AttrValue::List(values) => values.iter().any(|v| v == candidate),
        }
    }

    /// Check for the empty text value or the empty list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            AttrValue::Text(s) => s.is_empty(),
            AttrValue::List(values) => values.is_empty(),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(values: Vec<String>) -> Self {
        AttrValue::List(values)
    }
}

impl From<Vec<&str>> for AttrValue {
    fn from(values: Vec<&str>) -> Self {
        AttrValue::list(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_impls() {
        assert_eq!(AttrValue::from("foo"), AttrValue::Text("foo".to_string()));
        assert_eq!(
            AttrValue::from(vec!["a", "b"]),
            AttrValue::List(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_as_text() {
        assert_eq!(AttrValue::from("foo").as_text(), Some("foo"));
        assert_eq!(AttrValue::from(vec!["foo"]).as_text(), None);
    }

    #[test]
    fn test_into_list_promotes_text() {
        assert_eq!(AttrValue::from("foo").into_list(), vec!["foo".to_string()]);
        assert_eq!(
            AttrValue::list(["a", "b"]).into_list(),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_contains() {
        let value = AttrValue::list(["alice", "bob"]);
        assert!(value.contains("alice"));
        assert!(!value.contains("carol"));
        assert!(AttrValue::from("alice").contains("alice"));
    }

    #[test]
    fn test_is_empty() {
        assert!(AttrValue::Text(String::new()).is_empty());
        assert!(AttrValue::List(Vec::new()).is_empty());
        assert!(!AttrValue::from("x").is_empty());
    }

    #[test]
    fn test_untagged_serde() {
        let text: AttrValue = serde_json::from_str("\"foo\"").unwrap();
        assert_eq!(text, AttrValue::from("foo"));

        let list: AttrValue = serde_json::from_str("[\"a\",\"b\"]").unwrap();
        assert_eq!(list, AttrValue::from(vec!["a", "b"]));

        assert_eq!(serde_json::to_string(&text).unwrap(), "\"foo\"");
        assert_eq!(serde_json::to_string(&list).unwrap(), "[\"a\",\"b\"]");
    }
}
