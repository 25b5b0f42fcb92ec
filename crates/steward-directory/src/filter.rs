//! Search filter expressions.
//!
//! A small filter tree the reconciliation core hands to [`Directory::search`]
//! implementations. Backends either translate the tree into their native
//! query syntax (an LDAP connector would render RFC 4515 strings) or evaluate
//! it in place via [`Filter::matches`].
//!
//! [`Directory::search`]: crate::directory::Directory::search

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::value::AttrValue;

/// A search filter expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Filter {
    /// Attribute equals value. Multi-valued attributes match when any
    /// element equals the value.
    Equals {
        /// Attribute name, matched exactly.
        attribute: String,
        /// Value to compare against.
        value: String,
    },
    /// Attribute is present with any value.
    Present {
        /// Attribute name, matched exactly.
        attribute: String,
    },
    /// All sub-filters match.
    And {
        /// The conjoined sub-filters.
        filters: Vec<Filter>,
    },
    /// At least one sub-filter matches.
    Or {
        /// The alternative sub-filters.
        filters: Vec<Filter>,
    },
    /// The sub-filter does not match.
    Not {
        /// The negated sub-filter.
        filter: Box<Filter>,
    },
}

impl Filter {
    /// Equality filter.
    pub fn eq(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Equals {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Presence filter.
    pub fn present(attribute: impl Into<String>) -> Self {
        Filter::Present {
            attribute: attribute.into(),
        }
    }

    /// Conjunction of filters.
    #[must_use]
    pub fn and(filters: Vec<Filter>) -> Self {
        Filter::And { filters }
    }

    /// Disjunction of filters.
    #[must_use]
    pub fn or(filters: Vec<Filter>) -> Self {
        Filter::Or { filters }
    }

    /// Negate this filter.
    #[must_use]
    pub fn negate(self) -> Self {
        Filter::Not {
            filter: Box::new(self),
        }
    }

    /// Combine with another filter using AND, flattening where possible.
    #[must_use]
    pub fn and_with(self, other: Filter) -> Self {
        match self {
            Filter::And { mut filters } => {
                filters.push(other);
                Filter::And { filters }
            }
            f => Filter::And {
                filters: vec![f, other],
            },
        }
    }

    /// Evaluate this filter against a record's attribute map.
    ///
    /// Attribute names and values compare exactly; case folding is a backend
    /// concern.
    #[must_use]
    pub fn matches(&self, attributes: &BTreeMap<String, AttrValue>) -> bool {
        match self {
            Filter::Equals { attribute, value } => attributes
                .get(attribute)
                .is_some_and(|v| v.contains(value)),
            Filter::Present { attribute } => attributes.contains_key(attribute),
            Filter::And { filters } => filters.iter().all(|f| f.matches(attributes)),
            Filter::Or { filters } => filters.iter().any(|f| f.matches(attributes)),
            Filter::Not { filter } => !filter.matches(attributes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> BTreeMap<String, AttrValue> {
        let mut attrs = BTreeMap::new();
        attrs.insert("username".to_string(), AttrValue::from("foo"));
        attrs.insert("mail".to_string(), AttrValue::list(["foo@example.org"]));
        attrs
    }

    #[test]
    fn test_eq_matches_text() {
        assert!(Filter::eq("username", "foo").matches(&record()));
        assert!(!Filter::eq("username", "bar").matches(&record()));
    }

    #[test]
    fn test_eq_matches_any_list_element() {
        assert!(Filter::eq("mail", "foo@example.org").matches(&record()));
        assert!(!Filter::eq("mail", "bar@example.org").matches(&record()));
    }

    #[test]
    fn test_present() {
        assert!(Filter::present("mail").matches(&record()));
        assert!(!Filter::present("phone").matches(&record()));
    }

    #[test]
    fn test_and_or_not() {
        let both = Filter::and(vec![
            Filter::eq("username", "foo"),
            Filter::present("mail"),
        ]);
        assert!(both.matches(&record()));

        let either = Filter::or(vec![
            Filter::eq("username", "bar"),
            Filter::present("mail"),
        ]);
        assert!(either.matches(&record()));

        assert!(!Filter::present("mail").negate().matches(&record()));
    }

    #[test]
    fn test_and_with_flattens() {
        let filter = Filter::eq("a", "1")
            .and_with(Filter::eq("b", "2"))
            .and_with(Filter::eq("c", "3"));
        match filter {
            Filter::And { filters } => assert_eq!(filters.len(), 3),
            other => panic!("expected And, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_and_matches_everything() {
        assert!(Filter::and(Vec::new()).matches(&record()));
        assert!(!Filter::or(Vec::new()).matches(&record()));
    }
}
