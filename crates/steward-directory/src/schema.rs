//! Record schemas
//!
//! The explicitly enumerated attribute registry a record kind supports.
//! Reconciliation never discovers attributes reflectively; it walks the
//! registry of the record it holds and asks capability questions through
//! the flags declared here.

use serde::{Deserialize, Serialize};

use crate::types::RecordKind;

/// An attribute in a record schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaAttribute {
    /// Attribute name as the directory exposes it.
    pub name: String,

    /// Whether this attribute can have multiple values.
    #[serde(default)]
    pub multi_valued: bool,

    /// Whether this attribute holds secret material. Secret attributes are
    /// staged only through the secret comparison path and never appear in
    /// logs or unredacted diffs.
    #[serde(default)]
    pub secret: bool,

    /// Whether this attribute is the membership list of its record kind
    /// (group names on a user, member DNs on a group).
    #[serde(default)]
    pub member_list: bool,
}

impl SchemaAttribute {
    /// Create a new single-valued attribute.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            multi_valued: false,
            secret: false,
            member_list: false,
        }
    }

    /// Mark this attribute as multi-valued.
    #[must_use]
    pub fn multi_valued(mut self) -> Self {
        self.multi_valued = true;
        self
    }

    /// Mark this attribute as secret (e.g. passwords).
    #[must_use]
    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    /// Mark this attribute as the membership list.
    #[must_use]
    pub fn member_list(mut self) -> Self {
        self.member_list = true;
        self.multi_valued = true;
        self
    }
}

/// The attribute registry for one record kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSchema {
    /// The record kind this registry describes.
    pub kind: RecordKind,

    /// Attributes records of this kind support.
    pub attributes: Vec<SchemaAttribute>,
}

impl RecordSchema {
    /// Create an empty registry for a kind.
    #[must_use]
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            attributes: Vec::new(),
        }
    }

    /// Add an attribute using builder pattern.
    #[must_use]
    pub fn with_attribute(mut self, attribute: SchemaAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Find an attribute by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SchemaAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Check if an attribute exists.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate attribute names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.name.as_str())
    }

    /// The secret attribute of this kind, if it declares one.
    #[must_use]
    pub fn secret_attribute(&self) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.secret)
            .map(|a| a.name.as_str())
    }

    /// The membership-list attribute of this kind, if it declares one.
    #[must_use]
    pub fn member_list_attribute(&self) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.member_list)
            .map(|a| a.name.as_str())
    }

    /// Reference registry for POSIX-style user records.
    ///
    /// Backends with richer schemas supply their own registry; this one
    /// covers the attributes the reconciliation core itself knows about.
    #[must_use]
    pub fn posix_user() -> Self {
        Self::new(RecordKind::User)
            .with_attribute(SchemaAttribute::new("username"))
            .with_attribute(SchemaAttribute::new("firstname"))
            .with_attribute(SchemaAttribute::new("lastname"))
            .with_attribute(SchemaAttribute::new("displayName"))
            .with_attribute(SchemaAttribute::new("description"))
            .with_attribute(SchemaAttribute::new("title"))
            .with_attribute(SchemaAttribute::new("mail").multi_valued())
            .with_attribute(SchemaAttribute::new("phone").multi_valued())
            .with_attribute(SchemaAttribute::new("unixhome"))
            .with_attribute(SchemaAttribute::new("shell"))
            .with_attribute(SchemaAttribute::new("userexpiry"))
            .with_attribute(SchemaAttribute::new("password").secret())
            .with_attribute(SchemaAttribute::new("groups").member_list())
    }

    /// Reference registry for POSIX-style group records.
    #[must_use]
    pub fn posix_group() -> Self {
        Self::new(RecordKind::Group)
            .with_attribute(SchemaAttribute::new("name"))
            .with_attribute(SchemaAttribute::new("description"))
            .with_attribute(SchemaAttribute::new("members").member_list())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_builder_flags() {
        let attr = SchemaAttribute::new("password").secret();
        assert!(attr.secret);
        assert!(!attr.multi_valued);

        let members = SchemaAttribute::new("members").member_list();
        assert!(members.member_list);
        assert!(members.multi_valued, "member lists are multi-valued");
    }

    #[test]
    fn test_lookup() {
        let schema = RecordSchema::new(RecordKind::User)
            .with_attribute(SchemaAttribute::new("username"))
            .with_attribute(SchemaAttribute::new("mail").multi_valued());

        assert!(schema.has("username"));
        assert!(!schema.has("phone"));
        assert!(schema.get("mail").unwrap().multi_valued);
    }

    #[test]
    fn test_posix_user_registry() {
        let schema = RecordSchema::posix_user();
        assert_eq!(schema.kind, RecordKind::User);
        assert_eq!(schema.secret_attribute(), Some("password"));
        assert_eq!(schema.member_list_attribute(), Some("groups"));
        assert!(schema.has(RecordKind::User.naming_attribute()));
        assert!(schema.get("mail").unwrap().multi_valued);
    }

    #[test]
    fn test_posix_group_registry() {
        let schema = RecordSchema::posix_group();
        assert_eq!(schema.kind, RecordKind::Group);
        assert_eq!(schema.member_list_attribute(), Some("members"));
        assert_eq!(schema.secret_attribute(), None);
        assert!(schema.has(RecordKind::Group.naming_attribute()));
    }

    #[test]
    fn test_names_in_declaration_order() {
        let schema = RecordSchema::posix_group();
        let names: Vec<&str> = schema.names().collect();
        assert_eq!(names, vec!["name", "description", "members"]);
    }

    #[test]
    fn test_schema_serialization() {
        let schema = RecordSchema::posix_user();
        let json = serde_json::to_string(&schema).unwrap();
        let parsed: RecordSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, schema);
    }
}
