//! Desired state of a single identity.
//!
//! A [`DesiredState`] is the input to one reconciliation pass: who the
//! identity is, whether it should exist at all, which groups it belongs to
//! and which attribute values the directory record should carry.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use steward_directory::dn::Dn;
use steward_directory::value::AttrValue;

/// Whether the identity should exist in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    /// The record should exist and match the desired attributes.
    #[default]
    Present,
    /// The record should not exist; delete it if it does.
    Absent,
}

impl Presence {
    /// Convert to string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Presence::Present => "present",
            Presence::Absent => "absent",
        }
    }
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Presence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "present" => Ok(Presence::Present),
            "absent" => Ok(Presence::Absent),
            _ => Err(format!("Unknown presence: {s}")),
        }
    }
}

/// Desired state of one identity.
///
/// The identity name doubles as the naming attribute of the record and as
/// the RDN value of new records. The secret travels in plaintext here; it
/// is redacted from `Debug` output and never logged or diffed downstream.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct DesiredState {
    identity: String,

    #[serde(default)]
    presence: Presence,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    secret: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    groups: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    container: Option<Dn>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, AttrValue>,
}

impl DesiredState {
    /// Desired state for an identity that should exist.
    pub fn present(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            presence: Presence::Present,
            secret: None,
            groups: Vec::new(),
            container: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Desired state for an identity that should not exist.
    pub fn absent(identity: impl Into<String>) -> Self {
        Self {
            presence: Presence::Absent,
            ..Self::present(identity)
        }
    }

    /// Set the plaintext secret the record should be able to verify.
    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Add one group the identity should be a member of.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    /// Add several groups the identity should be a member of.
    #[must_use]
    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups.extend(groups.into_iter().map(Into::into));
        self
    }

    /// Place new records under this container instead of the directory
    /// default.
    #[must_use]
    pub fn with_container(mut self, container: impl Into<Dn>) -> Self {
        self.container = Some(container.into());
        self
    }

    /// Set a desired attribute value.
    ///
    /// Multi-valued attributes take a whole [`AttrValue::List`]; the list
    /// replaces whatever the record currently carries.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// The identity name.
    #[must_use]
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Whether the identity should exist.
    #[must_use]
    pub fn presence(&self) -> Presence {
        self.presence
    }

    /// The plaintext secret, if one is desired.
    #[must_use]
    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref()
    }

    /// Groups the identity should be a member of. May contain duplicates;
    /// they collapse during reconciliation.
    #[must_use]
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// The container override for new records, if any.
    #[must_use]
    pub fn container(&self) -> Option<&Dn> {
        self.container.as_ref()
    }

    /// A single desired attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    /// All explicitly desired attribute values.
    #[must_use]
    pub fn attributes(&self) -> &BTreeMap<String, AttrValue> {
        &self.attributes
    }
}

impl fmt::Debug for DesiredState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DesiredState")
            .field("identity", &self.identity)
            .field("presence", &self.presence)
            .field("secret", &self.secret.as_ref().map(|_| "***REDACTED***"))
            .field("groups", &self.groups)
            .field("container", &self.container)
            .field("attributes", &self.attributes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_default_and_parse() {
        assert_eq!(Presence::default(), Presence::Present);
        assert_eq!("present".parse::<Presence>().unwrap(), Presence::Present);
        assert_eq!("Absent".parse::<Presence>().unwrap(), Presence::Absent);
        assert!("deleted".parse::<Presence>().is_err());
    }

    #[test]
    fn test_builder() {
        let desired = DesiredState::present("jsmith")
            .with_secret("s3cr3t")
            .with_group("staff")
            .with_groups(["admins", "staff"])
            .with_container(Dn::new("ou=people,dc=example,dc=org"))
            .with_attribute("firstname", "John")
            .with_attribute("mail", vec!["jsmith@example.org"]);

        assert_eq!(desired.identity(), "jsmith");
        assert_eq!(desired.presence(), Presence::Present);
        assert_eq!(desired.secret(), Some("s3cr3t"));
        assert_eq!(desired.groups(), &["staff", "admins", "staff"]);
        assert_eq!(
            desired.container().map(Dn::as_str),
            Some("ou=people,dc=example,dc=org")
        );
        assert_eq!(desired.attribute("firstname"), Some(&AttrValue::from("John")));
        assert_eq!(desired.attribute("surname"), None);
    }

    #[test]
    fn test_absent_constructor() {
        let desired = DesiredState::absent("jsmith");
        assert_eq!(desired.presence(), Presence::Absent);
        assert!(desired.groups().is_empty());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let desired = DesiredState::present("jsmith").with_secret("super-secret");
        let debug = format!("{desired:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("***REDACTED***"));
    }

    #[test]
    fn test_deserialize_minimal() {
        let desired: DesiredState = serde_json::from_str(r#"{"identity": "jsmith"}"#).unwrap();
        assert_eq!(desired.identity(), "jsmith");
        assert_eq!(desired.presence(), Presence::Present);
        assert_eq!(desired.secret(), None);
        assert!(desired.groups().is_empty());
        assert!(desired.attributes().is_empty());
    }

    #[test]
    fn test_deserialize_full() {
        let json = r#"{
            "identity": "jsmith",
            "presence": "absent",
            "groups": ["staff"],
            "container": "ou=people,dc=example,dc=org",
            "attributes": {"mail": ["jsmith@example.org", "john@example.org"]}
        }"#;
        let desired: DesiredState = serde_json::from_str(json).unwrap();
        assert_eq!(desired.presence(), Presence::Absent);
        assert_eq!(
            desired.attribute("mail"),
            Some(&AttrValue::list(["jsmith@example.org", "john@example.org"]))
        );
    }
}
