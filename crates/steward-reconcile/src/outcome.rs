//! Result of one reconciliation pass.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use steward_directory::dn::Dn;
use steward_directory::entry::EntryDiff;

/// What one reconciliation pass did, or would have done in dry-run.
///
/// A dry-run pass reports the same outcome as a live pass over the same
/// state; the two differ only in whether the directory was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileOutcome {
    /// Whether anything changed: the record was created, modified or
    /// deleted, or any group gained the membership.
    pub changed: bool,

    /// The record was created this pass.
    pub created: bool,

    /// The record was deleted this pass.
    pub deleted: bool,

    /// DN of the reconciled record, when one exists or was projected for
    /// creation. `None` when an absent identity had no record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dn: Option<Dn>,

    /// Container new records were resolved against.
    pub resolved_container: Dn,

    /// Attribute before/after pairs, computed even when nothing commits.
    /// Secret attribute values are redacted.
    #[serde(default)]
    pub attribute_diff: EntryDiff,

    /// Names of attributes that changed (or would change).
    #[serde(default)]
    pub changed_attributes: BTreeSet<String>,

    /// Names of groups that gained the membership (or would gain it).
    #[serde(default)]
    pub changed_groups: BTreeSet<String>,
}

impl ReconcileOutcome {
    /// An outcome that touched nothing.
    #[must_use]
    pub fn unchanged(resolved_container: Dn) -> Self {
        Self {
            changed: false,
            created: false,
            deleted: false,
            dn: None,
            resolved_container,
            attribute_diff: EntryDiff::new(),
            changed_attributes: BTreeSet::new(),
            changed_groups: BTreeSet::new(),
        }
    }

    /// Whether the pass converged without touching anything.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        !self.changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unchanged_outcome() {
        let outcome = ReconcileOutcome::unchanged(Dn::new("ou=people,dc=example,dc=org"));
        assert!(outcome.is_noop());
        assert!(!outcome.created);
        assert!(!outcome.deleted);
        assert!(outcome.attribute_diff.is_empty());
    }

    #[test]
    fn test_serialization_skips_missing_dn() {
        let outcome = ReconcileOutcome::unchanged(Dn::new("ou=people,dc=example,dc=org"));
        let json = serde_json::to_value(&outcome).unwrap();
        assert!(json.get("dn").is_none());
        assert_eq!(json["resolved_container"], "ou=people,dc=example,dc=org");
    }
}
