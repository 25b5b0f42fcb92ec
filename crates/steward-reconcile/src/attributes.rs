//! Attribute reconciliation for a single open record.
//!
//! Walks the record's schema and stages every value the desired state
//! supplies, plus the computed defaults. Staging goes through
//! [`DirectoryEntry::set`], so idempotence falls out of the entry's own
//! change tracking: staging a value the record already carries changes
//! nothing.

use std::collections::{BTreeMap, BTreeSet};

use steward_directory::entry::DirectoryEntry;
use steward_directory::value::AttrValue;
use tracing::debug;

use crate::defaults;
use crate::desired::DesiredState;
use crate::error::{ReconcileError, ReconcileResult};
use crate::secret;

/// Stages the desired attribute values on an open record and returns the
/// names that actually changed.
///
/// The secret attribute and the member-list attribute are skipped (the
/// former goes through the comparator below, the latter belongs to group
/// records). Desired names the schema does not carry are ignored. The
/// secret is staged only when [`secret::needs_update`] says the stored
/// hash no longer verifies the desired plaintext; an unchanged secret is
/// never rewritten. Nothing is committed here.
pub fn reconcile_attributes(
    entry: &mut dyn DirectoryEntry,
    desired: &DesiredState,
) -> ReconcileResult<BTreeSet<String>> {
    let schema = entry.schema().clone();
    let computed = computed_defaults(desired);

    for attribute in &schema.attributes {
        if attribute.secret || attribute.member_list {
            continue;
        }
        let name = attribute.name.as_str();
        let value = desired.attribute(name).or_else(|| computed.get(name));
        if let Some(value) = value.cloned() {
            entry
                .set(name, value)
                .map_err(|e| ReconcileError::attributes(desired.identity(), e))?;
        }
    }

    if let (Some(plain), Some(secret_attribute)) = (desired.secret(), schema.secret_attribute()) {
        let stale = {
            let stored = entry.get(secret_attribute).and_then(AttrValue::as_text);
            secret::needs_update(plain, stored)
        };
        if stale {
            entry
                .set(secret_attribute, AttrValue::from(plain))
                .map_err(|e| ReconcileError::attributes(desired.identity(), e))?;
        }
    }

    let changed: BTreeSet<String> = schema
        .names()
        .filter(|name| entry.has_changed(name))
        .map(str::to_string)
        .collect();

    debug!(
        identity = %desired.identity(),
        staged = changed.len(),
        "Staged attribute changes"
    );

    Ok(changed)
}

/// Defaults resolved once per call and never written back into the
/// desired state: a display label from the name parts and a home
/// directory from the identity. An explicitly desired value always wins.
fn computed_defaults(desired: &DesiredState) -> BTreeMap<String, AttrValue> {
    let mut computed = BTreeMap::new();

    if desired.attribute("displayName").is_none() {
        let first = desired.attribute("firstname").and_then(AttrValue::as_text);
        let last = desired.attribute("lastname").and_then(AttrValue::as_text);
        if let (Some(first), Some(last)) = (first, last) {
            computed.insert(
                "displayName".to_string(),
                AttrValue::from(defaults::display_name(first, last)),
            );
        }
    }

    if desired.attribute("unixhome").is_none() {
        computed.insert(
            "unixhome".to_string(),
            AttrValue::from(defaults::home_directory(desired.identity())),
        );
    }

    computed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_name_parts() {
        let desired = DesiredState::present("jsmith")
            .with_attribute("firstname", "John")
            .with_attribute("lastname", "Smith");
        let computed = computed_defaults(&desired);
        assert_eq!(
            computed.get("displayName"),
            Some(&AttrValue::from("John Smith"))
        );
        assert_eq!(
            computed.get("unixhome"),
            Some(&AttrValue::from("/home/jsmith"))
        );
    }

    #[test]
    fn test_no_display_name_without_both_parts() {
        let desired = DesiredState::present("jsmith").with_attribute("firstname", "John");
        let computed = computed_defaults(&desired);
        assert!(!computed.contains_key("displayName"));
        assert!(computed.contains_key("unixhome"));
    }

    #[test]
    fn test_explicit_values_win_over_defaults() {
        let desired = DesiredState::present("jsmith")
            .with_attribute("firstname", "John")
            .with_attribute("lastname", "Smith")
            .with_attribute("displayName", "Johnny")
            .with_attribute("unixhome", "/export/home/jsmith");
        let computed = computed_defaults(&desired);
        assert!(computed.is_empty());
    }
}
