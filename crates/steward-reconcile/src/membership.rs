//! Group membership reconciliation.
//!
//! Resolves desired group names to group records and ensures the identity
//! DN is listed in each group's member-list attribute. Only groups that
//! actually gain the membership are written; a group that already lists
//! the DN is left untouched.

use std::collections::BTreeSet;

use steward_directory::directory::Directory;
use steward_directory::dn::Dn;
use steward_directory::error::DirectoryError;
use steward_directory::filter::Filter;
use steward_directory::types::RecordKind;
use steward_directory::value::AttrValue;
use tracing::{debug, instrument};

use crate::error::{ReconcileError, ReconcileResult};

/// Ensures one identity's memberships in a set of named groups.
pub struct MembershipReconciler<'a> {
    directory: &'a dyn Directory,
    dry_run: bool,
}

impl<'a> MembershipReconciler<'a> {
    pub fn new(directory: &'a dyn Directory) -> Self {
        Self {
            directory,
            dry_run: false,
        }
    }

    /// Suppress group commits while still computing changed groups.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Adds `identity_dn` to every named group that does not list it yet
    /// and returns the names of the groups that changed.
    ///
    /// Names are order-independent and duplicates collapse. A name that
    /// resolves to no group record is skipped; group provisioning may lag
    /// behind in a larger pipeline, so an unresolvable name is not an
    /// error. Any lookup or commit failure ends the pass immediately and
    /// surfaces as [`ReconcileError::Membership`] naming the group;
    /// remaining groups are not attempted. Strict by choice, matching the
    /// all-or-nothing propagation of the attribute phase.
    #[instrument(skip(self, identity_dn, desired_groups), fields(identity = %identity, groups = desired_groups.len()))]
    pub async fn reconcile(
        &self,
        identity: &str,
        identity_dn: &Dn,
        desired_groups: &[String],
    ) -> ReconcileResult<BTreeSet<String>> {
        let unique: BTreeSet<&str> = desired_groups.iter().map(String::as_str).collect();
        let naming = RecordKind::Group.naming_attribute();
        let mut changed = BTreeSet::new();

        for name in unique {
            let filter = Filter::eq(naming, name);
            let matches = self
                .directory
                .search(RecordKind::Group, &filter, &[naming])
                .await
                .map_err(|e| ReconcileError::membership(identity, name, e))?;

            if matches.is_empty() {
                debug!(group = name, "Group not found, skipping");
                continue;
            }

            for handle in matches {
                let mut group = self
                    .directory
                    .open_for_edit(RecordKind::Group, &handle.dn)
                    .await
                    .map_err(|e| ReconcileError::membership(identity, name, e))?;

                let member_attribute = match group.schema().member_list_attribute() {
                    Some(attribute) => attribute.to_string(),
                    None => {
                        return Err(ReconcileError::membership(
                            identity,
                            name,
                            DirectoryError::operation_failed(
                                "group schema has no member-list attribute",
                            ),
                        ));
                    }
                };

                let mut members = group
                    .get(&member_attribute)
                    .cloned()
                    .map(AttrValue::into_list)
                    .unwrap_or_default();

                if members.iter().any(|member| member == identity_dn.as_str()) {
                    continue;
                }

                members.push(identity_dn.as_str().to_string());
                group
                    .set(&member_attribute, AttrValue::List(members))
                    .map_err(|e| ReconcileError::membership(identity, name, e))?;

                if !self.dry_run {
                    group
                        .commit()
                        .await
                        .map_err(|e| ReconcileError::membership(identity, name, e))?;
                }

                changed.insert(name.to_string());
            }
        }

        debug!(changed = changed.len(), "Membership reconciled");
        Ok(changed)
    }
}
