//! The reconciliation engine.
//!
//! Sequences one pass over one identity: existence probe, attribute
//! reconciliation, record commit, membership reconciliation, or deletion
//! when the identity is desired absent. Dry-run suppresses every physical
//! write but computes and reports the same outcome.

use std::collections::BTreeSet;
use std::sync::Arc;

use steward_directory::directory::Directory;
use steward_directory::dn::Dn;
use steward_directory::entry::EntryDiff;
use steward_directory::filter::Filter;
use steward_directory::types::RecordKind;
use steward_directory::value::AttrValue;
use tracing::{debug, info, instrument, warn};

use crate::attributes::reconcile_attributes;
use crate::desired::{DesiredState, Presence};
use crate::error::{ReconcileError, ReconcileResult};
use crate::membership::MembershipReconciler;
use crate::outcome::ReconcileOutcome;

const REDACTED: &str = "***REDACTED***";

/// Reconciles desired identity states against a directory.
///
/// One instance serves any number of passes; each pass touches exactly
/// one identity. Passes are not coordinated against concurrent writers:
/// the probe-then-mutate sequence assumes external mutual exclusion per
/// identity, and a race can produce a duplicate create or a lost update.
pub struct Reconciler {
    directory: Arc<dyn Directory>,
    dry_run: bool,
}

impl Reconciler {
    pub fn new(directory: Arc<dyn Directory>) -> Self {
        Self {
            directory,
            dry_run: false,
        }
    }

    /// Compute and report changes without writing anything.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Whether this engine writes to the directory.
    #[must_use]
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Runs one reconciliation pass for one identity.
    #[instrument(skip(self, desired), fields(identity = %desired.identity(), dry_run = self.dry_run))]
    pub async fn reconcile(&self, desired: &DesiredState) -> ReconcileResult<ReconcileOutcome> {
        let identity = desired.identity();

        let container = match desired.container() {
            Some(container) => container.clone(),
            None => self
                .directory
                .base_container()
                .await
                .map_err(|e| ReconcileError::lookup(identity, e))?,
        };

        let existing = self.probe(identity).await?;

        match desired.presence() {
            Presence::Present => self.converge_present(desired, existing, container).await,
            Presence::Absent => self.converge_absent(desired, existing, container).await,
        }
    }

    /// Looks up whether a record with the identity's name already exists.
    async fn probe(&self, identity: &str) -> ReconcileResult<Option<Dn>> {
        let naming = RecordKind::User.naming_attribute();
        let filter = Filter::eq(naming, identity);
        let matches = self
            .directory
            .search(RecordKind::User, &filter, &[naming])
            .await
            .map_err(|e| ReconcileError::lookup(identity, e))?;

        if matches.len() > 1 {
            warn!(
                matches = matches.len(),
                "Multiple records match the identity, using the first"
            );
        }

        Ok(matches.into_iter().next().map(|handle| handle.dn))
    }

    async fn converge_present(
        &self,
        desired: &DesiredState,
        existing: Option<Dn>,
        container: Dn,
    ) -> ReconcileResult<ReconcileOutcome> {
        let identity = desired.identity();
        let created = existing.is_none();

        let mut entry = match &existing {
            Some(dn) => self.directory.open_for_edit(RecordKind::User, dn).await,
            None => {
                self.directory
                    .open_for_create(RecordKind::User, identity, &container)
                    .await
            }
        }
        .map_err(|e| ReconcileError::lookup(identity, e))?;

        let changed_attributes = reconcile_attributes(entry.as_mut(), desired)?;

        // The diff is part of the outcome even when nothing commits, so
        // compute it before the dry-run short-circuit.
        let mut attribute_diff = entry.diff();
        redact_secret(&mut attribute_diff, entry.schema().secret_attribute());

        let dn = entry.dn().clone();
        let modified = !created && !changed_attributes.is_empty();

        if self.dry_run {
            debug!(created, modified, "Dry-run, skipping record commit");
        } else if created || modified {
            entry
                .commit()
                .await
                .map_err(|e| ReconcileError::attributes(identity, e))?;
        }

        let changed_groups = if desired.groups().is_empty() {
            BTreeSet::new()
        } else {
            MembershipReconciler::new(self.directory.as_ref())
                .with_dry_run(self.dry_run)
                .reconcile(identity, &dn, desired.groups())
                .await?
        };

        let changed = created || modified || !changed_groups.is_empty();
        info!(
            changed,
            created,
            groups = changed_groups.len(),
            "Reconciliation pass converged"
        );

        Ok(ReconcileOutcome {
            changed,
            created,
            deleted: false,
            dn: Some(dn),
            resolved_container: container,
            attribute_diff,
            changed_attributes,
            changed_groups,
        })
    }

    async fn converge_absent(
        &self,
        desired: &DesiredState,
        existing: Option<Dn>,
        container: Dn,
    ) -> ReconcileResult<ReconcileOutcome> {
        let identity = desired.identity();

        let Some(dn) = existing else {
            debug!("Record already absent");
            return Ok(ReconcileOutcome::unchanged(container));
        };

        if self.dry_run {
            debug!(dn = %dn, "Dry-run, skipping delete");
            let mut outcome = ReconcileOutcome::unchanged(container);
            outcome.changed = true;
            outcome.deleted = true;
            outcome.dn = Some(dn);
            return Ok(outcome);
        }

        let mut entry = match self.directory.open_for_edit(RecordKind::User, &dn).await {
            Ok(entry) => entry,
            // Vanished between probe and open: already converged.
            Err(e) if e.is_not_found() => {
                debug!(dn = %dn, "Record vanished before delete");
                return Ok(ReconcileOutcome::unchanged(container));
            }
            Err(e) => return Err(ReconcileError::remove(identity, e)),
        };

        match entry.delete().await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                debug!(dn = %dn, "Record vanished during delete");
                return Ok(ReconcileOutcome::unchanged(container));
            }
            Err(e) => return Err(ReconcileError::remove(identity, e)),
        }

        info!(dn = %dn, "Record deleted");
        let mut outcome = ReconcileOutcome::unchanged(container);
        outcome.changed = true;
        outcome.deleted = true;
        outcome.dn = Some(dn);
        Ok(outcome)
    }
}

/// Replaces both sides of the secret attribute's diff entry. The names
/// stay visible; the values never leave the engine.
fn redact_secret(diff: &mut EntryDiff, secret_attribute: Option<&str>) {
    let Some(secret_attribute) = secret_attribute else {
        return;
    };
    if let Some(change) = diff.get_mut(secret_attribute) {
        if change.before.is_some() {
            change.before = Some(AttrValue::from(REDACTED));
        }
        if change.after.is_some() {
            change.after = Some(AttrValue::from(REDACTED));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use steward_directory::entry::ValueChange;

    #[test]
    fn test_redact_secret_hides_both_sides() {
        let mut diff = EntryDiff::new();
        diff.insert(
            "password".to_string(),
            ValueChange::new(
                Some(AttrValue::from("{SSHA}c3RvcmVk")),
                Some(AttrValue::from("s3cr3t")),
            ),
        );
        diff.insert(
            "displayName".to_string(),
            ValueChange::new(None, Some(AttrValue::from("John Smith"))),
        );

        redact_secret(&mut diff, Some("password"));

        assert_eq!(
            diff["password"].before,
            Some(AttrValue::from("***REDACTED***"))
        );
        assert_eq!(
            diff["password"].after,
            Some(AttrValue::from("***REDACTED***"))
        );
        assert_eq!(
            diff["displayName"].after,
            Some(AttrValue::from("John Smith"))
        );
    }

    #[test]
    fn test_redact_secret_keeps_absent_sides() {
        let mut diff = EntryDiff::new();
        diff.insert(
            "password".to_string(),
            ValueChange::new(None, Some(AttrValue::from("s3cr3t"))),
        );

        redact_secret(&mut diff, Some("password"));

        assert_eq!(diff["password"].before, None);
        assert_eq!(
            diff["password"].after,
            Some(AttrValue::from("***REDACTED***"))
        );
    }
}
