//! The directory port.
//!
//! [`Directory`] is the narrow seam between reconciliation logic and a
//! concrete backing store. Implementations wrap a real server or, in
//! tests, an in-memory map; callers only ever see DNs, search results and
//! open [`DirectoryEntry`] handles.

use async_trait::async_trait;

use crate::dn::Dn;
use crate::entry::{DirectoryEntry, RecordHandle};
use crate::error::DirectoryResult;
use crate::filter::Filter;
use crate::types::RecordKind;

/// Access to a backing directory.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Searches records of one kind matching a filter.
    ///
    /// Only the requested attributes are returned on each
    /// [`RecordHandle`]; an attribute a record does not carry is simply
    /// absent from the handle. An empty result is not an error.
    async fn search(
        &self,
        kind: RecordKind,
        filter: &Filter,
        attributes: &[&str],
    ) -> DirectoryResult<Vec<RecordHandle>>;

    /// Opens a fresh entry that will be created under `container` on
    /// commit.
    ///
    /// `name` becomes the RDN value of the new record, and the entry
    /// starts out with the kind's naming attribute staged to `name`.
    /// Nothing is written until the entry commits; committing fails with
    /// [`DirectoryError::AlreadyExists`](crate::error::DirectoryError::AlreadyExists)
    /// if the DN was taken in the meantime.
    async fn open_for_create(
        &self,
        kind: RecordKind,
        name: &str,
        container: &Dn,
    ) -> DirectoryResult<Box<dyn DirectoryEntry>>;

    /// Opens an existing record for editing.
    ///
    /// Fails with [`DirectoryError::NotFound`](crate::error::DirectoryError::NotFound)
    /// if no record lives at `dn`.
    async fn open_for_edit(
        &self,
        kind: RecordKind,
        dn: &Dn,
    ) -> DirectoryResult<Box<dyn DirectoryEntry>>;

    /// The container new records default to when the caller names none.
    async fn base_container(&self) -> DirectoryResult<Dn>;
}
