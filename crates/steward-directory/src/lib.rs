//! # Directory Port
//!
//! Core abstractions for talking to an identity directory.
//!
//! This crate defines the narrow surface the reconciliation engine works
//! against: record kinds and their schemas, attribute values, search
//! filters, distinguished names, and the [`Directory`](directory::Directory)
//! / [`DirectoryEntry`](entry::DirectoryEntry) traits a backing store
//! implements.
//!
//! ## Design
//!
//! Records are opened, mutated in memory and committed in one round trip:
//!
//! - [`Directory`](directory::Directory) - search records, open them for
//!   create or edit, resolve the default container
//! - [`DirectoryEntry`](entry::DirectoryEntry) - staged attribute writes
//!   with a [`diff`](entry::DirectoryEntry::diff) of pending changes
//!
//! Staging keeps idempotence observable: a caller that stages the values a
//! record already has sees an empty diff and can skip the commit entirely.
//!
//! ## Example
//!
//! ```ignore
//! use steward_directory::prelude::*;
//!
//! let people = directory.base_container().await?;
//! let filter = Filter::eq("username", "jsmith");
//! let matches = directory.search(RecordKind::User, &filter, &["username"]).await?;
//!
//! let mut entry = match matches.first() {
//!     Some(found) => directory.open_for_edit(RecordKind::User, &found.dn).await?,
//!     None => directory.open_for_create(RecordKind::User, "jsmith", &people).await?,
//! };
//! entry.set("displayName", AttrValue::from("John Smith"))?;
//! if !entry.diff().is_empty() {
//!     entry.commit().await?;
//! }
//! ```
//!
//! ## Crate Organization
//!
//! - [`types`] - Record kinds and their naming conventions
//! - [`error`] - Error types with transient/permanent classification
//! - [`value`] - Attribute values (single string or whole list)
//! - [`schema`] - Record schemas ([`RecordSchema`](schema::RecordSchema),
//!   [`SchemaAttribute`](schema::SchemaAttribute))
//! - [`filter`] - Search filter tree
//! - [`dn`] - Distinguished names and RFC 4514 escaping
//! - [`entry`] - Open records and staged diffs
//! - [`directory`] - The [`Directory`](directory::Directory) trait

pub mod directory;
pub mod dn;
pub mod entry;
pub mod error;
pub mod filter;
pub mod schema;
pub mod types;
pub mod value;

/// Prelude module for convenient imports.
///
/// ```
/// use steward_directory::prelude::*;
/// ```
pub mod prelude {
    // Types and enums
    pub use crate::types::{ParseRecordKindError, RecordKind};

    // Error handling
    pub use crate::error::{DirectoryError, DirectoryResult};

    // Values and schemas
    pub use crate::schema::{RecordSchema, SchemaAttribute};
    pub use crate::value::AttrValue;

    // Searching
    pub use crate::filter::Filter;

    // Names and records
    pub use crate::dn::Dn;
    pub use crate::entry::{DirectoryEntry, EntryDiff, RecordHandle, ValueChange};

    // The port itself
    pub use crate::directory::Directory;
}

// Re-export async_trait for directory implementors
pub use async_trait::async_trait;

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        // Verify all prelude types are accessible
        let _kind = RecordKind::User;
        let _value = AttrValue::from("jsmith");
        let _filter = Filter::eq("username", "jsmith");
        let _dn = Dn::new("ou=people,dc=example,dc=org");
        let _schema = RecordSchema::posix_user();
        let _err = DirectoryError::not_found("uid=missing");
        let _handle = RecordHandle::new(Dn::new("uid=jsmith,ou=people,dc=example,dc=org"));
    }
}
