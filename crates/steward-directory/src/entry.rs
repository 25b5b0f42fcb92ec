//! Open directory records.
//!
//! A [`DirectoryEntry`] is a record opened for writing. Attribute changes
//! are staged in memory through [`DirectoryEntry::set`] and only reach the
//! directory when [`DirectoryEntry::commit`] is called, so callers can
//! inspect the pending [`EntryDiff`] and decide whether a round trip is
//! worth making at all.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::dn::Dn;
use crate::error::DirectoryResult;
use crate::schema::RecordSchema;
use crate::types::RecordKind;
use crate::value::AttrValue;

/// A single staged attribute change, keyed by attribute name in [`EntryDiff`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueChange {
    /// Value currently stored in the directory, if any.
    pub before: Option<AttrValue>,
    /// Value that will be written on commit, if any.
    pub after: Option<AttrValue>,
}

impl ValueChange {
    pub fn new(before: Option<AttrValue>, after: Option<AttrValue>) -> Self {
        Self { before, after }
    }
}

/// Staged changes of an open entry, keyed by attribute name.
pub type EntryDiff = BTreeMap<String, ValueChange>;

/// A read-only snapshot of a record returned from a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordHandle {
    /// Distinguished name of the record.
    pub dn: Dn,
    /// Requested attributes, as far as the record carries them.
    #[serde(default)]
    pub attributes: BTreeMap<String, AttrValue>,
}

impl RecordHandle {
    pub fn new(dn: Dn) -> Self {
        Self {
            dn,
            attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Returns the named attribute, if the search requested and found it.
    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<&AttrValue> {
        self.attributes.get(attribute)
    }
}

/// A record opened for create or edit.
///
/// Writes are staged locally; nothing reaches the directory until
/// [`commit`](DirectoryEntry::commit) runs. A commit writes all staged
/// changes of this record in one operation.
#[async_trait]
pub trait DirectoryEntry: Send + Sync {
    /// Distinguished name of the record.
    ///
    /// For an entry opened for create this is the DN the record will get
    /// on commit.
    fn dn(&self) -> &Dn;

    /// The record kind this entry belongs to.
    fn kind(&self) -> RecordKind;

    /// Whether this entry was opened for create and has not been
    /// committed yet.
    fn is_new(&self) -> bool;

    /// Schema of the record kind, used to enumerate and validate
    /// attributes.
    fn schema(&self) -> &RecordSchema;

    /// Current effective value of an attribute: the staged value if one
    /// is pending, otherwise the stored value.
    fn get(&self, attribute: &str) -> Option<&AttrValue>;

    /// Stages a new value for an attribute.
    ///
    /// Multi-valued attributes are replaced wholesale; there is no
    /// incremental add/remove. Fails with
    /// [`DirectoryError::UnknownAttribute`](crate::error::DirectoryError::UnknownAttribute)
    /// if the schema does not carry the attribute, and with
    /// [`DirectoryError::InvalidValue`](crate::error::DirectoryError::InvalidValue)
    /// if the value does not fit it.
    fn set(&mut self, attribute: &str, value: AttrValue) -> DirectoryResult<()>;

    /// Whether the staged value of an attribute differs from the stored
    /// one. Setting an attribute to its current value stages nothing.
    fn has_changed(&self, attribute: &str) -> bool;

    /// All staged changes, keyed by attribute name.
    fn diff(&self) -> EntryDiff;

    /// Writes all staged changes to the directory in one operation.
    ///
    /// For a new entry this creates the record and fails with
    /// [`DirectoryError::AlreadyExists`](crate::error::DirectoryError::AlreadyExists)
    /// if the DN is already taken. After a successful commit the entry
    /// has no staged changes and [`is_new`](DirectoryEntry::is_new)
    /// returns `false`.
    async fn commit(&mut self) -> DirectoryResult<()>;

    /// Removes the record from the directory.
    ///
    /// Fails with [`DirectoryError::NotFound`](crate::error::DirectoryError::NotFound)
    /// if the record vanished since it was opened.
    async fn delete(&mut self) -> DirectoryResult<()>;
}
