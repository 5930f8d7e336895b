//! The record-store backend boundary.
//!
//! The store persists into a key-value tree addressed by [`CollectionPath`] /
//! [`RecordPath`] segments. Any backend exposing these five primitives over
//! any transport satisfies the contract; [`crate::memory::MemoryStore`] is the
//! in-process implementation.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::watch;

use crate::error::RolodirResult;
use crate::record_path::{CollectionPath, RecordPath};

/// All child records of a collection, keyed by record id.
pub type Records = BTreeMap<String, Value>;

/// The five primitives the store needs from its backend.
///
/// Snapshot delivery is full-collection: the watch channel returned by
/// [`RecordStore::subscribe`] always holds the complete current children, and
/// borrowing the receiver doubles as the one-shot read.
#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    /// Live view of a collection's children. The receiver is seeded with the
    /// current snapshot and updated on every change.
    async fn subscribe(&self, collection: &CollectionPath) -> RolodirResult<watch::Receiver<Records>>;

    /// Write a whole record, replacing any existing value.
    async fn set(&self, record: &RecordPath, value: Value) -> RolodirResult<()>;

    /// Merge fields into a record. A `null` field value clears that field;
    /// fields not named are left untouched. Creates the record if absent.
    async fn merge(
        &self,
        record: &RecordPath,
        fields: serde_json::Map<String, Value>,
    ) -> RolodirResult<()>;

    /// Delete a record. Removing an absent record is not an error.
    async fn remove(&self, record: &RecordPath) -> RolodirResult<()>;

    /// Children of a collection whose `field` equals `value`.
    async fn query_by_field(
        &self,
        collection: &CollectionPath,
        field: &str,
        value: &Value,
    ) -> RolodirResult<Records>;
}
