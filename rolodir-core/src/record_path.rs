//! Path addressing for the record-store tree.
//!
//! Records live in a key-value tree organized as
//! `users/<userId>/contacts/<contactId>` and `users/<userId>/events/<eventId>`.
//! A [`CollectionPath`] names one of the two per-user collections; a
//! [`RecordPath`] names a single record inside a collection.

use std::fmt;

/// Path to a per-user collection (`users/<uid>/contacts` or `users/<uid>/events`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionPath {
    user_id: String,
    collection: &'static str,
}

impl CollectionPath {
    pub fn contacts(user_id: &str) -> Self {
        CollectionPath {
            user_id: user_id.to_string(),
            collection: "contacts",
        }
    }

    pub fn events(user_id: &str) -> Self {
        CollectionPath {
            user_id: user_id.to_string(),
            collection: "events",
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Path to a single record inside this collection.
    pub fn record(&self, key: &str) -> RecordPath {
        RecordPath {
            collection: self.clone(),
            key: key.to_string(),
        }
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "users/{}/{}", self.user_id, self.collection)
    }
}

/// Path to a single record (`<collection>/<key>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordPath {
    collection: CollectionPath,
    key: String,
}

impl RecordPath {
    pub fn collection(&self) -> &CollectionPath {
        &self.collection
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for RecordPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.key)
    }
}
