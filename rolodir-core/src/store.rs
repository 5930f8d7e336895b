//! The contact/event store.
//!
//! [`ContactStore`] owns the authenticated session's view of the two
//! collections and forwards mutations to the record-store backend. Deleting a
//! contact cascades to its events; everything else is plain record CRUD.
//!
//! Mutations are last-write-wins at the backend. The store never reconciles
//! an in-flight local write against an incoming snapshot: the snapshot always
//! wins. Remote failures are propagated to the caller, not retried.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::calendar_event::{CalendarEvent, EventDraft};
use crate::contact::{Contact, ContactDraft, ContactPatch};
use crate::error::{RolodirError, RolodirResult};
use crate::record_path::CollectionPath;
use crate::record_store::{RecordStore, Records};

/// A full-collection snapshot as delivered to subscribers.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    pub contacts: Vec<Contact>,
    pub events: Vec<CalendarEvent>,
}

/// Store for one user session's contacts and events.
///
/// Constructed with `user: None` for a signed-out session, in which every
/// operation fails with [`RolodirError::AuthenticationRequired`] before
/// touching the backend.
pub struct ContactStore<B> {
    backend: Arc<B>,
    user: Option<String>,
}

impl<B> Clone for ContactStore<B> {
    fn clone(&self) -> Self {
        ContactStore {
            backend: Arc::clone(&self.backend),
            user: self.user.clone(),
        }
    }
}

impl<B: RecordStore> ContactStore<B> {
    pub fn new(backend: Arc<B>, user: Option<String>) -> Self {
        ContactStore { backend, user }
    }

    fn user(&self) -> RolodirResult<&str> {
        self.user
            .as_deref()
            .ok_or(RolodirError::AuthenticationRequired)
    }

    fn contacts_path(&self) -> RolodirResult<CollectionPath> {
        Ok(CollectionPath::contacts(self.user()?))
    }

    fn events_path(&self) -> RolodirResult<CollectionPath> {
        Ok(CollectionPath::events(self.user()?))
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// One-shot snapshot of the contact collection.
    pub async fn contacts(&self) -> RolodirResult<Vec<Contact>> {
        let rx = self.backend.subscribe(&self.contacts_path()?).await?;
        let contacts = decode_contacts(&rx.borrow());
        Ok(contacts)
    }

    /// One-shot snapshot of the event collection.
    pub async fn events(&self) -> RolodirResult<Vec<CalendarEvent>> {
        let rx = self.backend.subscribe(&self.events_path()?).await?;
        let events = decode_events(&rx.borrow());
        Ok(events)
    }

    /// Live subscription to both collections.
    ///
    /// The returned [`Subscription`] yields a full snapshot immediately, then
    /// one per remote change, until [`Subscription::unsubscribe`] (or drop)
    /// detaches it.
    pub async fn subscribe(&self) -> RolodirResult<Subscription> {
        let mut contacts_rx = self.backend.subscribe(&self.contacts_path()?).await?;
        let mut events_rx = self.backend.subscribe(&self.events_path()?).await?;

        let (tx, rx) = mpsc::unbounded_channel();

        // Initial snapshot is queued before the forwarding task starts, so a
        // subscriber always sees the connect-time state first.
        let initial = snapshot_from(&contacts_rx.borrow_and_update(), &events_rx.borrow_and_update());
        let _ = tx.send(initial);

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    changed = contacts_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    changed = events_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }

                let snapshot =
                    snapshot_from(&contacts_rx.borrow_and_update(), &events_rx.borrow_and_update());
                if tx.send(snapshot).is_err() {
                    break;
                }
            }
        });

        Ok(Subscription { rx, task })
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Create a contact. Assigns a fresh id and `favorite = false`, returns
    /// the id. Field contents are not validated here; see
    /// [`ContactDraft::validate`].
    pub async fn add_contact(&self, draft: ContactDraft) -> RolodirResult<String> {
        let path = self.contacts_path()?;
        let id = new_record_id();

        let value = serde_json::to_value(draft.into_record())
            .map_err(|e| RolodirError::Serialization(e.to_string()))?;
        self.backend.set(&path.record(&id), value).await?;

        debug!(contact_id = %id, "contact created");
        Ok(id)
    }

    /// Merge the given fields into an existing contact. Fields absent from
    /// the patch are left untouched.
    pub async fn update_contact(&self, id: &str, patch: ContactPatch) -> RolodirResult<()> {
        let path = self.contacts_path()?;

        let rx = self.backend.subscribe(&path).await?;
        let exists = rx.borrow().contains_key(id);
        if !exists {
            return Err(RolodirError::ContactNotFound(id.to_string()));
        }

        self.backend.merge(&path.record(id), patch.to_fields()?).await?;

        debug!(contact_id = %id, "contact updated");
        Ok(())
    }

    /// Delete a contact, then every event referencing it.
    ///
    /// The two steps are not atomic: a crash between them leaves the events
    /// orphaned until the contact is deleted again. Accepted gap.
    pub async fn delete_contact(&self, id: &str) -> RolodirResult<()> {
        let contacts = self.contacts_path()?;
        let events = self.events_path()?;

        self.backend.remove(&contacts.record(id)).await?;

        let orphans = self
            .backend
            .query_by_field(&events, "contactId", &Value::from(id))
            .await?;
        for event_id in orphans.keys() {
            self.backend.remove(&events.record(event_id)).await?;
        }

        debug!(contact_id = %id, cascaded = orphans.len(), "contact deleted");
        Ok(())
    }

    /// Create an event. The `contactId` reference is not checked; a dangling
    /// event is accepted.
    pub async fn add_event(&self, draft: EventDraft) -> RolodirResult<String> {
        let path = self.events_path()?;
        let id = new_record_id();

        let value = serde_json::to_value(draft.into_record())
            .map_err(|e| RolodirError::Serialization(e.to_string()))?;
        self.backend.set(&path.record(&id), value).await?;

        debug!(event_id = %id, "event created");
        Ok(id)
    }

    /// Delete a single event. No cascade.
    pub async fn delete_event(&self, id: &str) -> RolodirResult<()> {
        let path = self.events_path()?;
        self.backend.remove(&path.record(id)).await?;

        debug!(event_id = %id, "event deleted");
        Ok(())
    }
}

fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

fn decode_contacts(records: &Records) -> Vec<Contact> {
    records
        .iter()
        .filter_map(|(id, value)| {
            let contact = Contact::from_record(id, value);
            if contact.is_none() {
                warn!(record_id = %id, "skipping malformed contact record");
            }
            contact
        })
        .collect()
}

fn decode_events(records: &Records) -> Vec<CalendarEvent> {
    records
        .iter()
        .filter_map(|(id, value)| {
            let event = CalendarEvent::from_record(id, value);
            if event.is_none() {
                warn!(record_id = %id, "skipping malformed event record");
            }
            event
        })
        .collect()
}

fn snapshot_from(contacts: &Records, events: &Records) -> StoreSnapshot {
    StoreSnapshot {
        contacts: decode_contacts(contacts),
        events: decode_events(events),
    }
}

/// A live subscription handle.
///
/// Dropping the handle, or calling [`Subscription::unsubscribe`] any number
/// of times, detaches the observer; no snapshot is delivered afterwards.
#[derive(Debug)]
pub struct Subscription {
    rx: mpsc::UnboundedReceiver<StoreSnapshot>,
    task: JoinHandle<()>,
}

impl Subscription {
    /// Next snapshot, or None once the subscription is detached and drained.
    pub async fn recv(&mut self) -> Option<StoreSnapshot> {
        self.rx.recv().await
    }

    /// Stop delivery. Safe to call repeatedly.
    pub fn unsubscribe(&self) {
        self.task.abort();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar_event::EventDuration;
    use crate::memory::MemoryStore;
    use crate::record_path::RecordPath;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::time::Duration;
    use tokio::sync::watch;
    use tokio::time::timeout;

    fn make_store() -> ContactStore<MemoryStore> {
        ContactStore::new(Arc::new(MemoryStore::new()), Some("uid-1".to_string()))
    }

    fn signed_out_store() -> ContactStore<MemoryStore> {
        ContactStore::new(Arc::new(MemoryStore::new()), None)
    }

    fn make_draft(first: &str, last: &str) -> ContactDraft {
        ContactDraft {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}@example.com", first.to_lowercase()),
            phone: "070-123 45 67".to_string(),
            avatar: None,
        }
    }

    fn make_event_draft(contact_id: &str) -> EventDraft {
        EventDraft {
            contact_id: contact_id.to_string(),
            start_time: Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap(),
            duration: EventDuration::Min30,
            note: "Coffee".to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_contact_assigns_fresh_id_and_favorite_false() {
        let store = make_store();

        let first = store.add_contact(make_draft("Jane", "Doe")).await.unwrap();
        let second = store.add_contact(make_draft("Bob", "Smith")).await.unwrap();
        assert_ne!(first, second);

        let contacts = store.contacts().await.unwrap();
        assert_eq!(contacts.len(), 2);
        assert!(contacts.iter().all(|c| !c.favorite));
    }

    #[tokio::test]
    async fn test_update_contact_changes_only_patched_fields() {
        let store = make_store();
        let id = store.add_contact(make_draft("Jane", "Doe")).await.unwrap();

        let patch = ContactPatch {
            phone: Some("555-0101".to_string()),
            ..Default::default()
        };
        store.update_contact(&id, patch).await.unwrap();

        let contacts = store.contacts().await.unwrap();
        let contact = contacts.iter().find(|c| c.id == id).unwrap();
        assert_eq!(contact.phone, "555-0101");
        assert_eq!(contact.first_name, "Jane");
        assert_eq!(contact.last_name, "Doe");
        assert_eq!(contact.email, "jane@example.com");
        assert!(!contact.favorite);
    }

    #[tokio::test]
    async fn test_update_missing_contact_is_not_found() {
        let store = make_store();
        let err = store
            .update_contact("no-such-id", ContactPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RolodirError::ContactNotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_contact_cascades_to_its_events() {
        let store = make_store();
        let doomed = store.add_contact(make_draft("Jane", "Doe")).await.unwrap();
        let kept = store.add_contact(make_draft("Bob", "Smith")).await.unwrap();

        store.add_event(make_event_draft(&doomed)).await.unwrap();
        store.add_event(make_event_draft(&doomed)).await.unwrap();
        let unrelated = store.add_event(make_event_draft(&kept)).await.unwrap();

        store.delete_contact(&doomed).await.unwrap();

        let contacts = store.contacts().await.unwrap();
        assert!(contacts.iter().all(|c| c.id != doomed));

        let events = store.events().await.unwrap();
        assert!(events.iter().all(|e| e.contact_id != doomed));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, unrelated);
    }

    #[tokio::test]
    async fn test_add_event_accepts_dangling_contact_id() {
        let store = make_store();
        let id = store
            .add_event(make_event_draft("never-existed"))
            .await
            .unwrap();

        let events = store.events().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, id);
        assert_eq!(events[0].contact_id, "never-existed");
    }

    #[tokio::test]
    async fn test_delete_event_removes_only_that_event() {
        let store = make_store();
        let contact = store.add_contact(make_draft("Jane", "Doe")).await.unwrap();
        let first = store.add_event(make_event_draft(&contact)).await.unwrap();
        let second = store.add_event(make_event_draft(&contact)).await.unwrap();

        store.delete_event(&first).await.unwrap();

        let events = store.events().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, second);
    }

    #[tokio::test]
    async fn test_signed_out_mutations_fail_without_side_effects() {
        let backend = Arc::new(MemoryStore::new());
        let signed_out = ContactStore::new(Arc::clone(&backend), None);

        let err = signed_out
            .add_contact(make_draft("Jane", "Doe"))
            .await
            .unwrap_err();
        assert!(matches!(err, RolodirError::AuthenticationRequired));

        let err = signed_out.delete_contact("c-1").await.unwrap_err();
        assert!(matches!(err, RolodirError::AuthenticationRequired));

        let err = signed_out
            .add_event(make_event_draft("c-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, RolodirError::AuthenticationRequired));

        // Nothing was written for any user.
        let signed_in = ContactStore::new(backend, Some("uid-1".to_string()));
        assert!(signed_in.contacts().await.unwrap().is_empty());
        assert!(signed_in.events().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_subscribe_requires_a_user() {
        let err = signed_out_store().subscribe().await.unwrap_err();
        assert!(matches!(err, RolodirError::AuthenticationRequired));
    }

    #[tokio::test]
    async fn test_subscription_delivers_initial_then_change_snapshots() {
        let store = make_store();
        let mut sub = store.subscribe().await.unwrap();

        let initial = sub.recv().await.unwrap();
        assert!(initial.contacts.is_empty());
        assert!(initial.events.is_empty());

        let id = store.add_contact(make_draft("Jane", "Doe")).await.unwrap();

        let snapshot = timeout(Duration::from_secs(5), async {
            loop {
                let snapshot = sub.recv().await.expect("subscription closed early");
                if !snapshot.contacts.is_empty() {
                    return snapshot;
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(snapshot.contacts.len(), 1);
        assert_eq!(snapshot.contacts[0].id, id);
    }

    #[tokio::test]
    async fn test_unsubscribe_is_idempotent_and_stops_delivery() {
        let store = make_store();
        let mut sub = store.subscribe().await.unwrap();

        let initial = sub.recv().await.unwrap();
        assert!(initial.contacts.is_empty());

        sub.unsubscribe();
        sub.unsubscribe();

        store.add_contact(make_draft("Jane", "Doe")).await.unwrap();

        // The forwarding task is gone; nothing after the teardown point may
        // reach the observer, and the drained channel closes cleanly.
        while let Some(snapshot) = timeout(Duration::from_secs(5), sub.recv())
            .await
            .expect("subscription did not close")
        {
            assert!(snapshot.contacts.is_empty());
        }
    }

    // A backend whose every call is rejected, for checking that remote
    // failures surface unretried.
    struct UnreachableStore;

    fn rejected<T>() -> RolodirResult<T> {
        Err(RolodirError::RemoteUnavailable("connection refused".into()))
    }

    #[async_trait]
    impl RecordStore for UnreachableStore {
        async fn subscribe(
            &self,
            _collection: &CollectionPath,
        ) -> RolodirResult<watch::Receiver<Records>> {
            rejected()
        }

        async fn set(&self, _record: &RecordPath, _value: Value) -> RolodirResult<()> {
            rejected()
        }

        async fn merge(
            &self,
            _record: &RecordPath,
            _fields: serde_json::Map<String, Value>,
        ) -> RolodirResult<()> {
            rejected()
        }

        async fn remove(&self, _record: &RecordPath) -> RolodirResult<()> {
            rejected()
        }

        async fn query_by_field(
            &self,
            _collection: &CollectionPath,
            _field: &str,
            _value: &Value,
        ) -> RolodirResult<Records> {
            rejected()
        }
    }

    #[tokio::test]
    async fn test_remote_failures_propagate_unretried() {
        let store = ContactStore::new(Arc::new(UnreachableStore), Some("uid-1".to_string()));

        let err = store
            .add_contact(make_draft("Jane", "Doe"))
            .await
            .unwrap_err();
        assert!(matches!(err, RolodirError::RemoteUnavailable(_)));

        let err = store.delete_contact("c-1").await.unwrap_err();
        assert!(matches!(err, RolodirError::RemoteUnavailable(_)));

        let err = store.subscribe().await.unwrap_err();
        assert!(matches!(err, RolodirError::RemoteUnavailable(_)));
    }
}
