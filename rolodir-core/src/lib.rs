//! Core types for the rolodir ecosystem.
//!
//! This crate provides the contact/event store shared by rolodir-cli and
//! rolodir-server:
//! - `Contact` and `CalendarEvent` types with their draft/patch forms
//! - `ContactStore` for mutations, cascade delete, and live subscriptions
//! - the `RecordStore` backend boundary and its in-process `MemoryStore`
//! - contact search and calendar-grid bucketing helpers

pub mod calendar_event;
pub mod config;
pub mod contact;
pub mod error;
pub mod memory;
pub mod record_path;
pub mod record_store;
pub mod schedule;
pub mod search;
pub mod store;

// Re-export the everyday types at crate root for convenience
pub use calendar_event::{CalendarEvent, EventDraft, EventDuration};
pub use contact::{Contact, ContactDraft, ContactPatch};
pub use error::{RolodirError, RolodirResult};
pub use memory::MemoryStore;
pub use schedule::{CalendarView, StepDirection};
pub use store::{ContactStore, StoreSnapshot, Subscription};
