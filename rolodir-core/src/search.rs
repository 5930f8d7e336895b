//! Client-side contact search.
//!
//! Substring matching over the contact list: the full name and email are
//! compared case-insensitively, the phone is compared as a raw substring
//! (case-sensitive). The asymmetry is intentional and preserved; see
//! DESIGN.md. An empty query matches every contact.

use crate::contact::Contact;

/// Whether a contact matches the query.
pub fn matches(contact: &Contact, query: &str) -> bool {
    let needle = query.to_lowercase();

    contact.full_name().to_lowercase().contains(&needle)
        || contact.email.to_lowercase().contains(&needle)
        || contact.phone.contains(query)
}

/// Filter a contact list down to the query matches, preserving order.
pub fn filter_contacts<'a>(contacts: &'a [Contact], query: &str) -> Vec<&'a Contact> {
    contacts
        .iter()
        .filter(|contact| matches(contact, query))
        .collect()
}
