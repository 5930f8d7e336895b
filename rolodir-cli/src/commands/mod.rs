pub mod add;
pub mod agenda;
pub mod cancel;
pub mod config;
pub mod favorite;
pub mod list;
pub mod login;
pub mod remove;
pub mod schedule;
pub mod update;

use anyhow::Result;
use rolodir_core::{Contact, ContactStore, MemoryStore, search};

/// Resolve a contact argument: an exact id wins, otherwise it is treated as a
/// search query that must match exactly one contact.
pub async fn resolve_contact(
    store: &ContactStore<MemoryStore>,
    reference: &str,
) -> Result<Contact> {
    let contacts = store.contacts().await?;

    if let Some(contact) = contacts.iter().find(|c| c.id == reference) {
        return Ok(contact.clone());
    }

    let matches = search::filter_contacts(&contacts, reference);
    match matches.len() {
        0 => anyhow::bail!("No contact matches \"{}\"", reference),
        1 => Ok(matches[0].clone()),
        _ => {
            let names: Vec<String> = matches
                .iter()
                .map(|c| format!("  {}  {}", c.id, c.full_name()))
                .collect();
            anyhow::bail!(
                "\"{}\" matches more than one contact:\n{}\n\nUse the id instead.",
                reference,
                names.join("\n")
            )
        }
    }
}
