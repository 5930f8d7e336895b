use anyhow::Result;
use owo_colors::OwoColorize;
use rolodir_core::{ContactPatch, ContactStore, MemoryStore};

use super::resolve_contact;

pub async fn run(store: &ContactStore<MemoryStore>, reference: &str) -> Result<()> {
    let contact = resolve_contact(store, reference).await?;

    let patch = ContactPatch {
        favorite: Some(!contact.favorite),
        ..Default::default()
    };
    store.update_contact(&contact.id, patch).await?;

    if contact.favorite {
        println!("Unstarred {}", contact.full_name());
    } else {
        println!("{} {}", "★".yellow(), contact.full_name());
    }

    Ok(())
}
