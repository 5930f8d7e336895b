use anyhow::Result;
use owo_colors::OwoColorize;
use rolodir_core::{ContactPatch, ContactStore, MemoryStore};

use super::resolve_contact;

pub async fn run(
    store: &ContactStore<MemoryStore>,
    reference: &str,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    avatar: Option<String>,
) -> Result<()> {
    let contact = resolve_contact(store, reference).await?;

    let patch = ContactPatch {
        first_name,
        last_name,
        email,
        phone,
        avatar,
        favorite: None,
    };

    if patch.is_empty() {
        anyhow::bail!(
            "Nothing to update. Pass at least one of:\n  \
            --first-name, --last-name, --email, --phone, --avatar"
        );
    }

    store.update_contact(&contact.id, patch).await?;

    println!("{}", format!("Updated {}", contact.full_name()).green());
    Ok(())
}
