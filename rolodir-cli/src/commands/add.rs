use anyhow::Result;
use owo_colors::OwoColorize;
use rolodir_core::{ContactDraft, ContactStore, MemoryStore};

pub async fn run(
    store: &ContactStore<MemoryStore>,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    avatar: Option<String>,
) -> Result<()> {
    let draft = ContactDraft {
        first_name,
        last_name,
        email,
        phone,
        avatar,
    };
    draft.validate()?;

    let name = format!("{} {}", draft.first_name, draft.last_name);
    let id = store.add_contact(draft).await?;

    println!("{}", format!("Added {}", name).green());
    println!("  {}", id.dimmed());
    Ok(())
}
