use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use rolodir_core::{ContactStore, MemoryStore};

use super::resolve_contact;

pub async fn run(store: &ContactStore<MemoryStore>, reference: &str, force: bool) -> Result<()> {
    let contact = resolve_contact(store, reference).await?;

    let events = store.events().await?;
    let attached = events
        .iter()
        .filter(|e| e.contact_id == contact.id)
        .count();

    // Confirm unless --force
    if !force {
        let prompt = if attached == 0 {
            format!("Remove {}?", contact.full_name())
        } else {
            format!(
                "Remove {} and {} scheduled {}?",
                contact.full_name(),
                attached,
                if attached == 1 { "event" } else { "events" }
            )
        };

        let confirmed = Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    store.delete_contact(&contact.id).await?;

    println!("{}", format!("Removed {}", contact.full_name()).green());
    if attached > 0 {
        println!(
            "  {}",
            format!("{} event(s) removed with them", attached).dimmed()
        );
    }

    Ok(())
}
