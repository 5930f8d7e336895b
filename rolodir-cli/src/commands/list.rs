use anyhow::Result;
use owo_colors::OwoColorize;
use rolodir_core::{ContactStore, MemoryStore, search};

pub async fn run(store: &ContactStore<MemoryStore>, query: &str) -> Result<()> {
    let mut contacts = store.contacts().await?;
    contacts.sort_by(|a, b| {
        (a.last_name.to_lowercase(), a.first_name.to_lowercase())
            .cmp(&(b.last_name.to_lowercase(), b.first_name.to_lowercase()))
    });

    let matches = search::filter_contacts(&contacts, query);

    if matches.is_empty() {
        if query.is_empty() {
            println!("{}", "No contacts yet".dimmed());
        } else {
            println!("{}", format!("No contacts match \"{}\"", query).dimmed());
        }
        return Ok(());
    }

    for contact in matches {
        let star = if contact.favorite { "★ " } else { "  " };
        println!("{}{}", star.yellow(), contact.full_name().bold());
        println!("    {}  {}", contact.email, contact.phone.dimmed());
        println!("    {}", contact.id.dimmed());
    }

    Ok(())
}
