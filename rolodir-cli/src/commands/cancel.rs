use anyhow::Result;
use owo_colors::OwoColorize;
use rolodir_core::{ContactStore, MemoryStore};

pub async fn run(store: &ContactStore<MemoryStore>, event_id: &str) -> Result<()> {
    let events = store.events().await?;

    if !events.iter().any(|e| e.id == event_id) {
        anyhow::bail!("No event with id {}", event_id);
    }

    store.delete_event(event_id).await?;

    println!("{}", "Event cancelled".green());
    Ok(())
}
