use anyhow::Result;
use chrono::{Local, TimeZone, Utc};
use owo_colors::OwoColorize;
use rolodir_core::{ContactStore, EventDraft, EventDuration, MemoryStore};

use super::resolve_contact;
use crate::render::format_time;

pub async fn run(
    store: &ContactStore<MemoryStore>,
    reference: &str,
    at: &str,
    duration: EventDuration,
    note: String,
) -> Result<()> {
    let contact = resolve_contact(store, reference).await?;
    let start_time = parse_start(at)?;

    let draft = EventDraft {
        contact_id: contact.id.clone(),
        start_time,
        duration,
        note,
    };
    let id = store.add_event(draft).await?;

    println!(
        "{}",
        format!(
            "Scheduled {} with {} ({})",
            format_time(start_time.with_timezone(&Local)),
            contact.full_name(),
            duration.label()
        )
        .green()
    );
    println!("  {}", id.dimmed());
    Ok(())
}

/// Parse a human date/time in local time (e.g. "tomorrow 3pm").
fn parse_start(input: &str) -> Result<chrono::DateTime<Utc>> {
    let naive = fuzzydate::parse(input)
        .map_err(|_| anyhow::anyhow!("Could not parse date/time: \"{}\"", input))?;

    let local = Local
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| anyhow::anyhow!("Ambiguous local time: \"{}\"", input))?;

    Ok(local.with_timezone(&Utc))
}
