use std::collections::HashMap;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use owo_colors::OwoColorize;
use rolodir_core::schedule::{events_in_hour, events_on_day};
use rolodir_core::{CalendarEvent, CalendarView, ContactStore, EventDuration, MemoryStore};

use crate::render::{format_date_label, format_hour, format_time};

pub async fn run(
    store: &ContactStore<MemoryStore>,
    date: Option<&str>,
    view: CalendarView,
) -> Result<()> {
    let start = match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| anyhow::anyhow!("Invalid date format '{}'. Expected YYYY-MM-DD", s))?,
        None => Local::now().date_naive(),
    };

    let events = store.events().await?;
    let contacts = store.contacts().await?;
    let names: HashMap<&str, String> = contacts
        .iter()
        .map(|c| (c.id.as_str(), c.full_name()))
        .collect();

    let mut printed_any = false;

    for day in view.days(start) {
        let day_events = events_on_day(&events, day, &Local);
        if day_events.is_empty() {
            continue;
        }

        if printed_any {
            println!();
        }
        printed_any = true;
        println!("{}", format_date_label(day).bold());

        // All-day events first, then one block per hour slot.
        for event in day_events
            .iter()
            .copied()
            .filter(|e| e.duration == EventDuration::AllDay)
        {
            println!("  {}", "all day".dimmed());
            println!("    {}", line_for(event, &names));
        }

        for hour in 0..24 {
            let slot: Vec<&CalendarEvent> = events_in_hour(&events, day, hour, &Local)
                .into_iter()
                .filter(|e| e.duration != EventDuration::AllDay)
                .collect();
            if slot.is_empty() {
                continue;
            }

            println!("  {}", format_hour(hour).dimmed());
            for event in slot {
                let time = format_time(event.start_time.with_timezone(&Local));
                println!("    {}  {}", time, line_for(event, &names));
            }
        }
    }

    if !printed_any {
        println!(
            "{}",
            format!("No events in this {} window", view).dimmed()
        );
    }

    Ok(())
}

fn line_for(event: &CalendarEvent, names: &HashMap<&str, String>) -> String {
    let who = names
        .get(event.contact_id.as_str())
        .cloned()
        .unwrap_or_else(|| "(unknown contact)".to_string());

    if event.note.is_empty() {
        format!("{} ({})", who, event.duration.label())
    } else {
        format!("{} ({}): {}", who, event.duration.label(), event.note)
    }
}
