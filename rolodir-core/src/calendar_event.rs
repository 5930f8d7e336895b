//! Calendar event types.
//!
//! Events reference a contact by id and carry a start instant plus one of a
//! fixed set of durations. They are created and deleted, never edited in
//! place.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A calendar event attached to a contact.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    /// Id of the contact this event belongs to. Referential integrity is only
    /// maintained by the delete cascade; a dangling reference is accepted.
    pub contact_id: String,
    pub start_time: DateTime<Utc>,
    pub duration: EventDuration,
    pub note: String,
}

impl CalendarEvent {
    /// Decode a stored record, attaching the collection key as the id.
    pub fn from_record(id: &str, value: &Value) -> Option<CalendarEvent> {
        let record: EventRecord = serde_json::from_value(value.clone()).ok()?;
        Some(CalendarEvent {
            id: id.to_string(),
            contact_id: record.contact_id,
            start_time: record.start_time,
            duration: record.duration,
            note: record.note,
        })
    }
}

/// The record shape persisted in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub contact_id: String,
    pub start_time: DateTime<Utc>,
    pub duration: EventDuration,
    #[serde(default)]
    pub note: String,
}

/// Fields submitted when scheduling an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub contact_id: String,
    pub start_time: DateTime<Utc>,
    pub duration: EventDuration,
    #[serde(default)]
    pub note: String,
}

impl EventDraft {
    pub(crate) fn into_record(self) -> EventRecord {
        EventRecord {
            contact_id: self.contact_id,
            start_time: self.start_time,
            duration: self.duration,
            note: self.note,
        }
    }
}

/// The fixed duration choices offered by the event form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventDuration {
    #[serde(rename = "15min")]
    Min15,
    #[serde(rename = "30min")]
    Min30,
    #[serde(rename = "1hr")]
    Hour1,
    #[serde(rename = "2hr")]
    Hour2,
    #[serde(rename = "allday")]
    AllDay,
}

impl EventDuration {
    /// Length in minutes; None for all-day events.
    pub fn minutes(&self) -> Option<i64> {
        match self {
            EventDuration::Min15 => Some(15),
            EventDuration::Min30 => Some(30),
            EventDuration::Hour1 => Some(60),
            EventDuration::Hour2 => Some(120),
            EventDuration::AllDay => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventDuration::Min15 => "15 minutes",
            EventDuration::Min30 => "30 minutes",
            EventDuration::Hour1 => "1 hour",
            EventDuration::Hour2 => "2 hours",
            EventDuration::AllDay => "All day",
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            EventDuration::Min15 => "15min",
            EventDuration::Min30 => "30min",
            EventDuration::Hour1 => "1hr",
            EventDuration::Hour2 => "2hr",
            EventDuration::AllDay => "allday",
        }
    }
}

impl fmt::Display for EventDuration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventDuration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "15min" => Ok(EventDuration::Min15),
            "30min" => Ok(EventDuration::Min30),
            "1hr" => Ok(EventDuration::Hour1),
            "2hr" => Ok(EventDuration::Hour2),
            "allday" => Ok(EventDuration::AllDay),
            other => Err(format!(
                "Unknown duration '{}'. Expected one of: 15min, 30min, 1hr, 2hr, allday",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_duration_wire_names() {
        for (duration, name) in [
            (EventDuration::Min15, "15min"),
            (EventDuration::Min30, "30min"),
            (EventDuration::Hour1, "1hr"),
            (EventDuration::Hour2, "2hr"),
            (EventDuration::AllDay, "allday"),
        ] {
            assert_eq!(serde_json::to_value(duration).unwrap(), name);
            assert_eq!(name.parse::<EventDuration>().unwrap(), duration);
        }
        assert!("90min".parse::<EventDuration>().is_err());
    }

    #[test]
    fn test_event_record_roundtrip() {
        let record = EventRecord {
            contact_id: "c-1".to_string(),
            start_time: Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap(),
            duration: EventDuration::Min30,
            note: "Coffee".to_string(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("contactId").is_some());
        assert!(value.get("startTime").is_some());

        let event = CalendarEvent::from_record("ev-1", &value).unwrap();
        assert_eq!(event.id, "ev-1");
        assert_eq!(event.contact_id, "c-1");
        assert_eq!(event.duration.minutes(), Some(30));
    }
}
