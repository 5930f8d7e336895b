//! Terminal formatting helpers for dates and times.

use chrono::{DateTime, Local, NaiveDate, Timelike};

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
pub fn format_date_label(date: NaiveDate) -> String {
    let today = Local::now().date_naive();

    let diff = (date - today).num_days();
    match diff {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}

/// Format an hour slot label the way the calendar grid shows it (e.g. "2 PM")
pub fn format_hour(hour: u32) -> String {
    let period = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{} {}", display_hour, period)
}

/// Format a clock time (e.g. "2:30 PM")
pub fn format_time(time: DateTime<Local>) -> String {
    let minute = time.minute();
    let base = format_hour(time.hour());

    match base.split_once(' ') {
        Some((hour, period)) => format!("{}:{:02} {}", hour, minute, period),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_hour() {
        assert_eq!(format_hour(0), "12 AM");
        assert_eq!(format_hour(9), "9 AM");
        assert_eq!(format_hour(12), "12 PM");
        assert_eq!(format_hour(14), "2 PM");
        assert_eq!(format_hour(23), "11 PM");
    }

    #[test]
    fn test_format_time() {
        let time = Local.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap();
        assert_eq!(format_time(time), "2:30 PM");

        let midnight = Local.with_ymd_and_hms(2024, 3, 5, 0, 5, 0).unwrap();
        assert_eq!(format_time(midnight), "12:05 AM");
    }
}
