//! Calendar-grid bucketing.
//!
//! The calendar renders a window of whole days as columns, with one row per
//! hour. Events are bucketed by the calendar day and hour their start time
//! falls on in the viewer's time zone (not a sliding 24-hour window).

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate, TimeZone, Timelike};

use crate::calendar_event::CalendarEvent;

/// How many day columns the calendar shows at once.
///
/// Month view is a fixed 5-week, 35-day grid starting from the selected date.
/// It is deliberately not aligned to calendar-month boundaries; see DESIGN.md.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarView {
    Day,
    ThreeDay,
    Week,
    Month,
}

/// Which way a navigation step moves the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Previous,
    Next,
}

impl CalendarView {
    pub fn span_days(&self) -> u64 {
        match self {
            CalendarView::Day => 1,
            CalendarView::ThreeDay => 3,
            CalendarView::Week => 7,
            CalendarView::Month => 35,
        }
    }

    /// The day columns shown when the window starts at `start`.
    pub fn days(&self, start: NaiveDate) -> Vec<NaiveDate> {
        (0..self.span_days())
            .map(|offset| start + Days::new(offset))
            .collect()
    }

    /// Move the window start one unit in `direction`. A unit is the view's
    /// full span, so stepping never skips or re-shows a day.
    pub fn step(&self, start: NaiveDate, direction: StepDirection) -> NaiveDate {
        let span = Days::new(self.span_days());
        match direction {
            StepDirection::Previous => start - span,
            StepDirection::Next => start + span,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            CalendarView::Day => "day",
            CalendarView::ThreeDay => "3day",
            CalendarView::Week => "week",
            CalendarView::Month => "month",
        }
    }
}

impl fmt::Display for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CalendarView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(CalendarView::Day),
            "3day" => Ok(CalendarView::ThreeDay),
            "week" => Ok(CalendarView::Week),
            "month" => Ok(CalendarView::Month),
            other => Err(format!(
                "Unknown view '{}'. Expected one of: day, 3day, week, month",
                other
            )),
        }
    }
}

/// Events whose start time falls on `day` in the given time zone.
pub fn events_on_day<'a, Tz: TimeZone>(
    events: &'a [CalendarEvent],
    day: NaiveDate,
    tz: &Tz,
) -> Vec<&'a CalendarEvent> {
    events
        .iter()
        .filter(|event| event.start_time.with_timezone(tz).date_naive() == day)
        .collect()
}

/// The day bucket narrowed to one hour slot (0-23).
pub fn events_in_hour<'a, Tz: TimeZone>(
    events: &'a [CalendarEvent],
    day: NaiveDate,
    hour: u32,
    tz: &Tz,
) -> Vec<&'a CalendarEvent> {
    events
        .iter()
        .filter(|event| {
            let local = event.start_time.with_timezone(tz);
            local.date_naive() == day && local.hour() == hour
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar_event::EventDuration;
    use chrono::{TimeZone, Utc};
    use chrono_tz::Europe::Stockholm;

    fn make_event(id: &str, start: chrono::DateTime<Utc>) -> CalendarEvent {
        CalendarEvent {
            id: id.to_string(),
            contact_id: "c-1".to_string(),
            start_time: start,
            duration: EventDuration::Min30,
            note: String::new(),
        }
    }

    #[test]
    fn test_event_lands_in_its_day_and_hour_bucket_only() {
        let events = vec![make_event(
            "ev-1",
            Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap(),
        )];
        let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

        assert_eq!(events_on_day(&events, day, &Utc).len(), 1);
        assert!(events_on_day(&events, day.succ_opt().unwrap(), &Utc).is_empty());

        for hour in 0..24 {
            let bucket = events_in_hour(&events, day, hour, &Utc);
            if hour == 14 {
                assert_eq!(bucket.len(), 1);
            } else {
                assert!(bucket.is_empty(), "unexpected event at hour {}", hour);
            }
        }
    }

    #[test]
    fn test_bucketing_follows_the_viewer_time_zone() {
        // 23:30 UTC on March 5th is 00:30 on March 6th in Stockholm (CET).
        let events = vec![make_event(
            "ev-1",
            Utc.with_ymd_and_hms(2024, 3, 5, 23, 30, 0).unwrap(),
        )];

        let utc_day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let stockholm_day = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();

        assert_eq!(events_on_day(&events, utc_day, &Utc).len(), 1);
        assert!(events_on_day(&events, stockholm_day, &Utc).is_empty());

        assert!(events_on_day(&events, utc_day, &Stockholm).is_empty());
        assert_eq!(events_on_day(&events, stockholm_day, &Stockholm).len(), 1);
        assert_eq!(events_in_hour(&events, stockholm_day, 0, &Stockholm).len(), 1);
    }

    #[test]
    fn test_view_spans() {
        assert_eq!(CalendarView::Day.span_days(), 1);
        assert_eq!(CalendarView::ThreeDay.span_days(), 3);
        assert_eq!(CalendarView::Week.span_days(), 7);
        // Month is the fixed 5-week grid, not the calendar month.
        assert_eq!(CalendarView::Month.span_days(), 35);
    }

    #[test]
    fn test_view_days_enumerates_consecutive_columns() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 27).unwrap();
        let days = CalendarView::ThreeDay.days(start);
        assert_eq!(
            days,
            vec![
                NaiveDate::from_ymd_opt(2024, 2, 27).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 28).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            ]
        );

        assert_eq!(CalendarView::Month.days(start).len(), 35);
    }

    #[test]
    fn test_step_moves_by_the_view_span() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

        assert_eq!(
            CalendarView::Week.step(start, StepDirection::Next),
            NaiveDate::from_ymd_opt(2024, 3, 12).unwrap()
        );
        assert_eq!(
            CalendarView::Week.step(start, StepDirection::Previous),
            NaiveDate::from_ymd_opt(2024, 2, 27).unwrap()
        );
        assert_eq!(
            CalendarView::Month.step(start, StepDirection::Next),
            NaiveDate::from_ymd_opt(2024, 4, 9).unwrap()
        );
    }

    #[test]
    fn test_view_names_roundtrip() {
        for view in [
            CalendarView::Day,
            CalendarView::ThreeDay,
            CalendarView::Week,
            CalendarView::Month,
        ] {
            assert_eq!(view.to_string().parse::<CalendarView>().unwrap(), view);
        }
        assert!("fortnight".parse::<CalendarView>().is_err());
    }
}
