//! Countdown to the next check-in and the locale date/time format used
//! across the UI.

use std::fmt;

use chrono::{DateTime, Local, TimeZone, Utc};

pub const DATE_TIME_FORMAT: &str = "%b %-d, %Y, %I:%M:%S %p";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Countdown {
    Overdue,
    Remaining { minutes: i64, seconds: i64 },
}

impl Countdown {
    /// Time left until `due`. Anything at or past the deadline is overdue.
    pub fn between(due: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let millis = (due - now).num_milliseconds();
        if millis <= 0 {
            return Countdown::Overdue;
        }
        let total_seconds = millis / 1000;
        Countdown::Remaining {
            minutes: total_seconds / 60,
            seconds: total_seconds % 60,
        }
    }

    pub fn is_overdue(&self) -> bool {
        matches!(self, Countdown::Overdue)
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::Overdue => f.write_str("OVERDUE!"),
            Countdown::Remaining { minutes, seconds } => write!(f, "{minutes:02}:{seconds:02}"),
        }
    }
}

pub fn format_date_time<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    at.format(DATE_TIME_FORMAT).to_string()
}

/// `at` rendered in the viewer's local zone.
pub fn local_date_time(at: DateTime<Utc>) -> String {
    format_date_time(&at.with_timezone(&Local))
}
