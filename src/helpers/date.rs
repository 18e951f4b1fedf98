//! Date helper functions

use chrono::{DateTime, TimeZone};

/// Format a date with a chrono format string
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format(format).to_string()
}

/// Format a date in ISO 8601 / Atom format
pub fn date_xml<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}
