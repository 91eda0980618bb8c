use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{NimbusError, Result};

/// Accepted date-time input patterns, tried in priority order. The first
/// entry doubles as the canonical pattern written to storage.
const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H%M",
    "%d/%m/%Y %H%M",
    "%b %d %Y %H%M",
    "%d %m %Y %H%M",
];

const DATE_TIME_EXAMPLES: [&str; 4] = [
    "2023-10-15 1800",
    "15/10/2023 1800",
    "Oct 15 2023 1800",
    "15 10 2023 1800",
];

/// Date-only variants of the same patterns, used by date search.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%b %d %Y", "%d %m %Y"];

const DATE_EXAMPLES: [&str; 4] = ["2023-10-15", "15/10/2023", "Oct 15 2023", "15 10 2023"];

const STORAGE_FORMAT: &str = DATE_TIME_FORMATS[0];
const DISPLAY_FORMAT: &str = "%b %d %Y, %-I:%M %P";
const DISPLAY_DATE_FORMAT: &str = "%b %d %Y";

/// Parses a date-time against each accepted pattern in order, returning the
/// first match. Failures of earlier patterns are not errors; only exhausting
/// the whole list is.
pub fn parse_date_time(input: &str) -> Result<NaiveDateTime> {
    let input = input.trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .ok_or_else(|| NimbusError::InvalidDateFormat {
            examples: example_list(&DATE_TIME_EXAMPLES),
        })
}

/// Same probing as [`parse_date_time`] but for calendar dates without a time
/// component, as entered after `find_date`.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
        .ok_or_else(|| NimbusError::InvalidDateFormat {
            examples: example_list(&DATE_EXAMPLES),
        })
}

/// Formats a date-time in the canonical machine-readable storage form.
pub fn format_storage(value: NaiveDateTime) -> String {
    value.format(STORAGE_FORMAT).to_string()
}

/// Formats a date-time for human display, e.g. `Dec 01 2023, 6:00 pm`.
pub fn format_display(value: NaiveDateTime) -> String {
    value.format(DISPLAY_FORMAT).to_string()
}

pub fn format_display_date(value: NaiveDate) -> String {
    value.format(DISPLAY_DATE_FORMAT).to_string()
}

fn example_list(examples: &[&str]) -> String {
    examples
        .iter()
        .map(|example| format!(" - {example}"))
        .collect::<Vec<_>>()
        .join("\n")
}
