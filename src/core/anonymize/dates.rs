//! Temporal cell parsing and day-offset shifting
//!
//! Every cell of every column is a shift candidate, so parsing is driven by
//! an explicit format list rather than a liberal parser: bare integers,
//! identifiers, and free text must never be mistaken for dates. Values that
//! do parse are re-serialized at their apparent precision after shifting.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// A cell value recognized as temporal
#[derive(Debug, Clone, PartialEq)]
pub enum Temporal {
    /// A pure calendar date
    Date(NaiveDate),
    /// A date plus time of day
    DateTime {
        value: NaiveDateTime,
        /// Input used the ISO `T` separator rather than a space
        iso_t: bool,
        /// Input carried a seconds component
        with_seconds: bool,
    },
    /// A pure time of day; a day offset cannot move it
    TimeOfDay,
}

/// Pure-date formats, most specific first
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Attempts to parse a cell as a temporal value.
///
/// Returns `None` for anything outside the accepted format list.
pub fn parse_temporal(cell: &str) -> Option<Temporal> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(Temporal::Date(date));
        }
    }

    let second_formats = [
        ("%Y-%m-%dT%H:%M:%S%.f", true),
        ("%Y-%m-%d %H:%M:%S%.f", false),
        ("%m/%d/%Y %H:%M:%S%.f", false),
    ];
    for (format, iso_t) in second_formats {
        if let Ok(value) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(Temporal::DateTime {
                value,
                iso_t,
                with_seconds: true,
            });
        }
    }

    let minute_formats = [("%Y-%m-%dT%H:%M", true), ("%Y-%m-%d %H:%M", false)];
    for (format, iso_t) in minute_formats {
        if let Ok(value) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(Temporal::DateTime {
                value,
                iso_t,
                with_seconds: false,
            });
        }
    }

    for format in ["%H:%M:%S", "%H:%M"] {
        if NaiveTime::parse_from_str(trimmed, format).is_ok() {
            return Some(Temporal::TimeOfDay);
        }
    }

    None
}

/// Shifts a temporal cell by a signed number of days.
///
/// Returns `None` when the cell is not temporal (caller passes it through
/// unchanged). Time-of-day values come back unchanged: shifting a clock time
/// by whole days is the identity.
///
/// Re-serialization preserves apparent precision: pure dates (including
/// non-ISO inputs) come back as `%Y-%m-%d`, timestamps keep their separator
/// and seconds/fraction precision, and a timestamp at exactly midnight
/// collapses to a bare date.
pub fn shift_date_cell(cell: &str, days: i64) -> Option<String> {
    match parse_temporal(cell)? {
        Temporal::Date(date) => {
            let shifted = date + Duration::days(days);
            Some(shifted.format("%Y-%m-%d").to_string())
        }
        Temporal::DateTime {
            value,
            iso_t,
            with_seconds,
        } => {
            let shifted = value + Duration::days(days);
            if shifted.time() == NaiveTime::MIN {
                return Some(shifted.format("%Y-%m-%d").to_string());
            }
            let sep = if iso_t { 'T' } else { ' ' };
            let time_format = if with_seconds { "%H:%M:%S%.f" } else { "%H:%M" };
            Some(format!(
                "{}{}{}",
                shifted.format("%Y-%m-%d"),
                sep,
                shifted.format(time_format)
            ))
        }
        Temporal::TimeOfDay => Some(cell.to_string()),
    }
}
