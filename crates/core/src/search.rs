//! List filter helpers: pagination bounds, search terms, date bounds.
//!
//! The repository layer turns these into SQL; the helpers here only decide
//! what the user asked for.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of entries per page.
pub const DEFAULT_LIST_LIMIT: i64 = 100;

/// Maximum number of entries per page.
pub const MAX_LIST_LIMIT: i64 = 500;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Parse an integer query parameter. A missing or blank value is unset.
pub fn parse_integer_param(name: &str, value: Option<&str>) -> Result<Option<i64>, CoreError> {
    non_blank(value)
        .map(|v| {
            v.parse::<i64>()
                .map_err(|_| CoreError::Validation(format!("{name} must be an integer, got '{v}'")))
        })
        .transpose()
}

// ---------------------------------------------------------------------------
// Text search
// ---------------------------------------------------------------------------

/// Normalize a free-text search term for case-insensitive matching.
///
/// Returns `None` when the input is missing or blank, meaning "no filter".
pub fn normalize_search_term(term: Option<&str>) -> Option<String> {
    term.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

/// The lowercased text a search term is matched against.
///
/// Title and content are joined by a unit separator so a term never matches
/// across the boundary.
pub fn searchable_text(title: &str, content: &str) -> String {
    format!("{}\u{1F}{}", title.to_lowercase(), content.to_lowercase())
}

/// Return a filter value only if it carries something other than whitespace.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Date bounds
// ---------------------------------------------------------------------------

/// Which end of a date range a user-supplied value bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    Start,
    End,
}

/// Parse a date range bound.
///
/// Accepts either a full RFC 3339 timestamp (used as-is) or a plain
/// `YYYY-MM-DD` date, which expands to the first instant of that day for a
/// start bound and the last instant for an end bound so ranges are inclusive.
pub fn parse_date_bound(value: &str, bound: DateBound) -> Result<Timestamp, CoreError> {
    let value = value.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        CoreError::Validation(format!(
            "Invalid date '{value}'. Expected YYYY-MM-DD or an RFC 3339 timestamp"
        ))
    })?;

    let time = match bound {
        DateBound::Start => NaiveTime::MIN,
        DateBound::End => NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
            .ok_or_else(|| CoreError::Internal("invalid end-of-day time".into()))?,
    };

    Ok(date.and_time(time).and_utc())
}

/// Parse an optional start/end pair and check that the range is not inverted.
pub fn parse_date_range(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<(Option<Timestamp>, Option<Timestamp>), CoreError> {
    let start = non_blank(start)
        .map(|s| parse_date_bound(s, DateBound::Start))
        .transpose()?;
    let end = non_blank(end)
        .map(|e| parse_date_bound(e, DateBound::End))
        .transpose()?;

    if let (Some(s), Some(e)) = (start, end) {
        if s > e {
            return Err(CoreError::Validation(
                "start_date must not be after end_date".to_string(),
            ));
        }
    }

    Ok((start, end))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
