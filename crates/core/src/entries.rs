//! Diary entry field rules: validation limits, normalization, word counting.
//!
//! Title and content are the only required fields. Everything else is
//! normalized rather than rejected: blank moods become `None`, tags are
//! trimmed and de-duplicated.

use chrono::NaiveDateTime;

use crate::error::CoreError;
use crate::search::{parse_date_bound, DateBound};
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Validation limits
// ---------------------------------------------------------------------------

/// Maximum length of an entry title, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length of an entry body, in characters.
pub const MAX_CONTENT_LEN: usize = 50_000;

/// Maximum length of a mood label, in characters.
pub const MAX_MOOD_LEN: usize = 50;

/// Maximum number of tags on a single entry.
pub const MAX_TAGS: usize = 30;

/// Maximum length of a single tag, in characters.
pub const MAX_TAG_LEN: usize = 50;

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate an entry title: non-blank and within length limit.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    validate_required_text("title", title, MAX_TITLE_LEN)
}

/// Validate an entry body: non-blank and within length limit.
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    validate_required_text("content", content, MAX_CONTENT_LEN)
}

fn validate_required_text(field: &str, value: &str, max_len: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(CoreError::Validation(format!(
            "{field} too long: {len} chars (max {max_len})"
        )));
    }
    Ok(())
}

/// Normalize a mood label. Blank or missing moods become `None`.
pub fn normalize_mood(mood: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(mood) = mood.map(str::trim).filter(|m| !m.is_empty()) else {
        return Ok(None);
    };
    let len = mood.chars().count();
    if len > MAX_MOOD_LEN {
        return Err(CoreError::Validation(format!(
            "mood too long: {len} chars (max {MAX_MOOD_LEN})"
        )));
    }
    Ok(Some(mood.to_string()))
}

/// Normalize a tag list.
///
/// - Trims each tag and drops blanks.
/// - Removes duplicates, keeping the first occurrence and the original order.
/// - Rejects lists longer than [`MAX_TAGS`] and tags longer than [`MAX_TAG_LEN`].
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> Result<Vec<String>, CoreError> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());

    for tag in tags {
        let tag = tag.as_ref().trim();
        if tag.is_empty() || normalized.iter().any(|t| t == tag) {
            continue;
        }
        let len = tag.chars().count();
        if len > MAX_TAG_LEN {
            return Err(CoreError::Validation(format!(
                "tag '{tag}' too long: {len} chars (max {MAX_TAG_LEN})"
            )));
        }
        normalized.push(tag.to_string());
    }

    if normalized.len() > MAX_TAGS {
        return Err(CoreError::Validation(format!(
            "too many tags: {} (max {MAX_TAGS})",
            normalized.len()
        )));
    }

    Ok(normalized)
}

/// Parse a user-supplied `entry_date`.
///
/// Accepts an RFC 3339 timestamp, a `datetime-local` style value
/// (`YYYY-MM-DDTHH:MM[:SS]`, taken as UTC), or a plain `YYYY-MM-DD` date
/// (midnight UTC). Blank input yields `None` so the caller can default it.
pub fn parse_entry_date(value: &str) -> Result<Option<Timestamp>, CoreError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(Some(naive.and_utc()));
        }
    }

    parse_date_bound(value, DateBound::Start)
        .map(Some)
        .map_err(|_| CoreError::Validation(format!("Invalid entry_date '{value}'")))
}

/// Count whitespace-separated words in an entry body.
pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
