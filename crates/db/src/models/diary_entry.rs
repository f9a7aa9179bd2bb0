//! Diary entry model and DTOs.

use chrono::Utc;
use entrepaginas_core::entries::{
    normalize_mood, normalize_tags, parse_entry_date, validate_content, validate_title,
};
use entrepaginas_core::error::CoreError;
use entrepaginas_core::report::{ReportEntry, ReportFilters};
use entrepaginas_core::search::{
    clamp_limit, clamp_offset, non_blank, normalize_search_term, parse_date_range,
    parse_integer_param, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT,
};
use entrepaginas_core::stats::EntryFacts;
use entrepaginas_core::types::{DbId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `diary_entries` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct DiaryEntry {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub mood: Option<String>,
    pub entry_date: Timestamp,
    pub is_favorite: bool,
    #[sqlx(json)]
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl DiaryEntry {
    /// The fields statistics are computed from.
    pub fn facts(&self) -> EntryFacts<'_> {
        EntryFacts {
            content: &self.content,
            mood: self.mood.as_deref(),
            entry_date: self.entry_date,
            is_favorite: self.is_favorite,
        }
    }

    /// The fields printed in an exported report.
    pub fn report_entry(&self) -> ReportEntry<'_> {
        ReportEntry {
            title: &self.title,
            content: &self.content,
            mood: self.mood.as_deref(),
            entry_date: self.entry_date,
            is_favorite: self.is_favorite,
            tags: &self.tags,
        }
    }
}

/// A validated, normalized entry ready to insert.
#[derive(Debug, Clone)]
pub struct NewDiaryEntry {
    pub title: String,
    pub content: String,
    pub mood: Option<String>,
    pub entry_date: Timestamp,
    pub is_favorite: bool,
    pub tags: Vec<String>,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating an entry.
///
/// Every field is optional at the wire level so that a missing or `null`
/// value is either defaulted or reported as a validation error, never as a
/// deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateDiaryEntry {
    pub title: Option<String>,
    pub content: Option<String>,
    pub mood: Option<String>,
    pub entry_date: Option<String>,
    pub is_favorite: Option<bool>,
    pub tags: Option<Vec<String>>,
}

impl CreateDiaryEntry {
    /// Validate and normalize the payload. `entry_date` defaults to now,
    /// `is_favorite` to false, and `tags` to empty.
    pub fn into_new_entry(self) -> Result<NewDiaryEntry, CoreError> {
        let title = self.title.unwrap_or_default();
        let content = self.content.unwrap_or_default();
        validate_title(&title)?;
        validate_content(&content)?;

        let entry_date = match self.entry_date.as_deref() {
            Some(raw) => parse_entry_date(raw)?,
            None => None,
        };

        Ok(NewDiaryEntry {
            title: title.trim().to_string(),
            content,
            mood: normalize_mood(self.mood.as_deref())?,
            entry_date: entry_date.unwrap_or_else(Utc::now),
            is_favorite: self.is_favorite.unwrap_or(false),
            tags: normalize_tags(&self.tags.unwrap_or_default())?,
        })
    }
}

/// DTO for updating an entry. Only the provided fields change.
///
/// `mood` distinguishes "absent" (keep) from `null` (clear).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDiaryEntry {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub mood: Option<Option<String>>,
    pub entry_date: Option<String>,
    pub is_favorite: Option<bool>,
    pub tags: Option<Vec<String>>,
}

impl UpdateDiaryEntry {
    /// Merge the provided fields into `entry`, validating each one.
    ///
    /// Timestamps other than `entry_date` are left to the repository.
    pub fn apply_to(self, mut entry: DiaryEntry) -> Result<DiaryEntry, CoreError> {
        if let Some(title) = self.title {
            validate_title(&title)?;
            entry.title = title.trim().to_string();
        }
        if let Some(content) = self.content {
            validate_content(&content)?;
            entry.content = content;
        }
        if let Some(mood) = self.mood {
            entry.mood = normalize_mood(mood.as_deref())?;
        }
        if let Some(raw) = self.entry_date {
            if let Some(entry_date) = parse_entry_date(&raw)? {
                entry.entry_date = entry_date;
            }
        }
        if let Some(is_favorite) = self.is_favorite {
            entry.is_favorite = is_favorite;
        }
        if let Some(tags) = self.tags {
            entry.tags = normalize_tags(&tags)?;
        }
        Ok(entry)
    }
}

/// Wraps a present value (including `null`) in `Some` so that an absent
/// field and an explicit `null` can be told apart.
fn deserialize_some<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Query parameters for `GET /api/diary-entries`.
///
/// Values arrive as raw strings because the browser client sends empty
/// strings for unset filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiaryEntryListParams {
    pub mood: Option<String>,
    pub favorites: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
    #[serde(alias = "startDate")]
    pub start_date: Option<String>,
    #[serde(alias = "endDate")]
    pub end_date: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl DiaryEntryListParams {
    /// The clamped `(limit, offset)` pair. Blank values fall back to the
    /// defaults; non-numeric values are rejected.
    pub fn page(&self) -> Result<(i64, i64), CoreError> {
        let limit = parse_integer_param("limit", self.limit.as_deref())?;
        let offset = parse_integer_param("offset", self.offset.as_deref())?;
        Ok((
            clamp_limit(limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT),
            clamp_offset(offset),
        ))
    }

    /// Interpret the raw parameters as a repository filter.
    pub fn to_filter(&self) -> Result<DiaryEntryFilter, CoreError> {
        let (start_date, end_date) =
            parse_date_range(self.start_date.as_deref(), self.end_date.as_deref())?;

        Ok(DiaryEntryFilter {
            mood: non_blank(self.mood.as_deref()).map(str::to_string),
            favorites_only: is_truthy(self.favorites.as_deref()),
            tag: non_blank(self.tag.as_deref()).map(str::to_string),
            search: normalize_search_term(self.search.as_deref()),
            start_date,
            end_date,
        })
    }
}

/// Query parameters for `GET /api/report/pdf`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportParams {
    pub mood: Option<String>,
    pub favorites: Option<String>,
    #[serde(alias = "startDate")]
    pub start_date: Option<String>,
    #[serde(alias = "endDate")]
    pub end_date: Option<String>,
}

impl ReportParams {
    /// Interpret the raw parameters as a repository filter plus the summary
    /// shown on the report.
    pub fn to_filters(&self) -> Result<(DiaryEntryFilter, ReportFilters), CoreError> {
        let (start_date, end_date) =
            parse_date_range(self.start_date.as_deref(), self.end_date.as_deref())?;

        let filter = DiaryEntryFilter {
            mood: non_blank(self.mood.as_deref()).map(str::to_string),
            favorites_only: is_truthy(self.favorites.as_deref()),
            start_date,
            end_date,
            ..Default::default()
        };

        let summary = ReportFilters {
            start_date: start_date.map(|ts| ts.date_naive()),
            end_date: end_date.map(|ts| ts.date_naive()),
            mood: filter.mood.clone(),
            favorites_only: filter.favorites_only,
        };

        Ok((filter, summary))
    }
}

fn is_truthy(value: Option<&str>) -> bool {
    matches!(value.map(str::trim), Some("true" | "1"))
}

/// Normalized list filter consumed by the repository.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiaryEntryFilter {
    /// Exact mood match.
    pub mood: Option<String>,
    pub favorites_only: bool,
    /// Exact tag membership.
    pub tag: Option<String>,
    /// Lowercased substring of title or content.
    pub search: Option<String>,
    /// Inclusive lower bound on `entry_date`.
    pub start_date: Option<Timestamp>,
    /// Inclusive upper bound on `entry_date`.
    pub end_date: Option<Timestamp>,
}

impl DiaryEntryFilter {
    pub fn favorites() -> Self {
        Self {
            favorites_only: true,
            ..Default::default()
        }
    }

    pub fn mood(mood: impl Into<String>) -> Self {
        Self {
            mood: Some(mood.into()),
            ..Default::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
