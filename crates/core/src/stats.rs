//! Diary statistics: totals, word counts, writing streak, mood and monthly
//! breakdowns.
//!
//! Field names serialize in camelCase because the browser client reads
//! `totalEntries`, `moodDistribution`, etc.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::entries::word_count;
use crate::types::Timestamp;

/// The subset of an entry that statistics are computed from.
#[derive(Debug, Clone, Copy)]
pub struct EntryFacts<'a> {
    pub content: &'a str,
    pub mood: Option<&'a str>,
    pub entry_date: Timestamp,
    pub is_favorite: bool,
}

/// Number of entries recorded with a given mood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoodCount {
    pub mood: String,
    pub count: i64,
}

/// Number of entries written in a calendar month (`YYYY-MM`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyActivity {
    pub month: String,
    pub entries: i64,
}

/// Aggregate statistics over the whole diary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryStats {
    pub total_entries: i64,
    pub total_favorites: i64,
    pub total_words: i64,
    pub current_streak: i64,
    pub mood_distribution: Vec<MoodCount>,
    pub monthly_activity: Vec<MonthlyActivity>,
}

impl DiaryStats {
    /// Compute statistics for `entries` as of the UTC calendar day `today`.
    pub fn compute<'a, I>(entries: I, today: NaiveDate) -> Self
    where
        I: IntoIterator<Item = EntryFacts<'a>>,
    {
        let mut total_entries = 0;
        let mut total_favorites = 0;
        let mut total_words = 0;
        let mut moods: HashMap<&str, i64> = HashMap::new();
        let mut months: BTreeMap<(i32, u32), i64> = BTreeMap::new();
        let mut days: BTreeSet<NaiveDate> = BTreeSet::new();

        for entry in entries {
            total_entries += 1;
            if entry.is_favorite {
                total_favorites += 1;
            }
            total_words += word_count(entry.content) as i64;
            if let Some(mood) = entry.mood {
                *moods.entry(mood).or_default() += 1;
            }
            let day = entry.entry_date.date_naive();
            *months.entry((day.year(), day.month())).or_default() += 1;
            days.insert(day);
        }

        let mut mood_distribution: Vec<MoodCount> = moods
            .into_iter()
            .map(|(mood, count)| MoodCount {
                mood: mood.to_string(),
                count,
            })
            .collect();
        mood_distribution.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.mood.cmp(&b.mood)));

        let monthly_activity = months
            .into_iter()
            .rev()
            .map(|((year, month), entries)| MonthlyActivity {
                month: format!("{year:04}-{month:02}"),
                entries,
            })
            .collect();

        Self {
            total_entries,
            total_favorites,
            total_words,
            current_streak: current_streak(&days, today),
            mood_distribution,
            monthly_activity,
        }
    }
}

/// Count consecutive days with at least one entry, ending today.
///
/// A streak that ended yesterday is still current: the user has until the
/// end of today to extend it.
pub fn current_streak(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> i64 {
    let mut day = if days.contains(&today) {
        today
    } else {
        match today.checked_sub_days(Days::new(1)) {
            Some(yesterday) if days.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 0;
    while days.contains(&day) {
        streak += 1;
        match day.checked_sub_days(Days::new(1)) {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
