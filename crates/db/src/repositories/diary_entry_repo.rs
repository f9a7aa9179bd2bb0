//! Repository for the `diary_entries` table.
//!
//! Provides entry CRUD, favorite toggling, and filtered listing. Listing is
//! always ordered by `entry_date` descending, newest first, with `id` as the
//! tie-breaker.

use chrono::Utc;
use entrepaginas_core::search::searchable_text;
use entrepaginas_core::types::DbId;
use sqlx::types::Json;
use sqlx::{QueryBuilder, Sqlite};

use crate::models::diary_entry::{DiaryEntry, DiaryEntryFilter, NewDiaryEntry};
use crate::{to_db_timestamp, DbPool};

/// Column list for `diary_entries` queries.
const COLUMNS: &str = "\
    id, title, content, mood, entry_date, is_favorite, tags, \
    created_at, updated_at";

/// Sort order shared by every listing query.
const ORDER_BY: &str = " ORDER BY entry_date DESC, id DESC";

/// Provides CRUD operations for diary entries.
pub struct DiaryEntryRepo;

impl DiaryEntryRepo {
    // -----------------------------------------------------------------------
    // CRUD
    // -----------------------------------------------------------------------

    /// Insert a new entry, returning the stored row.
    pub async fn create(pool: &DbPool, input: &NewDiaryEntry) -> Result<DiaryEntry, sqlx::Error> {
        let now = to_db_timestamp(Utc::now());
        let query = format!(
            "INSERT INTO diary_entries \
                (title, content, mood, entry_date, is_favorite, tags, search_text, \
                 created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DiaryEntry>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.mood.as_deref())
            .bind(to_db_timestamp(input.entry_date))
            .bind(input.is_favorite)
            .bind(Json(&input.tags))
            .bind(searchable_text(&input.title, &input.content))
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find an entry by its ID.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<DiaryEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM diary_entries WHERE id = $1");
        sqlx::query_as::<_, DiaryEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite every user-editable field of an existing entry and refresh
    /// `updated_at`. Returns `None` if the entry no longer exists.
    pub async fn save(pool: &DbPool, entry: &DiaryEntry) -> Result<Option<DiaryEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE diary_entries SET \
                title = $2, content = $3, mood = $4, entry_date = $5, \
                is_favorite = $6, tags = $7, search_text = $8, updated_at = $9 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DiaryEntry>(&query)
            .bind(entry.id)
            .bind(&entry.title)
            .bind(&entry.content)
            .bind(entry.mood.as_deref())
            .bind(to_db_timestamp(entry.entry_date))
            .bind(entry.is_favorite)
            .bind(Json(&entry.tags))
            .bind(searchable_text(&entry.title, &entry.content))
            .bind(to_db_timestamp(Utc::now()))
            .fetch_optional(pool)
            .await
    }

    /// Delete an entry, returning the removed row if it existed.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<Option<DiaryEntry>, sqlx::Error> {
        let query = format!("DELETE FROM diary_entries WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, DiaryEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Flip `is_favorite` and refresh `updated_at`.
    pub async fn toggle_favorite(
        pool: &DbPool,
        id: DbId,
    ) -> Result<Option<DiaryEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE diary_entries \
             SET is_favorite = 1 - is_favorite, updated_at = $2 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DiaryEntry>(&query)
            .bind(id)
            .bind(to_db_timestamp(Utc::now()))
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Listing
    // -----------------------------------------------------------------------

    /// List entries matching `filter`, newest first, with pagination.
    pub async fn list(
        pool: &DbPool,
        filter: &DiaryEntryFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DiaryEntry>, sqlx::Error> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM diary_entries"));
        push_filter(&mut qb, filter);
        qb.push(ORDER_BY);
        qb.push(" LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        qb.build_query_as::<DiaryEntry>().fetch_all(pool).await
    }

    /// List every entry matching `filter`, newest first, without pagination.
    pub async fn list_all(
        pool: &DbPool,
        filter: &DiaryEntryFilter,
    ) -> Result<Vec<DiaryEntry>, sqlx::Error> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM diary_entries"));
        push_filter(&mut qb, filter);
        qb.push(ORDER_BY);

        qb.build_query_as::<DiaryEntry>().fetch_all(pool).await
    }

    /// Count entries matching `filter`.
    pub async fn count(pool: &DbPool, filter: &DiaryEntryFilter) -> Result<i64, sqlx::Error> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM diary_entries");
        push_filter(&mut qb, filter);

        qb.build_query_scalar::<i64>().fetch_one(pool).await
    }
}

/// Append a `WHERE` clause for every active filter.
fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &DiaryEntryFilter) {
    qb.push(" WHERE 1 = 1");

    if let Some(mood) = &filter.mood {
        qb.push(" AND mood = ");
        qb.push_bind(mood.clone());
    }

    if filter.favorites_only {
        qb.push(" AND is_favorite = 1");
    }

    if let Some(tag) = &filter.tag {
        qb.push(
            " AND EXISTS (SELECT 1 FROM json_each(diary_entries.tags) \
             WHERE json_each.value = ",
        );
        qb.push_bind(tag.clone());
        qb.push(")");
    }

    if let Some(search) = &filter.search {
        qb.push(" AND instr(search_text, ");
        qb.push_bind(search.clone());
        qb.push(") > 0");
    }

    if let Some(start) = filter.start_date {
        qb.push(" AND entry_date >= ");
        qb.push_bind(to_db_timestamp(start));
    }

    if let Some(end) = filter.end_date {
        qb.push(" AND entry_date <= ");
        qb.push_bind(to_db_timestamp(end));
    }
}
