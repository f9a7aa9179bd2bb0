//! Handlers for diary entry CRUD, favorites, and mood listings.
//!
//! All endpoints require the API key via [`ApiKeyAuth`] when one is configured.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use entrepaginas_core::error::CoreError;
use entrepaginas_core::types::DbId;
use entrepaginas_db::models::diary_entry::{
    CreateDiaryEntry, DiaryEntryFilter, DiaryEntryListParams, UpdateDiaryEntry,
};
use entrepaginas_db::repositories::DiaryEntryRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::api_key::ApiKeyAuth;
use crate::response::{DataResponse, ListResponse, MessageResponse, MoodResponse};
use crate::state::AppState;

fn entry_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "DiaryEntry",
        id,
    })
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// GET /api/diary-entries
///
/// List entries newest first. Supports `mood`, `favorites`, `tag`, `search`,
/// `start_date`, `end_date`, `limit`, and `offset`. `total` counts every
/// match before pagination.
pub async fn list_entries(
    _auth: ApiKeyAuth,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<DiaryEntryListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = params.to_filter()?;
    let (limit, offset) = params.page()?;

    let entries = DiaryEntryRepo::list(&state.pool, &filter, limit, offset).await?;
    let total = DiaryEntryRepo::count(&state.pool, &filter).await?;

    Ok(Json(ListResponse::new(entries, total)))
}

/// GET /api/diary-entries/favorites
pub async fn list_favorites(
    _auth: ApiKeyAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let entries = DiaryEntryRepo::list_all(&state.pool, &DiaryEntryFilter::favorites()).await?;
    Ok(Json(ListResponse::complete(entries)))
}

/// GET /api/diary-entries/mood/{mood}
///
/// Entries whose mood matches exactly. The response echoes `mood`.
pub async fn list_by_mood(
    _auth: ApiKeyAuth,
    State(state): State<AppState>,
    AppPath(mood): AppPath<String>,
) -> AppResult<impl IntoResponse> {
    let entries = DiaryEntryRepo::list_all(&state.pool, &DiaryEntryFilter::mood(mood.as_str())).await?;
    Ok(Json(MoodResponse::new(entries, mood)))
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/diary-entries/{id}
pub async fn get_entry(
    _auth: ApiKeyAuth,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let entry = DiaryEntryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| entry_not_found(id))?;

    Ok(Json(DataResponse::new(entry)))
}

/// POST /api/diary-entries
///
/// Create an entry. Title and content are required; everything else has a
/// default. Returns 201.
pub async fn create_entry(
    _auth: ApiKeyAuth,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateDiaryEntry>,
) -> AppResult<impl IntoResponse> {
    let new_entry = input.into_new_entry()?;
    let entry = DiaryEntryRepo::create(&state.pool, &new_entry).await?;

    tracing::info!(entry_id = entry.id, "Diary entry created");

    Ok((StatusCode::CREATED, Json(DataResponse::new(entry))))
}

/// PUT|PATCH /api/diary-entries/{id}
///
/// Merge the provided fields into the entry. Absent fields are kept.
pub async fn update_entry(
    _auth: ApiKeyAuth,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateDiaryEntry>,
) -> AppResult<impl IntoResponse> {
    let existing = DiaryEntryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| entry_not_found(id))?;

    let merged = input.apply_to(existing)?;
    let entry = DiaryEntryRepo::save(&state.pool, &merged)
        .await?
        .ok_or_else(|| entry_not_found(id))?;

    tracing::info!(entry_id = id, "Diary entry updated");

    Ok(Json(DataResponse::new(entry)))
}

/// DELETE /api/diary-entries/{id}
///
/// Returns the removed entry.
pub async fn delete_entry(
    _auth: ApiKeyAuth,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let entry = DiaryEntryRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| entry_not_found(id))?;

    tracing::info!(entry_id = id, "Diary entry deleted");

    Ok(Json(MessageResponse::new(entry, "Diary entry deleted")))
}

/// PATCH /api/diary-entries/{id}/favorite
pub async fn toggle_favorite(
    _auth: ApiKeyAuth,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let entry = DiaryEntryRepo::toggle_favorite(&state.pool, id)
        .await?
        .ok_or_else(|| entry_not_found(id))?;

    let message = if entry.is_favorite {
        "Added to favorites"
    } else {
        "Removed from favorites"
    };

    tracing::info!(entry_id = id, is_favorite = entry.is_favorite, "Favorite toggled");

    Ok(Json(MessageResponse::new(entry, message)))
}
