use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use entrepaginas_core::stats::DiaryStats;
use entrepaginas_db::models::diary_entry::DiaryEntryFilter;
use entrepaginas_db::repositories::DiaryEntryRepo;

use crate::error::AppResult;
use crate::middleware::api_key::ApiKeyAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/diary-entries/stats (also /api/stats)
///
/// Aggregate counts, word totals, streak, mood distribution, and monthly
/// activity over every entry.
pub async fn get_stats(
    _auth: ApiKeyAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let entries = DiaryEntryRepo::list_all(&state.pool, &DiaryEntryFilter::default()).await?;
    let stats = DiaryStats::compute(entries.iter().map(|e| e.facts()), Utc::now().date_naive());

    Ok(Json(DataResponse::new(stats)))
}
