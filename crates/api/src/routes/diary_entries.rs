//! Route definitions for diary entries, mounted at `/diary-entries`.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::{diary_entries, stats};
use crate::state::AppState;

/// ```text
/// GET    /                 -> list_entries
/// POST   /                 -> create_entry
/// GET    /favorites        -> list_favorites
/// GET    /stats            -> get_stats
/// GET    /mood/{mood}      -> list_by_mood
/// GET    /{id}             -> get_entry
/// PUT    /{id}             -> update_entry
/// PATCH  /{id}             -> update_entry
/// DELETE /{id}             -> delete_entry
/// PATCH  /{id}/favorite    -> toggle_favorite
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(diary_entries::list_entries).post(diary_entries::create_entry),
        )
        .route("/favorites", get(diary_entries::list_favorites))
        .route("/stats", get(stats::get_stats))
        .route("/mood/{mood}", get(diary_entries::list_by_mood))
        .route(
            "/{id}",
            get(diary_entries::get_entry)
                .put(diary_entries::update_entry)
                .patch(diary_entries::update_entry)
                .delete(diary_entries::delete_entry),
        )
        .route("/{id}/favorite", patch(diary_entries::toggle_favorite))
}
