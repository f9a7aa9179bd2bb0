pub mod diary_entries;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers::{report, stats};
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /diary-entries                     list, create
/// /diary-entries/favorites           favorite entries
/// /diary-entries/stats               statistics
/// /diary-entries/mood/{mood}         entries with one mood
/// /diary-entries/{id}                get, update (PUT/PATCH), delete
/// /diary-entries/{id}/favorite       toggle favorite (PATCH)
///
/// /stats                             statistics (alias)
/// /report/pdf                        PDF export
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/diary-entries", diary_entries::router())
        .route("/stats", get(stats::get_stats))
        .route("/report/pdf", get(report::export_pdf))
}
