//! PDF export of diary entries.

use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use entrepaginas_core::report::{render_pdf, report_filename, ReportEntry};
use entrepaginas_db::models::diary_entry::ReportParams;
use entrepaginas_db::repositories::DiaryEntryRepo;

use crate::error::{AppError, AppResult};
use crate::extract::AppQuery;
use crate::middleware::api_key::ApiKeyAuth;
use crate::state::AppState;

/// GET /api/report/pdf
///
/// Render the entries matching `start_date`, `end_date`, `mood`, and
/// `favorites` as a PDF attachment. Responds 404 when nothing matches.
pub async fn export_pdf(
    _auth: ApiKeyAuth,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ReportParams>,
) -> AppResult<impl IntoResponse> {
    let (filter, summary) = params.to_filters()?;
    let entries = DiaryEntryRepo::list_all(&state.pool, &filter).await?;

    if entries.is_empty() {
        return Err(AppError::NotFound(
            "No diary entries found for the selected filters".into(),
        ));
    }

    let now = Utc::now();
    let report_entries: Vec<ReportEntry<'_>> = entries.iter().map(|e| e.report_entry()).collect();
    let pdf = render_pdf(&report_entries, &summary, now)?;
    let filename = report_filename(now.date_naive());

    tracing::info!(entries = entries.len(), bytes = pdf.len(), %filename, "PDF report generated");

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, "application/pdf".to_string()),
            (CONTENT_DISPOSITION, format!("attachment; filename=\"{filename}\"")),
        ],
        pdf,
    ))
}
