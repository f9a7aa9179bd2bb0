//! Integration tests for the PDF report export.

mod common;

use axum::http::StatusCode;
use chrono::Utc;
use common::{body_bytes, body_json, build_test_app, create_entry, get};
use serde_json::json;
use sqlx::SqlitePool;

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[sqlx::test(migrations = "../db/migrations")]
async fn report_returns_pdf_attachment(pool: SqlitePool) {
    let app = build_test_app(pool);
    create_entry(
        app.clone(),
        json!({ "title": "Caminhada matinal", "content": "Ar fresco.", "mood": "grateful" }),
    )
    .await;

    let response = get(app, "/api/report/pdf").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "application/pdf");

    let expected = format!(
        "attachment; filename=\"diario-entrepaginas-{}.pdf\"",
        Utc::now().date_naive().format("%Y-%m-%d")
    );
    assert_eq!(response.headers()["content-disposition"], expected.as_str());

    let pdf = body_bytes(response).await;
    assert!(pdf.starts_with(b"%PDF-1.4"));
    assert!(contains(&pdf, b"Caminhada matinal"));
    assert!(contains(&pdf, b"%%EOF"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn report_only_includes_matching_entries(pool: SqlitePool) {
    let app = build_test_app(pool);
    create_entry(
        app.clone(),
        json!({ "title": "Entrada feliz", "content": "C", "mood": "feliz", "entry_date": "2024-12-05" }),
    )
    .await;
    create_entry(
        app.clone(),
        json!({ "title": "Entrada tranquila", "content": "C", "mood": "tranquilo", "entry_date": "2024-12-06" }),
    )
    .await;

    let response = get(
        app,
        "/api/report/pdf?mood=feliz&startDate=2024-12-01&endDate=2024-12-31",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let pdf = body_bytes(response).await;
    assert!(contains(&pdf, b"Entrada feliz"));
    assert!(!contains(&pdf, b"Entrada tranquila"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_selection_returns_404(pool: SqlitePool) {
    let app = build_test_app(pool);
    create_entry(app.clone(), json!({ "title": "a", "content": "C", "mood": "feliz" })).await;

    let response = get(app, "/api/report/pdf?favorites=true").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["success"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_report_dates_return_400(pool: SqlitePool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/report/pdf?start_date=ontem").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
