//! API key extractor for Axum handlers.

use axum::extract::{FromRequestParts, Query};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use entrepaginas_core::api_keys::{api_key_matches, bearer_token, API_KEY_HEADER};
use entrepaginas_core::error::CoreError;
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

/// Proof that the request carried the configured API key.
///
/// The key is accepted from the `x-api-key` header, an
/// `Authorization: Bearer <key>` header, or the `API_KEY` query parameter.
/// When no key is configured every request passes.
///
/// ```ignore
/// async fn my_handler(_auth: ApiKeyAuth) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ApiKeyAuth;

impl FromRequestParts<AppState> for ApiKeyAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.api_key_hash.as_ref() else {
            return Ok(ApiKeyAuth);
        };

        let presented = presented_keys(parts);
        if presented.is_empty() {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Missing API key".into(),
            )));
        }

        if presented.iter().any(|key| api_key_matches(expected, key)) {
            Ok(ApiKeyAuth)
        } else {
            tracing::warn!(path = %parts.uri.path(), "Rejected request with invalid API key");
            Err(AppError::Core(CoreError::Unauthorized(
                "Invalid API key".into(),
            )))
        }
    }
}

/// The `API_KEY` query parameter. Other parameters are ignored.
#[derive(Debug, Deserialize)]
struct ApiKeyQuery {
    #[serde(rename = "API_KEY")]
    api_key: Option<String>,
}

/// Every candidate key the request carries, in header-first order.
fn presented_keys(parts: &Parts) -> Vec<String> {
    let header = parts
        .headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    let bearer = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
        .map(str::to_string);

    let query = Query::<ApiKeyQuery>::try_from_uri(&parts.uri)
        .ok()
        .and_then(|Query(q)| q.api_key)
        .filter(|key| !key.is_empty());

    [header, bearer, query].into_iter().flatten().collect()
}
