//! Authentication and response middleware

use axum::{
    Json,
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    error::{ApiError, ErrorDetail},
    state::AppState,
};

/// Authentication middleware
///
/// Verifies the bearer token and stores the resulting `Identity` in the
/// request extensions. Every failure sub-case surfaces as the same 401.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = {
        let header = match req.headers().get(AUTHORIZATION) {
            Some(value) => Some(value.to_str().map_err(|_| ApiError::Unauthenticated)?),
            None => None,
        };
        state.jwt_service.authenticate(header)?
    };

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Append diagnostic detail to 500 responses outside production
pub async fn error_detail_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let response = next.run(req).await;

    if !state.environment.exposes_error_details() {
        return response;
    }

    match response.extensions().get::<ErrorDetail>().cloned() {
        Some(detail) => (
            response.status(),
            Json(json!({
                "message": detail.message,
                "detail": detail.detail,
            })),
        )
            .into_response(),
        None => response,
    }
}
