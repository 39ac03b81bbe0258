use std::any::Any;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::error::{AppError, Result};
use crate::state::AppState;

pub const ADMIN_API_KEY_HEADER: &str = "admin-api-key";

/// Rejects the request with `401` unless `Admin-API-Key` equals the configured secret.
pub async fn require_admin_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let authorized = request
        .headers()
        .get(ADMIN_API_KEY_HEADER)
        .is_some_and(|key| key.as_bytes() == state.admin_api_key().as_bytes());

    if !authorized {
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}

/// Answers `408` when the rest of the stack does not finish within
/// [`AppState::request_timeout`]. The inner future is dropped on expiry.
pub async fn enforce_request_timeout(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let deadline = state.request_timeout();
    let path = request.uri().path().to_owned();

    match tokio::time::timeout(deadline, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            warn!(%path, ?deadline, "request timed out");
            AppError::Timeout.into_response()
        }
    }
}

/// Turns a caught handler panic into the JSON error shape.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Panic(detail).into_response()
}
