use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use huhu_core::{Joke, JokeId, Page};
use tracing::{debug, info};

use crate::error::{AppError, Result};
use crate::model::{JokeListResponse, JokeRequest, ListParams};
use crate::state::AppState;

/// Accepts a body only if it decodes as JSON and carries non-empty text.
///
/// The body is decoded whatever its `Content-Type`.
fn validated_text(body: &[u8]) -> Result<String> {
    let request: JokeRequest = serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "rejected joke payload");
        AppError::InvalidInput("Invalid request payload")
    })?;

    if request.text.is_empty() {
        return Err(AppError::InvalidInput("Joke text is required"));
    }
    Ok(request.text)
}

pub async fn list_jokes_handler(
    State(state): State<AppState>,
    params: std::result::Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<JokeListResponse>> {
    let params = params.map(|Query(params)| params).unwrap_or_default();
    let page = Page::from_params(params.limit.as_deref(), params.offset.as_deref());

    let jokes = state.repository().list(page).await?;
    let total = state.repository().count().await?;

    Ok(Json(JokeListResponse {
        jokes,
        total,
        limit: page.limit,
        offset: page.offset,
    }))
}

pub async fn get_joke_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Joke>> {
    let id: JokeId = id.parse()?;
    let joke = state.repository().get(id).await?;
    Ok(Json(joke))
}

pub async fn random_joke_handler(State(state): State<AppState>) -> Result<Json<Joke>> {
    let joke = state.repository().random().await?;
    Ok(Json(joke))
}

pub async fn create_joke_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response> {
    let text = validated_text(&body)?;

    let id = state.repository().create(&text).await?;
    let joke = state.repository().get(id).await?;
    info!(%id, "joke created");

    let location = format!("/api/joke/{id}");
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(joke)).into_response())
}

pub async fn update_joke_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Joke>> {
    let id: JokeId = id.parse()?;
    let text = validated_text(&body)?;

    state.repository().get(id).await?;
    state.repository().update(id, &text).await?;
    info!(%id, "joke updated");

    let joke = state.repository().get(id).await?;
    Ok(Json(joke))
}

pub async fn delete_joke_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode> {
    let id: JokeId = id.parse()?;
    state.repository().delete(id).await?;
    info!(%id, "joke deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn not_found_handler() -> AppError {
    AppError::NotFound("Not found")
}
