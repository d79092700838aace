//! Axum route handlers for the job search assistant.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::{AppError, AppJson};
use crate::services::fixtures::SEARCH_SUGGESTIONS;
use crate::sessions::SessionSnapshot;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

/// PUT /api/v1/assistant/:id/query
pub async fn handle_set_query(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(request): AppJson<QueryRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.sessions.get(id)?;
    session.with(|page| page.assistant_mut()?.set_query(request.query))?;
    Ok(Json(session.snapshot()?))
}

/// POST /api/v1/assistant/:id/search
///
/// Returns 202 with the session in the pending state; poll the session for the outcome.
pub async fn handle_search(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<SessionSnapshot>), AppError> {
    let session = state.sessions.get(id)?;
    let query = session.with(|page| page.assistant_mut()?.begin_search())?;
    info!(session_id = %id, %query, "Job search started");

    let board = state.job_board.clone();
    session.spawn_resolution(
        async move { board.search(&query).await },
        |page, outcome| {
            if let Ok(assistant) = page.assistant_mut() {
                assistant.complete(outcome);
            }
        },
    );

    Ok((StatusCode::ACCEPTED, Json(session.snapshot()?)))
}

/// POST /api/v1/assistant/:id/reset
pub async fn handle_reset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.sessions.get(id)?;
    session.with(|page| {
        page.assistant_mut()?.reset();
        Ok(())
    })?;
    Ok(Json(session.snapshot()?))
}

/// GET /api/v1/assistant/suggestions
pub async fn handle_suggestions() -> Json<Vec<&'static str>> {
    Json(SEARCH_SUGGESTIONS.to_vec())
}
