//! Axum route handlers for the scoring pages.
//!
//! Triggers answer 202 with the session in the pending state. The scoring
//! backend runs in a background task that writes the result back into the
//! session; clients poll `GET /api/v1/sessions/:id`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::{AppError, AppJson};
use crate::sessions::SessionSnapshot;
use crate::state::AppState;

type Accepted = (StatusCode, Json<SessionSnapshot>);

#[derive(Debug, Deserialize)]
pub struct DescriptionRequest {
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct TargetRoleRequest {
    pub target_role: String,
}

#[derive(Debug, Deserialize)]
pub struct ToggleCategoryRequest {
    pub name: String,
}

// ────────────────────────────────────────────────────────────────────────────
// CV analyzer
// ────────────────────────────────────────────────────────────────────────────

/// PUT /api/v1/analyzer/:id/description
pub async fn handle_set_description(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(request): AppJson<DescriptionRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.sessions.get(id)?;
    session.with(|page| page.analyzer_mut()?.set_job_description(request.job_description))?;
    Ok(Json(session.snapshot()?))
}

/// POST /api/v1/analyzer/:id/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Accepted, AppError> {
    let session = state.sessions.get(id)?;
    let request = session.with(|page| page.analyzer_mut()?.begin_analysis())?;
    info!(session_id = %id, has_file = request.file.is_some(), "CV analysis started");

    let scoring = state.scoring.clone();
    session.spawn_resolution(
        async move { scoring.analyze(request).await },
        |page, outcome| {
            if let Ok(analyzer) = page.analyzer_mut() {
                analyzer.complete(outcome);
            }
        },
    );

    Ok((StatusCode::ACCEPTED, Json(session.snapshot()?)))
}

/// POST /api/v1/analyzer/:id/reset
pub async fn handle_reset_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.sessions.get(id)?;
    session.with(|page| {
        page.analyzer_mut()?.reset();
        Ok(())
    })?;
    Ok(Json(session.snapshot()?))
}

// ────────────────────────────────────────────────────────────────────────────
// ATS optimizer
// ────────────────────────────────────────────────────────────────────────────

/// PUT /api/v1/optimizer/:id/target-role
pub async fn handle_set_target_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(request): AppJson<TargetRoleRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.sessions.get(id)?;
    session.with(|page| page.optimizer_mut()?.set_target_role(request.target_role))?;
    Ok(Json(session.snapshot()?))
}

/// POST /api/v1/optimizer/:id/optimize
pub async fn handle_optimize(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Accepted, AppError> {
    let session = state.sessions.get(id)?;
    let request = session.with(|page| page.optimizer_mut()?.begin_optimization())?;
    info!(session_id = %id, target_role = %request.target_role, "ATS optimization started");

    let scoring = state.scoring.clone();
    session.spawn_resolution(
        async move { scoring.optimize(request).await },
        |page, outcome| {
            if let Ok(optimizer) = page.optimizer_mut() {
                optimizer.complete(outcome);
            }
        },
    );

    Ok((StatusCode::ACCEPTED, Json(session.snapshot()?)))
}

/// POST /api/v1/optimizer/:id/reset
pub async fn handle_reset_optimization(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.sessions.get(id)?;
    session.with(|page| {
        page.optimizer_mut()?.reset();
        Ok(())
    })?;
    Ok(Json(session.snapshot()?))
}

// ────────────────────────────────────────────────────────────────────────────
// ATS evaluator
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/evaluator/:id/evaluate
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Accepted, AppError> {
    let session = state.sessions.get(id)?;
    let request = session.with(|page| page.evaluator_mut()?.begin_evaluation())?;
    info!(session_id = %id, file = %request.file.name, "ATS evaluation started");

    let scoring = state.scoring.clone();
    session.spawn_resolution(
        async move { scoring.evaluate(request).await },
        |page, outcome| {
            if let Ok(evaluator) = page.evaluator_mut() {
                evaluator.complete(outcome);
            }
        },
    );

    Ok((StatusCode::ACCEPTED, Json(session.snapshot()?)))
}

/// POST /api/v1/evaluator/:id/categories/toggle
pub async fn handle_toggle_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(request): AppJson<ToggleCategoryRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.sessions.get(id)?;
    session.with(|page| {
        page.evaluator_mut()?.toggle_category(&request.name)?;
        Ok(())
    })?;
    Ok(Json(session.snapshot()?))
}

/// POST /api/v1/evaluator/:id/reset
pub async fn handle_reset_evaluation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.sessions.get(id)?;
    session.with(|page| {
        page.evaluator_mut()?.reset();
        Ok(())
    })?;
    Ok(Json(session.snapshot()?))
}
