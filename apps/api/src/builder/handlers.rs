//! Axum route handlers for the CV builder wizard.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::builder::entries::{EducationPatch, ExperiencePatch, LanguagePatch, PersonalInfoPatch};
use crate::builder::wizard::StepInfo;
use crate::builder::{CvSummary, EntryKind};
use crate::errors::{AppError, AppJson};
use crate::sessions::SessionSnapshot;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GoToStepRequest {
    pub step: i64,
}

#[derive(Debug, Deserialize)]
pub struct SkillInputRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SkillRequest {
    pub skill: String,
}

#[derive(Debug, Serialize)]
pub struct EntryAddedResponse {
    pub entry_id: Uuid,
    pub session: SessionSnapshot,
}

#[derive(Debug, Serialize)]
pub struct ChangeResponse {
    /// False when the operation was a no-op.
    pub changed: bool,
    pub session: SessionSnapshot,
}

/// POST /api/v1/builder/:id/step
pub async fn handle_go_to_step(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(request): AppJson<GoToStepRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.sessions.get(id)?;
    session.with(|page| page.builder_mut()?.go_to_step(request.step).map(|_| ()))?;
    Ok(Json(session.snapshot()?))
}

/// POST /api/v1/builder/:id/next
pub async fn handle_next(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.sessions.get(id)?;
    session.with(|page| page.builder_mut().map(|b| b.next()))?;
    Ok(Json(session.snapshot()?))
}

/// POST /api/v1/builder/:id/prev
pub async fn handle_prev(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.sessions.get(id)?;
    session.with(|page| page.builder_mut().map(|b| b.prev()))?;
    Ok(Json(session.snapshot()?))
}

/// GET /api/v1/builder/:id/steps
pub async fn handle_steps(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<StepInfo>>, AppError> {
    let session = state.sessions.get(id)?;
    let steps = session.with(|page| Ok(page.builder_mut()?.steps()))?;
    Ok(Json(steps))
}

/// PATCH /api/v1/builder/:id/personal
pub async fn handle_update_personal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(patch): AppJson<PersonalInfoPatch>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.sessions.get(id)?;
    session.with(|page| {
        page.builder_mut()?.update_personal_info(patch);
        Ok(())
    })?;
    Ok(Json(session.snapshot()?))
}

/// POST /api/v1/builder/:id/entries/:kind
pub async fn handle_add_entry(
    State(state): State<AppState>,
    Path((id, kind)): Path<(Uuid, EntryKind)>,
) -> Result<Json<EntryAddedResponse>, AppError> {
    let session = state.sessions.get(id)?;
    let entry_id = session.with(|page| Ok(page.builder_mut()?.add_entry(kind)))?;
    debug!(session_id = %id, ?kind, %entry_id, "Entry added");
    Ok(Json(EntryAddedResponse {
        entry_id,
        session: session.snapshot()?,
    }))
}

/// PATCH /api/v1/builder/:id/entries/:kind/:entry_id
///
/// The body is the patch type of the section named by `kind`.
pub async fn handle_update_entry(
    State(state): State<AppState>,
    Path((id, kind, entry_id)): Path<(Uuid, EntryKind, Uuid)>,
    AppJson(body): AppJson<Value>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.sessions.get(id)?;
    session.with(|page| {
        let builder = page.builder_mut()?;
        match kind {
            EntryKind::Experience => {
                builder.update_experience(entry_id, parse_patch::<ExperiencePatch>(body)?)
            }
            EntryKind::Education => {
                builder.update_education(entry_id, parse_patch::<EducationPatch>(body)?)
            }
            EntryKind::Language => {
                builder.update_language(entry_id, parse_patch::<LanguagePatch>(body)?)
            }
        }
    })?;
    Ok(Json(session.snapshot()?))
}

/// DELETE /api/v1/builder/:id/entries/:kind/:entry_id
pub async fn handle_remove_entry(
    State(state): State<AppState>,
    Path((id, kind, entry_id)): Path<(Uuid, EntryKind, Uuid)>,
) -> Result<Json<ChangeResponse>, AppError> {
    let session = state.sessions.get(id)?;
    let changed = session.with(|page| Ok(page.builder_mut()?.remove_entry(kind, entry_id)))?;
    Ok(Json(ChangeResponse {
        changed,
        session: session.snapshot()?,
    }))
}

/// PUT /api/v1/builder/:id/skill-input
pub async fn handle_set_skill_input(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(request): AppJson<SkillInputRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.sessions.get(id)?;
    session.with(|page| {
        page.builder_mut()?.set_skill_input(request.text);
        Ok(())
    })?;
    Ok(Json(session.snapshot()?))
}

/// POST /api/v1/builder/:id/skills
///
/// Commits the current skill input.
pub async fn handle_add_skill(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ChangeResponse>, AppError> {
    let session = state.sessions.get(id)?;
    let changed = session.with(|page| Ok(page.builder_mut()?.add_skill()))?;
    Ok(Json(ChangeResponse {
        changed,
        session: session.snapshot()?,
    }))
}

/// DELETE /api/v1/builder/:id/skills
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(request): AppJson<SkillRequest>,
) -> Result<Json<ChangeResponse>, AppError> {
    let session = state.sessions.get(id)?;
    let changed = session.with(|page| Ok(page.builder_mut()?.remove_skill(&request.skill)))?;
    Ok(Json(ChangeResponse {
        changed,
        session: session.snapshot()?,
    }))
}

/// GET /api/v1/builder/:id/summary
pub async fn handle_summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CvSummary>, AppError> {
    let session = state.sessions.get(id)?;
    let summary = session.with(|page| Ok(page.builder_mut()?.summary()))?;
    Ok(Json(summary))
}

/// POST /api/v1/builder/:id/download
pub async fn handle_download(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Vec<u8>, AppError> {
    let session = state.sessions.get(id)?;
    session.with(|page| page.builder_mut()?.download())
}

fn parse_patch<T: serde::de::DeserializeOwned>(body: Value) -> Result<T, AppError> {
    serde_json::from_value(body).map_err(|e| AppError::Validation(format!("Invalid patch: {e}")))
}
