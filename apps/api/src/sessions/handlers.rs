//! Axum route handlers for mounting pages and driving their upload widget.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::{AppError, AppJson};
use crate::pages::Page;
use crate::sessions::SessionSnapshot;
use crate::state::AppState;
use crate::upload::FileDescriptor;

#[derive(Debug, Deserialize)]
pub struct MountRequest {
    pub page: Page,
}

/// Either a browse pick (`file`, absent when the dialog was dismissed) or a
/// drop (`files`, of which only the first counts).
#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    #[serde(default)]
    pub file: Option<FileDescriptor>,
    #[serde(default)]
    pub files: Vec<FileDescriptor>,
}

/// POST /api/v1/sessions
pub async fn handle_mount(
    State(state): State<AppState>,
    AppJson(request): AppJson<MountRequest>,
) -> Result<(StatusCode, Json<SessionSnapshot>), AppError> {
    let session = state.sessions.mount(request.page)?;
    Ok((StatusCode::CREATED, Json(session.snapshot()?)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.sessions.get(id)?;
    Ok(Json(session.snapshot()?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_unmount(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.unmount(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/upload
///
/// A rejected file answers 422; the widget keeps the error message so the
/// next snapshot shows it.
pub async fn handle_select_file(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(request): AppJson<UploadRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.sessions.get(id)?;
    let policy = &state.config.upload;

    let selected = session.with(|page| {
        let upload = page.upload_mut()?;
        let outcome = if request.files.is_empty() {
            upload.browse(policy, request.file)
        } else {
            upload.drop_files(policy, request.files)
        };
        Ok(outcome)
    })?;

    match selected {
        Ok(Some(file)) => {
            info!(session_id = %id, file = %file.name, size_bytes = file.size_bytes, "File selected")
        }
        Ok(None) => {}
        Err(e) => {
            warn!(session_id = %id, "File rejected: {e}");
            return Err(e.into());
        }
    }

    Ok(Json(session.snapshot()?))
}

/// DELETE /api/v1/sessions/:id/upload
pub async fn handle_clear_file(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.sessions.get(id)?;
    session.with(|page| {
        page.upload_mut()?.clear();
        Ok(())
    })?;
    Ok(Json(session.snapshot()?))
}
