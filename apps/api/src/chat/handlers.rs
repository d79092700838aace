use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::{AppError, AppJson};
use crate::sessions::SessionSnapshot;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

/// POST /api/v1/coach/:id/messages
///
/// Appends the user message right away; the coach reply lands later.
pub async fn handle_send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(request): AppJson<SendMessageRequest>,
) -> Result<(StatusCode, Json<SessionSnapshot>), AppError> {
    let session = state.sessions.get(id)?;
    let content = request.content;
    session.with(|page| {
        page.coach_mut()?.send(&content)?;
        Ok(())
    })?;
    info!(session_id = %id, "User message appended");

    let coach = state.coach.clone();
    session.spawn_resolution(
        async move { coach.reply(&content).await },
        move |page, outcome| {
            let Ok(chat) = page.coach_mut() else {
                return;
            };
            match outcome {
                Ok(reply) => {
                    chat.receive_reply(reply);
                }
                Err(e) => {
                    warn!(session_id = %id, "Coach reply failed: {e}");
                    chat.abandon_reply();
                }
            }
        },
    );

    Ok((StatusCode::ACCEPTED, Json(session.snapshot()?)))
}
