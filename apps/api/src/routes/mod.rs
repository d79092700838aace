pub mod health;
pub mod pages;

use axum::{
    http::Uri,
    routing::{get, patch, post, put},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::builder::handlers as builder;
use crate::chat::handlers as coach;
use crate::errors::AppError;
use crate::jobs::handlers as assistant;
use crate::sessions::handlers as sessions;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Page catalogue
        .route("/api/v1/pages", get(pages::handle_list_pages))
        .route("/api/v1/pages/resolve", get(pages::handle_resolve))
        // Session lifecycle
        .route("/api/v1/sessions", post(sessions::handle_mount))
        .route(
            "/api/v1/sessions/:id",
            get(sessions::handle_get_session).delete(sessions::handle_unmount),
        )
        .route(
            "/api/v1/sessions/:id/upload",
            post(sessions::handle_select_file).delete(sessions::handle_clear_file),
        )
        // CV analyzer
        .route(
            "/api/v1/analyzer/:id/description",
            put(analysis::handle_set_description),
        )
        .route("/api/v1/analyzer/:id/analyze", post(analysis::handle_analyze))
        .route("/api/v1/analyzer/:id/reset", post(analysis::handle_reset_analysis))
        // ATS optimizer
        .route(
            "/api/v1/optimizer/:id/target-role",
            put(analysis::handle_set_target_role),
        )
        .route("/api/v1/optimizer/:id/optimize", post(analysis::handle_optimize))
        .route(
            "/api/v1/optimizer/:id/reset",
            post(analysis::handle_reset_optimization),
        )
        // ATS evaluator
        .route("/api/v1/evaluator/:id/evaluate", post(analysis::handle_evaluate))
        .route(
            "/api/v1/evaluator/:id/categories/toggle",
            post(analysis::handle_toggle_category),
        )
        .route(
            "/api/v1/evaluator/:id/reset",
            post(analysis::handle_reset_evaluation),
        )
        // Job search assistant
        .route(
            "/api/v1/assistant/suggestions",
            get(assistant::handle_suggestions),
        )
        .route("/api/v1/assistant/:id/query", put(assistant::handle_set_query))
        .route("/api/v1/assistant/:id/search", post(assistant::handle_search))
        .route("/api/v1/assistant/:id/reset", post(assistant::handle_reset))
        // Coach chat
        .route("/api/v1/coach/:id/messages", post(coach::handle_send_message))
        // CV builder
        .route("/api/v1/builder/:id/step", post(builder::handle_go_to_step))
        .route("/api/v1/builder/:id/next", post(builder::handle_next))
        .route("/api/v1/builder/:id/prev", post(builder::handle_prev))
        .route("/api/v1/builder/:id/steps", get(builder::handle_steps))
        .route(
            "/api/v1/builder/:id/personal",
            patch(builder::handle_update_personal),
        )
        .route(
            "/api/v1/builder/:id/entries/:kind",
            post(builder::handle_add_entry),
        )
        .route(
            "/api/v1/builder/:id/entries/:kind/:entry_id",
            patch(builder::handle_update_entry).delete(builder::handle_remove_entry),
        )
        .route(
            "/api/v1/builder/:id/skill-input",
            put(builder::handle_set_skill_input),
        )
        .route(
            "/api/v1/builder/:id/skills",
            post(builder::handle_add_skill).delete(builder::handle_remove_skill),
        )
        .route("/api/v1/builder/:id/summary", get(builder::handle_summary))
        .route("/api/v1/builder/:id/download", post(builder::handle_download))
        .fallback(not_found)
        .with_state(state)
}
