use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::services::{
    CoachBackend, JobBoard, MockScoringBackend, RemoteScoringBackend, SampleJobBoard,
    ScoringBackend, ScriptedCoach,
};
use crate::sessions::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Mounted page sessions.
    pub sessions: SessionStore,
    /// Default: MockScoringBackend. Set SCORING_SERVICE_URL to use RemoteScoringBackend.
    pub scoring: Arc<dyn ScoringBackend>,
    pub job_board: Arc<dyn JobBoard>,
    pub coach: Arc<dyn CoachBackend>,
}

impl AppState {
    pub fn from_config(config: Config) -> Result<Self> {
        let scoring: Arc<dyn ScoringBackend> = match &config.scoring_service_url {
            Some(url) => Arc::new(RemoteScoringBackend::new(url)?),
            None => Arc::new(MockScoringBackend::new(config.delays.clone())),
        };
        info!("Scoring backend: {}", scoring.backend_name());

        Ok(Self {
            sessions: SessionStore::new(),
            scoring,
            job_board: Arc::new(SampleJobBoard::new(config.delays.search)),
            coach: Arc::new(ScriptedCoach::new(
                config.delays.coach_min,
                config.delays.coach_jitter,
            )),
            config,
        })
    }
}
