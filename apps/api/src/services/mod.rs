//! Service ports the pages depend on.
//!
//! Pages never compute results themselves. `AppState` carries one
//! implementation of each port; the mock implementations are the default and
//! `RemoteScoringBackend` forwards scoring to an external HTTP service.

pub mod fixtures;
pub mod mock;
pub mod remote;

use async_trait::async_trait;

use crate::analysis::analyzer::{AnalysisRequest, AnalysisResult};
use crate::analysis::evaluator::{EvaluationRequest, EvaluationResult};
use crate::analysis::optimizer::{OptimizationRequest, OptimizationResult};
use crate::errors::AppError;
use crate::jobs::SearchOutcome;

pub use mock::{MockScoringBackend, SampleJobBoard, ScriptedCoach};
pub use remote::RemoteScoringBackend;

/// Scores and rewrites CVs. Carried in `AppState` as `Arc<dyn ScoringBackend>`.
#[async_trait]
pub trait ScoringBackend: Send + Sync {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AppError>;

    async fn optimize(
        &self,
        request: OptimizationRequest,
    ) -> Result<OptimizationResult, AppError>;

    async fn evaluate(&self, request: EvaluationRequest) -> Result<EvaluationResult, AppError>;

    /// "mock" | "remote"; logged at startup.
    fn backend_name(&self) -> &'static str;
}

#[async_trait]
pub trait JobBoard: Send + Sync {
    async fn search(&self, query: &str) -> Result<SearchOutcome, AppError>;
}

/// Produces the coach's answer to one user message.
#[async_trait]
pub trait CoachBackend: Send + Sync {
    async fn reply(&self, message: &str) -> Result<String, AppError>;
}
