//! Default service implementations: canned data after an artificial delay.
//! None of them can fail.

use std::time::Duration;

use async_trait::async_trait;
use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::debug;

use crate::analysis::analyzer::{AnalysisRequest, AnalysisResult};
use crate::analysis::evaluator::{EvaluationRequest, EvaluationResult};
use crate::analysis::optimizer::{
    DownloadFormat, OptimizationRequest, OptimizationResult,
};
use crate::config::MockDelays;
use crate::errors::AppError;
use crate::jobs::{search_postings, JobPosting, SearchOutcome};
use crate::services::fixtures;
use crate::services::{CoachBackend, JobBoard, ScoringBackend};

pub struct MockScoringBackend {
    delays: MockDelays,
}

impl MockScoringBackend {
    pub fn new(delays: MockDelays) -> Self {
        Self { delays }
    }
}

#[async_trait]
impl ScoringBackend for MockScoringBackend {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AppError> {
        debug!(
            description_len = request.job_description.len(),
            "Mock analysis"
        );
        tokio::time::sleep(self.delays.analysis).await;
        Ok(fixtures::analysis_result())
    }

    async fn optimize(
        &self,
        request: OptimizationRequest,
    ) -> Result<OptimizationResult, AppError> {
        tokio::time::sleep(self.delays.optimization).await;
        Ok(OptimizationResult {
            target_role: request.target_role,
            applied_improvements: fixtures::to_strings(fixtures::OPTIMIZATION_IMPROVEMENTS),
            download_formats: vec![DownloadFormat::Pdf, DownloadFormat::Latex],
        })
    }

    async fn evaluate(&self, request: EvaluationRequest) -> Result<EvaluationResult, AppError> {
        debug!(file = %request.file.name, "Mock evaluation");
        tokio::time::sleep(self.delays.evaluation).await;
        Ok(EvaluationResult::from_categories(
            fixtures::evaluation_categories(),
            fixtures::EVALUATION_SUMMARY.to_string(),
        ))
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}

/// Searches the built-in sample postings.
pub struct SampleJobBoard {
    postings: Vec<JobPosting>,
    delay: Duration,
}

impl SampleJobBoard {
    pub fn new(delay: Duration) -> Self {
        Self {
            postings: fixtures::sample_jobs(),
            delay,
        }
    }
}

#[async_trait]
impl JobBoard for SampleJobBoard {
    async fn search(&self, query: &str) -> Result<SearchOutcome, AppError> {
        tokio::time::sleep(self.delay).await;
        Ok(search_postings(&self.postings, query))
    }
}

/// Answers with a random reply from a fixed pool after a random delay.
pub struct ScriptedCoach {
    replies: Vec<String>,
    min_delay: Duration,
    jitter: Duration,
}

impl ScriptedCoach {
    pub fn new(min_delay: Duration, jitter: Duration) -> Self {
        Self {
            replies: fixtures::to_strings(fixtures::COACH_REPLIES),
            min_delay,
            jitter,
        }
    }

    /// Delay in `[min_delay, min_delay + jitter]` and the chosen reply.
    fn draw(&self) -> (Duration, String) {
        let mut rng = rand::rng();
        let jitter_ms = self.jitter.as_millis() as u64;
        let extra = if jitter_ms == 0 {
            0
        } else {
            rng.random_range(0..=jitter_ms)
        };
        let reply = self.replies.choose(&mut rng).cloned().unwrap_or_default();
        (self.min_delay + Duration::from_millis(extra), reply)
    }
}

#[async_trait]
impl CoachBackend for ScriptedCoach {
    async fn reply(&self, message: &str) -> Result<String, AppError> {
        let (delay, reply) = self.draw();
        debug!(
            message_len = message.len(),
            delay_ms = delay.as_millis() as u64,
            "Coach composing"
        );
        tokio::time::sleep(delay).await;
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::FileDescriptor;

    fn instant() -> MockDelays {
        MockDelays {
            analysis: Duration::ZERO,
            optimization: Duration::ZERO,
            evaluation: Duration::ZERO,
            search: Duration::ZERO,
            coach_min: Duration::ZERO,
            coach_jitter: Duration::ZERO,
        }
    }

    fn cv() -> FileDescriptor {
        FileDescriptor {
            name: "cv.pdf".to_string(),
            size_bytes: 100,
            mime_type: "application/pdf".to_string(),
        }
    }

    #[tokio::test]
    async fn test_evaluate_scores_eighty() {
        let backend = MockScoringBackend::new(instant());
        let result = backend
            .evaluate(EvaluationRequest { file: cv() })
            .await
            .unwrap();
        assert_eq!(result.overall_score.value(), 80);
    }

    #[tokio::test]
    async fn test_optimize_echoes_role() {
        let backend = MockScoringBackend::new(instant());
        let result = backend
            .optimize(OptimizationRequest {
                file: cv(),
                target_role: "Data Analyst".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(result.target_role, "Data Analyst");
        assert_eq!(result.applied_improvements.len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_analysis_waits_for_configured_delay() {
        let backend = MockScoringBackend::new(MockDelays::default());
        let started = tokio::time::Instant::now();
        backend
            .analyze(AnalysisRequest {
                file: None,
                job_description: "SQL".to_string(),
            })
            .await
            .unwrap();
        assert!(started.elapsed() >= Duration::from_millis(2500));
    }

    #[test]
    fn test_coach_draw_stays_in_bounds() {
        let coach = ScriptedCoach::new(Duration::from_millis(1500), Duration::from_millis(1000));
        for _ in 0..50 {
            let (delay, reply) = coach.draw();
            assert!(delay >= Duration::from_millis(1500));
            assert!(delay <= Duration::from_millis(2500));
            assert!(fixtures::COACH_REPLIES.contains(&reply.as_str()));
        }
    }

    #[tokio::test]
    async fn test_job_board_falls_back() {
        let board = SampleJobBoard::new(Duration::ZERO);
        let outcome = board.search("boulanger").await.unwrap();
        assert!(outcome.fallback);
        assert_eq!(outcome.jobs.len(), 4);
    }
}
