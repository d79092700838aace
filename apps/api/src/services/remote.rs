//! HTTP client for an external scoring service.
//!
//! Each operation is a JSON POST to `{base_url}/{analyze|optimize|evaluate}`
//! whose body is the request type and whose response is the result type.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::analysis::analyzer::{AnalysisRequest, AnalysisResult};
use crate::analysis::evaluator::{EvaluationRequest, EvaluationResult};
use crate::analysis::optimizer::{OptimizationRequest, OptimizationResult};
use crate::errors::AppError;
use crate::services::ScoringBackend;

const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },
}

impl From<RemoteError> for AppError {
    fn from(e: RemoteError) -> Self {
        AppError::Service(e.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    error: ServiceErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ServiceErrorDetail {
    message: String,
}

#[derive(Clone)]
pub struct RemoteScoringBackend {
    client: Client,
    base_url: String,
}

impl RemoteScoringBackend {
    pub fn new(base_url: &str) -> Result<Self, RemoteError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, operation: &str) -> String {
        format!("{}/{}", self.base_url, operation)
    }

    /// POSTs `body` and decodes the JSON answer.
    /// Retries on 429 and 5xx with exponential backoff.
    async fn post_json<B, T>(&self, operation: &str, body: &B) -> Result<T, RemoteError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(operation);
        let mut last_error: Option<RemoteError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // 1s, 2s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Scoring call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.post(&url).json(body).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(RemoteError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Scoring service returned {}: {}", status, body);
                last_error = Some(RemoteError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ServiceErrorBody>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(RemoteError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            debug!(%url, "Scoring call succeeded");
            return Ok(response.json().await?);
        }

        Err(last_error.unwrap_or(RemoteError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl ScoringBackend for RemoteScoringBackend {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AppError> {
        Ok(self.post_json("analyze", &request).await?)
    }

    async fn optimize(
        &self,
        request: OptimizationRequest,
    ) -> Result<OptimizationResult, AppError> {
        Ok(self.post_json("optimize", &request).await?)
    }

    async fn evaluate(&self, request: EvaluationRequest) -> Result<EvaluationResult, AppError> {
        Ok(self.post_json("evaluate", &request).await?)
    }

    fn backend_name(&self) -> &'static str {
        "remote"
    }
}
