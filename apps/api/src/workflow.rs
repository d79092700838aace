//! Single-shot asynchronous operation owned by a page:
//! Idle -> Pending -> Resolved (or Failed) -> Idle on reset.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::errors::AppError;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Workflow<R> {
    Idle,
    Pending { started_at: DateTime<Utc> },
    Resolved { result: R },
    Failed { message: String },
}

impl<R> Default for Workflow<R> {
    fn default() -> Self {
        Workflow::Idle
    }
}

impl<R> Workflow<R> {
    /// Moves to Pending. Rejected while already Pending.
    pub fn begin(&mut self) -> Result<(), AppError> {
        if self.is_pending() {
            return Err(AppError::Conflict(
                "An operation is already in progress".to_string(),
            ));
        }
        *self = Workflow::Pending {
            started_at: Utc::now(),
        };
        Ok(())
    }

    /// Applies an outcome. Returns false when nothing was pending, in which
    /// case the outcome is discarded.
    pub fn resolve(&mut self, outcome: Result<R, AppError>) -> bool {
        if !self.is_pending() {
            return false;
        }
        *self = match outcome {
            Ok(result) => Workflow::Resolved { result },
            Err(e) => {
                warn!("Pending operation failed: {e}");
                Workflow::Failed {
                    message: e.public_message(),
                }
            }
        };
        true
    }

    pub fn reset(&mut self) {
        *self = Workflow::Idle;
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Workflow::Pending { .. })
    }

    pub fn result(&self) -> Option<&R> {
        match self {
            Workflow::Resolved { result } => Some(result),
            _ => None,
        }
    }

    /// Errors with `Conflict` while Pending; used to lock page inputs.
    pub fn ensure_editable(&self) -> Result<(), AppError> {
        if self.is_pending() {
            return Err(AppError::Conflict(
                "Inputs are locked while an operation is in progress".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle() {
        let mut wf: Workflow<u32> = Workflow::default();
        assert!(matches!(wf, Workflow::Idle));
        wf.begin().unwrap();
        assert!(wf.is_pending());
        assert!(wf.resolve(Ok(7)));
        assert_eq!(wf.result(), Some(&7));
        wf.reset();
        assert!(wf.result().is_none());
    }

    #[test]
    fn test_begin_while_pending_conflicts() {
        let mut wf: Workflow<u32> = Workflow::default();
        wf.begin().unwrap();
        assert!(matches!(wf.begin(), Err(AppError::Conflict(_))));
        assert!(wf.ensure_editable().is_err());
    }

    #[test]
    fn test_rerun_replaces_result() {
        let mut wf: Workflow<u32> = Workflow::default();
        wf.begin().unwrap();
        wf.resolve(Ok(1));
        wf.begin().unwrap();
        assert!(wf.result().is_none());
        wf.resolve(Ok(2));
        assert_eq!(wf.result(), Some(&2));
    }

    #[test]
    fn test_late_resolution_after_reset_is_dropped() {
        let mut wf: Workflow<u32> = Workflow::default();
        wf.begin().unwrap();
        wf.reset();
        assert!(!wf.resolve(Ok(9)));
        assert!(matches!(wf, Workflow::Idle));
    }

    #[test]
    fn test_failure_is_recorded_and_resettable() {
        let mut wf: Workflow<u32> = Workflow::default();
        wf.begin().unwrap();
        wf.resolve(Err(AppError::Conflict("busy".to_string())));
        match &wf {
            Workflow::Failed { message } => assert_eq!(message, "busy"),
            other => panic!("expected failure, got {other:?}"),
        }
        wf.begin().unwrap();
        assert!(wf.is_pending());
    }

    #[test]
    fn test_serializes_with_status_tag() {
        let mut wf: Workflow<u32> = Workflow::default();
        wf.begin().unwrap();
        wf.resolve(Ok(3));
        let json = serde_json::to_value(&wf).unwrap();
        assert_eq!(json["status"], "resolved");
        assert_eq!(json["result"], 3);
    }

    #[test]
    fn test_service_failure_hides_transport_detail() {
        let mut wf: Workflow<u32> = Workflow::default();
        wf.begin().unwrap();
        wf.resolve(Err(AppError::Service(
            "HTTP error: error sending request for url (http://10.0.0.7:9000/evaluate)".to_string(),
        )));
        let json = serde_json::to_value(&wf).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["message"], "The scoring service is unavailable");
    }
}
