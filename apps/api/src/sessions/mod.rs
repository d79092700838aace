//! Mounted page sessions.
//!
//! Each session owns the state of exactly one page. Nothing is shared between
//! sessions and nothing outlives an unmount: dropping a session cancels every
//! background resolution still waiting on a service. Sessions a client
//! abandons are unmounted by the idle sweeper.

pub mod handlers;

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::analysis::analyzer::CvAnalyzer;
use crate::analysis::evaluator::AtsEvaluator;
use crate::analysis::optimizer::AtsOptimizer;
use crate::builder::CvBuilder;
use crate::chat::CoachChat;
use crate::errors::AppError;
use crate::jobs::JobAssistant;
use crate::pages::Page;
use crate::upload::FileUpload;

/// State of one mounted page.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "page", rename_all = "kebab-case")]
pub enum PageSession {
    Assistant(JobAssistant),
    SmartAssistant(CoachChat),
    CvAnalyzer(CvAnalyzer),
    AtsOptimizer(AtsOptimizer),
    AtsEvaluator(AtsEvaluator),
    CvBuilder(CvBuilder),
}

impl PageSession {
    /// Fresh state for `page`; static pages cannot be mounted.
    pub fn mount(page: Page) -> Result<Self, AppError> {
        Ok(match page {
            Page::Assistant => PageSession::Assistant(JobAssistant::default()),
            Page::SmartAssistant => PageSession::SmartAssistant(CoachChat::new()),
            Page::CvAnalyzer => PageSession::CvAnalyzer(CvAnalyzer::default()),
            Page::AtsOptimizer => PageSession::AtsOptimizer(AtsOptimizer::default()),
            Page::AtsEvaluator => PageSession::AtsEvaluator(AtsEvaluator::default()),
            Page::CvBuilder => PageSession::CvBuilder(CvBuilder::new()),
            Page::Home | Page::NotFound => {
                return Err(AppError::Validation(format!(
                    "Page '{}' has no state to mount",
                    page.label()
                )))
            }
        })
    }

    pub fn page(&self) -> Page {
        match self {
            PageSession::Assistant(_) => Page::Assistant,
            PageSession::SmartAssistant(_) => Page::SmartAssistant,
            PageSession::CvAnalyzer(_) => Page::CvAnalyzer,
            PageSession::AtsOptimizer(_) => Page::AtsOptimizer,
            PageSession::AtsEvaluator(_) => Page::AtsEvaluator,
            PageSession::CvBuilder(_) => Page::CvBuilder,
        }
    }

    fn wrong_page(&self, expected: Page) -> AppError {
        AppError::Validation(format!(
            "Session is a '{}' page, not '{}'",
            self.page().label(),
            expected.label()
        ))
    }

    pub fn assistant_mut(&mut self) -> Result<&mut JobAssistant, AppError> {
        match self {
            PageSession::Assistant(page) => Ok(page),
            other => Err(other.wrong_page(Page::Assistant)),
        }
    }

    pub fn coach_mut(&mut self) -> Result<&mut CoachChat, AppError> {
        match self {
            PageSession::SmartAssistant(page) => Ok(page),
            other => Err(other.wrong_page(Page::SmartAssistant)),
        }
    }

    pub fn analyzer_mut(&mut self) -> Result<&mut CvAnalyzer, AppError> {
        match self {
            PageSession::CvAnalyzer(page) => Ok(page),
            other => Err(other.wrong_page(Page::CvAnalyzer)),
        }
    }

    pub fn optimizer_mut(&mut self) -> Result<&mut AtsOptimizer, AppError> {
        match self {
            PageSession::AtsOptimizer(page) => Ok(page),
            other => Err(other.wrong_page(Page::AtsOptimizer)),
        }
    }

    pub fn evaluator_mut(&mut self) -> Result<&mut AtsEvaluator, AppError> {
        match self {
            PageSession::AtsEvaluator(page) => Ok(page),
            other => Err(other.wrong_page(Page::AtsEvaluator)),
        }
    }

    pub fn builder_mut(&mut self) -> Result<&mut CvBuilder, AppError> {
        match self {
            PageSession::CvBuilder(page) => Ok(page),
            other => Err(other.wrong_page(Page::CvBuilder)),
        }
    }

    /// The page's upload widget, locked while its workflow is pending.
    pub fn upload_mut(&mut self) -> Result<&mut FileUpload, AppError> {
        match self {
            PageSession::CvAnalyzer(page) => page.upload_mut(),
            PageSession::AtsOptimizer(page) => page.upload_mut(),
            PageSession::AtsEvaluator(page) => page.upload_mut(),
            other => Err(AppError::Validation(format!(
                "Page '{}' has no file upload",
                other.page().label()
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub mounted_at: DateTime<Utc>,
    pub state: PageSession,
}

#[derive(Clone)]
pub struct SessionHandle {
    pub id: Uuid,
    pub page: Page,
    pub mounted_at: DateTime<Utc>,
    state: Arc<Mutex<PageSession>>,
    /// Last client access; background resolutions do not count.
    last_seen: Arc<Mutex<Instant>>,
    cancel: CancellationToken,
}

fn poisoned() -> AppError {
    AppError::Internal(anyhow!("session state lock poisoned"))
}

impl SessionHandle {
    /// Runs `f` against the page state. The lock is held only for the call.
    pub fn with<T>(
        &self,
        f: impl FnOnce(&mut PageSession) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        self.touch();
        let mut state = self.state.lock().map_err(|_| poisoned())?;
        f(&mut *state)
    }

    pub fn snapshot(&self) -> Result<SessionSnapshot, AppError> {
        self.touch();
        let state = self.state.lock().map_err(|_| poisoned())?;
        Ok(SessionSnapshot {
            session_id: self.id,
            mounted_at: self.mounted_at,
            state: state.clone(),
        })
    }

    fn touch(&self) {
        if let Ok(mut seen) = self.last_seen.lock() {
            *seen = Instant::now();
        }
    }

    pub fn idle_for(&self) -> Duration {
        self.last_seen
            .lock()
            .map(|seen| seen.elapsed())
            .unwrap_or_default()
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Awaits `work` in the background and hands its output to `apply`.
    /// If the session is unmounted first, the output is discarded.
    pub fn spawn_resolution<T, F, A>(&self, work: F, apply: A)
    where
        T: Send + 'static,
        F: Future<Output = T> + Send + 'static,
        A: FnOnce(&mut PageSession, T) + Send + 'static,
    {
        let id = self.id;
        let state = Arc::clone(&self.state);
        let cancel = self.cancel.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(session_id = %id, "Session closed before pending work resolved");
                }
                output = work => {
                    match state.lock() {
                        Ok(mut page) => apply(&mut *page, output),
                        Err(_) => warn!(session_id = %id, "Dropping resolution: state lock poisoned"),
                    }
                }
            }
        });
    }
}

/// Registry of mounted sessions keyed by id.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&self, page: Page) -> Result<SessionHandle, AppError> {
        let state = PageSession::mount(page)?;
        let handle = SessionHandle {
            id: Uuid::new_v4(),
            page,
            mounted_at: Utc::now(),
            state: Arc::new(Mutex::new(state)),
            last_seen: Arc::new(Mutex::new(Instant::now())),
            cancel: CancellationToken::new(),
        };

        self.inner
            .write()
            .map_err(|_| poisoned())?
            .insert(handle.id, handle.clone());
        info!(session_id = %handle.id, ?page, "Session mounted");
        Ok(handle)
    }

    pub fn get(&self, id: Uuid) -> Result<SessionHandle, AppError> {
        self.inner
            .read()
            .map_err(|_| poisoned())?
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    /// Removes the session and cancels its pending work.
    pub fn unmount(&self, id: Uuid) -> Result<(), AppError> {
        let handle = self
            .inner
            .write()
            .map_err(|_| poisoned())?
            .remove(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        handle.cancel.cancel();
        info!(session_id = %id, page = ?handle.page, "Session unmounted");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    /// Unmounts every session untouched for at least `max_idle`.
    /// Returns how many were evicted.
    pub fn evict_idle(&self, max_idle: Duration) -> Result<usize, AppError> {
        let stale: Vec<Uuid> = self
            .inner
            .read()
            .map_err(|_| poisoned())?
            .values()
            .filter(|handle| handle.idle_for() >= max_idle)
            .map(|handle| handle.id)
            .collect();

        let mut evicted = 0;
        for id in stale {
            // A concurrent DELETE may have won the race.
            if self.unmount(id).is_ok() {
                evicted += 1;
            }
        }
        Ok(evicted)
    }

    /// Background task that evicts idle sessions every `period`.
    pub fn spawn_sweeper(&self, max_idle: Duration, period: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match store.evict_idle(max_idle) {
                    Ok(0) => {}
                    Ok(evicted) => info!(evicted, remaining = store.len(), "Idle sessions evicted"),
                    Err(e) => warn!("Session sweep failed: {e}"),
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_pages_cannot_mount() {
        let store = SessionStore::new();
        assert!(store.mount(Page::Home).is_err());
        assert!(store.mount(Page::NotFound).is_err());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_mount_get_unmount() {
        let store = SessionStore::new();
        let handle = store.mount(Page::CvBuilder).unwrap();
        assert_eq!(store.get(handle.id).unwrap().page, Page::CvBuilder);
        store.unmount(handle.id).unwrap();
        assert!(handle.is_closed());
        assert!(matches!(store.get(handle.id), Err(AppError::NotFound(_))));
        assert!(store.unmount(handle.id).is_err());
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let a = store.mount(Page::CvBuilder).unwrap();
        let b = store.mount(Page::CvBuilder).unwrap();
        a.with(|page| Ok(page.builder_mut()?.next())).unwrap();
        let b_step = b.with(|page| Ok(page.builder_mut()?.step.ordinal())).unwrap();
        assert_eq!(b_step, 1);
    }

    #[test]
    fn test_wrong_page_accessor_is_rejected() {
        let store = SessionStore::new();
        let handle = store.mount(Page::SmartAssistant).unwrap();
        let err = handle.with(|page| page.builder_mut().map(|_| ())).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(handle.with(|page| page.upload_mut().map(|_| ())).is_err());
    }

    #[test]
    fn test_snapshot_is_tagged_by_page() {
        let store = SessionStore::new();
        let handle = store.mount(Page::AtsEvaluator).unwrap();
        let json = serde_json::to_value(handle.snapshot().unwrap()).unwrap();
        assert_eq!(json["state"]["page"], "ats-evaluator");
        assert_eq!(json["state"]["evaluation"]["status"], "idle");
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolution_applies_after_work() {
        let store = SessionStore::new();
        let handle = store.mount(Page::CvBuilder).unwrap();
        handle.spawn_resolution(
            async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                4i64
            },
            |page, step| {
                let _ = page.builder_mut().map(|b| b.go_to_step(step));
            },
        );
        tokio::time::sleep(Duration::from_secs(2)).await;
        let step = handle.with(|page| Ok(page.builder_mut()?.step.ordinal())).unwrap();
        assert_eq!(step, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_drops_pending_resolution() {
        let store = SessionStore::new();
        let handle = store.mount(Page::CvBuilder).unwrap();
        handle.spawn_resolution(
            async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                5i64
            },
            |page, step| {
                let _ = page.builder_mut().map(|b| b.go_to_step(step));
            },
        );
        store.unmount(handle.id).unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;
        let step = handle.with(|page| Ok(page.builder_mut()?.step.ordinal())).unwrap();
        assert_eq!(step, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_session_is_evicted_and_its_work_dropped() {
        let store = SessionStore::new();
        let handle = store.mount(Page::CvBuilder).unwrap();
        handle.spawn_resolution(
            async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                6i64
            },
            |page, step| {
                let _ = page.builder_mut().map(|b| b.go_to_step(step));
            },
        );
        let sweeper = store.spawn_sweeper(Duration::from_secs(2), Duration::from_secs(1));

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(store.len(), 0);
        assert!(handle.is_closed());

        tokio::time::sleep(Duration::from_secs(10)).await;
        let step = handle.with(|page| Ok(page.builder_mut()?.step.ordinal())).unwrap();
        assert_eq!(step, 1);
        sweeper.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_active_session_survives_sweeps() {
        let store = SessionStore::new();
        let handle = store.mount(Page::SmartAssistant).unwrap();
        let sweeper = store.spawn_sweeper(Duration::from_secs(3), Duration::from_secs(1));

        for _ in 0..6 {
            tokio::time::sleep(Duration::from_secs(1)).await;
            handle.snapshot().unwrap();
        }
        assert_eq!(store.len(), 1);
        assert!(!handle.is_closed());
        sweeper.abort();
    }

    #[test]
    fn test_evict_idle_skips_fresh_sessions() {
        let store = SessionStore::new();
        store.mount(Page::AtsOptimizer).unwrap();
        assert_eq!(store.evict_idle(Duration::from_secs(60)).unwrap(), 0);
        assert_eq!(store.evict_idle(Duration::ZERO).unwrap(), 1);
        assert_eq!(store.len(), 0);
    }
}
