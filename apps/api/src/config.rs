use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::upload::UploadPolicy;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub upload: UploadPolicy,
    pub delays: MockDelays,
    /// When set, scoring requests go to this service instead of the built-in mock.
    pub scoring_service_url: Option<String>,
    /// Sessions untouched this long are unmounted.
    pub session_idle: Duration,
    pub session_sweep_interval: Duration,
}

/// Artificial latencies of the mock services.
#[derive(Debug, Clone)]
pub struct MockDelays {
    pub analysis: Duration,
    pub optimization: Duration,
    pub evaluation: Duration,
    pub search: Duration,
    pub coach_min: Duration,
    pub coach_jitter: Duration,
}

impl Default for MockDelays {
    fn default() -> Self {
        Self {
            analysis: Duration::from_millis(2500),
            optimization: Duration::from_millis(3000),
            evaluation: Duration::from_millis(3000),
            search: Duration::from_millis(1500),
            coach_min: Duration::from_millis(1500),
            coach_jitter: Duration::from_millis(1000),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            upload: UploadPolicy::default(),
            delays: MockDelays::default(),
            scoring_service_url: None,
            session_idle: Duration::from_secs(30 * 60),
            session_sweep_interval: Duration::from_secs(60),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        let upload = UploadPolicy::new(
            &std::env::var("ACCEPTED_EXTENSIONS")
                .unwrap_or_else(|_| defaults.upload.accepted_extensions.join(",")),
            env_or("MAX_UPLOAD_MB", defaults.upload.max_size_mb)?,
        );

        let delays = MockDelays {
            analysis: delay_env("ANALYSIS_DELAY_MS", defaults.delays.analysis)?,
            optimization: delay_env("OPTIMIZATION_DELAY_MS", defaults.delays.optimization)?,
            evaluation: delay_env("EVALUATION_DELAY_MS", defaults.delays.evaluation)?,
            search: delay_env("SEARCH_DELAY_MS", defaults.delays.search)?,
            coach_min: delay_env("COACH_DELAY_MIN_MS", defaults.delays.coach_min)?,
            coach_jitter: delay_env("COACH_DELAY_JITTER_MS", defaults.delays.coach_jitter)?,
        };

        Ok(Config {
            port: env_or("PORT", defaults.port).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            upload,
            delays,
            scoring_service_url: std::env::var("SCORING_SERVICE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            session_idle: secs_env("SESSION_IDLE_SECS", defaults.session_idle)?,
            session_sweep_interval: secs_env("SESSION_SWEEP_SECS", defaults.session_sweep_interval)?,
        })
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn delay_env(key: &str, default: Duration) -> Result<Duration> {
    let millis = env_or(key, default.as_millis() as u64)?;
    Ok(Duration::from_millis(millis))
}

fn secs_env(key: &str, default: Duration) -> Result<Duration> {
    let secs = env_or(key, default.as_secs())?;
    if secs == 0 {
        anyhow::bail!("Environment variable '{key}' must be at least 1 second");
    }
    Ok(Duration::from_secs(secs))
}
