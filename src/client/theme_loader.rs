use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::domain::models::theme::Theme;
use crate::infrastructure::config::ClientConfig;

#[derive(Error, Debug)]
pub enum ThemeFetchError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Unexpected response: {0}")]
    Response(String),
}

/// Where the loader gets the active theme from
#[async_trait]
pub trait ThemeSource: Send + Sync {
    async fn fetch_active_theme(&self) -> Result<Option<Theme>, ThemeFetchError>;
}

/// Client-side holder of the theme currently applied to the page
#[derive(Clone, Default)]
pub struct ThemeSlot {
    inner: Arc<RwLock<Option<Theme>>>,
}

impl ThemeSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self) -> Option<Theme> {
        self.inner.read().await.clone()
    }

    pub async fn is_loaded(&self) -> bool {
        self.inner.read().await.is_some()
    }

    async fn set(&self, theme: Theme) {
        *self.inner.write().await = Some(theme);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&ClientConfig::default())
    }
}

impl From<&ClientConfig> for RetryPolicy {
    fn from(config: &ClientConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            backoff_step: Duration::from_millis(config.backoff_step_millis),
        }
    }
}

impl RetryPolicy {
    /// Pause after the given failed attempt: one step per attempt made so far.
    /// Saturates at `Duration::MAX` for oversized steps.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff_step
            .checked_mul(attempt)
            .unwrap_or(Duration::MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderState {
    Idle,
    /// A theme was already present, nothing was fetched
    AlreadyLoaded,
    /// About to make (or making) the n-th attempt, 1-based
    Attempting(u32),
    Succeeded,
    GaveUp,
    Cancelled,
}

impl LoaderState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LoaderState::Idle | LoaderState::Attempting(_))
    }
}

/// What a `load` run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub state: LoaderState,
    pub attempts: u32,
    pub delays: Vec<Duration>,
}

impl Default for LoadReport {
    fn default() -> Self {
        Self {
            state: LoaderState::Idle,
            attempts: 0,
            delays: Vec::new(),
        }
    }
}

/// Fetches the active theme once per session, retrying with linear backoff.
pub struct ThemeLoader {
    source: Arc<dyn ThemeSource>,
    policy: RetryPolicy,
    slot: ThemeSlot,
}

impl ThemeLoader {
    pub fn new(source: Arc<dyn ThemeSource>, policy: RetryPolicy, slot: ThemeSlot) -> Self {
        Self {
            source,
            policy,
            slot,
        }
    }

    pub fn slot(&self) -> &ThemeSlot {
        &self.slot
    }

    /// Run the loader to a terminal state.
    ///
    /// `cancel` is observed at every suspension point; once it fires, no
    /// further fetch is issued and the slot is left untouched.
    pub async fn load(&self, cancel: &CancellationToken) -> LoadReport {
        let mut report = LoadReport::default();

        if self.slot.is_loaded().await {
            report.state = LoaderState::AlreadyLoaded;
            return report;
        }

        report.state = LoaderState::Attempting(1);
        while !report.state.is_terminal() {
            let next = self.step(report.state, cancel, &mut report).await;
            report.state = next;
        }

        tracing::debug!(
            "Theme loader finished in state {:?} after {} attempt(s)",
            report.state,
            report.attempts
        );
        report
    }

    async fn step(
        &self,
        state: LoaderState,
        cancel: &CancellationToken,
        report: &mut LoadReport,
    ) -> LoaderState {
        let LoaderState::Attempting(attempt) = state else {
            return state;
        };
        if cancel.is_cancelled() {
            return LoaderState::Cancelled;
        }

        report.attempts = attempt;
        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => return LoaderState::Cancelled,
            fetched = self.source.fetch_active_theme() => fetched,
        };

        match fetched {
            Ok(Some(theme)) => {
                if cancel.is_cancelled() {
                    return LoaderState::Cancelled;
                }
                tracing::debug!("Loaded theme {} on attempt {}", theme.name, attempt);
                self.slot.set(theme).await;
                return LoaderState::Succeeded;
            }
            Ok(None) => tracing::debug!("No active theme on attempt {}", attempt),
            Err(error) => tracing::warn!("Theme fetch attempt {} failed: {}", attempt, error),
        }

        if attempt >= self.policy.max_attempts {
            tracing::warn!("Giving up on theme fetch, falling back to default styling");
            return LoaderState::GaveUp;
        }

        let delay = self.policy.delay_after(attempt);
        tokio::select! {
            biased;
            _ = cancel.cancelled() => LoaderState::Cancelled,
            _ = tokio::time::sleep(delay) => {
                report.delays.push(delay);
                LoaderState::Attempting(attempt + 1)
            }
        }
    }

    /// Start loading in the background, tied to the lifetime of the returned handle.
    pub fn mount(self: Arc<Self>) -> MountedLoader {
        let cancel_token = CancellationToken::new();
        let token = cancel_token.clone();
        let task = tokio::spawn(async move { self.load(&token).await });

        MountedLoader {
            guard: cancel_token.clone().drop_guard(),
            cancel_token,
            task,
        }
    }
}

/// A running load. Dropping it tears the load down.
pub struct MountedLoader {
    cancel_token: CancellationToken,
    guard: DropGuard,
    task: JoinHandle<LoadReport>,
}

impl MountedLoader {
    /// Stop retrying; no fetch or state write happens after this returns.
    pub fn teardown(&self) {
        self.cancel_token.cancel();
    }

    /// Wait for the load to reach a terminal state
    pub async fn finished(self) -> Result<LoadReport, JoinError> {
        let MountedLoader { guard, task, .. } = self;
        let report = task.await;
        guard.disarm();
        report
    }
}
