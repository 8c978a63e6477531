//! Status polling for long-running resources.
//!
//! Training a model, provisioning an environment, or ingesting a corpus
//! returns immediately while the server works; readiness is observed by
//! polling a status endpoint. [`StatusPoller::wait`] drives the state
//! machine `Pending -> Polling -> Terminal(Success | Failure)` as an
//! explicit timer loop: each tick issues one status check, inspects the
//! reported status, and either finishes or schedules the next tick.
//!
//! A terminal failure status is a normal [`PollOutcome::Failed`] delivered
//! through the same channel as success, so callers handle both uniformly;
//! "still processing" is a state transition, never an error.
//!
//! At most one wait may be in flight per resource identifier; a second
//! concurrent wait for the same id fails fast instead of racing the first.
//! Cancellation and wall-clock timeout resolve the wait with `Cancelled` or
//! `TimedOut` rather than hanging.

use std::collections::HashSet;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::Rng;
use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;

use crate::error::{WatsonError, WatsonResult};

/// Normalized status of a long-running resource.
///
/// Each service reports its own status tokens; [`ResourceStatus::from_token`]
/// folds the vocabulary used across Watson services into one enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceStatus {
    Pending,
    Processing,
    Ready,
    Failed,
    Unknown,
}

impl ResourceStatus {
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "processing" | "training" | "ingesting" | "being_processed" => Self::Processing,
            "ready" | "available" | "active" => Self::Ready,
            "failed" | "error" => Self::Failed,
            _ => Self::Unknown,
        }
    }

    /// True when no further transition can occur.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready | Self::Failed)
    }
}

/// Implemented by status snapshots so the poller can read their state.
pub trait PollStatus {
    fn poll_status(&self) -> ResourceStatus;
}

/// Poller state, for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Pending,
    Polling,
    Terminal(TerminalState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalState {
    Success,
    Failure,
}

/// How a completed wait ended. Both variants carry the final status
/// snapshot.
#[derive(Debug, Clone)]
pub enum PollOutcome<T> {
    Succeeded(T),
    Failed(T),
}

impl<T> PollOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    /// The final snapshot, whichever way the resource ended.
    pub fn into_snapshot(self) -> T {
        match self {
            Self::Succeeded(t) | Self::Failed(t) => t,
        }
    }
}

/// Tick schedule for a poll loop.
///
/// The default preserves the traditional SDK behavior: a fixed 5 second
/// interval with no bound. Production callers should prefer a bounded
/// policy; the builders below enable capped exponential backoff, jitter,
/// and a wall-clock timeout.
#[derive(Debug, Clone)]
pub struct PollPolicy {
    /// Delay before the second check (the first happens immediately).
    pub initial_interval: Duration,
    /// Cap on the delay between checks.
    pub max_interval: Duration,
    /// Multiplier applied to the delay after each check; 1.0 keeps the
    /// interval fixed.
    pub backoff_multiplier: f64,
    /// Maximum jitter fraction (0.0 to 1.0) applied to each delay.
    pub jitter_factor: f64,
    /// Wall-clock bound on the whole wait.
    pub timeout: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_secs(5),
            max_interval: Duration::from_secs(5),
            backoff_multiplier: 1.0,
            jitter_factor: 0.0,
            timeout: None,
        }
    }
}

impl PollPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed interval, no backoff.
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.initial_interval = interval;
        self.max_interval = interval;
        self
    }

    pub const fn with_initial_interval(mut self, interval: Duration) -> Self {
        self.initial_interval = interval;
        self
    }

    pub const fn with_max_interval(mut self, interval: Duration) -> Self {
        self.max_interval = interval;
        self
    }

    pub const fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    pub fn with_jitter_factor(mut self, factor: f64) -> Self {
        self.jitter_factor = factor.clamp(0.0, 1.0);
        self
    }

    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Delay before the next check, given how many checks have completed.
    pub fn delay_for(&self, completed_checks: u32) -> Duration {
        let base = self.initial_interval.as_millis() as f64
            * self.backoff_multiplier.powi(completed_checks.saturating_sub(1) as i32);
        let capped = Duration::from_millis(base as u64).min(self.max_interval);
        if self.jitter_factor > 0.0 {
            self.add_jitter(capped)
        } else {
            capped
        }
    }

    fn add_jitter(&self, delay: Duration) -> Duration {
        let mut rng = rand::thread_rng();
        let range = delay.as_millis() as f64 * self.jitter_factor;
        let jitter = rng.gen_range(-range..=range);
        Duration::from_millis(((delay.as_millis() as f64 + jitter).max(0.0)) as u64)
    }
}

/// Drives status checks to a terminal state, enforcing single-flight per
/// resource identifier.
#[derive(Debug, Default)]
pub struct StatusPoller {
    in_flight: Arc<Mutex<HashSet<String>>>,
}

struct FlightGuard {
    key: String,
    registry: Arc<Mutex<HashSet<String>>>,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        if let Ok(mut set) = self.registry.lock() {
            set.remove(&self.key);
        }
    }
}

impl StatusPoller {
    pub fn new() -> Self {
        Self::default()
    }

    fn acquire(&self, resource_id: &str) -> WatsonResult<FlightGuard> {
        let mut set = self
            .in_flight
            .lock()
            .map_err(|_| WatsonError::InvalidArgument("poller registry poisoned".into()))?;
        if !set.insert(resource_id.to_string()) {
            return Err(WatsonError::InvalidArgument(format!(
                "a status poll is already in flight for resource `{resource_id}`"
            )));
        }
        Ok(FlightGuard {
            key: resource_id.to_string(),
            registry: Arc::clone(&self.in_flight),
        })
    }

    /// Poll `check` until the resource reaches a terminal state.
    pub async fn wait<T, F, Fut>(
        &self,
        resource_id: &str,
        policy: &PollPolicy,
        check: F,
    ) -> WatsonResult<PollOutcome<T>>
    where
        T: PollStatus,
        F: FnMut() -> Fut,
        Fut: Future<Output = WatsonResult<T>>,
    {
        self.wait_cancellable(resource_id, policy, CancellationToken::new(), check)
            .await
    }

    /// Poll `check` until terminal state, cancellation, or timeout.
    ///
    /// The first check is issued immediately; subsequent checks follow the
    /// policy's tick schedule. A check error propagates as-is and releases
    /// the single-flight slot.
    pub async fn wait_cancellable<T, F, Fut>(
        &self,
        resource_id: &str,
        policy: &PollPolicy,
        cancel: CancellationToken,
        mut check: F,
    ) -> WatsonResult<PollOutcome<T>>
    where
        T: PollStatus,
        F: FnMut() -> Fut,
        Fut: Future<Output = WatsonResult<T>>,
    {
        let _guard = self.acquire(resource_id)?;
        let started = Instant::now();
        let mut state = PollState::Pending;
        tracing::debug!(resource = resource_id, state = ?state, "poll started");
        let mut checks: u32 = 0;
        loop {
            if cancel.is_cancelled() {
                tracing::debug!(resource = resource_id, "poll cancelled");
                return Err(WatsonError::Cancelled);
            }
            state = PollState::Polling;
            let snapshot = check().await?;
            checks += 1;
            let status = snapshot.poll_status();
            tracing::debug!(
                resource = resource_id,
                checks,
                state = ?state,
                status = ?status,
                "status check"
            );
            match status {
                ResourceStatus::Ready => {
                    state = PollState::Terminal(TerminalState::Success);
                    tracing::debug!(resource = resource_id, state = ?state, "poll finished");
                    return Ok(PollOutcome::Succeeded(snapshot));
                }
                ResourceStatus::Failed => {
                    state = PollState::Terminal(TerminalState::Failure);
                    tracing::debug!(resource = resource_id, state = ?state, "poll finished");
                    return Ok(PollOutcome::Failed(snapshot));
                }
                ResourceStatus::Pending | ResourceStatus::Processing | ResourceStatus::Unknown => {}
            }
            let delay = policy.delay_for(checks);
            let sleep_for = match policy.timeout {
                Some(timeout) => {
                    let remaining = timeout
                        .checked_sub(started.elapsed())
                        .filter(|d| !d.is_zero())
                        .ok_or(WatsonError::TimedOut)?;
                    delay.min(remaining)
                }
                None => delay,
            };
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!(resource = resource_id, "poll cancelled");
                    return Err(WatsonError::Cancelled);
                }
                _ = sleep(sleep_for) => {}
            }
            if let Some(timeout) = policy.timeout {
                if started.elapsed() >= timeout {
                    return Err(WatsonError::TimedOut);
                }
            }
        }
    }
}
