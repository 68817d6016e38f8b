//! Bounded server-side polling of a run or submission

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::debug;
use uuid::Uuid;

use crate::{
    config::JudgeConfig,
    error::AppResult,
    services::orchestrator::{CheckOutcome, SubmissionOrchestrator},
};

/// How often and for how long to poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_duration: Duration,
}

impl From<&JudgeConfig> for PollPolicy {
    fn from(config: &JudgeConfig) -> Self {
        Self {
            interval: Duration::from_millis(config.poll_interval_ms),
            max_duration: Duration::from_secs(config.max_poll_seconds),
        }
    }
}

/// Result of a bounded poll
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// The judge reached a terminal state
    Settled(CheckOutcome),
    /// Budget exhausted; carries the last observed outcome
    GaveUp(CheckOutcome),
}

impl PollOutcome {
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Settled(_))
    }

    pub fn into_inner(self) -> CheckOutcome {
        match self {
            Self::Settled(outcome) | Self::GaveUp(outcome) => outcome,
        }
    }
}

/// Check repeatedly until the run settles or the budget runs out.
///
/// Spawns nothing: dropping the returned future stops polling. Errors from
/// any individual check end the poll immediately.
pub async fn poll_until_settled(
    orchestrator: &SubmissionOrchestrator,
    user_id: Uuid,
    run_id: &str,
    is_test: bool,
    policy: PollPolicy,
) -> AppResult<PollOutcome> {
    let deadline = Instant::now() + policy.max_duration;
    let mut polls = 0u32;

    loop {
        let outcome = orchestrator.check(user_id, run_id, is_test).await?;
        polls += 1;

        if outcome.is_settled() {
            debug!(run_id, polls, "Run settled");
            return Ok(PollOutcome::Settled(outcome));
        }
        if Instant::now() + policy.interval > deadline {
            debug!(run_id, polls, state = %outcome.result.state, "Giving up on run");
            return Ok(PollOutcome::GaveUp(outcome));
        }

        sleep(policy.interval).await;
    }
}
