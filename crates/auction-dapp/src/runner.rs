//! The polling loop.
//!
//! Each `finish` call both reports the previous request's status and
//! fetches the next request, so the loop is:
//!
//! ```text
//! status = accept
//! loop {
//!     finish(status) -> request | none pending | malformed | error
//!     status = handle(request)
//! }
//! ```
//!
//! - "none pending" is normal; the same status is sent again.
//! - Transient transport errors keep the pending status and retry with
//!   exponential backoff.
//! - Terminal transport errors end the loop.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, error, warn};

use auction_core::Status;

use crate::coordinator::{Coordinator, FinishResponse};
use crate::dispatch::Dispatcher;
use crate::error::DappError;

/// Timing of idle polls and transient-failure retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Pause after a "none pending" answer.
    pub idle_delay: Duration,

    /// Delay after the first transient failure; doubles per attempt.
    pub backoff_base: Duration,

    /// Upper bound on any single backoff.
    pub backoff_max: Duration,

    /// Consecutive transient failures tolerated; `0` retries forever.
    pub max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            idle_delay: Duration::ZERO,
            backoff_base: Duration::from_millis(500),
            backoff_max: Duration::from_secs(16),
            max_retries: 0,
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(5);
        self.backoff_base
            .saturating_mul(1u32 << exponent)
            .min(self.backoff_max)
    }

    fn exhausted(&self, failures: u32) -> bool {
        self.max_retries > 0 && failures > self.max_retries
    }
}

/// Counters kept across the life of the loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub accepted: u64,
    pub rejected: u64,
    pub idle_polls: u64,
    pub transient_failures: u64,
}

impl RunStats {
    pub fn processed(&self) -> u64 {
        self.accepted + self.rejected
    }

    fn record(&mut self, status: Status) {
        match status {
            Status::Accept => self.accepted += 1,
            Status::Reject => self.rejected += 1,
        }
    }
}

/// Drives a [`Dispatcher`] from a [`Coordinator`].
#[derive(Debug)]
pub struct Runner<C> {
    coordinator: C,
    dispatcher: Dispatcher,
    policy: RetryPolicy,
    stats: RunStats,
}

impl<C: Coordinator> Runner<C> {
    pub fn new(coordinator: C, dispatcher: Dispatcher, policy: RetryPolicy) -> Self {
        Runner {
            coordinator,
            dispatcher,
            policy,
            stats: RunStats::default(),
        }
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn coordinator(&self) -> &C {
        &self.coordinator
    }

    /// Poll until the coordinator fails terminally or retries run out.
    pub async fn run(&mut self) -> Result<(), DappError> {
        let mut status = Status::Accept;
        let mut failures: u32 = 0;

        loop {
            match self.coordinator.finish(status).await {
                Ok(response) => {
                    failures = 0;
                    match response {
                        FinishResponse::Request(request) => {
                            debug!(request_type = request.kind(), "processing request");
                            status = self.dispatcher.handle(request, &mut self.coordinator).await;
                            self.stats.record(status);
                        }
                        FinishResponse::NoPending => {
                            debug!("no pending request, trying again");
                            self.stats.idle_polls += 1;
                            if !self.policy.idle_delay.is_zero() {
                                sleep(self.policy.idle_delay).await;
                            }
                        }
                        FinishResponse::Malformed(reason) => {
                            warn!(%reason, "malformed request from coordinator, rejecting");
                            status = Status::Reject;
                            self.stats.record(status);
                        }
                    }
                }
                Err(err) if err.is_transient() => {
                    failures += 1;
                    self.stats.transient_failures += 1;

                    if self.policy.exhausted(failures) {
                        return Err(DappError::RetriesExhausted {
                            attempts: failures,
                            source: err,
                        });
                    }

                    let delay = self.policy.backoff(failures);
                    error!(error = %err, attempt = failures, ?delay, "coordinator call failed, backing off");
                    sleep(delay).await;
                }
                Err(err) => {
                    error!(error = %err, "coordinator call failed, stopping");
                    return Err(DappError::Coordinator(err));
                }
            }
        }
    }
}
