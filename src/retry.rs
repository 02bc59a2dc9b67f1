//! Generic retry executor with exponential backoff.
//!
//! Runs a fallible async operation up to a configured number of attempts,
//! classifying each failure to decide whether another attempt can help.
//! The backoff accumulator lives inside each [`run`] call, so a policy can
//! be shared across concurrent operations without cross-call interference,
//! and every wait is cancellable through a [`CancellationToken`].

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::{ApiError, RetryError};

/// Delay before the second attempt; doubled before every attempt after.
pub const INITIAL_BACKOFF: Duration = Duration::from_secs(10);

/// Server fault codes worth retrying. The record API signals rate limiting
/// with a bare 503 instead of a status payload.
pub const DEFAULT_RETRYABLE_CODES: &[u16] = &[503];

/// How a failed attempt affects the retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// A known-transient fault; a later attempt may succeed.
    Retryable,
    /// Retrying cannot change the outcome; stop immediately.
    Terminal,
    /// Unknown failure shape; retried by default until attempts exhaust.
    Unclassified,
}

/// Attempt budget and backoff parameters for a single operation.
///
/// The delay field is only a starting value: [`run`] copies it into a
/// call-local accumulator, so the policy itself is never mutated.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the second attempt. The multiplier is fixed at 2.
    pub initial_delay: Duration,
    /// Server fault codes classified as retryable.
    pub retryable_codes: Vec<u16>,
}

impl RetryPolicy {
    /// Policy with the operator-configured attempt ceiling and the fixed
    /// internal backoff defaults.
    #[must_use]
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            initial_delay: INITIAL_BACKOFF,
            retryable_codes: DEFAULT_RETRYABLE_CODES.to_vec(),
        }
    }

    /// Override the initial backoff delay.
    #[must_use]
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Classify a failed attempt.
    ///
    /// An explicit non-success status from the API is terminal. A server
    /// fault is retryable only when its code is in the retryable set.
    /// Anything else is unclassified and consumes an attempt.
    #[must_use]
    pub fn classify(&self, error: &ApiError) -> Classification {
        match error {
            ApiError::Status { .. } => Classification::Terminal,
            ApiError::ServerFault { code, .. } => {
                if self.retryable_codes.contains(code) {
                    Classification::Retryable
                } else {
                    Classification::Terminal
                }
            }
            ApiError::Transport { .. } => Classification::Unclassified,
        }
    }
}

/// Execute `operation` under `policy`, returning the first success.
///
/// Attempt 1 runs immediately; before each later attempt the executor
/// sleeps for the current delay and then doubles it. Terminal failures
/// stop the loop at once; retryable and unclassified failures consume
/// attempts until the budget is spent, which yields
/// [`RetryError::Exhausted`] carrying the attempt count and last failure.
///
/// The executor is generic over the success type; operations that only
/// report failure use `T = ()`.
///
/// Cancelling `cancel` aborts both the backoff sleep and the in-flight
/// attempt promptly with [`RetryError::Cancelled`].
pub async fn run<T, F, Fut>(
    policy: &RetryPolicy,
    cancel: &CancellationToken,
    mut operation: F,
) -> Result<T, RetryError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut delay = policy.initial_delay;
    let mut last_error = None;

    for attempt in 1..=policy.max_attempts {
        if attempt > 1 {
            tokio::select! {
                () = cancel.cancelled() => return Err(RetryError::Cancelled),
                () = tokio::time::sleep(delay) => {}
            }
            delay = delay.saturating_mul(2);
        }

        let result = tokio::select! {
            () = cancel.cancelled() => return Err(RetryError::Cancelled),
            result = operation() => result,
        };

        match result {
            Ok(value) => return Ok(value),
            Err(error) => match policy.classify(&error) {
                Classification::Terminal => return Err(RetryError::Terminal(error)),
                Classification::Retryable | Classification::Unclassified => {
                    if attempt < policy.max_attempts {
                        log::warn!(
                            "attempt {attempt}/{} failed, retrying in {:.1}s: {error}",
                            policy.max_attempts,
                            delay.as_secs_f32()
                        );
                    }
                    last_error = Some(error);
                }
            },
        }
    }

    Err(RetryError::Exhausted {
        attempts: policy.max_attempts,
        last: last_error.unwrap_or_else(|| ApiError::Transport {
            detail: "no attempts were made".to_string(),
        }),
    })
}
