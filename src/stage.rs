//! Timeboxed, retried execution of a single body.
//!
//! A stage wraps exactly one hook or spec body. [`with_timeout`] decides
//! whether a time limit applies, [`run_stage`] invokes the result until it
//! succeeds or runs out of attempts.
//!
//! Bodies run as their own tokio task. When the time limit elapses first the
//! task is detached, not aborted: it keeps running unobserved and whatever it
//! settles to is dropped.

use std::time::Duration;

use tracing::{debug, trace};

use crate::{Body, BodyResult, StageError, panic::payload_as_string};

/// A body paired with the time limit of each of its invocations.
#[derive(Debug, Clone)]
pub struct Timed {
    body: Body,
    limit: Option<Duration>,
}

/// Attach a time limit to `body`.
///
/// `None`, [`Duration::ZERO`] and [`Duration::MAX`] leave the body unbounded.
pub fn with_timeout(body: &Body, timeout: Option<Duration>) -> Timed {
    Timed {
        body: body.clone(),
        limit: timeout.filter(|t| !t.is_zero() && *t != Duration::MAX),
    }
}

impl Timed {
    pub fn limit(&self) -> Option<Duration> {
        self.limit
    }

    /// Invoke the body once.
    pub async fn call(&self) -> Result<(), StageError> {
        let task = tokio::spawn(self.body.call());
        let joined = match self.limit {
            None => task.await,
            Some(limit) => match tokio::time::timeout(limit, task).await {
                Ok(joined) => joined,
                // dropping the join handle detaches the task
                Err(_) => return Err(StageError::TimedOut(limit)),
            },
        };

        match joined {
            Ok(BodyResult(Ok(()))) => Ok(()),
            Ok(BodyResult(Err(err))) => Err(StageError::Failed(err)),
            Err(err) if err.is_panic() => Err(StageError::Panicked(payload_as_string(
                err.into_panic(),
            ))),
            Err(_) => Err(StageError::Cancelled),
        }
    }
}

/// Invoke `stage` until it succeeds, at most `retries` times.
///
/// `None` and `0` mean a single attempt. There is no delay between
/// attempts. When every attempt failed, the error of the last one is
/// returned unchanged.
pub async fn run_stage(stage: &Timed, retries: Option<u32>) -> Result<(), StageError> {
    let attempts = retries.unwrap_or(1).max(1);
    let mut attempt = 1;
    loop {
        match stage.call().await {
            Ok(()) => {
                trace!(attempt, "stage passed");
                return Ok(());
            }
            Err(err) if attempt < attempts => {
                debug!(attempt, attempts, %err, "stage failed, retrying");
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
