//! Progress notifications emitted while a suite runs.
//!
//! Events are only data, presenting them is up to the receiver. Pass a
//! sender to [`Runner::with_events`](crate::Runner::with_events) to
//! receive them, for example from a reporter thread.

use std::{num::NonZeroUsize, time::Duration};

use crate::outcome::SpecOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RunEvent {
    RunStarted {
        groups: usize,
        workers: NonZeroUsize,
    },
    GroupStarted {
        identifier: String,
    },
    SpecFinished {
        identifier: String,
        title: String,
        outcome: SpecOutcome,
    },
    GroupFinished {
        identifier: String,
        passed: bool,
        duration: Duration,
    },
    RunFinished {
        passed: bool,
        duration: Duration,
    },
}
