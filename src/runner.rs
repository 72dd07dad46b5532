//! Group execution and scheduling.
//!
//! The [`Runner`] drives every registered group of a [`Suite`] through its
//! lifecycle:
//!
//! 1. all `beforeAll` hooks
//! 2. per spec: all `beforeEach` hooks, the spec body, all `afterEach` hooks
//! 3. all `afterAll` hooks
//!
//! Hooks and spec bodies each run as a stage (see [`crate::stage`]) under the
//! group's resolved config. An unrecovered failure aborts the rest of its
//! group, `afterAll` included, but never touches other groups.
//!
//! Groups run concurrently with each other, at most
//! [`worker_count`](Runner::worker_count) at a time. Inside a group,
//! everything runs strictly one after another.

use std::{cmp, num::NonZeroUsize};

use futures::{FutureExt, StreamExt, stream};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::{Suite, event::RunEvent, report::RunReport};

mod group;
pub(crate) use group::*;

mod hooks;
pub use hooks::*;

/// Optional destination of [`RunEvent`]s.
#[derive(Debug, Default, Clone)]
pub(crate) struct EventSink(Option<crossbeam_channel::Sender<RunEvent>>);

impl EventSink {
    pub(crate) fn send(&self, event: RunEvent) {
        if let Some(tx) = &self.0 {
            // If the receiver dropped, nobody listens anymore, drop silently.
            let _ = tx.send(event);
        }
    }
}

#[derive(Debug, Clone)]
pub struct Runner {
    concurrency: NonZeroUsize,
    events: EventSink,
}

impl Default for Runner {
    fn default() -> Self {
        Self {
            concurrency: std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
            events: EventSink::default(),
        }
    }
}

impl Runner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit how many groups may run at the same time.
    pub fn with_concurrency(self, concurrency: NonZeroUsize) -> Self {
        Self {
            concurrency,
            ..self
        }
    }

    /// Send progress events to `events`.
    ///
    /// Events are sent from the task driving the run. Use an unbounded
    /// channel, a full bounded channel blocks the run until it drains.
    pub fn with_events(self, events: crossbeam_channel::Sender<RunEvent>) -> Self {
        Self {
            events: EventSink(Some(events)),
            ..self
        }
    }

    /// Number of groups this runner keeps in flight for `group_count` groups.
    pub fn worker_count(&self, group_count: usize) -> NonZeroUsize {
        NonZeroUsize::new(cmp::min(self.concurrency.get(), group_count))
            .unwrap_or(NonZeroUsize::MIN)
    }

    /// Run every registered group of `suite`.
    ///
    /// Declarations on `suite` are closed from here on. Every group runs to
    /// completion, whether other groups fail or not.
    ///
    /// Bodies are spawned as tokio tasks, so this must be awaited inside a
    /// Tokio runtime. Awaiting it on another executor panics.
    pub async fn run(&self, suite: &mut Suite) -> RunReport {
        suite.close_declarations();
        let suite = &*suite;

        let now = Instant::now();
        let identifiers: Vec<&str> = suite.identifiers().collect();
        let workers = self.worker_count(identifiers.len());
        debug!(groups = identifiers.len(), workers = workers.get(), "starting run");
        self.events.send(RunEvent::RunStarted {
            groups: identifiers.len(),
            workers,
        });

        // A freed slot picks up the next group right away, the report is put
        // back into scheduling order afterwards.
        let mut finished: Vec<_> = stream::iter(identifiers.into_iter().enumerate())
            .map(|(idx, identifier)| {
                run_group(suite, identifier, &self.events).map(move |outcome| (idx, outcome))
            })
            .buffer_unordered(workers.get())
            .collect()
            .await;
        finished.sort_by_key(|(idx, _)| *idx);
        let groups = finished
            .into_iter()
            .filter_map(|(_, outcome)| outcome)
            .collect();

        let report = RunReport {
            groups,
            duration: now.elapsed(),
        };
        let passed = report.passed();
        if !passed {
            let failed = report.groups.iter().filter(|g| !g.passed()).count();
            warn!(failed, "run finished with failing groups");
        }
        self.events.send(RunEvent::RunFinished {
            passed,
            duration: report.duration,
        });
        report
    }
}
