use std::{
    future::{self, Ready},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use crate::Body;

/// Shared, ordered log of which bodies ran.
#[derive(Debug, Default, Clone)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    /// A body that records `entry` and passes.
    pub fn step(
        &self,
        entry: &'static str,
    ) -> impl Fn() -> Ready<()> + Send + Sync + 'static {
        let journal = self.clone();
        move || {
            journal.push(entry);
            future::ready(())
        }
    }

    /// A body that records `entry` and fails with `entry` as message.
    pub fn fail(
        &self,
        entry: &'static str,
    ) -> impl Fn() -> Ready<anyhow::Result<()>> + Send + Sync + 'static {
        let journal = self.clone();
        move || {
            journal.push(entry);
            future::ready(Err(anyhow::anyhow!(entry)))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("flaky failure on call {0}")]
pub struct FlakyFailure(pub usize);

/// A body that fails a fixed number of times before passing.
#[derive(Debug, Clone)]
pub struct Flaky {
    failures: usize,
    calls: Arc<AtomicUsize>,
}

impl Flaky {
    pub fn failing_times(failures: usize) -> Self {
        Self {
            failures,
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn func(&self) -> impl Fn() -> Ready<Result<(), FlakyFailure>> + Send + Sync + 'static {
        let Self { failures, calls } = self.clone();
        move || {
            let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
            future::ready(match call <= failures {
                true => Err(FlakyFailure(call)),
                false => Ok(()),
            })
        }
    }

    pub fn body(&self) -> Body {
        Body::new(self.func())
    }
}

/// Install a fmt subscriber that writes through the test harness capture.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}
