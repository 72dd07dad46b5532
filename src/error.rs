use std::time::Duration;

use thiserror::Error;

/// A declaration function was called while no group was being declared.
///
/// This happens when the suite already started executing. Declaration and
/// execution are separate phases, a suite cannot grow while it runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclareError {
    #[error(
        "did not expect {operation} to be called here, no group is currently being declared \
         (declarations are closed once the suite starts running)"
    )]
    OutOfContext { operation: &'static str },
}

/// Failure of a single stage, i.e. one hook or spec body under timeout and retries.
#[derive(Debug, Error)]
pub enum StageError {
    /// The body did not settle within the resolved timeout.
    #[error("Timeout of {}ms exceeded.", .0.as_millis())]
    TimedOut(Duration),

    /// The body returned an error. The error is carried as is.
    #[error(transparent)]
    Failed(anyhow::Error),

    /// The body panicked.
    #[error("body panicked: {0}")]
    Panicked(String),

    /// The task running the body was cancelled, usually by a runtime shutdown.
    #[error("body was cancelled before it settled")]
    Cancelled,
}

impl StageError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, StageError::TimedOut(_))
    }

    /// The error returned by the body, if the body itself failed.
    pub fn body_error(&self) -> Option<&anyhow::Error> {
        match self {
            StageError::Failed(err) => Some(err),
            _ => None,
        }
    }
}
