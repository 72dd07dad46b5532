use std::time::Duration;

use crate::StageError;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct SpecOutcome {
    pub status: SpecStatus,
    pub duration: Duration,
}

impl SpecOutcome {
    pub fn is_good(&self) -> bool {
        self.status.is_good()
    }

    pub fn is_bad(&self) -> bool {
        self.status.is_bad()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SpecStatus {
    Passed,
    Failed(String),
    TimedOut(Duration),
    /// The spec never ran because its group aborted before reaching it.
    Skipped,
    /// The spec's task was cancelled by runtime shutdown.
    Interrupted,
}

impl SpecStatus {
    pub fn is_good(&self) -> bool {
        self.passed()
    }

    pub fn is_bad(&self) -> bool {
        matches!(
            self,
            SpecStatus::Failed(_) | SpecStatus::TimedOut(_) | SpecStatus::Interrupted
        )
    }

    pub fn passed(&self) -> bool {
        matches!(self, SpecStatus::Passed)
    }

    pub fn failed(&self) -> bool {
        matches!(self, SpecStatus::Failed(_))
    }

    pub fn timed_out(&self) -> bool {
        matches!(self, SpecStatus::TimedOut(_))
    }

    pub fn skipped(&self) -> bool {
        matches!(self, SpecStatus::Skipped)
    }

    pub fn interrupted(&self) -> bool {
        matches!(self, SpecStatus::Interrupted)
    }
}

impl From<&StageError> for SpecStatus {
    fn from(err: &StageError) -> Self {
        match err {
            StageError::TimedOut(limit) => SpecStatus::TimedOut(*limit),
            StageError::Cancelled => SpecStatus::Interrupted,
            err => SpecStatus::Failed(err.to_string()),
        }
    }
}

/// Everything that happened while running one group.
#[derive(Debug)]
#[non_exhaustive]
pub struct GroupOutcome {
    pub identifier: String,
    pub title_path: Vec<String>,
    pub specs: Vec<(String, SpecOutcome)>,
    /// The first unrecovered error of the group, if any.
    pub result: Result<(), StageError>,
    pub duration: Duration,
}

impl GroupOutcome {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}
