use std::time::Duration;

use crate::{StageError, outcome::GroupOutcome};

/// Outcomes of a whole run, groups in scheduling order.
#[derive(Debug)]
#[non_exhaustive]
pub struct RunReport {
    pub groups: Vec<GroupOutcome>,
    pub duration: Duration,
}

impl RunReport {
    pub fn passed(&self) -> bool {
        self.groups.iter().all(GroupOutcome::passed)
    }

    /// The error of the first failing group in scheduling order.
    ///
    /// Errors of later failing groups are dropped.
    pub fn into_result(self) -> Result<(), StageError> {
        self.groups
            .into_iter()
            .map(|group| group.result)
            .find(Result::is_err)
            .unwrap_or(Ok(()))
    }
}
