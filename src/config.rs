use std::time::Duration;

/// Timeout and retry settings of a group.
///
/// Both fields are independently optional. A group's explicit config only
/// holds what was configured on that group, the effective values are
/// resolved through its ancestors (see [`GroupView::config`](crate::GroupView::config)).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// Time a single attempt of a body may take.
    ///
    /// `None`, [`Duration::ZERO`] and [`Duration::MAX`] disable enforcement.
    pub timeout: Option<Duration>,

    /// Number of attempts a body gets before its failure is final.
    ///
    /// `None` and `0` behave like `1`.
    pub retries: Option<u32>,
}

impl Config {
    pub const fn new() -> Self {
        Self {
            timeout: None,
            retries: None,
        }
    }

    pub const fn with_timeout(self, timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..self
        }
    }

    pub const fn with_retries(self, retries: u32) -> Self {
        Self {
            retries: Some(retries),
            ..self
        }
    }

    /// Overwrite every field that is set in `other`.
    pub(crate) fn apply(&mut self, other: Config) {
        if other.timeout.is_some() {
            self.timeout = other.timeout;
        }
        if other.retries.is_some() {
            self.retries = other.retries;
        }
    }

    /// Fill the fields of `self` that are unset or zero from `inherited`.
    ///
    /// Zero counts as unset, an explicit zero on a group therefore yields
    /// to whatever an ancestor configured.
    pub(crate) fn inherit(self, inherited: Config) -> Config {
        Config {
            timeout: self.timeout.filter(|t| !t.is_zero()).or(inherited.timeout),
            retries: self.retries.filter(|r| *r != 0).or(inherited.retries),
        }
    }
}
