//! Nested async test suites with inherited hooks, timeouts and retries.
//!
//! Specs are declared into a [`Suite`] in one synchronous pass, grouped by
//! nested [`Suite::group`] calls. Each group can carry hooks and a
//! [`Config`], both inherited by nested groups. Running the suite executes
//! every group that has at least one spec, groups concurrently, everything
//! inside a group sequentially.
//!
//! ```no_run
//! use std::time::Duration;
//! use kisuite::{Config, Suite};
//!
//! # async fn doc() -> anyhow::Result<()> {
//! let mut suite = Suite::new();
//! suite.group("connection", |t| {
//!     t.configure(Config::new().with_timeout(Duration::from_secs(2)).with_retries(3))?;
//!     t.before_each(|| async { /* connect */ })?;
//!     t.test("responds", || async { Ok::<_, std::io::Error>(()) })?;
//!     t.after_each(|| async { /* disconnect */ })
//! })?;
//! suite.run().await?;
//! # Ok(())
//! # }
//! ```
//!
//! Presentation of results is left to the caller: [`Runner::run`] returns a
//! [`RunReport`] and can stream [`event::RunEvent`]s while running.

mod body;
pub use body::*;

mod config;
pub use config::*;

mod error;
pub use error::*;

mod group;
pub use group::*;

mod suite;
pub use suite::*;

mod runner;
pub use runner::{Runner, run_hooks};

mod report;
pub use report::*;

pub mod event;
pub mod outcome;
pub mod stage;

mod panic;

#[cfg(test)]
mod test_support;
