use std::time::Duration;

use tokio::time::Instant;
use tracing::{Instrument, debug, info_span, trace, warn};

use crate::{
    GroupView, HookKind, StageError, Suite,
    event::RunEvent,
    outcome::{GroupOutcome, SpecOutcome, SpecStatus},
    runner::{EventSink, run_hooks},
    stage::{run_stage, with_timeout},
};

/// Run the lifecycle of the group registered under `identifier`.
///
/// Returns `None` without doing anything if no such group is registered.
pub(crate) async fn run_group(
    suite: &Suite,
    identifier: &str,
    events: &EventSink,
) -> Option<GroupOutcome> {
    let Some(group) = suite.lookup(identifier) else {
        trace!(identifier, "no group registered, nothing to run");
        return None;
    };

    let span = info_span!("group", identifier);
    Some(lifecycle(group, identifier, events).instrument(span).await)
}

async fn lifecycle(group: GroupView<'_>, identifier: &str, events: &EventSink) -> GroupOutcome {
    events.send(RunEvent::GroupStarted {
        identifier: identifier.to_owned(),
    });
    let now = Instant::now();
    let hooks = group.hooks();
    let config = group.config();
    let specs = group.specs();
    debug!(specs = specs.len(), hooks = hooks.len(), ?config, "running group");

    let mut outcomes = Vec::with_capacity(specs.len());
    let result: Result<(), StageError> = async {
        run_hooks(&hooks, HookKind::BeforeAll, &config).await?;
        for spec in specs {
            run_hooks(&hooks, HookKind::BeforeEach, &config).await?;

            let started = Instant::now();
            let stage = with_timeout(&spec.body, config.timeout);
            let ran = run_stage(&stage, config.retries).await;
            let outcome = SpecOutcome {
                status: ran.as_ref().err().map_or(SpecStatus::Passed, SpecStatus::from),
                duration: started.elapsed(),
            };
            debug!(spec = %spec.title, status = ?outcome.status, "spec finished");
            events.send(RunEvent::SpecFinished {
                identifier: identifier.to_owned(),
                title: spec.title.clone(),
                outcome: outcome.clone(),
            });
            outcomes.push((spec.title.clone(), outcome));
            ran?;

            run_hooks(&hooks, HookKind::AfterEach, &config).await?;
        }
        run_hooks(&hooks, HookKind::AfterAll, &config).await
    }
    .await;

    // everything after an abort is reported as skipped
    for spec in &specs[outcomes.len()..] {
        outcomes.push((
            spec.title.clone(),
            SpecOutcome {
                status: SpecStatus::Skipped,
                duration: Duration::ZERO,
            },
        ));
    }

    if let Err(err) = &result {
        warn!(%err, "group aborted");
    }
    let duration = now.elapsed();
    events.send(RunEvent::GroupFinished {
        identifier: identifier.to_owned(),
        passed: result.is_ok(),
        duration,
    });

    GroupOutcome {
        identifier: identifier.to_owned(),
        title_path: group.title_path().into_iter().map(String::from).collect(),
        specs: outcomes,
        result,
        duration,
    }
}
