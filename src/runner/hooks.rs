use tracing::warn;

use crate::{
    Config, Hook, HookKind, StageError,
    stage::{run_stage, with_timeout},
};

/// Run every hook of `kind` out of `hooks`, in order, each as its own stage.
///
/// A failing hook does not stop the hooks after it. Once all of them ran,
/// the first error is returned.
pub async fn run_hooks(hooks: &[&Hook], kind: HookKind, config: &Config) -> Result<(), StageError> {
    let mut first_error = None;
    for hook in hooks.iter().filter(|hook| hook.kind == kind) {
        let stage = with_timeout(&hook.body, config.timeout);
        if let Err(err) = run_stage(&stage, config.retries).await {
            warn!(hook = %hook.title, %err, "hook failed");
            first_error.get_or_insert(err);
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
