pub mod dry_run;
pub mod mock;
pub mod sfn;

use anyhow::Result;
use async_trait::async_trait;

/// The external workflow service that paused a step and waits for a callback.
///
/// Implementations make exactly one outbound call per method and never retry;
/// retry and timeout policy belong to the caller.
#[async_trait]
pub trait Orchestrator: Send + Sync {
    /// Resume the paused step with `output` (a JSON document).
    async fn report_success(&self, task_token: &str, output: &str) -> Result<()>;

    /// Fail the paused step. `error` must match one of the state machine's
    /// failure-routing codes.
    async fn report_failure(&self, task_token: &str, error: &str, cause: &str) -> Result<()>;
}
