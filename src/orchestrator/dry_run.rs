use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use super::Orchestrator;

/// Logs the callback instead of sending it. For local invocations.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunOrchestrator;

#[async_trait]
impl Orchestrator for DryRunOrchestrator {
    async fn report_success(&self, task_token: &str, output: &str) -> Result<()> {
        info!(task_token, output, "dry run: would send task success");
        Ok(())
    }

    async fn report_failure(&self, task_token: &str, error: &str, cause: &str) -> Result<()> {
        info!(task_token, error, cause, "dry run: would send task failure");
        Ok(())
    }
}
