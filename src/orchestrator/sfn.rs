use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_sfn::Client;
use tracing::debug;

use super::Orchestrator;

/// AWS Step Functions, via `SendTaskSuccess` / `SendTaskFailure`.
pub struct StepFunctionsOrchestrator {
    client: Client,
}

impl StepFunctionsOrchestrator {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the default credential and region chain.
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::new(Client::new(&config))
    }
}

#[async_trait]
impl Orchestrator for StepFunctionsOrchestrator {
    async fn report_success(&self, task_token: &str, output: &str) -> Result<()> {
        debug!(output, "sending SendTaskSuccess");
        self.client
            .send_task_success()
            .task_token(task_token)
            .output(output)
            .send()
            .await
            .context("SendTaskSuccess request failed")?;
        Ok(())
    }

    async fn report_failure(&self, task_token: &str, error: &str, cause: &str) -> Result<()> {
        debug!(error, cause, "sending SendTaskFailure");
        self.client
            .send_task_failure()
            .task_token(task_token)
            .error(error)
            .cause(cause)
            .send()
            .await
            .context("SendTaskFailure request failed")?;
        Ok(())
    }
}
