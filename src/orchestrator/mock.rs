use anyhow::{Result, bail};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

use super::Orchestrator;

/// One callback as the orchestrator would have received it.
#[derive(Debug, Clone, PartialEq)]
pub enum Callback {
    Success {
        task_token: String,
        output: String,
    },
    Failure {
        task_token: String,
        error: String,
        cause: String,
    },
}

/// An in-memory orchestrator for tests. Records every callback in order.
#[derive(Default)]
pub struct RecordingOrchestrator {
    calls: Mutex<Vec<Callback>>,
    reject_with: Option<String>,
}

impl RecordingOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call is recorded, then fails with `message` (e.g. an expired token).
    pub fn rejecting(message: impl Into<String>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reject_with: Some(message.into()),
        }
    }

    pub fn calls(&self) -> Vec<Callback> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Callback>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, callback: Callback) -> Result<()> {
        self.lock().push(callback);
        if let Some(message) = &self.reject_with {
            bail!("{message}");
        }
        Ok(())
    }
}

#[async_trait]
impl Orchestrator for RecordingOrchestrator {
    async fn report_success(&self, task_token: &str, output: &str) -> Result<()> {
        self.record(Callback::Success {
            task_token: task_token.to_string(),
            output: output.to_string(),
        })
    }

    async fn report_failure(&self, task_token: &str, error: &str, cause: &str) -> Result<()> {
        self.record(Callback::Failure {
            task_token: task_token.to_string(),
            error: error.to_string(),
            cause: cause.to_string(),
        })
    }
}
