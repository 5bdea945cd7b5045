use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::chance::{ChanceSource, Outcome};
use crate::config::ReporterConfig;
use crate::consts::{FAILURE_ERROR_CODE, SUCCESS_OUTPUT_MSG, SUCCESS_OUTPUT_STATUS, failure_cause};
use crate::error::HandlerError;
use crate::event::ChunkEvent;
use crate::orchestrator::Orchestrator;

/// Output handed to the next state when the chunk "finished".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkOutput {
    pub msg: String,
    pub status: String,
}

impl Default for ChunkOutput {
    fn default() -> Self {
        Self {
            msg: SUCCESS_OUTPUT_MSG.to_string(),
            status: SUCCESS_OUTPUT_STATUS.to_string(),
        }
    }
}

/// Simulates processing a chunk and resumes the paused step with the result.
///
/// Shared by reference across concurrent invocations; holds no mutable state.
pub struct ChunkReporter {
    orchestrator: Arc<dyn Orchestrator>,
    chance: Arc<dyn ChanceSource>,
    config: ReporterConfig,
}

impl ChunkReporter {
    pub fn new(
        orchestrator: Arc<dyn Orchestrator>,
        chance: Arc<dyn ChanceSource>,
        config: ReporterConfig,
    ) -> Self {
        Self {
            orchestrator,
            chance,
            config,
        }
    }

    /// Handle one event.
    ///
    /// The raw event is logged before validation. Exactly one callback is
    /// sent per valid event. A simulated failure is still `Ok`; only
    /// validation and callback errors are `Err`. An invalid event never
    /// reaches the random draw or the orchestrator.
    pub async fn report(&self, event: Value) -> Result<Outcome, HandlerError> {
        info!(event = %event, "received chunk event");
        let event = ChunkEvent::from_value(event)?;
        info!("simulating chunk processing and checking whether all chunks are done");

        let outcome = Outcome::decide(self.chance.draw(), self.config.success_threshold());
        let token = event.task_token.as_str();

        match outcome {
            Outcome::Succeeded { chance } => {
                info!(chance, "chunks finished ok, resuming the happy path");
                let output = serde_json::to_string(&ChunkOutput::default())?;
                self.orchestrator
                    .report_success(token, &output)
                    .await
                    .map_err(|cause| HandlerError::Callback {
                        operation: "success",
                        cause,
                    })?;
            }
            Outcome::Failed { chance } => {
                warn!(chance, "simulating a chunk processing failure");
                self.orchestrator
                    .report_failure(token, FAILURE_ERROR_CODE, &failure_cause(chance))
                    .await
                    .map_err(|cause| HandlerError::Callback {
                        operation: "failure",
                        cause,
                    })?;
            }
        }

        Ok(outcome)
    }
}
