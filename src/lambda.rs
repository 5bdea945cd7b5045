//! Lambda runtime adapter.
//!
//! One process serves one handler. Errors are returned to the runtime, which
//! marks the invocation failed and applies its own retry policy.

use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde_json::Value;
use tracing::Instrument;

use crate::event::SplitEvent;
use crate::handlers::{ChunkReporter, SplitResponse, split_doc};

pub async fn handle_split(event: LambdaEvent<SplitEvent>) -> Result<SplitResponse, Error> {
    let span = tracing::info_span!("split_doc", request_id = %event.context.request_id);
    let response = async { split_doc(&event.payload) }.instrument(span).await;
    Ok(response)
}

pub async fn handle_report(reporter: &ChunkReporter, event: LambdaEvent<Value>) -> Result<(), Error> {
    let span = tracing::info_span!("process_and_check_completion", request_id = %event.context.request_id);
    reporter.report(event.payload).instrument(span).await?;
    Ok(())
}

/// Serve the splitter until the runtime shuts the process down.
pub async fn run_splitter() -> Result<(), Error> {
    run(service_fn(handle_split)).await
}

/// Serve the reporter until the runtime shuts the process down.
pub async fn run_reporter(reporter: ChunkReporter) -> Result<(), Error> {
    let reporter = &reporter;
    run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_report(reporter, event).await
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chance::FixedChance;
    use crate::config::ReporterConfig;
    use crate::orchestrator::mock::RecordingOrchestrator;
    use lambda_runtime::Context;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn split_returns_ack() {
        let event = LambdaEvent::new(SplitEvent(json!({})), Context::default());
        let response = handle_split(event).await.unwrap();
        assert_eq!(response, SplitResponse::default());
    }

    #[tokio::test]
    async fn report_surfaces_missing_token_to_runtime() {
        let orchestrator = Arc::new(RecordingOrchestrator::new());
        let reporter = ChunkReporter::new(
            orchestrator.clone(),
            Arc::new(FixedChance(0.1)),
            ReporterConfig::default(),
        );
        let event = LambdaEvent::new(json!({}), Context::default());

        let err = handle_report(&reporter, event).await.unwrap_err();
        assert!(err.to_string().contains("taskToken"));
        assert!(orchestrator.calls().is_empty());
    }

    #[tokio::test]
    async fn report_returns_unit_on_simulated_failure() {
        let orchestrator = Arc::new(RecordingOrchestrator::new());
        let reporter = ChunkReporter::new(
            orchestrator.clone(),
            Arc::new(FixedChance(0.95)),
            ReporterConfig::default(),
        );
        let event = LambdaEvent::new(json!({"taskToken": "abc123"}), Context::default());

        handle_report(&reporter, event).await.unwrap();
        assert_eq!(orchestrator.calls().len(), 1);
    }
}
