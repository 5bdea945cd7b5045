//! Run a single handler invocation outside the Lambda runtime.

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use serde_json::Value;
use std::path::Path;

use crate::event::SplitEvent;
use crate::handlers::{ChunkReporter, split_doc};

/// Which entry point a process serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HandlerKind {
    /// Acknowledge the document split.
    Split,
    /// Simulate chunk processing and call back the orchestrator.
    Report,
}

/// Read the event from an inline JSON string or a file. Neither means `{}`.
pub fn load_event(inline: Option<&str>, path: Option<&Path>) -> Result<Value> {
    let raw = match (inline, path) {
        (Some(_), Some(_)) => bail!("pass either an inline event or an event file, not both"),
        (Some(json), None) => json.to_string(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read event file {}", path.display()))?,
        (None, None) => return Ok(Value::Object(Default::default())),
    };
    serde_json::from_str(&raw).context("event is not valid JSON")
}

/// Run one handler and return what it would hand back, as JSON.
///
/// The reporter returns nothing to the runtime; here its outcome is
/// returned instead so the caller can see which callback was sent.
pub async fn invoke(kind: HandlerKind, event: Value, reporter: &ChunkReporter) -> Result<Value> {
    match kind {
        HandlerKind::Split => Ok(serde_json::to_value(split_doc(&SplitEvent(event)))?),
        HandlerKind::Report => {
            let outcome = reporter.report(event).await?;
            Ok(serde_json::to_value(outcome)?)
        }
    }
}
