//! Error types surfaced by the handlers and their configuration.

use thiserror::Error;

/// Errors a handler invocation can return to the runtime.
///
/// A simulated chunk failure is not one of these: it is reported to the
/// orchestrator and the invocation itself completes normally.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("event must be a JSON object, got {found}")]
    InvalidEvent { found: &'static str },

    #[error("event is missing required field `taskToken`")]
    MissingTaskToken,

    #[error("`taskToken` must be a non-empty string, got {found}")]
    InvalidTaskToken { found: &'static str },

    #[error("failed to encode callback output: {0}")]
    Encode(#[from] serde_json::Error),

    /// The outbound callback failed (auth, network, unknown or expired token).
    #[error("{operation} callback failed: {cause:#}")]
    Callback {
        operation: &'static str,
        cause: anyhow::Error,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("success threshold must be a finite value in [0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("forced chance must be a finite value in [0, 1), got {0}")]
    InvalidChance(f64),
}

/// Short JSON type name for error messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
