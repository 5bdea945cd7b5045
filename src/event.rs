//! Typed handler inputs.
//!
//! The orchestrator hands each handler a JSON payload. The splitter accepts
//! anything; the reporter needs a `taskToken` and passes every other field
//! through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::consts::TASK_TOKEN_FIELD;
use crate::error::{HandlerError, json_type_name};

/// Whatever the orchestrator sent to the splitter. Never inspected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SplitEvent(pub Value);

/// Opaque identifier of a paused orchestrator step. Kept byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskToken(String);

impl TaskToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The reporter's event: the callback token plus any pass-through fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkEvent {
    pub task_token: TaskToken,
    pub extra: Map<String, Value>,
}

impl ChunkEvent {
    /// Validate a raw payload.
    ///
    /// A `null` token counts as missing; any other non-string, or an empty
    /// string, is rejected as invalid.
    pub fn from_value(value: Value) -> Result<Self, HandlerError> {
        let mut fields = match value {
            Value::Object(map) => map,
            other => {
                return Err(HandlerError::InvalidEvent {
                    found: json_type_name(&other),
                });
            }
        };

        let task_token = match fields.remove(TASK_TOKEN_FIELD) {
            None | Some(Value::Null) => return Err(HandlerError::MissingTaskToken),
            Some(Value::String(token)) if token.is_empty() => {
                return Err(HandlerError::InvalidTaskToken {
                    found: "empty string",
                });
            }
            Some(Value::String(token)) => TaskToken(token),
            Some(other) => {
                return Err(HandlerError::InvalidTaskToken {
                    found: json_type_name(&other),
                });
            }
        };

        Ok(Self {
            task_token,
            extra: fields,
        })
    }

    /// The full event as it arrived, for the diagnostic log line.
    pub fn to_json(&self) -> Value {
        let mut map = self.extra.clone();
        map.insert(
            TASK_TOKEN_FIELD.to_string(),
            Value::String(self.task_token.0.clone()),
        );
        Value::Object(map)
    }
}

impl TryFrom<Value> for ChunkEvent {
    type Error = HandlerError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}
