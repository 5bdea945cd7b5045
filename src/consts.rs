//! Project-wide constants.

/// Acknowledgement returned by the splitter for every event.
pub const SPLIT_ACK_MSG: &str = "OK, the doc is split; next each chunk should be processed";

/// `msg` field of the output handed to the next state on success.
pub const SUCCESS_OUTPUT_MSG: &str = "this goes to the next state";

/// `status` field of the output handed to the next state on success.
pub const SUCCESS_OUTPUT_STATUS: &str = "looking good";

/// Error code sent on simulated failure. Must match the state machine's `ErrorEquals`.
pub const FAILURE_ERROR_CODE: &str = "ProcessingFailed";

/// Failure cause prefix; the drawn chance is appended verbatim.
pub const FAILURE_CAUSE_PREFIX: &str = "Something broke in our chunk processing chance=";

/// Draws below this value report success.
pub const DEFAULT_SUCCESS_THRESHOLD: f64 = 0.7;

/// Event field carrying the callback token, as named by the state machine payload.
pub const TASK_TOKEN_FIELD: &str = "taskToken";

pub const ENV_HANDLER: &str = "CHUNKFLOW_HANDLER";
pub const ENV_LOG_FORMAT: &str = "CHUNKFLOW_LOG_FORMAT";

/// Build the failure cause for a given draw.
pub fn failure_cause(chance: f64) -> String {
    format!("{FAILURE_CAUSE_PREFIX}{chance}")
}
