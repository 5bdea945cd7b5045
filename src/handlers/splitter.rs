use serde::{Deserialize, Serialize};
use tracing::info;

use crate::consts::SPLIT_ACK_MSG;
use crate::event::SplitEvent;

/// Fixed acknowledgement returned to the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitResponse {
    pub msg: String,
}

impl Default for SplitResponse {
    fn default() -> Self {
        Self {
            msg: SPLIT_ACK_MSG.to_string(),
        }
    }
}

/// Simulate splitting the document. The event is not inspected.
pub fn split_doc(_event: &SplitEvent) -> SplitResponse {
    info!("simulating initial processing by splitting the doc");
    SplitResponse::default()
}
