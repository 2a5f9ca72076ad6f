use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Queue entry pointing at an outbound message awaiting delivery.
///
/// Everything else the processor needs is re-read from the store, so the
/// payload stays minimal and never goes stale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageJob {
    pub outbound_message_id: Uuid,
}

impl MessageJob {
    pub fn new(outbound_message_id: Uuid) -> Self {
        Self {
            outbound_message_id,
        }
    }
}
