use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// There is no in-flight state: a message is either waiting for its first
/// attempt, delivered, or carries the outcome of its latest failed attempt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    Pending,
    Sent,
    Failed,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::Pending => "pending",
            MessageStatus::Sent => "sent",
            MessageStatus::Failed => "failed",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(MessageStatus::Pending),
            "sent" => Some(MessageStatus::Sent),
            "failed" => Some(MessageStatus::Failed),
            _ => None,
        }
    }
}

impl std::fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub customer_id: Uuid,
    pub status: MessageStatus,
    pub rendered_content: String,
    pub last_error: Option<String>,
    pub retry_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OutboundMessage {
    pub fn pending(campaign_id: Uuid, customer_id: Uuid, rendered_content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            campaign_id,
            customer_id,
            status: MessageStatus::Pending,
            rendered_content,
            last_error: None,
            retry_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Delivered, or failed with the retry budget used up.
    pub fn is_settled(&self, max_retries: u32) -> bool {
        match self.status {
            MessageStatus::Sent => true,
            MessageStatus::Failed => self.retry_count >= max_retries,
            MessageStatus::Pending => false,
        }
    }

    pub fn can_retry(&self, max_retries: u32) -> bool {
        self.status == MessageStatus::Failed && self.retry_count < max_retries
    }
}
