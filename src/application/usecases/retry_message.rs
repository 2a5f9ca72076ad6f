use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::{
    application::services::job_queue::JobQueue,
    domain::{
        errors::DomainError, events::MessageJob, models::OutboundMessage,
        repositories::OutboundMessageRepository,
    },
};

pub struct RetryMessageConfig {
    pub max_retries: u32,
}

/// Puts a failed message with retries left back on the queue.
///
/// The stored status is left as is; the next processing attempt decides it.
pub struct RetryMessageUseCase {
    message_repo: Arc<dyn OutboundMessageRepository>,
    queue: Arc<dyn JobQueue>,
    config: RetryMessageConfig,
}

impl RetryMessageUseCase {
    pub fn new(
        message_repo: Arc<dyn OutboundMessageRepository>,
        queue: Arc<dyn JobQueue>,
        config: RetryMessageConfig,
    ) -> Self {
        Self {
            message_repo,
            queue,
            config,
        }
    }

    pub async fn execute(&self, message_id: Uuid) -> Result<OutboundMessage, DomainError> {
        let message = self
            .message_repo
            .get(message_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("message {message_id} not found")))?;

        if !message.can_retry(self.config.max_retries) {
            return Err(DomainError::Conflict(format!(
                "message with status '{}' and {}/{} retries cannot be retried",
                message.status, message.retry_count, self.config.max_retries
            )));
        }

        self.queue.enqueue(MessageJob::new(message.id)).await?;

        info!(
            message_id = %message.id,
            retry_count = message.retry_count,
            "message re-enqueued"
        );

        Ok(message)
    }
}
