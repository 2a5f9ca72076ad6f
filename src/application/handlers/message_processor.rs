use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::{
    application::{handlers::job_consumer::JobHandler, services::sender::DeliverySender},
    domain::{
        errors::DomainError,
        events::MessageJob,
        models::{MessageStatus, OutboundMessage},
        repositories::{CampaignRepository, CustomerRepository, OutboundMessageRepository},
    },
};

#[derive(Debug, Clone, Copy)]
pub struct ProcessorConfig {
    pub max_retries: u32,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self { max_retries: 3 }
    }
}

/// Delivers one queued message and records the outcome.
///
/// Per message: `pending -> sent`, or `pending -> failed` with the retry
/// counter bumped on every failed attempt. Reaching the retry limit makes
/// the failure permanent. Every permanent outcome triggers a recount of the
/// campaign, which settles it once nothing is pending.
pub struct MessageProcessor {
    message_repo: Arc<dyn OutboundMessageRepository>,
    campaign_repo: Arc<dyn CampaignRepository>,
    customer_repo: Arc<dyn CustomerRepository>,
    sender: Arc<dyn DeliverySender>,
    config: ProcessorConfig,
}

impl MessageProcessor {
    pub fn new(
        message_repo: Arc<dyn OutboundMessageRepository>,
        campaign_repo: Arc<dyn CampaignRepository>,
        customer_repo: Arc<dyn CustomerRepository>,
        sender: Arc<dyn DeliverySender>,
        config: ProcessorConfig,
    ) -> Self {
        Self {
            message_repo,
            campaign_repo,
            customer_repo,
            sender,
            config,
        }
    }

    /// `Ok` covers delivery, permanent failure and a message some other
    /// attempt already settled. An `Err` means the job did not reach a
    /// durable outcome: either the store let us down, a referenced record
    /// vanished, or the attempt failed with retries left.
    pub async fn process(&self, job: MessageJob) -> Result<(), DomainError> {
        let message_id = job.outbound_message_id;
        let message = self.message_repo.get(message_id).await?.ok_or_else(|| {
            error!(message_id = %message_id, "queued message not found");
            DomainError::Consistency(format!("outbound message {message_id} not found"))
        })?;

        if message.is_settled(self.config.max_retries) {
            info!(
                message_id = %message.id,
                status = %message.status,
                retry_count = message.retry_count,
                "message already settled, skipping"
            );
            return Ok(());
        }

        let campaign = self
            .campaign_repo
            .get(message.campaign_id)
            .await?
            .ok_or_else(|| {
                error!(campaign_id = %message.campaign_id, "campaign for queued message not found");
                DomainError::Consistency(format!("campaign {} not found", message.campaign_id))
            })?;

        let customer = self
            .customer_repo
            .get(message.customer_id)
            .await?
            .ok_or_else(|| {
                error!(customer_id = %message.customer_id, "customer for queued message not found");
                DomainError::Consistency(format!("customer {} not found", message.customer_id))
            })?;

        info!(
            message_id = %message.id,
            campaign_id = %campaign.id,
            channel = %campaign.channel,
            "processing message"
        );

        match self
            .sender
            .send(campaign.channel, &customer.phone, &message.rendered_content)
            .await
        {
            Ok(()) => self.handle_success(&message).await,
            Err(err) => {
                warn!(
                    message_id = %message.id,
                    retry_count = message.retry_count,
                    error = %err,
                    "message send failed"
                );
                self.handle_failure(&message, err).await
            }
        }
    }

    async fn handle_success(&self, message: &OutboundMessage) -> Result<(), DomainError> {
        self.message_repo
            .update_status(message.id, MessageStatus::Sent, None)
            .await?;

        info!(message_id = %message.id, "message sent");

        self.complete_campaign_if_settled(message.campaign_id).await;
        Ok(())
    }

    async fn handle_failure(
        &self,
        message: &OutboundMessage,
        send_err: anyhow::Error,
    ) -> Result<(), DomainError> {
        let max_retries = self.config.max_retries;
        let Some(retry_count) = self
            .message_repo
            .increment_retry_count(message.id, max_retries)
            .await?
        else {
            // a concurrent attempt used up the last retry and settled it
            info!(
                message_id = %message.id,
                max_retries,
                "message settled by another attempt, skipping"
            );
            return Ok(());
        };
        let cause = format!("{send_err:#}");

        if retry_count >= max_retries {
            error!(
                message_id = %message.id,
                retry_count,
                max_retries,
                "message permanently failed after max retries"
            );
            self.message_repo
                .update_status(
                    message.id,
                    MessageStatus::Failed,
                    Some(format!("max retries exceeded: {cause}")),
                )
                .await?;

            self.complete_campaign_if_settled(message.campaign_id).await;
            return Ok(());
        }

        info!(
            message_id = %message.id,
            retry_count,
            max_retries,
            "message failed with retries left"
        );
        self.message_repo
            .update_status(message.id, MessageStatus::Failed, Some(cause))
            .await?;

        Err(send_err
            .context(format!("send failed, retry {retry_count}/{max_retries}"))
            .into())
    }

    /// Recomputes the campaign outcome from current counts. Safe to run
    /// concurrently for the same campaign: every run reads fresh counts and
    /// the counts only move towards settled.
    async fn complete_campaign_if_settled(&self, campaign_id: Uuid) {
        let summary = match self.campaign_repo.get_with_stats(campaign_id).await {
            Ok(Some(summary)) => summary,
            Ok(None) => {
                warn!(campaign_id = %campaign_id, "campaign vanished before completion check");
                return;
            }
            Err(err) => {
                error!(
                    campaign_id = %campaign_id,
                    error = %err,
                    "failed to get campaign stats"
                );
                return;
            }
        };

        let stats = summary.stats;
        let Some(final_status) = stats.final_status() else {
            debug!(
                campaign_id = %campaign_id,
                pending = stats.pending,
                "campaign still has pending messages"
            );
            return;
        };

        if summary.campaign.status == final_status {
            return;
        }

        if let Err(err) = self
            .campaign_repo
            .update_status(campaign_id, final_status)
            .await
        {
            error!(
                campaign_id = %campaign_id,
                new_status = %final_status,
                error = %err,
                "failed to update campaign status"
            );
            return;
        }

        info!(
            campaign_id = %campaign_id,
            status = %final_status,
            total = stats.total,
            sent = stats.sent,
            failed = stats.failed,
            "campaign completed"
        );
    }
}

#[async_trait]
impl JobHandler for MessageProcessor {
    async fn handle(&self, job: MessageJob) -> Result<(), DomainError> {
        self.process(job).await
    }
}
