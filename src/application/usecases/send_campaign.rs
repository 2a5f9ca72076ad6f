use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    application::services::{job_queue::JobQueue, template},
    domain::{
        errors::DomainError,
        events::MessageJob,
        models::{Campaign, CampaignStatus, OutboundMessage},
        repositories::{CampaignRepository, CustomerRepository, OutboundMessageRepository},
    },
};

/// Turns a send request into one pending message and one queued job per
/// known recipient, then flips the campaign to `sending`.
pub struct SendCampaignUseCase {
    campaign_repo: Arc<dyn CampaignRepository>,
    customer_repo: Arc<dyn CustomerRepository>,
    message_repo: Arc<dyn OutboundMessageRepository>,
    queue: Arc<dyn JobQueue>,
}

#[derive(Debug, Clone)]
pub struct SendCampaignRequest {
    pub campaign_id: Uuid,
    pub customer_ids: Vec<Uuid>,
}

#[derive(Debug, Clone)]
pub struct SendCampaignResponse {
    pub campaign_id: Uuid,
    pub queued_count: usize,
    pub status: CampaignStatus,
}

impl SendCampaignUseCase {
    pub fn new(
        campaign_repo: Arc<dyn CampaignRepository>,
        customer_repo: Arc<dyn CustomerRepository>,
        message_repo: Arc<dyn OutboundMessageRepository>,
        queue: Arc<dyn JobQueue>,
    ) -> Self {
        Self {
            campaign_repo,
            customer_repo,
            message_repo,
            queue,
        }
    }

    pub async fn execute(
        &self,
        request: SendCampaignRequest,
    ) -> Result<SendCampaignResponse, DomainError> {
        if request.customer_ids.is_empty() {
            return Err(DomainError::InvalidInput(
                "customer_ids is required and cannot be empty".to_string(),
            ));
        }

        let campaign = self
            .campaign_repo
            .get(request.campaign_id)
            .await?
            .ok_or_else(|| {
                DomainError::NotFound(format!("campaign {} not found", request.campaign_id))
            })?;

        if !campaign.can_be_sent() {
            return Err(DomainError::Conflict(format!(
                "campaign with status '{}' cannot be sent",
                campaign.status
            )));
        }

        let messages = self.build_messages(&campaign, &request.customer_ids).await?;
        if messages.is_empty() {
            return Err(DomainError::InvalidInput(
                "no valid customers found to send messages".to_string(),
            ));
        }

        if let Err(err) = self.message_repo.create_batch(&messages).await {
            error!(
                campaign_id = %campaign.id,
                error = %err,
                "failed to create outbound messages"
            );
            return Err(err.context("failed to create outbound messages").into());
        }

        let queued_count = self.enqueue_all(&messages).await;

        if let Err(err) = self
            .campaign_repo
            .update_status(campaign.id, CampaignStatus::Sending)
            .await
        {
            // Messages are already queued; the request still succeeds.
            error!(
                campaign_id = %campaign.id,
                error = %err,
                "failed to update campaign status"
            );
        }

        info!(
            campaign_id = %campaign.id,
            requested = request.customer_ids.len(),
            messages_queued = queued_count,
            "campaign sent"
        );

        Ok(SendCampaignResponse {
            campaign_id: campaign.id,
            queued_count,
            status: CampaignStatus::Sending,
        })
    }

    async fn build_messages(
        &self,
        campaign: &Campaign,
        customer_ids: &[Uuid],
    ) -> Result<Vec<OutboundMessage>, DomainError> {
        let mut messages = Vec::with_capacity(customer_ids.len());

        for &customer_id in customer_ids {
            let Some(customer) = self.customer_repo.get(customer_id).await? else {
                warn!(
                    campaign_id = %campaign.id,
                    customer_id = %customer_id,
                    "customer not found, skipping"
                );
                continue;
            };

            let content = template::render(&campaign.base_template, &customer);
            messages.push(OutboundMessage::pending(campaign.id, customer.id, content));
        }

        Ok(messages)
    }

    /// Jobs that fail to enqueue leave their message row behind in `pending`;
    /// they can be found by listing the campaign's messages.
    async fn enqueue_all(&self, messages: &[OutboundMessage]) -> usize {
        let mut queued = 0;
        for message in messages {
            match self.queue.enqueue(MessageJob::new(message.id)).await {
                Ok(()) => queued += 1,
                Err(err) => {
                    error!(
                        message_id = %message.id,
                        error = %err,
                        "failed to queue message"
                    );
                }
            }
        }
        queued
    }
}
