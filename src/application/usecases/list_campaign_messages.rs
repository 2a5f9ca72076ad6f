use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{
    errors::DomainError,
    models::OutboundMessage,
    repositories::{CampaignRepository, OutboundMessageRepository},
};

pub struct ListCampaignMessagesUseCase {
    campaign_repo: Arc<dyn CampaignRepository>,
    message_repo: Arc<dyn OutboundMessageRepository>,
}

impl ListCampaignMessagesUseCase {
    pub fn new(
        campaign_repo: Arc<dyn CampaignRepository>,
        message_repo: Arc<dyn OutboundMessageRepository>,
    ) -> Self {
        Self {
            campaign_repo,
            message_repo,
        }
    }

    pub async fn execute(&self, campaign_id: Uuid) -> Result<Vec<OutboundMessage>, DomainError> {
        if self.campaign_repo.get(campaign_id).await?.is_none() {
            return Err(DomainError::NotFound(format!(
                "campaign {campaign_id} not found"
            )));
        }
        Ok(self.message_repo.list_by_campaign(campaign_id).await?)
    }
}
