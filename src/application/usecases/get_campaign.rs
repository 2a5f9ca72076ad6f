use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{
    errors::DomainError, models::CampaignWithStats, repositories::CampaignRepository,
};

pub struct GetCampaignUseCase {
    repo: Arc<dyn CampaignRepository>,
}

impl GetCampaignUseCase {
    pub fn new(repo: Arc<dyn CampaignRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, campaign_id: Uuid) -> Result<CampaignWithStats, DomainError> {
        self.repo
            .get_with_stats(campaign_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("campaign {campaign_id} not found")))
    }
}
