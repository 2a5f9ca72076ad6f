use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::{
    application::services::template,
    domain::{
        errors::DomainError,
        models::{Campaign, CampaignStatus, Channel},
        repositories::CampaignRepository,
    },
};

pub struct CreateCampaignUseCase {
    repo: Arc<dyn CampaignRepository>,
}

pub struct CreateCampaignRequest {
    pub name: String,
    pub channel: Channel,
    pub base_template: String,
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl CreateCampaignUseCase {
    pub fn new(repo: Arc<dyn CampaignRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, request: CreateCampaignRequest) -> Result<Campaign, DomainError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidInput("name is required".to_string()));
        }
        template::validate_template(&request.base_template)?;

        let status = if request.scheduled_at.is_some() {
            CampaignStatus::Scheduled
        } else {
            CampaignStatus::Draft
        };

        let campaign = Campaign {
            id: Uuid::new_v4(),
            name: name.to_string(),
            channel: request.channel,
            status,
            base_template: request.base_template,
            scheduled_at: request.scheduled_at,
            created_at: Utc::now(),
        };

        self.repo.create(&campaign).await?;

        info!(
            campaign_id = %campaign.id,
            name = %campaign.name,
            status = %campaign.status,
            "campaign created"
        );

        Ok(campaign)
    }
}
