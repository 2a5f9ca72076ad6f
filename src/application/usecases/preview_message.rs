use std::sync::Arc;

use uuid::Uuid;

use crate::{
    application::services::template,
    domain::{
        errors::DomainError,
        models::Customer,
        repositories::{CampaignRepository, CustomerRepository},
    },
};

/// Renders a campaign for one customer without persisting anything.
pub struct PreviewMessageUseCase {
    campaign_repo: Arc<dyn CampaignRepository>,
    customer_repo: Arc<dyn CustomerRepository>,
}

pub struct PreviewMessageRequest {
    pub campaign_id: Uuid,
    pub customer_id: Uuid,
    pub override_template: Option<String>,
}

#[derive(Debug)]
pub struct PreviewMessageResponse {
    pub rendered_message: String,
    pub used_template: String,
    pub customer: Customer,
}

impl PreviewMessageUseCase {
    pub fn new(
        campaign_repo: Arc<dyn CampaignRepository>,
        customer_repo: Arc<dyn CustomerRepository>,
    ) -> Self {
        Self {
            campaign_repo,
            customer_repo,
        }
    }

    pub async fn execute(
        &self,
        request: PreviewMessageRequest,
    ) -> Result<PreviewMessageResponse, DomainError> {
        let campaign = self
            .campaign_repo
            .get(request.campaign_id)
            .await?
            .ok_or_else(|| {
                DomainError::NotFound(format!("campaign {} not found", request.campaign_id))
            })?;

        let customer = self
            .customer_repo
            .get(request.customer_id)
            .await?
            .ok_or_else(|| {
                DomainError::NotFound(format!("customer {} not found", request.customer_id))
            })?;

        let used_template = match request.override_template {
            Some(override_template) if !override_template.is_empty() => {
                template::validate_template(&override_template)?;
                override_template
            }
            _ => campaign.base_template,
        };

        Ok(PreviewMessageResponse {
            rendered_message: template::render(&used_template, &customer),
            used_template,
            customer,
        })
    }
}
