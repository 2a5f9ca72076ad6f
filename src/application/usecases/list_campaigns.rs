use std::sync::Arc;

use crate::domain::{
    errors::DomainError,
    models::{Campaign, CampaignFilter},
    repositories::CampaignRepository,
};

pub struct ListCampaignsUseCase {
    repo: Arc<dyn CampaignRepository>,
}

pub struct CampaignPage {
    pub campaigns: Vec<Campaign>,
    pub page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u64,
}

impl ListCampaignsUseCase {
    pub fn new(repo: Arc<dyn CampaignRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, filter: CampaignFilter) -> Result<CampaignPage, DomainError> {
        let filter = filter.normalized();
        let (campaigns, total_count) = self.repo.list(&filter).await?;

        Ok(CampaignPage {
            campaigns,
            page: filter.page,
            page_size: filter.page_size,
            total_count,
            total_pages: total_count.div_ceil(u64::from(filter.page_size)),
        })
    }
}
