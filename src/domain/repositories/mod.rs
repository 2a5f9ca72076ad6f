use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::{
    Campaign, CampaignFilter, CampaignStatus, CampaignWithStats, Customer, MessageStatus,
    OutboundMessage,
};

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn create(&self, customer: &Customer) -> anyhow::Result<()>;
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Customer>>;
    async fn find_by_phone(&self, phone: &str) -> anyhow::Result<Option<Customer>>;
    /// Removes the customer together with its outbound messages.
    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait CampaignRepository: Send + Sync {
    async fn create(&self, campaign: &Campaign) -> anyhow::Result<()>;
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Campaign>>;
    async fn get_with_stats(&self, id: Uuid) -> anyhow::Result<Option<CampaignWithStats>>;
    async fn list(&self, filter: &CampaignFilter) -> anyhow::Result<(Vec<Campaign>, u64)>;
    async fn update_status(&self, id: Uuid, status: CampaignStatus) -> anyhow::Result<()>;
}

#[async_trait]
pub trait OutboundMessageRepository: Send + Sync {
    /// Inserts every message or none of them.
    async fn create_batch(&self, messages: &[OutboundMessage]) -> anyhow::Result<()>;

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<OutboundMessage>>;

    async fn list_by_campaign(&self, campaign_id: Uuid) -> anyhow::Result<Vec<OutboundMessage>>;

    async fn update_status(
        &self,
        id: Uuid,
        status: MessageStatus,
        last_error: Option<String>,
    ) -> anyhow::Result<()>;

    /// Bumps the retry counter by one unless it already reached
    /// `max_retries`, and returns the stored value. `None` means the counter
    /// was already at the limit and nothing changed.
    async fn increment_retry_count(
        &self,
        id: Uuid,
        max_retries: u32,
    ) -> anyhow::Result<Option<u32>>;
}
