use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    errors::DomainError,
    models::{
        Campaign, CampaignFilter, CampaignStats, CampaignStatus, CampaignWithStats, Customer,
        MessageStatus, OutboundMessage,
    },
    repositories::{CampaignRepository, CustomerRepository, OutboundMessageRepository},
};

#[derive(Default)]
struct State {
    customers: HashMap<Uuid, Customer>,
    campaigns: HashMap<Uuid, Campaign>,
    messages: HashMap<Uuid, OutboundMessage>,
}

impl State {
    fn stats(&self, campaign_id: Uuid) -> CampaignStats {
        let mut stats = CampaignStats::default();
        for message in self
            .messages
            .values()
            .filter(|m| m.campaign_id == campaign_id)
        {
            stats.total += 1;
            match message.status {
                MessageStatus::Pending => stats.pending += 1,
                MessageStatus::Sent => stats.sent += 1,
                MessageStatus::Failed => stats.failed += 1,
            }
        }
        stats
    }
}

/// All three repositories over one shared state, so that campaign stats and
/// customer deletion see the same messages.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryStore {
    async fn create(&self, customer: &Customer) -> anyhow::Result<()> {
        let mut state = self.state.write().await;
        if state.customers.values().any(|c| c.phone == customer.phone) {
            return Err(DomainError::Conflict(format!(
                "customer with phone {} already exists",
                customer.phone
            ))
            .into());
        }
        state.customers.insert(customer.id, customer.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Customer>> {
        let state = self.state.read().await;
        Ok(state.customers.get(&id).cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> anyhow::Result<Option<Customer>> {
        let state = self.state.read().await;
        Ok(state.customers.values().find(|c| c.phone == phone).cloned())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut state = self.state.write().await;
        if state.customers.remove(&id).is_none() {
            return Ok(false);
        }
        state.messages.retain(|_, m| m.customer_id != id);
        Ok(true)
    }
}

#[async_trait]
impl CampaignRepository for InMemoryStore {
    async fn create(&self, campaign: &Campaign) -> anyhow::Result<()> {
        let mut state = self.state.write().await;
        state.campaigns.insert(campaign.id, campaign.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Campaign>> {
        let state = self.state.read().await;
        Ok(state.campaigns.get(&id).cloned())
    }

    async fn get_with_stats(&self, id: Uuid) -> anyhow::Result<Option<CampaignWithStats>> {
        let state = self.state.read().await;
        Ok(state.campaigns.get(&id).map(|campaign| CampaignWithStats {
            campaign: campaign.clone(),
            stats: state.stats(id),
        }))
    }

    async fn list(&self, filter: &CampaignFilter) -> anyhow::Result<(Vec<Campaign>, u64)> {
        let state = self.state.read().await;
        let mut matching: Vec<Campaign> = state
            .campaigns
            .values()
            .filter(|c| filter.status.is_none_or(|s| c.status == s))
            .filter(|c| filter.channel.is_none_or(|ch| c.channel == ch))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(filter.offset() as usize)
            .take(filter.page_size as usize)
            .collect();
        Ok((page, total))
    }

    async fn update_status(&self, id: Uuid, status: CampaignStatus) -> anyhow::Result<()> {
        let mut state = self.state.write().await;
        match state.campaigns.get_mut(&id) {
            Some(campaign) => {
                campaign.status = status;
                Ok(())
            }
            None => anyhow::bail!("campaign {id} not found"),
        }
    }
}

#[async_trait]
impl OutboundMessageRepository for InMemoryStore {
    async fn create_batch(&self, messages: &[OutboundMessage]) -> anyhow::Result<()> {
        let mut state = self.state.write().await;
        for message in messages {
            if state.messages.contains_key(&message.id) {
                anyhow::bail!("outbound message {} already exists", message.id);
            }
            if !state.campaigns.contains_key(&message.campaign_id) {
                anyhow::bail!("campaign {} not found", message.campaign_id);
            }
            if !state.customers.contains_key(&message.customer_id) {
                anyhow::bail!("customer {} not found", message.customer_id);
            }
        }
        for message in messages {
            state.messages.insert(message.id, message.clone());
        }
        Ok(())
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<OutboundMessage>> {
        let state = self.state.read().await;
        Ok(state.messages.get(&id).cloned())
    }

    async fn list_by_campaign(&self, campaign_id: Uuid) -> anyhow::Result<Vec<OutboundMessage>> {
        let state = self.state.read().await;
        let mut messages: Vec<OutboundMessage> = state
            .messages
            .values()
            .filter(|m| m.campaign_id == campaign_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(messages)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: MessageStatus,
        last_error: Option<String>,
    ) -> anyhow::Result<()> {
        let mut state = self.state.write().await;
        match state.messages.get_mut(&id) {
            Some(message) => {
                message.status = status;
                message.last_error = last_error;
                message.updated_at = Utc::now();
                Ok(())
            }
            None => anyhow::bail!("outbound message {id} not found"),
        }
    }

    async fn increment_retry_count(
        &self,
        id: Uuid,
        max_retries: u32,
    ) -> anyhow::Result<Option<u32>> {
        let mut state = self.state.write().await;
        match state.messages.get_mut(&id) {
            Some(message) if message.retry_count >= max_retries => Ok(None),
            Some(message) => {
                message.retry_count += 1;
                message.updated_at = Utc::now();
                Ok(Some(message.retry_count))
            }
            None => anyhow::bail!("outbound message {id} not found"),
        }
    }
}
