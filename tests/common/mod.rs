#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use campaign_messaging::{
    application::{
        handlers::message_processor::{MessageProcessor, ProcessorConfig},
        services::{job_queue::JobQueue, sender::DeliverySender},
        usecases::{
            retry_message::{RetryMessageConfig, RetryMessageUseCase},
            send_campaign::SendCampaignUseCase,
        },
    },
    domain::{
        events::MessageJob,
        models::{
            Campaign, CampaignFilter, CampaignStatus, CampaignWithStats, Channel, Customer,
            MessageStatus, OutboundMessage,
        },
        repositories::{CampaignRepository, CustomerRepository, OutboundMessageRepository},
    },
    infrastructure::{
        messaging::in_memory::InMemoryJobQueue, repositories::in_memory::InMemoryStore,
    },
};

pub const MAX_RETRIES: u32 = 3;

/// Fails every delivery to the listed phone numbers, delivers the rest.
#[derive(Default)]
pub struct ScriptedSender {
    failing: HashSet<String>,
    pub attempts: AtomicUsize,
    pub delay: Duration,
}

impl ScriptedSender {
    pub fn failing_for<I: IntoIterator<Item = String>>(phones: I) -> Self {
        Self {
            failing: phones.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl DeliverySender for ScriptedSender {
    async fn send(&self, _: Channel, address: &str, _: &str) -> anyhow::Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.failing.contains(address) {
            anyhow::bail!("recipient unreachable");
        }
        Ok(())
    }
}

/// Message store whose batch insert always fails.
pub struct BrokenBatchStore(pub InMemoryStore);

#[async_trait]
impl OutboundMessageRepository for BrokenBatchStore {
    async fn create_batch(&self, _: &[OutboundMessage]) -> anyhow::Result<()> {
        anyhow::bail!("connection reset during insert")
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<OutboundMessage>> {
        OutboundMessageRepository::get(&self.0, id).await
    }

    async fn list_by_campaign(&self, campaign_id: Uuid) -> anyhow::Result<Vec<OutboundMessage>> {
        self.0.list_by_campaign(campaign_id).await
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: MessageStatus,
        last_error: Option<String>,
    ) -> anyhow::Result<()> {
        OutboundMessageRepository::update_status(&self.0, id, status, last_error).await
    }

    async fn increment_retry_count(
        &self,
        id: Uuid,
        max_retries: u32,
    ) -> anyhow::Result<Option<u32>> {
        self.0.increment_retry_count(id, max_retries).await
    }
}

/// Campaign store that reads fine but refuses every status change.
pub struct FrozenCampaignStore(pub InMemoryStore);

#[async_trait]
impl CampaignRepository for FrozenCampaignStore {
    async fn create(&self, campaign: &Campaign) -> anyhow::Result<()> {
        CampaignRepository::create(&self.0, campaign).await
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Campaign>> {
        CampaignRepository::get(&self.0, id).await
    }

    async fn get_with_stats(&self, id: Uuid) -> anyhow::Result<Option<CampaignWithStats>> {
        self.0.get_with_stats(id).await
    }

    async fn list(&self, filter: &CampaignFilter) -> anyhow::Result<(Vec<Campaign>, u64)> {
        self.0.list(filter).await
    }

    async fn update_status(&self, _: Uuid, _: CampaignStatus) -> anyhow::Result<()> {
        anyhow::bail!("statement timeout")
    }
}

/// Queue that rejects the enqueue calls whose (zero-based) index is listed.
pub struct FlakyQueue {
    pub inner: Arc<InMemoryJobQueue>,
    rejected: HashSet<usize>,
    calls: AtomicUsize,
}

impl FlakyQueue {
    pub fn rejecting(inner: Arc<InMemoryJobQueue>, rejected: &[usize]) -> Self {
        Self {
            inner,
            rejected: rejected.iter().copied().collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl JobQueue for FlakyQueue {
    async fn enqueue(&self, job: MessageJob) -> anyhow::Result<()> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.rejected.contains(&call) {
            anyhow::bail!("broker unavailable");
        }
        self.inner.enqueue(job).await
    }

    async fn dequeue(&self, timeout: Duration) -> anyhow::Result<Option<MessageJob>> {
        self.inner.dequeue(timeout).await
    }
}

pub async fn seed_campaign(store: &InMemoryStore, template: &str) -> Campaign {
    let campaign = Campaign {
        id: Uuid::new_v4(),
        name: "autumn promo".to_string(),
        channel: Channel::Sms,
        status: CampaignStatus::Draft,
        base_template: template.to_string(),
        scheduled_at: None,
        created_at: Utc::now(),
    };
    CampaignRepository::create(store, &campaign).await.unwrap();
    campaign
}

pub async fn seed_customers(store: &InMemoryStore, count: usize) -> Vec<Customer> {
    let mut customers = Vec::with_capacity(count);
    for i in 0..count {
        let customer = Customer {
            id: Uuid::new_v4(),
            phone: format!("+1555010{i:02}"),
            first_name: Some(format!("Customer{i}")),
            last_name: Some("Doe".to_string()),
            location: Some("Lisbon".to_string()),
            preferred_product: None,
            created_at: Utc::now(),
        };
        CustomerRepository::create(store, &customer).await.unwrap();
        customers.push(customer);
    }
    customers
}

/// Everything needed to push a campaign through send and dispatch in-process.
pub struct Pipeline {
    pub store: Arc<InMemoryStore>,
    pub queue: Arc<InMemoryJobQueue>,
    pub send: SendCampaignUseCase,
    pub retry: RetryMessageUseCase,
    pub processor: Arc<MessageProcessor>,
}

impl Pipeline {
    pub fn new(sender: Arc<ScriptedSender>) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let queue = Arc::new(InMemoryJobQueue::new());
        Self::with_parts(store, queue.clone(), queue, sender)
    }

    pub fn with_parts(
        store: Arc<InMemoryStore>,
        queue: Arc<InMemoryJobQueue>,
        send_queue: Arc<dyn JobQueue>,
        sender: Arc<ScriptedSender>,
    ) -> Self {
        let send = SendCampaignUseCase::new(
            store.clone(),
            store.clone(),
            store.clone(),
            send_queue,
        );
        let retry = RetryMessageUseCase::new(
            store.clone(),
            queue.clone(),
            RetryMessageConfig {
                max_retries: MAX_RETRIES,
            },
        );
        let processor = Arc::new(MessageProcessor::new(
            store.clone(),
            store.clone(),
            store.clone(),
            sender,
            ProcessorConfig {
                max_retries: MAX_RETRIES,
            },
        ));
        Self {
            store,
            queue,
            send,
            retry,
            processor,
        }
    }

    /// Processes every job currently queued, one at a time. Returns the
    /// number of jobs that ended with an error.
    pub async fn drain(&self) -> usize {
        let mut errors = 0;
        for job in self.queue.drain() {
            if self.processor.process(job).await.is_err() {
                errors += 1;
            }
        }
        errors
    }

    /// Re-enqueues every failed message of the campaign that has retries left.
    pub async fn retry_failed(&self, campaign_id: Uuid) -> usize {
        let mut retried = 0;
        for message in self.messages(campaign_id).await {
            if message.can_retry(MAX_RETRIES) {
                self.retry.execute(message.id).await.unwrap();
                retried += 1;
            }
        }
        retried
    }

    pub async fn messages(&self, campaign_id: Uuid) -> Vec<OutboundMessage> {
        self.store.list_by_campaign(campaign_id).await.unwrap()
    }

    pub async fn campaign_status(&self, campaign_id: Uuid) -> CampaignStatus {
        CampaignRepository::get(self.store.as_ref(), campaign_id)
            .await
            .unwrap()
            .unwrap()
            .status
    }
}
