use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, Pool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    application::services::health::HealthProbe,
    domain::{
        errors::DomainError,
        models::{
            Campaign, CampaignFilter, CampaignStats, CampaignStatus, CampaignWithStats, Channel,
            Customer, MessageStatus, OutboundMessage,
        },
        repositories::{CampaignRepository, CustomerRepository, OutboundMessageRepository},
    },
};

pub type PgPool = Pool<Postgres>;

const UNIQUE_VIOLATION: &str = "23505";

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == UNIQUE_VIOLATION)
}

#[derive(Clone)]
pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    pub fn new(pool: PgPool) -> Arc<Self> {
        Arc::new(Self { pool })
    }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn create(&self, customer: &Customer) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO customers (
                id, phone, first_name, last_name, location, preferred_product, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(customer.id)
        .bind(&customer.phone)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.location)
        .bind(&customer.preferred_product)
        .bind(customer.created_at)
        .execute(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                DomainError::Conflict(format!(
                    "customer with phone {} already exists",
                    customer.phone
                ))
                .into()
            } else {
                anyhow::Error::from(err)
            }
        })?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Customer>> {
        let record = sqlx::query_as::<_, CustomerRecord>(
            r#"
            SELECT id, phone, first_name, last_name, location, preferred_product, created_at
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record.map(Customer::from))
    }

    async fn find_by_phone(&self, phone: &str) -> anyhow::Result<Option<Customer>> {
        let record = sqlx::query_as::<_, CustomerRecord>(
            r#"
            SELECT id, phone, first_name, last_name, location, preferred_product, created_at
            FROM customers
            WHERE phone = $1
            "#,
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record.map(Customer::from))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        // outbound_messages.customer_id cascades on delete
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(Clone)]
pub struct PostgresCampaignRepository {
    pool: PgPool,
}

impl PostgresCampaignRepository {
    pub fn new(pool: PgPool) -> Arc<Self> {
        Arc::new(Self { pool })
    }
}

#[async_trait]
impl CampaignRepository for PostgresCampaignRepository {
    async fn create(&self, campaign: &Campaign) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO campaigns (
                id, name, channel, status, base_template, scheduled_at, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(campaign.id)
        .bind(&campaign.name)
        .bind(campaign.channel.as_str())
        .bind(campaign.status.as_str())
        .bind(&campaign.base_template)
        .bind(campaign.scheduled_at)
        .bind(campaign.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Campaign>> {
        let record = sqlx::query_as::<_, CampaignRecord>(
            r#"
            SELECT id, name, channel, status, base_template, scheduled_at, created_at
            FROM campaigns
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        record.map(Campaign::try_from).transpose()
    }

    async fn get_with_stats(&self, id: Uuid) -> anyhow::Result<Option<CampaignWithStats>> {
        let Some(campaign) = CampaignRepository::get(self, id).await? else {
            return Ok(None);
        };

        let stats = sqlx::query_as::<_, StatsRecord>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE status = 'sent') AS sent,
                COUNT(*) FILTER (WHERE status = 'failed') AS failed
            FROM outbound_messages
            WHERE campaign_id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Some(CampaignWithStats {
            campaign,
            stats: stats.into(),
        }))
    }

    async fn list(&self, filter: &CampaignFilter) -> anyhow::Result<(Vec<Campaign>, u64)> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM campaigns WHERE TRUE");
        push_filter(&mut count, filter);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut select = QueryBuilder::<Postgres>::new(
            "SELECT id, name, channel, status, base_template, scheduled_at, created_at \
             FROM campaigns WHERE TRUE",
        );
        push_filter(&mut select, filter);
        select
            .push(" ORDER BY created_at DESC, id LIMIT ")
            .push_bind(i64::from(filter.page_size))
            .push(" OFFSET ")
            .push_bind(filter.offset() as i64);

        let rows = select
            .build_query_as::<CampaignRecord>()
            .fetch_all(&self.pool)
            .await?;
        let campaigns = rows
            .into_iter()
            .map(Campaign::try_from)
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok((campaigns, total.max(0) as u64))
    }

    async fn update_status(&self, id: Uuid, status: CampaignStatus) -> anyhow::Result<()> {
        let result = sqlx::query("UPDATE campaigns SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            anyhow::bail!("campaign {id} not found");
        }
        Ok(())
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &CampaignFilter) {
    if let Some(status) = filter.status {
        builder.push(" AND status = ").push_bind(status.as_str());
    }
    if let Some(channel) = filter.channel {
        builder.push(" AND channel = ").push_bind(channel.as_str());
    }
}

#[derive(Clone)]
pub struct PostgresOutboundMessageRepository {
    pool: PgPool,
}

impl PostgresOutboundMessageRepository {
    pub fn new(pool: PgPool) -> Arc<Self> {
        Arc::new(Self { pool })
    }
}

#[async_trait]
impl OutboundMessageRepository for PostgresOutboundMessageRepository {
    async fn create_batch(&self, messages: &[OutboundMessage]) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        for message in messages {
            sqlx::query(
                r#"
                INSERT INTO outbound_messages (
                    id, campaign_id, customer_id, status, rendered_content,
                    last_error, retry_count, created_at, updated_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(message.id)
            .bind(message.campaign_id)
            .bind(message.customer_id)
            .bind(message.status.as_str())
            .bind(&message.rendered_content)
            .bind(&message.last_error)
            .bind(message.retry_count as i32)
            .bind(message.created_at)
            .bind(message.updated_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<OutboundMessage>> {
        let record = sqlx::query_as::<_, OutboundMessageRecord>(
            r#"
            SELECT id, campaign_id, customer_id, status, rendered_content,
                   last_error, retry_count, created_at, updated_at
            FROM outbound_messages
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        record.map(OutboundMessage::try_from).transpose()
    }

    async fn list_by_campaign(&self, campaign_id: Uuid) -> anyhow::Result<Vec<OutboundMessage>> {
        let rows = sqlx::query_as::<_, OutboundMessageRecord>(
            r#"
            SELECT id, campaign_id, customer_id, status, rendered_content,
                   last_error, retry_count, created_at, updated_at
            FROM outbound_messages
            WHERE campaign_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(campaign_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(OutboundMessage::try_from).collect()
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: MessageStatus,
        last_error: Option<String>,
    ) -> anyhow::Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE outbound_messages
            SET status = $2, last_error = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .bind(last_error)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            anyhow::bail!("outbound message {id} not found");
        }
        Ok(())
    }

    async fn increment_retry_count(
        &self,
        id: Uuid,
        max_retries: u32,
    ) -> anyhow::Result<Option<u32>> {
        let count: Option<i32> = sqlx::query_scalar(
            r#"
            UPDATE outbound_messages
            SET retry_count = retry_count + 1, updated_at = NOW()
            WHERE id = $1 AND retry_count < $2
            RETURNING retry_count
            "#,
        )
        .bind(id)
        .bind(i64::from(max_retries))
        .fetch_optional(&self.pool)
        .await?;

        if let Some(count) = count {
            return Ok(Some(u32::try_from(count)?));
        }

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM outbound_messages WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        if !exists {
            anyhow::bail!("outbound message {id} not found");
        }
        Ok(None)
    }
}

pub struct PostgresHealthProbe {
    pool: PgPool,
}

impl PostgresHealthProbe {
    pub fn new(pool: PgPool) -> Arc<Self> {
        Arc::new(Self { pool })
    }
}

#[async_trait]
impl HealthProbe for PostgresHealthProbe {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn check(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[derive(FromRow)]
struct CustomerRecord {
    id: Uuid,
    phone: String,
    first_name: Option<String>,
    last_name: Option<String>,
    location: Option<String>,
    preferred_product: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<CustomerRecord> for Customer {
    fn from(value: CustomerRecord) -> Self {
        Self {
            id: value.id,
            phone: value.phone,
            first_name: value.first_name,
            last_name: value.last_name,
            location: value.location,
            preferred_product: value.preferred_product,
            created_at: value.created_at,
        }
    }
}

#[derive(FromRow)]
struct CampaignRecord {
    id: Uuid,
    name: String,
    channel: String,
    status: String,
    base_template: String,
    scheduled_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<CampaignRecord> for Campaign {
    type Error = anyhow::Error;

    fn try_from(value: CampaignRecord) -> Result<Self, Self::Error> {
        let channel = Channel::from_str(&value.channel)
            .ok_or_else(|| anyhow::anyhow!("unknown channel {}", value.channel))?;
        let status = CampaignStatus::from_str(&value.status)
            .ok_or_else(|| anyhow::anyhow!("unknown campaign status {}", value.status))?;
        Ok(Self {
            id: value.id,
            name: value.name,
            channel,
            status,
            base_template: value.base_template,
            scheduled_at: value.scheduled_at,
            created_at: value.created_at,
        })
    }
}

#[derive(FromRow)]
struct StatsRecord {
    total: i64,
    pending: i64,
    sent: i64,
    failed: i64,
}

impl From<StatsRecord> for CampaignStats {
    fn from(value: StatsRecord) -> Self {
        Self {
            total: value.total.max(0) as u64,
            pending: value.pending.max(0) as u64,
            sent: value.sent.max(0) as u64,
            failed: value.failed.max(0) as u64,
        }
    }
}

#[derive(FromRow)]
struct OutboundMessageRecord {
    id: Uuid,
    campaign_id: Uuid,
    customer_id: Uuid,
    status: String,
    rendered_content: String,
    last_error: Option<String>,
    retry_count: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OutboundMessageRecord> for OutboundMessage {
    type Error = anyhow::Error;

    fn try_from(value: OutboundMessageRecord) -> Result<Self, Self::Error> {
        let status = MessageStatus::from_str(&value.status)
            .ok_or_else(|| anyhow::anyhow!("unknown message status {}", value.status))?;
        Ok(Self {
            id: value.id,
            campaign_id: value.campaign_id,
            customer_id: value.customer_id,
            status,
            rendered_content: value.rendered_content,
            last_error: value.last_error,
            retry_count: u32::try_from(value.retry_count)?,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}
