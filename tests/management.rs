mod common;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use campaign_messaging::{
    application::{
        services::health::HealthProbe,
        usecases::{
            check_health::CheckHealthUseCase,
            create_campaign::{CreateCampaignRequest, CreateCampaignUseCase},
            create_customer::{CreateCustomerRequest, CreateCustomerUseCase},
            delete_customer::DeleteCustomerUseCase,
            get_campaign::GetCampaignUseCase,
            list_campaign_messages::ListCampaignMessagesUseCase,
            list_campaigns::ListCampaignsUseCase,
            preview_message::{PreviewMessageRequest, PreviewMessageUseCase},
            send_campaign::SendCampaignRequest,
        },
    },
    domain::{
        errors::DomainError,
        models::{CampaignFilter, CampaignStatus, Channel, Customer},
        repositories::CustomerRepository,
    },
    infrastructure::{
        messaging::in_memory::InMemoryJobQueue, repositories::in_memory::InMemoryStore,
    },
};

use common::{Pipeline, ScriptedSender, seed_campaign, seed_customers};

fn campaign_request(template: &str) -> CreateCampaignRequest {
    CreateCampaignRequest {
        name: "Winter sale".to_string(),
        channel: Channel::Chat,
        base_template: template.to_string(),
        scheduled_at: None,
    }
}

fn customer_request(phone: &str) -> CreateCustomerRequest {
    CreateCustomerRequest {
        phone: phone.to_string(),
        first_name: Some("Lin".to_string()),
        last_name: Some("   ".to_string()),
        location: None,
        preferred_product: Some("boots".to_string()),
    }
}

#[tokio::test]
async fn created_campaign_is_draft_unless_scheduled() {
    let store = Arc::new(InMemoryStore::new());
    let usecase = CreateCampaignUseCase::new(store.clone());

    let draft = usecase
        .execute(campaign_request("Hi {first_name}"))
        .await
        .unwrap();
    assert_eq!(draft.status, CampaignStatus::Draft);

    let mut request = campaign_request("Hi {first_name}");
    request.scheduled_at = Some(Utc::now());
    let scheduled = usecase.execute(request).await.unwrap();
    assert_eq!(scheduled.status, CampaignStatus::Scheduled);
}

#[tokio::test]
async fn campaign_template_is_validated() {
    let usecase = CreateCampaignUseCase::new(Arc::new(InMemoryStore::new()));

    let err = usecase
        .execute(campaign_request("Hi {nickname}"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput(ref msg) if msg.contains("nickname")));

    let err = usecase.execute(campaign_request("")).await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput(_)));

    let mut nameless = campaign_request("Hi");
    nameless.name = "  ".to_string();
    assert!(matches!(
        usecase.execute(nameless).await.unwrap_err(),
        DomainError::InvalidInput(_)
    ));
}

#[tokio::test]
async fn duplicate_phone_conflicts_and_blank_fields_are_dropped() {
    let usecase = CreateCustomerUseCase::new(Arc::new(InMemoryStore::new()));

    let customer = usecase
        .execute(customer_request("+351900000001"))
        .await
        .unwrap();
    assert_eq!(customer.last_name, None);
    assert_eq!(customer.preferred_product.as_deref(), Some("boots"));

    let err = usecase
        .execute(customer_request("+351900000001"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));

    let err = usecase.execute(customer_request(" ")).await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput(_)));
}

/// Customer store whose phone lookup never sees existing rows, as when two
/// creates race past the lookup.
struct StalePhoneLookup(InMemoryStore);

#[async_trait]
impl CustomerRepository for StalePhoneLookup {
    async fn create(&self, customer: &Customer) -> anyhow::Result<()> {
        CustomerRepository::create(&self.0, customer).await
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Customer>> {
        CustomerRepository::get(&self.0, id).await
    }

    async fn find_by_phone(&self, _: &str) -> anyhow::Result<Option<Customer>> {
        Ok(None)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        CustomerRepository::delete(&self.0, id).await
    }
}

#[tokio::test]
async fn duplicate_phone_rejected_by_store_is_a_conflict() {
    let usecase = CreateCustomerUseCase::new(Arc::new(StalePhoneLookup(InMemoryStore::new())));

    usecase
        .execute(customer_request("+351900000002"))
        .await
        .unwrap();
    let err = usecase
        .execute(customer_request("+351900000002"))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Conflict(_)), "got {err:?}");
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn preview_renders_without_persisting() {
    let pipeline = Pipeline::new(Arc::new(ScriptedSender::default()));
    let campaign = seed_campaign(&pipeline.store, "Hi {first_name} {last_name}!").await;
    let customer = seed_customers(&pipeline.store, 1).await.remove(0);
    let usecase = PreviewMessageUseCase::new(pipeline.store.clone(), pipeline.store.clone());

    let preview = usecase
        .execute(PreviewMessageRequest {
            campaign_id: campaign.id,
            customer_id: customer.id,
            override_template: None,
        })
        .await
        .unwrap();
    assert_eq!(preview.rendered_message, "Hi Customer0 Doe!");
    assert_eq!(preview.used_template, campaign.base_template);

    let preview = usecase
        .execute(PreviewMessageRequest {
            campaign_id: campaign.id,
            customer_id: customer.id,
            override_template: Some("See you in {location}".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(preview.rendered_message, "See you in Lisbon");

    let err = usecase
        .execute(PreviewMessageRequest {
            campaign_id: campaign.id,
            customer_id: customer.id,
            override_template: Some("{bogus}".to_string()),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput(_)));

    assert!(pipeline.messages(campaign.id).await.is_empty());
}

#[tokio::test]
async fn campaign_details_report_message_stats() {
    let pipeline = Pipeline::new(Arc::new(ScriptedSender::failing_for([
        "+155501001".to_string(),
    ])));
    let campaign = seed_campaign(&pipeline.store, "Hello").await;
    let ids = seed_customers(&pipeline.store, 3)
        .await
        .iter()
        .map(|c| c.id)
        .collect();
    pipeline
        .send
        .execute(SendCampaignRequest {
            campaign_id: campaign.id,
            customer_ids: ids,
        })
        .await
        .unwrap();
    pipeline.drain().await;

    let details = GetCampaignUseCase::new(pipeline.store.clone())
        .execute(campaign.id)
        .await
        .unwrap();
    assert_eq!(details.stats.total, 3);
    assert_eq!(details.stats.sent, 2);
    assert_eq!(details.stats.failed, 1);
    assert_eq!(details.stats.pending, 0);

    let err = GetCampaignUseCase::new(pipeline.store.clone())
        .execute(Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[tokio::test]
async fn listing_pages_through_campaigns() {
    let store = Arc::new(InMemoryStore::new());
    let create = CreateCampaignUseCase::new(store.clone());
    for _ in 0..5 {
        create.execute(campaign_request("Hello")).await.unwrap();
    }

    let page = ListCampaignsUseCase::new(store.clone())
        .execute(CampaignFilter {
            page: 2,
            page_size: 2,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.campaigns.len(), 2);
    assert_eq!(page.total_count, 5);
    assert_eq!(page.total_pages, 3);

    let page = ListCampaignsUseCase::new(store)
        .execute(CampaignFilter {
            status: Some(CampaignStatus::Sent),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(page.campaigns.is_empty());
    assert_eq!(page.page_size, CampaignFilter::DEFAULT_PAGE_SIZE);
}

#[tokio::test]
async fn deleting_customer_removes_their_messages() {
    let pipeline = Pipeline::new(Arc::new(ScriptedSender::default()));
    let campaign = seed_campaign(&pipeline.store, "Hello").await;
    let customers = seed_customers(&pipeline.store, 2).await;
    pipeline
        .send
        .execute(SendCampaignRequest {
            campaign_id: campaign.id,
            customer_ids: customers.iter().map(|c| c.id).collect(),
        })
        .await
        .unwrap();

    let delete = DeleteCustomerUseCase::new(pipeline.store.clone());
    delete.execute(customers[0].id).await.unwrap();

    let remaining = ListCampaignMessagesUseCase::new(pipeline.store.clone(), pipeline.store.clone())
        .execute(campaign.id)
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].customer_id, customers[1].id);

    assert!(matches!(
        delete.execute(customers[0].id).await.unwrap_err(),
        DomainError::NotFound(_)
    ));
}

struct DownProbe;

#[async_trait]
impl HealthProbe for DownProbe {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn check(&self) -> anyhow::Result<()> {
        anyhow::bail!("connection refused")
    }
}

#[tokio::test]
async fn health_is_unhealthy_when_any_probe_fails() {
    let queue: Arc<dyn HealthProbe> = Arc::new(InMemoryJobQueue::new());

    let report = CheckHealthUseCase::new(vec![queue.clone()]).execute().await;
    assert!(report.healthy);

    let database: Arc<dyn HealthProbe> = Arc::new(DownProbe);
    let report = CheckHealthUseCase::new(vec![database, queue])
        .execute()
        .await;
    assert!(!report.healthy);
    assert_eq!(report.services, vec![("database", false), ("queue", true)]);
}

#[tokio::test]
async fn retrying_unknown_message_is_not_found() {
    let pipeline = Pipeline::new(Arc::new(ScriptedSender::default()));
    let err = pipeline.retry.execute(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}
