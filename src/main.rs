use std::io::Error;
use std::sync::Arc;
use std::time::Duration;

use poem::{Route, Server, listener::TcpListener};
use poem_openapi::OpenApiService;
use tokio::main;
use tracing::info;

use campaign_messaging::{
    application::{
        services::health::HealthProbe,
        usecases::{
            check_health::CheckHealthUseCase, create_campaign::CreateCampaignUseCase,
            create_customer::CreateCustomerUseCase, delete_customer::DeleteCustomerUseCase,
            get_campaign::GetCampaignUseCase, get_customer::GetCustomerUseCase,
            list_campaign_messages::ListCampaignMessagesUseCase,
            list_campaigns::ListCampaignsUseCase, preview_message::PreviewMessageUseCase,
            retry_message::{RetryMessageConfig, RetryMessageUseCase},
            send_campaign::SendCampaignUseCase,
        },
    },
    bootstrap,
    config::Config,
    infrastructure::repositories::postgres::{
        PostgresCampaignRepository, PostgresCustomerRepository, PostgresHealthProbe,
        PostgresOutboundMessageRepository,
    },
    presentation::http::endpoints::root::{ApiState, endpoints},
    telemetry,
};

#[main]
async fn main() -> Result<(), Error> {
    telemetry::init();
    let config = Config::try_parse().map_err(Error::other)?;

    let pool = bootstrap::connect_store(&config)
        .await
        .map_err(Error::other)?;
    let queue = bootstrap::connect_queue(&config)
        .await
        .map_err(Error::other)?;

    let campaign_repo = PostgresCampaignRepository::new(pool.clone());
    let customer_repo = PostgresCustomerRepository::new(pool.clone());
    let message_repo = PostgresOutboundMessageRepository::new(pool.clone());
    let probes: Vec<Arc<dyn HealthProbe>> = vec![
        PostgresHealthProbe::new(pool) as Arc<dyn HealthProbe>,
        queue.clone() as Arc<dyn HealthProbe>,
    ];

    let state = Arc::new(ApiState {
        create_campaign_usecase: Arc::new(CreateCampaignUseCase::new(campaign_repo.clone())),
        get_campaign_usecase: Arc::new(GetCampaignUseCase::new(campaign_repo.clone())),
        list_campaigns_usecase: Arc::new(ListCampaignsUseCase::new(campaign_repo.clone())),
        send_campaign_usecase: Arc::new(SendCampaignUseCase::new(
            campaign_repo.clone(),
            customer_repo.clone(),
            message_repo.clone(),
            queue.clone(),
        )),
        preview_message_usecase: Arc::new(PreviewMessageUseCase::new(
            campaign_repo.clone(),
            customer_repo.clone(),
        )),
        list_campaign_messages_usecase: Arc::new(ListCampaignMessagesUseCase::new(
            campaign_repo,
            message_repo.clone(),
        )),
        create_customer_usecase: Arc::new(CreateCustomerUseCase::new(customer_repo.clone())),
        get_customer_usecase: Arc::new(GetCustomerUseCase::new(customer_repo.clone())),
        delete_customer_usecase: Arc::new(DeleteCustomerUseCase::new(customer_repo)),
        retry_message_usecase: Arc::new(RetryMessageUseCase::new(
            message_repo,
            queue,
            RetryMessageConfig {
                max_retries: config.max_retry_count,
            },
        )),
        check_health_usecase: Arc::new(CheckHealthUseCase::new(probes)),
    });

    let server_url = config.server_url();
    info!(url = %server_url, "starting campaign api");

    let api_service = OpenApiService::new(endpoints(state), "Campaign Messaging API", "0.1.0")
        .server(format!("{}/api", server_url));
    let ui = api_service.swagger_ui();
    let app = Route::new().nest("/api", api_service).nest("/", ui);

    Server::new(TcpListener::bind(format!("{}:{}", config.host, config.port)))
        .run_with_graceful_shutdown(
            app,
            async {
                let _ = tokio::signal::ctrl_c().await;
                info!("shutdown signal received");
            },
            Some(Duration::from_secs(10)),
        )
        .await
}
