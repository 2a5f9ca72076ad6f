use std::io::Error;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use campaign_messaging::{
    application::handlers::{
        job_consumer::{ConsumerConfig, JobConsumer},
        message_processor::{MessageProcessor, ProcessorConfig},
    },
    bootstrap,
    config::Config,
    infrastructure::repositories::postgres::{
        PostgresCampaignRepository, PostgresCustomerRepository, PostgresOutboundMessageRepository,
    },
    telemetry,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init();
    let config = Config::try_parse().map_err(Error::other)?;

    let pool = bootstrap::connect_store(&config)
        .await
        .map_err(Error::other)?;
    let queue = bootstrap::connect_queue(&config)
        .await
        .map_err(Error::other)?;
    let sender = bootstrap::build_sender(&config).map_err(Error::other)?;

    let processor = Arc::new(MessageProcessor::new(
        PostgresOutboundMessageRepository::new(pool.clone()),
        PostgresCampaignRepository::new(pool.clone()),
        PostgresCustomerRepository::new(pool),
        sender,
        ProcessorConfig {
            max_retries: config.max_retry_count,
        },
    ));

    let consumer = JobConsumer::new(
        queue,
        ConsumerConfig {
            dequeue_timeout: config.dequeue_timeout,
            ..Default::default()
        },
    );

    let cancel = CancellationToken::new();
    tokio::spawn(shutdown_on_signal(cancel.clone()));

    info!(
        concurrency = config.worker_concurrency,
        max_retries = config.max_retry_count,
        "starting campaign worker"
    );
    consumer
        .run(cancel, processor, config.worker_concurrency)
        .await;
    info!("worker stopped");
    Ok(())
}

async fn shutdown_on_signal(cancel: CancellationToken) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = terminate.recv() => {}
                }
            }
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("shutdown signal received, draining in-flight jobs");
    cancel.cancel();
}
