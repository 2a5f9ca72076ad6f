use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::{
    application::services::sender::DeliverySender,
    config::{Config, SenderKind},
    infrastructure::{
        messaging::jetstream::JetstreamQueue,
        repositories::postgres::PgPool,
        senders::{http_gateway::HttpGatewaySender, simulated::SimulatedSender},
    },
};

/// Connects to Postgres and applies pending migrations.
pub async fn connect_store(config: &Config) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(config.database_url()?)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!(
        max_connections = config.database_max_connections,
        "database ready"
    );
    Ok(pool)
}

pub async fn connect_queue(config: &Config) -> anyhow::Result<Arc<JetstreamQueue>> {
    Ok(Arc::new(JetstreamQueue::connect(&config.queue).await?))
}

pub fn build_sender(config: &Config) -> anyhow::Result<Arc<dyn DeliverySender>> {
    let sender: Arc<dyn DeliverySender> = match &config.sender {
        SenderKind::Simulated { success_rate } => {
            info!(success_rate, "using simulated sender");
            Arc::new(SimulatedSender::new(*success_rate))
        }
        SenderKind::Http { gateway_url } => {
            info!(gateway_url = %gateway_url, "using http gateway sender");
            Arc::new(HttpGatewaySender::new(gateway_url.clone())?)
        }
    };
    Ok(sender)
}
