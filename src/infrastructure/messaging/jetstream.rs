use std::time::Duration;

use async_nats::jetstream::{
    self,
    consumer::{AckPolicy, PullConsumer, pull},
};
use async_trait::async_trait;
use tokio_stream::StreamExt;

use crate::{
    application::services::{health::HealthProbe, job_queue::JobQueue},
    domain::events::MessageJob,
};

#[derive(Clone, Debug)]
pub struct JetstreamConfig {
    pub url: String,
    pub stream: String,
    pub subject: String,
    pub durable: String,
}

/// Job queue backed by a JetStream work stream and one durable pull consumer.
pub struct JetstreamQueue {
    client: async_nats::Client,
    context: jetstream::Context,
    consumer: PullConsumer,
    subject: String,
}

impl JetstreamQueue {
    pub async fn connect(config: &JetstreamConfig) -> anyhow::Result<Self> {
        let client = async_nats::connect(&config.url).await?;
        let context = jetstream::new(client.clone());

        let stream = context
            .get_or_create_stream(jetstream::stream::Config {
                name: config.stream.clone(),
                subjects: vec![config.subject.clone()],
                retention: jetstream::stream::RetentionPolicy::WorkQueue,
                ..Default::default()
            })
            .await?;

        let consumer = stream
            .get_or_create_consumer(
                &config.durable,
                pull::Config {
                    durable_name: Some(config.durable.clone()),
                    ack_policy: AckPolicy::Explicit,
                    ..Default::default()
                },
            )
            .await?;

        tracing::info!(
            stream = %config.stream,
            subject = %config.subject,
            durable = %config.durable,
            "connected to jetstream"
        );

        Ok(Self {
            client,
            context,
            consumer,
            subject: config.subject.clone(),
        })
    }
}

#[async_trait]
impl JobQueue for JetstreamQueue {
    async fn enqueue(&self, job: MessageJob) -> anyhow::Result<()> {
        let payload = serde_json::to_vec(&job)?;
        self.context
            .publish(self.subject.clone(), payload.into())
            .await?
            .await?;
        Ok(())
    }

    async fn dequeue(&self, timeout: Duration) -> anyhow::Result<Option<MessageJob>> {
        let mut batch = self
            .consumer
            .batch()
            .max_messages(1)
            .expires(timeout)
            .messages()
            .await
            .map_err(|e| anyhow::anyhow!("failed to fetch job: {}", e))?;

        let Some(message) = batch.next().await else {
            return Ok(None);
        };
        let message = message.map_err(|e| anyhow::anyhow!("failed to receive job: {}", e))?;

        // Acked before decoding: a dequeued job is never redelivered.
        message
            .ack()
            .await
            .map_err(|e| anyhow::anyhow!("failed to ack job: {}", e))?;

        match serde_json::from_slice::<MessageJob>(&message.payload) {
            Ok(job) => Ok(Some(job)),
            Err(err) => {
                tracing::warn!(error = %err, "discarding undecodable job payload");
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl HealthProbe for JetstreamQueue {
    fn name(&self) -> &'static str {
        "queue"
    }

    async fn check(&self) -> anyhow::Result<()> {
        self.client.flush().await?;
        Ok(())
    }
}
