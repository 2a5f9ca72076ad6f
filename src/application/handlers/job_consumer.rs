use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::{
    application::services::job_queue::JobQueue,
    domain::{errors::DomainError, events::MessageJob},
};

/// Upper bound on concurrently running handlers, whatever is configured.
/// Each handler holds store connections while it runs.
pub const MAX_CONCURRENCY: usize = 5;

#[async_trait]
pub trait JobHandler: Send + Sync + 'static {
    async fn handle(&self, job: MessageJob) -> Result<(), DomainError>;
}

#[derive(Debug, Clone)]
pub struct ConsumerConfig {
    pub dequeue_timeout: Duration,
    /// Pause after a failed dequeue before polling again.
    pub error_backoff: Duration,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            dequeue_timeout: Duration::from_secs(1),
            error_backoff: Duration::from_secs(1),
        }
    }
}

/// Pulls jobs off a [`JobQueue`] and runs them on a bounded set of tasks.
pub struct JobConsumer {
    queue: Arc<dyn JobQueue>,
    config: ConsumerConfig,
}

pub fn clamp_concurrency(requested: usize) -> usize {
    requested.clamp(1, MAX_CONCURRENCY)
}

impl JobConsumer {
    pub fn new(queue: Arc<dyn JobQueue>, config: ConsumerConfig) -> Self {
        Self { queue, config }
    }

    /// Runs until `cancel` fires, then waits for every dispatched job to
    /// finish before returning.
    ///
    /// The dequeue loop itself is sequential; only handlers run in parallel,
    /// at most `concurrency` (clamped to [`MAX_CONCURRENCY`]) at a time. A
    /// failing handler is logged and never stops the loop.
    pub async fn run(
        &self,
        cancel: CancellationToken,
        handler: Arc<dyn JobHandler>,
        concurrency: usize,
    ) {
        let limit = clamp_concurrency(concurrency);
        if limit != concurrency {
            warn!(requested = concurrency, limit, "worker concurrency clamped");
        }
        let slots = Arc::new(Semaphore::new(limit));

        info!(concurrency = limit, "starting job consumer");

        while !cancel.is_cancelled() {
            let job = match self.queue.dequeue(self.config.dequeue_timeout).await {
                Ok(Some(job)) => job,
                Ok(None) => continue,
                Err(err) => {
                    error!(error = %err, "failed to dequeue job");
                    tokio::select! {
                        _ = cancel.cancelled() => {}
                        _ = tokio::time::sleep(self.config.error_backoff) => {}
                    }
                    continue;
                }
            };

            debug!(message_id = %job.outbound_message_id, "job received from queue");

            // The job has already left the queue, so it is dispatched even if
            // cancellation arrives while waiting for a slot.
            let Ok(permit) = slots.clone().acquire_owned().await else {
                break;
            };

            let handler = handler.clone();
            tokio::spawn(async move {
                let _permit = permit;
                if let Err(err) = handler.handle(job).await {
                    if err.is_retryable() {
                        warn!(
                            message_id = %job.outbound_message_id,
                            error = %format!("{err:#}"),
                            "job did not complete"
                        );
                    } else {
                        error!(
                            message_id = %job.outbound_message_id,
                            error = %err,
                            "handler failed to process job"
                        );
                    }
                }
            });
        }

        info!("consumer stopped, waiting for in-flight jobs to complete");
        // Every slot back in hand means every dispatched job has finished.
        let _drained = slots.acquire_many(limit as u32).await;
        info!("all in-flight jobs completed");
    }
}
