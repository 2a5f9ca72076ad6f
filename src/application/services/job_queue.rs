use std::time::Duration;

use async_trait::async_trait;

use crate::domain::events::MessageJob;

/// FIFO hand-off between the send path and the dispatch workers.
///
/// A dequeued job is gone for good: there is no redelivery, whatever the
/// processing outcome turns out to be.
#[async_trait]
pub trait JobQueue: Send + Sync {
    async fn enqueue(&self, job: MessageJob) -> anyhow::Result<()>;

    /// Waits up to `timeout` for a job. `Ok(None)` means the wait expired
    /// with nothing to do.
    async fn dequeue(&self, timeout: Duration) -> anyhow::Result<Option<MessageJob>>;
}
