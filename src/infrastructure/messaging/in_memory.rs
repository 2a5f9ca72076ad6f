use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;
use tokio::time::Instant;

use crate::{
    application::services::{health::HealthProbe, job_queue::JobQueue},
    domain::events::MessageJob,
};

/// Process-local FIFO queue with the same contract as the broker-backed one.
#[derive(Default)]
pub struct InMemoryJobQueue {
    jobs: Mutex<VecDeque<MessageJob>>,
    available: Notify,
}

impl InMemoryJobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes and returns everything currently queued.
    pub fn drain(&self) -> Vec<MessageJob> {
        self.lock().drain(..).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<MessageJob>> {
        // push/pop cannot leave the deque half-updated
        self.jobs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn pop(&self) -> Option<MessageJob> {
        self.lock().pop_front()
    }
}

#[async_trait]
impl JobQueue for InMemoryJobQueue {
    async fn enqueue(&self, job: MessageJob) -> anyhow::Result<()> {
        self.lock().push_back(job);
        self.available.notify_one();
        Ok(())
    }

    async fn dequeue(&self, timeout: Duration) -> anyhow::Result<Option<MessageJob>> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(job) = self.pop() {
                return Ok(Some(job));
            }
            if tokio::time::timeout_at(deadline, self.available.notified())
                .await
                .is_err()
            {
                return Ok(self.pop());
            }
        }
    }
}

#[async_trait]
impl HealthProbe for InMemoryJobQueue {
    fn name(&self) -> &'static str {
        "queue"
    }

    async fn check(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
