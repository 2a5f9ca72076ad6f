use async_trait::async_trait;

use crate::domain::models::Channel;

/// A single delivery attempt to one recipient. Any error is treated as a
/// transient failure by the caller.
#[async_trait]
pub trait DeliverySender: Send + Sync {
    async fn send(&self, channel: Channel, address: &str, content: &str) -> anyhow::Result<()>;
}
