use std::ops::RangeInclusive;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use crate::{application::services::sender::DeliverySender, domain::models::Channel};

pub const DEFAULT_SUCCESS_RATE: f64 = 0.92;

/// Stand-in gateway: sleeps for a random latency, then succeeds with the
/// configured probability.
pub struct SimulatedSender {
    success_rate: f64,
    latency_ms: RangeInclusive<u64>,
}

impl SimulatedSender {
    /// Rates outside `[0, 1]` fall back to [`DEFAULT_SUCCESS_RATE`].
    pub fn new(success_rate: f64) -> Self {
        let success_rate = if (0.0..=1.0).contains(&success_rate) {
            success_rate
        } else {
            DEFAULT_SUCCESS_RATE
        };
        Self {
            success_rate,
            latency_ms: 50..=200,
        }
    }

    pub fn with_latency(mut self, latency_ms: RangeInclusive<u64>) -> Self {
        self.latency_ms = latency_ms;
        self
    }
}

impl Default for SimulatedSender {
    fn default() -> Self {
        Self::new(DEFAULT_SUCCESS_RATE)
    }
}

#[async_trait]
impl DeliverySender for SimulatedSender {
    async fn send(&self, channel: Channel, address: &str, content: &str) -> anyhow::Result<()> {
        let (delay, delivered) = {
            let mut rng = rand::thread_rng();
            let delay = if self.latency_ms.is_empty() {
                0
            } else {
                rng.gen_range(self.latency_ms.clone())
            };
            (delay, rng.gen_bool(self.success_rate))
        };

        tokio::time::sleep(Duration::from_millis(delay)).await;

        if !delivered {
            anyhow::bail!("simulated network error");
        }

        tracing::debug!(
            channel = %channel,
            to = address,
            length = content.len(),
            "simulated delivery"
        );
        Ok(())
    }
}
