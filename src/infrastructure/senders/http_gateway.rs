use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::{application::services::sender::DeliverySender, domain::models::Channel};

/// Posts each delivery as JSON to an external gateway. Any non-2xx
/// response counts as a failed attempt.
pub struct HttpGatewaySender {
    http: Client,
    url: String,
}

impl HttpGatewaySender {
    pub fn new(url: impl Into<String>) -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent("campaign-messaging/gateway")
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

#[derive(Debug, Serialize)]
struct GatewayRequest<'a> {
    channel: &'a str,
    to: &'a str,
    body: &'a str,
}

#[async_trait]
impl DeliverySender for HttpGatewaySender {
    async fn send(&self, channel: Channel, address: &str, content: &str) -> anyhow::Result<()> {
        let response = self
            .http
            .post(&self.url)
            .json(&GatewayRequest {
                channel: channel.as_str(),
                to: address,
                body: content,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("gateway returned {status}: {body}");
        }
        Ok(())
    }
}
