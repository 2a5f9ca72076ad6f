use std::env::var;
use std::str::FromStr;
use std::time::Duration;

use dotenvy::dotenv;
use thiserror::Error;

use crate::infrastructure::{messaging::jetstream::JetstreamConfig, senders::simulated};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} env param is required")]
    Missing(&'static str),
    #[error("{name} env param is invalid: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SenderKind {
    Simulated { success_rate: f64 },
    Http { gateway_url: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub scheme: String,
    pub host: String,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub queue: JetstreamConfig,
    pub max_retry_count: u32,
    /// As configured; the consumer clamps it when it starts.
    pub worker_concurrency: usize,
    pub dequeue_timeout: Duration,
    pub sender: SenderKind,
}

impl Config {
    pub fn try_parse() -> Result<Config, ConfigError> {
        let _ = dotenv();
        Self::from_lookup(|name| var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let string_or = |name: &str, default: &str| get(name).unwrap_or_else(|| default.to_string());

        let max_retry_count: u32 = parse_or(&get, "MAX_RETRY_COUNT", 3)?;
        if max_retry_count < 1 {
            return Err(ConfigError::Invalid {
                name: "MAX_RETRY_COUNT",
                value: max_retry_count.to_string(),
            });
        }

        let sender = match get("SENDER").as_deref().unwrap_or("simulated") {
            "simulated" => SenderKind::Simulated {
                success_rate: parse_or(&get, "SENDER_SUCCESS_RATE", simulated::DEFAULT_SUCCESS_RATE)?,
            },
            "http" => SenderKind::Http {
                gateway_url: get("SENDER_GATEWAY_URL")
                    .ok_or(ConfigError::Missing("SENDER_GATEWAY_URL"))?,
            },
            other => {
                return Err(ConfigError::Invalid {
                    name: "SENDER",
                    value: other.to_string(),
                });
            }
        };

        Ok(Config {
            port: parse_or(&get, "PORT", 8080)?,
            scheme: string_or("SCHEME", "http"),
            host: string_or("HOST", "127.0.0.1"),
            database_url: get("DATABASE_URL"),
            database_max_connections: parse_or(&get, "DATABASE_MAX_CONNECTIONS", 10)?,
            queue: JetstreamConfig {
                url: string_or("NATS_URL", "nats://127.0.0.1:4222"),
                stream: string_or("QUEUE_STREAM", "CAMPAIGN_SENDS"),
                subject: string_or("QUEUE_SUBJECT", "campaign.sends"),
                durable: string_or("QUEUE_DURABLE", "campaign-dispatch"),
            },
            max_retry_count,
            worker_concurrency: parse_or(&get, "WORKER_CONCURRENCY", 5)?,
            dequeue_timeout: Duration::from_millis(parse_or(&get, "DEQUEUE_TIMEOUT_MS", 1000)?),
            sender,
        })
    }

    pub fn database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or(ConfigError::Missing("DATABASE_URL"))
    }

    pub fn server_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }
}

fn parse_or<T, G>(get: &G, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
