//! Device-identifier lookup client
//!
//! Translates Apple hardware identifiers (e.g. `iPad7,6`) into marketing
//! names with a single GET against a public lookup service. One attempt, no
//! retries: any failure is reported to the caller, which falls back to the
//! raw identifier.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use crate::config::ModelConfig;

const DEFAULT_LOOKUP_URL: &str = "https://di-api.reincubate.com/v1/apple-identifiers";

/// Lookup errors
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Lookup error: status {status}")]
    Status { status: u16 },

    #[error("Lookup response has no product sku")]
    MissingSku,

    #[error("Could not start lookup runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Anything that can turn a hardware identifier into a display name
pub trait DeviceLookup {
    fn lookup(&self, identifier: &str) -> Result<String, LookupError>;
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    product: LookupProduct,
}

#[derive(Debug, Deserialize)]
struct LookupProduct {
    #[serde(default)]
    sku: Option<String>,
}

/// Blocking facade over an async `reqwest` client
pub struct LookupClient {
    client: Client,
    base_url: String,
    runtime: Runtime,
}

impl LookupClient {
    /// Create a client from the `[model]` configuration section
    pub fn new(config: &ModelConfig) -> Result<Self, LookupError> {
        Self::with_settings(&config.lookup_url, config.timeout_seconds)
    }

    fn with_settings(base_url: &str, timeout_seconds: u64) -> Result<Self, LookupError> {
        let timeout = Duration::from_secs(timeout_seconds.max(1));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("boxfetch/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let runtime = Builder::new_current_thread().enable_all().build()?;

        Ok(LookupClient {
            client,
            base_url: normalize_base_url(base_url),
            runtime,
        })
    }

    async fn fetch(&self, identifier: &str) -> Result<String, LookupError> {
        let url = format!("{}/{}/", self.base_url, identifier);
        debug!(%url, "looking up device identifier");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                status: status.as_u16(),
            });
        }

        let body: LookupResponse = response.json().await?;
        body.product
            .sku
            .map(|sku| sku.trim().to_string())
            .filter(|sku| !sku.is_empty())
            .ok_or(LookupError::MissingSku)
    }
}

impl DeviceLookup for LookupClient {
    fn lookup(&self, identifier: &str) -> Result<String, LookupError> {
        self.runtime.block_on(self.fetch(identifier))
    }
}

fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return DEFAULT_LOOKUP_URL.to_string();
    }
    trimmed.trim_end_matches('/').to_string()
}
