//! Upstream Client Module
//!
//! Issues the single GET to the third-party props endpoint with a hard
//! timeout and maps every outcome into the tagged error taxonomy.

use std::time::Duration;

use anyhow::Context;
use reqwest::header::{ACCEPT, RETRY_AFTER};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::{UpstreamError, UpstreamResult};
use crate::models::PlayerCard;
use crate::upstream::{transform_response, PlayerSource};

/// Descriptive User-Agent sent upstream; no credentials are attached.
const USER_AGENT: &str = concat!("props-proxy/", env!("CARGO_PKG_VERSION"));

/// Longest upstream error body carried into logs and error variants.
const MAX_ERROR_BODY: usize = 256;

// == Upstream Client ==
/// HTTP client for the props endpoint.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    url: String,
    market_type: String,
    timeout: Duration,
}

impl UpstreamClient {
    // == Constructor ==
    /// Builds a client from configuration.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build upstream HTTP client")?;

        Ok(Self {
            http,
            url: config.upstream_url.clone(),
            market_type: config.market_type.clone(),
            timeout: Duration::from_secs(config.fetch_timeout_secs),
        })
    }

    // == Raw Fetch ==
    /// One GET to the props endpoint, classified into the taxonomy.
    ///
    /// The request is cancelled after `timeout`; dropping the returned future
    /// (caller disconnect) cancels it as well.
    async fn fetch_raw(&self) -> UpstreamResult<Value> {
        let response = self
            .http
            .get(&self.url)
            .query(&[("marketType", self.market_type.as_str())])
            .header(ACCEPT, "application/json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    UpstreamError::Timeout
                } else {
                    // Transport failure before any status arrived
                    UpstreamError::Service {
                        status: 0,
                        body: err.to_string(),
                    }
                }
            })?;

        let status = response.status();
        debug!(%status, "upstream responded");

        match status {
            s if s.is_success() => response
                .json::<Value>()
                .await
                .map_err(|err| UpstreamError::Validation(format!("invalid JSON body: {err}"))),
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get(RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok());
                Err(UpstreamError::RateLimited { retry_after })
            }
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
                Err(UpstreamError::Unavailable {
                    status: status.as_u16(),
                })
            }
            s => {
                let body: String = response
                    .text()
                    .await
                    .unwrap_or_default()
                    .chars()
                    .take(MAX_ERROR_BODY)
                    .collect();
                Err(UpstreamError::Service {
                    status: s.as_u16(),
                    body,
                })
            }
        }
    }
}

#[async_trait::async_trait]
impl PlayerSource for UpstreamClient {
    /// Fetches one payload and transforms it into the internal player list.
    async fn fetch_players(&self) -> UpstreamResult<Vec<PlayerCard>> {
        let payload = self.fetch_raw().await?;
        transform_response(&payload)
    }
}
