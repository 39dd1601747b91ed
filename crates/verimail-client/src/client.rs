//! Verification requests over HTTP.

use std::future::Future;

use chrono::Utc;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};
use verimail_model::ResultSet;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Path of the batch check endpoint, relative to the base URL.
pub const EMAIL_CHECK_PATH: &str = "/api/email_check";

/// A service that returns verdicts for a batch of addresses.
pub trait VerificationApi {
    fn check(&self, addresses: &[String]) -> impl Future<Output = Result<ResultSet>> + Send;
}

/// Client for the HTTP verification service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    endpoint: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        let endpoint = config.endpoint();
        reqwest::Url::parse(&endpoint).map_err(|_| ClientError::InvalidUrl(endpoint.clone()))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl VerificationApi for ApiClient {
    async fn check(&self, addresses: &[String]) -> Result<ResultSet> {
        debug!(endpoint = %self.endpoint, count = addresses.len(), "Submitting batch");

        let response = self
            .client
            .post(&self.endpoint)
            .header(USER_AGENT, format!("verimail/{}", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(addresses)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Verification service rejected the batch");
            return Err(ClientError::Status {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.bytes().await?;
        let results: ResultSet = serde_json::from_slice(&body)?;
        debug!(
            items = results.items.len(),
            total = results.stats.total,
            "Received verdicts"
        );
        Ok(results.with_checked_at(Utc::now()))
    }
}
