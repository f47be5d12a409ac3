//! Outbound call to the remote summarization service.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shared::protocol::{SummarizeRequest, SummarizeResponse, SUMMARIZE_ROUTE};
use tracing::debug;
use url::Url;

use crate::error::SummaryCallError;

#[async_trait]
pub trait SummaryService: Send + Sync {
    async fn summarize(
        &self,
        request: &SummarizeRequest,
    ) -> std::result::Result<SummarizeResponse, SummaryCallError>;
}

#[derive(Debug, Clone)]
pub struct ServiceEndpoint {
    pub service_url: String,
    pub endpoint_path: String,
    /// `None` leaves the call unbounded.
    pub request_timeout: Option<Duration>,
}

impl ServiceEndpoint {
    pub fn new(service_url: impl Into<String>) -> Self {
        Self {
            service_url: service_url.into(),
            endpoint_path: SUMMARIZE_ROUTE.to_string(),
            request_timeout: None,
        }
    }

    pub fn url(&self) -> Result<Url> {
        let base = Url::parse(self.service_url.trim())
            .with_context(|| format!("invalid service url '{}'", self.service_url))?;
        base.join(self.endpoint_path.trim())
            .with_context(|| format!("invalid endpoint path '{}'", self.endpoint_path))
    }
}

pub struct HttpSummaryService {
    http: Client,
    endpoint: Url,
}

impl HttpSummaryService {
    pub fn new(endpoint: &ServiceEndpoint) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = endpoint.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("failed to build http client")?;
        Ok(Self {
            http,
            endpoint: endpoint.url()?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SummaryService for HttpSummaryService {
    async fn summarize(
        &self,
        request: &SummarizeRequest,
    ) -> std::result::Result<SummarizeResponse, SummaryCallError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(SummaryCallError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SummaryCallError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(SummaryCallError::Transport)?;
        let value: Value = serde_json::from_slice(&body)
            .map_err(|err| SummaryCallError::Decode(err.to_string()))?;
        debug!(endpoint = %self.endpoint, bytes = body.len(), "summarization response received");
        Ok(SummarizeResponse::from_json_value(&value))
    }
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
