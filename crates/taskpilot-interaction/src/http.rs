//! Shared HTTP plumbing for the backend services.
//!
//! Non-2xx responses become `Api` errors carrying the status and body text;
//! a 2xx body that fails to decode is a `MalformedResponse`, never a panic.

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use taskpilot_core::config::ClientConfig;
use taskpilot_core::error::{Result, TaskpilotError};

#[derive(Clone)]
pub(crate) struct HttpEndpoint {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpEndpoint {
    pub(crate) fn new(config: &ClientConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.request_timeout(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub(crate) async fn get<R>(&self, path: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let response = self
            .client
            .get(self.url(path))
            .timeout(self.timeout)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub(crate) async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .timeout(self.timeout)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// POST without a request body (transition-style endpoints).
    pub(crate) async fn post_empty<R>(&self, path: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.url(path))
            .timeout(self.timeout)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub(crate) async fn put<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .put(self.url(path))
            .json(body)
            .timeout(self.timeout)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// DELETE, discarding whatever body the backend returns.
    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(path))
            .timeout(self.timeout)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TaskpilotError::api(status.as_u16(), message));
        }
        Ok(())
    }

    async fn decode<R>(response: reqwest::Response) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            tracing::debug!(target: "http", status = status.as_u16(), "backend returned an error: {message}");
            return Err(TaskpilotError::api(status.as_u16(), message));
        }
        response
            .json::<R>()
            .await
            .map_err(|e| TaskpilotError::malformed("JSON body", e.to_string()))
    }
}
