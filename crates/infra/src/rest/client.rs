//! Retrying HTTP client for the remote timesheet service
//!
//! Requests are rebuilt per attempt, so bodies never need to be cloned.
//! Server errors (5xx) and transient transport failures retry with
//! exponential backoff up to a bounded number of attempts; client errors
//! are returned to the caller unchanged.

use std::time::Duration;

use reqwest::{Client as ReqwestClient, Method, Response};
use serde_json::Value;
use tracing::debug;

use crate::errors::InfraError;

/// HTTP client bound to one service base URL
#[derive(Clone)]
pub struct RestClient {
    client: ReqwestClient,
    base_url: String,
    api_token: Option<String>,
    max_attempts: usize,
    base_backoff: Duration,
}

impl RestClient {
    /// Start building a client for the given base URL
    pub fn builder(base_url: impl Into<String>) -> RestClientBuilder {
        RestClientBuilder {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            max_attempts: 3,
            base_backoff: Duration::from_millis(200),
            api_token: None,
        }
    }

    /// Execute one logical request with retry semantics
    ///
    /// The returned response may still carry a non-success status; mapping
    /// statuses to domain outcomes is the caller's concern.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Response, InfraError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'));

        for attempt in 1..=self.max_attempts {
            let mut request = self.client.request(method.clone(), &url).query(query);
            if let Some(token) = &self.api_token {
                request = request.bearer_auth(token);
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            debug!(attempt, %method, %url, "sending request to timesheet service");

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    debug!(attempt, %method, %url, %status, "timesheet service responded");

                    if status.is_server_error() && attempt < self.max_attempts {
                        self.backoff(attempt).await;
                        continue;
                    }
                    return Ok(response);
                }
                Err(err) => {
                    debug!(attempt, %method, %url, error = %err, "request failed");

                    if attempt < self.max_attempts && is_transient(&err) {
                        self.backoff(attempt).await;
                        continue;
                    }
                    return Err(err.into());
                }
            }
        }

        Err(InfraError::Protocol("request attempts exhausted".to_string()))
    }

    /// Execute and decode a JSON body, treating non-success statuses as
    /// protocol errors
    pub async fn fetch_json<T: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<T, InfraError> {
        let response = self.execute(method, path, query, body).await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Map non-success statuses to a protocol error carrying the body
    pub async fn check_status(response: Response) -> Result<Response, InfraError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(InfraError::Protocol(format!("service returned {status}: {body}")))
    }

    async fn backoff(&self, attempt: usize) {
        let shift = attempt.saturating_sub(1).min(8) as u32;
        let delay = self.base_backoff.saturating_mul(1 << shift);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Whether a transport error is worth retrying
fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}

/// Builder for [`RestClient`]
#[derive(Debug)]
pub struct RestClientBuilder {
    base_url: String,
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
    api_token: Option<String>,
}

impl RestClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total number of attempts (initial try + retries)
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    /// Bearer token attached to every request
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn build(self) -> Result<RestClient, InfraError> {
        let client = ReqwestClient::builder().timeout(self.timeout).no_proxy().build()?;

        Ok(RestClient {
            client,
            base_url: self.base_url,
            api_token: self.api_token,
            max_attempts: self.max_attempts,
            base_backoff: self.base_backoff,
        })
    }
}
