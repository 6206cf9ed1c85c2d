//! Authenticated HTTP transport to the remote search API.
//!
//! Thin by design: one POST per search request, status classification into
//! the error taxonomy, and a bounded retry loop for transient failures. No
//! business logic lives here.

mod backoff;

pub use backoff::Backoff;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};
use url::Url;

use crate::config::ApiConfig;
use crate::error::SearchError;

/// Authenticated client for the Legifrance search API.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: SecretString,
    max_retries: u32,
    backoff: Backoff,
}

impl HttpClient {
    /// Build a client from the API configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SearchError::Transient {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url().clone(),
            api_key: config.api_key().clone(),
            max_retries: config.max_retries,
            backoff: Backoff::default(),
        })
    }

    /// POST a search payload to `endpoint`, retrying transient failures up to
    /// the configured budget, and return the decoded JSON body.
    ///
    /// A remote throttle signal (429) gets one retry, after waiting out its
    /// `Retry-After` capped at the backoff ceiling; a second 429 surfaces.
    pub async fn post_search(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, SearchError> {
        let mut attempt = 0u32;
        let mut throttled_once = false;
        loop {
            match self.post_once(endpoint, body).await {
                Ok(value) => return Ok(value),
                Err(err @ SearchError::RateLimited { .. }) if !throttled_once => {
                    throttled_once = true;
                    let delay = retry_delay(&self.backoff, &err, 1);
                    warn!(endpoint, ?delay, "remote throttling, retrying once");
                    tokio::time::sleep(delay).await;
                }
                Err(err @ SearchError::Transient { .. }) if attempt < self.max_retries => {
                    attempt += 1;
                    let delay = retry_delay(&self.backoff, &err, attempt);
                    warn!(endpoint, attempt, ?delay, error = %err, "retrying after transient failure");
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn post_once(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, SearchError> {
        let url = self
            .base_url
            .join(endpoint)
            .map_err(|e| SearchError::validation("endpoint", e.to_string()))?;

        debug!(endpoint, "sending search request");

        let response = self
            .http
            .post(url)
            .query(&[("api_key", self.api_key.expose_secret())])
            .header(reqwest::header::ACCEPT, "*/*")
            .json(body)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| SearchError::RemoteRejection {
                    status: status.as_u16(),
                    detail: format!("response body was not valid JSON: {e}"),
                });
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs);
            return Err(SearchError::RateLimited { retry_after });
        }

        let detail = response.text().await.unwrap_or_default();
        if status.is_server_error() {
            return Err(SearchError::Transient {
                message: format!("remote API returned {status}: {detail}"),
            });
        }

        Err(SearchError::RemoteRejection {
            status: status.as_u16(),
            detail,
        })
    }
}

fn classify_transport_error(err: reqwest::Error) -> SearchError {
    if err.is_timeout() {
        SearchError::Transient {
            message: "request timed out".into(),
        }
    } else {
        SearchError::Transient {
            message: err.to_string(),
        }
    }
}

/// Wait before a retry: the server's `Retry-After` when it sent one, the
/// backoff schedule otherwise, never beyond the backoff cap. An invocation
/// must stay bounded even against a remote suggesting hour-long waits.
fn retry_delay(backoff: &Backoff, err: &SearchError, attempt: u32) -> Duration {
    err.retry_after()
        .unwrap_or_else(|| backoff.delay(attempt))
        .min(backoff.cap())
}
