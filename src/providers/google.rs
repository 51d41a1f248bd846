/*!
 * Client for the free Google translation web endpoint.
 *
 * Uses the `translate_a/single` endpoint with client=gtx, the same unofficial
 * surface the widespread Python translation libraries sit on. The response is
 * a nested JSON array whose first element holds the translated chunks.
 */

use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::errors::ProviderError;

use super::Provider;

const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Google web translation client
#[derive(Debug)]
pub struct GoogleWebTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Endpoint URL
    endpoint: String,
}

impl GoogleWebTranslate {
    /// Create a new client against the public endpoint
    pub fn new(timeout_secs: u64) -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT, timeout_secs)
    }

    /// Create a new client against a specific endpoint (used by tests)
    pub fn with_endpoint(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }

    /// Build the request URL for one translation call
    fn request_url(&self, text: &str, target: &str) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| ProviderError::RequestFailed(format!("bad endpoint: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("client", "gtx")
            .append_pair("sl", "auto")
            .append_pair("tl", target)
            .append_pair("dt", "t")
            .append_pair("q", text);
        Ok(url)
    }

    /// Pull the translated payload out of the nested-array response.
    ///
    /// The normal shape is `[[["chunk", "source", ...], ...], ...]`; chunks
    /// are concatenated in order. A missing or null translation element is
    /// reported as null so the service boundary can apply the empty-string
    /// contract; any other unexpected value is passed through untouched.
    fn extract_translation(payload: &Value) -> Value {
        match payload.get(0) {
            None | Some(Value::Null) => Value::Null,
            Some(Value::Array(chunks)) => {
                let mut text = String::new();
                for chunk in chunks {
                    match chunk.get(0) {
                        Some(Value::String(piece)) => text.push_str(piece),
                        Some(Value::Null) | None => {}
                        Some(other) => text.push_str(&other.to_string()),
                    }
                }
                Value::String(text)
            }
            Some(other) => other.clone(),
        }
    }
}

#[async_trait]
impl Provider for GoogleWebTranslate {
    async fn translate_raw(&self, text: &str, target: &str) -> Result<Value, ProviderError> {
        let url = self.request_url(text, target)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error response".to_string());
            error!("Google translation error ({}): {}", status, body);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: body,
            });
        }

        let payload = response
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(Self::extract_translation(&payload))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.translate_raw("Hello", "es").await.map(|_| ())
    }

    fn name(&self) -> &'static str {
        "google"
    }
}
