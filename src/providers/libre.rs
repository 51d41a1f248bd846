/*!
 * Client for a LibreTranslate server.
 */

use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::errors::ProviderError;

use super::Provider;

/// LibreTranslate request body
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    /// Source text
    q: &'a str,
    /// Source language, auto-detected
    source: &'a str,
    /// Target language code
    target: &'a str,
    /// Plain-text handling
    format: &'a str,
    /// API key, if the server requires one
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

/// LibreTranslate client
#[derive(Debug)]
pub struct LibreTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Base URL of the server
    endpoint: String,
    /// Optional API key
    api_key: Option<String>,
}

impl LibreTranslate {
    /// Create a new client for the given server
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            api_key,
        }
    }

    /// Full URL of the translate endpoint
    fn translate_url(&self) -> String {
        format!("{}/translate", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl Provider for LibreTranslate {
    async fn translate_raw(&self, text: &str, target: &str) -> Result<Value, ProviderError> {
        let body = TranslateRequest {
            q: text,
            source: "auto",
            target,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self
            .client
            .post(self.translate_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error response".to_string());
            error!("LibreTranslate error ({}): {}", status, message);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let payload = response
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        // A missing field is reported as null; the service boundary maps it
        // to the empty-string contract.
        Ok(payload
            .get("translatedText")
            .cloned()
            .unwrap_or(Value::Null))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.translate_raw("Hello", "es").await.map(|_| ())
    }

    fn name(&self) -> &'static str {
        "libretranslate"
    }
}
