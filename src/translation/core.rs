/*!
 * Core translation service implementation.
 *
 * This module contains the main TranslationService struct and its
 * implementation, which is responsible for translating one segment's text at
 * a time through the configured provider and for normalizing whatever the
 * provider returns into the core's string contract.
 */

use log::debug;
use serde_json::Value;

use crate::app_config::{TranslationConfig, TranslationProvider as ConfigTranslationProvider};
use crate::errors::TranslationError;
use crate::providers::Provider;
use crate::providers::google::GoogleWebTranslate;
use crate::providers::libre::LibreTranslate;

/// Log entry captured during the translation stage
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: String,
    pub message: String,
}

/// Success value of one segment translation call.
///
/// Empty input succeeds trivially with [`SegmentTranslation::NothingToTranslate`];
/// callers special-case it instead of treating it as a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentTranslation {
    /// The input had no text to translate
    NothingToTranslate,
    /// Normalized translated text (may be empty when the provider returned
    /// a null payload)
    Text(String),
}

/// Translation provider implementation variants
enum TranslationProviderImpl {
    /// Google web endpoint
    Google {
        /// Client instance
        client: GoogleWebTranslate,
    },

    /// LibreTranslate server
    Libre {
        /// Client instance
        client: LibreTranslate,
    },

    /// Caller-supplied provider (used by tests and embedders)
    Custom {
        /// Client instance
        client: std::sync::Arc<dyn Provider>,
    },
}

/// Main translation service for transcript segments
pub struct TranslationService {
    /// Provider implementation
    provider: TranslationProviderImpl,

    /// Configuration for the translation service
    pub config: TranslationConfig,
}

/// Map a raw provider payload to the core's string contract.
///
/// Null becomes the empty string; a string passes through; any other value
/// is replaced by its JSON string representation. A translated value that
/// is not a `String` never enters the data model.
pub fn normalize_translation(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    }
}

impl TranslationService {
    /// Create a new translation service with the given configuration
    pub fn new(config: TranslationConfig) -> Self {
        let timeout_secs = config.get_timeout_secs();
        let provider = match config.provider {
            ConfigTranslationProvider::Google => TranslationProviderImpl::Google {
                client: GoogleWebTranslate::new(timeout_secs),
            },
            ConfigTranslationProvider::LibreTranslate => {
                let api_key = {
                    let k = config.get_api_key();
                    if k.is_empty() { None } else { Some(k) }
                };
                TranslationProviderImpl::Libre {
                    client: LibreTranslate::new(config.get_endpoint(), api_key, timeout_secs),
                }
            }
        };

        Self { provider, config }
    }

    /// Create a translation service around a caller-supplied provider
    pub fn with_provider(
        provider: std::sync::Arc<dyn Provider>,
        config: TranslationConfig,
    ) -> Self {
        Self {
            provider: TranslationProviderImpl::Custom { client: provider },
            config,
        }
    }

    /// The active provider as a trait object
    fn active_provider(&self) -> &dyn Provider {
        match &self.provider {
            TranslationProviderImpl::Google { client } => client,
            TranslationProviderImpl::Libre { client } => client,
            TranslationProviderImpl::Custom { client } => client.as_ref(),
        }
    }

    /// Translate one segment's text into the target language.
    ///
    /// Empty input short-circuits without a provider call. The provider's
    /// payload is normalized before it is returned; failures carry the
    /// provider's message and are never retried here.
    pub async fn translate_segment(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<SegmentTranslation, TranslationError> {
        if text.trim().is_empty() {
            return Ok(SegmentTranslation::NothingToTranslate);
        }

        let provider = self.active_provider();
        debug!(
            "Translating {} chars via {} into '{}'",
            text.chars().count(),
            provider.name(),
            target_language
        );

        let payload = provider.translate_raw(text, target_language).await?;
        Ok(SegmentTranslation::Text(normalize_translation(payload)))
    }

    /// Test the connection to the active provider
    pub async fn test_connection(&self) -> Result<(), TranslationError> {
        self.active_provider().test_connection().await?;
        Ok(())
    }

    /// Name of the active provider
    pub fn provider_name(&self) -> &'static str {
        self.active_provider().name()
    }
}
