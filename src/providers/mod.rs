/*!
 * Provider implementations for machine-translation services.
 *
 * This module contains client implementations for the supported translation
 * backends:
 * - Google: the free Google translation web endpoint
 * - LibreTranslate: a self-hosted LibreTranslate server
 */

use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must
/// follow, allowing them to be used interchangeably by the translation
/// service. Implementations return the raw translated payload; mapping a
/// null or non-text payload to the empty-string contract happens once, at
/// the service boundary.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Translate a piece of text into the target language
    ///
    /// # Arguments
    /// * `text` - Source text; the source language is auto-detected
    /// * `target` - Target language code
    ///
    /// # Returns
    /// * `Result<Value, ProviderError>` - The raw translated payload (may be
    ///   null or a non-string value) or a provider error
    async fn translate_raw(&self, text: &str, target: &str) -> Result<Value, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the provider answers a trivial request
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Short provider name for logs and error messages
    fn name(&self) -> &'static str;
}

pub mod google;
pub mod libre;
