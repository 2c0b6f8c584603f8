/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for translation backends:
 * - MyMemory: the public MyMemory translation API
 * - Mock: an in-process provider for tests and dry runs
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;
use crate::language_utils::AUTODETECT;

/// A single translation request, sized to fit one provider call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    /// The text to translate
    pub text: String,
    /// Source language code, or the autodetect sentinel
    pub source_language: String,
    /// Target language code
    pub target_language: String,
}

impl TranslationRequest {
    /// Create a request with an explicit source language
    pub fn new(
        text: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }

    /// Create a request that lets the provider detect the source language
    pub fn autodetect(text: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self::new(text, AUTODETECT, target_language)
    }
}

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably in the translation service.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Translate one request
    ///
    /// # Arguments
    /// * `request` - The text and language pair to translate
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(&self, request: &TranslationRequest) -> Result<String, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the connection is successful, or an error
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Short provider name used in logs
    fn name(&self) -> &str;
}

#[async_trait]
impl<P: Provider + ?Sized> Provider for std::sync::Arc<P> {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, ProviderError> {
        (**self).translate(request).await
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        (**self).test_connection().await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[async_trait]
impl<P: Provider + ?Sized> Provider for Box<P> {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, ProviderError> {
        (**self).translate(request).await
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        (**self).test_connection().await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

pub mod mock;
pub mod mymemory;
