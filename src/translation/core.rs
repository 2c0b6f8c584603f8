/*!
 * Core translation service implementation.
 *
 * `TranslationService` turns arbitrary-length text into a translation using a
 * provider that only accepts bounded requests. Long text is segmented,
 * segments are translated strictly one after another with a fixed pause in
 * between, and the results are joined with single spaces.
 *
 * Translation never fails from the caller's point of view: a segment whose
 * provider call fails keeps its original text.
 */

use log::{debug, info, warn};
use std::time::Duration;

use super::cache::TranslationCache;
use super::segmenter::{Segmenter, SegmenterConfig};
use crate::errors::ProviderError;
use crate::language_utils::{AUTODETECT, is_autodetect, language_codes_match};
use crate::providers::{Provider, TranslationRequest};

/// Default pause between consecutive provider calls
pub const DEFAULT_INTER_REQUEST_DELAY: Duration = Duration::from_millis(50);

/// Default base delay before the first retry
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(250);

/// Tuning for the translation pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    /// How text is split into segments
    pub segmenter: SegmenterConfig,

    /// Pause after each provider call before the next segment
    pub inter_request_delay: Duration,

    /// Extra attempts per segment after a retryable failure
    pub retry_count: u32,

    /// Base backoff, doubled on each further retry
    pub retry_backoff: Duration,

    /// Whether successful segment translations are cached
    pub cache_enabled: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            segmenter: SegmenterConfig::default(),
            inter_request_delay: DEFAULT_INTER_REQUEST_DELAY,
            retry_count: 0,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
            cache_enabled: false,
        }
    }
}

/// Result of one translation run, with diagnostics
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TranslationOutcome {
    /// The translated text
    pub text: String,

    /// Number of segments the input was translated in (0 when short-circuited)
    pub segments: usize,

    /// Provider calls made, retries included
    pub calls: usize,

    /// Zero-based indices of segments that kept their original text
    pub fell_back: Vec<usize>,

    /// True when no provider call was needed (empty input or same language)
    pub short_circuited: bool,
}

impl TranslationOutcome {
    fn short_circuit(text: String) -> Self {
        Self {
            text,
            short_circuited: true,
            ..Self::default()
        }
    }

    /// Whether every segment was translated by the provider
    pub fn is_complete(&self) -> bool {
        self.fell_back.is_empty()
    }
}

/// Main translation service
pub struct TranslationService<P: Provider> {
    /// Translation backend
    provider: P,

    /// Splits long input
    segmenter: Segmenter,

    /// Pipeline tuning
    options: PipelineOptions,

    /// Segment translation cache
    cache: TranslationCache,
}

impl<P: Provider> TranslationService<P> {
    /// Create a new translation service
    pub fn new(provider: P, options: PipelineOptions) -> Self {
        Self {
            segmenter: Segmenter::new(&options.segmenter),
            cache: TranslationCache::new(options.cache_enabled),
            provider,
            options,
        }
    }

    /// Create a service with default options
    pub fn with_defaults(provider: P) -> Self {
        Self::new(provider, PipelineOptions::default())
    }

    /// The provider used for translation
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The segmenter used for long input
    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    /// The pipeline options
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// The segment cache
    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// Test the connection to the translation provider
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        self.provider.test_connection().await
    }

    /// Translate text into `target_language`
    ///
    /// Always resolves to a string. Segments whose translation fails keep
    /// their original text.
    pub async fn translate(&self, text: &str, target_language: &str, source_language: &str) -> String {
        self.translate_detailed(text, target_language, source_language)
            .await
            .text
    }

    /// Translate text, letting the provider detect the source language
    pub async fn translate_text(&self, text: &str, target_language: &str) -> String {
        self.translate(text, target_language, AUTODETECT).await
    }

    /// Translate text and report how it went
    pub async fn translate_detailed(
        &self,
        text: &str,
        target_language: &str,
        source_language: &str,
    ) -> TranslationOutcome {
        self.translate_with_progress(text, target_language, source_language, |_, _| {})
            .await
    }

    /// Translate text, calling `on_segment(done, total)` after each segment
    pub async fn translate_with_progress<F>(
        &self,
        text: &str,
        target_language: &str,
        source_language: &str,
        mut on_segment: F,
    ) -> TranslationOutcome
    where
        F: FnMut(usize, usize) + Send,
    {
        if text.is_empty() {
            return TranslationOutcome::short_circuit(String::new());
        }

        // Providers only understand the canonical sentinel spelling
        let source_language = if is_autodetect(source_language) {
            AUTODETECT
        } else {
            source_language
        };

        // Only an explicit source can be compared; autodetect needs the service
        if !is_autodetect(source_language) && language_codes_match(source_language, target_language) {
            debug!("Source and target are both '{}', returning text unchanged", target_language);
            return TranslationOutcome::short_circuit(text.to_string());
        }

        let mut outcome = TranslationOutcome::default();

        if self.segmenter.fits(text) {
            outcome.segments = 1;
            let (translated, _) = self
                .translate_segment(text, 0, target_language, source_language, &mut outcome)
                .await;
            on_segment(1, 1);
            outcome.text = translated;
            return outcome;
        }

        let segments: Vec<String> = self.segmenter.segments(text).collect();
        let total = segments.len();
        outcome.segments = total;
        debug!(
            "Split {} chars into {} segments of at most {} chars",
            text.chars().count(),
            total,
            self.segmenter.max_chars()
        );

        let mut translated = Vec::with_capacity(total);
        for (index, segment) in segments.iter().enumerate() {
            let (result, called_provider) = self
                .translate_segment(segment, index, target_language, source_language, &mut outcome)
                .await;
            translated.push(result);
            on_segment(index + 1, total);

            if called_provider && index + 1 < total && !self.options.inter_request_delay.is_zero() {
                tokio::time::sleep(self.options.inter_request_delay).await;
            }
        }

        if outcome.is_complete() {
            info!("Translated {} segments into '{}'", total, target_language);
        } else {
            info!(
                "Translated {} segments into '{}', {} kept their original text",
                total,
                target_language,
                outcome.fell_back.len()
            );
        }

        outcome.text = translated.join(" ");
        outcome
    }

    /// Translate one segment with retries, falling back to the original text
    ///
    /// Returns the text to use and whether the provider was called.
    async fn translate_segment(
        &self,
        segment: &str,
        index: usize,
        target_language: &str,
        source_language: &str,
        outcome: &mut TranslationOutcome,
    ) -> (String, bool) {
        if let Some(cached) = self.cache.get(segment, source_language, target_language) {
            return (cached, false);
        }

        let request = TranslationRequest::new(segment, source_language, target_language);
        let mut attempt: u32 = 0;

        loop {
            outcome.calls += 1;
            debug!(
                "Segment {} ({} chars) -> {} attempt {}",
                index + 1,
                segment.chars().count(),
                self.provider.name(),
                attempt + 1
            );

            let error = match self.provider.translate(&request).await {
                Ok(translated) if !translated.trim().is_empty() => {
                    self.cache
                        .store(segment, source_language, target_language, &translated);
                    return (translated, true);
                }
                Ok(_) => ProviderError::ParseError("empty translation".to_string()),
                Err(e) => e,
            };

            if attempt < self.options.retry_count && error.is_retryable() {
                attempt += 1;
                let backoff = self
                    .options
                    .retry_backoff
                    .saturating_mul(1u32 << (attempt - 1).min(16));
                warn!(
                    "Segment {} failed ({}), retry {}/{} in {:?}",
                    index + 1,
                    error,
                    attempt,
                    self.options.retry_count,
                    backoff
                );
                tokio::time::sleep(backoff).await;
                continue;
            }

            warn!("Segment {} kept its original text: {}", index + 1, error);
            outcome.fell_back.push(index);
            return (segment.to_string(), true);
        }
    }
}
