use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::Path;
use std::time::Instant;

use crate::app_config::{Config, TranslationProvider};
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::providers::Provider;
use crate::providers::mock::MockProvider;
use crate::providers::mymemory::MyMemory;
use crate::translation::{TranslationOutcome, TranslationService};

// @module: Application controller wiring config, provider and pipeline

/// Main application controller for text translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Pipeline over the configured provider
    service: TranslationService<Box<dyn Provider>>,
    // @field: Whether to draw a progress bar for multi-segment runs
    show_progress: bool,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let provider = Self::build_provider(&config);
        let service = TranslationService::new(provider, config.pipeline_options());

        Ok(Self {
            config,
            service,
            show_progress: true,
        })
    }

    /// Disable the progress bar (used for piping and tests)
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// The active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The translation pipeline
    pub fn service(&self) -> &TranslationService<Box<dyn Provider>> {
        &self.service
    }

    // @creates: Provider for the configured backend
    fn build_provider(config: &Config) -> Box<dyn Provider> {
        match config.translation.provider {
            TranslationProvider::MyMemory => Box::new(
                MyMemory::new(&config.translation.endpoint, config.translation.timeout())
                    .with_contact_email(&config.translation.contact_email),
            ),
            TranslationProvider::Mock => Box::new(MockProvider::working()),
        }
    }

    /// Check that the provider answers
    pub async fn test_connection(&self) -> Result<()> {
        self.service.test_connection().await.with_context(|| {
            format!(
                "Failed to connect to {}",
                self.config.translation.provider.display_name()
            )
        })
    }

    /// Split text the way the pipeline would
    pub fn segment_text(&self, text: &str) -> Vec<String> {
        self.service.segmenter().split(text)
    }

    /// Translate text with the configured languages
    pub async fn translate_text(&self, text: &str) -> TranslationOutcome {
        let target = &self.config.target_language;
        let source = &self.config.source_language;

        if !language_utils::is_autodetect(source) && language_utils::language_codes_match(source, target) {
            info!("{}", language_utils::same_language_message(target));
        }

        let progress_bar = if self.show_progress {
            ProgressBar::new(0)
        } else {
            ProgressBar::hidden()
        };
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} segments ({percent}%) {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));

        let outcome = self
            .service
            .translate_with_progress(text, target, source, |done, total| {
                if total > 1 {
                    progress_bar.set_length(total as u64);
                    progress_bar.set_position(done as u64);
                }
            })
            .await;
        progress_bar.finish_and_clear();

        outcome
    }

    /// Run the main workflow: read input, translate, write output
    pub async fn run(&self, input: Option<&Path>, output: Option<&Path>) -> Result<TranslationOutcome> {
        let start_time = Instant::now();
        let text = FileManager::read_input(input)?;

        info!(
            "Translating {} chars with {} ({} -> {})",
            text.chars().count(),
            self.config.translation.provider.display_name(),
            self.config.source_language,
            self.config.target_language
        );

        let outcome = self.translate_text(&text).await;
        FileManager::write_output(output, &outcome.text)?;

        if !outcome.is_complete() {
            warn!(
                "{} of {} segments could not be translated and were left as is",
                outcome.fell_back.len(),
                outcome.segments
            );
        }
        info!(
            "Done in {:.2}s: {} segments, {} provider calls",
            start_time.elapsed().as_secs_f64(),
            outcome.segments,
            outcome.calls
        );

        Ok(outcome)
    }
}
