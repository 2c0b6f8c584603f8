/*!
 * # chunkwise - sentence-aware chunked translation
 *
 * A Rust library for translating text of any length through translation
 * services that only accept short requests.
 *
 * ## Features
 *
 * - Split long text into bounded segments at sentence boundaries, with a
 *   word-level fallback for run-on sentences
 * - Translate segments strictly in order with a pause between calls, so a
 *   shared free API is never flooded
 * - Never fail: a segment that cannot be translated keeps its original text
 * - MyMemory API client, plus a mock provider for tests and dry runs
 * - Optional retries with exponential backoff and a segment cache
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `translation`: The pipeline:
 *   - `translation::segmenter`: Text segmentation
 *   - `translation::core`: Sequential translation service
 *   - `translation::cache`: Segment translation cache
 * - `providers`: Translation backends:
 *   - `providers::mymemory`: MyMemory API client
 *   - `providers::mock`: In-process mock provider
 * - `language_utils`: Language codes and the autodetect sentinel
 * - `file_utils`: Text input and output
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ConfigError, ProviderError};
pub use language_utils::{AUTODETECT, SUPPORTED_LANGUAGES, language_codes_match};
pub use providers::{Provider, TranslationRequest};
pub use translation::{PipelineOptions, Segmenter, SegmenterConfig, TranslationService};
