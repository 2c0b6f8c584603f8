/*!
 * Text translation through bounded-size provider requests.
 *
 * - `segmenter`: Sentence-aware splitting of long text
 * - `core`: The sequential translation pipeline
 * - `cache`: Caching of segment translations
 */

// Re-export main types for easier usage
pub use self::cache::{CacheStats, TranslationCache};
pub use self::core::{PipelineOptions, TranslationOutcome, TranslationService};
pub use self::segmenter::{
    OversizedWordPolicy, Segmenter, SegmenterConfig, Segments, split_text_into_segments,
};

// Submodules
pub mod cache;
pub mod core;
pub mod segmenter;
