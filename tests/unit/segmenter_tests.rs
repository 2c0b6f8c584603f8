/*!
 * Tests for text segmentation through the public API
 */

use chunkwise::translation::segmenter::{DEFAULT_MAX_CHARS, OversizedWordPolicy};
use chunkwise::translation::{Segmenter, SegmenterConfig, split_text_into_segments};

use crate::common;

fn words_of(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

fn assert_preserves_words(text: &str, segments: &[String]) {
    let joined = segments.join(" ");
    assert_eq!(words_of(text), words_of(&joined), "word sequence changed");
}

/// Test that a 1000-char text of 20 sentences becomes at least 3 segments
#[test]
fn test_split_withTwentySentences_shouldProduceBoundedSegments() {
    let text = common::sentences(20, 50);
    assert!(text.chars().count() >= 1000);

    let segments = split_text_into_segments(&text, DEFAULT_MAX_CHARS);

    assert!(segments.len() >= 3, "got {} segments", segments.len());
    for segment in &segments {
        assert!(segment.chars().count() <= DEFAULT_MAX_CHARS);
        // Packing is sentence-aligned: every segment ends at a terminator
        assert!(segment.ends_with('.'), "segment not sentence aligned: {:?}", segment);
    }
    assert_preserves_words(&text, &segments);
}

/// Test that a 600-char run-on sentence is split at word boundaries
#[test]
fn test_split_withRunOnSentence_shouldFallBackToWords() {
    let text = vec!["wordy"; 100].join(" ");
    assert_eq!(text.chars().count(), 599);

    let segments = split_text_into_segments(&text, 450);

    assert_eq!(segments.len(), 2);
    assert!(segments.iter().all(|s| s.chars().count() <= 450));
    assert_preserves_words(&text, &segments);
}

/// Test that segments are trimmed and never empty
#[test]
fn test_split_withMessyWhitespace_shouldYieldTrimmedNonEmptySegments() {
    let text = "  First line here.\n\n   Second line follows!\t\tThird one?   \n";
    let segments = split_text_into_segments(text, 20);

    assert!(!segments.is_empty());
    for segment in &segments {
        assert!(!segment.is_empty());
        assert_eq!(segment, segment.trim());
        assert!(segment.chars().count() <= 20);
    }
    assert_preserves_words(text, &segments);
}

/// Test that whitespace-only input yields nothing
#[test]
fn test_split_withWhitespaceOnly_shouldYieldNoSegments() {
    assert!(split_text_into_segments("   \n\t  ", 10).is_empty());
    assert!(split_text_into_segments("", 10).is_empty());
}

/// Test that a terminator without trailing whitespace is not a boundary
#[test]
fn test_split_withDecimalNumber_shouldNotBreakInsideIt() {
    let text = "Pi is 3.14159 roughly. That is all.";
    let segments = split_text_into_segments(text, 25);

    assert_eq!(segments, vec!["Pi is 3.14159 roughly.", "That is all."]);
}

/// Test the word-boundary limit across many lengths
#[test]
fn test_split_withVaryingLimits_shouldNeverExceedLimitExceptLongWords() {
    let text = "The quick brown fox jumps over the lazy dog. \
                Pack my box with five dozen liquor jugs! \
                How vexingly quick daft zebras jump? \
                Sphinx of black quartz, judge my vow.";

    for limit in [8, 12, 20, 33, 50, 100, 1000] {
        let segments = split_text_into_segments(text, limit);
        for segment in &segments {
            let len = segment.chars().count();
            let single_word = !segment.contains(' ');
            assert!(len <= limit || single_word, "limit {}: {:?}", limit, segment);
        }
        assert_preserves_words(text, &segments);
    }
}

/// Test that the split policy keeps every segment within the limit
#[test]
fn test_split_withSplitPolicy_shouldCutLongWords() {
    let segmenter = Segmenter::new(&SegmenterConfig {
        max_chars: 10,
        oversized_word_policy: OversizedWordPolicy::Split,
        ..SegmenterConfig::default()
    });
    let text = "short Supercalifragilisticexpialidocious end.";

    let segments = segmenter.split(text);

    assert!(segments.iter().all(|s| s.chars().count() <= 10));
    assert_eq!(segments.concat().replace(' ', ""), text.replace(' ', ""));
}

/// Test that the keep policy emits a long word whole
#[test]
fn test_split_withKeepPolicy_shouldEmitLongWordWhole() {
    let segments = split_text_into_segments("tiny Supercalifragilisticexpialidocious tiny", 10);

    assert_eq!(
        segments,
        vec!["tiny", "Supercalifragilisticexpialidocious", "tiny"]
    );
}

/// Test custom terminators, including the Devanagari danda
#[test]
fn test_split_withCustomTerminators_shouldBreakOnThem() {
    let segmenter = Segmenter::new(&SegmenterConfig {
        max_chars: 15,
        sentence_terminators: ".।".to_string(),
        ..SegmenterConfig::default()
    });
    let text = "नमस्ते दुनिया। आप कैसे हैं।";

    let segments = segmenter.split(text);

    assert_eq!(segments, vec!["नमस्ते दुनिया।", "आप कैसे हैं।"]);
}

/// Test that regex metacharacters are usable as terminators
#[test]
fn test_split_withMetacharacterTerminators_shouldEscapeThem() {
    let segmenter = Segmenter::new(&SegmenterConfig {
        max_chars: 10,
        sentence_terminators: "]^-".to_string(),
        ..SegmenterConfig::default()
    });

    let segments = segmenter.split("one two] three^ four-");

    assert_eq!(segments, vec!["one two]", "three^", "four-"]);
}

/// Test that short text passes through as one segment
#[test]
fn test_fits_withShortText_shouldBeTrue() {
    let segmenter = Segmenter::default();
    assert!(segmenter.fits("Hello world!"));
    assert_eq!(segmenter.split("Hello world!"), vec!["Hello world!"]);
    assert!(!segmenter.fits(&"a".repeat(DEFAULT_MAX_CHARS + 1)));
}
