/*!
 * Sentence-aware text segmentation.
 *
 * Long text is cut into segments no longer than a configured number of
 * characters so each one fits in a single translation request. Breaks are
 * taken at sentence boundaries (terminator punctuation followed by
 * whitespace) where possible, and between words when a single sentence is
 * too long on its own.
 *
 * Lengths are counted in `char`s, not bytes.
 */

use std::collections::VecDeque;
use std::str::SplitWhitespace;

use log::{trace, warn};
use once_cell::sync::Lazy;
use regex::{Matches, Regex};
use serde::{Deserialize, Serialize};

/// Default maximum segment length in characters
pub const DEFAULT_MAX_CHARS: usize = 450;

/// Default sentence terminators
pub const DEFAULT_TERMINATORS: &str = ".!?";

/// Boundary pattern for the default terminator set
static DEFAULT_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.!?]\s+").unwrap()
});

/// What to do with a single word longer than the segment limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OversizedWordPolicy {
    /// Emit the word unchanged as its own segment
    #[default]
    Keep,
    /// Cut the word into pieces of at most the segment limit
    Split,
}

/// Segmentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// Maximum characters per segment
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,

    /// Characters that end a sentence when followed by whitespace
    #[serde(default = "default_terminators")]
    pub sentence_terminators: String,

    /// Handling of words longer than `max_chars`
    #[serde(default)]
    pub oversized_word_policy: OversizedWordPolicy,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            sentence_terminators: DEFAULT_TERMINATORS.to_string(),
            oversized_word_policy: OversizedWordPolicy::default(),
        }
    }
}

fn default_max_chars() -> usize {
    DEFAULT_MAX_CHARS
}

fn default_terminators() -> String {
    DEFAULT_TERMINATORS.to_string()
}

/// Splits text into bounded-length segments
#[derive(Debug, Clone)]
pub struct Segmenter {
    max_chars: usize,
    boundary: Regex,
    policy: OversizedWordPolicy,
}

impl Segmenter {
    /// Create a segmenter from its configuration
    ///
    /// A zero `max_chars` is raised to 1. An empty terminator set falls back
    /// to the default `.!?`.
    pub fn new(config: &SegmenterConfig) -> Self {
        Self {
            max_chars: config.max_chars.max(1),
            boundary: boundary_regex(&config.sentence_terminators),
            policy: config.oversized_word_policy,
        }
    }

    /// Create a segmenter with default terminators and the given limit
    pub fn with_max_chars(max_chars: usize) -> Self {
        Self::new(&SegmenterConfig {
            max_chars,
            ..SegmenterConfig::default()
        })
    }

    /// Maximum characters per segment
    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Whether the text fits in a single segment as is
    pub fn fits(&self, text: &str) -> bool {
        text.chars().count() <= self.max_chars
    }

    /// Lazily iterate over the segments of `text`
    pub fn segments<'a>(&'a self, text: &'a str) -> Segments<'a> {
        Segments {
            tokens: Tokens {
                text,
                matches: self.boundary.find_iter(text),
                pos: 0,
                pending_gap: None,
                finished: false,
            },
            words: None,
            buffer: String::new(),
            buffer_chars: 0,
            ready: VecDeque::new(),
            max_chars: self.max_chars,
            policy: self.policy,
            exhausted: false,
        }
    }

    /// Collect all segments of `text`
    pub fn split(&self, text: &str) -> Vec<String> {
        self.segments(text).collect()
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(&SegmenterConfig::default())
    }
}

/// Split text with the default terminators and the given limit
pub fn split_text_into_segments(text: &str, max_chars: usize) -> Vec<String> {
    Segmenter::with_max_chars(max_chars).split(text)
}

fn boundary_regex(terminators: &str) -> Regex {
    if terminators.is_empty() || terminators == DEFAULT_TERMINATORS {
        return DEFAULT_BOUNDARY.clone();
    }

    let class: String = terminators
        .chars()
        .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
        .collect();

    match Regex::new(&format!(r"[{}]\s+", class)) {
        Ok(regex) => regex,
        Err(e) => {
            warn!("Unusable sentence terminators {:?} ({}), using defaults", terminators, e);
            DEFAULT_BOUNDARY.clone()
        }
    }
}

/// A piece of input between boundaries
#[derive(Debug, Clone, Copy, PartialEq)]
enum Token<'a> {
    /// Sentence text including its terminator
    Sentence(&'a str),
    /// Whitespace following a terminator
    Gap(&'a str),
}

/// Splits text into alternating sentence and gap tokens
struct Tokens<'a> {
    text: &'a str,
    matches: Matches<'a, 'a>,
    pos: usize,
    pending_gap: Option<&'a str>,
    finished: bool,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(gap) = self.pending_gap.take() {
            return Some(Token::Gap(gap));
        }
        if self.finished {
            return None;
        }

        match self.matches.next() {
            Some(m) => {
                // The character class matches exactly one terminator
                let terminator_len = m.as_str().chars().next().map_or(0, char::len_utf8);
                let split_at = m.start() + terminator_len;
                let sentence = &self.text[self.pos..split_at];
                self.pending_gap = Some(&self.text[split_at..m.end()]);
                self.pos = m.end();
                Some(Token::Sentence(sentence))
            }
            None => {
                self.finished = true;
                let rest = &self.text[self.pos..];
                if rest.is_empty() {
                    None
                } else {
                    Some(Token::Sentence(rest))
                }
            }
        }
    }
}

/// Lazy iterator over the segments of a text
///
/// Every yielded segment is trimmed and non-empty.
pub struct Segments<'a> {
    tokens: Tokens<'a>,
    words: Option<SplitWhitespace<'a>>,
    buffer: String,
    buffer_chars: usize,
    ready: VecDeque<String>,
    max_chars: usize,
    policy: OversizedWordPolicy,
    exhausted: bool,
}

impl<'a> Segments<'a> {
    fn advance(&mut self) {
        match self.words.as_mut().map(|words| words.next()) {
            Some(Some(word)) => {
                self.push_word(word);
                return;
            }
            Some(None) => self.words = None,
            None => {}
        }

        match self.tokens.next() {
            Some(Token::Sentence(sentence)) => self.push_sentence(sentence),
            Some(Token::Gap(gap)) => self.push_gap(gap),
            None => {
                self.flush();
                self.exhausted = true;
            }
        }
    }

    fn push_sentence(&mut self, sentence: &'a str) {
        let sentence = if self.buffer.is_empty() {
            sentence.trim_start()
        } else {
            sentence
        };
        if sentence.is_empty() {
            return;
        }

        let len = sentence.chars().count();
        if self.buffer_chars + len <= self.max_chars {
            self.append(sentence, len);
            return;
        }

        self.flush();
        if len > self.max_chars {
            trace!("Sentence of {} chars exceeds {}, splitting by words", len, self.max_chars);
            self.words = Some(sentence.split_whitespace());
        } else {
            self.append(sentence, len);
        }
    }

    fn push_gap(&mut self, gap: &str) {
        if self.buffer.is_empty() {
            return;
        }

        let len = gap.chars().count();
        if self.buffer_chars + len <= self.max_chars {
            self.append(gap, len);
        } else {
            self.flush();
        }
    }

    fn push_word(&mut self, word: &str) {
        let len = word.chars().count();
        let needed = if self.buffer_chars == 0 {
            len
        } else {
            self.buffer_chars + 1 + len
        };

        if needed <= self.max_chars {
            if self.buffer_chars > 0 {
                self.append(" ", 1);
            }
            self.append(word, len);
            return;
        }

        self.flush();
        if len <= self.max_chars {
            self.append(word, len);
            return;
        }

        match self.policy {
            OversizedWordPolicy::Keep => {
                warn!(
                    "Word of {} chars exceeds the {} char segment limit, emitting it whole",
                    len, self.max_chars
                );
                self.ready.push_back(word.to_string());
            }
            OversizedWordPolicy::Split => {
                let mut piece = String::new();
                let mut piece_chars = 0;
                for c in word.chars() {
                    if piece_chars == self.max_chars {
                        self.ready.push_back(std::mem::take(&mut piece));
                        piece_chars = 0;
                    }
                    piece.push(c);
                    piece_chars += 1;
                }
                if !piece.is_empty() {
                    self.ready.push_back(piece);
                }
            }
        }
    }

    fn append(&mut self, text: &str, len: usize) {
        self.buffer.push_str(text);
        self.buffer_chars += len;
    }

    fn flush(&mut self) {
        let trimmed = self.buffer.trim();
        if !trimmed.is_empty() {
            self.ready.push_back(trimmed.to_string());
        }
        self.buffer.clear();
        self.buffer_chars = 0;
    }
}

impl Iterator for Segments<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(segment) = self.ready.pop_front() {
                return Some(segment);
            }
            if self.exhausted {
                return None;
            }
            self.advance();
        }
    }
}
