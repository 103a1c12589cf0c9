//! Text normalization shared by the classifier and the sentiment analyzer.
//!
//! Two passes are provided:
//!
//! - [`normalize`]: the aggressive pass feeding the statistical classifier.
//!   Lowercase, strip URLs, strip e-mail addresses, drop every character
//!   that is not an ASCII letter or whitespace, collapse whitespace, trim.
//! - [`clean`]: the light pass feeding sentiment analysis. Strips URLs and
//!   e-mail addresses and collapses whitespace, but keeps punctuation and
//!   letter case so exclamation marks and shouting can still be measured.
//!
//! Both are pure and total. `normalize` is idempotent.
//!
//! ```
//! use grievance::analysis::normalize::{clean, normalize};
//!
//! let text = "URGENT!!! See https://status.example.com or mail ops@example.com  now";
//! assert_eq!(normalize(text).as_str(), "urgent see or mail now");
//! assert_eq!(clean(text), "URGENT!!! See or mail now");
//! ```

use std::fmt;
use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};

use crate::analysis::char_filter::{
    CharFilter, CollapseWhitespaceCharFilter, PatternReplaceCharFilter,
};

const URL_PATTERN: &str = r"(?i)https?://\S+";
const EMAIL_PATTERN: &str = r"\S+@\S+";
const NON_LETTER_PATTERN: &str = r"[^a-z\s]";
const PUNCTUATION_PATTERN: &str = r"[[:punct:]]";

/// Lowercased, URL/e-mail-free, letters-and-single-spaces text.
///
/// Only produced by [`normalize`]; never mutated in place.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Space-separated terms of the normalized text.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|t| !t.is_empty())
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An ordered chain of char filters, optionally preceded by lowercasing.
#[derive(Clone)]
pub struct TextNormalizer {
    lowercase: bool,
    char_filters: Vec<Arc<dyn CharFilter>>,
}

impl TextNormalizer {
    /// Create an empty normalizer that leaves text untouched.
    pub fn new(lowercase: bool) -> Self {
        TextNormalizer {
            lowercase,
            char_filters: Vec::new(),
        }
    }

    /// Append a char filter to the chain.
    pub fn add_char_filter(mut self, char_filter: Arc<dyn CharFilter>) -> Self {
        self.char_filters.push(char_filter);
        self
    }

    /// The classifier pass.
    pub fn strict() -> Self {
        Self::new(true)
            .add_char_filter(Arc::new(pattern(URL_PATTERN)))
            .add_char_filter(Arc::new(pattern(EMAIL_PATTERN)))
            .add_char_filter(Arc::new(pattern(NON_LETTER_PATTERN)))
            .add_char_filter(Arc::new(CollapseWhitespaceCharFilter::new()))
    }

    /// The sentiment pass.
    pub fn light() -> Self {
        Self::new(false)
            .add_char_filter(Arc::new(pattern(URL_PATTERN)))
            .add_char_filter(Arc::new(pattern(EMAIL_PATTERN)))
            .add_char_filter(Arc::new(CollapseWhitespaceCharFilter::new()))
    }

    /// The statistics pass: like the classifier pass, but digits and
    /// non-ASCII letters survive and only ASCII punctuation is dropped.
    pub fn punctuation_free() -> Self {
        Self::new(true)
            .add_char_filter(Arc::new(pattern(URL_PATTERN)))
            .add_char_filter(Arc::new(pattern(EMAIL_PATTERN)))
            .add_char_filter(Arc::new(pattern(PUNCTUATION_PATTERN)))
            .add_char_filter(Arc::new(CollapseWhitespaceCharFilter::new()))
    }

    /// Run the chain over `text`, producing a fresh string.
    pub fn apply(&self, text: &str) -> String {
        let mut current = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        for char_filter in &self.char_filters {
            current = char_filter.filter(&current);
        }
        current
    }
}

impl fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextNormalizer")
            .field("lowercase", &self.lowercase)
            .field(
                "char_filters",
                &self
                    .char_filters
                    .iter()
                    .map(|f| f.name())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

// The patterns are compile-time constants covered by the tests below.
fn pattern(regex: &str) -> PatternReplaceCharFilter {
    PatternReplaceCharFilter::remove(regex).expect("built-in normalization pattern must compile")
}

static STRICT: LazyLock<TextNormalizer> = LazyLock::new(TextNormalizer::strict);
static LIGHT: LazyLock<TextNormalizer> = LazyLock::new(TextNormalizer::light);
static PUNCTUATION_FREE: LazyLock<TextNormalizer> =
    LazyLock::new(TextNormalizer::punctuation_free);

/// Normalize text for the statistical classifier and keyword extraction.
pub fn normalize(text: &str) -> NormalizedText {
    NormalizedText(STRICT.apply(text))
}

/// Light cleaning for sentiment analysis: URL/e-mail removal and whitespace collapsing.
pub fn clean(text: &str) -> String {
    LIGHT.apply(text)
}

/// Lowercased, URL/e-mail-free text without ASCII punctuation, for word statistics.
pub fn strip_punctuation(text: &str) -> String {
    PUNCTUATION_FREE.apply(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_steps() {
        let normalized = normalize("  My ORDER #4521 hasn't arrived...\n\tCall me!  ");
        assert_eq!(normalized.as_str(), "my order hasnt arrived call me");
    }

    #[test]
    fn test_normalize_strips_urls_and_emails() {
        let normalized = normalize("Site HTTPS://Shop.Example.com/cart down, write to help@shop.io");
        assert_eq!(normalized.as_str(), "site down write to");
    }

    #[test]
    fn test_normalize_drops_non_ascii_letters() {
        assert_eq!(normalize("café crème 100%").as_str(), "caf crme");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "",
            "   ",
            "Website is DOWN!!! see http://x.y/z",
            "İstanbul office; naïve résumé ~ 42 items",
            "a@b c@d e",
            "Mixed\u{00A0}spaces\u{2003}here",
        ];
        for sample in samples {
            let once = normalize(sample);
            let twice = normalize(once.as_str());
            assert_eq!(once, twice, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_normalize_empty() {
        assert!(normalize("").is_empty());
        assert!(normalize("!!! 123 ???").is_empty());
    }

    #[test]
    fn test_terms() {
        let normalized = normalize("Refund, please: NOW");
        let terms: Vec<&str> = normalized.terms().collect();
        assert_eq!(terms, vec!["refund", "please", "now"]);
    }

    #[test]
    fn test_clean_keeps_case_and_punctuation() {
        assert_eq!(
            clean("WHY is this   broken?!  mail me@home.org"),
            "WHY is this broken?! mail"
        );
    }

    #[test]
    fn test_strip_punctuation_keeps_digits() {
        assert_eq!(
            strip_punctuation("Order #4521 -- isn't here! (see x@y.z)"),
            "order 4521 isnt here see"
        );
    }

    #[test]
    fn test_normalizer_debug_lists_filters() {
        let debug = format!("{:?}", TextNormalizer::strict());
        assert!(debug.contains("pattern_replace"));
        assert!(debug.contains("collapse_whitespace"));
    }
}
