//! Keyword analyzer: the first meaningful words of a complaint.

use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::normalize::TextNormalizer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::length::MinLengthFilter;
use crate::analysis::token_filter::limit::LimitFilter;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::Result;

/// Words longer than three characters.
pub const DEFAULT_MIN_KEYWORD_CHARS: usize = 4;
/// How many keywords are kept.
pub const DEFAULT_MAX_KEYWORDS: usize = 10;

/// Normalized tokens longer than three characters, first ten, in text order.
///
/// No stop-word removal: the keyword list is a cheap, order-preserving
/// summary, not a feature vector.
pub struct KeywordAnalyzer {
    inner: PipelineAnalyzer,
}

impl KeywordAnalyzer {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MIN_KEYWORD_CHARS, DEFAULT_MAX_KEYWORDS)
    }

    pub fn with_limits(min_chars: usize, max_keywords: usize) -> Self {
        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .with_normalizer(TextNormalizer::strict())
            .add_filter(Arc::new(MinLengthFilter::new(min_chars)))
            .add_filter(Arc::new(LimitFilter::new(max_keywords)))
            .with_name("keyword");

        KeywordAnalyzer { inner: analyzer }
    }
}

impl Default for KeywordAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for KeywordAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}

impl std::fmt::Debug for KeywordAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}
