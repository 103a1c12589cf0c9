//! Text analysis: normalization, tokenization and token filtering.
//!
//! The classifier, the keyword extractor and the sentiment analyzer all read
//! text through this module so they agree on what a "word" is.

pub mod analyzer;
pub mod char_filter;
pub mod normalize;
pub mod statistics;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::{Analyzer, KeywordAnalyzer, PipelineAnalyzer, StandardAnalyzer};
pub use normalize::{NormalizedText, TextNormalizer, clean, normalize, strip_punctuation};
pub use statistics::{TextIssue, TextStatistics, TextValidation, validate_text};
pub use token::{Token, TokenStream};
