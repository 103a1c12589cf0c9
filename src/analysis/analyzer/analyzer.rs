//! Core analyzer trait definition.
//!
//! ```text
//! Raw Text → Normalizer → Tokenizer → Filter 1 → … → Filter N → Token Stream
//! ```
//!
//! # Available Implementations
//!
//! - [`StandardAnalyzer`](super::StandardAnalyzer) - classifier terms (stop words removed)
//! - [`KeywordAnalyzer`](super::KeywordAnalyzer) - the first few meaningful words of a complaint
//! - [`PipelineAnalyzer`](super::PipelineAnalyzer) - custom normalizer + tokenizer + filter chains
//!
//! # Examples
//!
//! ```
//! use grievance::analysis::analyzer::{Analyzer, StandardAnalyzer};
//!
//! let analyzer = StandardAnalyzer::new();
//! let terms: Vec<String> = analyzer
//!     .analyze("The package was DAMAGED!")
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//!
//! assert_eq!(terms, vec!["package", "damaged"]);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// `Send + Sync` so a single analyzer can back a model shared across
/// concurrent classification calls.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and artifact metadata).
    fn name(&self) -> &'static str;

    /// Collect the surviving token texts.
    fn terms(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyze(text)?.map(|token| token.text).collect())
    }
}
