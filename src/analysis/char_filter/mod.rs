//! Char filters that rewrite the raw text string before tokenization.
//!
//! The normalizers in [`crate::analysis::normalize`] are built from these:
//! URL and e-mail stripping, character-class deletion, whitespace collapsing.

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text, returning a fresh string.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod pattern_replace;
pub mod whitespace;

pub use pattern_replace::PatternReplaceCharFilter;
pub use whitespace::CollapseWhitespaceCharFilter;
