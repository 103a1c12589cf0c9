//! Analyzer implementations that combine normalization, tokenization and filters.

mod analyzer;
mod keyword;
mod pipeline;
mod standard;

pub use analyzer::Analyzer;
pub use keyword::KeywordAnalyzer;
pub use pipeline::PipelineAnalyzer;
pub use standard::StandardAnalyzer;
