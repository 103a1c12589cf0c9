//! Pipeline analyzer: a normalizer, a tokenizer and an ordered filter chain.

use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::normalize::TextNormalizer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// An analyzer assembled from parts.
///
/// ```
/// use std::sync::Arc;
/// use grievance::analysis::analyzer::{Analyzer, PipelineAnalyzer};
/// use grievance::analysis::normalize::TextNormalizer;
/// use grievance::analysis::token_filter::LimitFilter;
/// use grievance::analysis::tokenizer::WhitespaceTokenizer;
///
/// let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
///     .with_normalizer(TextNormalizer::strict())
///     .add_filter(Arc::new(LimitFilter::new(2)));
///
/// assert_eq!(analyzer.terms("Late, LATE and late").unwrap(), vec!["late", "late"]);
/// ```
#[derive(Clone)]
pub struct PipelineAnalyzer {
    normalizer: Option<TextNormalizer>,
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
    name: String,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: format!("pipeline_{}", tokenizer.name()),
            normalizer: None,
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// Run `normalizer` over the raw text before tokenizing.
    pub fn with_normalizer(mut self, normalizer: TextNormalizer) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    /// Add a filter to the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set a custom name for this analyzer.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }

    pub fn pipeline_name(&self) -> &str {
        &self.name
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = match &self.normalizer {
            Some(normalizer) => self.tokenizer.tokenize(&normalizer.apply(text))?,
            None => self.tokenizer.tokenize(text)?,
        };

        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }

        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }
}

impl std::fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("name", &self.name)
            .field("normalizer", &self.normalizer)
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
