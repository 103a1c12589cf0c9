//! TF-IDF vectorizer for text feature extraction.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::error::{GrievanceError, Result};

/// Sparse feature vector: `(feature index, weight)` pairs sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

/// Fitted vectorizer state, free of the analyzer so it can be persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfIdfState {
    /// Vocabulary terms; a term's position is its feature index.
    pub terms: Vec<String>,
    /// Inverse document frequency for each term.
    pub idf: Vec<f64>,
    /// Number of documents seen during fitting.
    pub n_documents: usize,
    /// Vocabulary cap the state was fitted with.
    pub max_features: usize,
}

/// TF-IDF vectorizer with a bounded vocabulary.
///
/// Term weights are raw counts times smoothed IDF,
/// `ln((1 + N) / (1 + df)) + 1`, and each document vector is L2-normalized.
/// When the corpus has more distinct terms than `max_features`, the most
/// frequent terms across the corpus are kept (ties broken alphabetically).
pub struct TfIdfVectorizer {
    /// Vocabulary: word -> index mapping.
    vocabulary: HashMap<String, usize>,
    state: TfIdfState,
    /// Analyzer for tokenization.
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("max_features", &self.state.max_features)
            .field("n_documents", &self.state.n_documents)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Create a new, unfitted vectorizer.
    pub fn new(analyzer: Arc<dyn Analyzer>, max_features: usize) -> Self {
        Self {
            vocabulary: HashMap::new(),
            state: TfIdfState {
                terms: Vec::new(),
                idf: Vec::new(),
                n_documents: 0,
                max_features,
            },
            analyzer,
        }
    }

    /// Rebuild a fitted vectorizer from persisted state.
    pub fn from_state(state: TfIdfState, analyzer: Arc<dyn Analyzer>) -> Result<Self> {
        if state.terms.len() != state.idf.len() {
            return Err(GrievanceError::corrupt(format!(
                "vectorizer has {} terms but {} idf weights",
                state.terms.len(),
                state.idf.len()
            )));
        }
        let vocabulary = state
            .terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect::<HashMap<_, _>>();
        if vocabulary.len() != state.terms.len() {
            return Err(GrievanceError::corrupt("vectorizer vocabulary has duplicate terms"));
        }

        Ok(Self {
            vocabulary,
            state,
            analyzer,
        })
    }

    /// Fit on `documents` and return their feature vectors.
    pub fn fit_transform(&mut self, documents: &[String]) -> Result<Vec<SparseVector>> {
        if documents.is_empty() {
            return Err(GrievanceError::invalid_input(
                "cannot fit a vectorizer on zero documents",
            ));
        }

        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| self.analyzer.terms(doc))
            .collect::<Result<_>>()?;

        let mut document_frequency: HashMap<&str, usize> = HashMap::new();
        let mut corpus_frequency: HashMap<&str, usize> = HashMap::new();

        for tokens in &tokenized {
            let unique_tokens: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for token in unique_tokens {
                *document_frequency.entry(token).or_insert(0) += 1;
            }
            for token in tokens {
                *corpus_frequency.entry(token.as_str()).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(&str, usize)> = corpus_frequency.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.state.max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(t, _)| t.to_string()).collect();
        terms.sort();

        let n_documents = documents.len();
        let idf = terms
            .iter()
            .map(|term| {
                let df = document_frequency.get(term.as_str()).copied().unwrap_or(0);
                ((n_documents as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0
            })
            .collect();

        self.vocabulary = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();
        self.state = TfIdfState {
            terms,
            idf,
            n_documents,
            max_features: self.state.max_features,
        };

        Ok(tokenized
            .iter()
            .map(|tokens| self.weigh(tokens))
            .collect())
    }

    /// Transform a document into a TF-IDF feature vector.
    pub fn transform(&self, document: &str) -> Result<SparseVector> {
        let tokens = self.analyzer.terms(document)?;
        Ok(self.weigh(&tokens))
    }

    fn weigh(&self, tokens: &[String]) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(idx, count)| (idx, count * self.state.idf[idx]))
            .collect();

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut vector {
                *weight /= norm;
            }
        }
        vector
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.state.terms.len()
    }

    pub fn is_fitted(&self) -> bool {
        self.state.n_documents > 0
    }

    pub fn state(&self) -> &TfIdfState {
        &self.state
    }

    pub fn analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.analyzer
    }
}
