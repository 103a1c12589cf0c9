//! Trainable text classification pipeline: TF-IDF features feeding naive Bayes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::naive_bayes::MultinomialNaiveBayes;
use super::tfidf::{TfIdfState, TfIdfVectorizer};
use super::types::Label;
use crate::analysis::analyzer::{Analyzer, StandardAnalyzer};
use crate::analysis::normalize::NormalizedText;
use crate::error::{GrievanceError, Result};

/// Output of [`ClassifierPipeline::predict`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "L: Label")]
pub struct Prediction<L> {
    /// Arg-max label.
    pub label: L,
    /// Posterior of `label`.
    pub confidence: f64,
    /// Every known label with its posterior, in the pipeline's label order.
    pub distribution: Vec<(L, f64)>,
}

/// Persistable state of a fitted pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "L: Label")]
pub struct PipelineArtifact<L> {
    pub name: String,
    /// Name of the analyzer the vocabulary was built with.
    pub analyzer: String,
    pub vectorizer: TfIdfState,
    pub model: MultinomialNaiveBayes<L>,
}

struct FittedPipeline<L> {
    vectorizer: TfIdfVectorizer,
    model: MultinomialNaiveBayes<L>,
}

/// A named, independently parameterized label predictor.
///
/// One instance predicts [`Category`](super::Category), another
/// [`PriorityLevel`](super::PriorityLevel). Both share the same analyzer so
/// they see the same term universe.
pub struct ClassifierPipeline<L> {
    name: String,
    max_features: usize,
    alpha: f64,
    analyzer: Arc<dyn Analyzer>,
    fitted: Option<FittedPipeline<L>>,
}

impl<L> std::fmt::Debug for ClassifierPipeline<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierPipeline")
            .field("name", &self.name)
            .field("max_features", &self.max_features)
            .field("alpha", &self.alpha)
            .field("analyzer", &self.analyzer.name())
            .field("fitted", &self.fitted.is_some())
            .finish()
    }
}

impl<L: Label> ClassifierPipeline<L> {
    /// Create an unfitted pipeline using the standard analyzer.
    pub fn new(name: impl Into<String>, max_features: usize, alpha: f64) -> Self {
        Self::with_analyzer(name, max_features, alpha, Arc::new(StandardAnalyzer::new()))
    }

    pub fn with_analyzer(
        name: impl Into<String>,
        max_features: usize,
        alpha: f64,
        analyzer: Arc<dyn Analyzer>,
    ) -> Self {
        ClassifierPipeline {
            name: name.into(),
            max_features,
            alpha,
            analyzer,
            fitted: None,
        }
    }

    /// Fit on labeled examples, replacing any previous fit.
    ///
    /// On error the pipeline keeps whatever state it had before the call.
    pub fn fit(&mut self, examples: &[(NormalizedText, L)]) -> Result<()> {
        if examples.is_empty() {
            return Err(GrievanceError::invalid_input(format!(
                "pipeline {:?} cannot be fitted on zero examples",
                self.name
            )));
        }

        let documents: Vec<String> = examples
            .iter()
            .map(|(text, _)| text.as_str().to_string())
            .collect();
        let targets: Vec<L> = examples.iter().map(|(_, label)| label.clone()).collect();

        let mut vectorizer = TfIdfVectorizer::new(self.analyzer.clone(), self.max_features);
        let features = vectorizer.fit_transform(&documents)?;
        let model = MultinomialNaiveBayes::fit(
            &features,
            &targets,
            vectorizer.vocabulary_size(),
            self.alpha,
        )?;

        log::debug!(
            "fitted pipeline {:?}: {} examples, {} terms, {} labels",
            self.name,
            examples.len(),
            vectorizer.vocabulary_size(),
            model.labels().len()
        );

        self.fitted = Some(FittedPipeline { vectorizer, model });
        Ok(())
    }

    /// Predict a label and the full posterior distribution.
    pub fn predict(&self, text: &NormalizedText) -> Result<Prediction<L>> {
        let fitted = self.fitted.as_ref().ok_or_else(|| {
            GrievanceError::untrained(format!("pipeline {:?} has not been fitted", self.name))
        })?;

        let features = fitted.vectorizer.transform(text.as_str())?;
        let proba = fitted.model.predict_proba(&features);
        let (label, confidence) = fitted.model.predict(&features);

        Ok(Prediction {
            label,
            confidence,
            distribution: fitted
                .model
                .labels()
                .iter()
                .cloned()
                .zip(proba)
                .collect(),
        })
    }

    /// Arg-max label and its posterior.
    pub fn classify(&self, text: &NormalizedText) -> Result<(L, f64)> {
        let fitted = self.fitted.as_ref().ok_or_else(|| {
            GrievanceError::untrained(format!("pipeline {:?} has not been fitted", self.name))
        })?;
        let features = fitted.vectorizer.transform(text.as_str())?;
        Ok(fitted.model.predict(&features))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Labels in the pipeline's stable order; empty until fitted.
    pub fn labels(&self) -> &[L] {
        self.fitted
            .as_ref()
            .map(|f| f.model.labels())
            .unwrap_or(&[])
    }

    pub fn vocabulary_size(&self) -> usize {
        self.fitted
            .as_ref()
            .map(|f| f.vectorizer.vocabulary_size())
            .unwrap_or(0)
    }

    /// Snapshot the fitted state for persistence.
    pub fn to_artifact(&self) -> Result<PipelineArtifact<L>> {
        let fitted = self.fitted.as_ref().ok_or_else(|| {
            GrievanceError::untrained(format!("pipeline {:?} has not been fitted", self.name))
        })?;
        Ok(PipelineArtifact {
            name: self.name.clone(),
            analyzer: self.analyzer.name().to_string(),
            vectorizer: fitted.vectorizer.state().clone(),
            model: fitted.model.clone(),
        })
    }

    /// Rebuild a fitted pipeline from a persisted artifact.
    pub fn from_artifact(artifact: PipelineArtifact<L>) -> Result<Self> {
        let analyzer = analyzer_by_name(&artifact.analyzer)?;
        artifact.model.validate()?;
        if artifact.model.n_features() != artifact.vectorizer.terms.len() {
            return Err(GrievanceError::corrupt(format!(
                "pipeline {:?}: model expects {} features, vocabulary has {}",
                artifact.name,
                artifact.model.n_features(),
                artifact.vectorizer.terms.len()
            )));
        }

        let max_features = artifact.vectorizer.max_features;
        let alpha = artifact.model.alpha();
        let vectorizer = TfIdfVectorizer::from_state(artifact.vectorizer, analyzer.clone())?;

        Ok(ClassifierPipeline {
            name: artifact.name,
            max_features,
            alpha,
            analyzer,
            fitted: Some(FittedPipeline {
                vectorizer,
                model: artifact.model,
            }),
        })
    }
}

/// Analyzers a persisted artifact may name.
fn analyzer_by_name(name: &str) -> Result<Arc<dyn Analyzer>> {
    match name {
        "standard" => Ok(Arc::new(StandardAnalyzer::new())),
        other => Err(GrievanceError::corrupt(format!(
            "artifact references unknown analyzer {other:?}"
        ))),
    }
}
