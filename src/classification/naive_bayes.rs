//! Multinomial naive Bayes over TF-IDF features.

use serde::{Deserialize, Serialize};

use super::tfidf::SparseVector;
use super::types::Label;
use crate::error::{GrievanceError, Result};

/// Multinomial naive Bayes classifier with additive smoothing.
///
/// Labels keep the order in which they were first seen during fitting. That
/// order is the order of every probability distribution this model returns,
/// and it decides ties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "L: Label")]
pub struct MultinomialNaiveBayes<L> {
    labels: Vec<L>,
    class_log_prior: Vec<f64>,
    /// `feature_log_prob[class][feature]`.
    feature_log_prob: Vec<Vec<f64>>,
    alpha: f64,
    n_features: usize,
}

impl<L: Label> MultinomialNaiveBayes<L> {
    /// Fit on feature vectors `samples` with matching `targets`.
    pub fn fit(
        samples: &[SparseVector],
        targets: &[L],
        n_features: usize,
        alpha: f64,
    ) -> Result<Self> {
        if samples.is_empty() {
            return Err(GrievanceError::invalid_input(
                "cannot fit naive Bayes on zero samples",
            ));
        }
        if samples.len() != targets.len() {
            return Err(GrievanceError::invalid_input(format!(
                "{} samples but {} targets",
                samples.len(),
                targets.len()
            )));
        }
        if !alpha.is_finite() || alpha <= 0.0 {
            return Err(GrievanceError::invalid_input(format!(
                "smoothing alpha must be positive, got {alpha}"
            )));
        }

        let mut labels: Vec<L> = Vec::new();
        let mut class_index: Vec<usize> = Vec::with_capacity(targets.len());
        for target in targets {
            let idx = match labels.iter().position(|l| l == target) {
                Some(idx) => idx,
                None => {
                    labels.push(target.clone());
                    labels.len() - 1
                }
            };
            class_index.push(idx);
        }

        let n_classes = labels.len();
        let mut class_count = vec![0usize; n_classes];
        let mut feature_count = vec![vec![0.0f64; n_features]; n_classes];

        for (sample, &class) in samples.iter().zip(&class_index) {
            class_count[class] += 1;
            for &(feature, weight) in sample {
                if feature >= n_features {
                    return Err(GrievanceError::invalid_input(format!(
                        "feature index {feature} out of range for {n_features} features"
                    )));
                }
                feature_count[class][feature] += weight;
            }
        }

        let n_samples = samples.len() as f64;
        let class_log_prior = class_count
            .iter()
            .map(|&count| (count as f64 / n_samples).ln())
            .collect();

        let feature_log_prob = feature_count
            .iter()
            .map(|counts| {
                let total = counts.iter().sum::<f64>() + alpha * n_features as f64;
                counts
                    .iter()
                    .map(|&count| ((count + alpha) / total).ln())
                    .collect()
            })
            .collect();

        Ok(Self {
            labels,
            class_log_prior,
            feature_log_prob,
            alpha,
            n_features,
        })
    }

    /// Posterior probability of every label, in label order. Sums to 1.
    pub fn predict_proba(&self, sample: &SparseVector) -> Vec<f64> {
        let joint: Vec<f64> = self
            .class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_probs)| {
                prior
                    + sample
                        .iter()
                        .filter(|(feature, _)| *feature < self.n_features)
                        .map(|&(feature, weight)| weight * log_probs[feature])
                        .sum::<f64>()
            })
            .collect();

        // log-sum-exp keeps the softmax finite for long documents
        let max = joint.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exp: Vec<f64> = joint.iter().map(|j| (j - max).exp()).collect();
        let sum: f64 = exp.iter().sum();
        exp.into_iter().map(|e| e / sum).collect()
    }

    /// Most probable label with its posterior; the earliest label wins ties.
    pub fn predict(&self, sample: &SparseVector) -> (L, f64) {
        let proba = self.predict_proba(sample);
        let mut best = 0;
        for (idx, &p) in proba.iter().enumerate() {
            if p > proba[best] {
                best = idx;
            }
        }
        (self.labels[best].clone(), proba[best])
    }

    /// Labels in first-seen order.
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Check the shape invariants of a deserialized model.
    pub(crate) fn validate(&self) -> Result<()> {
        let n_classes = self.labels.len();
        if n_classes == 0
            || self.class_log_prior.len() != n_classes
            || self.feature_log_prob.len() != n_classes
            || self
                .feature_log_prob
                .iter()
                .any(|row| row.len() != self.n_features)
        {
            return Err(GrievanceError::corrupt(
                "naive Bayes parameters have inconsistent shapes",
            ));
        }
        Ok(())
    }
}
