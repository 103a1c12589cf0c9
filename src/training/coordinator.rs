//! Fit, evaluate and persist a new model pair.

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::example::TrainingExample;
use super::split::{accuracy, holdout_split};
use crate::analysis::normalize::{normalize, NormalizedText};
use crate::classification::pipeline::ClassifierPipeline;
use crate::classification::statistical::{
    StatisticalClassifier, CATEGORY_PIPELINE, PRIORITY_PIPELINE,
};
use crate::classification::types::{Category, PriorityLevel};
use crate::config::EngineConfig;
use crate::error::{GrievanceError, Result};
use crate::storage::model_store::ModelStore;

/// Outcome of a successful retrain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Exact-match accuracy of the category pipeline on the holdout.
    pub category_accuracy: f64,
    /// Exact-match accuracy of the priority pipeline on the holdout.
    pub priority_accuracy: f64,
    /// Number of examples supplied.
    pub sample_count: usize,
    pub train_size: usize,
    pub holdout_size: usize,
    /// Version the new pair was published under.
    pub model_version: u64,
    pub trained_at: DateTime<Utc>,
}

/// Builds model pairs from labeled examples.
///
/// The coordinator never touches live engine state: it returns a fully
/// fitted and persisted [`StatisticalClassifier`] for the caller to swap in.
#[derive(Debug, Clone)]
pub struct RetrainingCoordinator {
    category_max_features: usize,
    priority_max_features: usize,
    alpha: f64,
    holdout_fraction: f64,
    split_seed: u64,
}

impl RetrainingCoordinator {
    pub fn new(config: &EngineConfig) -> Self {
        RetrainingCoordinator {
            category_max_features: config.category_max_features,
            priority_max_features: config.priority_max_features,
            alpha: config.smoothing_alpha,
            holdout_fraction: config.holdout_fraction,
            split_seed: config.split_seed,
        }
    }

    /// Fit both pipelines on every example, without evaluation.
    pub fn fit_all(
        &self,
        examples: &[TrainingExample],
        version: u64,
    ) -> Result<StatisticalClassifier> {
        let normalized: Vec<NormalizedText> = examples.iter().map(|e| normalize(&e.text)).collect();
        let indices: Vec<usize> = (0..examples.len()).collect();
        self.fit_pair(examples, &normalized, &indices, version)
    }

    fn fit_pair(
        &self,
        examples: &[TrainingExample],
        normalized: &[NormalizedText],
        indices: &[usize],
        version: u64,
    ) -> Result<StatisticalClassifier> {
        let category_rows: Vec<(NormalizedText, Category)> = indices
            .iter()
            .map(|&i| (normalized[i].clone(), examples[i].category))
            .collect();
        let priority_rows: Vec<(NormalizedText, PriorityLevel)> = indices
            .iter()
            .map(|&i| (normalized[i].clone(), examples[i].priority))
            .collect();

        let mut category =
            ClassifierPipeline::new(CATEGORY_PIPELINE, self.category_max_features, self.alpha);
        let mut priority =
            ClassifierPipeline::new(PRIORITY_PIPELINE, self.priority_max_features, self.alpha);
        category.fit(&category_rows)?;
        priority.fit(&priority_rows)?;

        StatisticalClassifier::new(category, priority, version)
    }

    /// Split, fit on the train partition, evaluate on the holdout and persist.
    ///
    /// Fails with `InvalidInput` on an empty batch. Every other failure is
    /// reported as `TrainingFailed`; nothing is persisted unless both blobs
    /// commit.
    pub fn retrain(
        &self,
        examples: &[TrainingExample],
        version: u64,
        store: &ModelStore,
    ) -> Result<(StatisticalClassifier, TrainingReport)> {
        if examples.is_empty() {
            return Err(GrievanceError::invalid_input(
                "retraining requires at least one example",
            ));
        }

        self.fit_evaluate_persist(examples, version, store)
            .map_err(|e| {
                warn!("retraining to version {version} failed: {e}");
                match e {
                    GrievanceError::TrainingFailed { .. } => e,
                    other => GrievanceError::training_failed(other.to_string()),
                }
            })
    }

    fn fit_evaluate_persist(
        &self,
        examples: &[TrainingExample],
        version: u64,
        store: &ModelStore,
    ) -> Result<(StatisticalClassifier, TrainingReport)> {
        let split = holdout_split(examples.len(), self.holdout_fraction, self.split_seed);
        if split.train.is_empty() {
            return Err(GrievanceError::training_failed(format!(
                "{} example(s) leave nothing to train on after holding out {}",
                examples.len(),
                split.holdout.len()
            )));
        }

        let normalized: Vec<NormalizedText> = examples.iter().map(|e| normalize(&e.text)).collect();
        let classifier = self.fit_pair(examples, &normalized, &split.train, version)?;

        let mut predicted_categories = Vec::with_capacity(split.holdout.len());
        let mut predicted_priorities = Vec::with_capacity(split.holdout.len());
        for &i in &split.holdout {
            predicted_categories.push(classifier.category().classify(&normalized[i])?.0);
            predicted_priorities.push(classifier.priority().classify(&normalized[i])?.0);
        }
        let expected_categories: Vec<Category> =
            split.holdout.iter().map(|&i| examples[i].category).collect();
        let expected_priorities: Vec<PriorityLevel> =
            split.holdout.iter().map(|&i| examples[i].priority).collect();

        let report = TrainingReport {
            category_accuracy: accuracy(&predicted_categories, &expected_categories),
            priority_accuracy: accuracy(&predicted_priorities, &expected_priorities),
            sample_count: examples.len(),
            train_size: split.train.len(),
            holdout_size: split.holdout.len(),
            model_version: version,
            trained_at: Utc::now(),
        };

        store.save_pair(&classifier)?;

        info!(
            "trained model version {version} on {} of {} examples: category accuracy {:.3}, priority accuracy {:.3}",
            report.train_size,
            report.sample_count,
            report.category_accuracy,
            report.priority_accuracy
        );
        Ok((classifier, report))
    }
}
