//! The complaint engine facade.
//!
//! [`ComplaintEngine`] owns the live model pair and everything needed to
//! serve predictions around it. It is always in one of two states:
//!
//! - [`EngineState::Untrained`]: every classification comes from the
//!   rule-based fallback
//! - [`EngineState::Trained`]: the statistical pair serves classifications,
//!   falling back to rules only when a prediction errors
//!
//! A new engine loads persisted artifacts if they are readable, and otherwise
//! bootstraps on the built-in seed examples. Once trained it never returns to
//! the untrained state.
//!
//! # Example
//!
//! ```
//! use grievance::classification::ClassificationSource;
//! use grievance::config::EngineConfig;
//! use grievance::engine::ComplaintEngine;
//!
//! let engine = ComplaintEngine::new(EngineConfig::default())?;
//! assert_eq!(engine.model_version(), Some(1));
//!
//! let result = engine.classify("I was charged twice for my subscription");
//! assert_eq!(result.source, ClassificationSource::Statistical);
//!
//! let sentiment = engine.analyze_sentiment("This is terrible, fix it now!!!");
//! assert!(sentiment.is_complaint);
//! # Ok::<(), grievance::error::GrievanceError>(())
//! ```

use std::sync::Arc;

use log::{debug, info, warn};
use parking_lot::{Mutex, RwLock};

use crate::analysis::analyzer::{Analyzer, KeywordAnalyzer};
use crate::analysis::statistics::{TextStatistics, TextValidation, validate_text};
use crate::classification::classifier::ComplaintClassifier;
use crate::classification::fallback::{RuleBasedClassifier, urgency_score};
use crate::classification::statistical::StatisticalClassifier;
use crate::classification::types::ClassificationResult;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::sentiment::analyzer::SentimentAnalyzer;
use crate::sentiment::scorer::SentimentScorer;
use crate::sentiment::types::{SentimentResult, SentimentSummary};
use crate::storage::file::FileStorage;
use crate::storage::memory::MemoryStorage;
use crate::storage::model_store::ModelStore;
use crate::storage::traits::{Storage, StorageConfig};
use crate::training::coordinator::{RetrainingCoordinator, TrainingReport};
use crate::training::example::{TrainingExample, seed_examples};

/// Version given to the pair fitted on the seed examples.
pub const BOOTSTRAP_VERSION: u64 = 1;

/// Readiness of the engine's statistical path.
#[derive(Debug, Clone, Default)]
pub enum EngineState {
    /// No model pair; rule-based results only.
    #[default]
    Untrained,
    /// A fitted pair is live.
    Trained { models: Arc<StatisticalClassifier> },
}

impl EngineState {
    pub fn is_trained(&self) -> bool {
        matches!(self, EngineState::Trained { .. })
    }

    /// Version of the live pair, if any.
    pub fn model_version(&self) -> Option<u64> {
        match self {
            EngineState::Untrained => None,
            EngineState::Trained { models } => Some(models.version()),
        }
    }
}

/// Shared, thread-safe complaint classification and sentiment engine.
///
/// Predictions take an `Arc` snapshot of the live pair under a brief read
/// lock. Retraining is serialized by its own mutex, fits and persists without
/// holding the state lock, then swaps the snapshot in under a write lock, so
/// predictions running during a retrain are served by the previous version.
pub struct ComplaintEngine {
    config: EngineConfig,
    state: RwLock<EngineState>,
    retrain_lock: Mutex<()>,
    store: ModelStore,
    coordinator: RetrainingCoordinator,
    rules: RuleBasedClassifier,
    sentiment: SentimentAnalyzer,
    keywords: KeywordAnalyzer,
}

impl std::fmt::Debug for ComplaintEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComplaintEngine")
            .field("config", &self.config)
            .field("model_version", &self.model_version())
            .field("sentiment", &self.sentiment)
            .finish()
    }
}

impl ComplaintEngine {
    /// Create an engine whose artifacts live in `config.model_dir`, or in
    /// memory when no directory is configured.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let storage: Arc<dyn Storage> = match &config.model_dir {
            Some(dir) => Arc::new(FileStorage::new(dir, StorageConfig::default())?),
            None => Arc::new(MemoryStorage::new()),
        };
        Self::with_storage(config, storage)
    }

    /// Create an engine on top of an explicit storage backend.
    pub fn with_storage(config: EngineConfig, storage: Arc<dyn Storage>) -> Result<Self> {
        Self::with_components(config, storage, SentimentAnalyzer::default())
    }

    /// Create an engine with a custom sentiment scorer.
    pub fn with_scorer(
        config: EngineConfig,
        storage: Arc<dyn Storage>,
        scorer: Arc<dyn SentimentScorer>,
    ) -> Result<Self> {
        Self::with_components(config, storage, SentimentAnalyzer::new(scorer))
    }

    fn with_components(
        config: EngineConfig,
        storage: Arc<dyn Storage>,
        sentiment: SentimentAnalyzer,
    ) -> Result<Self> {
        config.validate()?;

        let engine = ComplaintEngine {
            coordinator: RetrainingCoordinator::new(&config),
            config,
            state: RwLock::new(EngineState::Untrained),
            retrain_lock: Mutex::new(()),
            store: ModelStore::new(storage),
            rules: RuleBasedClassifier::new(),
            sentiment,
            keywords: KeywordAnalyzer::new(),
        };
        engine.initialize();
        Ok(engine)
    }

    fn initialize(&self) {
        match self.store.load_pair() {
            Ok(Some(models)) => {
                info!("loaded persisted model pair version {}", models.version());
                self.install(models);
                return;
            }
            Ok(None) => debug!("no persisted model pair found"),
            Err(e) => warn!("ignoring unreadable model artifacts: {e}"),
        }

        if self.config.bootstrap_on_start {
            self.bootstrap();
        } else {
            info!("bootstrap disabled; serving rule-based classifications");
        }
    }

    fn bootstrap(&self) {
        let seeds = seed_examples();
        match self.coordinator.fit_all(&seeds, BOOTSTRAP_VERSION) {
            Ok(models) => {
                if let Err(e) = self.store.save_pair(&models) {
                    warn!("bootstrap models could not be persisted: {e}");
                }
                info!(
                    "bootstrapped model pair version {BOOTSTRAP_VERSION} on {} seed examples",
                    seeds.len()
                );
                self.install(models);
            }
            Err(e) => warn!("bootstrap failed; serving rule-based classifications: {e}"),
        }
    }

    fn install(&self, models: StatisticalClassifier) {
        *self.state.write() = EngineState::Trained {
            models: Arc::new(models),
        };
    }

    fn snapshot(&self) -> Option<Arc<StatisticalClassifier>> {
        match &*self.state.read() {
            EngineState::Untrained => None,
            EngineState::Trained { models } => Some(Arc::clone(models)),
        }
    }

    /// Category, priority and confidence for a complaint. Never fails.
    pub fn classify(&self, text: &str) -> ClassificationResult {
        if let Some(models) = self.snapshot() {
            match models.classify(text) {
                Ok(result) => return result,
                Err(e) => warn!(
                    "{} classifier failed, using {}: {e}",
                    models.name(),
                    self.rules.name()
                ),
            }
        }
        self.rules.classify_text(text)
    }

    /// Sentiment, emotions and urgency of a text. Never fails.
    pub fn analyze_sentiment(&self, text: &str) -> SentimentResult {
        self.sentiment.analyze(text)
    }

    /// Analyze a batch of texts in parallel and aggregate the results.
    pub fn summarize<S>(&self, texts: &[S]) -> SentimentSummary
    where
        S: AsRef<str> + Sync,
    {
        self.sentiment.summarize(texts)
    }

    /// Refit both pipelines on `examples`, persist them and make them live.
    ///
    /// On failure the previously live pair, and its persisted artifacts,
    /// stay in place.
    pub fn retrain(&self, examples: &[TrainingExample]) -> Result<TrainingReport> {
        let _guard = self.retrain_lock.lock();
        let next_version = self.model_version().map_or(BOOTSTRAP_VERSION, |v| v + 1);

        let (models, report) = self.coordinator.retrain(examples, next_version, &self.store)?;
        self.install(models);
        info!("model pair version {next_version} is live");
        Ok(report)
    }

    /// The first ten normalized words longer than three characters.
    pub fn extract_keywords(&self, text: &str) -> Vec<String> {
        self.keywords.terms(text).unwrap_or_else(|e| {
            warn!("keyword extraction failed: {e}");
            Vec::new()
        })
    }

    /// Maximum urgency-keyword weight found in `text`.
    pub fn urgency_score(&self, text: &str) -> f64 {
        urgency_score(text)
    }

    pub fn text_statistics(&self, text: &str) -> TextStatistics {
        TextStatistics::compute(text)
    }

    pub fn validate_text(&self, text: &str) -> TextValidation {
        validate_text(text)
    }

    /// A copy of the current readiness state.
    pub fn state(&self) -> EngineState {
        self.state.read().clone()
    }

    pub fn is_trained(&self) -> bool {
        self.state.read().is_trained()
    }

    pub fn model_version(&self) -> Option<u64> {
        self.state.read().model_version()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn model_store(&self) -> &ModelStore {
        &self.store
    }
}
