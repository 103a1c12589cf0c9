//! # Grievance
//!
//! Complaint classification and sentiment analysis for Rust.
//!
//! ## Features
//!
//! - TF-IDF + multinomial naive Bayes category and priority classifiers
//! - Deterministic keyword fallback when no model is available
//! - Hybrid lexicon/statistical sentiment, emotion and urgency analysis
//! - Reproducible retraining with holdout evaluation
//! - Checksummed model artifacts with staged, all-or-nothing commits
//! - Pluggable storage backends

pub mod analysis;
pub mod classification;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod lexicon;
pub mod sentiment;
pub mod storage;
pub mod training;

pub mod prelude {
    pub use crate::classification::{
        Category, ClassificationResult, ClassificationSource, PriorityLevel,
    };
    pub use crate::config::EngineConfig;
    pub use crate::engine::{ComplaintEngine, EngineState};
    pub use crate::error::{GrievanceError, Result};
    pub use crate::sentiment::{Emotion, SentimentLabel, SentimentResult, SentimentSummary};
    pub use crate::training::{TrainingExample, TrainingReport};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
