//! Complaint classification: category and priority prediction.
//!
//! Two classifiers implement [`ComplaintClassifier`]:
//!
//! - [`StatisticalClassifier`]: a pair of [`ClassifierPipeline`]s, each a
//!   [`TfIdfVectorizer`] feeding a [`MultinomialNaiveBayes`] model
//! - [`RuleBasedClassifier`]: keyword tiers for priority and
//!   [`KeywordCategoryClassifier`] for category, used when no trained pair is
//!   available or the statistical path errors
//!
//! # Example
//!
//! ```
//! use grievance::analysis::normalize::normalize;
//! use grievance::classification::{Category, ClassifierPipeline};
//!
//! let mut pipeline = ClassifierPipeline::new("category", 5000, 1.0);
//! pipeline.fit(&[
//!     (normalize("charged twice"), Category::Billing),
//!     (normalize("parcel never arrived"), Category::Delivery),
//! ])?;
//!
//! let (category, confidence) = pipeline.classify(&normalize("I was charged again"))?;
//! assert_eq!(category, Category::Billing);
//! assert!(confidence > 0.5);
//! # Ok::<(), grievance::error::GrievanceError>(())
//! ```

pub mod classifier;
pub mod fallback;
pub mod keyword_classifier;
pub mod naive_bayes;
pub mod pipeline;
pub mod statistical;
pub mod tfidf;
pub mod types;

pub use classifier::ComplaintClassifier;
pub use fallback::{fallback_category, fallback_priority, urgency_score, RuleBasedClassifier};
pub use keyword_classifier::KeywordCategoryClassifier;
pub use naive_bayes::MultinomialNaiveBayes;
pub use pipeline::{ClassifierPipeline, PipelineArtifact, Prediction};
pub use statistical::{StatisticalClassifier, CATEGORY_PIPELINE, PRIORITY_PIPELINE};
pub use tfidf::{SparseVector, TfIdfState, TfIdfVectorizer};
pub use types::{Category, ClassificationResult, ClassificationSource, Label, PriorityLevel};
