//! Complaint classifier trait definition.

use super::types::ClassificationResult;
use crate::error::Result;

/// Complaint classifier trait.
///
/// Implementations assign a category and a priority to a complaint text.
/// The engine tries a statistical implementation first and falls back to
/// the rule-based one when it errors.
pub trait ComplaintClassifier: Send + Sync {
    /// Classify a raw complaint text.
    fn classify(&self, text: &str) -> Result<ClassificationResult>;

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}
