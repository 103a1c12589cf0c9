//! Deterministic rule-based classification.
//!
//! Used whenever the statistical pipelines are unavailable or fail. Priority
//! and urgency are substring scans over the raw lowercased text, so phrases
//! such as "not working" still match; category comes from
//! [`KeywordCategoryClassifier`].

use super::classifier::ComplaintClassifier;
use super::keyword_classifier::KeywordCategoryClassifier;
use super::types::{Category, ClassificationResult, PriorityLevel};
use crate::error::Result;
use crate::lexicon::lexicon;

/// Keyword-tier priority: the first tier (Critical, High, Medium) with a
/// matching keyword wins, otherwise `Low`.
pub fn fallback_priority(text: &str) -> PriorityLevel {
    let lowered = text.to_lowercase();
    lexicon()
        .priority_tiers()
        .iter()
        .find(|(_, words)| words.iter().any(|w| lowered.contains(w)))
        .map(|(level, _)| *level)
        .unwrap_or(PriorityLevel::Low)
}

/// Keyword category, `GeneralInquiry` when nothing matches.
pub fn fallback_category(text: &str) -> Category {
    // The standard analyzer cannot fail on in-memory text.
    KeywordCategoryClassifier::default()
        .predict(text)
        .unwrap_or(Category::GeneralInquiry)
}

/// Maximum weight among the urgency keywords found in `text`, 0.0 if none.
pub fn urgency_score(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    lexicon()
        .urgency_weights()
        .iter()
        .filter(|(word, _)| lowered.contains(word))
        .map(|(_, weight)| *weight)
        .fold(0.0, f64::max)
}

/// Rule-based complaint classifier. Never fails.
#[derive(Debug, Default)]
pub struct RuleBasedClassifier {
    categories: KeywordCategoryClassifier,
}

impl RuleBasedClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Infallible form of [`ComplaintClassifier::classify`].
    pub fn classify_text(&self, text: &str) -> ClassificationResult {
        let category = self
            .categories
            .predict(text)
            .unwrap_or(Category::GeneralInquiry);
        ClassificationResult::rule_based(category, fallback_priority(text))
    }
}

impl ComplaintClassifier for RuleBasedClassifier {
    fn classify(&self, text: &str) -> Result<ClassificationResult> {
        Ok(self.classify_text(text))
    }

    fn name(&self) -> &str {
        "rule_based"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::types::ClassificationSource;

    #[test]
    fn test_priority_scenarios() {
        assert_eq!(
            fallback_priority("System is completely down and broken"),
            PriorityLevel::Critical
        );
        assert_eq!(
            fallback_priority("My bill was wrongly charged"),
            PriorityLevel::High
        );
        assert_eq!(
            fallback_priority("Please tell me about your hours"),
            PriorityLevel::Low
        );
        assert_eq!(
            fallback_priority("Delivery is running LATE"),
            PriorityLevel::Medium
        );
    }

    #[test]
    fn test_first_tier_wins() {
        // "payment" is High, "urgent" is Critical
        assert_eq!(
            fallback_priority("payment failed, urgent"),
            PriorityLevel::Critical
        );
        assert_eq!(fallback_priority("app not working"), PriorityLevel::Critical);
    }

    #[test]
    fn test_priority_is_pure() {
        for text in ["", "!!!", "wrong item", "slow site", "EMERGENCY"] {
            assert_eq!(fallback_priority(text), fallback_priority(text));
        }
        assert_eq!(fallback_priority(""), PriorityLevel::Low);
    }

    #[test]
    fn test_urgency_score() {
        assert_eq!(urgency_score(""), 0.0);
        assert_eq!(urgency_score("emergency"), 1.0);
        assert!(urgency_score("no issue at all") >= 0.3);
        assert_eq!(urgency_score("URGENT: printer down"), 0.9);
        assert_eq!(urgency_score("checkout not working"), 0.7);
        assert_eq!(urgency_score("just a question"), 0.0);
    }

    #[test]
    fn test_rule_based_classifier() {
        let classifier = RuleBasedClassifier::new();
        let result = classifier.classify("Charged twice on my bill").unwrap();
        assert_eq!(result.category, Category::Billing);
        assert_eq!(result.priority_level, PriorityLevel::High);
        assert_eq!(result.confidence, ClassificationResult::RULE_BASED_CONFIDENCE);
        assert_eq!(result.source, ClassificationSource::RuleBased);
        assert_eq!(classifier.name(), "rule_based");
    }

    #[test]
    fn test_fallback_category() {
        assert_eq!(fallback_category("refund please"), Category::RefundRequest);
        assert_eq!(fallback_category("hello there"), Category::GeneralInquiry);
    }
}
