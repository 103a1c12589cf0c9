//! The trained category/priority pipeline pair.

use super::classifier::ComplaintClassifier;
use super::pipeline::ClassifierPipeline;
use super::types::{Category, ClassificationResult, PriorityLevel};
use crate::analysis::normalize::normalize;
use crate::error::{GrievanceError, Result};

pub const CATEGORY_PIPELINE: &str = "category";
pub const PRIORITY_PIPELINE: &str = "priority";

/// Fitted category and priority pipelines, published together under one version.
#[derive(Debug)]
pub struct StatisticalClassifier {
    category: ClassifierPipeline<Category>,
    priority: ClassifierPipeline<PriorityLevel>,
    version: u64,
}

impl StatisticalClassifier {
    /// Pair two fitted pipelines.
    pub fn new(
        category: ClassifierPipeline<Category>,
        priority: ClassifierPipeline<PriorityLevel>,
        version: u64,
    ) -> Result<Self> {
        if !category.is_fitted() || !priority.is_fitted() {
            return Err(GrievanceError::untrained(
                "both pipelines must be fitted before they can serve predictions",
            ));
        }
        Ok(Self {
            category,
            priority,
            version,
        })
    }

    pub fn category(&self) -> &ClassifierPipeline<Category> {
        &self.category
    }

    pub fn priority(&self) -> &ClassifierPipeline<PriorityLevel> {
        &self.priority
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

impl ComplaintClassifier for StatisticalClassifier {
    fn classify(&self, text: &str) -> Result<ClassificationResult> {
        let normalized = normalize(text);
        let (category, confidence) = self.category.classify(&normalized)?;
        let (priority, _) = self.priority.classify(&normalized)?;
        Ok(ClassificationResult::statistical(
            category,
            priority,
            confidence,
            self.version,
        ))
    }

    fn name(&self) -> &str {
        "statistical"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalize::normalize;
    use crate::classification::types::ClassificationSource;

    fn fitted_pair() -> (ClassifierPipeline<Category>, ClassifierPipeline<PriorityLevel>) {
        let texts = [
            ("website is down", Category::TechnicalSupport, PriorityLevel::Critical),
            ("app crashes at startup", Category::TechnicalSupport, PriorityLevel::High),
            ("charged twice this month", Category::Billing, PriorityLevel::High),
            ("question about my invoice", Category::Billing, PriorityLevel::Low),
        ];
        let mut category = ClassifierPipeline::new(CATEGORY_PIPELINE, 5000, 1.0);
        let mut priority = ClassifierPipeline::new(PRIORITY_PIPELINE, 3000, 1.0);
        category
            .fit(&texts.iter().map(|(t, c, _)| (normalize(t), *c)).collect::<Vec<_>>())
            .unwrap();
        priority
            .fit(&texts.iter().map(|(t, _, p)| (normalize(t), *p)).collect::<Vec<_>>())
            .unwrap();
        (category, priority)
    }

    #[test]
    fn test_statistical_classifier() {
        let (category, priority) = fitted_pair();
        let classifier = StatisticalClassifier::new(category, priority, 7).unwrap();

        let result = classifier.classify("I was charged twice!").unwrap();
        assert_eq!(result.category, Category::Billing);
        assert_eq!(result.source, ClassificationSource::Statistical);
        assert_eq!(result.model_version, Some(7));
        assert!(result.confidence > 0.5 && result.confidence <= 1.0);
    }

    #[test]
    fn test_requires_fitted_pipelines() {
        let (category, _) = fitted_pair();
        let priority = ClassifierPipeline::new(PRIORITY_PIPELINE, 3000, 1.0);
        assert!(StatisticalClassifier::new(category, priority, 1).is_err());
    }
}
