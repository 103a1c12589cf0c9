//! Label and result types for complaint classification.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{GrievanceError, Result};

/// Anything a [`ClassifierPipeline`](super::ClassifierPipeline) can predict.
pub trait Label:
    Clone + Eq + Hash + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

impl<T> Label for T where
    T: Clone + Eq + Hash + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

/// One of the eight fixed complaint buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Technical Support")]
    TechnicalSupport,
    #[serde(rename = "Billing")]
    Billing,
    #[serde(rename = "Product Quality")]
    ProductQuality,
    #[serde(rename = "Customer Service")]
    CustomerService,
    #[serde(rename = "Delivery")]
    Delivery,
    #[serde(rename = "General Inquiry")]
    GeneralInquiry,
    #[serde(rename = "Refund Request")]
    RefundRequest,
    #[serde(rename = "Account Issues")]
    AccountIssues,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::TechnicalSupport,
        Category::Billing,
        Category::ProductQuality,
        Category::CustomerService,
        Category::Delivery,
        Category::GeneralInquiry,
        Category::RefundRequest,
        Category::AccountIssues,
    ];

    /// Human-readable name, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::TechnicalSupport => "Technical Support",
            Category::Billing => "Billing",
            Category::ProductQuality => "Product Quality",
            Category::CustomerService => "Customer Service",
            Category::Delivery => "Delivery",
            Category::GeneralInquiry => "General Inquiry",
            Category::RefundRequest => "Refund Request",
            Category::AccountIssues => "Account Issues",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = GrievanceError;

    /// Accepts "Technical Support", "technical_support", "TechnicalSupport", …
    fn from_str(s: &str) -> Result<Self> {
        let wanted = squash(s);
        Category::ALL
            .into_iter()
            .find(|c| squash(c.as_str()) == wanted)
            .ok_or_else(|| GrievanceError::invalid_input(format!("unknown category: {s:?}")))
    }
}

/// Ordered urgency tier, `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PriorityLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl PriorityLevel {
    pub const ALL: [PriorityLevel; 4] = [
        PriorityLevel::Low,
        PriorityLevel::Medium,
        PriorityLevel::High,
        PriorityLevel::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityLevel::Low => "Low",
            PriorityLevel::Medium => "Medium",
            PriorityLevel::High => "High",
            PriorityLevel::Critical => "Critical",
        }
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriorityLevel {
    type Err = GrievanceError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = squash(s);
        PriorityLevel::ALL
            .into_iter()
            .find(|p| squash(p.as_str()) == wanted)
            .ok_or_else(|| GrievanceError::invalid_input(format!("unknown priority: {s:?}")))
    }
}

fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Which path produced a [`ClassificationResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationSource {
    /// Trained TF-IDF + naive Bayes pipelines; `confidence` is a posterior.
    Statistical,
    /// Keyword rules; `confidence` is the 0.0 sentinel, not a probability.
    RuleBased,
}

/// Category, priority and confidence for one complaint text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: Category,
    pub priority_level: PriorityLevel,
    /// Maximum posterior of the category pipeline, in `[0, 1]`.
    pub confidence: f64,
    pub source: ClassificationSource,
    /// Artifact version of the models that produced a statistical result.
    pub model_version: Option<u64>,
}

impl ClassificationResult {
    /// Sentinel confidence reported by the rule-based path.
    pub const RULE_BASED_CONFIDENCE: f64 = 0.0;

    pub fn statistical(
        category: Category,
        priority_level: PriorityLevel,
        confidence: f64,
        model_version: u64,
    ) -> Self {
        ClassificationResult {
            category,
            priority_level,
            confidence: confidence.clamp(0.0, 1.0),
            source: ClassificationSource::Statistical,
            model_version: Some(model_version),
        }
    }

    pub fn rule_based(category: Category, priority_level: PriorityLevel) -> Self {
        ClassificationResult {
            category,
            priority_level,
            confidence: Self::RULE_BASED_CONFIDENCE,
            source: ClassificationSource::RuleBased,
            model_version: None,
        }
    }

    /// Whether `confidence` is a genuine posterior probability.
    pub fn has_probabilistic_confidence(&self) -> bool {
        self.source == ClassificationSource::Statistical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_variants() {
        assert_eq!(
            "Technical Support".parse::<Category>().unwrap(),
            Category::TechnicalSupport
        );
        assert_eq!(
            "refund_request".parse::<Category>().unwrap(),
            Category::RefundRequest
        );
        assert_eq!(
            "AccountIssues".parse::<Category>().unwrap(),
            Category::AccountIssues
        );
        assert!("Shipping".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serde_uses_display_names() {
        let json = serde_json::to_string(&Category::ProductQuality).unwrap();
        assert_eq!(json, "\"Product Quality\"");
        let back: Category = serde_json::from_str("\"General Inquiry\"").unwrap();
        assert_eq!(back, Category::GeneralInquiry);
    }

    #[test]
    fn test_priority_ordering() {
        assert!(PriorityLevel::Low < PriorityLevel::Medium);
        assert!(PriorityLevel::Medium < PriorityLevel::High);
        assert!(PriorityLevel::High < PriorityLevel::Critical);
        assert_eq!("critical".parse::<PriorityLevel>().unwrap(), PriorityLevel::Critical);
    }

    #[test]
    fn test_rule_based_result_is_distinguishable() {
        let rule = ClassificationResult::rule_based(Category::Billing, PriorityLevel::High);
        let stat = ClassificationResult::statistical(Category::Billing, PriorityLevel::High, 0.0, 1);

        assert_eq!(rule.confidence, stat.confidence);
        assert!(!rule.has_probabilistic_confidence());
        assert!(stat.has_probabilistic_confidence());
        assert_ne!(rule, stat);
    }
}
