//! Labeled training data.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classification::types::{Category, PriorityLevel};
use crate::error::Result;

/// One labeled complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub text: String,
    pub category: Category,
    pub priority: PriorityLevel,
}

impl TrainingExample {
    pub fn new(text: impl Into<String>, category: Category, priority: PriorityLevel) -> Self {
        TrainingExample {
            text: text.into(),
            category,
            priority,
        }
    }
}

/// Load training examples from a JSON array file.
pub fn load_examples<P: AsRef<Path>>(path: P) -> Result<Vec<TrainingExample>> {
    let content = std::fs::read_to_string(path)?;
    let examples: Vec<TrainingExample> = serde_json::from_str(&content)?;
    Ok(examples)
}

/// The hand-labeled examples a fresh engine is bootstrapped on.
pub fn seed_examples() -> Vec<TrainingExample> {
    use Category::*;
    use PriorityLevel::*;

    [
        ("My internet connection is very slow", TechnicalSupport, Medium),
        ("I was charged twice for the same service", Billing, High),
        ("The product I received is damaged", ProductQuality, High),
        ("Customer service representative was rude", CustomerService, Medium),
        ("My order hasn't arrived yet", Delivery, Medium),
        ("How do I change my password?", GeneralInquiry, Low),
        ("I want to return this product", RefundRequest, Medium),
        ("Cannot login to my account", AccountIssues, High),
        ("Website is down and not working", TechnicalSupport, Critical),
        ("Urgent: Wrong amount deducted", Billing, Critical),
        ("Product stopped working after one day", ProductQuality, High),
        ("Need help with installation", TechnicalSupport, Low),
        ("When will my refund be processed?", RefundRequest, Medium),
        ("Email notifications not working", TechnicalSupport, Low),
        ("Overcharged on my monthly bill", Billing, Medium),
        ("Received wrong item", Delivery, Medium),
    ]
    .into_iter()
    .map(|(text, category, priority)| TrainingExample::new(text, category, priority))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_seed_examples() {
        let seeds = seed_examples();
        assert_eq!(seeds.len(), 16);
        assert_eq!(seeds[9].priority, PriorityLevel::Critical);
        assert_eq!(seeds[15].category, Category::Delivery);
    }

    #[test]
    fn test_load_examples() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("examples.json");
        std::fs::write(
            &path,
            r#"[
                {"text": "App crashes on start", "category": "Technical Support", "priority": "High"},
                {"text": "Where is my parcel", "category": "Delivery", "priority": "Medium"}
            ]"#,
        )
        .unwrap();

        let examples = load_examples(&path).unwrap();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].category, Category::TechnicalSupport);
        assert_eq!(examples[1].priority, PriorityLevel::Medium);
    }

    #[test]
    fn test_load_examples_rejects_unknown_labels() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        std::fs::write(
            &path,
            r#"[{"text": "x", "category": "Shipping", "priority": "Low"}]"#,
        )
        .unwrap();
        assert!(load_examples(&path).is_err());
    }
}
