//! Keyword-based category classifier.

use std::sync::Arc;

use crate::analysis::analyzer::{Analyzer, StandardAnalyzer};
use crate::classification::types::Category;
use crate::error::Result;
use crate::lexicon::lexicon;

/// Keyword-based category classifier.
///
/// Counts how many analyzed terms fall into each category's keyword set and
/// picks the highest count. Ties go to the category listed first in
/// [`Category::ALL`]; no hits at all yields [`Category::GeneralInquiry`].
pub struct KeywordCategoryClassifier {
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for KeywordCategoryClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordCategoryClassifier")
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl KeywordCategoryClassifier {
    /// Create a new keyword-based category classifier.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        Self { analyzer }
    }

    /// Per-category hit counts, in [`Category::ALL`] order.
    pub fn scores(&self, text: &str) -> Result<Vec<(Category, usize)>> {
        let terms = self.analyzer.terms(text)?;

        Ok(lexicon()
            .category_words()
            .iter()
            .map(|(category, words)| {
                let score = terms.iter().filter(|t| words.contains(t.as_str())).count();
                (*category, score)
            })
            .collect())
    }

    pub fn predict(&self, text: &str) -> Result<Category> {
        let mut best = (Category::GeneralInquiry, 0);
        for (category, score) in self.scores(text)? {
            if score > best.1 {
                best = (category, score);
            }
        }
        Ok(best.0)
    }
}

impl Default for KeywordCategoryClassifier {
    fn default() -> Self {
        Self::new(Arc::new(StandardAnalyzer::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_category_classifier() {
        let classifier = KeywordCategoryClassifier::default();

        assert_eq!(
            classifier.predict("I was overcharged on my invoice").unwrap(),
            Category::Billing
        );
        assert_eq!(
            classifier.predict("Cannot login, password rejected").unwrap(),
            Category::AccountIssues
        );
        assert_eq!(
            classifier.predict("The parcel was never delivered").unwrap(),
            Category::Delivery
        );
    }

    #[test]
    fn test_no_hits_is_general_inquiry() {
        let classifier = KeywordCategoryClassifier::default();
        assert_eq!(classifier.predict("").unwrap(), Category::GeneralInquiry);
        assert_eq!(
            classifier.predict("lorem ipsum dolor").unwrap(),
            Category::GeneralInquiry
        );
    }

    #[test]
    fn test_tie_goes_to_earlier_category() {
        let classifier = KeywordCategoryClassifier::default();
        // one technical hit, one billing hit
        assert_eq!(
            classifier.predict("website payment").unwrap(),
            Category::TechnicalSupport
        );
    }

    #[test]
    fn test_scores_cover_every_category() {
        let classifier = KeywordCategoryClassifier::default();
        let scores = classifier.scores("refund and return please").unwrap();
        assert_eq!(scores.len(), Category::ALL.len());
        assert_eq!(
            scores
                .iter()
                .find(|(c, _)| *c == Category::RefundRequest)
                .map(|(_, s)| *s),
            Some(2)
        );
    }
}
