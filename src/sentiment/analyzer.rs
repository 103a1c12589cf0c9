//! Hybrid sentiment, emotion and urgency analysis.

use std::sync::Arc;

use log::warn;
use rayon::prelude::*;

use super::scorer::{PatternScorer, SentimentScorer};
use super::types::{
    Emotion, SentimentDistribution, SentimentLabel, SentimentResult, SentimentSummary,
};
use crate::analysis::normalize::clean;
use crate::error::{GrievanceError, Result};
use crate::lexicon::lexicon;

/// Scale applied to the keyword balance before clamping.
const LEXICON_SCALE: f64 = 10.0;
const URGENCY_WORD_WEIGHT: f64 = 0.3;
const EXCLAMATION_WEIGHT: f64 = 0.1;
const MAX_COUNTED_EXCLAMATIONS: usize = 3;
const CAPITALS_WEIGHT: f64 = 0.2;

/// Combines a general sentiment model with keyword signals.
///
/// [`analyze`](Self::analyze) never fails: any scoring error degrades to
/// [`SentimentResult::degraded`] and is logged.
#[derive(Clone)]
pub struct SentimentAnalyzer {
    scorer: Arc<dyn SentimentScorer>,
}

impl std::fmt::Debug for SentimentAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentAnalyzer")
            .field("scorer", &self.scorer.name())
            .finish()
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new(Arc::new(PatternScorer::new()))
    }
}

impl SentimentAnalyzer {
    pub fn new(scorer: Arc<dyn SentimentScorer>) -> Self {
        SentimentAnalyzer { scorer }
    }

    /// Analyze one text. Total.
    pub fn analyze(&self, text: &str) -> SentimentResult {
        match self.try_analyze(text) {
            Ok(result) => result,
            Err(e) => {
                warn!("sentiment analysis degraded: {e}");
                SentimentResult::degraded()
            }
        }
    }

    fn try_analyze(&self, text: &str) -> Result<SentimentResult> {
        let cleaned = clean(text);
        let lowered = cleaned.to_lowercase();

        let score = self.scorer.score(&lowered)?;
        if !score.polarity.is_finite() || !score.subjectivity.is_finite() {
            return Err(GrievanceError::degraded(format!(
                "scorer {:?} returned a non-finite score",
                self.scorer.name()
            )));
        }

        let model_polarity = score.polarity.clamp(-1.0, 1.0);
        let polarity = (model_polarity + lexicon_polarity(&lowered)) / 2.0;

        Ok(SentimentResult {
            label: SentimentLabel::from_polarity(polarity),
            polarity,
            subjectivity: score.subjectivity.clamp(0.0, 1.0),
            confidence: polarity.abs(),
            urgency_score: detect_urgency(&lowered),
            emotions: detect_emotions(&lowered),
            is_complaint: is_complaint(&lowered),
        })
    }

    /// Analyze a batch in parallel and aggregate the results.
    pub fn summarize<S>(&self, texts: &[S]) -> SentimentSummary
    where
        S: AsRef<str> + Sync,
    {
        let results: Vec<SentimentResult> = texts
            .par_iter()
            .map(|text| self.analyze(text.as_ref()))
            .collect();

        let mut distribution = SentimentDistribution::default();
        for result in &results {
            distribution.record(result.label);
        }

        let (average_polarity, average_urgency) = if results.is_empty() {
            (0.0, 0.0)
        } else {
            let n = results.len() as f64;
            (
                results.iter().map(|r| r.polarity).sum::<f64>() / n,
                results.iter().map(|r| r.urgency_score).sum::<f64>() / n,
            )
        };

        SentimentSummary {
            total_analyzed: results.len(),
            distribution,
            average_polarity,
            average_urgency,
            overall: distribution.dominant(),
        }
    }

    pub fn scorer(&self) -> &Arc<dyn SentimentScorer> {
        &self.scorer
    }
}

/// Keyword balance: (positive - negative) / tokens, scaled by 10 and clamped
/// to `[-1, 1]`.
///
/// Tokens are whitespace-separated and matched exactly, so `"great!"` is not
/// the keyword `great`.
pub fn lexicon_polarity(text: &str) -> f64 {
    let lex = lexicon();
    let mut total = 0usize;
    let mut balance = 0i64;

    for token in text.split_whitespace() {
        total += 1;
        if lex.is_positive(token) {
            balance += 1;
        } else if lex.is_negative(token) {
            balance -= 1;
        }
    }

    if total == 0 {
        return 0.0;
    }
    (balance as f64 / total as f64 * LEXICON_SCALE).clamp(-1.0, 1.0)
}

/// Urgency in `[0, 1]` from urgency words, exclamation marks and capitals.
///
/// [`SentimentAnalyzer::analyze`] passes lowercased text, so there the
/// capitals term is always zero.
pub fn detect_urgency(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let urgency_words = lexicon()
        .sentiment_urgency_words()
        .iter()
        .filter(|w| lowered.contains(*w))
        .count();

    let exclamations = text.matches('!').count().min(MAX_COUNTED_EXCLAMATIONS);

    let total_chars = text.chars().count();
    let capital_ratio = if total_chars == 0 {
        0.0
    } else {
        text.chars().filter(|c| c.is_uppercase()).count() as f64 / total_chars as f64
    };

    (urgency_words as f64 * URGENCY_WORD_WEIGHT
        + exclamations as f64 * EXCLAMATION_WEIGHT
        + capital_ratio * CAPITALS_WEIGHT)
        .clamp(0.0, 1.0)
}

/// Emotions whose keywords occur as substrings, in [`Emotion::ALL`] order.
pub fn detect_emotions(text: &str) -> Vec<Emotion> {
    let lowered = text.to_lowercase();
    lexicon()
        .emotion_words()
        .iter()
        .filter(|(_, words)| words.iter().any(|w| lowered.contains(w)))
        .map(|(emotion, _)| *emotion)
        .collect()
}

/// Whether any complaint indicator occurs as a substring.
pub fn is_complaint(text: &str) -> bool {
    let lowered = text.to_lowercase();
    lexicon()
        .complaint_indicators()
        .iter()
        .any(|w| lowered.contains(w))
}
