//! General-purpose polarity/subjectivity scoring.
//!
//! The sentiment analyzer blends a model score with its own lexicon signal.
//! The model sits behind [`SentimentScorer`] so it can be swapped or stubbed
//! without touching the blending logic.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::types::SentimentScore;
use crate::error::Result;

/// A general-purpose sentiment model.
pub trait SentimentScorer: Send + Sync {
    /// Score `text`; polarity in `[-1, 1]`, subjectivity in `[0, 1]`.
    fn score(&self, text: &str) -> Result<SentimentScore>;

    /// Get the name of this scorer (for debugging and logging).
    fn name(&self) -> &str;
}

/// `(word, polarity, subjectivity)`.
const PATTERN_LEXICON: &[(&str, f64, f64)] = &[
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("excellent", 1.0, 1.0),
    ("amazing", 0.6, 0.9),
    ("wonderful", 1.0, 1.0),
    ("fantastic", 0.4, 0.9),
    ("perfect", 1.0, 1.0),
    ("best", 1.0, 0.3),
    ("nice", 0.6, 1.0),
    ("fine", 0.4, 0.5),
    ("happy", 0.8, 1.0),
    ("pleased", 0.5, 1.0),
    ("satisfied", 0.5, 1.0),
    ("delighted", 0.7, 0.9),
    ("love", 0.5, 0.6),
    ("thanks", 0.2, 0.2),
    ("helpful", 0.4, 0.5),
    ("quick", 0.33, 0.5),
    ("fast", 0.2, 0.6),
    ("easy", 0.43, 0.83),
    ("bad", -0.7, 0.67),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("worst", -1.0, 1.0),
    ("hate", -0.8, 0.9),
    ("angry", -0.5, 1.0),
    ("furious", -0.6, 1.0),
    ("mad", -0.63, 1.0),
    ("frustrated", -0.7, 0.4),
    ("frustrating", -0.4, 0.7),
    ("disappointed", -0.75, 0.75),
    ("disappointing", -0.6, 0.7),
    ("upset", -0.3, 0.6),
    ("annoyed", -0.4, 0.6),
    ("sad", -0.5, 1.0),
    ("worried", -0.2, 0.6),
    ("broken", -0.4, 0.4),
    ("wrong", -0.5, 0.9),
    ("slow", -0.3, 0.39),
    ("late", -0.3, 0.6),
    ("rude", -0.3, 0.6),
    ("poor", -0.4, 0.6),
    ("useless", -0.5, 0.2),
    ("unacceptable", -0.6, 0.8),
    ("ridiculous", -0.33, 0.67),
    ("damaged", -0.2, 0.4),
    ("defective", -0.5, 0.6),
    ("failed", -0.5, 0.3),
];

/// Words that scale the polarity of the next sentiment word.
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("extremely", 1.5),
    ("so", 1.3),
    ("too", 1.3),
    ("completely", 1.4),
    ("totally", 1.4),
    ("absolutely", 1.5),
    ("quite", 1.1),
    ("slightly", 0.6),
    ("somewhat", 0.7),
];

const NEGATIONS: &[&str] = &["not", "no", "never", "isnt", "wasnt", "dont", "doesnt", "didnt", "cant", "wont"];

/// Polarity multiplier applied to a negated word.
const NEGATION_FACTOR: f64 = -0.5;

static WORDS: LazyLock<HashMap<&'static str, (f64, f64)>> = LazyLock::new(|| {
    PATTERN_LEXICON
        .iter()
        .map(|(word, polarity, subjectivity)| (*word, (*polarity, *subjectivity)))
        .collect()
});

static MODIFIERS: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| INTENSIFIERS.iter().copied().collect());

/// Lexicon-and-modifier sentiment model.
///
/// Averages the scores of the sentiment words it recognizes. An intensifier
/// scales the next sentiment word, and a negation flips it and halves its
/// weight. Text without any known sentiment word scores `(0, 0)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternScorer;

impl PatternScorer {
    pub fn new() -> Self {
        PatternScorer
    }
}

fn bare_word(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphanumeric())
        .chars()
        .filter(|c| *c != '\'')
        .flat_map(char::to_lowercase)
        .collect()
}

impl SentimentScorer for PatternScorer {
    fn score(&self, text: &str) -> Result<SentimentScore> {
        let mut polarities = Vec::new();
        let mut subjectivities = Vec::new();
        let mut intensity = 1.0;
        let mut negated = false;

        for token in text.split_whitespace() {
            let word = bare_word(token);
            if NEGATIONS.contains(&word.as_str()) {
                negated = true;
                continue;
            }
            if let Some(factor) = MODIFIERS.get(word.as_str()) {
                intensity *= factor;
                continue;
            }
            if let Some(&(polarity, subjectivity)) = WORDS.get(word.as_str()) {
                let mut value = polarity * intensity;
                if negated {
                    value *= NEGATION_FACTOR;
                }
                polarities.push(value.clamp(-1.0, 1.0));
                subjectivities.push((subjectivity * intensity).clamp(0.0, 1.0));
            }
            intensity = 1.0;
            negated = false;
        }

        if polarities.is_empty() {
            return Ok(SentimentScore::default());
        }

        let n = polarities.len() as f64;
        Ok(SentimentScore {
            polarity: (polarities.iter().sum::<f64>() / n).clamp(-1.0, 1.0),
            subjectivity: (subjectivities.iter().sum::<f64>() / n).clamp(0.0, 1.0),
        })
    }

    fn name(&self) -> &str {
        "pattern"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_scorer_polarity() {
        let scorer = PatternScorer::new();
        assert!(scorer.score("The support was excellent").unwrap().polarity > 0.5);
        assert!(scorer.score("Terrible, awful service!").unwrap().polarity < -0.5);
    }

    #[test]
    fn test_unknown_words_are_neutral() {
        let scorer = PatternScorer::new();
        assert_eq!(
            scorer.score("order number seven").unwrap(),
            SentimentScore::default()
        );
        assert_eq!(scorer.score("").unwrap(), SentimentScore::default());
    }

    #[test]
    fn test_negation_flips_polarity() {
        let scorer = PatternScorer::new();
        let plain = scorer.score("good").unwrap().polarity;
        let negated = scorer.score("not good").unwrap().polarity;
        assert!(negated < 0.0);
        assert!((negated - plain * NEGATION_FACTOR).abs() < 1e-12);
    }

    #[test]
    fn test_intensifier_strengthens() {
        let scorer = PatternScorer::new();
        let plain = scorer.score("slow").unwrap().polarity;
        let intense = scorer.score("extremely slow").unwrap().polarity;
        assert!(intense < plain);
    }

    #[test]
    fn test_scores_stay_in_range() {
        let scorer = PatternScorer::new();
        let score = scorer
            .score("absolutely extremely really perfect excellent wonderful")
            .unwrap();
        assert!((-1.0..=1.0).contains(&score.polarity));
        assert!((0.0..=1.0).contains(&score.subjectivity));
    }
}
