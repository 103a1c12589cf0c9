//! Result types for sentiment, emotion and urgency analysis.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Overall polarity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Polarity above this is positive, below its negation negative.
    pub const THRESHOLD: f64 = 0.1;

    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > Self::THRESHOLD {
            SentimentLabel::Positive
        } else if polarity < -Self::THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emotions detectable by keyword, in their fixed reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Anger,
    Frustration,
    Sadness,
    Fear,
    Joy,
    Surprise,
}

impl Emotion {
    pub const ALL: [Emotion; 6] = [
        Emotion::Anger,
        Emotion::Frustration,
        Emotion::Sadness,
        Emotion::Fear,
        Emotion::Joy,
        Emotion::Surprise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Anger => "anger",
            Emotion::Frustration => "frustration",
            Emotion::Sadness => "sadness",
            Emotion::Fear => "fear",
            Emotion::Joy => "joy",
            Emotion::Surprise => "surprise",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of a general-purpose sentiment model.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentScore {
    /// In `[-1, 1]`.
    pub polarity: f64,
    /// In `[0, 1]`.
    pub subjectivity: f64,
}

/// Full sentiment assessment of one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    /// Mean of the model polarity and the lexicon polarity, in `[-1, 1]`.
    pub polarity: f64,
    pub subjectivity: f64,
    /// Always `polarity.abs()`.
    pub confidence: f64,
    pub urgency_score: f64,
    /// Detected emotions, in [`Emotion::ALL`] order, without duplicates.
    pub emotions: Vec<Emotion>,
    pub is_complaint: bool,
}

impl SentimentResult {
    /// The safe default returned when scoring fails.
    pub fn degraded() -> Self {
        SentimentResult {
            label: SentimentLabel::Neutral,
            polarity: 0.0,
            subjectivity: 0.0,
            confidence: 0.0,
            urgency_score: 0.0,
            emotions: Vec::new(),
            is_complaint: true,
        }
    }

    pub fn has_emotion(&self, emotion: Emotion) -> bool {
        self.emotions.contains(&emotion)
    }
}

/// Counts per sentiment label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentDistribution {
    pub fn record(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Negative => self.negative += 1,
            SentimentLabel::Neutral => self.neutral += 1,
        }
    }

    /// Most frequent label; ties resolve Positive, then Negative, then Neutral.
    pub fn dominant(&self) -> SentimentLabel {
        if self.positive == 0 && self.negative == 0 && self.neutral == 0 {
            return SentimentLabel::Neutral;
        }
        let mut best = (SentimentLabel::Positive, self.positive);
        for candidate in [
            (SentimentLabel::Negative, self.negative),
            (SentimentLabel::Neutral, self.neutral),
        ] {
            if candidate.1 > best.1 {
                best = candidate;
            }
        }
        best.0
    }
}

/// Aggregate over a batch of texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub total_analyzed: usize,
    pub distribution: SentimentDistribution,
    pub average_polarity: f64,
    pub average_urgency: f64,
    pub overall: SentimentLabel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_thresholds() {
        assert_eq!(SentimentLabel::from_polarity(0.11), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_polarity(0.1), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_polarity(-0.1), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_polarity(-0.5), SentimentLabel::Negative);
    }

    #[test]
    fn test_distribution_dominant_ties() {
        let mut dist = SentimentDistribution::default();
        assert_eq!(dist.dominant(), SentimentLabel::Neutral);

        dist.record(SentimentLabel::Negative);
        dist.record(SentimentLabel::Positive);
        assert_eq!(dist.dominant(), SentimentLabel::Positive);

        dist.record(SentimentLabel::Negative);
        assert_eq!(dist.dominant(), SentimentLabel::Negative);
    }

    #[test]
    fn test_emotion_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Emotion::Anger).unwrap(), "\"anger\"");
    }

    #[test]
    fn test_degraded_result() {
        let result = SentimentResult::degraded();
        assert_eq!(result.label, SentimentLabel::Neutral);
        assert_eq!(result.confidence, 0.0);
        assert!(result.emotions.is_empty());
    }
}
