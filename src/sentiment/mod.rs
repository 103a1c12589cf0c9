//! Sentiment, emotion and urgency analysis.
//!
//! [`SentimentAnalyzer`] blends a general [`SentimentScorer`] polarity with a
//! keyword balance, and adds keyword-based urgency, emotion and complaint
//! signals. It is independent of the classifier.

pub mod analyzer;
pub mod scorer;
pub mod types;

pub use analyzer::{detect_emotions, detect_urgency, is_complaint, lexicon_polarity, SentimentAnalyzer};
pub use scorer::{PatternScorer, SentimentScorer};
pub use types::{
    Emotion, SentimentDistribution, SentimentLabel, SentimentResult, SentimentScore,
    SentimentSummary,
};
