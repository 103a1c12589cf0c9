//! Static keyword tables.
//!
//! Every list the rule-based paths consult lives here, built once on first
//! use and shared read-only for the life of the process. Obtain the tables
//! through [`lexicon()`].

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::classification::types::{Category, PriorityLevel};
use crate::sentiment::types::Emotion;

/// Fallback priority tiers, checked top to bottom; first hit wins.
const PRIORITY_TIERS: &[(PriorityLevel, &[&str])] = &[
    (
        PriorityLevel::Critical,
        &["urgent", "emergency", "critical", "down", "not working", "broken"],
    ),
    (
        PriorityLevel::High,
        &["billing", "charged", "payment", "money", "damaged", "wrong"],
    ),
    (
        PriorityLevel::Medium,
        &["slow", "late", "delay", "issue", "problem"],
    ),
];

/// Weights for the standalone urgency score; the maximum matched weight wins.
const URGENCY_WEIGHTS: &[(&str, f64)] = &[
    ("urgent", 0.9),
    ("emergency", 1.0),
    ("critical", 0.9),
    ("immediately", 0.8),
    ("asap", 0.8),
    ("broken", 0.7),
    ("not working", 0.7),
    ("down", 0.6),
    ("problem", 0.4),
    ("issue", 0.3),
];

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "amazing", "wonderful", "fantastic", "satisfied", "happy",
    "pleased", "thank", "appreciate", "love",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "worst", "hate", "angry", "frustrated",
    "disappointed", "upset", "annoyed", "broken", "failed", "wrong", "issue", "problem", "error",
];

/// Words counted (by presence) towards the sentiment urgency score.
const SENTIMENT_URGENCY_WORDS: &[&str] = &[
    "urgent",
    "emergency",
    "critical",
    "immediately",
    "asap",
    "serious",
    "important",
    "priority",
];

const EMOTION_WORDS: &[(Emotion, &[&str])] = &[
    (
        Emotion::Anger,
        &["angry", "furious", "mad", "rage", "pissed", "livid"],
    ),
    (
        Emotion::Frustration,
        &["frustrated", "annoyed", "irritated", "fed up"],
    ),
    (
        Emotion::Sadness,
        &["sad", "disappointed", "upset", "depressed"],
    ),
    (
        Emotion::Fear,
        &["worried", "concerned", "anxious", "scared"],
    ),
    (Emotion::Joy, &["happy", "pleased", "satisfied", "delighted"]),
    (
        Emotion::Surprise,
        &["surprised", "shocked", "amazed", "unexpected"],
    ),
];

const COMPLAINT_INDICATORS: &[&str] = &[
    "complaint",
    "issue",
    "problem",
    "error",
    "bug",
    "fault",
    "not working",
    "broken",
    "failed",
    "wrong",
    "bad",
    "terrible",
    "disappointed",
    "unsatisfied",
    "refund",
    "return",
];

/// Category hints for the keyword fallback; matched against normalized terms.
const CATEGORY_WORDS: &[(Category, &[&str])] = &[
    (
        Category::TechnicalSupport,
        &[
            "internet", "connection", "website", "site", "app", "crash", "crashes", "install",
            "installation", "software", "wifi", "server", "bug", "loading", "notifications",
        ],
    ),
    (
        Category::Billing,
        &[
            "bill", "billing", "charged", "charge", "charges", "invoice", "payment",
            "overcharged", "fee", "fees", "subscription", "deducted", "amount",
        ],
    ),
    (
        Category::ProductQuality,
        &[
            "damaged", "defective", "quality", "faulty", "stopped", "cracked", "poor", "product",
        ],
    ),
    (
        Category::CustomerService,
        &[
            "rude", "representative", "agent", "staff", "unhelpful", "hold", "support",
            "attitude", "manager",
        ],
    ),
    (
        Category::Delivery,
        &[
            "delivery", "delivered", "arrived", "shipping", "shipped", "package", "courier",
            "tracking", "parcel", "item",
        ],
    ),
    (
        Category::GeneralInquiry,
        &["hours", "information", "question", "inquiry", "wondering", "tell"],
    ),
    (
        Category::RefundRequest,
        &["refund", "return", "reimburse", "reimbursement", "cancel", "exchange"],
    ),
    (
        Category::AccountIssues,
        &[
            "account", "login", "password", "locked", "username", "verification", "signin",
            "profile",
        ],
    ),
];

/// The immutable keyword tables.
#[derive(Debug)]
pub struct Lexicon {
    priority_tiers: Vec<(PriorityLevel, Vec<&'static str>)>,
    urgency_weights: Vec<(&'static str, f64)>,
    positive: HashSet<&'static str>,
    negative: HashSet<&'static str>,
    sentiment_urgency: Vec<&'static str>,
    emotions: Vec<(Emotion, Vec<&'static str>)>,
    complaint_indicators: Vec<&'static str>,
    categories: Vec<(Category, HashSet<&'static str>)>,
}

impl Lexicon {
    fn build() -> Self {
        Lexicon {
            priority_tiers: PRIORITY_TIERS
                .iter()
                .map(|(level, words)| (*level, words.to_vec()))
                .collect(),
            urgency_weights: URGENCY_WEIGHTS.to_vec(),
            positive: POSITIVE_WORDS.iter().copied().collect(),
            negative: NEGATIVE_WORDS.iter().copied().collect(),
            sentiment_urgency: SENTIMENT_URGENCY_WORDS.to_vec(),
            emotions: EMOTION_WORDS
                .iter()
                .map(|(emotion, words)| (*emotion, words.to_vec()))
                .collect(),
            complaint_indicators: COMPLAINT_INDICATORS.to_vec(),
            categories: CATEGORY_WORDS
                .iter()
                .map(|(category, words)| (*category, words.iter().copied().collect()))
                .collect(),
        }
    }

    /// Priority tiers in check order, Critical first.
    pub fn priority_tiers(&self) -> &[(PriorityLevel, Vec<&'static str>)] {
        &self.priority_tiers
    }

    pub fn urgency_weights(&self) -> &[(&'static str, f64)] {
        &self.urgency_weights
    }

    pub fn is_positive(&self, word: &str) -> bool {
        self.positive.contains(word)
    }

    pub fn is_negative(&self, word: &str) -> bool {
        self.negative.contains(word)
    }

    pub fn sentiment_urgency_words(&self) -> &[&'static str] {
        &self.sentiment_urgency
    }

    /// Emotion keyword lists in [`Emotion::ALL`] order.
    pub fn emotion_words(&self) -> &[(Emotion, Vec<&'static str>)] {
        &self.emotions
    }

    pub fn complaint_indicators(&self) -> &[&'static str] {
        &self.complaint_indicators
    }

    /// Category keyword sets in [`Category::ALL`] order.
    pub fn category_words(&self) -> &[(Category, HashSet<&'static str>)] {
        &self.categories
    }
}

static LEXICON: LazyLock<Lexicon> = LazyLock::new(Lexicon::build);

/// The process-wide keyword tables.
pub fn lexicon() -> &'static Lexicon {
    &LEXICON
}
