//! Descriptive statistics and quality checks for complaint text.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::normalize::strip_punctuation;

/// How many entries [`TextStatistics::most_common_words`] keeps.
pub const MOST_COMMON_LIMIT: usize = 10;

/// Surface features and word frequencies of one text.
///
/// Character-level counts are taken on the raw text; word-level counts on its
/// lowercased, punctuation-free whitespace tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStatistics {
    pub word_count: usize,
    pub char_count: usize,
    /// Non-blank segments between periods.
    pub sentence_count: usize,
    pub avg_word_length: f64,
    pub exclamation_count: usize,
    pub question_count: usize,
    pub capital_letters: usize,
    pub capital_ratio: f64,
    pub vocabulary_size: usize,
    pub unique_word_ratio: f64,
    /// `(word, count)`, count descending, ties in order of first occurrence.
    pub most_common_words: Vec<(String, usize)>,
}

impl TextStatistics {
    pub fn compute(text: &str) -> Self {
        let cleaned = strip_punctuation(text);
        let tokens: Vec<&str> = cleaned.split_whitespace().collect();

        let char_count = text.chars().count();
        let capital_letters = text.chars().filter(|c| c.is_uppercase()).count();

        let mut order: Vec<&str> = Vec::new();
        let mut frequency: HashMap<&str, usize> = HashMap::new();
        for &token in &tokens {
            let count = frequency.entry(token).or_insert(0);
            if *count == 0 {
                order.push(token);
            }
            *count += 1;
        }

        let mut most_common: Vec<(String, usize)> = order
            .iter()
            .map(|word| (word.to_string(), frequency[word]))
            .collect();
        // stable: equal counts keep first-occurrence order
        most_common.sort_by(|a, b| b.1.cmp(&a.1));
        most_common.truncate(MOST_COMMON_LIMIT);

        let word_count = tokens.len();
        let ratio = |part: usize, whole: usize| {
            if whole == 0 {
                0.0
            } else {
                part as f64 / whole as f64
            }
        };

        TextStatistics {
            word_count,
            char_count,
            sentence_count: text.split('.').filter(|s| !s.trim().is_empty()).count(),
            avg_word_length: ratio(
                tokens.iter().map(|t| t.chars().count()).sum(),
                word_count,
            ),
            exclamation_count: text.matches('!').count(),
            question_count: text.matches('?').count(),
            capital_letters,
            capital_ratio: ratio(capital_letters, char_count),
            vocabulary_size: order.len(),
            unique_word_ratio: ratio(order.len(), word_count),
            most_common_words: most_common,
        }
    }
}

/// Minimum trimmed length of an acceptable complaint.
pub const MIN_COMPLAINT_CHARS: usize = 10;
/// Maximum length of an acceptable complaint.
pub const MAX_COMPLAINT_CHARS: usize = 5000;
/// Minimum number of words of an acceptable complaint.
pub const MIN_COMPLAINT_WORDS: usize = 3;

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{10}\b|\b\d{3}-\d{3}-\d{4}\b").expect("phone pattern must compile")
});
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern must compile"));

/// Quality problems found in a complaint text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextIssue {
    Empty,
    TooShort,
    TooLong,
    InsufficientDetail,
    ContainsPhoneNumber,
    ContainsEmail,
}

impl TextIssue {
    /// What the submitter should do about it.
    pub fn recommendation(&self) -> &'static str {
        match self {
            TextIssue::Empty => "Please provide a description of your complaint",
            TextIssue::TooShort => "Please provide more details about your complaint",
            TextIssue::TooLong => "Please summarize your complaint to under 5000 characters",
            TextIssue::InsufficientDetail => "Please describe your issue with more detail",
            TextIssue::ContainsPhoneNumber => {
                "Please use the contact fields instead of including phone in description"
            }
            TextIssue::ContainsEmail => {
                "Please use the contact fields instead of including email in description"
            }
        }
    }
}

/// Result of [`validate_text`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextValidation {
    pub is_valid: bool,
    pub issues: Vec<TextIssue>,
    pub word_count: usize,
    pub char_count: usize,
}

impl TextValidation {
    pub fn recommendations(&self) -> Vec<&'static str> {
        self.issues.iter().map(TextIssue::recommendation).collect()
    }
}

/// Check that a complaint is substantive and free of contact details.
pub fn validate_text(text: &str) -> TextValidation {
    let char_count = text.chars().count();
    if text.trim().is_empty() {
        return TextValidation {
            is_valid: false,
            issues: vec![TextIssue::Empty],
            word_count: 0,
            char_count,
        };
    }

    let word_count = strip_punctuation(text).split_whitespace().count();
    let mut issues = Vec::new();

    if text.trim().chars().count() < MIN_COMPLAINT_CHARS {
        issues.push(TextIssue::TooShort);
    }
    if char_count > MAX_COMPLAINT_CHARS {
        issues.push(TextIssue::TooLong);
    }
    if word_count < MIN_COMPLAINT_WORDS {
        issues.push(TextIssue::InsufficientDetail);
    }
    if PHONE.is_match(text) {
        issues.push(TextIssue::ContainsPhoneNumber);
    }
    if EMAIL.is_match(text) {
        issues.push(TextIssue::ContainsEmail);
    }

    TextValidation {
        is_valid: issues.is_empty(),
        issues,
        word_count,
        char_count,
    }
}
