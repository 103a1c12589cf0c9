use std::sync::Arc;
use std::thread;

use grievance::analysis::normalize::normalize;
use grievance::classification::fallback::fallback_priority;
use grievance::classification::{Category, ClassificationSource, PriorityLevel};
use grievance::config::EngineConfig;
use grievance::engine::ComplaintEngine;
use grievance::error::Result;
use grievance::sentiment::{Emotion, SentimentLabel};
use grievance::storage::{MemoryStorage, Storage};
use grievance::training::TrainingExample;

const SAMPLE_TEXTS: &[&str] = &[
    "",
    "   ",
    "I am furious and extremely angry about this broken service!!!",
    "Thank you, the support team was great and very helpful",
    "My order hasn't arrived yet, it's been two weeks",
    "URGENT: payment failed and the site is DOWN",
    "How do I change my password?",
    "visit https://example.com or write to me@example.com",
    "ok",
];

fn balanced_examples() -> Vec<TrainingExample> {
    let mut examples = Vec::new();
    for i in 0..5 {
        examples.push(TrainingExample::new(
            format!("I was charged twice on invoice number {i}"),
            Category::Billing,
            PriorityLevel::High,
        ));
        examples.push(TrainingExample::new(
            format!("The courier delivered parcel {i} late"),
            Category::Delivery,
            PriorityLevel::Medium,
        ));
    }
    examples
}

#[test]
fn test_fallback_priority_scenarios() {
    assert_eq!(
        fallback_priority("System is completely down and broken"),
        PriorityLevel::Critical
    );
    assert_eq!(
        fallback_priority("My bill was wrongly charged"),
        PriorityLevel::High
    );
    assert_eq!(
        fallback_priority("Please tell me about your hours"),
        PriorityLevel::Low
    );

    for text in SAMPLE_TEXTS {
        assert_eq!(fallback_priority(text), fallback_priority(text));
    }
}

#[test]
fn test_normalize_is_idempotent() {
    for text in SAMPLE_TEXTS {
        let once = normalize(text);
        assert_eq!(normalize(once.as_str()), once);
    }
}

#[test]
fn test_urgency_score_properties() -> Result<()> {
    let engine = ComplaintEngine::new(EngineConfig::default())?;
    assert_eq!(engine.urgency_score(""), 0.0);
    assert_eq!(engine.urgency_score("emergency"), 1.0);
    assert!(engine.urgency_score("no issue at all") >= 0.3);
    for text in SAMPLE_TEXTS {
        let score = engine.urgency_score(text);
        assert!((0.0..=1.0).contains(&score));
    }
    Ok(())
}

#[test]
fn test_sentiment_confidence_is_abs_polarity() -> Result<()> {
    let engine = ComplaintEngine::new(EngineConfig::default())?;
    for text in SAMPLE_TEXTS {
        let result = engine.analyze_sentiment(text);
        assert_eq!(result.confidence, result.polarity.abs(), "for {text:?}");
        assert!((-1.0..=1.0).contains(&result.polarity));
        assert!((0.0..=1.0).contains(&result.subjectivity));
        assert!((0.0..=1.0).contains(&result.urgency_score));
    }
    Ok(())
}

#[test]
fn test_angry_complaint_scenario() -> Result<()> {
    let engine = ComplaintEngine::new(EngineConfig::default())?;
    let result =
        engine.analyze_sentiment("I am furious and extremely angry about this broken service!!!");

    assert_eq!(result.label, SentimentLabel::Negative);
    assert!(result.emotions.contains(&Emotion::Anger));
    assert!(result.urgency_score > 0.0);
    assert!(result.is_complaint);
    Ok(())
}

#[test]
fn test_emotion_detection_is_monotonic() -> Result<()> {
    let engine = ComplaintEngine::new(EngineConfig::default())?;
    let additions = [
        ("furious", Emotion::Anger),
        ("annoyed", Emotion::Frustration),
        ("disappointed", Emotion::Sadness),
        ("worried", Emotion::Fear),
        ("happy", Emotion::Joy),
        ("shocked", Emotion::Surprise),
    ];

    for base in SAMPLE_TEXTS {
        let before = engine.analyze_sentiment(base).emotions;
        for (word, emotion) in additions {
            let after = engine.analyze_sentiment(&format!("{base} {word}")).emotions;
            assert!(after.contains(&emotion), "{word:?} added to {base:?}");
            for kept in &before {
                assert!(after.contains(kept));
            }
        }
    }
    Ok(())
}

#[test]
fn test_classification_sources() -> Result<()> {
    let trained = ComplaintEngine::new(EngineConfig::default())?;
    let result = trained.classify("I was charged twice for the same service");
    assert_eq!(result.source, ClassificationSource::Statistical);
    assert_eq!(result.model_version, Some(1));
    assert!(result.confidence > 0.0 && result.confidence <= 1.0);

    let untrained = ComplaintEngine::new(EngineConfig {
        bootstrap_on_start: false,
        ..EngineConfig::default()
    })?;
    let result = untrained.classify("I was charged twice for the same service");
    assert_eq!(result.source, ClassificationSource::RuleBased);
    assert_eq!(result.category, Category::Billing);
    assert_eq!(result.priority_level, PriorityLevel::High);
    assert_eq!(result.confidence, 0.0);
    assert_eq!(result.model_version, None);
    Ok(())
}

#[test]
fn test_empty_retrain_leaves_state_unchanged() -> Result<()> {
    let engine = ComplaintEngine::new(EngineConfig::default())?;
    let before: Vec<_> = SAMPLE_TEXTS.iter().map(|t| engine.classify(t)).collect();

    let err = engine.retrain(&[]).unwrap_err();
    assert!(err.is_invalid_input());

    let after: Vec<_> = SAMPLE_TEXTS.iter().map(|t| engine.classify(t)).collect();
    assert_eq!(before, after);
    assert_eq!(engine.model_version(), Some(1));
    Ok(())
}

#[test]
fn test_empty_retrain_keeps_engine_untrained() -> Result<()> {
    let engine = ComplaintEngine::new(EngineConfig {
        bootstrap_on_start: false,
        ..EngineConfig::default()
    })?;
    assert!(engine.retrain(&[]).is_err());
    assert!(!engine.is_trained());
    Ok(())
}

#[test]
fn test_balanced_retrain_report() -> Result<()> {
    let engine = ComplaintEngine::new(EngineConfig::default())?;
    let report = engine.retrain(&balanced_examples())?;

    assert_eq!(report.sample_count, 10);
    assert!((0.0..=1.0).contains(&report.category_accuracy));
    assert!((0.0..=1.0).contains(&report.priority_accuracy));
    assert_eq!(report.train_size + report.holdout_size, 10);
    assert_eq!(report.model_version, 2);
    assert_eq!(engine.model_version(), Some(2));

    let result = engine.classify("charged twice on my invoice");
    assert_eq!(result.category, Category::Billing);
    assert_eq!(result.model_version, Some(2));
    Ok(())
}

#[test]
fn test_predictions_during_retrain_see_whole_pairs() -> Result<()> {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    let engine = ComplaintEngine::with_storage(EngineConfig::default(), storage)?;
    let examples = balanced_examples();

    thread::scope(|scope| {
        let readers: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    for _ in 0..50 {
                        let result = engine.classify("my parcel was delivered late");
                        assert_eq!(result.source, ClassificationSource::Statistical);
                        assert!(matches!(result.model_version, Some(1..=4)));
                    }
                })
            })
            .collect();

        for _ in 0..3 {
            engine.retrain(&examples).unwrap();
        }
        for reader in readers {
            reader.join().unwrap();
        }
    });

    assert_eq!(engine.model_version(), Some(4));
    Ok(())
}

#[test]
fn test_summarize() -> Result<()> {
    let engine = ComplaintEngine::new(EngineConfig::default())?;
    let summary = engine.summarize(SAMPLE_TEXTS);
    assert_eq!(summary.total_analyzed, SAMPLE_TEXTS.len());
    assert_eq!(
        summary.distribution.positive + summary.distribution.negative + summary.distribution.neutral,
        SAMPLE_TEXTS.len()
    );

    let empty = engine.summarize::<&str>(&[]);
    assert_eq!(empty.total_analyzed, 0);
    assert_eq!(empty.overall, SentimentLabel::Neutral);
    assert_eq!(empty.average_polarity, 0.0);
    Ok(())
}

#[test]
fn test_keywords_and_statistics() -> Result<()> {
    let engine = ComplaintEngine::new(EngineConfig::default())?;
    assert_eq!(
        engine.extract_keywords("The app crashes when I upload photos!"),
        vec!["crashes", "when", "upload", "photos"]
    );
    assert!(engine.extract_keywords("").is_empty());

    let stats = engine.text_statistics("Refund please. Refund now!");
    assert_eq!(stats.word_count, 4);
    assert_eq!(stats.most_common_words[0], ("refund".to_string(), 2));
    assert_eq!(stats.exclamation_count, 1);
    Ok(())
}
