use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chat_insight::config::AppConfig;
use chat_insight::engine::{AnalysisEngine, AnalysisSink, CancelFlag};
use chat_insight::error::{ChatInsightError, Result};
use chat_insight::models::{
    ChatAnalysis, ClassifierOutput, Message, Platform, SentimentLabel,
};
use chat_insight::sentiment::Classifier;

fn engine() -> AnalysisEngine {
    AnalysisEngine::new(AppConfig::default())
}

/// The WhatsApp minimal scenario: two messages, one participant each,
/// fully positive sender, one-day period.
#[tokio::test]
async fn test_whatsapp_minimal_scenario() {
    let raw = "12/31/2023, 10:30 PM - Alice: I'm feeling great today! 😊\n\
               12/31/2023, 10:31 PM - Bob: Awesome!";
    let (analysis, diagnostics) = engine()
        .analyze_conversation(raw, None, None, None, None)
        .await
        .unwrap();

    assert_eq!(analysis.format_detected, Platform::Whatsapp);
    assert_eq!(analysis.total_messages, 2);
    assert_eq!(analysis.participants["Alice"].message_count, 1);
    assert_eq!(analysis.participants["Bob"].message_count, 1);
    assert_eq!(
        analysis.sentiment_analysis.per_participant["Alice"].positive_ratio,
        1.0
    );
    assert_eq!(analysis.period.unwrap().duration_days, 1);
    assert!(diagnostics
        .iter()
        .any(|d| d.kind == "naive_timestamps_assumed_utc"));
}

#[tokio::test]
async fn test_self_name_roles_through_facade() {
    let raw = "12/31/2023, 10:30 PM - Alice: I'm feeling great today!\n\
               12/31/2023, 10:31 PM - Bob: Awesome!";
    let (analysis, _) = engine()
        .analyze_conversation(raw, None, Some("Alice"), None, None)
        .await
        .unwrap();
    assert_eq!(
        analysis.participants["Alice"].role,
        chat_insight::models::ParticipantRole::SelfUser
    );
    assert_eq!(
        analysis.participants["Bob"].role,
        chat_insight::models::ParticipantRole::Other
    );
}

#[tokio::test]
async fn test_message_endpoint_shapes() {
    let result = engine().analyze_message("Can't wait for tomorrow!").await.unwrap();
    assert_eq!(result.sentiment, SentimentLabel::Positive);
    assert!(result.confidence >= 0.70);
    assert!(!result.analysis_id.is_empty());
    assert!(result.emotions.is_none());
}

#[tokio::test]
async fn test_fatal_input_errors() {
    let engine = engine();

    let too_small = engine
        .analyze_conversation("hey", None, None, None, None)
        .await
        .unwrap_err();
    assert!(matches!(too_small, ChatInsightError::InputTooSmall { .. }));
    assert!(too_small.is_fatal());

    let mut config = AppConfig::default();
    config.engine.max_bulk_bytes = 32;
    let capped = AnalysisEngine::new(config);
    let raw = "Alice: hello there\n".repeat(10);
    let too_large = capped
        .analyze_conversation(&raw, None, None, None, None)
        .await
        .unwrap_err();
    assert!(matches!(too_large, ChatInsightError::InputTooLarge { .. }));
}

struct SlowClassifier;

#[async_trait]
impl Classifier for SlowClassifier {
    async fn classify(&self, _text: &str) -> Result<ClassifierOutput> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(ClassifierOutput {
            label: SentimentLabel::Negative,
            confidence: 0.99,
            emotions: BTreeMap::new(),
        })
    }
}

/// A hanging classifier must fail open to the lexical result within the
/// configured budget.
#[tokio::test(start_paused = true)]
async fn test_classifier_timeout_fails_open() {
    let slow = AnalysisEngine::new(AppConfig::default()).with_classifier(Arc::new(SlowClassifier));
    let started = tokio::time::Instant::now();
    let result = slow.analyze_message("Can't wait for tomorrow!").await.unwrap();
    let elapsed = started.elapsed();

    assert!(elapsed <= Duration::from_millis(2_100));
    let lexical = engine().analyze_message("Can't wait for tomorrow!").await.unwrap();
    assert_eq!(result.sentiment, lexical.sentiment);
    assert_eq!(result.confidence, lexical.confidence);
}

#[derive(Default)]
struct CollectingSink {
    messages: Mutex<Vec<Message>>,
    analyses: Mutex<Vec<ChatAnalysis>>,
}

#[async_trait]
impl AnalysisSink for CollectingSink {
    async fn save_message(&self, message: &Message) -> Result<()> {
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn save_analysis(&self, analysis: &ChatAnalysis) -> Result<()> {
        self.analyses.lock().unwrap().push(analysis.clone());
        Ok(())
    }
}

#[tokio::test]
async fn test_sink_order_matches_message_order() {
    let raw = "Alice: message number one here\n\
               Bob: message number two here\n\
               Alice: message number three here";
    let sink = CollectingSink::default();
    let (analysis, _) = engine()
        .analyze_conversation(raw, None, None, Some(&sink), None)
        .await
        .unwrap();

    let saved = sink.messages.lock().unwrap();
    assert_eq!(saved.len(), 3);
    assert!(saved[0].text.contains("one"));
    assert!(saved[1].text.contains("two"));
    assert!(saved[2].text.contains("three"));

    let analyses = sink.analyses.lock().unwrap();
    assert_eq!(analyses.len(), 1);
    assert_eq!(analyses[0].analysis_id, analysis.analysis_id);
}

struct FlakySink;

#[async_trait]
impl AnalysisSink for FlakySink {
    async fn save_message(&self, _message: &Message) -> Result<()> {
        Err(ChatInsightError::Other("disk full".to_string()))
    }

    async fn save_analysis(&self, _analysis: &ChatAnalysis) -> Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_sink_errors_become_diagnostics() {
    let raw = "Alice: message number one here\nBob: message number two here";
    let (analysis, diagnostics) = engine()
        .analyze_conversation(raw, None, None, Some(&FlakySink), None)
        .await
        .unwrap();
    assert_eq!(analysis.total_messages, 2);
    let sink_errors = diagnostics.iter().filter(|d| d.kind == "sink_error").count();
    assert_eq!(sink_errors, 2);
}

struct AbortingSink {
    after: usize,
    seen: Mutex<usize>,
}

#[async_trait]
impl AnalysisSink for AbortingSink {
    async fn save_message(&self, _message: &Message) -> Result<()> {
        let mut seen = self.seen.lock().unwrap();
        if *seen >= self.after {
            return Err(ChatInsightError::SinkAbort { partial: None });
        }
        *seen += 1;
        Ok(())
    }

    async fn save_analysis(&self, _analysis: &ChatAnalysis) -> Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_sink_abort_short_circuits_with_partial() {
    let raw = "Alice: message number one here\n\
               Bob: message number two here\n\
               Alice: message number three here";
    let sink = AbortingSink {
        after: 2,
        seen: Mutex::new(0),
    };
    let err = engine()
        .analyze_conversation(raw, None, None, Some(&sink), None)
        .await
        .unwrap_err();
    match err {
        ChatInsightError::SinkAbort { partial } => {
            let partial = partial.expect("partial analysis");
            assert_eq!(partial.total_messages, 2);
        }
        other => panic!("expected SinkAbort, got {other:?}"),
    }
}

#[tokio::test]
async fn test_cancellation_before_work_returns_empty_partial() {
    let raw = "Alice: message number one here\nBob: message number two here";
    let cancel = CancelFlag::new();
    cancel.cancel();
    let err = engine()
        .analyze_conversation(raw, None, None, None, Some(&cancel))
        .await
        .unwrap_err();
    match err {
        ChatInsightError::Canceled { partial } => {
            assert_eq!(partial.expect("partial").total_messages, 0);
        }
        other => panic!("expected Canceled, got {other:?}"),
    }
}

#[tokio::test]
async fn test_language_diagnostic_emitted() {
    let raw = "Alice: good morning, how are you doing today my friend?\n\
               Bob: i am doing quite well, thank you for asking";
    let (_, diagnostics) = engine()
        .analyze_conversation(raw, None, None, None, None)
        .await
        .unwrap();
    assert!(diagnostics.iter().any(|d| d.kind == "language_detected"));
}

#[tokio::test]
async fn test_red_flags_populated_through_facade() {
    let mut raw = String::new();
    for day in 1..=5 {
        for i in 0..10 {
            raw.push_str(&format!(
                "12/{day:02}/2023, 10:{i:02} AM - Alice: one more message from me\n"
            ));
        }
        for i in 0..2 {
            raw.push_str(&format!(
                "12/{day:02}/2023, 11:{i:02} AM - Bob: short answer\n"
            ));
        }
    }
    let (analysis, _) = engine()
        .analyze_conversation(&raw, None, None, None, None)
        .await
        .unwrap();
    assert_eq!(analysis.total_messages, 60);
    assert!(analysis
        .red_flags
        .red_flags
        .iter()
        .any(|f| f.kind == chat_insight::models::FindingKind::MessageImbalance));
    assert_eq!(
        analysis.red_flags.overall_health,
        chat_insight::models::HealthIndicator::Concerning
    );
}
