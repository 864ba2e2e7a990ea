//! Engine facade: the two public entry points plus the host-facing seams
//! (classifier adapter, persistence sink, cancellation).
//!
//! The engine holds no mutable state; every call builds its result from
//! scratch, so concurrent invocations are independent. The only suspension
//! points are the classifier call (bounded by a fail-open timeout) and the
//! sink callbacks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::analyzer::ConversationAnalyzer;
use crate::config::AppConfig;
use crate::error::{ChatInsightError, Result};
use crate::models::{
    BulkAnalysis, BulkSummary, ChatAnalysis, ClassifierOutput, Diagnostic, Message,
    MessageAnalysis, Platform, SentimentCounts,
};
use crate::parser::ChatParser;
use crate::redflags;
use crate::sentiment::{Classifier, SentimentScorer};
use crate::validation::InputValidator;

/// Cooperative cancellation signal shared between the host and the engine.
/// Checked at per-message boundaries; cancellation yields a partial result.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Persistence seam. The engine emits one call per parsed message, in
/// message order, then one call for the finished analysis. Implementations
/// signal a hard stop by returning [`ChatInsightError::SinkAbort`]; any
/// other error is recorded as a diagnostic and processing continues.
#[async_trait]
pub trait AnalysisSink: Send + Sync {
    async fn save_message(&self, message: &Message) -> Result<()>;
    async fn save_analysis(&self, analysis: &ChatAnalysis) -> Result<()>;
}

/// The chat analysis engine.
pub struct AnalysisEngine {
    config: AppConfig,
    parser: ChatParser,
    analyzer: ConversationAnalyzer,
    scorer: SentimentScorer,
    classifier: Option<Arc<dyn Classifier>>,
}

impl AnalysisEngine {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            parser: ChatParser::new(),
            analyzer: ConversationAnalyzer::new(),
            scorer: SentimentScorer::new(),
            classifier: None,
        }
    }

    /// Attach an optional neural classifier adapter. The engine works fully
    /// without one.
    #[must_use]
    pub fn with_classifier(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Score a single message. Safe to call concurrently.
    pub async fn analyze_message(&self, text: &str) -> Result<MessageAnalysis> {
        InputValidator::validate_message_text(text, &self.config.engine)?;

        let hint = self.classifier_hint(text).await;
        let result = self.scorer.score(text, hint.as_ref());

        debug!(sentiment = %result.sentiment, confidence = result.confidence, "message scored");

        Ok(MessageAnalysis {
            message: text.to_string(),
            sentiment: result.sentiment,
            confidence: result.confidence,
            emotions: result.emotions,
            emoji_analysis: result.emoji_analysis,
            timestamp: Utc::now(),
            analysis_id: Uuid::new_v4().to_string(),
        })
    }

    /// Score a batch of independent messages and summarise the distribution.
    pub async fn analyze_messages(&self, texts: &[String]) -> Result<BulkAnalysis> {
        let mut results = Vec::with_capacity(texts.len());
        let mut distribution = SentimentCounts::default();
        let mut confidence_sum = 0.0;

        for text in texts {
            let analysis = self.analyze_message(text).await?;
            distribution.record(analysis.sentiment);
            confidence_sum += analysis.confidence;
            results.push(analysis);
        }

        let total = results.len() as u64;
        let average_confidence = if results.is_empty() {
            0.0
        } else {
            confidence_sum / results.len() as f64
        };

        Ok(BulkAnalysis {
            results,
            summary: BulkSummary {
                total_messages: total,
                sentiment_distribution: distribution,
                average_confidence,
            },
        })
    }

    /// Parse, aggregate, and flag a whole transcript.
    ///
    /// Input-shape errors are fatal and returned before any processing. All
    /// other anomalies surface in the diagnostics list. Cancellation and a
    /// sink abort return the partial analysis inside the error.
    pub async fn analyze_conversation(
        &self,
        raw: &str,
        hint: Option<Platform>,
        self_name: Option<&str>,
        sink: Option<&dyn AnalysisSink>,
        cancel: Option<&CancelFlag>,
    ) -> Result<(ChatAnalysis, Vec<Diagnostic>)> {
        InputValidator::validate_conversation_text(raw, &self.config.engine)?;
        if let Some(name) = self_name {
            InputValidator::validate_self_name(name)?;
        }

        let outcome = self.parser.parse(raw, hint);
        let mut diagnostics = outcome.diagnostics;
        let messages = outcome.messages;

        if let Some(language) = whatlang::detect(raw) {
            diagnostics.push(Diagnostic::new(
                "language_detected",
                language.lang().code(),
            ));
        }

        // Sink emission, one call per message in message order.
        if let Some(sink) = sink {
            for (emitted, message) in messages.iter().enumerate() {
                if cancel.is_some_and(CancelFlag::is_cancelled) {
                    let partial = self.finish(&messages[..emitted], outcome.format, self_name, None);
                    return Err(ChatInsightError::Canceled {
                        partial: Some(Box::new(partial.0)),
                    });
                }
                match sink.save_message(message).await {
                    Ok(()) => {}
                    Err(ChatInsightError::SinkAbort { .. }) => {
                        warn!(emitted, "sink aborted persistence");
                        let partial = self.finish(&messages[..emitted], outcome.format, self_name, None);
                        return Err(ChatInsightError::SinkAbort {
                            partial: Some(Box::new(partial.0)),
                        });
                    }
                    Err(err) => {
                        diagnostics.push(Diagnostic::new("sink_error", err.to_string()));
                    }
                }
            }
        }

        let (analysis, aggregation_diagnostics, canceled) =
            self.finish(&messages, outcome.format, self_name, cancel);
        diagnostics.extend(aggregation_diagnostics);

        if canceled {
            return Err(ChatInsightError::Canceled {
                partial: Some(Box::new(analysis)),
            });
        }

        if let Some(sink) = sink {
            if let Err(err) = sink.save_analysis(&analysis).await {
                diagnostics.push(Diagnostic::new("sink_error", err.to_string()));
            }
        }

        info!(
            format = %analysis.format_detected,
            total = analysis.total_messages,
            red_flags = analysis.red_flags.total_red_flags,
            health = ?analysis.red_flags.overall_health,
            "conversation analyzed"
        );

        Ok((analysis, diagnostics))
    }

    /// Aggregate and run red-flag detection over a message prefix.
    fn finish(
        &self,
        messages: &[Message],
        format: Platform,
        self_name: Option<&str>,
        cancel: Option<&CancelFlag>,
    ) -> (ChatAnalysis, Vec<Diagnostic>, bool) {
        let output = self.analyzer.aggregate(messages, format, self_name, cancel);
        let mut analysis = output.analysis;
        analysis.red_flags = redflags::detect(&analysis, messages, &self.config.red_flags);
        (analysis, output.diagnostics, output.canceled)
    }

    /// Ask the classifier with the configured timeout; any failure falls
    /// open to pure lexical scoring.
    async fn classifier_hint(&self, text: &str) -> Option<ClassifierOutput> {
        let classifier = self.classifier.as_ref()?;
        let budget = Duration::from_millis(self.config.engine.classifier_timeout_ms);
        match timeout(budget, classifier.classify(text)).await {
            Ok(Ok(output)) => Some(output),
            Ok(Err(err)) => {
                warn!(error = %err, "classifier failed, using lexical fallback");
                None
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.config.engine.classifier_timeout_ms,
                    "classifier timed out, using lexical fallback"
                );
                None
            }
        }
    }
}
