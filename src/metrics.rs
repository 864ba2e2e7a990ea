use std::time::Duration;

/// Simple metrics collection for the analysis engine
#[derive(Debug, Default)]
pub struct MetricsCollector {
    pub messages_parsed_total: u64,
    pub conversations_analyzed_total: u64,
    pub messages_scored_total: u64,
    pub classifier_fallbacks_total: u64,
    pub red_flags_raised_total: u64,
    pub sink_errors_total: u64,
    pub errors_total: u64,
}

impl MetricsCollector {
    /// Record a completed parse
    pub fn record_parse(&mut self, message_count: usize, format: &str, duration: Duration) {
        self.messages_parsed_total += message_count as u64;

        tracing::debug!(
            format = format,
            count = message_count,
            duration_ms = duration.as_millis(),
            "Transcript parsed"
        );
    }

    /// Record a completed conversation analysis
    pub fn record_conversation(&mut self, message_count: usize, red_flags: usize, duration: Duration) {
        self.conversations_analyzed_total += 1;
        self.red_flags_raised_total += red_flags as u64;

        tracing::info!(
            count = message_count,
            red_flags = red_flags,
            duration_ms = duration.as_millis(),
            "Conversation analyzed"
        );
    }

    /// Record sentiment scoring work
    pub fn record_scoring(&mut self, count: usize, duration: Duration) {
        self.messages_scored_total += count as u64;

        tracing::debug!(
            count = count,
            duration_ms = duration.as_millis(),
            "Sentiment scoring completed"
        );
    }

    /// Record a classifier fallback to lexical scoring
    pub fn record_classifier_fallback(&mut self, reason: &str) {
        self.classifier_fallbacks_total += 1;

        tracing::warn!(reason = reason, "Classifier unavailable, lexical fallback used");
    }

    /// Record a non-fatal sink failure
    pub fn record_sink_error(&mut self, detail: &str) {
        self.sink_errors_total += 1;

        tracing::warn!(detail = detail, "Sink error recorded");
    }

    /// Record error metrics
    pub fn record_error(&mut self, error_type: &str, operation: &str) {
        self.errors_total += 1;

        tracing::error!(
            error_type = error_type,
            operation = operation,
            "Error recorded"
        );
    }

    /// Get current metrics summary
    #[must_use]
    pub fn get_summary(&self) -> String {
        format!(
            "Metrics Summary:\n\
            - Messages parsed: {}\n\
            - Conversations analyzed: {}\n\
            - Messages scored: {}\n\
            - Classifier fallbacks: {}\n\
            - Red flags raised: {}\n\
            - Sink errors: {}\n\
            - Errors: {}",
            self.messages_parsed_total,
            self.conversations_analyzed_total,
            self.messages_scored_total,
            self.classifier_fallbacks_total,
            self.red_flags_raised_total,
            self.sink_errors_total,
            self.errors_total
        )
    }
}

/// Performance timing wrapper for metrics
pub struct MetricsTimer {
    start: std::time::Instant,
}

impl Default for MetricsTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsTimer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
