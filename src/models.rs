use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Source platform of a parsed transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Whatsapp,
    Telegram,
    Discord,
    Imessage,
    Generic,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Whatsapp => "whatsapp",
            Platform::Telegram => "telegram",
            Platform::Discord => "discord",
            Platform::Imessage => "imessage",
            Platform::Generic => "generic",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "whatsapp" => Ok(Platform::Whatsapp),
            "telegram" => Ok(Platform::Telegram),
            "discord" => Ok(Platform::Discord),
            "imessage" => Ok(Platform::Imessage),
            "generic" => Ok(Platform::Generic),
            other => Err(format!("unknown platform: {other}")),
        }
    }
}

/// Canonical message, immutable after parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// UTC instant, or None when the source format carries no timestamp
    pub timestamp: Option<DateTime<Utc>>,
    pub sender: String,
    pub text: String,
    pub platform: Platform,
    pub is_media: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticipantRole {
    #[serde(rename = "self")]
    SelfUser,
    #[serde(rename = "other")]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub role: ParticipantRole,
    pub message_count: u64,
    pub average_length: f64,
}

/// Three-valued sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        };
        write!(f, "{name}")
    }
}

/// Compact emoji polarity summary attached to a sentiment result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmojiAnalysis {
    pub sentiment: SentimentLabel,
    pub confidence: f64,
    pub has_emojis: bool,
}

/// Per-emoji usage count; order of appearance is preserved by the containers
/// that hold these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmojiCount {
    pub emoji: String,
    pub count: u64,
}

/// Full output of the emoji analyzer for one text run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmojiScan {
    pub has_emojis: bool,
    pub count: usize,
    pub per_emoji_counts: Vec<EmojiCount>,
    pub sentiment: SentimentLabel,
    pub confidence: f64,
}

impl EmojiScan {
    #[must_use]
    pub fn summary(&self) -> EmojiAnalysis {
        EmojiAnalysis {
            sentiment: self.sentiment,
            confidence: self.confidence,
            has_emojis: self.has_emojis,
        }
    }
}

/// Result of scoring one text run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub sentiment: SentimentLabel,
    pub confidence: f64,
    /// Present only when a classifier result contributed
    pub emotions: Option<BTreeMap<String, f64>>,
    pub emoji_analysis: Option<EmojiAnalysis>,
}

/// Output contract of the optional neural classifier adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierOutput {
    pub label: SentimentLabel,
    pub confidence: f64,
    pub emotions: BTreeMap<String, f64>,
}

/// Single-message analysis envelope returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageAnalysis {
    pub message: String,
    pub sentiment: SentimentLabel,
    pub confidence: f64,
    pub emotions: Option<BTreeMap<String, f64>>,
    pub emoji_analysis: Option<EmojiAnalysis>,
    pub timestamp: DateTime<Utc>,
    pub analysis_id: String,
}

/// Sentiment distribution counts for bulk scoring summaries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
}

impl SentimentCounts {
    pub fn record(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Negative => self.negative += 1,
            SentimentLabel::Neutral => self.neutral += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.positive + self.negative + self.neutral
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkSummary {
    pub total_messages: u64,
    pub sentiment_distribution: SentimentCounts,
    pub average_confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkAnalysis {
    pub results: Vec<MessageAnalysis>,
    pub summary: BulkSummary,
}

/// First and last timestamps of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversationPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Inclusive calendar span: floor((end - start) / 24h) + 1
    pub duration_days: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongestMessage {
    pub sender: String,
    pub length: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicStats {
    pub total_messages: u64,
    pub average_message_length: f64,
    pub longest_message: LongestMessage,
    pub messages_per_participant: BTreeMap<String, u64>,
}

/// Message counts keyed by weekday, serialised with capitalised day names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DayOfWeekDistribution {
    #[serde(rename = "Monday")]
    pub monday: u64,
    #[serde(rename = "Tuesday")]
    pub tuesday: u64,
    #[serde(rename = "Wednesday")]
    pub wednesday: u64,
    #[serde(rename = "Thursday")]
    pub thursday: u64,
    #[serde(rename = "Friday")]
    pub friday: u64,
    #[serde(rename = "Saturday")]
    pub saturday: u64,
    #[serde(rename = "Sunday")]
    pub sunday: u64,
}

impl DayOfWeekDistribution {
    pub fn increment(&mut self, weekday: chrono::Weekday) {
        match weekday {
            chrono::Weekday::Mon => self.monday += 1,
            chrono::Weekday::Tue => self.tuesday += 1,
            chrono::Weekday::Wed => self.wednesday += 1,
            chrono::Weekday::Thu => self.thursday += 1,
            chrono::Weekday::Fri => self.friday += 1,
            chrono::Weekday::Sat => self.saturday += 1,
            chrono::Weekday::Sun => self.sunday += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.monday
            + self.tuesday
            + self.wednesday
            + self.thursday
            + self.friday
            + self.saturday
            + self.sunday
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourCount {
    pub hour: u8,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagingPatterns {
    pub hourly_distribution: [u64; 24],
    pub day_of_week_distribution: DayOfWeekDistribution,
    /// Top 5 hours by count desc, hour asc on ties
    pub most_active_hours: Vec<HourCount>,
    /// Messages per day, per participant
    pub frequency_per_participant: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseTimeStats {
    pub average_minutes: f64,
    pub median_minutes: f64,
    pub fastest_minutes: f64,
    pub slowest_minutes: f64,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackAndForthMetrics {
    pub total_exchanges: u64,
    pub average_exchange_length: f64,
    pub longest_exchange: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngagementMetrics {
    pub response_time_analysis: BTreeMap<String, ResponseTimeStats>,
    pub conversation_initiations: BTreeMap<String, u64>,
    pub back_and_forth_metrics: BackAndForthMetrics,
}

/// Per-sender (or overall) sentiment distribution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentRollup {
    pub positive_messages: u64,
    pub negative_messages: u64,
    pub neutral_messages: u64,
    pub positive_ratio: f64,
    pub negative_ratio: f64,
    pub neutral_ratio: f64,
}

impl SentimentRollup {
    /// Build ratios from counts; all ratios stay 0 when nothing was scored.
    #[must_use]
    pub fn from_counts(counts: &SentimentCounts) -> Self {
        let total = counts.total();
        let ratio = |n: u64| {
            if total == 0 {
                0.0
            } else {
                n as f64 / total as f64
            }
        };
        Self {
            positive_messages: counts.positive,
            negative_messages: counts.negative,
            neutral_messages: counts.neutral,
            positive_ratio: ratio(counts.positive),
            negative_ratio: ratio(counts.negative),
            neutral_ratio: ratio(counts.neutral),
        }
    }

    #[must_use]
    pub fn scored_total(&self) -> u64 {
        self.positive_messages + self.negative_messages + self.neutral_messages
    }

    /// Dashboard wellbeing derivation: 0-10 score from the distribution.
    #[must_use]
    pub fn wellbeing(&self) -> WellbeingSnapshot {
        let score = (self.positive_ratio * 10.0 - self.negative_ratio * 5.0 + 5.0).clamp(0.0, 10.0);
        let risk_level = if score >= 7.0 {
            RiskLevel::Low
        } else if score >= 4.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        };
        let description = match risk_level {
            RiskLevel::Low => "Sentiment indicators look positive.",
            RiskLevel::Medium => "Sentiment shows some areas for improvement.",
            RiskLevel::High => "Sentiment indicators suggest elevated distress.",
        };
        WellbeingSnapshot {
            wellbeing_score: score,
            risk_level,
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellbeingSnapshot {
    pub wellbeing_score: f64,
    pub risk_level: RiskLevel,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    pub per_participant: BTreeMap<String, SentimentRollup>,
    pub overall: SentimentRollup,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticipantEmojiStats {
    pub total_emojis: u64,
    pub unique_emojis: u64,
    pub emojis_per_message: f64,
    /// Top 10 by count desc, first appearance on ties
    pub most_used_emojis: Vec<EmojiCount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    MessageImbalance,
    SlowResponses,
    FrequencyDrop,
    OneSidedInitiation,
    LowEngagement,
    HighNegativeSentiment,
    NightActivitySkew,
    BurstSilence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    #[serde(rename = "type")]
    pub kind: FindingKind,
    pub severity: Severity,
    pub description: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthIndicator {
    Healthy,
    Moderate,
    Concerning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedFlagReport {
    pub red_flags: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub total_red_flags: u64,
    pub total_warnings: u64,
    pub overall_health: HealthIndicator,
}

impl Default for RedFlagReport {
    fn default() -> Self {
        Self {
            red_flags: Vec::new(),
            warnings: Vec::new(),
            total_red_flags: 0,
            total_warnings: 0,
            overall_health: HealthIndicator::Healthy,
        }
    }
}

/// Root analysis record, created by one `analyze_conversation` call and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatAnalysis {
    pub analysis_id: String,
    pub format_detected: Platform,
    pub total_messages: u64,
    pub period: Option<ConversationPeriod>,
    pub participants: BTreeMap<String, Participant>,
    pub basic_stats: BasicStats,
    pub messaging_patterns: MessagingPatterns,
    pub engagement_metrics: EngagementMetrics,
    pub sentiment_analysis: SentimentAnalysis,
    pub emoji_stats: BTreeMap<String, ParticipantEmojiStats>,
    pub red_flags: RedFlagReport,
}

/// Non-fatal anomaly attached to an analysis result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: String,
    pub detail: String,
}

impl Diagnostic {
    #[must_use]
    pub fn new(kind: &str, detail: impl Into<String>) -> Self {
        Self {
            kind: kind.to_string(),
            detail: detail.into(),
        }
    }
}

/// Conversation response envelope: the analysis plus diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationReport {
    #[serde(flatten)]
    pub analysis: ChatAnalysis,
    pub total_messages_analyzed: u64,
    pub diagnostics: Vec<Diagnostic>,
}

/// Export format for parsed message sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Txt,
    Csv,
    Json,
}

impl OutputFormat {
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Txt => "txt",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "txt" => Ok(OutputFormat::Txt),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
