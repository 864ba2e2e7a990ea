//! Conversation aggregation: turns a canonical message sequence into the
//! full `ChatAnalysis` record.
//!
//! Everything here is computed in a single pass where possible; only the
//! response-time percentiles need a per-participant sort. Red flags are not
//! produced here — the engine runs the detector over the finished record.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::emoji::EmojiAnalyzer;
use crate::engine::CancelFlag;
use crate::models::{
    BackAndForthMetrics, BasicStats, ChatAnalysis, ConversationPeriod, DayOfWeekDistribution,
    Diagnostic, EmojiCount, EngagementMetrics, HourCount, LongestMessage, Message,
    MessagingPatterns, Participant, ParticipantEmojiStats, ParticipantRole, Platform,
    RedFlagReport, ResponseTimeStats, SentimentAnalysis, SentimentCounts, SentimentResult,
    SentimentRollup,
};
use crate::sentiment::SentimentScorer;

/// Response deltas above this cap are not response times.
const RESPONSE_TIME_CAP_HOURS: i64 = 24;
/// A silence of at least this many hours starts a new conversation.
const CONVERSATION_GAP_HOURS: i64 = 6;
/// How many hours make the most-active list.
const MOST_ACTIVE_HOURS: usize = 5;
/// How many emoji sequences make a participant's top list.
const TOP_EMOJIS: usize = 10;

#[derive(Debug, Clone)]
pub struct AggregationOutput {
    pub analysis: ChatAnalysis,
    pub diagnostics: Vec<Diagnostic>,
    pub canceled: bool,
}

/// Aggregates parsed messages into behavioural metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConversationAnalyzer {
    scorer: SentimentScorer,
    emoji: EmojiAnalyzer,
}

impl ConversationAnalyzer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            scorer: SentimentScorer::new(),
            emoji: EmojiAnalyzer::new(),
        }
    }

    /// Aggregate a message sequence. When the cancel flag trips mid-scoring,
    /// the result covers the completed prefix and `canceled` is set.
    #[must_use]
    pub fn aggregate(
        &self,
        messages: &[Message],
        format: Platform,
        self_name: Option<&str>,
        cancel: Option<&CancelFlag>,
    ) -> AggregationOutput {
        let mut diagnostics = Vec::new();

        // Messages without timestamps keep parse order; fully timestamped
        // sequences are sorted chronologically (stable).
        let mut ordered: Vec<Message> = messages.to_vec();
        if ordered.iter().all(|m| m.timestamp.is_some()) {
            ordered.sort_by_key(|m| m.timestamp);
        }

        // Sentiment scoring pass, in message order, with the cancel check at
        // the per-message boundary. Media messages are not scored.
        let mut scored: Vec<Option<SentimentResult>> = Vec::with_capacity(ordered.len());
        let mut canceled = false;
        for message in &ordered {
            if cancel.is_some_and(CancelFlag::is_cancelled) {
                canceled = true;
                break;
            }
            scored.push(if message.is_media {
                None
            } else {
                Some(self.scorer.score(&message.text, None))
            });
        }
        if canceled {
            ordered.truncate(scored.len());
        }

        let period = compute_period(&ordered);
        let participants = identify_participants(&ordered, self_name);
        let basic_stats = compute_basic_stats(&ordered, &participants);
        let messaging_patterns = compute_patterns(&ordered, &participants, period.as_ref());
        let engagement_metrics = compute_engagement(&ordered);
        let sentiment_analysis =
            compute_sentiment_rollups(&ordered, &scored, &participants, &mut diagnostics);
        let emoji_stats = self.compute_emoji_stats(&ordered, &participants);

        debug!(
            total = ordered.len(),
            participants = participants.len(),
            canceled,
            "aggregation complete"
        );

        AggregationOutput {
            analysis: ChatAnalysis {
                analysis_id: Uuid::new_v4().to_string(),
                format_detected: format,
                total_messages: ordered.len() as u64,
                period,
                participants,
                basic_stats,
                messaging_patterns,
                engagement_metrics,
                sentiment_analysis,
                emoji_stats,
                red_flags: RedFlagReport::default(),
            },
            diagnostics,
            canceled,
        }
    }

    fn compute_emoji_stats(
        &self,
        messages: &[Message],
        participants: &BTreeMap<String, Participant>,
    ) -> BTreeMap<String, ParticipantEmojiStats> {
        // First-appearance order per participant, so count ties keep it.
        let mut usage: BTreeMap<String, Vec<EmojiCount>> = BTreeMap::new();
        for message in messages {
            let found = self.emoji.extract(&message.text);
            if found.is_empty() {
                continue;
            }
            let entry = usage.entry(message.sender.clone()).or_default();
            for item in found {
                match entry.iter_mut().find(|e| e.emoji == item.emoji) {
                    Some(existing) => existing.count += item.count,
                    None => entry.push(item),
                }
            }
        }

        participants
            .iter()
            .map(|(name, participant)| {
                let counts = usage.remove(name).unwrap_or_default();
                let total: u64 = counts.iter().map(|c| c.count).sum();
                let mut top = counts.clone();
                top.sort_by(|a, b| b.count.cmp(&a.count));
                top.truncate(TOP_EMOJIS);
                let stats = ParticipantEmojiStats {
                    total_emojis: total,
                    unique_emojis: counts.len() as u64,
                    emojis_per_message: if participant.message_count == 0 {
                        0.0
                    } else {
                        total as f64 / participant.message_count as f64
                    },
                    most_used_emojis: top,
                };
                (name.clone(), stats)
            })
            .collect()
    }
}

fn compute_period(messages: &[Message]) -> Option<ConversationPeriod> {
    let timestamps: Vec<DateTime<Utc>> = messages.iter().filter_map(|m| m.timestamp).collect();
    let start = *timestamps.iter().min()?;
    let end = *timestamps.iter().max()?;
    let duration_days = (end - start).num_seconds() / 86_400 + 1;
    Some(ConversationPeriod {
        start,
        end,
        duration_days,
    })
}

fn identify_participants(
    messages: &[Message],
    self_name: Option<&str>,
) -> BTreeMap<String, Participant> {
    let normalized_self = self_name.map(|n| n.trim().to_lowercase());

    // The first sender matching the caller-supplied name is `self`; there is
    // at most one even when several senders normalise to the same string.
    let mut self_sender: Option<&str> = None;
    if let Some(target) = &normalized_self {
        for message in messages {
            if message.sender.trim().to_lowercase() == *target {
                self_sender = Some(message.sender.as_str());
                break;
            }
        }
    }

    let mut counts: BTreeMap<String, (u64, u64)> = BTreeMap::new();
    for message in messages {
        let entry = counts.entry(message.sender.clone()).or_default();
        entry.0 += 1;
        entry.1 += message.text.chars().count() as u64;
    }

    counts
        .into_iter()
        .map(|(name, (count, total_chars))| {
            let role = if Some(name.as_str()) == self_sender {
                ParticipantRole::SelfUser
            } else {
                ParticipantRole::Other
            };
            let participant = Participant {
                name: name.clone(),
                role,
                message_count: count,
                average_length: if count == 0 {
                    0.0
                } else {
                    total_chars as f64 / count as f64
                },
            };
            (name, participant)
        })
        .collect()
}

fn compute_basic_stats(
    messages: &[Message],
    participants: &BTreeMap<String, Participant>,
) -> BasicStats {
    let total = messages.len() as u64;
    let total_chars: u64 = messages.iter().map(|m| m.text.chars().count() as u64).sum();

    // Longest message; ties go to the earlier timestamp, then the
    // lexicographically smaller sender.
    let mut longest = LongestMessage {
        sender: String::new(),
        length: 0,
    };
    let mut longest_ts: Option<DateTime<Utc>> = None;
    for message in messages {
        let length = message.text.chars().count() as u64;
        let wins = length > longest.length
            || (length == longest.length
                && length > 0
                && (earlier(message.timestamp, longest_ts)
                    || (message.timestamp == longest_ts && message.sender < longest.sender)));
        if wins {
            longest = LongestMessage {
                sender: message.sender.clone(),
                length,
            };
            longest_ts = message.timestamp;
        }
    }

    BasicStats {
        total_messages: total,
        average_message_length: if total == 0 {
            0.0
        } else {
            total_chars as f64 / total as f64
        },
        longest_message: longest,
        messages_per_participant: participants
            .iter()
            .map(|(name, p)| (name.clone(), p.message_count))
            .collect(),
    }
}

fn earlier(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a < b,
        (Some(_), None) => true,
        _ => false,
    }
}

fn compute_patterns(
    messages: &[Message],
    participants: &BTreeMap<String, Participant>,
    period: Option<&ConversationPeriod>,
) -> MessagingPatterns {
    let mut hourly = [0u64; 24];
    let mut by_day = DayOfWeekDistribution::default();
    for message in messages {
        if let Some(ts) = message.timestamp {
            hourly[chrono::Timelike::hour(&ts) as usize] += 1;
            by_day.increment(chrono::Datelike::weekday(&ts));
        }
    }

    let mut active: Vec<HourCount> = hourly
        .iter()
        .enumerate()
        .filter(|(_, &count)| count > 0)
        .map(|(hour, &count)| HourCount {
            hour: hour as u8,
            count,
        })
        .collect();
    active.sort_by(|a, b| b.count.cmp(&a.count).then(a.hour.cmp(&b.hour)));
    active.truncate(MOST_ACTIVE_HOURS);

    let period_days = period.map_or(1, |p| p.duration_days.max(1));
    let frequency = participants
        .iter()
        .map(|(name, p)| (name.clone(), p.message_count as f64 / period_days as f64))
        .collect();

    MessagingPatterns {
        hourly_distribution: hourly,
        day_of_week_distribution: by_day,
        most_active_hours: active,
        frequency_per_participant: frequency,
    }
}

fn compute_engagement(messages: &[Message]) -> EngagementMetrics {
    let cap_minutes = (RESPONSE_TIME_CAP_HOURS * 60) as f64;
    let gap_minutes = (CONVERSATION_GAP_HOURS * 60) as f64;

    let mut deltas: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    let mut initiations: BTreeMap<String, u64> = BTreeMap::new();

    if let Some(first) = messages.first() {
        *initiations.entry(first.sender.clone()).or_default() += 1;
    }

    for pair in messages.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        let minutes = match (prev.timestamp, curr.timestamp) {
            (Some(a), Some(b)) => Some((b - a).num_seconds() as f64 / 60.0),
            _ => None,
        };

        if let Some(minutes) = minutes {
            if minutes >= gap_minutes {
                *initiations.entry(curr.sender.clone()).or_default() += 1;
            }
            if prev.sender != curr.sender && (0.0..=cap_minutes).contains(&minutes) {
                deltas.entry(curr.sender.clone()).or_default().push(minutes);
            }
        }
    }

    let response_time_analysis = deltas
        .into_iter()
        .map(|(name, mut times)| {
            times.sort_by(|a, b| a.partial_cmp(b).expect("finite minutes"));
            let count = times.len() as u64;
            let average = times.iter().sum::<f64>() / times.len() as f64;
            let stats = ResponseTimeStats {
                average_minutes: average,
                median_minutes: percentile_linear(&times, 0.5),
                fastest_minutes: times[0],
                slowest_minutes: times[times.len() - 1],
                count,
            };
            (name, stats)
        })
        .collect();

    EngagementMetrics {
        response_time_analysis,
        conversation_initiations: initiations,
        back_and_forth_metrics: compute_exchanges(messages),
    }
}

/// 50th-percentile and friends with linear interpolation over sorted data.
fn percentile_linear(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let position = (sorted.len() - 1) as f64 * q;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let fraction = position - lower as f64;
        sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
    }
}

/// Exchanges are maximal runs with strict sender alternation; only runs of
/// length >= 2 count.
fn compute_exchanges(messages: &[Message]) -> BackAndForthMetrics {
    let mut exchanges: Vec<u64> = Vec::new();
    let mut run_length = 0u64;

    for (i, message) in messages.iter().enumerate() {
        if i == 0 {
            run_length = 1;
        } else if messages[i - 1].sender != message.sender {
            run_length += 1;
        } else {
            if run_length >= 2 {
                exchanges.push(run_length);
            }
            run_length = 1;
        }
    }
    if run_length >= 2 {
        exchanges.push(run_length);
    }

    if exchanges.is_empty() {
        return BackAndForthMetrics::default();
    }
    BackAndForthMetrics {
        total_exchanges: exchanges.len() as u64,
        average_exchange_length: exchanges.iter().sum::<u64>() as f64 / exchanges.len() as f64,
        longest_exchange: *exchanges.iter().max().expect("non-empty exchanges"),
    }
}

fn compute_sentiment_rollups(
    messages: &[Message],
    scored: &[Option<SentimentResult>],
    participants: &BTreeMap<String, Participant>,
    diagnostics: &mut Vec<Diagnostic>,
) -> SentimentAnalysis {
    let mut per_participant_counts: BTreeMap<String, SentimentCounts> = BTreeMap::new();
    let mut overall_counts = SentimentCounts::default();

    for (message, result) in messages.iter().zip(scored.iter()) {
        if let Some(result) = result {
            per_participant_counts
                .entry(message.sender.clone())
                .or_default()
                .record(result.sentiment);
            overall_counts.record(result.sentiment);
        }
    }

    let per_participant: BTreeMap<String, SentimentRollup> = participants
        .keys()
        .map(|name| {
            let counts = per_participant_counts.remove(name).unwrap_or_default();
            if counts.total() == 0 {
                diagnostics.push(Diagnostic::new("no_scored_messages", name.clone()));
            }
            (name.clone(), SentimentRollup::from_counts(&counts))
        })
        .collect();

    if overall_counts.total() == 0 && !messages.is_empty() {
        diagnostics.push(Diagnostic::new("no_scored_messages", "overall"));
    }

    SentimentAnalysis {
        per_participant,
        overall: SentimentRollup::from_counts(&overall_counts),
    }
}
