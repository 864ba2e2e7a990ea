//! Red-flag detection over aggregated conversation metrics.
//!
//! Pure rule set: each rule reads the finished metrics (plus the message
//! sequence for the day-level rules) and emits at most one finding. The
//! overall health label is derived from the findings, never stored
//! independently.

use chrono::Datelike;
use tracing::debug;

use crate::config::RedFlagConfig;
use crate::models::{
    ChatAnalysis, Finding, FindingKind, HealthIndicator, Message, RedFlagReport, Severity,
};

/// Run every rule and derive the health label.
#[must_use]
pub fn detect(
    analysis: &ChatAnalysis,
    messages: &[Message],
    config: &RedFlagConfig,
) -> RedFlagReport {
    let mut red_flags = Vec::new();
    let mut warnings = Vec::new();

    if let Some(finding) = message_imbalance(analysis, config) {
        red_flags.push(finding);
    }
    if let Some(finding) = slow_responses(analysis, config) {
        red_flags.push(finding);
    }
    if let Some(finding) = frequency_drop(analysis, messages, config) {
        red_flags.push(finding);
    }
    if let Some(finding) = one_sided_initiation(analysis, config) {
        red_flags.push(finding);
    }
    if let Some(finding) = low_engagement(analysis, messages, config) {
        red_flags.push(finding);
    }

    if let Some(finding) = high_negative_sentiment(analysis, config) {
        warnings.push(finding);
    }
    if let Some(finding) = night_activity_skew(analysis, config) {
        warnings.push(finding);
    }
    if let Some(finding) = burst_silence(analysis, messages, config) {
        warnings.push(finding);
    }

    let total_red_flags = red_flags.len() as u64;
    let total_warnings = warnings.len() as u64;
    let any_high = red_flags.iter().any(|f| f.severity == Severity::High);

    let overall_health = if total_red_flags >= 2 || any_high {
        HealthIndicator::Concerning
    } else if total_red_flags >= 1 || total_warnings >= 2 {
        HealthIndicator::Moderate
    } else {
        HealthIndicator::Healthy
    };

    debug!(
        red_flags = total_red_flags,
        warnings = total_warnings,
        health = ?overall_health,
        "red flag detection complete"
    );

    RedFlagReport {
        red_flags,
        warnings,
        total_red_flags,
        total_warnings,
        overall_health,
    }
}

/// One side sends more than `ratio`x the other's messages.
fn message_imbalance(analysis: &ChatAnalysis, config: &RedFlagConfig) -> Option<Finding> {
    if analysis.total_messages < config.message_imbalance_min_messages
        || analysis.participants.len() < 2
    {
        return None;
    }
    let max = analysis
        .participants
        .values()
        .map(|p| p.message_count)
        .max()?;
    let min = analysis
        .participants
        .values()
        .map(|p| p.message_count)
        .min()?;
    let ratio = max as f64 / min.max(1) as f64;
    (ratio > config.message_imbalance_ratio).then(|| Finding {
        kind: FindingKind::MessageImbalance,
        severity: Severity::High,
        description: format!(
            "Significant message imbalance: one person sends {ratio:.1}x more messages"
        ),
        suggestion: "This may indicate unequal investment in the conversation".to_string(),
    })
}

/// Sustained slow replies from any participant.
fn slow_responses(analysis: &ChatAnalysis, config: &RedFlagConfig) -> Option<Finding> {
    let offenders: Vec<String> = analysis
        .engagement_metrics
        .response_time_analysis
        .iter()
        .filter(|(_, stats)| {
            stats.count >= config.slow_response_min_events
                && stats.average_minutes > config.slow_response_minutes
        })
        .map(|(name, stats)| format!("{name} ({:.1}h avg)", stats.average_minutes / 60.0))
        .collect();
    (!offenders.is_empty()).then(|| Finding {
        kind: FindingKind::SlowResponses,
        severity: Severity::Medium,
        description: format!("Slow responses from {}", offenders.join(", ")),
        suggestion: "Delayed responses might indicate low prioritization".to_string(),
    })
}

/// Messaging rate in the last week fell below half of the first week's.
fn frequency_drop(
    analysis: &ChatAnalysis,
    messages: &[Message],
    config: &RedFlagConfig,
) -> Option<Finding> {
    let period = analysis.period?;
    if period.duration_days < config.frequency_drop_min_days {
        return None;
    }

    let week = chrono::Duration::days(7);
    let first_week_end = period.start + week;
    let last_week_start = period.end - week;

    let first_count = messages
        .iter()
        .filter(|m| m.timestamp.is_some_and(|t| t < first_week_end))
        .count() as f64;
    let last_count = messages
        .iter()
        .filter(|m| m.timestamp.is_some_and(|t| t > last_week_start))
        .count() as f64;

    let first_rate = first_count / 7.0;
    let last_rate = last_count / 7.0;
    if first_rate <= 0.0 {
        return None;
    }

    (last_rate < first_rate * config.frequency_drop_ratio).then(|| {
        let drop_pct = (first_rate - last_rate) / first_rate * 100.0;
        Finding {
            kind: FindingKind::FrequencyDrop,
            severity: Severity::High,
            description: format!("Messaging frequency dropped by {drop_pct:.0}%"),
            suggestion: "Significant decrease in communication may indicate fading interest"
                .to_string(),
        }
    })
}

/// One participant opens nearly every conversation.
fn one_sided_initiation(analysis: &ChatAnalysis, config: &RedFlagConfig) -> Option<Finding> {
    let initiations = &analysis.engagement_metrics.conversation_initiations;
    if initiations.len() < 2 {
        return None;
    }
    let total: u64 = initiations.values().sum();
    if total < config.one_sided_min_initiations {
        return None;
    }
    let max = *initiations.values().max()?;
    let min = *initiations.values().min()?;
    let ratio = max as f64 / min.max(1) as f64;
    (ratio >= config.one_sided_initiation_ratio).then(|| Finding {
        kind: FindingKind::OneSidedInitiation,
        severity: Severity::Medium,
        description: format!("One person initiates conversations {ratio:.1}x more often"),
        suggestion: "Consider if the other person is reciprocating interest".to_string(),
    })
}

/// Short replies with almost no questions.
fn low_engagement(
    analysis: &ChatAnalysis,
    messages: &[Message],
    config: &RedFlagConfig,
) -> Option<Finding> {
    let offenders: Vec<String> = analysis
        .participants
        .values()
        .filter(|p| p.message_count > 5)
        .filter(|p| {
            if p.average_length >= config.low_engagement_avg_chars {
                return false;
            }
            let with_questions = messages
                .iter()
                .filter(|m| m.sender == p.name && m.text.contains('?'))
                .count() as f64;
            with_questions / (p.message_count as f64) < config.low_engagement_question_ratio
        })
        .map(|p| format!("{} (avg {:.0} chars)", p.name, p.average_length))
        .collect();
    (!offenders.is_empty()).then(|| Finding {
        kind: FindingKind::LowEngagement,
        severity: Severity::Medium,
        description: format!("Low-investment replies from {}", offenders.join(", ")),
        suggestion: "Short, non-inquisitive responses may indicate low engagement".to_string(),
    })
}

fn high_negative_sentiment(analysis: &ChatAnalysis, config: &RedFlagConfig) -> Option<Finding> {
    let overall = &analysis.sentiment_analysis.overall;
    (overall.negative_ratio > config.high_negative_ratio).then(|| Finding {
        kind: FindingKind::HighNegativeSentiment,
        severity: Severity::Medium,
        description: format!(
            "{:.0}% of scored messages carry negative sentiment",
            overall.negative_ratio * 100.0
        ),
        suggestion: "A persistently negative tone can weigh on both sides".to_string(),
    })
}

/// Over a quarter of traffic lands between midnight and 5am.
fn night_activity_skew(analysis: &ChatAnalysis, config: &RedFlagConfig) -> Option<Finding> {
    let hourly = &analysis.messaging_patterns.hourly_distribution;
    let total: u64 = hourly.iter().sum();
    if total == 0 {
        return None;
    }
    let night: u64 = hourly[0..=4].iter().sum();
    let ratio = night as f64 / total as f64;
    (ratio > config.night_activity_ratio).then(|| Finding {
        kind: FindingKind::NightActivitySkew,
        severity: Severity::Low,
        description: format!("{:.0}% of messages are sent between 00:00 and 05:00", ratio * 100.0),
        suggestion: "Late-night messaging patterns can disrupt sleep".to_string(),
    })
}

/// Highly uneven daily volume: bursts followed by silence.
fn burst_silence(
    analysis: &ChatAnalysis,
    messages: &[Message],
    config: &RedFlagConfig,
) -> Option<Finding> {
    let period = analysis.period?;
    let days = period.duration_days.max(1) as usize;
    if days < 2 {
        return None;
    }

    let start_day = period.start.date_naive();
    let mut daily = vec![0f64; days];
    for message in messages {
        if let Some(ts) = message.timestamp {
            let index = (ts.date_naive().num_days_from_ce() - start_day.num_days_from_ce()) as usize;
            if index < days {
                daily[index] += 1.0;
            }
        }
    }

    let mean = daily.iter().sum::<f64>() / days as f64;
    if mean <= 0.0 {
        return None;
    }
    let variance = daily.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / days as f64;
    let stddev = variance.sqrt();

    (stddev > config.burst_silence_stddev_factor * mean).then(|| Finding {
        kind: FindingKind::BurstSilence,
        severity: Severity::Low,
        description: format!(
            "Daily volume swings heavily (stddev {stddev:.1} vs mean {mean:.1})"
        ),
        suggestion: "Bursts followed by silence can signal an unstable rhythm".to_string(),
    })
}
