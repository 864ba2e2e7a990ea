use chat_insight::analyzer::ConversationAnalyzer;
use chat_insight::models::{Message, Platform};
use chrono::{TimeZone, Utc};

fn msg(ts: &str, sender: &str, text: &str) -> Message {
    let naive =
        chrono::NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").expect("test timestamp");
    Message {
        timestamp: Some(Utc.from_utc_datetime(&naive)),
        sender: sender.to_string(),
        text: text.to_string(),
        platform: Platform::Whatsapp,
        is_media: false,
    }
}

fn sample_conversation() -> Vec<Message> {
    vec![
        msg("2023-12-29 09:15:00", "Alice", "good morning! how did you sleep?"),
        msg("2023-12-29 09:20:00", "Bob", "pretty well, thanks for asking"),
        msg("2023-12-29 09:25:00", "Alice", "glad to hear it 😊"),
        msg("2023-12-29 21:40:00", "Bob", "dinner went well tonight"),
        msg("2023-12-29 21:42:00", "Alice", "that sounds good"),
        msg("2023-12-30 10:05:00", "Bob", "heading out for a run"),
        msg("2023-12-30 10:30:00", "Alice", "enjoy! the weather looks lovely"),
        msg("2023-12-31 22:30:00", "Bob", "happy new year's eve 🎉"),
        msg("2023-12-31 22:31:00", "Alice", "happy new year to you too!"),
    ]
}

#[test]
fn test_participant_counts_equal_message_counts() {
    let messages = sample_conversation();
    let analysis = ConversationAnalyzer::new()
        .aggregate(&messages, Platform::Whatsapp, None, None)
        .analysis;

    for (name, participant) in &analysis.participants {
        let actual = messages.iter().filter(|m| &m.sender == name).count() as u64;
        assert_eq!(participant.message_count, actual, "{name}");
    }
    let sum: u64 = analysis
        .basic_stats
        .messages_per_participant
        .values()
        .sum();
    assert_eq!(sum, analysis.total_messages);
}

#[test]
fn test_timestamps_inside_period() {
    let messages = sample_conversation();
    let analysis = ConversationAnalyzer::new()
        .aggregate(&messages, Platform::Whatsapp, None, None)
        .analysis;
    let period = analysis.period.expect("period");
    for message in &messages {
        let ts = message.timestamp.expect("timestamp");
        assert!(ts >= period.start && ts <= period.end);
    }
    assert_eq!(period.duration_days, 3);
}

#[test]
fn test_distribution_sums_match_timestamped_count() {
    let messages = sample_conversation();
    let analysis = ConversationAnalyzer::new()
        .aggregate(&messages, Platform::Whatsapp, None, None)
        .analysis;
    let timestamped = messages.iter().filter(|m| m.timestamp.is_some()).count() as u64;
    let hourly_sum: u64 = analysis
        .messaging_patterns
        .hourly_distribution
        .iter()
        .sum();
    assert_eq!(hourly_sum, timestamped);
    assert_eq!(
        analysis
            .messaging_patterns
            .day_of_week_distribution
            .total(),
        timestamped
    );
}

#[test]
fn test_most_active_hours_sorted_and_bounded() {
    let messages = sample_conversation();
    let analysis = ConversationAnalyzer::new()
        .aggregate(&messages, Platform::Whatsapp, None, None)
        .analysis;
    let hours = &analysis.messaging_patterns.most_active_hours;
    assert!(hours.len() <= 5);
    for pair in hours.windows(2) {
        assert!(
            pair[0].count > pair[1].count
                || (pair[0].count == pair[1].count && pair[0].hour < pair[1].hour)
        );
    }
}

#[test]
fn test_response_time_invariants() {
    let messages = sample_conversation();
    let analysis = ConversationAnalyzer::new()
        .aggregate(&messages, Platform::Whatsapp, None, None)
        .analysis;
    for (name, stats) in &analysis.engagement_metrics.response_time_analysis {
        assert!(stats.fastest_minutes <= stats.median_minutes, "{name}");
        assert!(stats.median_minutes <= stats.slowest_minutes, "{name}");
        assert!(stats.fastest_minutes <= stats.average_minutes, "{name}");
        assert!(stats.average_minutes <= stats.slowest_minutes, "{name}");
        assert!(stats.count >= 1);
    }
}

#[test]
fn test_ratios_sum_to_one_for_scored_participants() {
    let messages = sample_conversation();
    let analysis = ConversationAnalyzer::new()
        .aggregate(&messages, Platform::Whatsapp, None, None)
        .analysis;
    for (name, rollup) in &analysis.sentiment_analysis.per_participant {
        if rollup.scored_total() > 0 {
            let sum = rollup.positive_ratio + rollup.negative_ratio + rollup.neutral_ratio;
            assert!((sum - 1.0).abs() < 1e-6, "{name}: {sum}");
        }
    }
    let overall = &analysis.sentiment_analysis.overall;
    let sum = overall.positive_ratio + overall.negative_ratio + overall.neutral_ratio;
    assert!((sum - 1.0).abs() < 1e-6);
}

#[test]
fn test_initiations_counted_at_gaps() {
    let messages = sample_conversation();
    let analysis = ConversationAnalyzer::new()
        .aggregate(&messages, Platform::Whatsapp, None, None)
        .analysis;
    let initiations = &analysis.engagement_metrics.conversation_initiations;
    // Alice opens the transcript; Bob restarts after the 12h and evening
    // silences, Bob again on new year's eve
    assert_eq!(initiations["Alice"], 1);
    assert_eq!(initiations["Bob"], 3);
    let total: u64 = initiations.values().sum();
    assert_eq!(total, 4);
}

#[test]
fn test_self_role_is_unique() {
    let messages = sample_conversation();
    let analysis = ConversationAnalyzer::new()
        .aggregate(&messages, Platform::Whatsapp, Some("alice"), None)
        .analysis;
    let self_count = analysis
        .participants
        .values()
        .filter(|p| p.role == chat_insight::models::ParticipantRole::SelfUser)
        .count();
    assert_eq!(self_count, 1);
}

#[test]
fn test_unknown_self_name_marks_everyone_other() {
    let messages = sample_conversation();
    let analysis = ConversationAnalyzer::new()
        .aggregate(&messages, Platform::Whatsapp, Some("Carol"), None)
        .analysis;
    assert!(analysis
        .participants
        .values()
        .all(|p| p.role == chat_insight::models::ParticipantRole::Other));
}
