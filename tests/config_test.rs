use chat_insight::config::{AppConfig, RedFlagConfig};

#[test]
fn test_default_engine_limits() {
    let config = AppConfig::default();
    assert_eq!(config.engine.max_message_chars, 5_000);
    assert_eq!(config.engine.max_bulk_bytes, 5 * 1024 * 1024);
    assert_eq!(config.engine.min_chars_for_import, 10);
    assert_eq!(config.engine.classifier_timeout_ms, 2_000);
}

#[test]
fn test_default_rule_thresholds() {
    let thresholds = RedFlagConfig::default();
    assert_eq!(thresholds.message_imbalance_ratio, 3.0);
    assert_eq!(thresholds.message_imbalance_min_messages, 50);
    assert_eq!(thresholds.slow_response_minutes, 180.0);
    assert_eq!(thresholds.slow_response_min_events, 10);
    assert_eq!(thresholds.frequency_drop_ratio, 0.5);
    assert_eq!(thresholds.frequency_drop_min_days, 14);
    assert_eq!(thresholds.one_sided_initiation_ratio, 4.0);
    assert_eq!(thresholds.one_sided_min_initiations, 10);
    assert_eq!(thresholds.low_engagement_avg_chars, 20.0);
    assert_eq!(thresholds.low_engagement_question_ratio, 0.05);
    assert_eq!(thresholds.high_negative_ratio, 0.45);
    assert_eq!(thresholds.night_activity_ratio, 0.25);
}

#[test]
fn test_default_config_validates() {
    assert!(AppConfig::default().validate().is_ok());
}

#[test]
fn test_zero_limits_rejected() {
    let mut config = AppConfig::default();
    config.engine.max_bulk_bytes = 0;
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.engine.classifier_timeout_ms = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_bad_threshold_rejected() {
    let mut config = AppConfig::default();
    config.red_flags.message_imbalance_ratio = 0.5;
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.red_flags.frequency_drop_ratio = 1.5;
    assert!(config.validate().is_err());
}

#[test]
fn test_bad_logging_settings_rejected() {
    let mut config = AppConfig::default();
    config.logging.level = "loud".to_string();
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.logging.format = "xml".to_string();
    assert!(config.validate().is_err());
}
