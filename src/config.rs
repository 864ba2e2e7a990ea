use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Application configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub red_flags: RedFlagConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Upper bound for a single message, in characters
    pub max_message_chars: usize,
    /// Upper bound for a transcript import, in bytes
    pub max_bulk_bytes: usize,
    /// Minimum transcript size after trimming, in characters
    pub min_chars_for_import: usize,
    /// Per-call classifier timeout; the engine fails open to lexical scoring
    pub classifier_timeout_ms: u64,
}

/// Thresholds for the red-flag rule set. The defaults are the published
/// rule table; overriding them changes detection behaviour, not the schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedFlagConfig {
    pub message_imbalance_ratio: f64,
    pub message_imbalance_min_messages: u64,
    pub slow_response_minutes: f64,
    pub slow_response_min_events: u64,
    pub frequency_drop_ratio: f64,
    pub frequency_drop_min_days: i64,
    pub one_sided_initiation_ratio: f64,
    pub one_sided_min_initiations: u64,
    pub low_engagement_avg_chars: f64,
    pub low_engagement_question_ratio: f64,
    pub high_negative_ratio: f64,
    pub night_activity_ratio: f64,
    pub burst_silence_stddev_factor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
    pub format: String, // "json" or "text"
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_message_chars: 5_000,
            max_bulk_bytes: 5 * 1024 * 1024,
            min_chars_for_import: 10,
            classifier_timeout_ms: 2_000,
        }
    }
}

impl Default for RedFlagConfig {
    fn default() -> Self {
        Self {
            message_imbalance_ratio: 3.0,
            message_imbalance_min_messages: 50,
            slow_response_minutes: 180.0,
            slow_response_min_events: 10,
            frequency_drop_ratio: 0.5,
            frequency_drop_min_days: 14,
            one_sided_initiation_ratio: 4.0,
            one_sided_min_initiations: 10,
            low_engagement_avg_chars: 20.0,
            low_engagement_question_ratio: 0.05,
            high_negative_ratio: 0.45,
            night_activity_ratio: 0.25,
            burst_silence_stddev_factor: 2.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
            format: "text".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            red_flags: RedFlagConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment with precedence
    pub fn load() -> Result<Self> {
        let defaults = Config::try_from(&AppConfig::default())
            .map_err(|e| anyhow::anyhow!("Failed to build default configuration: {e}"))?;

        let config = Config::builder()
            .add_source(defaults)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("CHAT_INSIGHT").separator("__"))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {e}"))?;

        let app_config: Self = config
            .try_deserialize()
            .map_err(|e| anyhow::anyhow!("Failed to deserialize configuration: {e}"))?;

        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.engine.max_message_chars == 0 {
            return Err(anyhow::anyhow!("max_message_chars must be greater than 0"));
        }
        if self.engine.max_bulk_bytes == 0 {
            return Err(anyhow::anyhow!("max_bulk_bytes must be greater than 0"));
        }
        if self.engine.min_chars_for_import == 0 {
            return Err(anyhow::anyhow!(
                "min_chars_for_import must be greater than 0"
            ));
        }
        if self.engine.classifier_timeout_ms == 0 {
            return Err(anyhow::anyhow!(
                "classifier_timeout_ms must be greater than 0"
            ));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level: {}. Must be one of: {valid_levels:?}",
                self.logging.level
            ));
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format: {}. Must be one of: {valid_formats:?}",
                self.logging.format
            ));
        }

        if self.red_flags.message_imbalance_ratio <= 1.0 {
            return Err(anyhow::anyhow!(
                "message_imbalance_ratio must be greater than 1"
            ));
        }
        if self.red_flags.slow_response_minutes <= 0.0 {
            return Err(anyhow::anyhow!(
                "slow_response_minutes must be greater than 0"
            ));
        }
        if !(0.0..1.0).contains(&self.red_flags.frequency_drop_ratio) {
            return Err(anyhow::anyhow!("frequency_drop_ratio must be within [0, 1)"));
        }
        if self.red_flags.one_sided_initiation_ratio <= 1.0 {
            return Err(anyhow::anyhow!(
                "one_sided_initiation_ratio must be greater than 1"
            ));
        }
        if !(0.0..=1.0).contains(&self.red_flags.high_negative_ratio) {
            return Err(anyhow::anyhow!(
                "high_negative_ratio must be within [0, 1]"
            ));
        }
        if !(0.0..=1.0).contains(&self.red_flags.night_activity_ratio) {
            return Err(anyhow::anyhow!(
                "night_activity_ratio must be within [0, 1]"
            ));
        }

        Ok(())
    }
}
