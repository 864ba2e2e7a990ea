//! Input-shape validation and sanitisation.
//!
//! Fatal input errors (encoding, size bounds) are rejected here before any
//! parsing or scoring happens; everything downstream can assume well-formed
//! input.

use crate::config::EngineConfig;
use crate::error::{ChatInsightError, Result};

/// Validation utilities for request inputs and edge case handling
#[derive(Debug, Copy, Clone)]
pub struct InputValidator;

impl InputValidator {
    /// Decode raw bytes, rejecting anything that is not UTF-8.
    pub fn decode(bytes: &[u8]) -> Result<&str> {
        std::str::from_utf8(bytes).map_err(|_| ChatInsightError::BadEncoding)
    }

    /// Validate a single message for scoring: 1..=max_message_chars chars.
    pub fn validate_message_text(text: &str, config: &EngineConfig) -> Result<()> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ChatInsightError::InputTooSmall { actual: 0, min: 1 });
        }
        let chars = text.chars().count();
        if chars > config.max_message_chars {
            return Err(ChatInsightError::InputTooLarge {
                actual: chars,
                max: config.max_message_chars,
            });
        }
        Ok(())
    }

    /// Validate a transcript import: size cap in bytes, minimum in trimmed
    /// characters.
    pub fn validate_conversation_text(raw: &str, config: &EngineConfig) -> Result<()> {
        if raw.len() > config.max_bulk_bytes {
            return Err(ChatInsightError::InputTooLarge {
                actual: raw.len(),
                max: config.max_bulk_bytes,
            });
        }
        let trimmed_chars = raw.trim().chars().count();
        if trimmed_chars < config.min_chars_for_import {
            return Err(ChatInsightError::InputTooSmall {
                actual: trimmed_chars,
                min: config.min_chars_for_import,
            });
        }
        Ok(())
    }

    /// Validate the caller-supplied display name used for role matching.
    pub fn validate_self_name(name: &str) -> Result<()> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ChatInsightError::Other(
                "Participant name cannot be empty".to_string(),
            ));
        }
        if trimmed.len() > 100 {
            return Err(ChatInsightError::Other(
                "Participant name too long (max 100 characters)".to_string(),
            ));
        }
        if trimmed.contains('\0') || trimmed.contains('\r') || trimmed.contains('\n') {
            return Err(ChatInsightError::Other(
                "Participant name contains invalid characters".to_string(),
            ));
        }
        Ok(())
    }

    /// Strip control characters, keeping the whitespace that matters for
    /// line-oriented parsing.
    #[must_use]
    pub fn sanitize_text(text: &str) -> String {
        text.chars()
            .filter(|c| !c.is_control() || *c == '\n' || *c == '\t' || *c == '\r')
            .collect::<String>()
            .trim()
            .to_string()
    }
}
