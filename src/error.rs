//! Error types for the chat-insight library.
//!
//! This module provides custom error types using `thiserror` for better error handling
//! and more specific error messages throughout the engine.

use thiserror::Error;

use crate::models::ChatAnalysis;

/// Errors that can occur in the chat-insight engine.
#[derive(Error, Debug)]
pub enum ChatInsightError {
    /// Input bytes are not valid UTF-8
    #[error("Input is not valid UTF-8")]
    BadEncoding,

    /// Input shorter than the import minimum after trimming
    #[error("Input too small: {actual} chars after trim (minimum {min})")]
    InputTooSmall { actual: usize, min: usize },

    /// Input larger than the bulk import limit
    #[error("Input too large: {actual} bytes (maximum {max})")]
    InputTooLarge { actual: usize, max: usize },

    /// Classifier adapter failed or timed out; callers fall back to lexical scoring
    #[error("Classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    /// Host cancelled the analysis; carries results for the completed prefix
    #[error("Analysis canceled by host")]
    Canceled { partial: Option<Box<ChatAnalysis>> },

    /// Sink requested a stop; carries results for the emitted prefix
    #[error("Sink aborted persistence")]
    SinkAbort { partial: Option<Box<ChatAnalysis>> },

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV export errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// General error with context
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Result with ChatInsightError
pub type Result<T> = std::result::Result<T, ChatInsightError>;

impl From<anyhow::Error> for ChatInsightError {
    fn from(err: anyhow::Error) -> Self {
        ChatInsightError::Other(err.to_string())
    }
}

impl ChatInsightError {
    /// Fatal errors reject the request before any processing; everything else
    /// is surfaced through diagnostics.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ChatInsightError::BadEncoding
                | ChatInsightError::InputTooSmall { .. }
                | ChatInsightError::InputTooLarge { .. }
                | ChatInsightError::InvalidConfig(_)
        )
    }
}
