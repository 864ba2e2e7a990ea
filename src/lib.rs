pub mod analyzer;
pub mod config;
pub mod emoji;
pub mod engine;
pub mod error;
pub mod export;
pub mod lexicon;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod parser;
pub mod redflags;
pub mod sentiment;
pub mod validation;

// Re-export key components for easier access
pub use analyzer::ConversationAnalyzer;
pub use config::AppConfig;
pub use engine::{AnalysisEngine, AnalysisSink, CancelFlag};
pub use error::{ChatInsightError, Result};
pub use models::{ChatAnalysis, Message, Platform, SentimentLabel, SentimentResult};
pub use parser::ChatParser;
pub use sentiment::{Classifier, SentimentScorer};
