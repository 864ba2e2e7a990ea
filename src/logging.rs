//! Tracing setup and stage timing for the analysis engine.
//!
//! The subscriber is built from the `[logging]` section of the app config:
//! console output in text or JSON per `format`, plus an optional
//! non-blocking JSON file writer when `file_path` is set. `RUST_LOG`
//! overrides the configured level.

use anyhow::Result;
use std::ffi::OsStr;
use std::path::Path;
use std::time::Instant;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::config::LoggingConfig;

/// Install the global subscriber. The returned guard keeps the file writer
/// alive; hold it for the lifetime of the process when a log file is
/// configured.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let directive = std::env::var("RUST_LOG").unwrap_or_else(|_| config.level.clone());
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| anyhow::anyhow!("Bad log filter {directive:?}: {e}"))?;

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    let console = fmt::layer().with_writer(std::io::stderr).with_target(true);
    layers.push(if config.format == "json" {
        console.json().boxed()
    } else {
        console.boxed()
    });

    let guard = match &config.file_path {
        Some(file_path) => {
            let file_path = Path::new(file_path);
            let directory = file_path.parent().unwrap_or_else(|| Path::new("."));
            let file_name = file_path
                .file_name()
                .unwrap_or_else(|| OsStr::new("chat-insight.log"));
            let (writer, guard) = tracing_appender::non_blocking(
                tracing_appender::rolling::daily(directory, file_name),
            );
            layers.push(
                fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .json()
                    .boxed(),
            );
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry().with(layers).with(filter).init();

    info!(level = %directive, "logging initialized");
    Ok(guard)
}

/// Wall-clock timer for one engine stage (parse, score, conversation, ...),
/// reported together with how many messages the stage covered.
pub struct StageTimer {
    stage: &'static str,
    started: Instant,
}

impl StageTimer {
    #[must_use]
    pub fn new(stage: &'static str) -> Self {
        Self {
            stage,
            started: Instant::now(),
        }
    }

    /// Consume the timer and emit the stage record.
    pub fn finish(self, messages: usize) {
        info!(
            stage = self.stage,
            messages,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            "stage complete"
        );
    }
}
