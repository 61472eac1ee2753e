use anyhow::Result;
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

/// Initialize structured logging system
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// lifetime of the process.
pub fn init_logging(log_level: Option<&str>, log_file: Option<&Path>, json_console: bool) -> Result<Option<WorkerGuard>> {
    // Set up environment filter
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            let level = log_level.unwrap_or("info");
            EnvFilter::try_new(level)
        })
        .map_err(|e| anyhow::anyhow!("Failed to create log filter: {}", e))?;

    // Create registry
    let registry = Registry::default().with(env_filter);

    // Console layer on stderr so command output on stdout stays clean
    let console_layer = if json_console {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .json()
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(true)
            .boxed()
    };

    // Add file layer if log file is specified
    let guard = if let Some(log_path) = log_file {
        let directory = log_path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = log_path.file_name().map_or_else(|| "mood-journal.log".into(), |n| n.to_os_string());
        let file_appender = rolling::daily(directory, file_name);
        let (non_blocking_appender, guard) = non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking_appender)
            .with_ansi(false)
            .with_target(true)
            .json();

        registry
            .with(console_layer)
            .with(file_layer)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to install subscriber: {}", e))?;
        Some(guard)
    } else {
        registry
            .with(console_layer)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to install subscriber: {}", e))?;
        None
    };

    info!("Logging system initialized");
    Ok(guard)
}

/// Performance timing utilities
pub struct OperationTimer {
    operation: &'static str,
    start: std::time::Instant,
}

impl OperationTimer {
    /// Start timing `operation`
    #[must_use]
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            start: std::time::Instant::now(),
        }
    }

    /// Log and return the elapsed time
    pub fn finish(self) -> std::time::Duration {
        let elapsed = self.start.elapsed();
        tracing::debug!(
            operation = self.operation,
            duration_ms = elapsed.as_millis(),
            "Operation completed"
        );
        elapsed
    }
}
