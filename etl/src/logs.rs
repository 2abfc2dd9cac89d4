//! Pipeline progress logging.
//!
//! Thin helpers over `tracing` so pipeline code reads as a sequence of
//! `log_info` / `log_success` / `log_warning` steps. The binary installs the
//! subscriber with [`init`].

use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Log level of a pipeline message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single pipeline message
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self { level, message: message.into() }
    }

    /// Forward the entry to the installed `tracing` subscriber.
    pub fn emit(&self) {
        match self.level {
            LogLevel::Info => info!("{}", self.message),
            LogLevel::Success => info!(status = "ok", "{}", self.message),
            LogLevel::Warning => warn!("{}", self.message),
            LogLevel::Error => error!("{}", self.message),
        }
    }
}

/// Install the global fmt subscriber. `RUST_LOG` overrides the default `info` filter.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // a second call (e.g. from tests) keeps the first subscriber
    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

pub fn log_info(msg: impl Into<String>) {
    LogEntry::new(LogLevel::Info, msg).emit();
}

pub fn log_success(msg: impl Into<String>) {
    LogEntry::new(LogLevel::Success, msg).emit();
}

pub fn log_warning(msg: impl Into<String>) {
    LogEntry::new(LogLevel::Warning, msg).emit();
}

pub fn log_error(msg: impl Into<String>) {
    LogEntry::new(LogLevel::Error, msg).emit();
}
