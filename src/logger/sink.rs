//! Local console output for log entries

use super::LogLevel;
use serde_json::Value;

/// Level-routed local output
///
/// Receives mirrored entries outside production, and forward failures in
/// every mode. Implementations must not call back into the event logger.
pub trait ConsoleSink: Send + Sync {
    fn write(&self, level: LogLevel, line: &str, data: Option<&Value>);
}

/// Console sink backed by `tracing`
///
/// error, warn, debug map to the matching macro; info is the default sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingConsole;

impl ConsoleSink for TracingConsole {
    fn write(&self, level: LogLevel, line: &str, data: Option<&Value>) {
        let line = match data {
            Some(data) => format!("{line} {data}"),
            None => line.to_string(),
        };
        match level {
            LogLevel::Error => tracing::error!(target: "llm_chat::console", "{line}"),
            LogLevel::Warn => tracing::warn!(target: "llm_chat::console", "{line}"),
            LogLevel::Debug => tracing::debug!(target: "llm_chat::console", "{line}"),
            LogLevel::Info => tracing::info!(target: "llm_chat::console", "{line}"),
        }
    }
}
