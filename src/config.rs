//! Runtime configuration read from the environment

use std::fmt;
use std::time::Duration;

const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Build/runtime mode of the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Remote log forwarding on, console mirroring off
    Production,
    #[default]
    Development,
}

impl RunMode {
    /// Anything other than `production` counts as development
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            RunMode::Production
        } else {
            RunMode::Development
        }
    }

    pub fn is_production(self) -> bool {
        self == RunMode::Production
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Production => f.write_str("production"),
            RunMode::Development => f.write_str("development"),
        }
    }
}

/// Chat backend endpoint settings
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL, e.g. `http://localhost:8000`
    pub base_url: String,
    /// Ask the backend to route the message through its tool-using agent
    pub use_agent: bool,
    /// Upper bound on the start-up health check. Chat requests are unbounded.
    pub health_timeout: Duration,
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            use_agent: false,
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
        }
    }

    pub fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    pub fn health_url(&self) -> String {
        format!("{}/api/health", self.base_url)
    }

    pub fn logs_url(&self) -> String {
        format!("{}/api/logs", self.base_url)
    }
}

/// Top-level client configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mode: RunMode,
    pub backend: BackendConfig,
    pub log_collector_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mode = lookup("LLM_CHAT_MODE")
            .map(|m| RunMode::parse(&m))
            .unwrap_or_default();

        let mut backend = BackendConfig::new(
            lookup("LLM_CHAT_BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
        );
        backend.use_agent = lookup("LLM_CHAT_USE_AGENT")
            .is_some_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"));

        let log_collector_url =
            lookup("LLM_CHAT_LOG_COLLECTOR_URL").unwrap_or_else(|| backend.logs_url());

        Self {
            mode,
            backend,
            log_collector_url,
        }
    }
}
