//! llm-chat - terminal chat client
//!
//! Sends each message to a chat backend and prints the reply, recording
//! lifecycle events with a client-side event logger that forwards entries
//! to a remote collector in production.

mod chat;
mod config;
mod controller;
mod logger;
mod state_machine;
mod terminal;
mod view;

#[cfg(test)]
mod testing;

use chat::{ChatBackend, HttpChatBackend};
use config::{AppConfig, RunMode};
use controller::ConversationController;
use logger::{hooks, EventLogger, HttpLogCollector, TracingConsole};
use std::sync::Arc;
use terminal::TerminalView;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(mode: RunMode) {
    let default_filter = if mode.is_production() {
        "llm_chat=info"
    } else {
        "llm_chat=debug"
    };
    let registry = tracing_subscriber::registry().with(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
    );

    if mode.is_production() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env();
    init_tracing(config.mode);

    let client = reqwest::Client::builder()
        .user_agent(concat!("llm-chat/", env!("CARGO_PKG_VERSION")))
        .build()?;

    // Event logger lives for the whole process and is handed out explicitly
    let mut event_logger = EventLogger::new(config.mode, Arc::new(TracingConsole));
    if config.mode.is_production() {
        event_logger = event_logger.with_collector(Arc::new(HttpLogCollector::new(
            client.clone(),
            config.log_collector_url.clone(),
        )));
    }
    let event_logger = Arc::new(event_logger);
    hooks::install_panic_hook(Arc::clone(&event_logger));

    tracing::info!(
        mode = %event_logger.mode(),
        backend = %config.backend.base_url,
        use_agent = config.backend.use_agent,
        "Starting chat client"
    );

    let backend = Arc::new(HttpChatBackend::new(client, &config.backend));
    match backend.health().await {
        Ok(()) => event_logger.debug("Chat backend is healthy", None),
        Err(e) => event_logger.warn("Chat backend health check failed", Some(e.to_log_data())),
    }

    let controller = ConversationController::new(
        backend,
        Arc::clone(&event_logger),
        Arc::new(TerminalView::new()),
    );

    let session = tokio::spawn(terminal::run(controller));
    hooks::watch_task(Arc::clone(&event_logger), session).await?;

    // Teardown: let pending forwards finish, then restore the default hook
    event_logger.shutdown().await;
    hooks::uninstall_panic_hook();

    tracing::info!(entries = event_logger.logs().len(), "Chat client stopped");
    Ok(())
}
