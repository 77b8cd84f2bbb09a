//! Host failure hooks
//!
//! Registration points that route otherwise-unobserved failures (panics and
//! failed background tasks) into the event logger. Nothing is installed
//! implicitly; the host calls these after constructing the logger.

use super::EventLogger;
use serde_json::json;
use std::any::Any;
use std::fmt::Display;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Report uncaught panics as `error` entries, then run the previous hook
///
/// Meant to be called once at start-up. The chained hook is not kept for
/// [`uninstall_panic_hook`].
pub fn install_panic_hook(logger: Arc<EventLogger>) {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()));
        logger.error(
            "Unhandled error:",
            Some(json!({
                "message": panic_message(info.payload()),
                "location": location,
            })),
        );
        previous(info);
    }));
}

/// Reset to the std default hook, whatever was installed before
pub fn uninstall_panic_hook() {
    drop(std::panic::take_hook());
}

/// Observe a background task and report it if it fails
///
/// A task that returns `Err`, panics, or is cancelled is logged as an
/// unhandled task failure. The returned handle yields the task's value on
/// success.
pub fn watch_task<T, E>(
    logger: Arc<EventLogger>,
    handle: JoinHandle<Result<T, E>>,
) -> JoinHandle<Option<T>>
where
    T: Send + 'static,
    E: Display + Send + 'static,
{
    tokio::spawn(async move {
        let reason = match handle.await {
            Ok(Ok(value)) => return Some(value),
            Ok(Err(e)) => e.to_string(),
            Err(join_error) if join_error.is_panic() => {
                panic_message(&*join_error.into_panic())
            }
            Err(join_error) => join_error.to_string(),
        };
        logger.error("Unhandled task failure:", Some(json!({ "reason": reason })));
        None
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
