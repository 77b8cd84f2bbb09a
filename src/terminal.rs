//! Terminal chat host
//!
//! Each stdin line is submitted as a message. New messages are printed as
//! they are appended; lines typed while a reply is pending are rejected.

use crate::chat::Message;
use crate::controller::ConversationController;
use crate::view::{ChatView, Notification};
use crossterm::style::Stylize;
use std::io::Write;
use std::sync::Mutex;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Prints messages to stdout and notifications to stderr
#[derive(Default)]
pub struct TerminalView {
    /// Number of messages already printed
    rendered: Mutex<usize>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChatView for TerminalView {
    fn scroll_to_latest(&self, messages: &[Message]) {
        let mut rendered = self
            .rendered
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut out = std::io::stdout().lock();

        for message in messages.iter().skip(*rendered) {
            // Nothing useful to do if the terminal is gone
            let _ = if message.is_user() {
                writeln!(out, "{}", format!("> {}", message.text()).blue())
            } else {
                writeln!(out, "{}", message.text())
            };
        }
        let _ = out.flush();
        *rendered = messages.len();
    }

    fn notify(&self, notification: &Notification) {
        let line = format!("{}: {}", notification.title, notification.description);
        eprintln!("{}", line.red().bold());
    }
}

/// Run the read-submit loop until stdin closes
pub async fn run(mut controller: ConversationController) -> std::io::Result<()> {
    println!("{}", "LLM Chat Interface".bold());
    println!("{}", "Type your message...".dim());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        controller.set_input(line);
        let Ok(Some(text)) = controller.begin_submit() else {
            continue;
        };

        println!("{}", "Sending...".dim());
        let backend = controller.backend();
        let request = async move { backend.send(&text).await };
        tokio::pin!(request);

        let result = loop {
            tokio::select! {
                result = &mut request => break result,
                line = lines.next_line() => match line? {
                    Some(line) => {
                        if turned_away(&mut controller, line) {
                            eprintln!("{}", "Still waiting for a reply, message not sent".yellow());
                        }
                    }
                    None => break (&mut request).await,
                },
            }
        };

        controller.finish_submit(result);
    }

    Ok(())
}

/// Offer a line typed while a reply is pending
///
/// Submit stays disabled until the reply settles. Returns true when an actual
/// message was refused; blank lines are not messages and are dropped quietly.
fn turned_away(controller: &mut ConversationController, line: String) -> bool {
    if line.trim().is_empty() {
        return false;
    }
    controller.set_input(line);
    controller.begin_submit().is_err()
}
