//! Delete confirmation routed through the UI loop.
//!
//! The controller asks from a spawned task through its [`Reporter`]; the
//! question travels to the application loop as
//! [`Event::ConfirmRequested`](crate::event::Event::ConfirmRequested) and the
//! dialog's answer comes back over a oneshot channel.

use async_trait::async_trait;
use pdfi_controller::ConfirmPrompt;
use tokio::sync::oneshot;
use tracing::debug;

use crate::app::AppMode;
use crate::tui::Reporter;

#[async_trait]
impl ConfirmPrompt for Reporter {
    async fn confirm(&self, question: &str) -> bool {
        self.ask(question).await
    }
}

/// A question on screen, waiting for y/n.
#[derive(Debug)]
pub struct PendingConfirm {
    question: String,
    reply: oneshot::Sender<bool>,
    return_to: AppMode,
}

impl PendingConfirm {
    pub(crate) const fn new(question: String, reply: oneshot::Sender<bool>, return_to: AppMode) -> Self {
        Self {
            question,
            reply,
            return_to,
        }
    }

    /// The question to display.
    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Mode to go back to once answered.
    #[must_use]
    pub const fn return_to(&self) -> AppMode {
        self.return_to
    }

    /// Sends the answer to the waiting task.
    pub fn answer(self, yes: bool) {
        if self.reply.send(yes).is_err() {
            debug!("Confirmation answered after the asking task went away");
        }
    }
}
