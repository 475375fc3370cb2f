//! Yes/no confirmation before destructive actions.

use async_trait::async_trait;

/// Asks the user a yes/no question.
///
/// Dismissing the prompt counts as "no".
#[async_trait]
pub trait ConfirmPrompt: Send + Sync {
    /// Returns `true` if the user agreed.
    async fn confirm(&self, question: &str) -> bool;
}

/// A prompt that always gives the same answer.
///
/// Used for scripted runs and tests.
///
/// # Examples
///
/// ```
/// use pdfi_controller::FixedAnswer;
///
/// assert!(FixedAnswer::yes().answer());
/// assert!(!FixedAnswer::no().answer());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAnswer(bool);

impl FixedAnswer {
    /// Always confirms.
    #[must_use]
    pub const fn yes() -> Self {
        Self(true)
    }

    /// Always declines.
    #[must_use]
    pub const fn no() -> Self {
        Self(false)
    }

    /// The answer this prompt gives.
    #[must_use]
    pub const fn answer(self) -> bool {
        self.0
    }
}

#[async_trait]
impl ConfirmPrompt for FixedAnswer {
    async fn confirm(&self, _question: &str) -> bool {
        self.0
    }
}
