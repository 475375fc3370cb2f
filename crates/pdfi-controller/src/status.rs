//! Status messages and operation outcomes.

/// Whether a status message reports success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// The last operation succeeded.
    Success,
    /// The last operation failed.
    Error,
}

/// The single message shown after an operation.
///
/// Success and error messages are mutually exclusive; the controller holds
/// at most one and every new user-initiated operation clears it.
///
/// # Examples
///
/// ```
/// use pdfi_controller::StatusMessage;
///
/// let msg = StatusMessage::success("Model saved.");
/// assert!(!msg.is_error());
/// assert_eq!(msg.text(), "Model saved.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    text: String,
    kind: StatusKind,
}

impl StatusMessage {
    /// Creates a success message.
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Success,
        }
    }

    /// Creates an error message.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }

    /// The message text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The message kind.
    #[must_use]
    pub const fn kind(&self) -> StatusKind {
        self.kind
    }

    /// Returns `true` for error messages.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.kind, StatusKind::Error)
    }
}

/// What a controller operation ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The operation completed; a trailing refresh may still have failed.
    Succeeded,
    /// The operation failed; the error message says why.
    Failed,
    /// The user answered "no" to the confirmation prompt. Nothing changed.
    Declined,
    /// The row (or the create form) already has a request in flight.
    Busy,
    /// Nothing to do, e.g. saving a row that is not being edited.
    Skipped,
}

impl Outcome {
    /// Returns `true` if the operation completed.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Short label for logs and the status bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Declined => "declined",
            Self::Busy => "busy",
            Self::Skipped => "skipped",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_kinds() {
        let ok = StatusMessage::success("done");
        assert_eq!(ok.kind(), StatusKind::Success);
        assert!(!ok.is_error());

        let err = StatusMessage::error("boom");
        assert_eq!(err.kind(), StatusKind::Error);
        assert!(err.is_error());
        assert_eq!(err.text(), "boom");
    }

    #[test]
    fn test_outcome_helpers() {
        assert!(Outcome::Succeeded.is_success());
        assert!(!Outcome::Busy.is_success());
        assert_eq!(Outcome::Declined.label(), "declined");
    }
}
