//! TUI-specific error types.
//!
//! This module provides the [`TuiError`] type for handling errors
//! that can occur during TUI operations.

use thiserror::Error;

/// Errors that can occur in the TUI.
///
/// Registry faults never show up here: the controller turns them into
/// status messages. What remains are terminal and wiring failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TuiError {
    /// Terminal initialization or operation failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// Event channel was closed unexpectedly.
    #[error("event channel closed unexpectedly")]
    ChannelClosed,

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl TuiError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns `true` if the event loop may keep running after this error.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = TuiError::config("frame rate must be positive");
        assert!(matches!(err, TuiError::Config(_)));
        assert_eq!(
            err.to_string(),
            "configuration error: frame rate must be positive"
        );
    }

    #[test]
    fn test_error_display() {
        let err = TuiError::ChannelClosed;
        assert_eq!(err.to_string(), "event channel closed unexpectedly");
    }

    #[test]
    fn test_is_recoverable() {
        assert!(!TuiError::ChannelClosed.is_recoverable());
        assert!(TuiError::config("test").is_recoverable());

        let io = std::io::Error::other("no tty");
        assert!(!TuiError::from(io).is_recoverable());
    }
}
