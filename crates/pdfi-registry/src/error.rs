//! Error types for the pdfi-registry crate.
//!
//! [`RegistryError`] is the store fault every [`RegistryClient`](crate::RegistryClient)
//! call may fail with. Its display text is shown to the user verbatim, so the
//! message-carrying variants render the message alone.

/// Errors reported by the model registry.
///
/// # Examples
///
/// ```
/// use pdfi_registry::RegistryError;
///
/// let err = RegistryError::not_found("model not found");
/// assert!(err.is_not_found());
/// assert_eq!(err.to_string(), "model not found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// The addressed record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The operation conflicts with existing records.
    #[error("{0}")]
    Conflict(String),

    /// The request payload was rejected.
    #[error("{0}")]
    Validation(String),

    /// The registry could not be reached or failed internally.
    #[error("registry unavailable: {0}")]
    Unavailable(String),
}

impl RegistryError {
    /// Creates a new [`RegistryError::NotFound`] error.
    #[inline]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Creates a new [`RegistryError::Conflict`] error.
    #[inline]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates a new [`RegistryError::Validation`] error.
    #[inline]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a new [`RegistryError::Unavailable`] error.
    #[inline]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Returns `true` if the addressed record does not exist.
    #[inline]
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns `true` if the operation conflicts with existing records.
    #[inline]
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// Returns `true` if repeating the same request might succeed.
    ///
    /// Nothing in the workspace retries automatically; this only informs the
    /// user-facing hint.
    #[inline]
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_error_predicates() {
        assert!(RegistryError::not_found("x").is_not_found());
        assert!(RegistryError::conflict("x").is_conflict());
        assert!(RegistryError::unavailable("x").is_transient());
        assert!(!RegistryError::validation("x").is_transient());
    }

    #[test]
    fn test_registry_error_display_is_verbatim() {
        assert_eq!(
            RegistryError::conflict("model has imports and cannot be deleted").to_string(),
            "model has imports and cannot be deleted"
        );
        assert_eq!(
            RegistryError::unavailable("connection refused").to_string(),
            "registry unavailable: connection refused"
        );
    }
}
