//! Fault kinds surfaced by controller operations.
//!
//! Operations never return these to callers; they are rendered into the
//! single error message of [`RegistryState`](crate::RegistryState).

use pdfi_core::ParseFault;
use pdfi_registry::RegistryError;

/// Either kind of failure a controller operation can run into.
///
/// # Examples
///
/// ```
/// use pdfi_controller::Fault;
/// use pdfi_registry::RegistryError;
///
/// let fault = Fault::from(RegistryError::not_found("model not found"));
/// assert!(fault.is_store());
/// assert_eq!(fault.to_string(), "model not found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Fault {
    /// Schema text is not valid JSON. Detected locally; the store is never called.
    #[error(transparent)]
    Parse(#[from] ParseFault),

    /// The registry rejected the request or could not be reached.
    #[error(transparent)]
    Store(#[from] RegistryError),
}

impl Fault {
    /// Returns `true` for malformed schema text.
    #[inline]
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    /// Returns `true` for registry failures.
    #[inline]
    #[must_use]
    pub const fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fault_display_passes_through() {
        let parse = pdfi_core::schema::parse(r#"{"type": }"#).unwrap_err();
        let fault = Fault::from(parse.clone());
        assert!(fault.is_parse());
        assert_eq!(fault.to_string(), parse.to_string());
    }

    #[test]
    fn test_store_fault_display_passes_through() {
        let fault = Fault::from(RegistryError::conflict("model has imports and cannot be deleted"));
        assert!(fault.is_store());
        assert_eq!(fault.to_string(), "model has imports and cannot be deleted");
    }
}
