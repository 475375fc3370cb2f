//! Import status types.

use serde::{Deserialize, Serialize};

/// Processing state of an uploaded document.
///
/// # Examples
///
/// ```
/// use pdfi_core::ImportStatus;
///
/// assert!(!ImportStatus::Processing.is_terminal());
/// assert!(ImportStatus::Failed.is_terminal());
/// assert_eq!(ImportStatus::Done.label(), "done");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ImportStatus {
    /// OCR and extraction are still running.
    #[default]
    Processing,

    /// Extraction finished and produced structured output.
    Done,

    /// The pipeline gave up; the record carries an error.
    Failed,
}

impl ImportStatus {
    /// Returns `true` once the pipeline will no longer touch the record.
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Returns `true` if the import failed.
    #[inline]
    #[must_use]
    pub const fn is_failed(self) -> bool {
        matches!(self, Self::Failed)
    }

    /// Short badge label, identical to the wire name.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}
