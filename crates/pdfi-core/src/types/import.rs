//! Import job records.
//!
//! An import is one uploaded PDF run through OCR and extraction against a
//! model definition. This front end only reads them.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use super::model::ModelId;
use super::status::ImportStatus;

/// Store-assigned identifier of an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImportId(pub i64);

impl ImportId {
    /// Creates an import id from its raw value.
    #[inline]
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ImportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One document import job.
///
/// # Examples
///
/// ```
/// use pdfi_core::{ImportId, ImportRecord, ImportStatus, ModelId};
/// use time::OffsetDateTime;
///
/// let now = OffsetDateTime::UNIX_EPOCH;
/// let record = ImportRecord::processing(ImportId::new(1), ModelId::new(2), "inv.pdf", now);
/// assert_eq!(record.status, ImportStatus::Processing);
/// assert!(record.extracted_json.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportRecord {
    /// Unique identifier.
    pub id: ImportId,

    /// The model definition the document was extracted against.
    pub model_id: ModelId,

    /// Original upload file name.
    pub filename: String,

    /// Pipeline state.
    pub status: ImportStatus,

    /// Upload time.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,

    /// Last pipeline transition.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,

    /// Raw OCR output, once available.
    #[serde(default)]
    pub ocr_text: Option<String>,

    /// Structured extraction result, once available.
    #[serde(default)]
    pub extracted_json: Option<Value>,

    /// Failure description when `status` is `failed`.
    #[serde(default)]
    pub error: Option<String>,
}

impl ImportRecord {
    /// A freshly uploaded record with no pipeline output yet.
    #[must_use]
    pub fn processing(
        id: ImportId,
        model_id: ModelId,
        filename: impl Into<String>,
        at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            model_id,
            filename: filename.into(),
            status: ImportStatus::Processing,
            created_at: at,
            updated_at: at,
            ocr_text: None,
            extracted_json: None,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    #[test]
    fn test_import_record_deserialize_without_optionals() {
        let json = r#"{
            "id": 4,
            "model_id": 1,
            "filename": "march.pdf",
            "status": "processing",
            "created_at": "2024-03-01T09:30:00Z",
            "updated_at": "2024-03-01T09:30:00Z"
        }"#;
        let record: ImportRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, ImportId::new(4));
        assert_eq!(record.model_id, ModelId::new(1));
        assert!(record.ocr_text.is_none());
        assert!(record.error.is_none());
    }

    #[test]
    fn test_import_record_serialize_done() {
        let at = datetime!(2024-03-01 09:30:00 UTC);
        let mut record = ImportRecord::processing(ImportId::new(4), ModelId::new(1), "march.pdf", at);
        record.status = ImportStatus::Done;
        record.extracted_json = Some(json!({"invoice_number": "A-1", "total": 12.5}));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["status"], "done");
        assert_eq!(value["extracted_json"]["total"], 12.5);
        assert_eq!(value["updated_at"], "2024-03-01T09:30:00Z");
    }

    #[test]
    fn test_import_id_display() {
        assert_eq!(ImportId::new(12).to_string(), "#12");
    }
}
