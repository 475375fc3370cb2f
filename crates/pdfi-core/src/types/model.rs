//! Model definition types.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::schema::Schema;

/// Store-assigned identifier of a model definition.
///
/// # Examples
///
/// ```
/// use pdfi_core::ModelId;
///
/// let id = ModelId::new(7);
/// assert_eq!(id.as_i64(), 7);
/// assert_eq!(id.to_string(), "#7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(pub i64);

impl ModelId {
    /// Creates a model id from its raw value.
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

impl From<i64> for ModelId {
    #[inline]
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named JSON-Schema describing what the extraction pipeline should fill in.
///
/// `id` and `created_at` are assigned by the store and never change. The
/// schema travels under the `json_schema` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDefinition {
    /// Unique identifier.
    pub id: ModelId,

    /// Display name, never blank.
    pub name: String,

    /// The schema document, stored verbatim.
    #[serde(rename = "json_schema")]
    pub schema: Schema,

    /// Creation time.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl ModelDefinition {
    /// Row label used in lists and status messages, e.g. `#3 Invoice Model`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.id, self.name)
    }
}
