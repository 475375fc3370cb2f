//! Domain types for pdf-importer.
//!
//! - [`model`] - Model definitions and their identifiers
//! - [`import`] - Import job records
//! - [`status`] - Import processing status
//!
//! All public types are re-exported here and at the crate root:
//!
//! ```
//! use pdfi_core::{ImportStatus, ModelDefinition, ModelId};
//! ```

mod import;
mod model;
mod status;

pub use import::{ImportId, ImportRecord};
pub use model::{ModelDefinition, ModelId};
pub use status::ImportStatus;
