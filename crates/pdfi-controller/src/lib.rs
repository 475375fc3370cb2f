//! Model-definition registry controller for pdf-importer.
//!
//! The controller owns everything the models screen shows: the list fetched
//! from the registry, the "new model" form, the inline edit form, per-row
//! busy flags, and the single status message. Presentation code reads
//! [`RegistryState`] snapshots and forwards user intents as method calls.
//!
//! # Architecture
//!
//! ```text
//! RegistryController (Clone)
//!  ├── client: Arc<dyn RegistryClient>   # store boundary
//!  └── state: Arc<Mutex<RegistryState>>
//!       ├── models: Vec<ModelDefinition>
//!       ├── draft: NewModelDraft
//!       ├── edit: Option<EditDraft>
//!       ├── busy: FxHashSet<ModelId>
//!       ├── saving: bool
//!       └── status: Option<StatusMessage>
//! ```
//!
//! Operations report an [`Outcome`] instead of returning errors; faults end
//! up in the status message.

#![deny(clippy::all)]
#![warn(missing_docs)]

mod confirm;
mod controller;
mod error;
mod state;
mod status;

pub use confirm::{ConfirmPrompt, FixedAnswer};
pub use controller::RegistryController;
pub use error::Fault;
pub use state::{DraftField, DraftTarget, EditDraft, NewModelDraft, RegistryState, RowControls};
pub use status::{Outcome, StatusKind, StatusMessage};
