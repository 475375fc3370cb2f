//! The registry boundary.
//!
//! [`RegistryClient`] is the only way the controller reaches stored model
//! definitions. [`ImportSource`] feeds the import views, which can only look
//! at jobs and remove them. Both are object safe so callers can hold
//! `Arc<dyn RegistryClient>`.

use async_trait::async_trait;
use pdfi_core::{ImportId, ImportRecord, ModelDefinition, ModelId, Schema};

use crate::error::RegistryError;

/// Result alias for registry calls.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// CRUD access to stored model definitions.
///
/// Every call is a single request/response exchange. Implementations apply
/// no timeout and no retry.
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Returns every stored model, in the store's order.
    async fn list(&self) -> RegistryResult<Vec<ModelDefinition>>;

    /// Stores a new model. The store assigns `id` and `created_at`.
    async fn create(&self, name: &str, schema: &Schema) -> RegistryResult<ModelDefinition>;

    /// Replaces the name and schema of an existing model.
    async fn update(
        &self,
        id: ModelId,
        name: &str,
        schema: &Schema,
    ) -> RegistryResult<ModelDefinition>;

    /// Removes a model.
    async fn delete(&self, id: ModelId) -> RegistryResult<()>;
}

/// Access to document import jobs.
#[async_trait]
pub trait ImportSource: Send + Sync {
    /// Returns every import, newest first.
    async fn list_imports(&self) -> RegistryResult<Vec<ImportRecord>>;

    /// Returns a single import.
    async fn get_import(&self, id: ImportId) -> RegistryResult<ImportRecord>;

    /// Removes an import along with its stored document.
    ///
    /// A model can only be deleted once none of its imports are left.
    async fn delete_import(&self, id: ImportId) -> RegistryResult<()>;
}
