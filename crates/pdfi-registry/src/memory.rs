//! In-memory registry store.
//!
//! [`InMemoryRegistry`] backs the interactive sandbox and the controller
//! tests. It enforces the same rules as the HTTP service:
//!
//! - ids are assigned sequentially from 1 and never reused
//! - `list` returns models newest first
//! - schemas are stored verbatim
//! - blank names are rejected
//! - a model that still has imports cannot be deleted
//!
//! The store is guarded by a [`parking_lot::Mutex`] that is only held for the
//! synchronous part of a call; the optional simulated latency is awaited
//! before the lock is taken.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use pdfi_core::{
    FxHashMap, ImportId, ImportRecord, ImportStatus, ModelDefinition, ModelId, RegistryConfig,
    Schema, fx_hash_map, schema,
};
use serde_json::json;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::client::{ImportSource, RegistryClient, RegistryResult};
use crate::error::RegistryError;

const MODEL_NOT_FOUND: &str = "model not found";
const IMPORT_NOT_FOUND: &str = "import not found";
const MODEL_HAS_IMPORTS: &str = "model has imports and cannot be deleted";
const BLANK_NAME: &str = "name must not be empty";

#[derive(Debug)]
struct Store {
    models: FxHashMap<ModelId, ModelDefinition>,
    imports: FxHashMap<ImportId, ImportRecord>,
    next_model_id: i64,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            models: fx_hash_map(),
            imports: fx_hash_map(),
            next_model_id: 1,
        }
    }
}

impl Store {
    fn insert_model(&mut self, name: &str, schema: &Schema, at: OffsetDateTime) -> ModelDefinition {
        let id = ModelId::new(self.next_model_id);
        self.next_model_id += 1;

        let model = ModelDefinition {
            id,
            name: name.to_owned(),
            schema: schema.clone(),
            created_at: at,
        };
        self.models.insert(id, model.clone());
        model
    }

    fn has_imports(&self, id: ModelId) -> bool {
        self.imports.values().any(|import| import.model_id == id)
    }
}

/// A registry held entirely in memory.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use pdfi_registry::InMemoryRegistry;
///
/// let registry = InMemoryRegistry::new().with_latency(Duration::from_millis(300));
/// assert_eq!(registry.latency(), Duration::from_millis(300));
/// assert_eq!(registry.model_count(), 0);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    store: Mutex<Store>,
    latency: Duration,
}

impl InMemoryRegistry {
    /// Creates an empty store with no simulated latency.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from configuration, seeding demo data when asked to.
    #[must_use]
    pub fn from_config(config: &RegistryConfig) -> Self {
        let registry =
            Self::new().with_latency(Duration::from_millis(config.simulated_latency_ms));
        if config.seed_demo_data {
            registry.seed_demo();
        }
        registry
    }

    /// Delays every subsequent call by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// The simulated per-call latency.
    #[must_use]
    pub const fn latency(&self) -> Duration {
        self.latency
    }

    /// Number of stored models.
    #[must_use]
    pub fn model_count(&self) -> usize {
        self.store.lock().models.len()
    }

    /// Stores an import record as-is, replacing any record with the same id.
    ///
    /// Imports are produced by the processing pipeline, which this crate does
    /// not model; seeding is how tests and the demo get them in.
    pub fn seed_import(&self, record: ImportRecord) {
        self.store.lock().imports.insert(record.id, record);
    }

    /// Fills the store with a few sample models and imports.
    pub fn seed_demo(&self) {
        let now = OffsetDateTime::now_utc();
        let mut store = self.store.lock();

        let receipt_schema = Schema::new(json!({
            "type": "object",
            "properties": {
                "merchant": { "type": "string" },
                "date": { "type": "string", "format": "date" },
                "total": { "type": "number", "minimum": 0 }
            },
            "required": ["merchant", "total"]
        }));
        let delivery_schema = Schema::new(json!({
            "type": "object",
            "properties": {
                "delivery_number": { "type": "string" },
                "items": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "sku": { "type": "string" },
                            "quantity": { "type": "integer", "minimum": 1 }
                        }
                    }
                }
            }
        }));

        let invoice = store.insert_model(
            "Invoice Model",
            &schema::default_template(),
            now - time::Duration::days(3),
        );
        let receipt = store.insert_model("Receipt", &receipt_schema, now - time::Duration::days(2));
        store.insert_model("Delivery Note", &delivery_schema, now - time::Duration::days(1));

        let mut done = ImportRecord::processing(
            ImportId::new(1),
            invoice.id,
            "invoice-2024-0113.pdf",
            now - time::Duration::hours(5),
        );
        done.status = ImportStatus::Done;
        done.updated_at = done.created_at + time::Duration::seconds(42);
        done.ocr_text = Some("ACME GmbH\nInvoice A-2024-0113\nTotal EUR 1,249.90".to_owned());
        done.extracted_json = Some(json!({ "invoice_number": "A-2024-0113", "total": 1249.9 }));

        let mut failed = ImportRecord::processing(
            ImportId::new(2),
            receipt.id,
            "scan-0042.pdf",
            now - time::Duration::hours(2),
        );
        failed.status = ImportStatus::Failed;
        failed.updated_at = failed.created_at + time::Duration::seconds(8);
        failed.error = Some("OCR produced no text".to_owned());

        let pending = ImportRecord::processing(
            ImportId::new(3),
            invoice.id,
            "invoice-2024-0127.pdf",
            now - time::Duration::minutes(1),
        );

        for record in [done, failed, pending] {
            store.imports.insert(record.id, record);
        }

        info!(
            models = store.models.len(),
            imports = store.imports.len(),
            "Seeded demo registry"
        );
    }

    async fn pause(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

fn check_name(name: &str) -> RegistryResult<()> {
    if name.trim().is_empty() {
        return Err(RegistryError::validation(BLANK_NAME));
    }
    Ok(())
}

#[async_trait]
impl RegistryClient for InMemoryRegistry {
    async fn list(&self) -> RegistryResult<Vec<ModelDefinition>> {
        self.pause().await;
        let mut models: Vec<_> = self.store.lock().models.values().cloned().collect();
        models.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(models)
    }

    async fn create(&self, name: &str, schema: &Schema) -> RegistryResult<ModelDefinition> {
        self.pause().await;
        check_name(name)?;
        let model = self
            .store
            .lock()
            .insert_model(name, schema, OffsetDateTime::now_utc());
        debug!(id = model.id.as_i64(), name, "Created model");
        Ok(model)
    }

    async fn update(
        &self,
        id: ModelId,
        name: &str,
        schema: &Schema,
    ) -> RegistryResult<ModelDefinition> {
        self.pause().await;
        let mut store = self.store.lock();
        let model = store
            .models
            .get_mut(&id)
            .ok_or_else(|| RegistryError::not_found(MODEL_NOT_FOUND))?;
        check_name(name)?;

        name.clone_into(&mut model.name);
        model.schema = schema.clone();
        debug!(id = id.as_i64(), name, "Updated model");
        Ok(model.clone())
    }

    async fn delete(&self, id: ModelId) -> RegistryResult<()> {
        self.pause().await;
        let mut store = self.store.lock();
        if !store.models.contains_key(&id) {
            return Err(RegistryError::not_found(MODEL_NOT_FOUND));
        }
        if store.has_imports(id) {
            return Err(RegistryError::conflict(MODEL_HAS_IMPORTS));
        }
        store.models.remove(&id);
        debug!(id = id.as_i64(), "Deleted model");
        Ok(())
    }
}

#[async_trait]
impl ImportSource for InMemoryRegistry {
    async fn list_imports(&self) -> RegistryResult<Vec<ImportRecord>> {
        self.pause().await;
        let mut imports: Vec<_> = self.store.lock().imports.values().cloned().collect();
        imports.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(imports)
    }

    async fn get_import(&self, id: ImportId) -> RegistryResult<ImportRecord> {
        self.pause().await;
        self.store
            .lock()
            .imports
            .get(&id)
            .cloned()
            .ok_or_else(|| RegistryError::not_found(IMPORT_NOT_FOUND))
    }

    async fn delete_import(&self, id: ImportId) -> RegistryResult<()> {
        self.pause().await;
        if self.store.lock().imports.remove(&id).is_none() {
            return Err(RegistryError::not_found(IMPORT_NOT_FOUND));
        }
        debug!(id = id.as_i64(), "Deleted import");
        Ok(())
    }
}
