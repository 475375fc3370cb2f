//! The registry controller.
//!
//! [`RegistryController`] is a cheap, cloneable handle. Clones share one
//! [`RegistryState`] behind a mutex that is never held across an `.await`, so
//! several operations can be in flight at once (the TUI spawns a task per
//! intent) while the UI keeps rendering snapshots.
//!
//! # Operation rules
//!
//! - User-initiated operations clear the status message when they start.
//! - Schema text is parsed before any registry call; a parse fault never
//!   reaches the store.
//! - Every successful mutation re-fetches the whole list. The refresh does not
//!   clear the message the mutation set, but a refresh failure replaces it.
//! - A row with an update or delete in flight rejects further mutations with
//!   [`Outcome::Busy`]; so does the create form while `saving`.
//! - There is no timeout. A busy or saving flag clears once the operation
//!   settles, or when its future is dropped mid-flight.

use std::sync::Arc;

use parking_lot::Mutex;
use pdfi_core::{ModelId, RegistryConfig, schema};
use pdfi_registry::{RegistryClient, RegistryError};
use tracing::{debug, info, warn};

use crate::confirm::ConfirmPrompt;
use crate::error::Fault;
use crate::state::{DraftField, DraftTarget, EditDraft, NewModelDraft, RegistryState};
use crate::status::Outcome;

/// The flag an in-flight request holds.
#[derive(Debug, Clone, Copy)]
enum Claim {
    Saving,
    Row(ModelId),
}

/// Releases a [`Claim`] when dropped.
///
/// Held across the registry call, so a cancelled operation cannot leave the
/// create form or a row stuck in the busy state.
struct InFlight {
    state: Arc<Mutex<RegistryState>>,
    claim: Claim,
}

impl InFlight {
    /// Sets the flag on an already locked state and returns its guard.
    fn claim(state: &Arc<Mutex<RegistryState>>, locked: &mut RegistryState, claim: Claim) -> Self {
        match claim {
            Claim::Saving => locked.saving = true,
            Claim::Row(id) => {
                locked.busy.insert(id);
            }
        }
        Self {
            state: Arc::clone(state),
            claim,
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        match self.claim {
            Claim::Saving => state.saving = false,
            Claim::Row(id) => {
                state.busy.remove(&id);
            }
        }
    }
}

/// Coordinates the model list, the two forms, and the registry client.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use pdfi_controller::{Outcome, RegistryController};
/// use pdfi_core::RegistryConfig;
/// use pdfi_registry::InMemoryRegistry;
///
/// # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
/// let controller = RegistryController::new(
///     Arc::new(InMemoryRegistry::new()),
///     &RegistryConfig::default(),
/// );
///
/// assert_eq!(controller.create().await, Outcome::Succeeded);
/// let state = controller.snapshot();
/// assert_eq!(state.models().len(), 1);
/// assert_eq!(state.success_message(), Some("Model saved."));
/// # });
/// ```
#[derive(Clone)]
pub struct RegistryController {
    client: Arc<dyn RegistryClient>,
    state: Arc<Mutex<RegistryState>>,
}

impl std::fmt::Debug for RegistryController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryController")
            .field("state", &*self.state.lock())
            .finish_non_exhaustive()
    }
}

impl RegistryController {
    /// Creates a controller with an empty list.
    ///
    /// The create form starts with the configured default name and the
    /// pretty-printed invoice template.
    #[must_use]
    pub fn new(client: Arc<dyn RegistryClient>, config: &RegistryConfig) -> Self {
        let draft = NewModelDraft {
            name: config.default_model_name.clone(),
            schema_text: schema::default_template().to_pretty_string(),
        };
        Self {
            client,
            state: Arc::new(Mutex::new(RegistryState::new(draft))),
        }
    }

    /// A copy of the current state for rendering or inspection.
    #[must_use]
    pub fn snapshot(&self) -> RegistryState {
        self.state.lock().clone()
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut RegistryState) -> R) -> R {
        f(&mut self.state.lock())
    }

    /// Logs a fault and makes it the status message.
    fn report(&self, action: &'static str, fault: impl Into<Fault>) {
        let fault = fault.into();
        if fault.is_store() {
            warn!(action, error = %fault, "Registry request failed");
        } else if fault.is_parse() {
            debug!(action, %fault, "Schema text rejected");
        }
        self.with_state(|s| s.report(&fault));
    }

    /// Fetches the full list and replaces the local copy.
    ///
    /// On failure the previous list stays and the error message is set.
    pub async fn load(&self) -> Outcome {
        self.with_state(RegistryState::clear_status);
        self.refresh().await
    }

    async fn refresh(&self) -> Outcome {
        match self.client.list().await {
            Ok(models) => {
                debug!(count = models.len(), "Loaded models");
                self.with_state(|s| s.replace_models(models));
                Outcome::Succeeded
            }
            Err(err) => {
                self.report("load", err);
                Outcome::Failed
            }
        }
    }

    /// Validates the create form and stores a new model.
    ///
    /// The form keeps its contents either way.
    pub async fn create(&self) -> Outcome {
        let parsed = {
            let mut state = self.state.lock();
            if state.saving {
                warn!("Create ignored while a previous create is in flight");
                return Outcome::Busy;
            }
            state.clear_status();
            schema::parse(&state.draft.schema_text).map(|schema| {
                let guard = InFlight::claim(&self.state, &mut state, Claim::Saving);
                (state.draft.name.clone(), schema, guard)
            })
        };
        let (name, schema, _saving) = match parsed {
            Ok(claimed) => claimed,
            Err(fault) => {
                self.report("create", fault);
                return Outcome::Failed;
            }
        };

        match self.client.create(&name, &schema).await {
            Ok(model) => {
                info!(id = model.id.as_i64(), name = %model.name, "Model created");
                self.with_state(|s| s.succeed("Model saved."));
                self.refresh().await;
                Outcome::Succeeded
            }
            Err(err) => {
                self.report("create", err);
                Outcome::Failed
            }
        }
    }

    /// Opens the edit form for `id`, snapshotting its name and schema.
    ///
    /// Any other open edit form is discarded without saving; calling this
    /// again for the same row discards unsaved changes. A row with a request
    /// in flight can still be opened; saving it waits until the row settles.
    pub fn begin_edit(&self, id: ModelId) -> Outcome {
        let mut state = self.state.lock();
        state.clear_status();

        let draft = state.model(id).map(|model| EditDraft {
            id,
            name: model.name.clone(),
            schema_text: model.schema.to_pretty_string(),
        });
        let Some(draft) = draft else {
            drop(state);
            self.report("edit", RegistryError::not_found("model not found"));
            return Outcome::Failed;
        };
        state.edit = Some(draft);
        debug!(id = id.as_i64(), "Editing model");
        Outcome::Succeeded
    }

    /// Validates the edit form of `id` and stores it.
    ///
    /// Does nothing unless `id` is the row under edit. On failure the form
    /// stays open so the user can fix it.
    pub async fn save_edit(&self, id: ModelId) -> Outcome {
        let parsed = {
            let mut state = self.state.lock();
            let Some(edit) = state.edit.as_ref().filter(|e| e.id == id) else {
                debug!(id = id.as_i64(), "Save ignored, row is not under edit");
                return Outcome::Skipped;
            };
            let name = edit.name.clone();
            let parsed = schema::parse(&edit.schema_text);

            if state.is_busy(id) {
                warn!(id = id.as_i64(), "Save ignored while the row is busy");
                return Outcome::Busy;
            }
            state.clear_status();
            parsed.map(|schema| {
                let guard = InFlight::claim(&self.state, &mut state, Claim::Row(id));
                (name, schema, guard)
            })
        };
        let (name, schema, _busy) = match parsed {
            Ok(claimed) => claimed,
            Err(fault) => {
                self.report("save", fault);
                return Outcome::Failed;
            }
        };

        match self.client.update(id, &name, &schema).await {
            Ok(model) => {
                info!(id = id.as_i64(), name = %model.name, "Model updated");
                self.with_state(|s| {
                    s.succeed(format!("Model {id} updated."));
                    s.close_edit_for(id);
                });
                self.refresh().await;
                Outcome::Succeeded
            }
            Err(err) => {
                self.report("save", err);
                Outcome::Failed
            }
        }
    }

    /// Discards the edit form.
    pub fn cancel_edit(&self) {
        self.with_state(|s| s.edit = None);
    }

    /// Deletes `id` after asking `prompt`.
    ///
    /// Declining changes nothing at all, not even the status message.
    pub async fn delete(&self, id: ModelId, prompt: &dyn ConfirmPrompt) -> Outcome {
        let question = {
            let state = self.state.lock();
            if state.is_busy(id) {
                warn!(id = id.as_i64(), "Delete ignored while the row is busy");
                return Outcome::Busy;
            }
            match state.model(id) {
                Some(model) => format!("Delete model {id} ({})?", model.name),
                None => format!("Delete model {id}?"),
            }
        };

        if !prompt.confirm(&question).await {
            debug!(id = id.as_i64(), "Delete declined");
            return Outcome::Declined;
        }

        let _busy = {
            let mut state = self.state.lock();
            // Another request may have claimed the row while the prompt was open.
            if state.is_busy(id) {
                warn!(id = id.as_i64(), "Delete ignored while the row is busy");
                return Outcome::Busy;
            }
            state.clear_status();
            InFlight::claim(&self.state, &mut state, Claim::Row(id))
        };

        match self.client.delete(id).await {
            Ok(()) => {
                info!(id = id.as_i64(), "Model deleted");
                self.with_state(|s| {
                    s.succeed(format!("Model {id} deleted."));
                    s.close_edit_for(id);
                });
                self.refresh().await;
                Outcome::Succeeded
            }
            Err(err) => {
                self.report("delete", err);
                Outcome::Failed
            }
        }
    }

    /// Replaces the create form's name.
    pub fn set_draft_name(&self, name: impl Into<String>) {
        let name = name.into();
        self.with_state(|s| s.draft.name = name);
    }

    /// Replaces the create form's schema text.
    pub fn set_draft_schema_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.with_state(|s| s.draft.schema_text = text);
    }

    /// Replaces the edit form's name. Ignored when no row is under edit.
    pub fn set_edit_name(&self, name: impl Into<String>) {
        self.edit_field(DraftField::EditName, |field| *field = name.into());
    }

    /// Replaces the edit form's schema text. Ignored when no row is under edit.
    pub fn set_edit_schema_text(&self, text: impl Into<String>) {
        self.edit_field(DraftField::EditSchema, |field| *field = text.into());
    }

    /// Applies `f` to one form field in place.
    ///
    /// Returns `false` if the field does not exist (an edit field with no row
    /// under edit).
    pub fn edit_field(&self, field: DraftField, f: impl FnOnce(&mut String)) -> bool {
        self.with_state(|s| s.field_mut(field).map(f).is_some())
    }

    /// Replaces the create form's schema text with the invoice template.
    pub fn load_template(&self) {
        let template = schema::default_template().to_pretty_string();
        self.with_state(|s| s.draft.schema_text = template);
    }

    /// Pretty-prints the schema text of one form.
    ///
    /// Invalid text is left untouched and an error message is set; valid text
    /// is replaced and any previous error message cleared.
    pub fn reformat(&self, target: DraftTarget) -> Outcome {
        let mut state = self.state.lock();
        let Some(text) = state.schema_text_mut(target) else {
            return Outcome::Skipped;
        };

        match schema::format(text) {
            Ok(pretty) => {
                *text = pretty;
                state.clear_error();
                Outcome::Succeeded
            }
            Err(fault) => {
                state.fail(format!(
                    "JSON is not valid and could not be formatted: {}",
                    fault.message()
                ));
                Outcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::FixedAnswer;
    use async_trait::async_trait;
    use pdfi_core::{FxHashMap, ImportId, ImportRecord, ModelDefinition, Schema};
    use pdfi_registry::{InMemoryRegistry, RegistryResult};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use time::OffsetDateTime;
    use tokio::sync::oneshot;
    use tokio::time::timeout;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Op {
        List,
        Create,
        Update,
        Delete,
    }

    struct Gate {
        entered: oneshot::Sender<()>,
        release: oneshot::Receiver<()>,
    }

    /// In-memory registry with call recording, one-shot failure injection,
    /// and gates that park a call until the test releases it.
    #[derive(Default)]
    struct ScriptedClient {
        inner: InMemoryRegistry,
        calls: Mutex<Vec<Op>>,
        failures: Mutex<FxHashMap<Op, RegistryError>>,
        gates: Mutex<FxHashMap<Op, Gate>>,
    }

    impl ScriptedClient {
        async fn seeded(count: i64) -> Arc<Self> {
            let client = Self::default();
            for n in 1..=count {
                let schema = schema::parse(&format!(r#"{{"type":"object","title":"Model {n}"}}"#))
                    .unwrap();
                client.inner.create(&format!("Model {n}"), &schema).await.unwrap();
            }
            Arc::new(client)
        }

        fn fail_next(&self, op: Op, err: RegistryError) {
            self.failures.lock().insert(op, err);
        }

        /// Parks the next `op` call. Resolves the first receiver once the call
        /// is parked; sending on the returned sender lets it continue.
        fn hold(&self, op: Op) -> (oneshot::Receiver<()>, oneshot::Sender<()>) {
            let (entered_tx, entered_rx) = oneshot::channel();
            let (release_tx, release_rx) = oneshot::channel();
            self.gates.lock().insert(
                op,
                Gate {
                    entered: entered_tx,
                    release: release_rx,
                },
            );
            (entered_rx, release_tx)
        }

        fn count(&self, op: Op) -> usize {
            self.calls.lock().iter().filter(|c| **c == op).count()
        }

        fn calls(&self) -> Vec<Op> {
            self.calls.lock().clone()
        }

        async fn enter(&self, op: Op) -> RegistryResult<()> {
            self.calls.lock().push(op);
            let gate = self.gates.lock().remove(&op);
            if let Some(gate) = gate {
                let _ = gate.entered.send(());
                let _ = gate.release.await;
            }
            match self.failures.lock().remove(&op) {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl RegistryClient for ScriptedClient {
        async fn list(&self) -> RegistryResult<Vec<ModelDefinition>> {
            self.enter(Op::List).await?;
            self.inner.list().await
        }

        async fn create(&self, name: &str, schema: &Schema) -> RegistryResult<ModelDefinition> {
            self.enter(Op::Create).await?;
            self.inner.create(name, schema).await
        }

        async fn update(
            &self,
            id: ModelId,
            name: &str,
            schema: &Schema,
        ) -> RegistryResult<ModelDefinition> {
            self.enter(Op::Update).await?;
            self.inner.update(id, name, schema).await
        }

        async fn delete(&self, id: ModelId) -> RegistryResult<()> {
            self.enter(Op::Delete).await?;
            self.inner.delete(id).await
        }
    }

    /// Answers like [`FixedAnswer`] and counts how often it was asked.
    struct CountingPrompt {
        answer: bool,
        asked: AtomicUsize,
    }

    impl CountingPrompt {
        fn new(answer: bool) -> Self {
            Self {
                answer,
                asked: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ConfirmPrompt for CountingPrompt {
        async fn confirm(&self, _question: &str) -> bool {
            self.asked.fetch_add(1, Ordering::SeqCst);
            self.answer
        }
    }

    async fn loaded(count: i64) -> (Arc<ScriptedClient>, RegistryController) {
        let client = ScriptedClient::seeded(count).await;
        let controller = RegistryController::new(
            Arc::clone(&client) as Arc<dyn RegistryClient>,
            &RegistryConfig::default(),
        );
        assert_eq!(controller.load().await, Outcome::Succeeded);
        (client, controller)
    }

    fn assert_settled(state: &RegistryState) {
        assert!(!state.is_saving());
        assert!(!state.any_busy());
    }

    #[tokio::test]
    async fn test_new_controller_has_default_draft() {
        let client = ScriptedClient::seeded(0).await;
        let controller = RegistryController::new(client, &RegistryConfig::default());
        let state = controller.snapshot();

        assert!(state.models().is_empty());
        assert_eq!(state.draft().name, "Invoice Model");
        assert_eq!(
            state.draft().schema_text,
            schema::default_template().to_pretty_string()
        );
        assert!(state.status().is_none());
        assert!(state.can_submit());
    }

    #[tokio::test]
    async fn test_load_replaces_list() {
        let (client, controller) = loaded(3).await;
        let ids: Vec<_> = controller
            .snapshot()
            .models()
            .iter()
            .map(|m| m.id.as_i64())
            .collect();
        assert_eq!(ids, [3, 2, 1]);

        client.inner.create("Model 4", &schema::default_template()).await.unwrap();
        controller.load().await;
        assert_eq!(controller.snapshot().models().len(), 4);
    }

    #[tokio::test]
    async fn test_load_failure_keeps_previous_list() {
        let (client, controller) = loaded(2).await;
        client.fail_next(Op::List, RegistryError::unavailable("connection refused"));

        assert_eq!(controller.load().await, Outcome::Failed);
        let state = controller.snapshot();
        assert_eq!(state.models().len(), 2);
        assert_eq!(
            state.error_message(),
            Some("registry unavailable: connection refused")
        );
    }

    #[tokio::test]
    async fn test_load_clears_previous_message() {
        let (client, controller) = loaded(1).await;
        client.fail_next(Op::List, RegistryError::unavailable("down"));
        controller.load().await;
        assert!(controller.snapshot().error_message().is_some());

        controller.load().await;
        assert!(controller.snapshot().status().is_none());
    }

    #[tokio::test]
    async fn test_create_invalid_json_never_calls_client() {
        let (client, controller) = loaded(2).await;
        let before = controller.snapshot().models().to_vec();
        controller.set_draft_schema_text(r#"{"type": }"#);

        assert_eq!(controller.create().await, Outcome::Failed);
        assert_eq!(client.count(Op::Create), 0);

        let state = controller.snapshot();
        assert_eq!(state.models(), before.as_slice());
        assert!(state.error_message().unwrap().starts_with("invalid JSON: "));
        assert_eq!(state.success_message(), None);
        assert_settled(&state);
    }

    #[tokio::test]
    async fn test_create_success_refreshes_list() {
        let (client, controller) = loaded(2).await;
        controller.set_draft_name("Invoice Model");
        controller.set_draft_schema_text(r#"{"type":"object"}"#);

        assert_eq!(controller.create().await, Outcome::Succeeded);
        assert_eq!(client.calls(), [Op::List, Op::Create, Op::List]);

        let state = controller.snapshot();
        let created = state.model(ModelId::new(3)).unwrap();
        assert_eq!(created.name, "Invoice Model");
        assert_eq!(created.schema, schema::parse(r#"{"type":"object"}"#).unwrap());
        assert_eq!(state.success_message(), Some("Model saved."));
        // The form is not reset after a successful create
        assert_eq!(state.draft().schema_text, r#"{"type":"object"}"#);
        assert_settled(&state);
    }

    #[tokio::test]
    async fn test_create_store_failure_keeps_draft() {
        let (client, controller) = loaded(1).await;
        controller.set_draft_name("   ");
        let draft_before = controller.snapshot().draft().clone();

        assert_eq!(controller.create().await, Outcome::Failed);
        assert_eq!(client.count(Op::Create), 1);

        let state = controller.snapshot();
        assert_eq!(state.error_message(), Some("name must not be empty"));
        assert_eq!(state.draft(), &draft_before);
        assert_eq!(state.models().len(), 1);
        assert_settled(&state);
    }

    #[tokio::test]
    async fn test_create_trailing_refresh_failure_replaces_success() {
        let (client, controller) = loaded(1).await;
        let (entered, release) = client.hold(Op::Create);
        let task = tokio::spawn({
            let controller = controller.clone();
            async move { controller.create().await }
        });
        entered.await.unwrap();
        client.fail_next(Op::List, RegistryError::unavailable("gone"));
        release.send(()).unwrap();

        assert_eq!(task.await.unwrap(), Outcome::Succeeded);
        let state = controller.snapshot();
        assert_eq!(state.error_message(), Some("registry unavailable: gone"));
        assert_eq!(state.success_message(), None);
        assert_eq!(client.inner.model_count(), 2);
        assert_settled(&state);
    }

    #[tokio::test]
    async fn test_second_create_rejected_while_saving() {
        let (client, controller) = loaded(0).await;
        let (entered, release) = client.hold(Op::Create);
        let task = tokio::spawn({
            let controller = controller.clone();
            async move { controller.create().await }
        });
        entered.await.unwrap();

        let in_flight = controller.snapshot();
        assert!(in_flight.is_saving());
        assert!(!in_flight.can_submit());
        assert_eq!(controller.create().await, Outcome::Busy);

        release.send(()).unwrap();
        assert_eq!(task.await.unwrap(), Outcome::Succeeded);
        assert_eq!(client.count(Op::Create), 1);
        assert_settled(&controller.snapshot());
    }

    #[tokio::test]
    async fn test_begin_edit_switches_rows() {
        let (_client, controller) = loaded(5).await;
        assert_eq!(controller.begin_edit(ModelId::new(2)), Outcome::Succeeded);
        controller.set_edit_name("unsaved");
        assert_eq!(controller.begin_edit(ModelId::new(5)), Outcome::Succeeded);

        let state = controller.snapshot();
        assert_eq!(state.editing_id(), Some(ModelId::new(5)));
        let row = state.model(ModelId::new(5)).unwrap();
        let edit = state.edit().unwrap();
        assert_eq!(edit.name, row.name);
        assert_eq!(edit.schema_text, row.schema.to_pretty_string());
    }

    #[tokio::test]
    async fn test_begin_edit_same_row_discards_changes() {
        let (_client, controller) = loaded(2).await;
        controller.begin_edit(ModelId::new(1));
        controller.set_edit_schema_text("{ half typed");
        controller.begin_edit(ModelId::new(1));

        let state = controller.snapshot();
        let row = state.model(ModelId::new(1)).unwrap();
        assert_eq!(state.edit().unwrap().schema_text, row.schema.to_pretty_string());
    }

    #[tokio::test]
    async fn test_begin_edit_clears_messages() {
        let (client, controller) = loaded(2).await;
        client.fail_next(Op::List, RegistryError::unavailable("down"));
        controller.load().await;

        controller.begin_edit(ModelId::new(2));
        assert!(controller.snapshot().status().is_none());
    }

    #[tokio::test]
    async fn test_begin_edit_unknown_row() {
        let (_client, controller) = loaded(2).await;
        assert_eq!(controller.begin_edit(ModelId::new(9)), Outcome::Failed);

        let state = controller.snapshot();
        assert_eq!(state.editing_id(), None);
        assert_eq!(state.error_message(), Some("model not found"));
    }

    #[tokio::test]
    async fn test_cancel_edit() {
        let (_client, controller) = loaded(2).await;
        controller.begin_edit(ModelId::new(2));
        controller.cancel_edit();
        assert_eq!(controller.snapshot().editing_id(), None);

        // Cancelling with nothing open is harmless
        controller.cancel_edit();
        assert_eq!(controller.snapshot().editing_id(), None);
    }

    #[tokio::test]
    async fn test_save_edit_requires_matching_row() {
        let (client, controller) = loaded(3).await;
        assert_eq!(controller.save_edit(ModelId::new(1)).await, Outcome::Skipped);

        controller.begin_edit(ModelId::new(2));
        assert_eq!(controller.save_edit(ModelId::new(1)).await, Outcome::Skipped);
        assert_eq!(client.count(Op::Update), 0);
    }

    #[tokio::test]
    async fn test_save_edit_invalid_json_stays_open() {
        let (client, controller) = loaded(3).await;
        controller.begin_edit(ModelId::new(3));
        controller.set_edit_schema_text("{\"type\": ");

        assert_eq!(controller.save_edit(ModelId::new(3)).await, Outcome::Failed);
        assert_eq!(client.count(Op::Update), 0);

        let state = controller.snapshot();
        assert_eq!(state.editing_id(), Some(ModelId::new(3)));
        assert_eq!(state.edit().unwrap().schema_text, "{\"type\": ");
        assert!(state.error_message().is_some());
        assert_settled(&state);
    }

    #[tokio::test]
    async fn test_save_edit_failure_keeps_edit_open() {
        let (client, controller) = loaded(3).await;
        controller.begin_edit(ModelId::new(3));
        controller.set_edit_name("Renamed");
        client.fail_next(Op::Update, RegistryError::unavailable("timeout"));

        assert_eq!(controller.save_edit(ModelId::new(3)).await, Outcome::Failed);

        let state = controller.snapshot();
        assert_eq!(state.editing_id(), Some(ModelId::new(3)));
        assert_eq!(state.edit().unwrap().name, "Renamed");
        assert_eq!(state.error_message(), Some("registry unavailable: timeout"));
        assert!(!state.is_busy(ModelId::new(3)));
        assert_eq!(state.model(ModelId::new(3)).unwrap().name, "Model 3");
    }

    #[tokio::test]
    async fn test_save_edit_success() {
        let (client, controller) = loaded(3).await;
        controller.begin_edit(ModelId::new(3));
        controller.set_edit_name("Renamed");
        controller.set_edit_schema_text(r#"{"type":"array"}"#);

        assert_eq!(controller.save_edit(ModelId::new(3)).await, Outcome::Succeeded);
        assert_eq!(client.calls(), [Op::List, Op::Update, Op::List]);

        let state = controller.snapshot();
        assert_eq!(state.editing_id(), None);
        assert_eq!(state.success_message(), Some("Model #3 updated."));
        let row = state.model(ModelId::new(3)).unwrap();
        assert_eq!(row.name, "Renamed");
        assert_eq!(row.schema.as_value()["type"], "array");
        assert_settled(&state);
    }

    #[tokio::test]
    async fn test_save_edit_success_keeps_other_rows_edit() {
        let (client, controller) = loaded(3).await;
        controller.begin_edit(ModelId::new(1));
        let (entered, release) = client.hold(Op::Update);
        let task = tokio::spawn({
            let controller = controller.clone();
            async move { controller.save_edit(ModelId::new(1)).await }
        });
        entered.await.unwrap();

        // Row 1 is in flight; the user moves on to row 2
        assert_eq!(controller.begin_edit(ModelId::new(2)), Outcome::Succeeded);
        release.send(()).unwrap();
        assert_eq!(task.await.unwrap(), Outcome::Succeeded);

        assert_eq!(controller.snapshot().editing_id(), Some(ModelId::new(2)));
    }

    #[tokio::test]
    async fn test_busy_row_rejects_second_mutation() {
        let (client, controller) = loaded(3).await;
        let id = ModelId::new(2);
        controller.begin_edit(id);

        let (entered, release) = client.hold(Op::Update);
        let task = tokio::spawn({
            let controller = controller.clone();
            async move { controller.save_edit(id).await }
        });
        entered.await.unwrap();

        let in_flight = controller.snapshot();
        assert!(in_flight.is_busy(id));
        assert!(!in_flight.row_controls(id).save);
        assert!(!in_flight.row_controls(id).delete);

        let prompt = CountingPrompt::new(true);
        assert_eq!(controller.delete(id, &prompt).await, Outcome::Busy);
        assert_eq!(prompt.asked.load(Ordering::SeqCst), 0);
        assert_eq!(controller.save_edit(id).await, Outcome::Busy);
        // Reopening the form is allowed; only mutations are single-flight
        assert_eq!(controller.begin_edit(id), Outcome::Succeeded);
        assert!(controller.snapshot().row_controls(id).cancel);

        // Other rows stay available
        assert!(!in_flight.is_busy(ModelId::new(1)));

        release.send(()).unwrap();
        assert_eq!(task.await.unwrap(), Outcome::Succeeded);
        assert_eq!(client.count(Op::Update), 1);
        assert_eq!(client.count(Op::Delete), 0);
        assert_settled(&controller.snapshot());
    }

    #[tokio::test]
    async fn test_delete_declined_changes_nothing() {
        let (client, controller) = loaded(7).await;
        controller.begin_edit(ModelId::new(4));
        controller.set_draft_schema_text("{");
        controller.create().await;
        let before = controller.snapshot();
        assert!(before.error_message().is_some());

        let prompt = CountingPrompt::new(false);
        assert_eq!(
            controller.delete(ModelId::new(7), &prompt).await,
            Outcome::Declined
        );

        assert_eq!(prompt.asked.load(Ordering::SeqCst), 1);
        assert_eq!(controller.snapshot(), before);
        assert_eq!(client.count(Op::Delete), 0);
    }

    #[tokio::test]
    async fn test_delete_success_closes_edit() {
        let (client, controller) = loaded(3).await;
        controller.begin_edit(ModelId::new(2));

        assert_eq!(
            controller.delete(ModelId::new(2), &FixedAnswer::yes()).await,
            Outcome::Succeeded
        );
        assert_eq!(client.calls(), [Op::List, Op::Delete, Op::List]);

        let state = controller.snapshot();
        assert!(state.model(ModelId::new(2)).is_none());
        assert_eq!(state.models().len(), 2);
        assert_eq!(state.editing_id(), None);
        assert_eq!(state.success_message(), Some("Model #2 deleted."));
        assert_settled(&state);
    }

    #[tokio::test]
    async fn test_delete_other_row_keeps_edit() {
        let (_client, controller) = loaded(3).await;
        controller.begin_edit(ModelId::new(1));
        controller
            .delete(ModelId::new(3), &FixedAnswer::yes())
            .await;
        assert_eq!(controller.snapshot().editing_id(), Some(ModelId::new(1)));
    }

    #[tokio::test]
    async fn test_delete_conflict_keeps_state() {
        let (client, controller) = loaded(2).await;
        client.inner.seed_import(ImportRecord::processing(
            ImportId::new(1),
            ModelId::new(1),
            "invoice.pdf",
            OffsetDateTime::now_utc(),
        ));
        controller.begin_edit(ModelId::new(1));

        assert_eq!(
            controller.delete(ModelId::new(1), &FixedAnswer::yes()).await,
            Outcome::Failed
        );

        let state = controller.snapshot();
        assert_eq!(
            state.error_message(),
            Some("model has imports and cannot be deleted")
        );
        assert_eq!(state.models().len(), 2);
        assert_eq!(state.editing_id(), Some(ModelId::new(1)));
        assert_settled(&state);
    }

    #[tokio::test]
    async fn test_delete_trailing_refresh_failure() {
        let (client, controller) = loaded(2).await;
        let (entered, release) = client.hold(Op::Delete);
        let task = tokio::spawn({
            let controller = controller.clone();
            async move { controller.delete(ModelId::new(1), &FixedAnswer::yes()).await }
        });
        entered.await.unwrap();
        assert!(controller.snapshot().is_busy(ModelId::new(1)));
        client.fail_next(Op::List, RegistryError::unavailable("gone"));
        release.send(()).unwrap();

        assert_eq!(task.await.unwrap(), Outcome::Succeeded);
        let state = controller.snapshot();
        // The stale list is kept until the next successful load
        assert_eq!(state.models().len(), 2);
        assert_eq!(state.error_message(), Some("registry unavailable: gone"));
        assert_settled(&state);
    }

    #[tokio::test]
    async fn test_edit_field_and_setters() {
        let (_client, controller) = loaded(1).await;
        assert!(controller.edit_field(DraftField::NewName, |name| name.push_str(" 2")));
        assert_eq!(controller.snapshot().draft().name, "Invoice Model 2");

        assert!(!controller.edit_field(DraftField::EditName, String::clear));
        controller.set_edit_name("ignored");
        assert!(controller.snapshot().edit().is_none());

        controller.begin_edit(ModelId::new(1));
        assert!(controller.edit_field(DraftField::EditName, String::clear));
        assert_eq!(controller.snapshot().edit().unwrap().name, "");
    }

    #[tokio::test]
    async fn test_load_template_resets_schema_text() {
        let (_client, controller) = loaded(0).await;
        controller.set_draft_schema_text("garbage");
        controller.load_template();
        assert_eq!(
            controller.snapshot().draft().schema_text,
            schema::default_template().to_pretty_string()
        );
    }

    #[tokio::test]
    async fn test_reformat_create_draft() {
        let (_client, controller) = loaded(0).await;
        controller.set_draft_schema_text(r#"{"b":1,"a":[true]}"#);

        assert_eq!(controller.reformat(DraftTarget::Create), Outcome::Succeeded);
        assert_eq!(
            controller.snapshot().draft().schema_text,
            "{\n  \"b\": 1,\n  \"a\": [\n    true\n  ]\n}"
        );
    }

    #[tokio::test]
    async fn test_reformat_invalid_leaves_text() {
        let (_client, controller) = loaded(0).await;
        controller.set_draft_schema_text("{\"a\": }");

        assert_eq!(controller.reformat(DraftTarget::Create), Outcome::Failed);
        let state = controller.snapshot();
        assert_eq!(state.draft().schema_text, "{\"a\": }");
        assert!(
            state
                .error_message()
                .unwrap()
                .starts_with("JSON is not valid and could not be formatted: ")
        );

        controller.set_draft_schema_text("{\"a\": 1}");
        assert_eq!(controller.reformat(DraftTarget::Create), Outcome::Succeeded);
        assert!(controller.snapshot().status().is_none());
    }

    #[tokio::test]
    async fn test_reformat_keeps_success_message() {
        let (_client, controller) = loaded(0).await;
        controller.create().await;
        controller.reformat(DraftTarget::Create);
        assert_eq!(controller.snapshot().success_message(), Some("Model saved."));
    }

    #[tokio::test]
    async fn test_reformat_edit_draft() {
        let (_client, controller) = loaded(1).await;
        assert_eq!(controller.reformat(DraftTarget::Edit), Outcome::Skipped);

        controller.begin_edit(ModelId::new(1));
        controller.set_edit_schema_text(r#"{"x":null}"#);
        assert_eq!(controller.reformat(DraftTarget::Edit), Outcome::Succeeded);
        assert_eq!(
            controller.snapshot().edit().unwrap().schema_text,
            "{\n  \"x\": null\n}"
        );
    }

    fn slow_controller(latency: Duration) -> (Arc<InMemoryRegistry>, RegistryController) {
        let registry = Arc::new(InMemoryRegistry::new().with_latency(latency));
        let controller = RegistryController::new(
            Arc::clone(&registry) as Arc<dyn RegistryClient>,
            &RegistryConfig::default(),
        );
        (registry, controller)
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_create_releases_saving() {
        let (registry, controller) = slow_controller(Duration::from_secs(10));

        let abandoned = timeout(Duration::from_secs(1), controller.create()).await;
        assert!(abandoned.is_err());
        assert!(!controller.snapshot().is_saving());
        assert!(controller.snapshot().can_submit());

        assert_eq!(controller.create().await, Outcome::Succeeded);
        // The abandoned call never reached the store
        assert_eq!(registry.model_count(), 1);
        assert_settled(&controller.snapshot());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_delete_releases_row() {
        let (registry, controller) = slow_controller(Duration::from_secs(10));
        registry
            .create("Receipt", &schema::default_template())
            .await
            .unwrap();
        assert_eq!(controller.load().await, Outcome::Succeeded);
        let id = ModelId::new(1);

        let abandoned = timeout(
            Duration::from_secs(1),
            controller.delete(id, &FixedAnswer::yes()),
        )
        .await;
        assert!(abandoned.is_err());
        assert!(!controller.snapshot().is_busy(id));

        assert_eq!(controller.begin_edit(id), Outcome::Succeeded);
        let abandoned = timeout(Duration::from_secs(1), controller.save_edit(id)).await;
        assert!(abandoned.is_err());
        assert_settled(&controller.snapshot());

        assert_eq!(
            controller.delete(id, &FixedAnswer::yes()).await,
            Outcome::Succeeded
        );
        assert_eq!(registry.model_count(), 0);
    }
}
