//! Controller state and the view state derived from it.
//!
//! [`RegistryState`] is owned by the [`RegistryController`](crate::RegistryController);
//! presentation code only ever sees clones obtained through
//! [`snapshot`](crate::RegistryController::snapshot). Mutators are crate-private.

use pdfi_core::{FxHashSet, ModelDefinition, ModelId, fx_hash_set};

use crate::error::Fault;
use crate::status::StatusMessage;

/// The "new model" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewModelDraft {
    /// Name to create the model under.
    pub name: String,
    /// Raw schema text as typed.
    pub schema_text: String,
}

/// The inline edit form of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    /// The row being edited.
    pub id: ModelId,
    /// Edited name.
    pub name: String,
    /// Edited schema text.
    pub schema_text: String,
}

/// Which form a draft operation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftTarget {
    /// The "new model" form.
    Create,
    /// The edit form of the row under edit.
    Edit,
}

/// A single text field of either form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    /// Name of the new model.
    NewName,
    /// Schema text of the new model.
    NewSchema,
    /// Name of the row under edit.
    EditName,
    /// Schema text of the row under edit.
    EditSchema,
}

impl DraftField {
    /// The form this field belongs to.
    #[must_use]
    pub const fn target(self) -> DraftTarget {
        match self {
            Self::NewName | Self::NewSchema => DraftTarget::Create,
            Self::EditName | Self::EditSchema => DraftTarget::Edit,
        }
    }

    /// Returns `true` for multi-line schema fields.
    #[must_use]
    pub const fn is_schema(self) -> bool {
        matches!(self, Self::NewSchema | Self::EditSchema)
    }

    /// Next field of the same form, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::NewName => Self::NewSchema,
            Self::NewSchema => Self::NewName,
            Self::EditName => Self::EditSchema,
            Self::EditSchema => Self::EditName,
        }
    }
}

/// Which actions a row currently offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowControls {
    /// Enter edit mode.
    pub edit: bool,
    /// Delete the row.
    pub delete: bool,
    /// Save the edit draft.
    pub save: bool,
    /// Discard the edit draft.
    pub cancel: bool,
}

/// Everything the controller tracks.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryState {
    models: Vec<ModelDefinition>,
    pub(crate) draft: NewModelDraft,
    pub(crate) edit: Option<EditDraft>,
    pub(crate) busy: FxHashSet<ModelId>,
    pub(crate) saving: bool,
    status: Option<StatusMessage>,
}

impl RegistryState {
    pub(crate) fn new(draft: NewModelDraft) -> Self {
        Self {
            models: Vec::new(),
            draft,
            edit: None,
            busy: fx_hash_set(),
            saving: false,
            status: None,
        }
    }

    /// Models in the order the store returned them.
    #[must_use]
    pub fn models(&self) -> &[ModelDefinition] {
        &self.models
    }

    /// Looks up a listed model.
    #[must_use]
    pub fn model(&self, id: ModelId) -> Option<&ModelDefinition> {
        self.models.iter().find(|m| m.id == id)
    }

    /// The "new model" form.
    #[must_use]
    pub const fn draft(&self) -> &NewModelDraft {
        &self.draft
    }

    /// The edit form, if a row is under edit.
    #[must_use]
    pub const fn edit(&self) -> Option<&EditDraft> {
        self.edit.as_ref()
    }

    /// The row under edit.
    #[must_use]
    pub fn editing_id(&self) -> Option<ModelId> {
        self.edit.as_ref().map(|e| e.id)
    }

    /// Returns `true` while an update or delete for `id` is in flight.
    #[must_use]
    pub fn is_busy(&self, id: ModelId) -> bool {
        self.busy.contains(&id)
    }

    /// Returns `true` if any row has a request in flight.
    #[must_use]
    pub fn any_busy(&self) -> bool {
        !self.busy.is_empty()
    }

    /// Returns `true` while a create is in flight.
    #[must_use]
    pub const fn is_saving(&self) -> bool {
        self.saving
    }

    /// Whether the create form may be submitted.
    #[must_use]
    pub const fn can_submit(&self) -> bool {
        !self.saving
    }

    /// The current status message.
    #[must_use]
    pub const fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// The success message, if the last message was one.
    #[must_use]
    pub fn success_message(&self) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|s| !s.is_error())
            .map(StatusMessage::text)
    }

    /// The error message, if the last message was one.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|s| s.is_error())
            .map(StatusMessage::text)
    }

    /// Actions available on row `id`.
    #[must_use]
    pub fn row_controls(&self, id: ModelId) -> RowControls {
        let editing = self.editing_id() == Some(id);
        let busy = self.is_busy(id);
        RowControls {
            edit: !editing,
            delete: !busy,
            save: editing && !busy,
            cancel: editing,
        }
    }

    pub(crate) fn replace_models(&mut self, models: Vec<ModelDefinition>) {
        self.models = models;
    }

    pub(crate) fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn clear_error(&mut self) {
        if self.status.as_ref().is_some_and(StatusMessage::is_error) {
            self.status = None;
        }
    }

    pub(crate) fn succeed(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage::success(text));
    }

    pub(crate) fn fail(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage::error(text));
    }

    pub(crate) fn report(&mut self, fault: &Fault) {
        self.fail(fault.to_string());
    }

    /// Closes the edit form if it belongs to `id`.
    pub(crate) fn close_edit_for(&mut self, id: ModelId) {
        if self.editing_id() == Some(id) {
            self.edit = None;
        }
    }

    pub(crate) fn field_mut(&mut self, field: DraftField) -> Option<&mut String> {
        match field {
            DraftField::NewName => Some(&mut self.draft.name),
            DraftField::NewSchema => Some(&mut self.draft.schema_text),
            DraftField::EditName => self.edit.as_mut().map(|e| &mut e.name),
            DraftField::EditSchema => self.edit.as_mut().map(|e| &mut e.schema_text),
        }
    }

    pub(crate) fn schema_text_mut(&mut self, target: DraftTarget) -> Option<&mut String> {
        match target {
            DraftTarget::Create => self.field_mut(DraftField::NewSchema),
            DraftTarget::Edit => self.field_mut(DraftField::EditSchema),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfi_core::schema;
    use time::OffsetDateTime;

    fn model(id: i64) -> ModelDefinition {
        ModelDefinition {
            id: ModelId::new(id),
            name: format!("Model {id}"),
            schema: schema::default_template(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn state_with_rows() -> RegistryState {
        let mut state = RegistryState::new(NewModelDraft::default());
        state.replace_models(vec![model(2), model(1)]);
        state
    }

    #[test]
    fn test_messages_are_exclusive() {
        let mut state = state_with_rows();
        state.succeed("Model saved.");
        assert_eq!(state.success_message(), Some("Model saved."));
        assert_eq!(state.error_message(), None);

        state.fail("model not found");
        assert_eq!(state.success_message(), None);
        assert_eq!(state.error_message(), Some("model not found"));
    }

    #[test]
    fn test_clear_error_keeps_success() {
        let mut state = state_with_rows();
        state.succeed("Model saved.");
        state.clear_error();
        assert_eq!(state.success_message(), Some("Model saved."));

        state.fail("bad");
        state.clear_error();
        assert!(state.status().is_none());
    }

    #[test]
    fn test_row_controls() {
        let mut state = state_with_rows();
        let id = ModelId::new(1);
        assert_eq!(
            state.row_controls(id),
            RowControls {
                edit: true,
                delete: true,
                save: false,
                cancel: false
            }
        );

        state.edit = Some(EditDraft {
            id,
            name: String::new(),
            schema_text: String::new(),
        });
        let editing = state.row_controls(id);
        assert!(!editing.edit);
        assert!(editing.save);
        assert!(editing.cancel);

        state.busy.insert(id);
        let busy = state.row_controls(id);
        assert!(!busy.edit);
        assert!(!busy.save);
        assert!(!busy.delete);
        assert!(busy.cancel);

        // Other rows are unaffected
        assert!(state.row_controls(ModelId::new(2)).delete);
    }

    #[test]
    fn test_field_mut_without_edit() {
        let mut state = state_with_rows();
        assert!(state.field_mut(DraftField::EditName).is_none());
        assert!(state.field_mut(DraftField::NewName).is_some());
    }

    #[test]
    fn test_close_edit_only_for_matching_row() {
        let mut state = state_with_rows();
        state.edit = Some(EditDraft {
            id: ModelId::new(2),
            name: String::new(),
            schema_text: String::new(),
        });
        state.close_edit_for(ModelId::new(1));
        assert_eq!(state.editing_id(), Some(ModelId::new(2)));
        state.close_edit_for(ModelId::new(2));
        assert_eq!(state.editing_id(), None);
    }

    #[test]
    fn test_draft_field_cycle() {
        assert_eq!(DraftField::NewName.next(), DraftField::NewSchema);
        assert_eq!(DraftField::EditSchema.next(), DraftField::EditName);
        assert_eq!(DraftField::EditName.target(), DraftTarget::Edit);
        assert!(DraftField::NewSchema.is_schema());
    }
}
