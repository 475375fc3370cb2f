//! Application state and lifecycle management.
//!
//! This module provides the core [`App`] struct which owns the UI state and
//! forwards user intents to the [`RegistryController`]. Registry calls run on
//! spawned tasks; they report back through a [`Reporter`] so the loop keeps
//! rendering while a request is in flight.
//!
//! # Architecture
//!
//! ```text
//! App
//!  ├── controller: RegistryController   # Models, drafts, busy flags, messages
//!  ├── imports: Arc<dyn ImportSource>   # Import jobs (view and delete)
//!  ├── reporter: Reporter               # Where spawned tasks report
//!  ├── mode: AppMode                    # Normal / Editing / Help / Confirm
//!  ├── view: View                       # Models or Imports
//!  ├── model_list / import_list: ListState
//!  ├── detail_state: DetailPaneState
//!  ├── confirm: Option<PendingConfirm>
//!  └── notice: Option<Notice>           # UI-local hints
//! ```

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use pdfi_controller::{DraftField, DraftTarget, Outcome, RegistryController, RegistryState};
use pdfi_core::{ImportId, ImportRecord, ModelDefinition, ModelId};
use pdfi_registry::{ImportSource, RegistryError};
use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::confirm::PendingConfirm;
use crate::event::{Event, Operation};
use crate::tui::Reporter;

/// The current mode of the application UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Browsing a list.
    #[default]
    Normal,

    /// Typing into a form field.
    Editing(DraftField),

    /// Help panel is displayed.
    Help,

    /// A delete confirmation is displayed.
    Confirm,
}

impl AppMode {
    /// Short badge for the status bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Editing(_) => "EDIT",
            Self::Help => "HELP",
            Self::Confirm => "CONFIRM",
        }
    }

    /// The focused form field, if typing.
    #[must_use]
    pub const fn field(self) -> Option<DraftField> {
        match self {
            Self::Editing(field) => Some(field),
            _ => None,
        }
    }
}

/// Which screen is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Model definitions and their forms.
    #[default]
    Models,

    /// Import jobs and their results.
    Imports,
}

impl View {
    /// Switches to the other view.
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Models => Self::Imports,
            Self::Imports => Self::Models,
        }
    }

    /// Tab title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Models => "Models",
            Self::Imports => "Imports",
        }
    }
}

/// Selection and scroll state of a list widget.
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Currently selected index (if any).
    pub selected: Option<usize>,

    /// Scroll offset for virtualized rendering.
    pub scroll_offset: usize,

    /// Height of the visible area (for page navigation).
    pub visible_height: usize,
}

impl ListState {
    /// Creates a new list state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves selection to the next item.
    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            self.selected = None;
            return;
        }

        self.selected = Some(match self.selected {
            Some(i) if i + 1 < len => i + 1,
            Some(_) | None => 0, // Wrap to start
        });

        self.ensure_visible();
    }

    /// Moves selection to the previous item.
    pub fn select_previous(&mut self, len: usize) {
        if len == 0 {
            self.selected = None;
            return;
        }

        self.selected = Some(match self.selected {
            Some(0) | None => len.saturating_sub(1), // Wrap to end
            Some(i) => i - 1,
        });

        self.ensure_visible();
    }

    /// Moves selection to the first item.
    pub fn select_first(&mut self, len: usize) {
        if len == 0 {
            self.selected = None;
        } else {
            self.selected = Some(0);
            self.scroll_offset = 0;
        }
    }

    /// Moves selection to the last item.
    pub fn select_last(&mut self, len: usize) {
        if len == 0 {
            self.selected = None;
        } else {
            self.selected = Some(len - 1);
            self.ensure_visible();
        }
    }

    /// Moves selection down by one page.
    pub fn page_down(&mut self, len: usize) {
        if len == 0 {
            return;
        }

        let page_size = self.visible_height.max(1);
        self.selected = Some(match self.selected {
            Some(i) => (i + page_size).min(len - 1),
            None => page_size.min(len - 1),
        });

        self.ensure_visible();
    }

    /// Moves selection up by one page.
    pub fn page_up(&mut self, len: usize) {
        if len == 0 {
            return;
        }

        let page_size = self.visible_height.max(1);
        self.selected = Some(match self.selected {
            Some(i) => i.saturating_sub(page_size),
            None => 0,
        });

        self.ensure_visible();
    }

    /// Keeps the selection inside a list that may have shrunk or grown.
    pub fn clamp(&mut self, len: usize) {
        self.selected = match self.selected {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => Some(0),
        };
        if self.scroll_offset >= len {
            self.scroll_offset = len.saturating_sub(1);
        }
        self.ensure_visible();
    }

    /// Ensures the selected item is visible.
    fn ensure_visible(&mut self) {
        if let Some(selected) = self.selected {
            if selected < self.scroll_offset {
                self.scroll_offset = selected;
            } else if self.visible_height > 0
                && selected >= self.scroll_offset + self.visible_height
            {
                self.scroll_offset = selected.saturating_sub(self.visible_height - 1);
            }
        }
    }
}

/// State for the import detail pane.
#[derive(Debug, Clone, Default)]
pub struct DetailPaneState {
    /// Scroll offset within the detail view.
    pub scroll_offset: usize,
}

/// UI-local hint shown in the status bar when the controller has no message.
#[derive(Debug, Clone)]
pub struct Notice {
    /// The message text.
    pub text: String,

    /// When the message was created.
    pub timestamp: Instant,

    /// Whether this is an error message.
    pub is_error: bool,
}

impl Notice {
    /// Creates a new info message.
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: Instant::now(),
            is_error: false,
        }
    }

    /// Creates a new error message.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: Instant::now(),
            is_error: true,
        }
    }

    /// Returns `true` if the message should be auto-hidden.
    ///
    /// Messages are hidden after 5 seconds.
    #[must_use]
    pub fn should_hide(&self) -> bool {
        self.timestamp.elapsed().as_secs() > 5
    }
}

/// The main application state.
pub struct App {
    controller: RegistryController,
    imports: Arc<dyn ImportSource>,
    reporter: Reporter,

    /// Last controller snapshot; refreshed after every event.
    registry: RegistryState,

    import_records: Vec<ImportRecord>,
    imports_loading: bool,
    confirm: Option<PendingConfirm>,

    /// Current UI mode.
    pub mode: AppMode,

    /// Which screen is shown.
    pub view: View,

    /// Model list widget state.
    pub model_list: ListState,

    /// Import list widget state.
    pub import_list: ListState,

    /// Import detail pane state.
    pub detail_state: DetailPaneState,

    /// UI-local hint.
    pub notice: Option<Notice>,

    /// Whether the application should quit.
    pub should_quit: bool,

    /// Terminal size (updated on resize).
    pub terminal_size: Rect,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("mode", &self.mode)
            .field("view", &self.view)
            .field("models", &self.registry.models().len())
            .field("imports", &self.import_records.len())
            .finish_non_exhaustive()
    }
}

impl App {
    /// Creates the application state.
    ///
    /// Spawned tasks report through `reporter`, see
    /// [`Tui::reporter`](crate::Tui::reporter).
    #[must_use]
    pub fn new(
        controller: RegistryController,
        imports: Arc<dyn ImportSource>,
        reporter: Reporter,
    ) -> Self {
        let registry = controller.snapshot();
        Self {
            controller,
            imports,
            reporter,
            registry,
            import_records: Vec::new(),
            imports_loading: false,
            confirm: None,
            mode: AppMode::Normal,
            view: View::Models,
            model_list: ListState::new(),
            import_list: ListState::new(),
            detail_state: DetailPaneState::default(),
            notice: None,
            should_quit: false,
            terminal_size: Rect::default(),
        }
    }

    /// Kicks off the initial model and import fetches.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        info!("Loading models and imports");
        self.spawn_operation(Operation::Load);
        self.spawn_imports_load();
    }

    /// The latest controller snapshot.
    #[must_use]
    pub const fn registry(&self) -> &RegistryState {
        &self.registry
    }

    /// The fetched import jobs, newest first.
    #[must_use]
    pub fn imports(&self) -> &[ImportRecord] {
        &self.import_records
    }

    /// Returns `true` while the import list is being fetched.
    #[must_use]
    pub const fn imports_loading(&self) -> bool {
        self.imports_loading
    }

    /// The confirmation on screen, if any.
    #[must_use]
    pub const fn pending_confirm(&self) -> Option<&PendingConfirm> {
        self.confirm.as_ref()
    }

    /// The model under the cursor.
    #[must_use]
    pub fn selected_model(&self) -> Option<&ModelDefinition> {
        self.model_list
            .selected
            .and_then(|idx| self.registry.models().get(idx))
    }

    /// The import under the cursor.
    #[must_use]
    pub fn selected_import(&self) -> Option<&ImportRecord> {
        self.import_list
            .selected
            .and_then(|idx| self.import_records.get(idx))
    }

    /// Looks up the name of a model for display.
    #[must_use]
    pub fn model_name(&self, id: ModelId) -> Option<&str> {
        self.registry.model(id).map(|m| m.name.as_str())
    }

    /// Updates the terminal size.
    pub fn set_terminal_size(&mut self, size: Rect) {
        self.terminal_size = size;
    }

    /// Processes one event from the loop and returns the resulting action.
    pub fn handle_event(&mut self, event: Event) -> Action {
        let action = match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize { width, height } => {
                self.set_terminal_size(Rect::new(0, 0, width, height));
                Action::Render
            }
            Event::Paste(text) => self.handle_paste(&text),
            Event::OperationFinished { op, outcome } => self.operation_finished(op, outcome),
            Event::ImportsLoaded(result) => {
                self.imports_loading = false;
                match result {
                    Ok(records) => {
                        debug!(count = records.len(), "Loaded imports");
                        self.import_records = records;
                        self.import_list.clamp(self.import_records.len());
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to load imports");
                        self.notice = Some(Notice::error(format!("Imports: {e}")));
                    }
                }
                Action::Render
            }
            Event::ImportLoaded(result) => {
                match result {
                    Ok(record) => self.replace_import(record),
                    Err(e) => {
                        warn!(error = %e, "Failed to reload import");
                        self.notice = Some(Notice::error(format!("Import: {e}")));
                    }
                }
                Action::Render
            }
            Event::ImportDeleted { id, result } => self.import_deleted(id, result),
            Event::ConfirmRequested { question, reply } => {
                if self.confirm.is_some() {
                    // Dropping the reply declines the newer request.
                    warn!(%question, "Confirmation already on screen, declining");
                } else {
                    self.confirm = Some(PendingConfirm::new(question, reply, self.mode));
                    self.mode = AppMode::Confirm;
                }
                Action::Render
            }
            Event::Tick => {
                self.tick();
                Action::None
            }
            Event::Render => Action::Render,
            Event::FocusGained | Event::FocusLost => Action::None,
        };

        self.sync();
        action
    }

    /// Handles a key event and returns the resulting action.
    #[must_use]
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        // Global quit handling
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.mode {
            AppMode::Normal => self.handle_normal_key(key),
            AppMode::Editing(field) => Self::handle_editing_key(key, field),
            AppMode::Help => Self::handle_help_key(key),
            AppMode::Confirm => Self::handle_confirm_key(key),
        }
    }

    /// Handles a key event in normal mode.
    fn handle_normal_key(&self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('?') => Action::ToggleHelp,
            KeyCode::Char('j') | KeyCode::Down => Action::NextItem,
            KeyCode::Char('k') | KeyCode::Up => Action::PreviousItem,
            KeyCode::Char('g') | KeyCode::Home => Action::FirstItem,
            KeyCode::Char('G') | KeyCode::End => Action::LastItem,
            KeyCode::PageDown => Action::PageDown,
            KeyCode::PageUp => Action::PageUp,
            KeyCode::Tab | KeyCode::BackTab => Action::SwitchView,
            KeyCode::Char('r') => Action::Reload,
            _ => match self.view {
                View::Models => Self::handle_models_key(key),
                View::Imports => Self::handle_imports_key(key),
            },
        }
    }

    fn handle_models_key(key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('n') => Action::NewModel,
            KeyCode::Char('e') | KeyCode::Enter => Action::EditSelected,
            KeyCode::Char('d') | KeyCode::Delete => Action::DeleteSelected,
            _ => Action::None,
        }
    }

    fn handle_imports_key(key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Enter => Action::OpenSelected,
            KeyCode::Char('J') => Action::ScrollDetailDown,
            KeyCode::Char('K') => Action::ScrollDetailUp,
            KeyCode::Char('d') | KeyCode::Delete => Action::DeleteSelected,
            _ => Action::None,
        }
    }

    /// Handles a key event while a form field has focus.
    fn handle_editing_key(key: KeyEvent, field: DraftField) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('s') => Action::Submit,
                KeyCode::Char('f') => Action::Format,
                KeyCode::Char('t') if field.target() == DraftTarget::Create => {
                    Action::LoadTemplate
                }
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Esc => Action::CancelForm,
            KeyCode::Tab | KeyCode::BackTab => Action::NextField,
            KeyCode::Enter => Action::Newline,
            KeyCode::Backspace => Action::Backspace,
            KeyCode::Char(c) => Action::InputChar(c),
            _ => Action::None,
        }
    }

    /// Handles a key event in help mode.
    fn handle_help_key(key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q' | '?') => Action::HideHelp,
            _ => Action::None,
        }
    }

    /// Handles a key event while a confirmation is shown.
    fn handle_confirm_key(key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => Action::Answer(true),
            KeyCode::Char('n' | 'N' | 'q') | KeyCode::Esc => Action::Answer(false),
            _ => Action::None,
        }
    }

    /// Handles a mouse event and returns the resulting action.
    #[must_use]
    pub const fn handle_mouse(&self, event: MouseEvent) -> Action {
        match (self.mode, event.kind) {
            (AppMode::Normal, MouseEventKind::ScrollDown) => Action::NextItem,
            (AppMode::Normal, MouseEventKind::ScrollUp) => Action::PreviousItem,
            _ => Action::None,
        }
    }

    /// Inserts pasted text into the focused field.
    fn handle_paste(&mut self, text: &str) -> Action {
        let Some(field) = self.mode.field() else {
            return Action::None;
        };

        let text = if field.is_schema() {
            text.replace("\r\n", "\n")
        } else {
            text.lines().collect::<Vec<_>>().join(" ")
        };
        self.controller.edit_field(field, |s| s.push_str(&text));
        Action::Render
    }

    /// Updates the application state based on an action.
    #[allow(clippy::match_same_arms)] // Actions are semantically different even if implementation is same
    pub fn update(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,

            Action::NextItem => {
                let len = self.current_len();
                self.current_list_mut().select_next(len);
                self.detail_state.scroll_offset = 0;
            }
            Action::PreviousItem => {
                let len = self.current_len();
                self.current_list_mut().select_previous(len);
                self.detail_state.scroll_offset = 0;
            }
            Action::FirstItem => {
                let len = self.current_len();
                self.current_list_mut().select_first(len);
                self.detail_state.scroll_offset = 0;
            }
            Action::LastItem => {
                let len = self.current_len();
                self.current_list_mut().select_last(len);
                self.detail_state.scroll_offset = 0;
            }
            Action::PageDown => {
                let len = self.current_len();
                self.current_list_mut().page_down(len);
                self.detail_state.scroll_offset = 0;
            }
            Action::PageUp => {
                let len = self.current_len();
                self.current_list_mut().page_up(len);
                self.detail_state.scroll_offset = 0;
            }
            Action::ScrollDetailDown => {
                self.detail_state.scroll_offset = self.detail_state.scroll_offset.saturating_add(1);
            }
            Action::ScrollDetailUp => {
                self.detail_state.scroll_offset = self.detail_state.scroll_offset.saturating_sub(1);
            }
            Action::SwitchView => {
                self.view = self.view.toggle();
                self.detail_state.scroll_offset = 0;
                if self.view == View::Imports && self.import_records.is_empty() {
                    self.spawn_imports_load();
                }
            }

            Action::Reload => match self.view {
                View::Models => self.spawn_operation(Operation::Load),
                View::Imports => self.spawn_imports_load(),
            },
            Action::NewModel => {
                if self.view == View::Models {
                    self.mode = AppMode::Editing(DraftField::NewName);
                }
            }
            Action::EditSelected => self.begin_edit_selected(),
            Action::DeleteSelected => match self.view {
                View::Models => {
                    if let Some(id) = self.selected_model().map(|m| m.id) {
                        self.spawn_operation(Operation::Delete(id));
                    }
                }
                View::Imports => {
                    if let Some(record) = self.selected_import() {
                        self.spawn_import_delete(record.id, &record.filename);
                    }
                }
            },
            Action::OpenSelected => {
                if let Some(id) = self.selected_import().map(|r| r.id) {
                    self.spawn_import_load(id);
                }
            }

            Action::InputChar(c) => {
                if let Some(field) = self.mode.field() {
                    self.controller.edit_field(field, |s| s.push(c));
                }
            }
            Action::Backspace => {
                if let Some(field) = self.mode.field() {
                    self.controller.edit_field(field, |s| {
                        s.pop();
                    });
                }
            }
            Action::Newline => {
                if let Some(field) = self.mode.field() {
                    if field.is_schema() {
                        self.controller.edit_field(field, |s| s.push('\n'));
                    } else {
                        self.mode = AppMode::Editing(field.next());
                    }
                }
            }
            Action::NextField => {
                if let Some(field) = self.mode.field() {
                    self.mode = AppMode::Editing(field.next());
                }
            }
            Action::Submit => self.submit(),
            Action::LoadTemplate => {
                if self.mode.field().map(DraftField::target) == Some(DraftTarget::Create) {
                    self.controller.load_template();
                }
            }
            Action::Format => {
                if let Some(field) = self.mode.field() {
                    let outcome = self.controller.reformat(field.target());
                    debug!(outcome = outcome.label(), "Reformatted schema text");
                }
            }
            Action::CancelForm => {
                if self.mode.field().map(DraftField::target) == Some(DraftTarget::Edit) {
                    self.controller.cancel_edit();
                }
                self.mode = AppMode::Normal;
            }

            Action::Answer(yes) => {
                if let Some(pending) = self.confirm.take() {
                    self.mode = pending.return_to();
                    pending.answer(yes);
                } else {
                    self.mode = AppMode::Normal;
                }
            }

            Action::ToggleHelp => {
                self.mode = if self.mode == AppMode::Help {
                    AppMode::Normal
                } else {
                    AppMode::Help
                };
            }
            Action::HideHelp => {
                self.mode = AppMode::Normal;
            }

            Action::Render | Action::Tick | Action::None => {}
        }

        self.sync();
    }

    /// Handles a tick event (periodic update).
    pub fn tick(&mut self) {
        // Clear stale status messages
        if self.notice.as_ref().is_some_and(Notice::should_hide) {
            self.notice = None;
        }
    }

    /// Declines a pending confirmation so its task can finish.
    pub fn shutdown(&mut self) {
        if let Some(pending) = self.confirm.take() {
            pending.answer(false);
        }
    }

    fn begin_edit_selected(&mut self) {
        if self.view != View::Models {
            return;
        }
        let Some(id) = self.selected_model().map(|m| m.id) else {
            return;
        };

        match self.controller.begin_edit(id) {
            Outcome::Succeeded => self.mode = AppMode::Editing(DraftField::EditName),
            outcome => debug!(%id, outcome = outcome.label(), "Edit not started"),
        }
    }

    fn submit(&mut self) {
        let Some(field) = self.mode.field() else {
            return;
        };

        match field.target() {
            DraftTarget::Create => self.spawn_operation(Operation::Create),
            DraftTarget::Edit => {
                if let Some(id) = self.registry.editing_id() {
                    self.spawn_operation(Operation::Save(id));
                }
            }
        }
    }

    fn operation_finished(&mut self, op: Operation, outcome: Outcome) -> Action {
        debug!(%op, outcome = outcome.label(), "Operation finished");

        if outcome == Outcome::Busy {
            self.notice = Some(Notice::info(format!("Ignored {op}: request already in flight")));
        }

        let snapshot = self.controller.snapshot();
        if self.mode.field().map(DraftField::target) == Some(DraftTarget::Edit)
            && snapshot.edit().is_none()
        {
            self.mode = AppMode::Normal;
        }
        self.model_list.clamp(snapshot.models().len());
        Action::Render
    }

    fn import_deleted(&mut self, id: ImportId, result: Result<(), RegistryError>) -> Action {
        match result {
            Ok(()) => {
                self.import_records.retain(|r| r.id != id);
                self.import_list.clamp(self.import_records.len());
                self.detail_state.scroll_offset = 0;
                self.notice = Some(Notice::info(format!("Import {id} deleted.")));
            }
            Err(e) => {
                warn!(%id, error = %e, "Failed to delete import");
                self.notice = Some(Notice::error(format!("Import {id}: {e}")));
            }
        }
        Action::Render
    }

    fn replace_import(&mut self, record: ImportRecord) {
        if let Some(slot) = self.import_records.iter_mut().find(|r| r.id == record.id) {
            *slot = record;
        } else {
            self.import_records.insert(0, record);
            self.import_list.clamp(self.import_records.len());
        }
    }

    fn sync(&mut self) {
        self.registry = self.controller.snapshot();
    }

    fn current_len(&self) -> usize {
        match self.view {
            View::Models => self.registry.models().len(),
            View::Imports => self.import_records.len(),
        }
    }

    fn current_list_mut(&mut self) -> &mut ListState {
        match self.view {
            View::Models => &mut self.model_list,
            View::Imports => &mut self.import_list,
        }
    }

    fn spawn_operation(&self, op: Operation) {
        let controller = self.controller.clone();
        let reporter = self.reporter.clone();

        tokio::spawn(async move {
            let outcome = match op {
                Operation::Load => controller.load().await,
                Operation::Create => controller.create().await,
                Operation::Save(id) => controller.save_edit(id).await,
                Operation::Delete(id) => controller.delete(id, &reporter).await,
            };
            reporter.operation_finished(op, outcome).await;
        });
    }

    fn spawn_imports_load(&mut self) {
        if self.imports_loading {
            return;
        }
        self.imports_loading = true;

        let imports = Arc::clone(&self.imports);
        let reporter = self.reporter.clone();
        tokio::spawn(async move {
            reporter.imports_loaded(imports.list_imports().await).await;
        });
    }

    fn spawn_import_load(&self, id: ImportId) {
        let imports = Arc::clone(&self.imports);
        let reporter = self.reporter.clone();
        tokio::spawn(async move {
            reporter.import_loaded(imports.get_import(id).await).await;
        });
    }

    /// Asks first, then deletes; a "no" leaves the list alone.
    fn spawn_import_delete(&self, id: ImportId, filename: &str) {
        let question = format!("Delete import {id} ({filename})?");
        let imports = Arc::clone(&self.imports);
        let reporter = self.reporter.clone();
        tokio::spawn(async move {
            if !reporter.ask(&question).await {
                debug!(%id, "Import delete declined");
                return;
            }
            reporter.import_deleted(id, imports.delete_import(id).await).await;
        });
    }
}
