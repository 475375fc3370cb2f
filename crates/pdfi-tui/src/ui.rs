//! Main UI layout and rendering orchestration.
//!
//! This module provides the main [`render`] function that orchestrates
//! rendering of all UI components based on the current application state.
//!
//! # Layout Structure
//!
//! ```text
//! +------------------------------------------------------------------+
//! | pdf-importer  OCR + AI extraction | [Models] Imports | ? for help |
//! +------------------------------------------------------------------+
//! |  Models (3)                  |  New model / Edit model #2         |
//! |  ▸ #3 Delivery Note  ...     |  Name   [Invoice Model▌]           |
//! |    #2 Receipt ✎      ...     |  Schema { "type": "object", ... }  |
//! |    #1 Invoice Model  ...     |  Ctrl+s save · Ctrl+f format       |
//! +------------------------------------------------------------------+
//! | NORMAL  Model saved. │ 3 models                                   |
//! +------------------------------------------------------------------+
//! ```
//!
//! The imports view swaps the main area for the import list and its detail
//! pane. Help and the delete confirmation are drawn as centered overlays.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::app::{App, AppMode, View};
use crate::components::{
    ConfirmDialog, HeaderBar, HelpPanel, ImportDetail, ImportListView, ModelForm, ModelListView,
    StatusBar,
};
use crate::theme::Theme;

/// Renders the entire UI based on the current application state.
pub fn render(app: &App, frame: &mut Frame, theme: &Theme) {
    let area = frame.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let header = HeaderBar::new(app.view, theme);
    frame.render_widget(&header, main_chunks[0]);

    match app.view {
        View::Models => render_models(app, frame, main_chunks[1], theme),
        View::Imports => render_imports(app, frame, main_chunks[1], theme),
    }

    let status_bar = StatusBar::new(app, theme);
    frame.render_widget(&status_bar, main_chunks[2]);

    if let Some(pending) = app.pending_confirm() {
        let dialog = ConfirmDialog::new(pending.question(), theme);
        frame.render_widget(&dialog, centered_rect(50, 25, area));
    }

    if app.mode == AppMode::Help {
        let help_panel = HelpPanel::new(theme);
        let help_area = centered_rect(60, 80, area);
        frame.render_widget(&help_panel, help_area);
    }
}

/// Renders the model list and the form panel.
fn render_models(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let focus = app.mode.field();

    let list = ModelListView::new(app.registry(), focus.is_none(), theme);
    frame.render_stateful_widget(&list, chunks[0], &mut app.model_list.clone());

    let form = ModelForm::new(app.registry(), focus, theme);
    frame.render_widget(&form, chunks[1]);
}

/// Renders the import list and the detail pane.
fn render_imports(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let list = ImportListView::new(app.imports(), app.imports_loading(), theme);
    frame.render_stateful_widget(&list, chunks[0], &mut app.import_list.clone());

    let selected = app.selected_import();
    let model_name = selected.and_then(|r| app.model_name(r.model_id));
    let detail = ImportDetail::new(selected, model_name, theme);
    frame.render_stateful_widget(&detail, chunks[1], &mut app.detail_state.clone());
}

/// Creates a centered rectangle with the given percentage width and height.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
