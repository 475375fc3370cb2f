//! Model list component.
//!
//! Displays a scrollable, selectable table of model definitions with markers
//! for the row under edit and rows with a request in flight.

use pdfi_controller::RegistryState;
use pdfi_core::ModelDefinition;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::Span;
use ratatui::widgets::{
    Block, Borders, Cell, HighlightSpacing, Row, StatefulWidget, Table, TableState,
};

use super::{format_timestamp, truncate_to_width};
use crate::app::ListState;
use crate::theme::Theme;

/// A stateful model list widget.
///
/// Columns:
/// - Marker (`✎` under edit, `…` busy)
/// - Id
/// - Name (truncated to fit)
/// - Creation time
pub struct ModelListView<'a> {
    /// Controller snapshot holding the rows and their flags.
    registry: &'a RegistryState,
    /// Whether this widget has focus.
    focused: bool,
    /// Theme for styling.
    theme: &'a Theme,
}

impl<'a> ModelListView<'a> {
    /// Creates a new model list view.
    #[must_use]
    pub const fn new(registry: &'a RegistryState, focused: bool, theme: &'a Theme) -> Self {
        Self {
            registry,
            focused,
            theme,
        }
    }

    fn marker(&self, model: &ModelDefinition) -> Span<'static> {
        if self.registry.is_busy(model.id) {
            Span::styled("…", self.theme.busy_style())
        } else if self.registry.editing_id() == Some(model.id) {
            Span::styled("✎", self.theme.accent_style())
        } else {
            Span::raw(" ")
        }
    }

    /// Builds a single table row for a model.
    fn build_row(&self, model: &ModelDefinition, name_width: usize) -> Row<'a> {
        let name_style = if self.registry.is_busy(model.id) {
            self.theme.busy_style()
        } else {
            self.theme.base_style()
        };

        let cells = vec![
            Cell::from(self.marker(model)),
            Cell::from(Span::styled(model.id.to_string(), self.theme.dimmed_style())),
            Cell::from(Span::styled(
                truncate_to_width(&model.name, name_width),
                name_style,
            )),
            Cell::from(Span::styled(
                format_timestamp(model.created_at),
                self.theme.dimmed_style(),
            )),
        ];

        Row::new(cells).height(1)
    }
}

impl StatefulWidget for &ModelListView<'_> {
    type State = ListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        // Update visible height for page navigation
        let inner_height = area.height.saturating_sub(2); // Account for borders
        state.visible_height = inner_height as usize;

        let border_style = if self.focused {
            self.theme.focused_border_style
        } else {
            self.theme.border_style
        };

        let models = self.registry.models();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(
                format!(" Models ({}) ", models.len()),
                self.theme.header_style,
            ));

        // Borders, highlight symbol, marker, id and date columns
        let fixed = 2 + 2 + 2 + 6 + 16 + 3;
        let name_width = (area.width as usize).saturating_sub(fixed).max(8);
        let rows: Vec<Row<'_>> = models
            .iter()
            .map(|model| self.build_row(model, name_width))
            .collect();

        let widths = [
            Constraint::Length(2),  // Marker
            Constraint::Length(6),  // Id
            Constraint::Min(8),     // Name
            Constraint::Length(16), // Created
        ];

        let table = Table::new(rows, widths)
            .block(block)
            .row_highlight_style(self.theme.highlight_style)
            .highlight_spacing(HighlightSpacing::Always)
            .highlight_symbol("▸ ");

        let mut table_state = TableState::default();
        table_state.select(state.selected);
        *table_state.offset_mut() = state.scroll_offset;

        StatefulWidget::render(table, area, buf, &mut table_state);
        state.scroll_offset = table_state.offset();
    }
}
