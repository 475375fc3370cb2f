//! Import list component.
//!
//! Displays import jobs with their status badges, newest first.

use pdfi_core::ImportRecord;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::Span;
use ratatui::widgets::{
    Block, Borders, Cell, HighlightSpacing, Row, StatefulWidget, Table, TableState,
};

use super::{format_timestamp, truncate_to_width};
use crate::app::ListState;
use crate::theme::Theme;

/// A stateful import list widget.
pub struct ImportListView<'a> {
    /// The import jobs to display.
    imports: &'a [ImportRecord],
    /// Whether the list is being fetched.
    loading: bool,
    /// Theme for styling.
    theme: &'a Theme,
}

impl<'a> ImportListView<'a> {
    /// Creates a new import list view.
    #[must_use]
    pub const fn new(imports: &'a [ImportRecord], loading: bool, theme: &'a Theme) -> Self {
        Self {
            imports,
            loading,
            theme,
        }
    }

    fn build_row(&self, record: &ImportRecord, name_width: usize) -> Row<'a> {
        let cells = vec![
            Cell::from(Span::styled(
                Theme::status_indicator(record.status),
                self.theme.status_style(record.status),
            )),
            Cell::from(Span::styled(record.id.to_string(), self.theme.dimmed_style())),
            Cell::from(Span::styled(
                truncate_to_width(&record.filename, name_width),
                self.theme.base_style(),
            )),
            Cell::from(Span::styled(
                format_timestamp(record.created_at),
                self.theme.dimmed_style(),
            )),
        ];

        Row::new(cells).height(1)
    }
}

impl StatefulWidget for &ImportListView<'_> {
    type State = ListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let inner_height = area.height.saturating_sub(2);
        state.visible_height = inner_height as usize;

        let title = if self.loading {
            format!(" Imports ({}, loading…) ", self.imports.len())
        } else {
            format!(" Imports ({}) ", self.imports.len())
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style)
            .title(Span::styled(title, self.theme.header_style));

        let fixed = 2 + 2 + 12 + 6 + 16 + 3;
        let name_width = (area.width as usize).saturating_sub(fixed).max(8);
        let rows: Vec<Row<'_>> = self
            .imports
            .iter()
            .map(|record| self.build_row(record, name_width))
            .collect();

        let widths = [
            Constraint::Length(12), // Status badge
            Constraint::Length(6),  // Id
            Constraint::Min(8),     // Filename
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

#[cfg(test)]
mod tests {
    use super::*;
    use pdfi_core::{ImportId, ImportStatus, ModelId};
    use time::macros::datetime;

    fn record(id: i64, status: ImportStatus) -> ImportRecord {
        let mut record = ImportRecord::processing(
            ImportId::new(id),
            ModelId::new(1),
            format!("invoice-{id}.pdf"),
            datetime!(2024-05-01 12:00 UTC),
        );
        record.status = status;
        record
    }

    #[test]
    fn test_rows_show_badges() {
        let imports = vec![record(2, ImportStatus::Failed), record(1, ImportStatus::Done)];
        let theme = Theme::dark();
        let view = ImportListView::new(&imports, false, &theme);

        let area = Rect::new(0, 0, 70, 5);
        let mut buf = Buffer::empty(area);
        let mut state = ListState::new();
        StatefulWidget::render(&view, area, &mut buf, &mut state);

        let line = |y: u16| -> String {
            (0..area.width)
                .map(|x| buf[(x, y)].symbol().to_owned())
                .collect()
        };
        assert!(line(0).contains("Imports (2)"));
        assert!(line(1).contains("[failed]"));
        assert!(line(1).contains("invoice-2.pdf"));
        assert!(line(2).contains("[done]"));
        assert!(line(2).contains("2024-05-01 12:00"));
    }

    #[test]
    fn test_loading_title() {
        let theme = Theme::dark();
        let view = ImportListView::new(&[], true, &theme);

        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        StatefulWidget::render(&view, area, &mut buf, &mut ListState::new());

        let title: String = (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_owned())
            .collect();
        assert!(title.contains("loading"));
    }
}
