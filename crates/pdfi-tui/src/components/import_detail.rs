//! Import detail component.
//!
//! Displays the selected import job: which model it used, its status, the
//! error if it failed, the extracted JSON, and the OCR text.

use pdfi_core::ImportRecord;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget,
    Widget, Wrap,
};

use super::format_timestamp;
use crate::app::DetailPaneState;
use crate::theme::Theme;

/// A stateful import detail widget.
///
/// Uses [`StatefulWidget`] to maintain scroll state.
pub struct ImportDetail<'a> {
    /// The selected import (if any).
    record: Option<&'a ImportRecord>,
    /// Name of the model the import used, if it is still listed.
    model_name: Option<&'a str>,
    /// Theme for styling.
    theme: &'a Theme,
}

impl<'a> ImportDetail<'a> {
    /// Creates a new detail pane.
    #[must_use]
    pub const fn new(
        record: Option<&'a ImportRecord>,
        model_name: Option<&'a str>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            record,
            model_name,
            theme,
        }
    }

    /// Renders the "no selection" placeholder.
    fn render_placeholder(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style)
            .title(Span::styled(" Details ", self.theme.header_style));

        let text = Text::from(vec![
            Line::from(""),
            Line::from(Span::styled("No import selected", self.theme.dimmed_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Select an import from the list",
                self.theme.dimmed_style(),
            )),
            Line::from(Span::styled(
                "to view its results.",
                self.theme.dimmed_style(),
            )),
        ]);

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(ratatui::layout::Alignment::Center);

        paragraph.render(area, buf);
    }

    fn field(&self, label: &'static str, value: Span<'a>) -> Line<'a> {
        Line::from(vec![
            Span::styled(label, Style::default().fg(Color::DarkGray)),
            value,
        ])
    }

    fn section(title: &str) -> [Line<'static>; 2] {
        [
            Line::from(""),
            Line::from(Span::styled(
                format!("─── {title} ───"),
                Style::default().fg(Color::DarkGray),
            )),
        ]
    }

    /// Builds the content lines for a record.
    fn build_lines(&self, record: &'a ImportRecord) -> Vec<Line<'a>> {
        let mut lines = Vec::new();

        lines.push(self.field(
            "File: ",
            Span::styled(
                record.filename.as_str(),
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        ));

        let model = match self.model_name {
            Some(name) => format!("{} {name}", record.model_id),
            None => record.model_id.to_string(),
        };
        lines.push(self.field("Model: ", Span::styled(model, self.theme.base_style())));
        lines.push(self.field(
            "Status: ",
            Span::styled(
                record.status.label(),
                self.theme.status_style(record.status),
            ),
        ));
        lines.push(self.field(
            "Created: ",
            Span::styled(format_timestamp(record.created_at), self.theme.base_style()),
        ));
        lines.push(self.field(
            "Updated: ",
            Span::styled(format_timestamp(record.updated_at), self.theme.base_style()),
        ));

        if let Some(ref error) = record.error {
            lines.push(self.field("Error: ", Span::styled(error.as_str(), self.theme.error_style())));
        }

        lines.extend(Self::section("Extracted JSON"));
        match record.extracted_json {
            Some(ref json) => {
                let pretty = serde_json::to_string_pretty(json).unwrap_or_else(|_| json.to_string());
                lines.extend(
                    pretty
                        .lines()
                        .map(|l| Line::from(Span::styled(l.to_owned(), self.theme.base_style()))),
                );
            }
            None => lines.push(Line::from(Span::styled(
                "No extracted data",
                self.theme.dimmed_style(),
            ))),
        }

        lines.extend(Self::section("OCR text"));
        match record.ocr_text.as_deref() {
            Some(text) if !text.trim().is_empty() => {
                lines.extend(
                    text.lines()
                        .map(|l| Line::from(Span::styled(l, self.theme.base_style()))),
                );
            }
            _ => lines.push(Line::from(Span::styled(
                "No OCR text",
                self.theme.dimmed_style(),
            ))),
        }

        lines
    }

    /// Renders the import details.
    fn render_details(
        &self,
        record: &'a ImportRecord,
        area: Rect,
        buf: &mut Buffer,
        state: &mut DetailPaneState,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style)
            .title(Span::styled(
                format!(" Import {} ", record.id),
                self.theme.header_style,
            ));

        let inner = block.inner(area);
        block.render(area, buf);

        let lines = self.build_lines(record);
        let total_lines = lines.len();

        // Clamp scroll offset
        let max_scroll = total_lines.saturating_sub(inner.height as usize);
        if state.scroll_offset > max_scroll {
            state.scroll_offset = max_scroll;
        }

        // Terminal scroll offset is bounded by terminal height, which is always < 65535
        #[allow(clippy::cast_possible_truncation)]
        let scroll_offset = state.scroll_offset as u16;

        let paragraph = Paragraph::new(Text::from(lines))
            .scroll((scroll_offset, 0))
            .wrap(Wrap { trim: false });

        paragraph.render(inner, buf);

        // Render scrollbar if content overflows
        if total_lines > inner.height as usize {
            let scrollbar = Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));

            let mut scrollbar_state = ScrollbarState::new(total_lines)
                .position(state.scroll_offset)
                .viewport_content_length(inner.height as usize);

            scrollbar.render(
                inner.inner(ratatui::layout::Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                buf,
                &mut scrollbar_state,
            );
        }
    }
}

impl StatefulWidget for &ImportDetail<'_> {
    type State = DetailPaneState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        match self.record {
            Some(record) => self.render_details(record, area, buf, state),
            None => self.render_placeholder(area, buf),
        }
    }
}
