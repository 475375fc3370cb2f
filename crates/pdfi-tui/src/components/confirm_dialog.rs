//! Confirmation dialog component.
//!
//! Displays the pending yes/no question as a modal overlay.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};

use crate::theme::Theme;

/// A confirmation overlay widget.
pub struct ConfirmDialog<'a> {
    /// The question being asked.
    question: &'a str,
    /// Theme for styling.
    theme: &'a Theme,
}

impl<'a> ConfirmDialog<'a> {
    /// Creates a new confirmation dialog.
    #[must_use]
    pub const fn new(question: &'a str, theme: &'a Theme) -> Self {
        Self { question, theme }
    }
}

impl Widget for &ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Clear the area first for overlay effect
        Clear.render(area, buf);

        let key_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);

        let content = vec![
            Line::from(""),
            Line::from(Span::styled(self.question, self.theme.base_style())),
            Line::from(""),
            Line::from(vec![
                Span::styled("y", key_style),
                Span::styled(" delete   ", self.theme.dimmed_style()),
                Span::styled("n / Esc", key_style),
                Span::styled(" keep", self.theme.dimmed_style()),
            ]),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.error_fg))
            .title(Span::styled(
                " Confirm ",
                Style::default()
                    .fg(self.theme.error_fg)
                    .add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(Color::Rgb(30, 30, 40)));

        let paragraph = Paragraph::new(content)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        paragraph.render(area, buf);
    }
}
