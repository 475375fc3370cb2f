//! Header bar component.
//!
//! Displays the application title, the view tabs, and a help hint.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::app::View;
use crate::theme::Theme;

/// The header bar component.
///
/// Displays:
/// - Application title and tagline
/// - View tabs with the active one highlighted
/// - Help indicator
pub struct HeaderBar<'a> {
    /// The view currently shown.
    view: View,
    /// Theme for styling.
    theme: &'a Theme,
}

impl<'a> HeaderBar<'a> {
    /// Creates a new header bar.
    #[must_use]
    pub const fn new(view: View, theme: &'a Theme) -> Self {
        Self { view, theme }
    }

    fn tab(&self, view: View) -> Span<'static> {
        if view == self.view {
            Span::styled(
                format!(" {} ", view.title()),
                self.theme.highlight_style,
            )
        } else {
            Span::styled(format!(" {} ", view.title()), self.theme.dimmed_style())
        }
    }
}

impl Widget for &HeaderBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let help_style = Style::default().fg(Color::Yellow);

        let line = Line::from(vec![
            Span::styled("pdf-importer", self.theme.header_style),
            Span::raw(" "),
            Span::styled(
                "OCR + AI extraction to JSON Schema",
                self.theme.dimmed_style().add_modifier(Modifier::ITALIC),
            ),
            Span::raw(" │ "),
            self.tab(View::Models),
            Span::raw(" "),
            self.tab(View::Imports),
            Span::raw(" │ "),
            Span::styled("Tab to switch, ? for help", help_style),
        ]);

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(self.theme.border_style);

        let paragraph = Paragraph::new(line).block(block);
        paragraph.render(area, buf);
    }
}
