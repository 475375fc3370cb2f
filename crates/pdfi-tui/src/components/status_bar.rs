//! Status bar component.
//!
//! Displays the mode badge, the current message, in-flight indicators, and
//! item counts.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::app::{App, View};
use crate::theme::Theme;

/// The status bar component.
///
/// The controller's success or error message wins over the UI-local notice.
pub struct StatusBar<'a> {
    /// The application state.
    app: &'a App,
    /// Theme for styling.
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    /// Creates a new status bar.
    #[must_use]
    pub const fn new(app: &'a App, theme: &'a Theme) -> Self {
        Self { app, theme }
    }

    /// Builds the status line spans.
    fn build_line(&self) -> Line<'a> {
        let mut spans = Vec::new();
        let registry = self.app.registry();

        spans.push(Span::styled(
            format!(" {} ", self.app.mode.label()),
            Style::default()
                .fg(Color::Black)
                .bg(self.theme.accent)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));

        if let Some(status) = registry.status() {
            let style = if status.is_error() {
                self.theme.error_style()
            } else {
                self.theme.success_style()
            };
            spans.push(Span::styled(status.text().to_owned(), style));
            spans.push(Span::raw(" │ "));
        } else if let Some(ref notice) = self.app.notice {
            let style = if notice.is_error {
                self.theme.error_style()
            } else {
                self.theme.base_style()
            };
            spans.push(Span::styled(notice.text.clone(), style));
            spans.push(Span::raw(" │ "));
        }

        // In-flight requests
        if registry.is_saving() {
            spans.push(Span::styled("saving… ", self.theme.busy_style()));
        }
        if registry.any_busy() {
            spans.push(Span::styled("working… ", self.theme.busy_style()));
        }
        if self.app.imports_loading() {
            spans.push(Span::styled("loading imports… ", self.theme.busy_style()));
        }

        let count = match self.app.view {
            View::Models => format!("{} models", registry.models().len()),
            View::Imports => format!("{} imports", self.app.imports().len()),
        };
        spans.push(Span::styled(count, self.theme.dimmed_style()));

        Line::from(spans)
    }
}

impl Widget for &StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = self.build_line();
        let paragraph = Paragraph::new(line).style(self.theme.status_bar_style);
        paragraph.render(area, buf);
    }
}
