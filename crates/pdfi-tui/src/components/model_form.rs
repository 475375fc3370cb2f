//! Model form component.
//!
//! Shows the edit form when a row is under edit, otherwise the "new model"
//! form. Both have a single-line name field and a multi-line schema field.

use pdfi_controller::{DraftField, RegistryState};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::theme::Theme;

/// The form panel of the models view.
pub struct ModelForm<'a> {
    registry: &'a RegistryState,
    focus: Option<DraftField>,
    theme: &'a Theme,
}

/// What the panel is currently showing.
struct FormView<'a> {
    title: String,
    name: &'a str,
    schema_text: &'a str,
    name_field: DraftField,
    schema_field: DraftField,
    in_flight: bool,
    hint: &'static str,
}

impl<'a> ModelForm<'a> {
    /// Creates a new form panel.
    ///
    /// `focus` is the field receiving keystrokes, if any.
    #[must_use]
    pub const fn new(
        registry: &'a RegistryState,
        focus: Option<DraftField>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            registry,
            focus,
            theme,
        }
    }

    fn view(&self) -> FormView<'a> {
        if let Some(edit) = self.registry.edit() {
            FormView {
                title: format!(" Edit model {} ", edit.id),
                name: &edit.name,
                schema_text: &edit.schema_text,
                name_field: DraftField::EditName,
                schema_field: DraftField::EditSchema,
                in_flight: self.registry.is_busy(edit.id),
                hint: "Ctrl+s save · Ctrl+f format · Esc discard",
            }
        } else {
            let draft = self.registry.draft();
            FormView {
                title: " New model ".to_owned(),
                name: &draft.name,
                schema_text: &draft.schema_text,
                name_field: DraftField::NewName,
                schema_field: DraftField::NewSchema,
                in_flight: self.registry.is_saving(),
                hint: "n focus · Ctrl+s create · Ctrl+t template · Ctrl+f format · Esc leave",
            }
        }
    }

    fn field_block(&self, label: &'static str, focused: bool) -> Block<'static> {
        let (border, label_style) = if focused {
            (
                self.theme.focused_border_style,
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (self.theme.border_style, Style::default().fg(Color::DarkGray))
        };

        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Span::styled(label, label_style))
    }

    fn cursor(&self) -> Span<'static> {
        Span::styled("▌", Style::default().fg(self.theme.accent))
    }

    fn schema_lines(&self, text: &'a str, focused: bool) -> Vec<Line<'a>> {
        let mut lines: Vec<Line<'a>> = text
            .split('\n')
            .map(|l| Line::from(Span::styled(l, self.theme.base_style())))
            .collect();
        if focused {
            if let Some(last) = lines.last_mut() {
                last.push_span(self.cursor());
            }
        }
        lines
    }
}

impl Widget for &ModelForm<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let view = self.view();

        let mut title = vec![Span::styled(view.title.clone(), self.theme.header_style)];
        if view.in_flight {
            title.push(Span::styled("saving… ", self.theme.busy_style()));
        }
        let outer = Block::default()
            .borders(Borders::ALL)
            .border_style(if self.focus.is_some() {
                self.theme.focused_border_style
            } else {
                self.theme.border_style
            })
            .title(Line::from(title));
        let inner = outer.inner(area);
        outer.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Name
                Constraint::Min(3),    // Schema
                Constraint::Length(1), // Hint
            ])
            .split(inner);

        // Name
        let name_focused = self.focus == Some(view.name_field);
        let mut name_line = vec![Span::styled(view.name, self.theme.base_style())];
        if name_focused {
            name_line.push(self.cursor());
        }
        Paragraph::new(Line::from(name_line))
            .block(self.field_block(" Name ", name_focused))
            .render(chunks[0], buf);

        // Schema, scrolled so the cursor line stays visible while typing
        let schema_focused = self.focus == Some(view.schema_field);
        let lines = self.schema_lines(view.schema_text, schema_focused);
        let visible = chunks[1].height.saturating_sub(2) as usize;
        let offset = if schema_focused {
            lines.len().saturating_sub(visible)
        } else {
            0
        };
        // Bounded by the schema text a user can type into a terminal form
        #[allow(clippy::cast_possible_truncation)]
        let offset = offset.min(u16::MAX as usize) as u16;
        Paragraph::new(Text::from(lines))
            .block(self.field_block(" Schema (JSON) ", schema_focused))
            .scroll((offset, 0))
            .render(chunks[1], buf);

        // Hint
        Paragraph::new(Line::from(Span::styled(view.hint, self.theme.dimmed_style())))
            .render(chunks[2], buf);
    }
}
