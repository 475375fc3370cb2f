//! Help panel component.
//!
//! Displays a modal overlay with key bindings and help information.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Clear, Row, Table, Widget};

use crate::theme::Theme;

/// Key binding definition for the help panel.
struct KeyBinding {
    /// The key(s) to press.
    key: &'static str,
    /// Description of what the key does.
    description: &'static str,
    /// The mode(s) where this binding applies.
    mode: &'static str,
}

/// Static list of key bindings to display.
const KEY_BINDINGS: &[KeyBinding] = &[
    // Navigation
    KeyBinding {
        key: "j / ↓",
        description: "Next row",
        mode: "Normal",
    },
    KeyBinding {
        key: "k / ↑",
        description: "Previous row",
        mode: "Normal",
    },
    KeyBinding {
        key: "g / G",
        description: "First / last row",
        mode: "Normal",
    },
    KeyBinding {
        key: "PgDn / PgUp",
        description: "Page down / up",
        mode: "Normal",
    },
    KeyBinding {
        key: "Tab",
        description: "Switch Models / Imports",
        mode: "Normal",
    },
    KeyBinding {
        key: "r",
        description: "Reload the list",
        mode: "Normal",
    },
    // Models
    KeyBinding {
        key: "n",
        description: "New model form",
        mode: "Models",
    },
    KeyBinding {
        key: "e / Enter",
        description: "Edit selected model",
        mode: "Models",
    },
    KeyBinding {
        key: "d / Del",
        description: "Delete selected model",
        mode: "Models",
    },
    // Imports
    KeyBinding {
        key: "Enter",
        description: "Refresh selected import",
        mode: "Imports",
    },
    KeyBinding {
        key: "J / K",
        description: "Scroll import details",
        mode: "Imports",
    },
    KeyBinding {
        key: "d / Del",
        description: "Delete selected import",
        mode: "Imports",
    },
    // Forms
    KeyBinding {
        key: "Tab",
        description: "Next field",
        mode: "Edit",
    },
    KeyBinding {
        key: "Enter",
        description: "New line / next field",
        mode: "Edit",
    },
    KeyBinding {
        key: "Ctrl+s",
        description: "Save model",
        mode: "Edit",
    },
    KeyBinding {
        key: "Ctrl+f",
        description: "Format schema JSON",
        mode: "Edit",
    },
    KeyBinding {
        key: "Ctrl+t",
        description: "Load invoice template",
        mode: "Edit",
    },
    KeyBinding {
        key: "Esc",
        description: "Leave form (discards edit)",
        mode: "Edit",
    },
    // General
    KeyBinding {
        key: "y / n",
        description: "Confirm / decline delete",
        mode: "Confirm",
    },
    KeyBinding {
        key: "?",
        description: "Toggle help panel",
        mode: "Normal",
    },
    KeyBinding {
        key: "q / Ctrl+c",
        description: "Quit",
        mode: "Any",
    },
];

/// A help panel overlay widget.
///
/// Displays key bindings in a table format as a modal overlay.
pub struct HelpPanel<'a> {
    /// Theme for styling.
    theme: &'a Theme,
}

impl<'a> HelpPanel<'a> {
    /// Creates a new help panel.
    #[must_use]
    pub const fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    /// Builds the table rows from key bindings.
    fn build_rows(&self) -> Vec<Row<'static>> {
        KEY_BINDINGS
            .iter()
            .map(|binding| {
                Row::new(vec![
                    Cell::from(Span::styled(
                        binding.key,
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Cell::from(Span::styled(
                        binding.description,
                        self.theme.base_style(),
                    )),
                    Cell::from(Span::styled(
                        binding.mode,
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect()
    }
}

impl Widget for &HelpPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Clear the area first for overlay effect
        Clear.render(area, buf);

        // Block with title
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style)
            .title(Span::styled(
                " Help - Key Bindings ",
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(Color::Rgb(25, 25, 35)));

        // Column headers
        let header = Row::new(vec![
            Cell::from(Span::styled(
                "Key",
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )),
            Cell::from(Span::styled(
                "Action",
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )),
            Cell::from(Span::styled(
                "Mode",
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )),
        ])
        .height(1)
        .bottom_margin(1);

        // Table rows
        let rows = self.build_rows();

        // Column widths
        let widths = [
            Constraint::Length(15),
            Constraint::Min(25),
            Constraint::Length(12),
        ];

        // Build table
        let table = Table::new(rows, widths)
            .block(block)
            .header(header)
            .row_highlight_style(Style::default());

        table.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_panel_new() {
        let theme = Theme::dark();
        let _panel = HelpPanel::new(&theme);
    }

    #[test]
    fn test_key_bindings_not_empty() {
        assert!(!KEY_BINDINGS.is_empty());
    }

    #[test]
    fn test_every_form_shortcut_is_listed() {
        for key in ["Ctrl+s", "Ctrl+f", "Ctrl+t", "Esc"] {
            assert!(
                KEY_BINDINGS.iter().any(|b| b.key == key && b.mode == "Edit"),
                "missing {key}"
            );
        }
    }

    #[test]
    fn test_key_binding_table() {
        let table = KEY_BINDINGS
            .iter()
            .map(|b| format!("{:<8} {:<12} {}", b.mode, b.key, b.description))
            .collect::<Vec<_>>()
            .join("\n");
        insta::assert_snapshot!(table, @r"
        Normal   j / ↓        Next row
        Normal   k / ↑        Previous row
        Normal   g / G        First / last row
        Normal   PgDn / PgUp  Page down / up
        Normal   Tab          Switch Models / Imports
        Normal   r            Reload the list
        Models   n            New model form
        Models   e / Enter    Edit selected model
        Models   d / Del      Delete selected model
        Imports  Enter        Refresh selected import
        Imports  J / K        Scroll import details
        Imports  d / Del      Delete selected import
        Edit     Tab          Next field
        Edit     Enter        New line / next field
        Edit     Ctrl+s       Save model
        Edit     Ctrl+f       Format schema JSON
        Edit     Ctrl+t       Load invoice template
        Edit     Esc          Leave form (discards edit)
        Confirm  y / n        Confirm / decline delete
        Normal   ?            Toggle help panel
        Any      q / Ctrl+c   Quit
        ");
    }
}
