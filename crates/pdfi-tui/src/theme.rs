//! Theme and styling for the TUI.
//!
//! This module provides the [`Theme`] struct for managing colors and styles
//! throughout the terminal interface. It supports both dark and light color
//! schemes.
//!
//! # Example
//!
//! ```
//! use pdfi_tui::Theme;
//! use pdfi_core::ImportStatus;
//!
//! let theme = Theme::dark();
//! let style = theme.status_style(ImportStatus::Failed);
//! assert_eq!(style.fg, Some(theme.failed_fg));
//! ```

use pdfi_core::{ColorScheme, ImportStatus};
use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI.
///
/// Contains all colors and styles used throughout the interface.
/// Use [`Theme::dark()`] or [`Theme::light()`] to get predefined themes,
/// or [`Theme::from_scheme()`] to create a theme based on configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // =========================================================================
    // Status Colors
    // =========================================================================
    /// Foreground color for imports still being processed.
    pub processing_fg: Color,

    /// Foreground color for finished imports.
    pub done_fg: Color,

    /// Foreground color for failed imports.
    pub failed_fg: Color,

    /// Foreground color for statuses this build does not know.
    pub unknown_fg: Color,

    /// Foreground color for success messages.
    pub success_fg: Color,

    /// Foreground color for rows with a request in flight.
    pub busy_fg: Color,

    // =========================================================================
    // Selection Colors
    // =========================================================================
    /// Background color for selected items.
    pub selected_bg: Color,

    /// Foreground color for selected items.
    pub selected_fg: Color,

    // =========================================================================
    // Base Colors
    // =========================================================================
    /// Primary foreground color.
    pub fg: Color,

    /// Primary background color.
    pub bg: Color,

    /// Dimmed/secondary text color.
    pub dimmed_fg: Color,

    /// Accent color for highlights.
    pub accent: Color,

    /// Error/warning color.
    pub error_fg: Color,

    // =========================================================================
    // Border Styles
    // =========================================================================
    /// Style for normal borders.
    pub border_style: Style,

    /// Style for focused borders.
    pub focused_border_style: Style,

    // =========================================================================
    // Component Styles
    // =========================================================================
    /// Style for highlighted/selected items.
    pub highlight_style: Style,

    /// Style for the header bar.
    pub header_style: Style,

    /// Style for the status bar.
    pub status_bar_style: Style,
}

impl Theme {
    /// Creates a dark theme (light text on dark background).
    ///
    /// This is the default theme, optimized for dark terminal backgrounds.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            // Status colors
            processing_fg: Color::Rgb(252, 211, 77), // Amber
            done_fg: Color::Rgb(110, 231, 183),      // Emerald
            failed_fg: Color::Rgb(253, 164, 175),    // Rose
            unknown_fg: Color::Rgb(128, 128, 128),
            success_fg: Color::Rgb(110, 231, 183),
            busy_fg: Color::Rgb(252, 211, 77),

            // Selection colors
            selected_bg: Color::Rgb(60, 60, 80),
            selected_fg: Color::White,

            // Base colors
            fg: Color::Rgb(220, 220, 220),
            bg: Color::Reset,
            dimmed_fg: Color::Rgb(128, 128, 128),
            accent: Color::Rgb(100, 150, 255), // Soft blue
            error_fg: Color::Rgb(255, 80, 80),

            // Border styles
            border_style: Style::default().fg(Color::Rgb(80, 80, 100)),
            focused_border_style: Style::default().fg(Color::Rgb(100, 150, 255)),

            // Component styles
            highlight_style: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(60, 60, 80))
                .add_modifier(Modifier::BOLD),
            header_style: Style::default()
                .fg(Color::Rgb(100, 150, 255))
                .add_modifier(Modifier::BOLD),
            status_bar_style: Style::default()
                .fg(Color::Rgb(180, 180, 180))
                .bg(Color::Rgb(40, 40, 50)),
        }
    }

    /// Creates a light theme (dark text on light background).
    ///
    /// Optimized for light terminal backgrounds.
    #[must_use]
    pub fn light() -> Self {
        Self {
            // Status colors
            processing_fg: Color::Rgb(120, 53, 15), // Dark amber
            done_fg: Color::Rgb(6, 95, 70),         // Dark emerald
            failed_fg: Color::Rgb(159, 18, 57),     // Dark rose
            unknown_fg: Color::Rgb(100, 100, 100),
            success_fg: Color::Rgb(6, 95, 70),
            busy_fg: Color::Rgb(120, 53, 15),

            // Selection colors
            selected_bg: Color::Rgb(200, 200, 220),
            selected_fg: Color::Black,

            // Base colors
            fg: Color::Rgb(30, 30, 30),
            bg: Color::Reset,
            dimmed_fg: Color::Rgb(100, 100, 100),
            accent: Color::Rgb(50, 100, 200), // Dark blue
            error_fg: Color::Rgb(180, 50, 50),

            // Border styles
            border_style: Style::default().fg(Color::Rgb(150, 150, 170)),
            focused_border_style: Style::default().fg(Color::Rgb(50, 100, 200)),

            // Component styles
            highlight_style: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(200, 200, 220))
                .add_modifier(Modifier::BOLD),
            header_style: Style::default()
                .fg(Color::Rgb(50, 100, 200))
                .add_modifier(Modifier::BOLD),
            status_bar_style: Style::default()
                .fg(Color::Rgb(60, 60, 60))
                .bg(Color::Rgb(220, 220, 230)),
        }
    }

    /// Creates a theme from a [`ColorScheme`] configuration.
    ///
    /// If the scheme is [`ColorScheme::Auto`], defaults to dark theme.
    #[must_use]
    pub fn from_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Self::light(),
            ColorScheme::Dark | ColorScheme::Auto | _ => Self::dark(),
        }
    }

    /// Returns the badge style for an import status.
    #[must_use]
    pub fn status_style(&self, status: ImportStatus) -> Style {
        let color = self.status_color(status);
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    /// Returns the color for an import status.
    #[must_use]
    pub const fn status_color(&self, status: ImportStatus) -> Color {
        match status {
            ImportStatus::Processing => self.processing_fg,
            ImportStatus::Done => self.done_fg,
            ImportStatus::Failed => self.failed_fg,
            _ => self.unknown_fg,
        }
    }

    /// Returns the fixed-width badge text for an import status.
    #[must_use]
    pub const fn status_indicator(status: ImportStatus) -> &'static str {
        match status {
            ImportStatus::Processing => "[processing]",
            ImportStatus::Done => "[done]",
            ImportStatus::Failed => "[failed]",
            _ => "[?]",
        }
    }

    /// Returns a style for success messages.
    #[must_use]
    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success_fg)
    }

    /// Returns a style for rows with a request in flight.
    #[must_use]
    pub fn busy_style(&self) -> Style {
        Style::default()
            .fg(self.busy_fg)
            .add_modifier(Modifier::ITALIC)
    }

    /// Returns a style with the base foreground color.
    #[must_use]
    pub fn base_style(&self) -> Style {
        Style::default().fg(self.fg)
    }

    /// Returns a style for dimmed/secondary text.
    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed_fg)
    }

    /// Returns a style for accent/highlighted text.
    #[must_use]
    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Returns a style for error text.
    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error_fg)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
