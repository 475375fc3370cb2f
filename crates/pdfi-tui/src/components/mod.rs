//! UI components for the TUI.
//!
//! This module contains all the widget implementations for rendering
//! different parts of the interface.
//!
//! # Component Types
//!
//! - **Widgets** (`Widget` trait): Stateless rendering - `HeaderBar`, `ModelForm`, `StatusBar`
//! - **Stateful Widgets** (`StatefulWidget` trait): Selection/scroll state - `ModelListView`,
//!   `ImportListView`, `ImportDetail`
//! - **Overlays**: Modal overlays - `HelpPanel`, `ConfirmDialog`
//!
//! # Usage
//!
//! ```ignore
//! use pdfi_tui::components::{ModelListView, HeaderBar};
//! ```

mod confirm_dialog;
mod header;
mod help;
mod import_detail;
mod import_list;
mod model_form;
mod model_list;
mod status_bar;

pub use confirm_dialog::ConfirmDialog;
pub use header::HeaderBar;
pub use help::HelpPanel;
pub use import_detail::ImportDetail;
pub use import_list::ImportListView;
pub use model_form::ModelForm;
pub use model_list::ModelListView;
pub use status_bar::StatusBar;

use time::OffsetDateTime;
use time::macros::format_description;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Formats a timestamp as `YYYY-MM-DD HH:MM` (UTC offset as stored).
pub(crate) fn format_timestamp(at: OffsetDateTime) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]");
    at.format(&format).unwrap_or_else(|_| at.to_string())
}

/// Cuts `text` to at most `max_width` terminal columns, marking the cut with `…`.
pub(crate) fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_owned();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1; // room for the ellipsis
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp(datetime!(2024-03-05 09:07:30 UTC)),
            "2024-03-05 09:07"
        );
    }

    #[test]
    fn test_truncate_short() {
        assert_eq!(truncate_to_width("Invoice", 20), "Invoice");
    }

    #[test]
    fn test_truncate_long() {
        let cut = truncate_to_width("Delivery Note With A Very Long Name", 12);
        assert_eq!(cut, "Delivery No…");
        assert_eq!(cut.width(), 12);
    }

    #[test]
    fn test_truncate_wide_chars() {
        // Each CJK glyph takes two columns.
        let cut = truncate_to_width("請求書請求書", 5);
        assert_eq!(cut, "請求…");
        assert!(cut.width() <= 5);
    }

    #[test]
    fn test_truncate_exact() {
        assert_eq!(truncate_to_width("exactly_twenty_chars", 20), "exactly_twenty_chars");
    }
}
