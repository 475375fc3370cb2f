//! User actions for the TUI.
//!
//! This module defines the [`Action`] enum representing all user-initiated
//! actions that can be performed in the TUI. Actions are the result of
//! processing input events (key presses) and are used to update
//! application state.
//!
//! # Action Flow
//!
//! ```text
//! Key Event → App::handle_key → Action → App::update → controller call
//! ```

/// User-initiated actions in the TUI.
///
/// Actions represent commands that modify application state. They are
/// produced from key presses according to the current mode and processed
/// by the application's update loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum Action {
    // =========================================================================
    // Navigation
    // =========================================================================
    /// Move selection to the next item.
    NextItem,

    /// Move selection to the previous item.
    PreviousItem,

    /// Move selection to the first item.
    FirstItem,

    /// Move selection to the last item.
    LastItem,

    /// Move selection down by one page.
    PageDown,

    /// Move selection up by one page.
    PageUp,

    /// Scroll the import detail pane down.
    ScrollDetailDown,

    /// Scroll the import detail pane up.
    ScrollDetailUp,

    /// Switch between the models and imports views.
    SwitchView,

    // =========================================================================
    // Models
    // =========================================================================
    /// Re-fetch the current view's list.
    Reload,

    /// Focus the "new model" form.
    NewModel,

    /// Open the edit form for the selected row.
    EditSelected,

    /// Delete the selected row (after confirmation).
    DeleteSelected,

    /// Re-fetch the selected import.
    OpenSelected,

    // =========================================================================
    // Form Editing
    // =========================================================================
    /// Insert a character at the end of the focused field.
    InputChar(char),

    /// Remove the last character of the focused field.
    Backspace,

    /// Insert a line break (schema fields) or move on (name fields).
    Newline,

    /// Focus the other field of the same form.
    NextField,

    /// Create the model, or save the edit.
    Submit,

    /// Replace the create form's schema text with the starter template.
    LoadTemplate,

    /// Pretty-print the focused form's schema text.
    Format,

    /// Leave the form; discards the edit draft.
    CancelForm,

    // =========================================================================
    // Confirmation
    // =========================================================================
    /// Answer the pending confirmation question.
    Answer(bool),

    // =========================================================================
    // UI State
    // =========================================================================
    /// Toggle the help panel.
    ToggleHelp,

    /// Hide the help panel.
    HideHelp,

    // =========================================================================
    // Application Control
    // =========================================================================
    /// Quit the application.
    Quit,

    /// Render the UI.
    Render,

    /// Tick (periodic update).
    Tick,

    /// No operation (used for event handling that doesn't produce an action).
    #[default]
    None,
}

impl Action {
    /// Returns `true` if this action requires a re-render.
    #[must_use]
    pub const fn needs_render(&self) -> bool {
        !matches!(self, Self::None | Self::Tick)
    }

    /// Returns `true` if this is a navigation action.
    #[must_use]
    pub const fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::NextItem
                | Self::PreviousItem
                | Self::FirstItem
                | Self::LastItem
                | Self::PageDown
                | Self::PageUp
        )
    }

    /// Returns `true` if this action edits text in a form.
    #[must_use]
    pub const fn is_text_input(&self) -> bool {
        matches!(self, Self::InputChar(_) | Self::Backspace | Self::Newline)
    }

    /// Returns `true` if this action reaches the registry.
    #[must_use]
    pub const fn hits_registry(&self) -> bool {
        matches!(
            self,
            Self::Reload | Self::Submit | Self::DeleteSelected | Self::OpenSelected
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_needs_render() {
        assert!(Action::NextItem.needs_render());
        assert!(Action::ToggleHelp.needs_render());
        assert!(!Action::None.needs_render());
        assert!(!Action::Tick.needs_render());
    }

    #[test]
    fn test_action_is_navigation() {
        assert!(Action::NextItem.is_navigation());
        assert!(Action::PreviousItem.is_navigation());
        assert!(Action::FirstItem.is_navigation());
        assert!(Action::PageDown.is_navigation());

        assert!(!Action::Quit.is_navigation());
        assert!(!Action::ScrollDetailDown.is_navigation());
    }

    #[test]
    fn test_action_is_text_input() {
        assert!(Action::InputChar('x').is_text_input());
        assert!(Action::Backspace.is_text_input());
        assert!(!Action::Submit.is_text_input());
    }

    #[test]
    fn test_action_hits_registry() {
        assert!(Action::Submit.hits_registry());
        assert!(Action::DeleteSelected.hits_registry());
        assert!(!Action::Format.hits_registry());
        assert!(!Action::EditSelected.hits_registry());
    }

    #[test]
    fn test_action_default() {
        assert_eq!(Action::default(), Action::None);
    }
}
