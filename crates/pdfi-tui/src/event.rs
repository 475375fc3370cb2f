//! Event types for the TUI event loop.
//!
//! This module provides the [`Event`] enum representing all events
//! that can be processed by the TUI application.
//!
//! # Event Sources
//!
//! Events originate from multiple sources:
//!
//! - **Terminal**: Key presses, mouse events, window resizing
//! - **Registry tasks**: Completion of spawned operations, via `Reporter`
//! - **Confirmation prompt**: Delete questions waiting for an answer
//! - **Timer**: Periodic tick events for animations and updates
//!
//! # Example
//!
//! ```ignore
//! use pdfi_tui::Event;
//!
//! loop {
//!     match tui.next_event().await {
//!         Some(Event::Key(key)) => handle_key(key),
//!         Some(Event::OperationFinished { op, outcome }) => refresh(op, outcome),
//!         Some(Event::Tick) => update_animations(),
//!         _ => {}
//!     }
//! }
//! ```

use std::fmt;

use crossterm::event::{KeyEvent, MouseEvent};
use pdfi_controller::Outcome;
use pdfi_core::{ImportId, ImportRecord, ModelId};
use pdfi_registry::RegistryError;
use tokio::sync::oneshot;

/// A registry operation run on a spawned task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Full list refresh.
    Load,
    /// Create from the "new model" form.
    Create,
    /// Save of the edit form for a row.
    Save(ModelId),
    /// Confirmed delete of a row.
    Delete(ModelId),
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load => f.write_str("load"),
            Self::Create => f.write_str("create"),
            Self::Save(id) => write!(f, "save {id}"),
            Self::Delete(id) => write!(f, "delete {id}"),
        }
    }
}

/// Events that can be processed by the TUI.
///
/// This enum unifies all event sources into a single type that can be
/// processed by the application's main event loop.
#[derive(Debug)]
#[non_exhaustive]
pub enum Event {
    /// A key press event from the terminal.
    Key(KeyEvent),

    /// A mouse event from the terminal.
    Mouse(MouseEvent),

    /// Terminal window was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// Text pasted into the terminal (bracketed paste).
    Paste(String),

    /// A spawned controller operation settled.
    OperationFinished {
        /// What was run.
        op: Operation,
        /// How it ended.
        outcome: Outcome,
    },

    /// The import list was fetched.
    ImportsLoaded(Result<Vec<ImportRecord>, RegistryError>),

    /// A single import was re-fetched.
    ImportLoaded(Result<ImportRecord, RegistryError>),

    /// A confirmed import delete finished.
    ImportDeleted {
        /// The import that was asked to go.
        id: ImportId,
        /// `Ok` once the registry dropped it.
        result: Result<(), RegistryError>,
    },

    /// A delete is waiting for the user to confirm.
    ///
    /// Dropping `reply` without sending counts as "no".
    ConfirmRequested {
        /// The yes/no question to show.
        question: String,
        /// Where the answer goes.
        reply: oneshot::Sender<bool>,
    },

    /// Periodic tick for animations and updates.
    ///
    /// The tick rate is configured via `TuiConfig::tick_rate_ms`.
    Tick,

    /// Signal to render a new frame.
    ///
    /// This is separate from Tick to allow different rates for
    /// UI updates vs animations.
    Render,

    /// Focus gained by the terminal window.
    FocusGained,

    /// Focus lost by the terminal window.
    FocusLost,
}

impl Event {
    /// Returns `true` if this is a key event.
    #[inline]
    #[must_use]
    pub const fn is_key(&self) -> bool {
        matches!(self, Self::Key(_))
    }

    /// Returns `true` if this reports a settled controller operation.
    #[inline]
    #[must_use]
    pub const fn is_operation_finished(&self) -> bool {
        matches!(self, Self::OperationFinished { .. })
    }

    /// Returns `true` if this is a tick event.
    #[inline]
    #[must_use]
    pub const fn is_tick(&self) -> bool {
        matches!(self, Self::Tick)
    }

    /// Returns `true` if this is a render event.
    #[inline]
    #[must_use]
    pub const fn is_render(&self) -> bool {
        matches!(self, Self::Render)
    }

    /// Returns the key event if this is a Key variant.
    #[inline]
    #[must_use]
    pub const fn as_key(&self) -> Option<&KeyEvent> {
        match self {
            Self::Key(key) => Some(key),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_event_is_key() {
        let key_event = Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE));
        assert!(key_event.is_key());

        let tick_event = Event::Tick;
        assert!(!tick_event.is_key());
    }

    #[test]
    fn test_event_is_operation_finished() {
        let event = Event::OperationFinished {
            op: Operation::Create,
            outcome: Outcome::Succeeded,
        };
        assert!(event.is_operation_finished());
        assert!(!Event::Render.is_operation_finished());
    }

    #[test]
    fn test_event_is_tick() {
        let tick = Event::Tick;
        assert!(tick.is_tick());

        let render = Event::Render;
        assert!(!render.is_tick());
        assert!(render.is_render());
    }

    #[test]
    fn test_event_as_key() {
        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        let event = Event::Key(key);
        assert_eq!(event.as_key().map(|k| k.code), Some(KeyCode::Enter));

        let tick = Event::Tick;
        assert!(tick.as_key().is_none());
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Load.to_string(), "load");
        assert_eq!(Operation::Save(ModelId::new(3)).to_string(), "save #3");
        assert_eq!(Operation::Delete(ModelId::new(7)).to_string(), "delete #7");
    }

    #[tokio::test]
    async fn test_confirm_reply_dropped_reads_as_closed() {
        let (reply, rx) = oneshot::channel();
        let event = Event::ConfirmRequested {
            question: "Delete model #1 (Invoice)?".to_owned(),
            reply,
        };
        drop(event);
        assert!(rx.await.is_err());
    }

    #[test]
    fn test_resize_event() {
        let event = Event::Resize {
            width: 120,
            height: 40,
        };
        assert!(matches!(
            event,
            Event::Resize {
                width: 120,
                height: 40
            }
        ));
    }
}
