//! Terminal front end for the pdf-importer model registry, using Ratatui.
//!
//! This crate renders the [`RegistryController`]'s state and turns key
//! presses into controller calls. Registry requests run on spawned tokio
//! tasks and report back through the event channel, so the UI keeps
//! drawing busy markers while a request is in flight.
//!
//! Tasks only ever hold a [`Reporter`]: it posts their results and delete
//! questions into the loop, and nothing else.
//!
//! # Architecture
//!
//! ```text
//! crates/pdfi-tui/src/
//!   lib.rs           # Public API exports and the event loop
//!   app.rs           # Application state, key handling, task spawning
//!   confirm.rs       # ConfirmPrompt for Reporter, PendingConfirm
//!   event.rs         # Event types (Key, OperationFinished, ConfirmRequested, ...)
//!   tui.rs           # Terminal session, Pacing, Reporter
//!   action.rs        # User actions (commands from key bindings)
//!   ui.rs            # Main layout rendering orchestration
//!   theme.rs         # Color scheme and styling constants
//!   error.rs         # TUI-specific error types
//!   components/
//!     model_list.rs    # ModelListView
//!     model_form.rs    # ModelForm (create / edit)
//!     import_list.rs   # ImportListView
//!     import_detail.rs # ImportDetail
//!     header.rs        # HeaderBar
//!     status_bar.rs    # StatusBar
//!     help.rs          # HelpPanel modal overlay
//!     confirm_dialog.rs # ConfirmDialog modal overlay
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use pdfi_core::Config;
//! use pdfi_registry::InMemoryRegistry;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), pdfi_tui::TuiError> {
//!     let config = Config::default();
//!     let registry = Arc::new(InMemoryRegistry::from_config(&config.registry));
//!     pdfi_tui::run(config, registry.clone(), registry).await
//! }
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod action;
pub mod app;
pub mod components;
pub mod confirm;
pub mod error;
pub mod event;
pub mod theme;
pub mod tui;
pub mod ui;

use std::sync::Arc;

use pdfi_controller::RegistryController;
use pdfi_core::Config;
use pdfi_registry::{ImportSource, RegistryClient};
use tracing::info;

// Public re-exports
pub use action::Action;
pub use app::{App, AppMode, DetailPaneState, ListState, Notice, View};
pub use confirm::PendingConfirm;
pub use error::TuiError;
pub use event::{Event, Operation};
pub use theme::Theme;
pub use tui::{Pacing, Reporter, Tui};

/// Runs the TUI against a registry client and an import source.
///
/// This is the main entry point for the pdfi-tui crate. It:
///
/// 1. Initializes the terminal
/// 2. Starts the initial model and import fetches
/// 3. Runs the main event loop
/// 4. Declines any open confirmation and restores the terminal
///
/// # Errors
///
/// Returns an error if the terminal cannot be initialized, drawn to, or
/// restored.
pub async fn run(
    config: Config,
    client: Arc<dyn RegistryClient>,
    imports: Arc<dyn ImportSource>,
) -> Result<(), TuiError> {
    let mut tui = Tui::new(Pacing::from_config(&config.tui)?)?;

    let controller = RegistryController::new(client, &config.registry);
    let mut app = App::new(controller, imports, tui.reporter());

    tui.enter()?;
    app.start();

    let theme = Theme::from_scheme(config.tui.color_scheme);

    info!("Entering main event loop");
    let result = run_event_loop(&mut tui, &mut app, &theme).await;

    app.shutdown();
    tui.exit()?;

    result
}

/// Runs the main event loop.
async fn run_event_loop(tui: &mut Tui, app: &mut App, theme: &Theme) -> Result<(), TuiError> {
    loop {
        tui.draw(|frame| ui::render(app, frame, theme))?;

        let Some(event) = tui.next_event().await else {
            return Err(TuiError::ChannelClosed);
        };

        let action = app.handle_event(event);
        app.update(action);

        if app.should_quit {
            info!("Quit requested");
            break;
        }
    }

    Ok(())
}
