//! Terminal session and the channel feeding the application loop.
//!
//! [`Tui`] owns the crossterm terminal and a single event channel. While the
//! session is entered, a pump task forwards terminal input plus tick and
//! render beats into it. Registry tasks never see the raw channel: they hold
//! a [`Reporter`], which can only post their results and yes/no questions.
//!
//! ```text
//!  crossterm EventStream ─┐
//!  tick / render beats ───┼──► mpsc::Sender<Event> ──► Tui::next_event ──► App
//!  Reporter (per task) ───┘
//!    operation_finished · imports_loaded · import_loaded
//!    import_deleted · ask ◄── oneshot answer from the dialog
//! ```

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event as TermEvent, EventStream, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures_util::StreamExt;
use pdfi_controller::Outcome;
use pdfi_core::{ImportId, ImportRecord, TuiConfig};
use pdfi_registry::RegistryError;
use ratatui::Terminal;
use ratatui::prelude::{CrosstermBackend, Frame};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace, warn};

use crate::error::TuiError;
use crate::event::{Event, Operation};

/// Events buffered between producers and the loop.
const EVENT_CHANNEL_CAPACITY: usize = 100;

/// How often the pump asks for a state tick and for a redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Interval between [`Event::Tick`]s.
    pub tick: Duration,
    /// Interval between [`Event::Render`]s.
    pub frame: Duration,
}

impl Pacing {
    /// Derives the intervals from `tick_rate_ms` and `frame_rate`.
    ///
    /// # Errors
    ///
    /// Returns a config error if either value is zero.
    pub fn from_config(config: &TuiConfig) -> Result<Self, TuiError> {
        if config.tick_rate_ms == 0 {
            return Err(TuiError::config("tui.tick_rate_ms must be greater than zero"));
        }
        if config.frame_rate == 0 {
            return Err(TuiError::config("tui.frame_rate must be greater than zero"));
        }
        Ok(Self {
            tick: Duration::from_millis(config.tick_rate_ms),
            frame: Duration::from_secs(1) / config.frame_rate,
        })
    }
}

/// Handle spawned tasks use to report back to the application loop.
///
/// Every method returns once the event is queued. If the loop has already
/// shut down the report is dropped with a debug log, and [`ask`](Self::ask)
/// answers "no".
#[derive(Debug, Clone)]
pub struct Reporter {
    tx: mpsc::Sender<Event>,
}

impl Reporter {
    /// Wraps the sending half of the loop's event channel.
    #[must_use]
    pub const fn new(tx: mpsc::Sender<Event>) -> Self {
        Self { tx }
    }

    /// A controller operation settled.
    pub async fn operation_finished(&self, op: Operation, outcome: Outcome) {
        self.post(Event::OperationFinished { op, outcome }, "operation result")
            .await;
    }

    /// The import list fetch finished.
    pub async fn imports_loaded(&self, result: Result<Vec<ImportRecord>, RegistryError>) {
        self.post(Event::ImportsLoaded(result), "import list").await;
    }

    /// A single import was re-fetched.
    pub async fn import_loaded(&self, result: Result<ImportRecord, RegistryError>) {
        self.post(Event::ImportLoaded(result), "import").await;
    }

    /// A confirmed import delete finished.
    pub async fn import_deleted(&self, id: ImportId, result: Result<(), RegistryError>) {
        self.post(Event::ImportDeleted { id, result }, "import delete")
            .await;
    }

    /// Shows `question` in the confirmation dialog and waits for y/n.
    ///
    /// A dialog dismissed without an answer counts as "no".
    pub async fn ask(&self, question: &str) -> bool {
        let (reply, answer) = oneshot::channel();
        let request = Event::ConfirmRequested {
            question: question.to_owned(),
            reply,
        };
        if !self.post(request, "confirmation").await {
            warn!("Event loop closed, treating confirmation as declined");
            return false;
        }
        answer.await.unwrap_or(false)
    }

    async fn post(&self, event: Event, what: &'static str) -> bool {
        if self.tx.send(event).await.is_err() {
            debug!(what, "Event loop gone, report dropped");
            return false;
        }
        true
    }
}

/// A running pump task and the token that stops it.
struct Pump {
    task: JoinHandle<()>,
    stop: CancellationToken,
}

/// The terminal plus the loop's event channel.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    rx: mpsc::Receiver<Event>,
    tx: mpsc::Sender<Event>,
    pacing: Pacing,
    pump: Option<Pump>,
    entered: bool,
}

impl Tui {
    /// Opens the terminal backend without touching terminal modes yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be created.
    pub fn new(pacing: Pacing) -> Result<Self, TuiError> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        debug!(?pacing, "Created TUI");

        Ok(Self {
            terminal,
            rx,
            tx,
            pacing,
            pump: None,
            entered: false,
        })
    }

    /// A new [`Reporter`] posting into this loop.
    #[must_use]
    pub fn reporter(&self) -> Reporter {
        Reporter::new(self.tx.clone())
    }

    /// Switches to raw mode and the alternate screen and starts the pump.
    ///
    /// Calling it again while entered does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if a terminal mode cannot be changed.
    pub fn enter(&mut self) -> Result<(), TuiError> {
        if self.entered {
            return Ok(());
        }

        enable_raw_mode()?;
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;
        self.entered = true;
        self.terminal.hide_cursor()?;
        self.terminal.clear()?;

        self.pump = Some(spawn_pump(self.tx.clone(), self.pacing));
        debug!("Terminal entered");
        Ok(())
    }

    /// Stops the pump and restores the terminal.
    ///
    /// Safe to call more than once; only the first call after
    /// [`enter`](Self::enter) touches the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if a terminal mode cannot be restored.
    pub fn exit(&mut self) -> Result<(), TuiError> {
        if let Some(pump) = self.pump.take() {
            pump.stop.cancel();
            pump.task.abort();
        }
        if !self.entered {
            return Ok(());
        }
        self.entered = false;

        self.terminal.show_cursor()?;
        execute!(
            io::stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        disable_raw_mode()?;
        debug!("Terminal restored");
        Ok(())
    }

    /// Draws one frame.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<(), TuiError> {
        self.terminal.draw(render)?;
        Ok(())
    }

    /// Waits for the next event. `None` once every sender is gone.
    pub async fn next_event(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = self.exit() {
            error!(error = %e, "Failed to restore terminal on drop");
        }
    }
}

fn spawn_pump(tx: mpsc::Sender<Event>, pacing: Pacing) -> Pump {
    let stop = CancellationToken::new();
    let task = tokio::spawn(pump(tx, pacing, stop.clone()));
    Pump { task, stop }
}

/// Forwards terminal input and beats until stopped or the loop goes away.
async fn pump(tx: mpsc::Sender<Event>, pacing: Pacing, stop: CancellationToken) {
    let mut input = EventStream::new();
    let mut ticks = interval(pacing.tick);
    let mut frames = interval(pacing.frame);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let event = tokio::select! {
            () = stop.cancelled() => break,
            _ = ticks.tick() => Some(Event::Tick),
            _ = frames.tick() => Some(Event::Render),
            next = input.next() => match next {
                Some(Ok(raw)) => translate(&raw),
                Some(Err(e)) => {
                    warn!(error = %e, "Error reading terminal event");
                    None
                }
                None => {
                    debug!("Terminal input closed");
                    break;
                }
            },
        };

        let Some(event) = event else { continue };
        trace!(?event, "Pumping event");
        if tx.send(event).await.is_err() {
            break;
        }
    }
    debug!("Event pump stopped");
}

/// Maps terminal input onto loop events. Key releases and repeats are dropped.
fn translate(raw: &TermEvent) -> Option<Event> {
    match raw {
        TermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(*key)),
        TermEvent::Key(_) => None,
        TermEvent::Mouse(mouse) => Some(Event::Mouse(*mouse)),
        TermEvent::Resize(width, height) => Some(Event::Resize {
            width: *width,
            height: *height,
        }),
        TermEvent::Paste(text) => Some(Event::Paste(text.clone())),
        TermEvent::FocusGained => Some(Event::FocusGained),
        TermEvent::FocusLost => Some(Event::FocusLost),
    }
}
