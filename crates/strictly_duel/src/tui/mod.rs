//! Terminal UI frontend.
//!
//! Keys are read on a blocking task and forwarded over a channel, so the
//! session can wait on the network and on the keyboard at the same time.

mod app;
mod input;
mod ui;

pub use app::{App, Screen};

use crate::error::DuelError;
use crate::frontend::{Frontend, SessionEvent};
use crate::username::UsernameError;
use async_trait::async_trait;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Duration;
use strictly_board::{Board, Move};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

const KEY_POLL: Duration = Duration::from_millis(100);

/// Restores the terminal on drop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        info!("Restoring terminal");
        if let Err(e) = disable_raw_mode() {
            warn!(error = %e, "Failed to disable raw mode");
        }
        if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen) {
            warn!(error = %e, "Failed to leave alternate screen");
        }
    }
}

/// [`Frontend`] drawing to the terminal with ratatui.
pub struct TuiFrontend {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    app: App,
    keys: mpsc::UnboundedReceiver<KeyEvent>,
    _guard: TerminalGuard,
}

impl TuiFrontend {
    /// Takes over the terminal and starts reading keys.
    #[instrument]
    pub fn start() -> Result<Self, DuelError> {
        let guard = TerminalGuard::enter().map_err(frontend_error)?;
        let mut terminal =
            Terminal::new(CrosstermBackend::new(io::stdout())).map_err(frontend_error)?;
        terminal.clear().map_err(frontend_error)?;

        let (tx, keys) = mpsc::unbounded_channel();
        tokio::task::spawn_blocking(move || read_keys(tx));
        info!("Terminal UI started");

        let mut frontend = Self {
            terminal,
            app: App::new(),
            keys,
            _guard: guard,
        };
        frontend.render()?;
        Ok(frontend)
    }

    fn render(&mut self) -> Result<(), DuelError> {
        let app = &self.app;
        self.terminal
            .draw(|frame| ui::draw(frame, app))
            .map_err(frontend_error)?;
        Ok(())
    }

    async fn next_key(&mut self) -> Result<KeyEvent, DuelError> {
        self.keys
            .recv()
            .await
            .ok_or_else(|| DuelError::Frontend("keyboard input closed".to_string()))
    }

    async fn ask_yes_no(&mut self) -> Result<bool, DuelError> {
        self.render()?;
        loop {
            let key = self.next_key().await?;
            if input::is_quit(&key) {
                return Err(DuelError::Cancelled);
            }
            if let Some(answer) = input::yes_no(key.code) {
                return Ok(answer);
            }
        }
    }
}

#[async_trait]
impl Frontend for TuiFrontend {
    fn handle_event(&mut self, event: SessionEvent) -> Result<(), DuelError> {
        self.app.handle_event(event);
        self.render()
    }

    async fn ask_retry(&mut self, error: &DuelError) -> Result<bool, DuelError> {
        debug!(error = %error, "Asking whether to retry");
        self.app.prompt_retry();
        self.ask_yes_no().await
    }

    async fn ask_username(
        &mut self,
        rejection: Option<&UsernameError>,
    ) -> Result<String, DuelError> {
        self.app.prompt_username(rejection.map(ToString::to_string));
        self.render()?;
        loop {
            let key = self.next_key().await?;
            if input::is_abort(&key) {
                return Err(DuelError::Cancelled);
            }
            match key.code {
                KeyCode::Enter => return Ok(self.app.input().to_string()),
                KeyCode::Backspace => {
                    self.app.input_mut().pop();
                }
                KeyCode::Char(c) => self.app.input_mut().push(c),
                _ => continue,
            }
            self.render()?;
        }
    }

    async fn ask_move(&mut self, _board: &Board, open: &[Move]) -> Result<Move, DuelError> {
        self.app.prompt_move(open);
        self.render()?;
        loop {
            let key = self.next_key().await?;
            if input::is_quit(&key) {
                return Err(DuelError::Cancelled);
            }
            let chosen = match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => Some(self.app.cursor()),
                code => input::digit_move(code),
            };
            match chosen {
                Some(mv) if open.contains(&mv) => {
                    self.app.finish_move();
                    return Ok(mv);
                }
                Some(mv) => {
                    debug!(cell = mv.index(), "Ignoring occupied cell");
                    self.app.set_cursor(mv);
                }
                None => {
                    let cursor = input::move_cursor(self.app.cursor(), key.code);
                    self.app.set_cursor(cursor);
                }
            }
            self.render()?;
        }
    }

    async fn ask_rematch(&mut self) -> Result<bool, DuelError> {
        self.app.prompt_rematch();
        self.ask_yes_no().await
    }

    async fn acknowledge_end(&mut self) -> Result<(), DuelError> {
        self.render()?;
        // Any key closes the final screen; a closed channel does too.
        let _ = self.keys.recv().await;
        Ok(())
    }

    async fn interrupted(&mut self) {
        while let Some(key) = self.keys.recv().await {
            if input::is_quit(&key) {
                info!("User asked to quit");
                return;
            }
        }
        std::future::pending::<()>().await
    }
}

/// Forwards key presses until the frontend is dropped.
fn read_keys(tx: mpsc::UnboundedSender<KeyEvent>) {
    while !tx.is_closed() {
        match event::poll(KEY_POLL) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx.send(key).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "Failed to read terminal event");
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                warn!(error = %e, "Failed to poll terminal events");
                break;
            }
        }
    }
    debug!("Key reader stopped");
}

fn frontend_error(err: io::Error) -> DuelError {
    DuelError::Frontend(err.to_string())
}
