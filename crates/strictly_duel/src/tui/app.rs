//! Screen state for the terminal UI.

use crate::frontend::SessionEvent;
use crate::role::Role;
use crate::session::SessionReport;
use crate::username::Username;
use strictly_board::{Board, Move, Outcome};
use tracing::debug;

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Connection status.
    Connecting,
    /// Username entry.
    Username,
    /// Board, turn banner and outcome.
    Board,
    /// Final statistics.
    Statistics,
    /// Unrecoverable error.
    Fatal,
}

/// Everything the renderer needs.
#[derive(Debug)]
pub struct App {
    screen: Screen,
    role: Option<Role>,
    local: Option<Username>,
    peer: Option<Username>,
    board: Board,
    cursor: Move,
    selectable: bool,
    status: String,
    prompt: String,
    input: String,
    error: Option<String>,
    game: u32,
    outcome: Option<Outcome>,
    report: Option<SessionReport>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates the initial connecting screen.
    pub fn new() -> Self {
        Self {
            screen: Screen::Connecting,
            role: None,
            local: None,
            peer: None,
            board: Board::new(),
            cursor: Move::Center,
            selectable: false,
            status: "Connecting...".to_string(),
            prompt: String::new(),
            input: String::new(),
            error: None,
            game: 0,
            outcome: None,
            report: None,
        }
    }

    /// Applies a session event.
    pub fn handle_event(&mut self, event: SessionEvent) {
        debug!(?event, "Handling session event");

        match event {
            SessionEvent::Connecting { role, endpoint } => {
                self.role = Some(role);
                self.screen = Screen::Connecting;
                self.status = match role {
                    Role::Host => format!("Connecting to {endpoint}..."),
                    Role::Guest => format!("Opening {endpoint}..."),
                };
                self.prompt.clear();
            }
            SessionEvent::Listening { address } => {
                self.status = format!("Waiting for host on {address}...");
            }
            SessionEvent::Connected => {
                self.status = "Connection Successful!".to_string();
                self.prompt.clear();
            }
            SessionEvent::Identified { local, peer } => {
                self.local = Some(local);
                self.peer = Some(peer);
            }
            SessionEvent::GameStarted { game } => {
                self.game = game;
                self.board = Board::new();
                self.outcome = None;
                self.screen = Screen::Board;
            }
            SessionEvent::BoardChanged { board, to_move } => {
                self.board = board;
                self.screen = Screen::Board;
                self.status = format!("{}'s turn", self.name_of(to_move));
                self.prompt.clear();
            }
            SessionEvent::AwaitingPeerMove => {
                self.selectable = false;
                self.prompt = format!("Waiting for {} to make a move...", self.peer_name());
            }
            SessionEvent::GameOver { board, outcome } => {
                self.board = board;
                self.selectable = false;
                self.outcome = Some(outcome);
                self.status = outcome.banner().to_string();
                self.prompt.clear();
            }
            SessionEvent::AwaitingRematch => {
                self.prompt = format!("Waiting for {} to decide...", self.name_of(Role::Host));
            }
            SessionEvent::SessionEnded(report) => {
                self.report = Some(report);
                self.screen = Screen::Statistics;
                self.prompt = "Press any key to exit".to_string();
            }
            SessionEvent::Fatal(message) => {
                self.screen = Screen::Fatal;
                self.status = message;
                self.prompt = "Press any key to exit".to_string();
            }
        }
    }

    /// Shows the retry question after a refused connection.
    pub fn prompt_retry(&mut self) {
        self.screen = Screen::Connecting;
        self.status = "Connection Failed.".to_string();
        self.prompt = "Connection Failed. Try Again? (y/n)".to_string();
    }

    /// Opens username entry, showing why the last attempt was refused.
    pub fn prompt_username(&mut self, rejection: Option<String>) {
        self.screen = Screen::Username;
        self.prompt = "Enter an alphanumeric username:".to_string();
        self.input.clear();
        self.error = rejection;
    }

    /// Enables cell selection, keeping the cursor on an open cell.
    pub fn prompt_move(&mut self, open: &[Move]) {
        self.selectable = true;
        if !open.contains(&self.cursor)
            && let Some(first) = open.first()
        {
            self.cursor = *first;
        }
        self.prompt = "Choose a cell: arrows + Enter, or 1-9".to_string();
    }

    /// Ends cell selection.
    pub fn finish_move(&mut self) {
        self.selectable = false;
        self.prompt.clear();
    }

    /// Shows the host's rematch question.
    pub fn prompt_rematch(&mut self) {
        self.prompt = "Play Again? (y/n)".to_string();
    }

    /// Outcome shown on the board screen, if the game is over.
    pub fn outcome_banner(&self) -> Option<&'static str> {
        self.outcome.map(Outcome::banner)
    }

    /// Name shown for `role`.
    pub fn name_of(&self, role: Role) -> String {
        let known = if Some(role) == self.role {
            self.local.as_ref()
        } else {
            self.peer.as_ref()
        };
        known.map_or_else(|| role.to_string(), Username::to_string)
    }

    fn peer_name(&self) -> String {
        match self.role {
            Some(role) => self.name_of(role.peer()),
            None => "peer".to_string(),
        }
    }

    /// Current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Board being shown.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Highlighted cell.
    pub fn cursor(&self) -> Move {
        self.cursor
    }

    /// Moves the highlight.
    pub fn set_cursor(&mut self, cursor: Move) {
        self.cursor = cursor;
    }

    /// Whether the local player may pick a cell right now.
    pub fn selectable(&self) -> bool {
        self.selectable
    }

    /// Headline text.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Question or hint under the headline.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Username typed so far.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Mutable username buffer.
    pub fn input_mut(&mut self) -> &mut String {
        &mut self.input
    }

    /// Inline validation error.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Game number, counting from 1.
    pub fn game(&self) -> u32 {
        self.game
    }

    /// Final report once the session has ended.
    pub fn report(&self) -> Option<&SessionReport> {
        self.report.as_ref()
    }
}
