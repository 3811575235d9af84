//! Boundary between the session driver and whatever presents it.

use crate::error::DuelError;
use crate::role::Role;
use crate::session::SessionReport;
use crate::transport::Endpoint;
use crate::username::{Username, UsernameError};
use async_trait::async_trait;
use strictly_board::{Board, Move, Outcome};

/// Something the user should see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A connection attempt is starting.
    Connecting {
        /// Local side.
        role: Role,
        /// Where the host dials or the guest listens.
        endpoint: Endpoint,
    },
    /// Guest is bound and waiting for the host.
    Listening {
        /// Address actually bound.
        address: String,
    },
    /// Transport established.
    Connected,
    /// Both usernames are known.
    Identified {
        /// Local player.
        local: Username,
        /// Remote player.
        peer: Username,
    },
    /// A new game began; `game` counts from 1.
    GameStarted {
        /// Games played so far, this one included.
        game: u32,
    },
    /// Board contents changed or the turn passed.
    BoardChanged {
        /// Current board.
        board: Board,
        /// Whose turn it is.
        to_move: Role,
    },
    /// The local side is blocked on the peer's move.
    AwaitingPeerMove,
    /// The current game is over.
    GameOver {
        /// Final board.
        board: Board,
        /// Result from the local side's perspective.
        outcome: Outcome,
    },
    /// Guest is waiting on the host's rematch choice.
    AwaitingRematch,
    /// Session over; final statistics.
    SessionEnded(SessionReport),
    /// Unrecoverable failure; the session is about to end.
    Fatal(String),
}

/// Presentation adapter driven by the session.
///
/// Implementations show [`SessionEvent`]s and answer the questions only the
/// local user can answer. Every question may fail with
/// [`DuelError::Cancelled`] if the user quits instead of answering.
#[async_trait]
pub trait Frontend: Send {
    /// Shows an event.
    fn handle_event(&mut self, event: SessionEvent) -> Result<(), DuelError>;

    /// Host only: offers another attempt after `error`.
    async fn ask_retry(&mut self, error: &DuelError) -> Result<bool, DuelError>;

    /// Asks for the local username; `rejection` explains a previous refusal.
    async fn ask_username(
        &mut self,
        rejection: Option<&UsernameError>,
    ) -> Result<String, DuelError>;

    /// Asks for the local move; `open` lists the selectable cells.
    async fn ask_move(&mut self, board: &Board, open: &[Move]) -> Result<Move, DuelError>;

    /// Host only: play another game?
    async fn ask_rematch(&mut self) -> Result<bool, DuelError>;

    /// Lets the user read the final screen before the process exits.
    async fn acknowledge_end(&mut self) -> Result<(), DuelError>;

    /// Completes when the user asks to quit while the session waits on the
    /// network. The default never completes.
    async fn interrupted(&mut self) {
        std::future::pending::<()>().await
    }
}
