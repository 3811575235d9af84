//! Turn-taking session shared by host and guest.
//!
//! One [`DuelSession`] lives for the whole process. It owns the board, the
//! statistics, and the connection, and moves through [`SessionState`] as
//! messages are exchanged. Host and guest run the same code; every
//! asymmetry is a question asked of [`Role`].

use crate::error::DuelError;
use crate::role::Role;
use crate::state::{Progress, SessionState};
use crate::transport::Connection;
use crate::username::Username;
use crate::wire::{RematchToken, WireError, decode_move, encode_move};
use derive_getters::Getters;
use derive_new::new;
use serde::Serialize;
use strictly_board::{Board, Move, Outcome, Statistics, Symbol};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info, instrument, warn};

/// Final figures shown when the session ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters, new)]
pub struct SessionReport {
    role: Role,
    local_name: Option<Username>,
    peer_name: Option<Username>,
    statistics: Statistics,
}

impl SessionReport {
    /// Name of the host player, if known.
    pub fn host_name(&self) -> Option<&Username> {
        match self.role {
            Role::Host => self.local_name.as_ref(),
            Role::Guest => self.peer_name.as_ref(),
        }
    }

    /// Name of the guest player, if known.
    pub fn guest_name(&self) -> Option<&Username> {
        match self.role {
            Role::Host => self.peer_name.as_ref(),
            Role::Guest => self.local_name.as_ref(),
        }
    }
}

/// One side of a duel over an established connection.
#[derive(Debug)]
pub struct DuelSession<S> {
    role: Role,
    connection: Connection<S>,
    state: SessionState,
    local_name: Option<Username>,
    peer_name: Option<Username>,
    board: Board,
    statistics: Statistics,
    history: Vec<(Symbol, Move)>,
}

impl<S: AsyncRead + AsyncWrite + Unpin> DuelSession<S> {
    /// Creates a session over a freshly established connection.
    #[instrument(skip(connection))]
    pub fn new(role: Role, connection: Connection<S>) -> Self {
        info!(%role, symbol = %role.symbol(), "Session created");
        Self {
            role,
            connection,
            state: SessionState::Identifying,
            local_name: None,
            peer_name: None,
            board: Board::new(),
            statistics: Statistics::new(),
            history: Vec::new(),
        }
    }

    /// Exchanges usernames and starts the first game.
    ///
    /// The host sends first and the guest replies. Returns the peer's name.
    #[instrument(skip(self), fields(role = %self.role))]
    pub async fn identify(&mut self, local: Username) -> Result<Username, DuelError> {
        self.require_state(SessionState::Identifying, "exchange usernames")?;

        let raw = if self.role.speaks_first() {
            self.connection.send(local.as_str()).await?;
            self.connection.receive().await?
        } else {
            let raw = self.connection.receive().await?;
            self.connection.send(local.as_str()).await?;
            raw
        };
        let peer = Username::parse(&raw).map_err(|e| {
            warn!(error = %e, "Peer sent an invalid username");
            WireError::InvalidPeerName(raw.clone())
        })?;

        info!(local = %local, peer = %peer, "Usernames exchanged");
        self.local_name = Some(local);
        self.peer_name = Some(peer.clone());
        self.start_game();
        Ok(peer)
    }

    /// Plays `mv` for the local player and sends it to the peer.
    ///
    /// An occupied cell is rejected before anything is sent, leaving the
    /// session unchanged.
    #[instrument(skip(self), fields(role = %self.role))]
    pub async fn play_local_move(&mut self, mv: Move) -> Result<Progress, DuelError> {
        self.require_state(SessionState::InTurn(self.role), "play a local move")?;

        self.board.apply_move(mv, self.role.symbol())?;
        self.connection.send(&encode_move(mv)).await?;
        Ok(self.after_move(self.role, mv))
    }

    /// Waits for the peer's move and applies it.
    #[instrument(skip(self), fields(role = %self.role))]
    pub async fn await_peer_move(&mut self) -> Result<Progress, DuelError> {
        let peer = self.role.peer();
        self.require_state(SessionState::InTurn(peer), "wait for a peer move")?;

        let text = self.connection.receive().await?;
        let mv = decode_move(&text)?;
        self.board
            .apply_move(mv, peer.symbol())
            .map_err(|_| WireError::OccupiedByPeer(mv.index()))?;
        Ok(self.after_move(peer, mv))
    }

    /// Moves a resolved game on to the rematch decision.
    #[instrument(skip(self))]
    pub fn begin_rematch_decision(&mut self) -> Result<(), DuelError> {
        match self.state {
            SessionState::Resolved(_) => {
                self.state = SessionState::RematchDecision;
                Ok(())
            }
            _ => Err(self.out_of_turn("decide on a rematch")),
        }
    }

    /// Host only: sends the rematch decision and acts on it.
    #[instrument(skip(self))]
    pub async fn send_rematch(&mut self, play_again: bool) -> Result<(), DuelError> {
        if !self.role.decides_rematch() {
            return Err(self.out_of_turn("send a rematch decision"));
        }
        self.require_state(SessionState::RematchDecision, "send a rematch decision")?;

        let token = RematchToken::from_decision(play_again);
        self.connection.send(token.as_str()).await?;
        self.apply_rematch(token);
        Ok(())
    }

    /// Guest only: waits for the host's rematch decision and acts on it.
    ///
    /// Returns `true` if another game has started.
    #[instrument(skip(self))]
    pub async fn await_rematch(&mut self) -> Result<bool, DuelError> {
        if self.role.decides_rematch() {
            return Err(self.out_of_turn("wait for a rematch decision"));
        }
        self.require_state(SessionState::RematchDecision, "wait for a rematch decision")?;

        let text = self.connection.receive().await?;
        let token = RematchToken::parse(&text)?;
        self.apply_rematch(token);
        Ok(token.play_again())
    }

    /// Snapshot of names and statistics.
    pub fn report(&self) -> SessionReport {
        SessionReport {
            role: self.role,
            local_name: self.local_name.clone(),
            peer_name: self.peer_name.clone(),
            statistics: self.statistics,
        }
    }

    /// This side's role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Board of the current (or just finished) game.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Statistics accumulated so far.
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Moves of the current game, in play order.
    pub fn history(&self) -> &[(Symbol, Move)] {
        &self.history
    }

    /// Local player's name once identified.
    pub fn local_name(&self) -> Option<&Username> {
        self.local_name.as_ref()
    }

    /// Peer's name once identified.
    pub fn peer_name(&self) -> Option<&Username> {
        self.peer_name.as_ref()
    }

    /// Name of whoever plays `role`.
    pub fn name_of(&self, role: Role) -> Option<&Username> {
        if role == self.role {
            self.local_name()
        } else {
            self.peer_name()
        }
    }

    fn start_game(&mut self) {
        self.board.reset();
        self.history.clear();
        self.statistics.start_game();
        self.state = SessionState::InTurn(Role::FIRST_TO_MOVE);
        info!(
            game = *self.statistics.games_played(),
            first = %Role::FIRST_TO_MOVE,
            "Game started"
        );
    }

    fn after_move(&mut self, mover: Role, mv: Move) -> Progress {
        let symbol = mover.symbol();
        self.history.push((symbol, mv));
        debug!(%mover, cell = mv.index(), board = %self.board.display(), "Move applied");

        // Win is checked before a full board.
        let outcome = if self.board.is_winner(symbol) {
            Some(if mover == self.role {
                Outcome::Win
            } else {
                Outcome::Loss
            })
        } else if self.board.is_full() {
            Some(Outcome::Tie)
        } else {
            None
        };

        match outcome {
            Some(outcome) => {
                self.statistics.record(outcome);
                self.state = SessionState::Resolved(outcome);
                info!(%outcome, stats = ?self.statistics, "Game resolved");
                Progress::Resolved(outcome)
            }
            None => {
                let next = mover.peer();
                self.state = SessionState::InTurn(next);
                Progress::Continue { next }
            }
        }
    }

    fn apply_rematch(&mut self, token: RematchToken) {
        info!(token = token.as_str(), "Rematch decided");
        if token.play_again() {
            self.start_game();
        } else {
            self.state = SessionState::Ended;
            info!(stats = ?self.statistics, "Session ended");
        }
    }

    fn require_state(&self, wanted: SessionState, action: &'static str) -> Result<(), DuelError> {
        if self.state == wanted {
            Ok(())
        } else {
            Err(self.out_of_turn(action))
        }
    }

    fn out_of_turn(&self, action: &'static str) -> DuelError {
        warn!(action, state = %self.state, "Operation not allowed in current state");
        DuelError::OutOfTurn {
            action,
            state: self.state.to_string(),
        }
    }
}
