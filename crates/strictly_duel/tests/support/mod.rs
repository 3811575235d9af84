//! Scripted frontend and connection helpers shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use strictly_board::{Board, Move};
use strictly_duel::{
    Connection, DuelError, DuelSession, Frontend, Role, SessionEvent, UsernameError,
};
use tokio::io::DuplexStream;

/// Frontend that answers from pre-recorded scripts and records every event.
///
/// An exhausted script answers with [`DuelError::Cancelled`].
#[derive(Debug, Default)]
pub struct ScriptedFrontend {
    names: VecDeque<String>,
    moves: VecDeque<Move>,
    rematches: VecDeque<bool>,
    retries: VecDeque<bool>,
    interrupt: bool,
    broken_acknowledge: bool,
    /// How many times the end screen was held for a keypress.
    pub acknowledged: usize,
    /// Every event shown, in order.
    pub events: Vec<SessionEvent>,
    /// Reasons given with each username re-prompt.
    pub rejections: Vec<UsernameError>,
    /// Open cells offered with each move prompt.
    pub offered: Vec<Vec<Move>>,
    /// Errors the retry prompt was shown for.
    pub retry_errors: Vec<String>,
}

impl ScriptedFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn moves(mut self, cells: impl IntoIterator<Item = u8>) -> Self {
        self.moves = cells
            .into_iter()
            .map(|c| Move::from_index(c).expect("cell 1-9"))
            .collect();
        self
    }

    pub fn rematches(mut self, answers: impl IntoIterator<Item = bool>) -> Self {
        self.rematches = answers.into_iter().collect();
        self
    }

    pub fn retries(mut self, answers: impl IntoIterator<Item = bool>) -> Self {
        self.retries = answers.into_iter().collect();
        self
    }

    /// Quits as soon as the session waits on the network.
    pub fn interrupting(mut self) -> Self {
        self.interrupt = true;
        self
    }

    /// Fails every end-screen acknowledgement, as a dead terminal would.
    pub fn broken_acknowledge(mut self) -> Self {
        self.broken_acknowledge = true;
        self
    }

    /// Whose turn each board update announced.
    pub fn turns(&self) -> Vec<Role> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::BoardChanged { to_move, .. } => Some(*to_move),
                _ => None,
            })
            .collect()
    }

    /// Whether a fatal error was shown.
    pub fn saw_fatal(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, SessionEvent::Fatal(_)))
    }
}

#[async_trait]
impl Frontend for ScriptedFrontend {
    fn handle_event(&mut self, event: SessionEvent) -> Result<(), DuelError> {
        self.events.push(event);
        Ok(())
    }

    async fn ask_retry(&mut self, error: &DuelError) -> Result<bool, DuelError> {
        self.retry_errors.push(error.to_string());
        self.retries.pop_front().ok_or(DuelError::Cancelled)
    }

    async fn ask_username(
        &mut self,
        rejection: Option<&UsernameError>,
    ) -> Result<String, DuelError> {
        if let Some(reason) = rejection {
            self.rejections.push(reason.clone());
        }
        self.names.pop_front().ok_or(DuelError::Cancelled)
    }

    async fn ask_move(&mut self, _board: &Board, open: &[Move]) -> Result<Move, DuelError> {
        self.offered.push(open.to_vec());
        self.moves.pop_front().ok_or(DuelError::Cancelled)
    }

    async fn ask_rematch(&mut self) -> Result<bool, DuelError> {
        self.rematches.pop_front().ok_or(DuelError::Cancelled)
    }

    async fn acknowledge_end(&mut self) -> Result<(), DuelError> {
        self.acknowledged += 1;
        if self.broken_acknowledge {
            return Err(DuelError::Io(std::io::Error::other("terminal gone")));
        }
        Ok(())
    }

    async fn interrupted(&mut self) {
        if !self.interrupt {
            std::future::pending::<()>().await;
        }
    }
}

/// Host and guest sessions joined by an in-memory pipe.
pub fn session_pair() -> (DuelSession<DuplexStream>, DuelSession<DuplexStream>) {
    let (a, b) = tokio::io::duplex(4096);
    (
        DuelSession::new(Role::Host, Connection::new(a)),
        DuelSession::new(Role::Guest, Connection::new(b)),
    )
}
