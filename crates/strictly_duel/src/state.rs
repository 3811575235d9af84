//! Session lifecycle states.

use crate::role::Role;
use strictly_board::Outcome;

/// Where a session is in its lifecycle.
///
/// ```text
/// Connecting → Identifying → InTurn(active) → Resolved(outcome)
///                                ↑                  ↓
///                                └──── RematchDecision → Ended
/// ```
///
/// `Connecting` belongs to the driver, which dials or listens before any
/// [`DuelSession`](crate::DuelSession) exists. A session is created on an
/// established connection and so starts in `Identifying`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Transport not yet established; only seen before a session exists.
    Connecting,
    /// Connected, usernames not yet exchanged.
    Identifying,
    /// A game is running and `active` is to move.
    InTurn(Role),
    /// The current game just ended.
    Resolved(Outcome),
    /// Waiting on the host's play-again choice.
    RematchDecision,
    /// Session over; only the final statistics remain.
    Ended,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Connecting => write!(f, "connecting"),
            SessionState::Identifying => write!(f, "exchanging usernames"),
            SessionState::InTurn(role) => write!(f, "{role} to move"),
            SessionState::Resolved(outcome) => write!(f, "resolved ({outcome})"),
            SessionState::RematchDecision => write!(f, "deciding on a rematch"),
            SessionState::Ended => write!(f, "ended"),
        }
    }
}

/// What happened after a move was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Game continues with `next` to move.
    Continue {
        /// Role whose turn it now is.
        next: Role,
    },
    /// Game over, from this side's perspective.
    Resolved(Outcome),
}
