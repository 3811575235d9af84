//! Which side of the duel this process plays.

use serde::{Deserialize, Serialize};
use strictly_board::Symbol;

/// Side of the connection.
///
/// The role decides everything that differs between the two processes:
/// who dials, who speaks first, who picks the rematch, and which symbol
/// each side places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Role {
    /// Dials out, plays X, moves first, decides rematches.
    Host,
    /// Listens for the host, plays O.
    Guest,
}

impl Role {
    /// Role that makes the first move of every game.
    pub const FIRST_TO_MOVE: Role = Role::Host;

    /// Symbol placed by this role.
    pub fn symbol(self) -> Symbol {
        match self {
            Role::Host => Symbol::X,
            Role::Guest => Symbol::O,
        }
    }

    /// The other side.
    pub fn peer(self) -> Self {
        match self {
            Role::Host => Role::Guest,
            Role::Guest => Role::Host,
        }
    }

    /// Whether this side sends its username before receiving the peer's.
    pub fn speaks_first(self) -> bool {
        self == Role::Host
    }

    /// Whether this side chooses between a rematch and ending the session.
    pub fn decides_rematch(self) -> bool {
        self == Role::Host
    }
}
