//! Session error taxonomy.

use crate::username::UsernameError;
use crate::wire::WireError;
use strictly_board::BoardError;
use tracing::warn;

/// Errors raised while establishing or running a duel.
#[derive(Debug, derive_more::Display)]
pub enum DuelError {
    /// Host could not reach the guest; the user may retry.
    #[display("Connection to {} refused", _0)]
    ConnectionRefused(String),

    /// Guest could not bind or listen on the requested address.
    #[display("Could not listen on {}: {}", address, source)]
    BindOrListen {
        /// Address the guest tried to bind.
        address: String,
        /// Underlying socket error.
        source: std::io::Error,
    },

    /// Local username rejected before anything was sent.
    #[display("Invalid username: {}", _0)]
    InvalidUsername(UsernameError),

    /// Peer closed the connection mid-session.
    #[display("Connection to peer lost")]
    ConnectionLost,

    /// Peer sent something the protocol does not allow at this point.
    #[display("Protocol violation: {}", _0)]
    ProtocolViolation(WireError),

    /// Peer sent nothing within the configured limit.
    #[display("Peer did not respond within {} seconds", _0)]
    PeerTimeout(u64),

    /// Local move rejected by the board.
    #[display("{}", _0)]
    Board(BoardError),

    /// An operation was invoked in a state that does not allow it.
    #[display("Cannot {} while {}", action, state)]
    OutOfTurn {
        /// What was attempted.
        action: &'static str,
        /// Session state at the time.
        state: String,
    },

    /// The local user aborted the session.
    #[display("Session cancelled")]
    Cancelled,

    /// The presentation layer failed.
    #[display("Frontend error: {}", _0)]
    Frontend(String),

    /// Any other transport failure.
    #[display("I/O error: {}", _0)]
    Io(std::io::Error),
}

impl DuelError {
    /// Whether the user can be offered another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DuelError::ConnectionRefused(_) | DuelError::InvalidUsername(_) | DuelError::Board(_)
        )
    }

    /// Classifies a socket error from an established connection.
    pub(crate) fn from_stream(err: std::io::Error) -> Self {
        use std::io::ErrorKind;
        match err.kind() {
            ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::BrokenPipe
            | ErrorKind::UnexpectedEof => DuelError::ConnectionLost,
            ErrorKind::InvalidData => DuelError::ProtocolViolation(WireError::NotUtf8),
            _ => {
                warn!(error = %err, "Unclassified stream error");
                DuelError::Io(err)
            }
        }
    }
}

impl std::error::Error for DuelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DuelError::BindOrListen { source, .. } => Some(source),
            DuelError::InvalidUsername(e) => Some(e),
            DuelError::ProtocolViolation(e) => Some(e),
            DuelError::Board(e) => Some(e),
            DuelError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BoardError> for DuelError {
    fn from(err: BoardError) -> Self {
        DuelError::Board(err)
    }
}

impl From<UsernameError> for DuelError {
    fn from(err: UsernameError) -> Self {
        DuelError::InvalidUsername(err)
    }
}

impl From<WireError> for DuelError {
    fn from(err: WireError) -> Self {
        DuelError::ProtocolViolation(err)
    }
}
