//! Plain-text wire format.
//!
//! Every logical message is one line of UTF-8 text terminated by `\n`:
//!
//! | message  | text                               |
//! |----------|------------------------------------|
//! | username | the name itself                    |
//! | move     | decimal cell number `1`..`9`       |
//! | rematch  | `Play Again` or `Fun Times`        |

use strictly_board::Move;
use tracing::instrument;

/// Longest line accepted from the peer, terminator excluded.
pub const MAX_LINE_LEN: usize = 1024;

/// Token sent by the host to start another game.
pub const PLAY_AGAIN: &str = "Play Again";

/// Token sent by the host to end the session.
pub const FUN_TIMES: &str = "Fun Times";

/// The host's rematch decision as it travels on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RematchToken {
    /// Start another game.
    PlayAgain,
    /// End the session.
    FunTimes,
}

impl RematchToken {
    /// Token for a yes/no decision.
    pub fn from_decision(play_again: bool) -> Self {
        if play_again {
            RematchToken::PlayAgain
        } else {
            RematchToken::FunTimes
        }
    }

    /// Whether the token asks for another game.
    pub fn play_again(self) -> bool {
        self == RematchToken::PlayAgain
    }

    /// Literal wire text.
    pub fn as_str(self) -> &'static str {
        match self {
            RematchToken::PlayAgain => PLAY_AGAIN,
            RematchToken::FunTimes => FUN_TIMES,
        }
    }

    /// Parses a received token.
    #[instrument]
    pub fn parse(text: &str) -> Result<Self, WireError> {
        match text {
            PLAY_AGAIN => Ok(RematchToken::PlayAgain),
            FUN_TIMES => Ok(RematchToken::FunTimes),
            other => Err(WireError::UnknownRematchToken(other.to_string())),
        }
    }
}

/// Encodes a move as its decimal cell number.
pub fn encode_move(mv: Move) -> String {
    mv.index().to_string()
}

/// Decodes a received move.
#[instrument]
pub fn decode_move(text: &str) -> Result<Move, WireError> {
    let index: u8 = text
        .parse()
        .map_err(|_| WireError::MalformedMove(text.to_string()))?;
    Move::from_index(index).ok_or(WireError::MoveOutOfRange(index))
}

/// Malformed or unexpected data from the peer.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum WireError {
    /// Move text is not a decimal number.
    #[display("expected a cell number, got {:?}", _0)]
    MalformedMove(String),
    /// Move number outside 1-9.
    #[display("cell {} is outside 1-9", _0)]
    MoveOutOfRange(u8),
    /// Peer played a cell that is already taken.
    #[display("peer played occupied cell {}", _0)]
    OccupiedByPeer(u8),
    /// Neither rematch token.
    #[display("unknown rematch token {:?}", _0)]
    UnknownRematchToken(String),
    /// Peer sent an invalid username.
    #[display("peer sent invalid username {:?}", _0)]
    InvalidPeerName(String),
    /// Line exceeded [`MAX_LINE_LEN`].
    #[display("line longer than {} bytes", MAX_LINE_LEN)]
    LineTooLong,
    /// Bytes were not valid UTF-8.
    #[display("data is not valid UTF-8")]
    NotUtf8,
    /// Outgoing text contained a line break.
    #[display("message contains a line break")]
    EmbeddedNewline,
}

impl std::error::Error for WireError {}
