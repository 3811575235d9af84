//! Game outcomes and cumulative session statistics.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Result of a finished game from one player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The local player completed a line.
    Win,
    /// The opponent completed a line.
    Loss,
    /// Board filled with no line completed.
    Tie,
}

impl Outcome {
    /// The same game seen from the other side.
    pub fn mirrored(self) -> Self {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Loss => Outcome::Win,
            Outcome::Tie => Outcome::Tie,
        }
    }

    /// Banner shown when the game ends.
    pub fn banner(self) -> &'static str {
        match self {
            Outcome::Win => "You Win!",
            Outcome::Loss => "You Lose",
            Outcome::Tie => "Tie Game",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win => write!(f, "win"),
            Outcome::Loss => write!(f, "loss"),
            Outcome::Tie => write!(f, "tie"),
        }
    }
}

/// Counters accumulated over every game of a session.
///
/// `games_played` is bumped when a game starts; exactly one of the other
/// counters is bumped when it resolves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Statistics {
    games_played: u32,
    wins: u32,
    losses: u32,
    ties: u32,
}

impl Statistics {
    /// Creates zeroed statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a newly started game.
    #[instrument(skip(self))]
    pub fn start_game(&mut self) {
        self.games_played += 1;
        debug!(games_played = self.games_played, "Game started");
    }

    /// Records the outcome of the current game.
    #[instrument(skip(self))]
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Tie => self.ties += 1,
        }
        debug!(?outcome, stats = ?self, "Outcome recorded");
    }

    /// Number of games with a recorded outcome.
    pub fn resolved(&self) -> u32 {
        self.wins + self.losses + self.ties
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_each_outcome() {
        let mut stats = Statistics::new();
        for outcome in [Outcome::Win, Outcome::Loss, Outcome::Tie, Outcome::Win] {
            stats.start_game();
            stats.record(outcome);
        }
        assert_eq!(*stats.games_played(), 4);
        assert_eq!(*stats.wins(), 2);
        assert_eq!(*stats.losses(), 1);
        assert_eq!(*stats.ties(), 1);
        assert_eq!(stats.resolved(), 4);
    }

    #[test]
    fn test_mirrored() {
        assert_eq!(Outcome::Win.mirrored(), Outcome::Loss);
        assert_eq!(Outcome::Loss.mirrored(), Outcome::Win);
        assert_eq!(Outcome::Tie.mirrored(), Outcome::Tie);
    }
}
