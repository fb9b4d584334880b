//! Game outcomes and the fault signal that produces the unfair ones.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Why a game (or series) ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOverCondition {
    /// The winner won by the rules of the game.
    FairGame,
    /// The loser timed out on an action request.
    Timeout,
    /// The loser specified an invalid action.
    InvalidAction,
    /// The loser crashed at runtime.
    Crash,
    /// The loser broke later in the tournament, voiding this result.
    LoserBrokeInTournament,
}

impl GameOverCondition {
    /// Whether the outcome was earned by play rather than by a fault.
    #[must_use]
    pub fn is_fair(self) -> bool {
        matches!(self, GameOverCondition::FairGame)
    }
}

impl std::fmt::Display for GameOverCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let description = match self {
            GameOverCondition::FairGame => "winner won by game rules",
            GameOverCondition::Timeout => "loser timed out on an action request",
            GameOverCondition::InvalidAction => "loser specified an invalid action",
            GameOverCondition::Crash => "loser crashed at runtime",
            GameOverCondition::LoserBrokeInTournament => {
                "loser broke post match in the tournament"
            }
        };
        f.write_str(description)
    }
}

/// Final outcome of a game or series.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOver {
    winner: PlayerId,
    loser: PlayerId,
    condition: GameOverCondition,
}

impl GameOver {
    /// Record an outcome. Winner and loser must be different players.
    #[must_use]
    pub fn new(winner: PlayerId, loser: PlayerId, condition: GameOverCondition) -> Self {
        assert_ne!(winner, loser, "Winner and loser cannot be the same player");
        Self {
            winner,
            loser,
            condition,
        }
    }

    /// The winning player.
    #[must_use]
    pub fn winner(&self) -> &PlayerId {
        &self.winner
    }

    /// The losing player.
    #[must_use]
    pub fn loser(&self) -> &PlayerId {
        &self.loser
    }

    /// Why the game ended.
    #[must_use]
    pub fn condition(&self) -> GameOverCondition {
        self.condition
    }
}

/// Fault raised when a player breaks mid-phase.
///
/// Threaded through the referee's phase functions as the `Err` arm of
/// their results, which preserves the short-circuit behavior of the
/// exception it replaces while keeping control flow explicit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BrokenPlayer {
    /// Seat index (0 or 1) of the offending player.
    pub seat: usize,
    /// What the offense converts to in the game record.
    pub condition: GameOverCondition,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_fairness() {
        assert!(GameOverCondition::FairGame.is_fair());
        assert!(!GameOverCondition::Timeout.is_fair());
        assert!(!GameOverCondition::InvalidAction.is_fair());
        assert!(!GameOverCondition::Crash.is_fair());
        assert!(!GameOverCondition::LoserBrokeInTournament.is_fair());
    }

    #[test]
    fn test_game_over_accessors() {
        let outcome = GameOver::new(
            PlayerId::new("a"),
            PlayerId::new("b"),
            GameOverCondition::FairGame,
        );

        assert_eq!(outcome.winner(), &PlayerId::new("a"));
        assert_eq!(outcome.loser(), &PlayerId::new("b"));
        assert_eq!(outcome.condition(), GameOverCondition::FairGame);
    }

    #[test]
    #[should_panic(expected = "Winner and loser cannot be the same player")]
    fn test_game_over_rejects_self_play() {
        let _ = GameOver::new(
            PlayerId::new("a"),
            PlayerId::new("a"),
            GameOverCondition::FairGame,
        );
    }
}
