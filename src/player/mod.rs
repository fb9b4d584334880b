//! The player actor seam.
//!
//! A [`Player`] is an external actor: it may be a local bot, a proxy for a
//! remote process, or one of the built-in test doubles. The referee never
//! trusts one: every call is time-boxed, every returned action is
//! validated, and an `Err` from any method is treated as a crash.
//!
//! Actors receive [`QueryBoard`] snapshots, never the live board, so a
//! buggy or hostile implementation cannot mutate authoritative state.

pub mod doubles;
pub mod guarded;
pub mod strategy;

pub use doubles::{BreakerPlayer, CrashingPlayer, InfiniteLoopPlayer, RandomPlayer, StrategyPlayer};
pub use guarded::GuardedPlayer;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::{BuildAction, MoveAction, PlaceAction, PlayerId, QueryBoard};

/// Outcome reported to an actor when its game ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GameStatus {
    Win,
    Lose,
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::Win => f.write_str("WIN"),
            GameStatus::Lose => f.write_str("LOSE"),
        }
    }
}

/// Contract for an external player actor.
///
/// Implementations choose actions; they do not get to apply them. Anything
/// returned here is still subject to rule validation, and the call itself
/// runs under the referee's wall-clock deadline.
#[async_trait]
pub trait Player: Send {
    /// The actor's self-reported id.
    fn id(&self) -> &PlayerId;

    /// Rename the actor (tournament id deduplication).
    fn set_id(&mut self, id: PlayerId);

    /// Choose where to place worker number `wid`.
    async fn get_placement(&mut self, board: QueryBoard, wid: u8) -> Result<PlaceAction>;

    /// Choose a move for this turn.
    async fn get_move(&mut self, board: QueryBoard) -> Result<MoveAction>;

    /// Choose a build for the worker that just moved.
    async fn get_build(&mut self, board: QueryBoard, wid: u8) -> Result<BuildAction>;

    /// Learn that the game ended with the given status.
    async fn game_over(&mut self, status: GameStatus) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_status_wire_form() {
        assert_eq!(serde_json::to_string(&GameStatus::Win).unwrap(), r#""WIN""#);
        assert_eq!(serde_json::to_string(&GameStatus::Lose).unwrap(), r#""LOSE""#);
        assert_eq!(GameStatus::Win.to_string(), "WIN");
    }
}
