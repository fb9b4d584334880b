//! Stable-identity wrapper around an external player actor.
//!
//! The referee never talks to an actor directly. A `GuardedPlayer` keeps
//! the id the referee bookkeeps under, so an actor mutating its own id
//! mid-game cannot confuse the records, and transcribes every action the
//! actor takes so observers and the game-over path can replay them.

use anyhow::Result;

use super::{GameStatus, Player};
use crate::core::{BuildAction, MoveAction, PlaceAction, PlayerId, QueryBoard, WorkerId};

/// A player actor plus the referee's bookkeeping around it.
pub struct GuardedPlayer {
    id: PlayerId,
    actor: Box<dyn Player>,
    last_place: Option<PlaceAction>,
    last_move: Option<(WorkerId, MoveAction)>,
    last_build: Option<(WorkerId, BuildAction)>,
}

impl GuardedPlayer {
    /// Wrap an actor, adopting its self-reported id as the stable one.
    #[must_use]
    pub fn new(actor: Box<dyn Player>) -> Self {
        let id = actor.id().clone();
        Self {
            id,
            actor,
            last_place: None,
            last_move: None,
            last_build: None,
        }
    }

    /// The stable id the referee knows this player by.
    #[must_use]
    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    /// Rename both this wrapper and the wrapped actor, so the actor's
    /// self-reported id never diverges from the bookkeeping id.
    pub fn set_id(&mut self, id: PlayerId) {
        self.id = id.clone();
        self.actor.set_id(id);
    }

    /// Ask the actor for a placement, recording whatever it returns.
    pub async fn get_placement(&mut self, board: QueryBoard, wid: u8) -> Result<PlaceAction> {
        let place = self.actor.get_placement(board, wid).await?;
        self.last_place = Some(place.clone());
        Ok(place)
    }

    /// Ask the actor for a move, recording it together with the moving
    /// worker as resolved against the snapshot the actor saw.
    pub async fn get_move(&mut self, board: QueryBoard) -> Result<MoveAction> {
        let mv = self.actor.get_move(board.clone()).await?;
        if let Ok(cell) = board.cell(mv.xy1[0], mv.xy1[1]) {
            if let Some(worker) = cell.worker_id() {
                self.last_move = Some((worker.clone(), mv.clone()));
            }
        }
        Ok(mv)
    }

    /// Ask the actor for a build, recording it with the building worker.
    pub async fn get_build(&mut self, board: QueryBoard, wid: u8) -> Result<BuildAction> {
        let build = self.actor.get_build(board.clone(), wid).await?;
        if let Ok(cell) = board.cell(build.xy1[0], build.xy1[1]) {
            if let Some(worker) = cell.worker_id() {
                self.last_build = Some((worker.clone(), build.clone()));
            }
        }
        Ok(build)
    }

    /// Forward the game-over notification to the actor.
    pub async fn game_over(&mut self, status: GameStatus) -> Result<()> {
        self.actor.game_over(status).await
    }

    /// The last placement this player made in the current game.
    #[must_use]
    pub fn last_place(&self) -> Option<&PlaceAction> {
        self.last_place.as_ref()
    }

    /// The last move this player made, with the worker that moved.
    #[must_use]
    pub fn last_move(&self) -> Option<&(WorkerId, MoveAction)> {
        self.last_move.as_ref()
    }

    /// The last build this player made, with the worker that built.
    #[must_use]
    pub fn last_build(&self) -> Option<&(WorkerId, BuildAction)> {
        self.last_build.as_ref()
    }

    /// Clear action history between games of a series. Never called
    /// mid-game.
    pub fn reset(&mut self) {
        self.last_place = None;
        self.last_move = None;
        self.last_build = None;
    }

    /// Unwrap the actor, handing it back to the tournament layer.
    #[must_use]
    pub fn into_actor(self) -> Box<dyn Player> {
        self.actor
    }
}
